#[macro_use]
extern crate rocket;

mod entrypoints;

use std::sync::Arc;

use giveboard_server::auth::{AuthProvider, FirebaseAuth, MemoryAuth};
use giveboard_server::db::{MemoryStore, PgStore, UserStore};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, serde::Deserialize)]
pub struct Env {
    database_url: Option<String>,
    firebase_api_key: Option<String>,
}

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().pretty());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let env = envy::from_env::<Env>().expect("Failed to load environment variables");

    let store: Arc<dyn UserStore> = match env.database_url.as_deref() {
        Some(url) => Arc::new(
            PgStore::connect(url)
                .await
                .expect("Failed to connect to the user store"),
        ),
        None => {
            tracing::warn!("DATABASE_URL not set, serving from an in-memory store");
            Arc::new(MemoryStore::default())
        }
    };

    let auth: Arc<dyn AuthProvider> = match env.firebase_api_key {
        Some(key) => Arc::new(FirebaseAuth::new(key).expect("Failed to build the auth client")),
        None => {
            tracing::warn!("FIREBASE_API_KEY not set, using the in-memory auth fake");
            Arc::new(MemoryAuth::default())
        }
    };

    let cors = rocket_cors::CorsOptions::default()
        .to_cors()
        .expect("Failed to build the CORS fairing");

    rocket::build()
        .manage(store)
        .manage(auth)
        .attach(cors)
        .attach(entrypoints::stage())
}
