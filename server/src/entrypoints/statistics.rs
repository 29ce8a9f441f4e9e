use std::sync::Arc;

use giveboard_server::db::UserStore;
use rocket::{serde::json::Json, State};
use shared::compute_user_stats;

use super::types::UserStatsResponse;

/// The read path favors availability: a store failure or an unknown id both
/// produce the documented default statistics instead of an error.
#[utoipa::path(context_path = "/api/users", responses(
    (status = 200, description = "Derived statistics for one user", body = UserStatsResponse)
))]
#[get("/<id>/stats")]
pub(crate) async fn get_user_stats(
    id: &str,
    store: &State<Arc<dyn UserStore>>,
) -> Json<UserStatsResponse> {
    let records = match store.list_users().await {
        Ok(value) => value,
        Err(e) => {
            rocket::error!("Failed to load users for stats, serving defaults: {e}");
            Vec::new()
        }
    };

    let stats = compute_user_stats(id, &records, &mut rand::thread_rng());
    Json(stats.into())
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing statistics entrypoints", |rocket| async {
        rocket.mount("/api/users", rocket::routes![get_user_stats])
    })
}
