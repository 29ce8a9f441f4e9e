use rocket::fairing::AdHoc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod donations;
pub mod leaderboards;
pub mod statistics;
pub mod types;
pub mod users;

#[derive(OpenApi)]
#[openapi(
    paths(
        users::get_user,
        leaderboards::get_leaderboard,
        statistics::get_user_stats,
        donations::record_donation,
        auth::register,
        auth::login,
        auth::logout,
        auth::change_password,
        auth::get_session,
    ),
    components(schemas(
        types::UserResponse,
        types::LeaderboardEntryResponse,
        types::UserStatsResponse,
        types::DonationRequest,
        types::RegisterRequest,
        types::LoginRequest,
        types::PasswordRequest,
        types::AuthResponse,
        types::SessionResponse,
    ))
)]
struct ApiDoc;

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket
            .attach(users::stage())
            .attach(leaderboards::stage())
            .attach(statistics::stage())
            .attach(donations::stage())
            .attach(auth::stage())
            .mount(
                "/",
                SwaggerUi::new("/swagger-ui/<_..>").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use giveboard_server::auth::AuthProvider;
    use giveboard_server::auth::MemoryAuth;
    use giveboard_server::db::{MemoryStore, UserStore};
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::asynchronous::Client;
    use shared::UserRecord;

    use super::types::{
        AuthResponse, LeaderboardEntryResponse, SessionResponse, UserResponse, UserStatsResponse,
    };

    fn record(id: &str, name: &str, donations: f64) -> UserRecord {
        let mut record = UserRecord::register(
            id.to_string(),
            name,
            &format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
        );
        record.donations_raised = donations;
        record
    }

    fn seeded_store() -> MemoryStore {
        MemoryStore::with_users(vec![
            record("1", "Sarah Johnson", 15420.0),
            record("2", "Maria Garcia", 18750.0),
            record("3", "Emily Chen", 12300.0),
        ])
    }

    async fn client_with(store: MemoryStore) -> Client {
        let store: Arc<dyn UserStore> = Arc::new(store);
        let auth: Arc<dyn AuthProvider> = Arc::new(MemoryAuth::default());
        let rocket = rocket::build()
            .manage(store)
            .manage(auth)
            .attach(super::stage());
        Client::tracked(rocket).await.expect("valid rocket instance")
    }

    #[rocket::async_test]
    async fn get_user_returns_the_record_or_404() {
        let client = client_with(seeded_store()).await;

        let response = client.get("/api/users/1").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let user: UserResponse = response.into_json().await.unwrap();
        assert_eq!(user.name, "Sarah Johnson");
        assert_eq!(user.donations_raised, 15420.0);

        let missing = client.get("/api/users/nobody").dispatch().await;
        assert_eq!(missing.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn leaderboard_is_ranked_descending() {
        let client = client_with(seeded_store()).await;

        let response = client.get("/api/leaderboard").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let board: Vec<LeaderboardEntryResponse> = response.into_json().await.unwrap();

        let ordered: Vec<(&str, u64)> = board
            .iter()
            .map(|entry| (entry.id.as_str(), entry.rank))
            .collect();
        assert_eq!(ordered, vec![("2", 1), ("1", 2), ("3", 3)]);
    }

    #[rocket::async_test]
    async fn stats_report_rank_and_stay_available_for_unknown_users() {
        let client = client_with(seeded_store()).await;

        let response = client.get("/api/users/1/stats").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let stats: UserStatsResponse = response.into_json().await.unwrap();
        assert_eq!(stats.rank_position, 2);
        assert_eq!(stats.total_raised, 15420.0);
        assert_eq!(stats.tier_label, "Bronze");
        assert!((10..=39).contains(&stats.monthly_growth));

        let absent = client.get("/api/users/nobody/stats").dispatch().await;
        assert_eq!(absent.status(), Status::Ok);
        let stats: UserStatsResponse = absent.into_json().await.unwrap();
        assert_eq!(stats.total_raised, 0.0);
        assert_eq!(stats.tier_label, "Bronze");
        assert_eq!(stats.rank_position, 4);
        assert_eq!(stats.referral_code, "default2025");
        assert!((10..=39).contains(&stats.monthly_growth));
    }

    #[rocket::async_test]
    async fn donations_increment_and_validate() {
        let client = client_with(seeded_store()).await;

        let response = client
            .post("/api/users/1/donations")
            .header(ContentType::JSON)
            .body(r#"{"amount": 100}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let user: UserResponse = response.into_json().await.unwrap();
        assert_eq!(user.donations_raised, 15520.0);

        let invalid = client
            .post("/api/users/1/donations")
            .header(ContentType::JSON)
            .body(r#"{"amount": 0}"#)
            .dispatch()
            .await;
        assert_eq!(invalid.status(), Status::BadRequest);
        let body = invalid.into_string().await.unwrap();
        assert!(body.contains("error"));

        let missing = client
            .post("/api/users/nobody/donations")
            .header(ContentType::JSON)
            .body(r#"{"amount": 10}"#)
            .dispatch()
            .await;
        assert_eq!(missing.status(), Status::NotFound);

        // The rejected requests wrote nothing.
        let check = client.get("/api/users/1").dispatch().await;
        let user: UserResponse = check.into_json().await.unwrap();
        assert_eq!(user.donations_raised, 15520.0);
    }

    #[rocket::async_test]
    async fn registration_builds_the_user_document() {
        let client = client_with(MemoryStore::default()).await;

        let response = client
            .post("/api/auth/register")
            .header(ContentType::JSON)
            .body(r#"{"name": "Aisha Patel", "email": "aisha@example.org", "password": "hunter22"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let auth: AuthResponse = response.into_json().await.unwrap();
        assert!(!auth.token.is_empty());

        let user = auth.user.expect("document created at registration");
        assert_eq!(user.name, "Aisha Patel");
        assert_eq!(user.donations_raised, 0.0);
        assert!(user.referral_code.starts_with("aisha"));

        // The document is immediately visible on the leaderboard.
        let board: Vec<LeaderboardEntryResponse> = client
            .get("/api/leaderboard")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].rank, 1);
    }

    #[rocket::async_test]
    async fn auth_failures_surface_the_fixed_messages() {
        let client = client_with(MemoryStore::default()).await;

        let weak = client
            .post("/api/auth/register")
            .header(ContentType::JSON)
            .body(r#"{"name": "A", "email": "a@example.org", "password": "tiny"}"#)
            .dispatch()
            .await;
        assert_eq!(weak.status(), Status::BadRequest);
        let body = weak.into_string().await.unwrap();
        assert!(body.contains("Password should be at least 6 characters"));

        client
            .post("/api/auth/register")
            .header(ContentType::JSON)
            .body(r#"{"name": "Sarah", "email": "sarah@example.org", "password": "hunter22"}"#)
            .dispatch()
            .await;

        let duplicate = client
            .post("/api/auth/register")
            .header(ContentType::JSON)
            .body(r#"{"name": "Sarah", "email": "sarah@example.org", "password": "hunter22"}"#)
            .dispatch()
            .await;
        assert_eq!(duplicate.status(), Status::Conflict);
        let body = duplicate.into_string().await.unwrap();
        assert!(body.contains("This email is already registered. Please sign in instead."));

        let wrong = client
            .post("/api/auth/login")
            .header(ContentType::JSON)
            .body(r#"{"email": "sarah@example.org", "password": "wrong-password"}"#)
            .dispatch()
            .await;
        assert_eq!(wrong.status(), Status::Unauthorized);
        let body = wrong.into_string().await.unwrap();
        assert!(body.contains("Invalid email or password"));
    }

    #[rocket::async_test]
    async fn session_round_trip_with_logout() {
        let client = client_with(MemoryStore::default()).await;

        let auth: AuthResponse = client
            .post("/api/auth/register")
            .header(ContentType::JSON)
            .body(r#"{"name": "Sarah", "email": "sarah@example.org", "password": "hunter22"}"#)
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        let bearer = Header::new("Authorization", format!("Bearer {}", auth.token));
        let session: SessionResponse = client
            .get("/api/auth/session")
            .header(bearer.clone())
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert!(session.authenticated);
        assert_eq!(session.uid.as_deref(), Some(auth.uid.as_str()));
        assert!(session.user.is_some());

        // No token at all resolves to unauthenticated, not an error.
        let anonymous: SessionResponse = client
            .get("/api/auth/session")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert!(!anonymous.authenticated);

        let logout = client
            .post("/api/auth/logout")
            .header(bearer.clone())
            .dispatch()
            .await;
        assert_eq!(logout.status(), Status::NoContent);

        let after: SessionResponse = client
            .get("/api/auth/session")
            .header(bearer)
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert!(!after.authenticated);
    }

    #[rocket::async_test]
    async fn password_change_takes_effect() {
        let client = client_with(MemoryStore::default()).await;

        let auth: AuthResponse = client
            .post("/api/auth/register")
            .header(ContentType::JSON)
            .body(r#"{"name": "Sarah", "email": "sarah@example.org", "password": "hunter22"}"#)
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        let changed = client
            .post("/api/auth/password")
            .header(ContentType::JSON)
            .header(Header::new(
                "Authorization",
                format!("Bearer {}", auth.token),
            ))
            .body(r#"{"newPassword": "correct-horse"}"#)
            .dispatch()
            .await;
        assert_eq!(changed.status(), Status::NoContent);

        let login = client
            .post("/api/auth/login")
            .header(ContentType::JSON)
            .body(r#"{"email": "sarah@example.org", "password": "correct-horse"}"#)
            .dispatch()
            .await;
        assert_eq!(login.status(), Status::Ok);
    }
}
