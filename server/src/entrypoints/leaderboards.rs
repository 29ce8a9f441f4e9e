use std::sync::Arc;

use giveboard_server::db::UserStore;
use rocket::{serde::json::Json, State};
use shared::compute_leaderboard;

use super::types::LeaderboardEntryResponse;

#[utoipa::path(context_path = "/api/leaderboard", responses(
    (status = 200, description = "All users ranked by donations raised", body = [LeaderboardEntryResponse])
))]
#[get("/")]
pub(crate) async fn get_leaderboard(
    store: &State<Arc<dyn UserStore>>,
) -> Option<Json<Vec<LeaderboardEntryResponse>>> {
    let records = match store.list_users().await {
        Err(e) => {
            rocket::error!("Failed to get leaderboard: {e}");
            return None;
        }
        Ok(value) => value,
    };

    let entries = compute_leaderboard(&records);
    Some(Json(entries.into_iter().map(Into::into).collect()))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing leaderboard entrypoints", |rocket| async {
        rocket.mount("/api/leaderboard", rocket::routes![get_leaderboard])
    })
}
