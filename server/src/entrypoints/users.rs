use std::sync::Arc;

use giveboard_server::db::UserStore;
use rocket::{serde::json::Json, State};

use super::types::UserResponse;

#[utoipa::path(context_path = "/api/users", responses(
    (status = 200, description = "Get one user's record", body = UserResponse),
    (status = 404, description = "No such user"),
))]
#[get("/<id>")]
pub(crate) async fn get_user(
    id: &str,
    store: &State<Arc<dyn UserStore>>,
) -> Option<Json<UserResponse>> {
    let user = match store.get_user(id).await {
        Err(e) => {
            rocket::error!("Failed to get user {id}: {e}");
            return None;
        }
        Ok(value) => value?,
    };

    Some(Json(user.into()))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing user entrypoints", |rocket| async {
        rocket.mount("/api/users", rocket::routes![get_user])
    })
}
