use std::sync::Arc;

use giveboard_server::db::UserStore;
use giveboard_server::donations::apply_donation;
use giveboard_server::error::ApiError;
use rocket::{serde::json::Json, State};

use super::types::{DonationRequest, UserResponse};

#[utoipa::path(context_path = "/api/users", request_body = DonationRequest, responses(
    (status = 200, description = "Donation recorded; returns the fresh record", body = UserResponse),
    (status = 400, description = "Non-positive or non-finite amount"),
    (status = 404, description = "No such user"),
))]
#[post("/<id>/donations", data = "<donation>")]
pub(crate) async fn record_donation(
    id: &str,
    donation: Json<DonationRequest>,
    store: &State<Arc<dyn UserStore>>,
) -> Result<Json<UserResponse>, ApiError> {
    let record = apply_donation(store.inner().as_ref(), id, donation.amount).await?;
    rocket::info!("Recorded donation of {} for {id}", donation.amount);
    Ok(Json(record.into()))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing donation entrypoints", |rocket| async {
        rocket.mount("/api/users", rocket::routes![record_donation])
    })
}
