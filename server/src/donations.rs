use shared::UserRecord;

use crate::{db::UserStore, error::ApiError};

/// Applies one additive donation to a user's running total.
///
/// Validates before touching the store: non-positive or non-finite amounts
/// fail with [`ApiError::InvalidAmount`] and perform no write. The update
/// itself is the store's atomic increment, and the fresh record is read
/// back afterwards so the caller observes its own write.
pub async fn apply_donation(
    store: &dyn UserStore,
    user_id: &str,
    amount: f64,
) -> Result<UserRecord, ApiError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ApiError::InvalidAmount);
    }

    if !store.increment_donations(user_id, amount).await? {
        return Err(ApiError::NotFound);
    }

    store.get_user(user_id).await?.ok_or(ApiError::NotFound)
}
