use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{generate_referral_code, TierLabel, UserId};

/// One registered fundraiser, as stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub referral_code: String,
    pub donations_raised: f64,
    pub join_date: NaiveDate,
    pub avatar: String,
    /// Set by an external process, never by this service. Promotion between
    /// tiers has no thresholds defined here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<TierLabel>,
}

impl UserRecord {
    /// The document written at account creation. The referral code and
    /// avatar are derived once here and never recomputed, even if the name
    /// changes later.
    pub fn register(id: UserId, name: &str, email: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            referral_code: generate_referral_code(name),
            donations_raised: 0.0,
            join_date: Utc::now().date_naive(),
            avatar: avatar_url(name),
            tier: None,
        }
    }
}

fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        urlencoding::encode(name)
    )
}

/// A user record projected onto its 1-based leaderboard position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub record: UserRecord,
    pub rank: u64,
}

/// Derived per-user statistics. Never persisted; recomputed on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_raised: f64,
    /// Qualitative tier, echoed from the stored record or defaulted to
    /// Bronze. Distinct from `rank_position` on purpose.
    pub tier_label: TierLabel,
    /// 1-based position when all users are sorted by total donations
    /// descending.
    pub rank_position: u64,
    /// Placeholder figure, uniform in [10, 39]. Not a real metric.
    pub monthly_growth: u32,
    pub referral_code: String,
}
