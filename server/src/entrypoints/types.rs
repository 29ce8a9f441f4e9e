use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{LeaderboardEntry, UserRecord, UserStats};
use utoipa::ToSchema;

/// Wire form of a stored user record.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub referral_code: String,
    pub donations_raised: f64,
    pub join_date: NaiveDate,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            referral_code: record.referral_code,
            donations_raised: record.donations_raised,
            join_date: record.join_date,
            avatar: record.avatar,
            tier: record.tier.map(|tier| tier.to_string()),
        }
    }
}

/// One leaderboard row: the record plus its 1-based rank.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub referral_code: String,
    pub donations_raised: f64,
    pub join_date: NaiveDate,
    pub avatar: String,
    pub rank: u64,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            id: entry.record.id,
            name: entry.record.name,
            email: entry.record.email,
            referral_code: entry.record.referral_code,
            donations_raised: entry.record.donations_raised,
            join_date: entry.record.join_date,
            avatar: entry.record.avatar,
            rank: entry.rank,
        }
    }
}

/// Derived statistics. `rank_position` is the numeric community rank;
/// `tier_label` is the qualitative one — two fields on purpose.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    pub total_raised: f64,
    pub tier_label: String,
    pub rank_position: u64,
    pub monthly_growth: u32,
    pub referral_code: String,
}

impl From<UserStats> for UserStatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            total_raised: stats.total_raised,
            tier_label: stats.tier_label.to_string(),
            rank_position: stats.rank_position,
            monthly_growth: stats.monthly_growth,
            referral_code: stats.referral_code,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DonationRequest {
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest {
    pub new_password: String,
}

/// Returned by register and login. `user` is absent when the profile read
/// degrades after a successful authentication.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl SessionResponse {
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            uid: None,
            email: None,
            user: None,
        }
    }
}
