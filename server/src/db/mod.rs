use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{TierLabel, UserRecord};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

mod memory;

pub use memory::MemoryStore;

/// The four document-store primitives this application consumes. Injected
/// as a trait object so tests run against [`MemoryStore`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &str) -> anyhow::Result<Option<UserRecord>>;
    /// Every record, ordered by total donations descending (the store-side
    /// ordering primitive; readers still rank through the pure deriver).
    async fn list_users(&self) -> anyhow::Result<Vec<UserRecord>>;
    /// Writes the full document, replacing any existing one with the same id.
    async fn create_user(&self, record: &UserRecord) -> anyhow::Result<()>;
    /// Atomic field increment; `false` when no such user exists. Concurrent
    /// donations both land — there is no read-modify-write window here.
    async fn increment_donations(&self, id: &str, amount: f64) -> anyhow::Result<bool>;
}

const SCHEMA: &str = include_str!("../../sql/schema.sql");

const USER_FIELDS: &str = "id, name, email, referral_code, donations_raised, join_date, avatar, tier";

/// Postgres-backed store.
#[derive(Clone, Debug)]
pub struct PgStore(PgPool);

impl PgStore {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await
            .context("Failed to connect to Postgres")?;
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self(pool))
    }
}

#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    referral_code: String,
    donations_raised: f64,
    join_date: NaiveDate,
    avatar: String,
    tier: Option<String>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            referral_code: row.referral_code,
            donations_raised: row.donations_raised,
            join_date: row.join_date,
            avatar: row.avatar,
            tier: row.tier.and_then(|tier| tier.parse::<TierLabel>().ok()),
        }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn get_user(&self, id: &str) -> anyhow::Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_FIELDS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.0)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_users(&self) -> anyhow::Result<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_FIELDS} FROM users ORDER BY donations_raised DESC"
        ))
        .fetch_all(&self.0)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_user(&self, record: &UserRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, referral_code, donations_raised, join_date, avatar, tier)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                email = EXCLUDED.email,
                referral_code = EXCLUDED.referral_code,
                donations_raised = EXCLUDED.donations_raised,
                join_date = EXCLUDED.join_date,
                avatar = EXCLUDED.avatar,
                tier = EXCLUDED.tier
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.referral_code)
        .bind(record.donations_raised)
        .bind(record.join_date)
        .bind(&record.avatar)
        .bind(record.tier.map(|tier| tier.to_string()))
        .execute(&self.0)
        .await?;
        Ok(())
    }

    async fn increment_donations(&self, id: &str, amount: f64) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET donations_raised = donations_raised + $2 WHERE id = $1",
        )
        .bind(id)
        .bind(amount)
        .execute(&self.0)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
