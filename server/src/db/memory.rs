use async_trait::async_trait;
use itertools::Itertools;
use rocket::tokio::sync::RwLock;
use shared::UserRecord;

use super::UserStore;

/// In-process fake of the document store, for tests and store-less demo
/// runs. Insertion order is the tie order [`UserStore::list_users`]
/// preserves.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserRecord>>,
}

impl MemoryStore {
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: &str) -> anyhow::Result<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn list_users(&self) -> anyhow::Result<Vec<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .sorted_by(|a, b| b.donations_raised.total_cmp(&a.donations_raised))
            .cloned()
            .collect())
    }

    async fn create_user(&self, record: &UserRecord) -> anyhow::Result<()> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|user| user.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => users.push(record.clone()),
        }
        Ok(())
    }

    async fn increment_donations(&self, id: &str, amount: f64) -> anyhow::Result<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.donations_raised += amount;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, donations: f64) -> UserRecord {
        let mut record = UserRecord::register(id.to_string(), id, &format!("{id}@example.org"));
        record.donations_raised = donations;
        record
    }

    #[rocket::async_test]
    async fn create_then_get_round_trips() {
        let store = MemoryStore::default();
        store.create_user(&record("sarah", 120.0)).await.unwrap();

        let fetched = store.get_user("sarah").await.unwrap().unwrap();
        assert_eq!(fetched.donations_raised, 120.0);
        assert!(store.get_user("nobody").await.unwrap().is_none());
    }

    #[rocket::async_test]
    async fn create_replaces_an_existing_document() {
        let store = MemoryStore::default();
        store.create_user(&record("sarah", 120.0)).await.unwrap();
        store.create_user(&record("sarah", 0.0)).await.unwrap();

        let fetched = store.get_user("sarah").await.unwrap().unwrap();
        assert_eq!(fetched.donations_raised, 0.0);
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[rocket::async_test]
    async fn list_is_ordered_by_donations_descending() {
        let store = MemoryStore::with_users(vec![
            record("low", 10.0),
            record("high", 500.0),
            record("mid", 50.0),
        ]);

        let ids: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.id)
            .collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[rocket::async_test]
    async fn increment_is_additive_and_reports_missing_users() {
        let store = MemoryStore::with_users(vec![record("sarah", 15420.0)]);

        assert!(store.increment_donations("sarah", 100.0).await.unwrap());
        let fetched = store.get_user("sarah").await.unwrap().unwrap();
        assert_eq!(fetched.donations_raised, 15520.0);

        assert!(!store.increment_donations("nobody", 100.0).await.unwrap());
    }
}
