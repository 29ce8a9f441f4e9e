use std::collections::HashMap;

use async_trait::async_trait;
use rocket::tokio::sync::RwLock;

use super::{AuthError, AuthProvider, Session, SessionUser};

const MIN_PASSWORD_LEN: usize = 6;

/// In-process stand-in for the hosted auth collaborator, enforcing the same
/// coarse rules the real service reports back: unique emails, six-character
/// passwords, an '@' in the address.
#[derive(Default)]
pub struct MemoryAuth {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    /// Keyed by email.
    accounts: HashMap<String, Account>,
    /// Token to email.
    sessions: HashMap<String, String>,
    counter: u64,
}

struct Account {
    uid: String,
    password: String,
}

fn validate(email: &str, password: &str) -> Result<(), AuthError> {
    if !email.contains('@') {
        return Err(AuthError::InvalidEmail);
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate(email, password)?;
        let mut state = self.state.write().await;
        if state.accounts.contains_key(email) {
            return Err(AuthError::EmailAlreadyInUse);
        }
        state.counter += 1;
        let uid = format!("user-{}", state.counter);
        let token = format!("token-{}", state.counter);
        state.accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        state.sessions.insert(token.clone(), email.to_string());
        Ok(Session {
            uid,
            email: email.to_string(),
            id_token: token,
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut state = self.state.write().await;
        let account = state.accounts.get(email).ok_or(AuthError::UserNotFound)?;
        if account.password != password {
            return Err(AuthError::WrongPassword);
        }
        let uid = account.uid.clone();
        state.counter += 1;
        let token = format!("token-{}", state.counter);
        state.sessions.insert(token.clone(), email.to_string());
        Ok(Session {
            uid,
            email: email.to_string(),
            id_token: token,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.state.write().await.sessions.remove(token);
        Ok(())
    }

    async fn current_session(&self, token: &str) -> Result<Option<SessionUser>, AuthError> {
        let state = self.state.read().await;
        Ok(state.sessions.get(token).and_then(|email| {
            state.accounts.get(email).map(|account| SessionUser {
                uid: account.uid.clone(),
                email: email.clone(),
            })
        }))
    }

    async fn change_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        let mut state = self.state.write().await;
        let email = state
            .sessions
            .get(token)
            .cloned()
            .ok_or(AuthError::UserNotFound)?;
        let account = state
            .accounts
            .get_mut(&email)
            .ok_or(AuthError::UserNotFound)?;
        account.password = new_password.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rocket::async_test]
    async fn account_lifecycle() {
        let auth = MemoryAuth::default();

        let session = auth
            .create_account("sarah@example.org", "hunter22")
            .await
            .unwrap();
        assert_eq!(session.email, "sarah@example.org");

        let identity = auth.current_session(&session.id_token).await.unwrap();
        assert_eq!(identity.unwrap().uid, session.uid);

        auth.sign_out(&session.id_token).await.unwrap();
        assert!(auth
            .current_session(&session.id_token)
            .await
            .unwrap()
            .is_none());

        let again = auth
            .sign_in("sarah@example.org", "hunter22")
            .await
            .unwrap();
        assert_eq!(again.uid, session.uid);
    }

    #[rocket::async_test]
    async fn rejects_bad_registrations() {
        let auth = MemoryAuth::default();

        assert!(matches!(
            auth.create_account("not-an-email", "hunter22").await,
            Err(AuthError::InvalidEmail)
        ));
        assert!(matches!(
            auth.create_account("sarah@example.org", "short").await,
            Err(AuthError::WeakPassword)
        ));

        auth.create_account("sarah@example.org", "hunter22")
            .await
            .unwrap();
        assert!(matches!(
            auth.create_account("sarah@example.org", "hunter22").await,
            Err(AuthError::EmailAlreadyInUse)
        ));
    }

    #[rocket::async_test]
    async fn rejects_bad_sign_ins() {
        let auth = MemoryAuth::default();
        auth.create_account("sarah@example.org", "hunter22")
            .await
            .unwrap();

        assert!(matches!(
            auth.sign_in("nobody@example.org", "hunter22").await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            auth.sign_in("sarah@example.org", "wrong-password").await,
            Err(AuthError::WrongPassword)
        ));
    }

    #[rocket::async_test]
    async fn password_change_applies_to_the_next_sign_in() {
        let auth = MemoryAuth::default();
        let session = auth
            .create_account("sarah@example.org", "hunter22")
            .await
            .unwrap();

        assert!(matches!(
            auth.change_password(&session.id_token, "tiny").await,
            Err(AuthError::WeakPassword)
        ));

        auth.change_password(&session.id_token, "correct-horse")
            .await
            .unwrap();
        assert!(matches!(
            auth.sign_in("sarah@example.org", "hunter22").await,
            Err(AuthError::WrongPassword)
        ));
        auth.sign_in("sarah@example.org", "correct-horse")
            .await
            .unwrap();
    }
}
