use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{AuthError, AuthProvider, Session, SessionUser};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the hosted auth collaborator (Identity Toolkit).
pub struct FirebaseAuth {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuth {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, IDENTITY_TOOLKIT_URL.to_string())
    }

    /// Point at an emulator instead of the hosted endpoint.
    pub fn with_base_url(api_key: String, base_url: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<T, AuthError> {
        let url = format!(
            "{}/accounts:{}?key={}",
            self.base_url, endpoint, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    AuthError::NetworkRequestFailed
                } else {
                    AuthError::Other(e.to_string())
                }
            })?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| AuthError::Other(e.to_string()))
        } else {
            let envelope: ErrorEnvelope = response
                .json()
                .await
                .map_err(|e| AuthError::Other(e.to_string()))?;
            Err(AuthError::from_code(&envelope.error.message))
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    email: String,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: String,
}

impl From<TokenResponse> for Session {
    fn from(response: TokenResponse) -> Self {
        Self {
            uid: response.local_id,
            email: response.email,
            id_token: response.id_token,
        }
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response: TokenResponse = self
            .call(
                "signUp",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(response.into())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response: TokenResponse = self
            .call(
                "signInWithPassword",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(response.into())
    }

    async fn sign_out(&self, _token: &str) -> Result<(), AuthError> {
        // The collaborator has no revocation endpoint for password sessions;
        // the token is discarded by the caller.
        Ok(())
    }

    async fn current_session(&self, token: &str) -> Result<Option<SessionUser>, AuthError> {
        let response: Result<LookupResponse, AuthError> = self
            .call("lookup", serde_json::json!({ "idToken": token }))
            .await;
        match response {
            Ok(lookup) => Ok(lookup.users.into_iter().next().map(|user| SessionUser {
                uid: user.local_id,
                email: user.email,
            })),
            // A token the collaborator no longer recognizes is an
            // unauthenticated session, not a failure.
            Err(AuthError::Other(code))
                if code.starts_with("INVALID_ID_TOKEN") || code.starts_with("USER_NOT_FOUND") =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn change_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let _: serde_json::Value = self
            .call(
                "update",
                serde_json::json!({
                    "idToken": token,
                    "password": new_password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(())
    }
}
