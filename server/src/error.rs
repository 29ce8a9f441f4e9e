use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};

use crate::auth::AuthError;
use crate::consts;

/// Failure taxonomy for the request paths. Statistics reads never surface
/// these; mutations and authentication do.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    NotFound,
    #[error("donation amount must be a positive, finite number")]
    InvalidAmount,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("upstream service failure: {0}")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound => Status::NotFound,
            Self::InvalidAmount => Status::BadRequest,
            Self::Auth(err) => match err {
                AuthError::UserNotFound | AuthError::WrongPassword | AuthError::Other(_) => {
                    Status::Unauthorized
                }
                AuthError::EmailAlreadyInUse => Status::Conflict,
                AuthError::WeakPassword | AuthError::InvalidEmail => Status::BadRequest,
                AuthError::NetworkRequestFailed => Status::BadGateway,
            },
            Self::Upstream(_) => Status::BadGateway,
        }
    }

    /// The string shown to the person on the other end. Auth codes map to
    /// their fixed messages; upstream detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Auth(err) => err.user_message().to_string(),
            Self::Upstream(_) => consts::UPSTREAM_UNAVAILABLE.to_string(),
            other => other.to_string(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _req: &'r Request<'_>) -> response::Result<'static> {
        if let Self::Upstream(e) = &self {
            rocket::error!("upstream failure: {e:#}");
        }
        let body = serde_json::json!({ "error": self.public_message() }).to_string();
        Response::build()
            .status(self.status())
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
