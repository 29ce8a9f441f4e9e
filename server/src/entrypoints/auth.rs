use std::sync::Arc;

use giveboard_server::auth::{resolve_session, AuthProvider};
use giveboard_server::db::UserStore;
use giveboard_server::error::ApiError;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{serde::json::Json, Request, State};
use shared::UserRecord;

use super::types::{AuthResponse, LoginRequest, PasswordRequest, RegisterRequest, SessionResponse};

/// `Authorization: Bearer <token>` extractor.
pub struct BearerToken(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for BearerToken {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = req
            .headers()
            .get_one("Authorization")
            .and_then(|header| header.strip_prefix("Bearer "));
        match token {
            Some(token) if !token.is_empty() => Outcome::Success(BearerToken(token.to_string())),
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

#[utoipa::path(context_path = "/api/auth", request_body = RegisterRequest, responses(
    (status = 200, description = "Account created together with its user document", body = AuthResponse)
))]
#[post("/register", data = "<request>")]
pub(crate) async fn register(
    request: Json<RegisterRequest>,
    auth: &State<Arc<dyn AuthProvider>>,
    store: &State<Arc<dyn UserStore>>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = auth
        .create_account(&request.email, &request.password)
        .await?;
    let record = UserRecord::register(session.uid.clone(), &request.name, &request.email);
    store.create_user(&record).await?;
    rocket::info!("Registered {}", session.uid);

    Ok(Json(AuthResponse {
        token: session.id_token,
        uid: session.uid,
        email: session.email,
        user: Some(record.into()),
    }))
}

#[utoipa::path(context_path = "/api/auth", request_body = LoginRequest, responses(
    (status = 200, description = "Signed in", body = AuthResponse),
    (status = 401, description = "Invalid credentials"),
))]
#[post("/login", data = "<request>")]
pub(crate) async fn login(
    request: Json<LoginRequest>,
    auth: &State<Arc<dyn AuthProvider>>,
    store: &State<Arc<dyn UserStore>>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = auth.sign_in(&request.email, &request.password).await?;

    // A failed profile read degrades to the bare identity rather than
    // failing the sign-in.
    let user = match store.get_user(&session.uid).await {
        Ok(record) => record.map(Into::into),
        Err(e) => {
            rocket::warn!("Failed to load profile for {}: {e}", session.uid);
            None
        }
    };

    Ok(Json(AuthResponse {
        token: session.id_token,
        uid: session.uid,
        email: session.email,
        user,
    }))
}

#[utoipa::path(context_path = "/api/auth", responses(
    (status = 204, description = "Signed out")
))]
#[post("/logout")]
pub(crate) async fn logout(
    token: BearerToken,
    auth: &State<Arc<dyn AuthProvider>>,
) -> Result<Status, ApiError> {
    auth.sign_out(&token.0).await?;
    Ok(Status::NoContent)
}

#[utoipa::path(context_path = "/api/auth", request_body = PasswordRequest, responses(
    (status = 204, description = "Password changed")
))]
#[post("/password", data = "<request>")]
pub(crate) async fn change_password(
    token: BearerToken,
    request: Json<PasswordRequest>,
    auth: &State<Arc<dyn AuthProvider>>,
) -> Result<Status, ApiError> {
    auth.change_password(&token.0, &request.new_password).await?;
    Ok(Status::NoContent)
}

/// Initial session check. Never fails: a missing token, an unrecognized
/// token, a collaborator error, or a collaborator that stays silent past
/// the timeout all resolve to an unauthenticated response.
#[utoipa::path(context_path = "/api/auth", responses(
    (status = 200, description = "Who the presented token belongs to", body = SessionResponse)
))]
#[get("/session")]
pub(crate) async fn get_session(
    token: Option<BearerToken>,
    auth: &State<Arc<dyn AuthProvider>>,
    store: &State<Arc<dyn UserStore>>,
) -> Json<SessionResponse> {
    let Some(token) = token else {
        return Json(SessionResponse::unauthenticated());
    };
    let Some(identity) = resolve_session(auth.inner().as_ref(), &token.0).await else {
        return Json(SessionResponse::unauthenticated());
    };

    let user = match store.get_user(&identity.uid).await {
        Ok(record) => record.map(Into::into),
        Err(e) => {
            rocket::warn!("Failed to load profile for {}: {e}", identity.uid);
            None
        }
    };

    Json(SessionResponse {
        authenticated: true,
        uid: Some(identity.uid),
        email: Some(identity.email),
        user,
    })
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing auth entrypoints", |rocket| async {
        rocket.mount(
            "/api/auth",
            rocket::routes![register, login, logout, change_password, get_session],
        )
    })
}
