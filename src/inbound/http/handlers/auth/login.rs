use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceLoginError, ServiceLoginParams};
use crate::errors::{AppError, internal_error};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn auth_login<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .auth_service()
        .login(ServiceLoginParams {
            session,
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(|e| match e {
            ServiceLoginError::InvalidCredentials => AppError::Unauthorized(Some(e.to_string())),
            ServiceLoginError::CredentialError(e) => internal_error(e),
            ServiceLoginError::SessionError(e) => internal_error(e),
            ServiceLoginError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
