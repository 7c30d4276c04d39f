use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceSelectError, ServiceSelectParams};
use crate::errors::{AppError, internal_error};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use http::StatusCode;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SelectBody {
    pub org_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

/// Stores the caller's active organization/team selection in the session.
/// The selection is a UI convenience and is not validated against
/// membership here; gated operations re-check permissions on every call.
pub async fn auth_select<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Json(body): Json<SelectBody>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth_service()
        .select(ServiceSelectParams {
            session,
            org_id: body.org_id,
            team_id: body.team_id,
        })
        .await
        .map_err(|e| match e {
            ServiceSelectError::Unauthenticated => AppError::Unauthorized(None),
            ServiceSelectError::SessionError(e) => internal_error(e),
        })?;

    Ok(StatusCode::NO_CONTENT)
}
