use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceAuthenticatedError, ServiceAuthenticatedParams};
use crate::errors::AppError;
use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;

pub async fn auth<S: ApplicationServices>(
    State(state): State<S>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_service = state.auth_service();
    let (mut parts, body) = req.into_parts();
    let session = Session::from_request_parts(&mut parts, &state)
        .await
        .map_err(|_e| AppError::InternalServerError)?;

    req = Request::from_parts(parts, body);

    let is_authenticated = auth_service
        .authenticated(ServiceAuthenticatedParams { session })
        .await
        .map_err(|e| match e {
            ServiceAuthenticatedError::SessionError(_) => AppError::Unauthorized(None),
        })?;

    if !is_authenticated {
        return Err(AppError::Unauthorized(None));
    }

    Ok(next.run(req).await)
}
