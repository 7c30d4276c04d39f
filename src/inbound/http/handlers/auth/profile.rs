use crate::core::application::ApplicationServices;
use crate::domain::auth::{
    AuthService, ServiceDeleteAccountError, ServiceDeleteAccountParams, ServiceProfileError,
    ServiceProfileParams, ServiceUpdateProfileError, ServiceUpdateProfileParams,
};
use crate::errors::{AppError, internal_error};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use http::StatusCode;
use serde::Deserialize;
use tower_sessions::Session;

pub async fn auth_profile<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .auth_service()
        .profile(ServiceProfileParams { session })
        .await
        .map_err(|e| match e {
            ServiceProfileError::Unauthenticated => AppError::Unauthorized(None),
            ServiceProfileError::SessionError(e) => internal_error(e),
            ServiceProfileError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(profile)
}

#[derive(Deserialize)]
pub struct UpdateProfileBody {
    pub name: Option<String>,
    pub status: Option<String>,
    pub profile_image_url: Option<String>,
}

pub async fn auth_update_profile<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Json(body): Json<UpdateProfileBody>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .auth_service()
        .update_profile(ServiceUpdateProfileParams {
            session,
            name: body.name,
            status: body.status,
            profile_image_url: body.profile_image_url,
        })
        .await
        .map_err(|e| match e {
            ServiceUpdateProfileError::Unauthenticated => AppError::Unauthorized(None),
            ServiceUpdateProfileError::SessionError(e) => internal_error(e),
            ServiceUpdateProfileError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(profile)
}

pub async fn auth_delete_account<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth_service()
        .delete_account(ServiceDeleteAccountParams { session })
        .await
        .map_err(|e| match e {
            ServiceDeleteAccountError::Unauthenticated => AppError::Unauthorized(None),
            ServiceDeleteAccountError::SessionError(e) => internal_error(e),
            ServiceDeleteAccountError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::auth::{
        MockAuthService, ServiceProfileError, ServiceProfileResult, User,
    };
    use crate::domain::session::ActiveSelection;
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use std::future;
    use time::macros::datetime;
    use tower_sessions::MemoryStore;
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::now_v7(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role_key: "user".to_string(),
            role_weight: 10,
            status: "active".to_string(),
            profile_image_url: None,
            password_hash: "$argon2id$test".to_string(),
            created_at: datetime!(2025-01-01 00:00:00),
            updated_at: datetime!(2025-01-01 00:00:00),
        }
    }

    fn server_with(auth_service: MockAuthService) -> TestServer {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            config: None,
            auth_service: Some(auth_service),
            org_service: None,
            team_service: None,
            timeclock_service: None,
        });
        TestServer::new(router(app, MemoryStore::default())).unwrap()
    }

    #[tokio::test]
    async fn test_profile_ok() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(true))));
        auth_service.expect_profile().times(1).returning(|_| {
            Box::pin(future::ready(Ok(ServiceProfileResult {
                user: test_user(),
                selection: ActiveSelection::default(),
            })))
        });

        let server = server_with(auth_service);

        let response = server.get("/backend/auth/profile").await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_profile_unauthenticated() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(true))));
        auth_service
            .expect_profile()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(ServiceProfileError::Unauthenticated))));

        let server = server_with(auth_service);

        let response = server.get("/backend/auth/profile").await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_profile_behind_auth_middleware() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(false))));

        let server = server_with(auth_service);

        let response = server.get("/backend/auth/profile").await;

        response.assert_status_unauthorized();
    }
}
