use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceLogoutError, ServiceLogoutParams};
use crate::errors::{AppError, internal_error};
use axum::extract::State;
use axum::response::IntoResponse;
use http::StatusCode;
use tower_sessions::Session;

pub async fn auth_logout<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth_service()
        .logout(ServiceLogoutParams { session })
        .await
        .map_err(|e| match e {
            ServiceLogoutError::SessionError(e) => internal_error(e),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::auth::MockAuthService;
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use std::future;
    use tower_sessions::MemoryStore;

    #[tokio::test]
    async fn test_logout() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_logout()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(()))));

        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            config: None,
            auth_service: Some(auth_service),
            org_service: None,
            team_service: None,
            timeclock_service: None,
        });
        let server = TestServer::new(router(app, MemoryStore::default())).unwrap();

        let response = server.get("/backend/auth/logout").await;

        response.assert_status(http::StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_logout_rejects_post() {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            config: None,
            auth_service: Some(MockAuthService::new()),
            org_service: None,
            team_service: None,
            timeclock_service: None,
        });
        let server = TestServer::new(router(app, MemoryStore::default())).unwrap();

        let response = server.post("/backend/auth/logout").await;

        response.assert_status(http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
