use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceRegisterError, ServiceRegisterParams};
use crate::errors::{AppError, bad_request, internal_error, rejected};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn auth_register<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return Err(bad_request("name, email and password are required"));
    }

    let result = state
        .auth_service()
        .register(ServiceRegisterParams {
            session,
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(|e| match e {
            ServiceRegisterError::EmailTaken => rejected(e),
            ServiceRegisterError::CredentialError(e) => internal_error(e),
            ServiceRegisterError::SessionError(e) => internal_error(e),
            ServiceRegisterError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::auth::{
        MockAuthService, ServiceRegisterError, ServiceRegisterResult, User,
    };
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::json;
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
    async fn test_register_created() {
        let mut auth_service = MockAuthService::new();
        auth_service.expect_register().times(1).returning(|_| {
            Box::pin(future::ready(Ok(ServiceRegisterResult {
                user: test_user(),
            })))
        });

        let server = server_with(auth_service);

        let response = server
            .post("/backend/auth/register")
            .json(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_register_email_taken() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_register()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(ServiceRegisterError::EmailTaken))));

        let server = server_with(auth_service);

        let response = server
            .post("/backend/auth/register")
            .json(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_register_empty_fields() {
        let server = server_with(MockAuthService::new());

        let response = server
            .post("/backend/auth/register")
            .json(&json!({
                "name": "",
                "email": "ada@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status_bad_request();
    }
}
