use crate::core::application::ApplicationServices;
use crate::domain::timeclock::{
    ClockInServiceParams, ClockOutServiceParams, ClockStatusServiceParams, Location,
    TimeclockError, TimeclockService,
};
use crate::errors::{AppError, bad_request, internal_error, not_found};
use crate::inbound::http::handlers::caller_identity;
use crate::inbound::http::responses::timeclock::{PunchResponse, PunchStatusResponse};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;
use tower_sessions::Session;

fn map_timeclock_error(e: TimeclockError) -> AppError {
    match e {
        TimeclockError::Forbidden => AppError::Forbidden,
        TimeclockError::UnknownRole(e) => bad_request(e),
        e @ TimeclockError::OrgNotFound => not_found(e),
        TimeclockError::DatabaseError(e) => internal_error(e),
        TimeclockError::ApiError(e) => internal_error(e),
    }
}

fn no_org_selected() -> AppError {
    bad_request("no organization selected")
}

#[derive(Deserialize)]
pub struct ClockInBody {
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn timeclock_in<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Json(body): Json<ClockInBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, selection) = caller_identity(&state, session).await?;
    let org_id = selection.org_id.ok_or_else(no_org_selected)?;

    let record = state
        .timeclock_service()
        .clock_in(ClockInServiceParams {
            caller,
            org_id,
            location: Location {
                latitude: body.latitude,
                longitude: body.longitude,
            },
        })
        .await
        .map_err(map_timeclock_error)?;

    Ok(PunchResponse::from(record))
}

pub async fn timeclock_out<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let (caller, selection) = caller_identity(&state, session).await?;
    let org_id = selection.org_id.ok_or_else(no_org_selected)?;

    let record = state
        .timeclock_service()
        .clock_out(ClockOutServiceParams { caller, org_id })
        .await
        .map_err(map_timeclock_error)?;

    Ok(PunchResponse::from(record))
}

pub async fn timeclock_status<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let (caller, selection) = caller_identity(&state, session).await?;
    let org_id = selection.org_id.ok_or_else(no_org_selected)?;

    let record = state
        .timeclock_service()
        .status(ClockStatusServiceParams { caller, org_id })
        .await
        .map_err(map_timeclock_error)?;

    Ok(PunchStatusResponse::from(record))
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::auth::{MockAuthService, ServiceIdentityResult};
    use crate::domain::session::{ActiveSelection, UserSession};
    use crate::domain::timeclock::{
        MockTimeclockService, PunchRecord, PunchState, TimeclockError,
    };
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::json;
    use std::future;
    use tower_sessions::MemoryStore;
    use uuid::Uuid;

    fn punch(state: PunchState) -> PunchRecord {
        PunchRecord {
            punch_id: "p-123".to_string(),
            state,
            recorded_at: "2025-01-01T09:00:00Z".to_string(),
        }
    }

    fn authed_service(org_id: Option<Uuid>) -> MockAuthService {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .returning(|_| Box::pin(future::ready(Ok(true))));
        auth_service.expect_identity().returning(move |_| {
            Box::pin(future::ready(Ok(ServiceIdentityResult {
                user_session: UserSession {
                    user_id: Uuid::now_v7(),
                    email: "ada@example.com".to_string(),
                    name: "Ada".to_string(),
                    role_key: "user".to_string(),
                },
                selection: ActiveSelection {
                    org_id,
                    team_id: None,
                },
            })))
        });
        auth_service
    }

    fn server_with(
        timeclock_service: MockTimeclockService,
        org_id: Option<Uuid>,
    ) -> TestServer {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            config: None,
            auth_service: Some(authed_service(org_id)),
            org_service: None,
            team_service: None,
            timeclock_service: Some(timeclock_service),
        });
        TestServer::new(router(app, MemoryStore::default())).unwrap()
    }

    #[tokio::test]
    async fn test_clock_in() {
        let mut timeclock_service = MockTimeclockService::new();
        timeclock_service
            .expect_clock_in()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(punch(PunchState::In)))));

        let server = server_with(timeclock_service, Some(Uuid::now_v7()));

        let response = server
            .post("/backend/timeclock/in")
            .json(&json!({ "latitude": 52.52, "longitude": 13.405 }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_clock_in_without_selection() {
        let server = server_with(MockTimeclockService::new(), None);

        let response = server
            .post("/backend/timeclock/in")
            .json(&json!({ "latitude": 52.52, "longitude": 13.405 }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_clock_in_forbidden() {
        let mut timeclock_service = MockTimeclockService::new();
        timeclock_service
            .expect_clock_in()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(TimeclockError::Forbidden))));

        let server = server_with(timeclock_service, Some(Uuid::now_v7()));

        let response = server
            .post("/backend/timeclock/in")
            .json(&json!({ "latitude": 52.52, "longitude": 13.405 }))
            .await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_status_without_record() {
        let mut timeclock_service = MockTimeclockService::new();
        timeclock_service
            .expect_status()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(None))));

        let server = server_with(timeclock_service, Some(Uuid::now_v7()));

        let response = server.get("/backend/timeclock/status").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "data": null }));
    }
}
