use crate::domain::org::{Caller, RoleMapSource};
use crate::domain::rbac::resolve_role;
use crate::domain::timeclock::{
    ClockInServiceParams, ClockOutServiceParams, ClockStatusServiceParams, PunchInParams,
    PunchOutParams, PunchRecord, PunchStatusParams, TimeApiPort, TimeclockError, TimeclockService,
};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Service<API, ROLES>
where
    API: TimeApiPort,
    ROLES: RoleMapSource,
{
    api: API,
    roles: ROLES,
}

impl<API, ROLES> Service<API, ROLES>
where
    API: TimeApiPort,
    ROLES: RoleMapSource,
{
    pub fn new(api: API, roles: ROLES) -> Self {
        Self { api, roles }
    }

    async fn check_permission(&self, caller: &Caller, org_id: Uuid) -> Result<(), TimeclockError> {
        let roles = self
            .roles
            .role_map(org_id)
            .await?
            .ok_or(TimeclockError::OrgNotFound)?;

        let resolved = resolve_role(&roles, caller.role_key.as_str())?;
        if !resolved.check_permissions(&["timeclock:use"]) {
            return Err(TimeclockError::Forbidden);
        }

        Ok(())
    }
}

#[async_trait]
impl<API, ROLES> TimeclockService for Service<API, ROLES>
where
    API: TimeApiPort,
    ROLES: RoleMapSource,
{
    async fn clock_in(&self, params: ClockInServiceParams) -> Result<PunchRecord, TimeclockError> {
        self.check_permission(&params.caller, params.org_id).await?;

        let record = self
            .api
            .punch_in(PunchInParams {
                user_id: params.caller.user_id,
                location: params.location,
            })
            .await?;

        Ok(record)
    }

    async fn clock_out(
        &self,
        params: ClockOutServiceParams,
    ) -> Result<PunchRecord, TimeclockError> {
        self.check_permission(&params.caller, params.org_id).await?;

        let record = self
            .api
            .punch_out(PunchOutParams {
                user_id: params.caller.user_id,
            })
            .await?;

        Ok(record)
    }

    async fn status(
        &self,
        params: ClockStatusServiceParams,
    ) -> Result<Option<PunchRecord>, TimeclockError> {
        self.check_permission(&params.caller, params.org_id).await?;

        let record = self
            .api
            .punch_status(PunchStatusParams {
                user_id: params.caller.user_id,
            })
            .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::org::MockRoleMapSource;
    use crate::domain::rbac::{Role, RoleMap, default_role_map};
    use crate::domain::timeclock::{Location, MockTimeApiPort, PunchState, TimeApiError};
    use std::future;

    fn caller(role_key: &str) -> Caller {
        Caller {
            user_id: Uuid::now_v7(),
            name: "Ada".to_string(),
            role_key: role_key.to_string(),
        }
    }

    fn record() -> PunchRecord {
        PunchRecord {
            punch_id: "p-1".to_string(),
            state: PunchState::In,
            recorded_at: "2025-01-01T09:00:00Z".to_string(),
        }
    }

    fn role_source_with(roles: RoleMap) -> MockRoleMapSource {
        let mut source = MockRoleMapSource::new();
        source
            .expect_role_map()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(roles)))));

        source
    }

    #[tokio::test]
    async fn test_clock_in() {
        let mut api = MockTimeApiPort::new();
        api.expect_punch_in()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(record()))));

        let service = Service::new(api, role_source_with(default_role_map()));
        let result = service
            .clock_in(ClockInServiceParams {
                caller: caller("user"),
                org_id: Uuid::now_v7(),
                location: Location {
                    latitude: 52.52,
                    longitude: 13.405,
                },
            })
            .await
            .unwrap();

        assert_eq!(PunchState::In, result.state);
    }

    #[tokio::test]
    async fn test_clock_in_forbidden_without_permission() {
        let api = MockTimeApiPort::new();
        let mut roles = RoleMap::new();
        roles.insert(
            "guest".to_string(),
            Role {
                label: "Guest".to_string(),
                key: "guest".to_string(),
                weight: 0,
                permissions: vec![],
                inherits: None,
            },
        );

        let service = Service::new(api, role_source_with(roles));
        let result = service
            .clock_in(ClockInServiceParams {
                caller: caller("guest"),
                org_id: Uuid::now_v7(),
                location: Location {
                    latitude: 0.0,
                    longitude: 0.0,
                },
            })
            .await;

        assert!(matches!(result, Err(TimeclockError::Forbidden)));
    }

    #[tokio::test]
    async fn test_clock_out_upstream_error_surfaces() {
        let mut api = MockTimeApiPort::new();
        api.expect_punch_out()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Err(TimeApiError::UpstreamStatus(502)))));

        let service = Service::new(api, role_source_with(default_role_map()));
        let result = service
            .clock_out(ClockOutServiceParams {
                caller: caller("user"),
                org_id: Uuid::now_v7(),
            })
            .await;

        assert!(matches!(
            result,
            Err(TimeclockError::ApiError(TimeApiError::UpstreamStatus(502)))
        ));
    }

    #[tokio::test]
    async fn test_status_none_when_never_punched() {
        let mut api = MockTimeApiPort::new();
        api.expect_punch_status()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(None))));

        let service = Service::new(api, role_source_with(default_role_map()));
        let result = service
            .status(ClockStatusServiceParams {
                caller: caller("user"),
                org_id: Uuid::now_v7(),
            })
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_status_org_missing() {
        let api = MockTimeApiPort::new();
        let mut roles = MockRoleMapSource::new();
        roles
            .expect_role_map()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(None))));

        let service = Service::new(api, roles);
        let result = service
            .status(ClockStatusServiceParams {
                caller: caller("user"),
                org_id: Uuid::now_v7(),
            })
            .await;

        assert!(matches!(result, Err(TimeclockError::OrgNotFound)));
    }
}
