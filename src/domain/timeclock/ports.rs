use crate::domain::org::Caller;
use crate::domain::rbac::RbacError;
use crate::domain::timeclock::{Location, PunchRecord};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TimeclockService: Send + Sync {
    async fn clock_in(
        &self,
        params: ClockInServiceParams,
    ) -> Result<PunchRecord, TimeclockError>;
    async fn clock_out(
        &self,
        params: ClockOutServiceParams,
    ) -> Result<PunchRecord, TimeclockError>;
    async fn status(
        &self,
        params: ClockStatusServiceParams,
    ) -> Result<Option<PunchRecord>, TimeclockError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Outbound port to the external time-tracking REST API. Calls are
/// passthrough; there are no retries and no local persistence.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TimeApiPort: Send + Sync + 'static {
    async fn punch_in(&self, params: PunchInParams) -> Result<PunchRecord, TimeApiError>;
    async fn punch_out(&self, params: PunchOutParams) -> Result<PunchRecord, TimeApiError>;
    async fn punch_status(
        &self,
        params: PunchStatusParams,
    ) -> Result<Option<PunchRecord>, TimeApiError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ClockInServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub location: Location,
}

pub struct ClockOutServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
}

pub struct ClockStatusServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
}

pub struct PunchInParams {
    pub user_id: Uuid,
    pub location: Location,
}

pub struct PunchOutParams {
    pub user_id: Uuid,
}

pub struct PunchStatusParams {
    pub user_id: Uuid,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum TimeApiError {
    #[error("request to time api failed")]
    RequestError,

    #[error("time api returned status {0}")]
    UpstreamStatus(u16),

    #[error("time api response could not be decoded")]
    DecodeError,
}

#[derive(Debug, Error)]
pub enum TimeclockError {
    #[error("caller may not perform this operation")]
    Forbidden,

    #[error(transparent)]
    UnknownRole(#[from] RbacError),

    #[error("organization not found")]
    OrgNotFound,

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),

    #[error(transparent)]
    ApiError(#[from] TimeApiError),
}
