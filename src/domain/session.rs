use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("error writing session")]
    WriteSessionError,

    #[error("error reading session")]
    ReadSessionError,

    #[error(transparent)]
    TowerSessionsError(#[from] tower_sessions::session::Error),
}

/// Authenticated identity carried by the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role_key: String,
}

/// Active organization/team selection. The original client kept this in
/// browser local storage; the server rendition keeps it beside the user
/// session. It is a UI selection, not a membership claim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveSelection {
    pub org_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

#[async_trait]
#[automock]
pub trait SessionPort: Send + Sync {
    async fn write_user_session(&self, params: UserSession) -> Result<(), SessionError>;
    async fn get_user_session(&self) -> Result<Option<UserSession>, SessionError>;
    async fn write_selection(&self, params: ActiveSelection) -> Result<(), SessionError>;
    async fn get_selection(&self) -> Result<Option<ActiveSelection>, SessionError>;
    async fn flush(&self) -> Result<(), SessionError>;
}
