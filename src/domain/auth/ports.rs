use crate::domain::auth::User;
use crate::domain::session::{ActiveSelection, SessionError, UserSession};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use tower_sessions::Session;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    async fn register(
        &self,
        params: ServiceRegisterParams,
    ) -> Result<ServiceRegisterResult, ServiceRegisterError>;
    async fn login(
        &self,
        params: ServiceLoginParams,
    ) -> Result<ServiceLoginResult, ServiceLoginError>;
    async fn logout(&self, params: ServiceLogoutParams) -> Result<(), ServiceLogoutError>;
    async fn authenticated(
        &self,
        params: ServiceAuthenticatedParams,
    ) -> Result<bool, ServiceAuthenticatedError>;

    /// Session-only identity read, no database round trip. Handlers use
    /// this to build the caller identity for gated operations.
    async fn identity(
        &self,
        params: ServiceIdentityParams,
    ) -> Result<ServiceIdentityResult, ServiceIdentityError>;

    async fn profile(
        &self,
        params: ServiceProfileParams,
    ) -> Result<ServiceProfileResult, ServiceProfileError>;
    async fn update_profile(
        &self,
        params: ServiceUpdateProfileParams,
    ) -> Result<ServiceProfileResult, ServiceUpdateProfileError>;
    async fn select(&self, params: ServiceSelectParams) -> Result<(), ServiceSelectError>;
    async fn delete_account(
        &self,
        params: ServiceDeleteAccountParams,
    ) -> Result<(), ServiceDeleteAccountError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, CredentialError>;
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, CredentialError>;
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync + 'static {
    async fn create_user(&self, params: CreateUserDBParams) -> Result<User, DatabaseError>;
    async fn find_user_by_email(
        &self,
        params: FindUserByEmailDBParams,
    ) -> Result<Option<User>, DatabaseError>;
    async fn find_user_by_id(&self, params: FindUserDBParams)
    -> Result<Option<User>, DatabaseError>;
    async fn update_user(&self, params: UpdateUserDBParams) -> Result<User, DatabaseError>;
    async fn delete_user(&self, params: DeleteUserDBParams) -> Result<(), DatabaseError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Results
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ServiceRegisterResult {
    pub user: User,
}

pub struct ServiceLoginResult {
    pub user: User,
}

pub struct ServiceIdentityResult {
    pub user_session: UserSession,
    pub selection: ActiveSelection,
}

pub struct ServiceProfileResult {
    pub user: User,
    pub selection: ActiveSelection,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ServiceRegisterParams {
    pub session: Session,
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct ServiceLoginParams {
    pub session: Session,
    pub email: String,
    pub password: String,
}

pub struct ServiceLogoutParams {
    pub session: Session,
}

pub struct ServiceAuthenticatedParams {
    pub session: Session,
}

pub struct ServiceIdentityParams {
    pub session: Session,
}

pub struct ServiceProfileParams {
    pub session: Session,
}

pub struct ServiceUpdateProfileParams {
    pub session: Session,
    pub name: Option<String>,
    pub status: Option<String>,
    pub profile_image_url: Option<String>,
}

pub struct ServiceSelectParams {
    pub session: Session,
    pub org_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

pub struct ServiceDeleteAccountParams {
    pub session: Session,
}

pub struct CreateUserDBParams {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_key: String,
    pub role_weight: i32,
}

pub struct FindUserByEmailDBParams {
    pub email: String,
}

pub struct FindUserDBParams {
    pub user_id: Uuid,
}

pub struct UpdateUserDBParams {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub status: Option<String>,
    pub profile_image_url: Option<String>,
}

pub struct DeleteUserDBParams {
    pub user_id: Uuid,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to hash password")]
    HashError,
}

#[derive(Debug, Error)]
pub enum ServiceRegisterError {
    #[error("an account with that email already exists")]
    EmailTaken,

    #[error(transparent)]
    CredentialError(#[from] CredentialError),

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

#[derive(Debug, Error)]
pub enum ServiceLoginError {
    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error(transparent)]
    CredentialError(#[from] CredentialError),

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

#[derive(Debug, Error)]
pub enum ServiceLogoutError {
    #[error(transparent)]
    SessionError(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum ServiceAuthenticatedError {
    #[error(transparent)]
    SessionError(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum ServiceIdentityError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    SessionError(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum ServiceProfileError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

#[derive(Debug, Error)]
pub enum ServiceUpdateProfileError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

#[derive(Debug, Error)]
pub enum ServiceSelectError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    SessionError(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum ServiceDeleteAccountError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}
