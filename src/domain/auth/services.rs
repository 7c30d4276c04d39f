use crate::domain::auth::{
    AuthService, CreateUserDBParams, CredentialHasher, DeleteUserDBParams, FindUserByEmailDBParams,
    FindUserDBParams, ServiceAuthenticatedError, ServiceAuthenticatedParams,
    ServiceDeleteAccountError, ServiceDeleteAccountParams, ServiceIdentityError,
    ServiceIdentityParams, ServiceIdentityResult, ServiceLoginError, ServiceLoginParams,
    ServiceLoginResult, ServiceLogoutError, ServiceLogoutParams, ServiceProfileError,
    ServiceProfileParams, ServiceProfileResult, ServiceRegisterError, ServiceRegisterParams,
    ServiceRegisterResult, ServiceSelectError, ServiceSelectParams, ServiceUpdateProfileError,
    ServiceUpdateProfileParams, UpdateUserDBParams, UserRepository,
};
use crate::domain::session::{ActiveSelection, SessionPort, UserSession};
use crate::outbound::db::error::Error as DatabaseError;
use crate::outbound::session::SessionFactory;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;

const SIGNUP_ROLE_KEY: &str = "user";
const SIGNUP_ROLE_WEIGHT: i32 = 10;

#[derive(Debug, Clone)]
pub struct Service<SESSION, DB, HASHER, F>
where
    SESSION: SessionPort + Send + Sync + 'static,
    DB: UserRepository,
    HASHER: CredentialHasher + Send + Sync + 'static,
    F: SessionFactory<SESSION> + Send + Sync + 'static,
{
    db: DB,
    hasher: Arc<HASHER>,
    session_factory: F,
    _session: PhantomData<SESSION>,
}

impl<SESSION, DB, HASHER, F> Service<SESSION, DB, HASHER, F>
where
    SESSION: SessionPort + Send + Sync + 'static,
    DB: UserRepository,
    HASHER: CredentialHasher + Send + Sync + 'static,
    F: SessionFactory<SESSION> + Send + Sync + 'static,
{
    pub fn new(db: DB, hasher: HASHER, session_factory: F) -> Self {
        Self {
            db,
            hasher: Arc::new(hasher),
            session_factory,
            _session: PhantomData,
        }
    }
}

#[async_trait]
impl<SESSION, DB, HASHER, F> AuthService for Service<SESSION, DB, HASHER, F>
where
    SESSION: SessionPort + Send + Sync + 'static,
    DB: UserRepository,
    HASHER: CredentialHasher + Send + Sync + 'static,
    F: SessionFactory<SESSION> + Send + Sync + 'static,
{
    async fn register(
        &self,
        params: ServiceRegisterParams,
    ) -> Result<ServiceRegisterResult, ServiceRegisterError> {
        let session = self.session_factory.build(params.session);

        let existing = self
            .db
            .find_user_by_email(FindUserByEmailDBParams {
                email: params.email.clone(),
            })
            .await?;
        if existing.is_some() {
            return Err(ServiceRegisterError::EmailTaken);
        }

        let password_hash = self.hasher.hash(params.password.as_str())?;

        let user = self
            .db
            .create_user(CreateUserDBParams {
                name: params.name,
                email: params.email,
                password_hash,
                role_key: SIGNUP_ROLE_KEY.to_string(),
                role_weight: SIGNUP_ROLE_WEIGHT,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::OnConflict => ServiceRegisterError::EmailTaken,
                other => ServiceRegisterError::DatabaseError(other),
            })?;

        session
            .write_user_session(UserSession {
                user_id: user.id,
                email: user.email.clone(),
                name: user.name.clone(),
                role_key: user.role_key.clone(),
            })
            .await?;

        Ok(ServiceRegisterResult { user })
    }

    async fn login(
        &self,
        params: ServiceLoginParams,
    ) -> Result<ServiceLoginResult, ServiceLoginError> {
        let session = self.session_factory.build(params.session);

        let user = self
            .db
            .find_user_by_email(FindUserByEmailDBParams {
                email: params.email,
            })
            .await?
            .ok_or(ServiceLoginError::InvalidCredentials)?;

        let verified = self
            .hasher
            .verify(params.password.as_str(), user.password_hash.as_str())?;
        if !verified {
            return Err(ServiceLoginError::InvalidCredentials);
        }

        // drop any prior state before establishing the new session
        session.flush().await?;
        session
            .write_user_session(UserSession {
                user_id: user.id,
                email: user.email.clone(),
                name: user.name.clone(),
                role_key: user.role_key.clone(),
            })
            .await?;

        Ok(ServiceLoginResult { user })
    }

    async fn logout(&self, params: ServiceLogoutParams) -> Result<(), ServiceLogoutError> {
        let session = self.session_factory.build(params.session);
        session.flush().await?;

        Ok(())
    }

    async fn authenticated(
        &self,
        params: ServiceAuthenticatedParams,
    ) -> Result<bool, ServiceAuthenticatedError> {
        let session = self.session_factory.build(params.session);

        Ok(session.get_user_session().await?.is_some())
    }

    async fn identity(
        &self,
        params: ServiceIdentityParams,
    ) -> Result<ServiceIdentityResult, ServiceIdentityError> {
        let session = self.session_factory.build(params.session);

        let user_session = session
            .get_user_session()
            .await?
            .ok_or(ServiceIdentityError::Unauthenticated)?;
        let selection = session.get_selection().await?.unwrap_or_default();

        Ok(ServiceIdentityResult {
            user_session,
            selection,
        })
    }

    async fn profile(
        &self,
        params: ServiceProfileParams,
    ) -> Result<ServiceProfileResult, ServiceProfileError> {
        let session = self.session_factory.build(params.session);

        let user_session = session
            .get_user_session()
            .await?
            .ok_or(ServiceProfileError::Unauthenticated)?;
        let selection = session.get_selection().await?.unwrap_or_default();

        let user = self
            .db
            .find_user_by_id(FindUserDBParams {
                user_id: user_session.user_id,
            })
            .await?
            .ok_or(ServiceProfileError::Unauthenticated)?;

        Ok(ServiceProfileResult { user, selection })
    }

    async fn update_profile(
        &self,
        params: ServiceUpdateProfileParams,
    ) -> Result<ServiceProfileResult, ServiceUpdateProfileError> {
        let session = self.session_factory.build(params.session);

        let user_session = session
            .get_user_session()
            .await?
            .ok_or(ServiceUpdateProfileError::Unauthenticated)?;
        let selection = session.get_selection().await?.unwrap_or_default();

        let user = self
            .db
            .update_user(UpdateUserDBParams {
                user_id: user_session.user_id,
                name: params.name,
                status: params.status,
                profile_image_url: params.profile_image_url,
            })
            .await?;

        // keep the cached display name in step with the row
        session
            .write_user_session(UserSession {
                user_id: user.id,
                email: user.email.clone(),
                name: user.name.clone(),
                role_key: user.role_key.clone(),
            })
            .await?;

        Ok(ServiceProfileResult { user, selection })
    }

    async fn select(&self, params: ServiceSelectParams) -> Result<(), ServiceSelectError> {
        let session = self.session_factory.build(params.session);

        if session.get_user_session().await?.is_none() {
            return Err(ServiceSelectError::Unauthenticated);
        }

        session
            .write_selection(ActiveSelection {
                org_id: params.org_id,
                team_id: params.team_id,
            })
            .await?;

        Ok(())
    }

    async fn delete_account(
        &self,
        params: ServiceDeleteAccountParams,
    ) -> Result<(), ServiceDeleteAccountError> {
        let session = self.session_factory.build(params.session);

        let user_session = session
            .get_user_session()
            .await?
            .ok_or(ServiceDeleteAccountError::Unauthenticated)?;

        self.db
            .delete_user(DeleteUserDBParams {
                user_id: user_session.user_id,
            })
            .await?;
        session.flush().await?;

        Ok(())
    }
}
