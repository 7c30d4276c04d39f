mod auth;
mod orgs;
mod server;
mod teams;
mod timeclock;

pub use auth::*;
pub use orgs::*;
pub use server::*;
pub use teams::*;
pub use timeclock::*;

use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceIdentityError, ServiceIdentityParams};
use crate::domain::org::Caller;
use crate::domain::session::ActiveSelection;
use crate::errors::{AppError, internal_error};
use tower_sessions::Session;

/// Resolves the caller identity and active selection from the session.
/// Handlers behind the auth middleware still get `Unauthorized` here if
/// the session vanished between the middleware and the handler.
pub(crate) async fn caller_identity<S: ApplicationServices>(
    state: &S,
    session: Session,
) -> Result<(Caller, ActiveSelection), AppError> {
    let identity = state
        .auth_service()
        .identity(ServiceIdentityParams { session })
        .await
        .map_err(|e| match e {
            ServiceIdentityError::Unauthenticated => AppError::Unauthorized(None),
            ServiceIdentityError::SessionError(e) => internal_error(e),
        })?;

    let caller = Caller {
        user_id: identity.user_session.user_id,
        name: identity.user_session.name,
        role_key: identity.user_session.role_key,
    };

    Ok((caller, identity.selection))
}
