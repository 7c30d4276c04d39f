use crate::core::application::{Application, ApplicationServices};
use crate::domain::auth::AuthService;
use crate::domain::org::OrgService;
use crate::domain::team::TeamService;
use crate::domain::timeclock::TimeclockService;
use crate::inbound::http::handlers::{
    auth_delete_account, auth_login, auth_logout, auth_profile, auth_register, auth_select,
    auth_update_profile, org_add_member, org_add_permission, org_create, org_delete, org_get,
    org_invite_member, org_list_invites, org_remove_member, org_remove_role, org_update,
    org_upsert_role, server_health, team_add_member, team_add_task, team_assign_task, team_create,
    team_delete, team_get, team_list, team_remove_member, team_remove_task, team_update,
    team_update_member, team_update_task, timeclock_in, timeclock_out, timeclock_status,
};
use crate::inbound::http::middleware::auth;
use axum::Router;
use axum::extract::{MatchedPath, Request};
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum_extra::extract::cookie::SameSite;
use http::header::{ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method, StatusCode};
use time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

pub fn router<
    AUTH: AuthService + Send + Sync + 'static,
    ORG: OrgService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    CLOCK: TimeclockService + Send + Sync + 'static,
    Store: SessionStore + Clone + Send + Sync + 'static,
>(
    application: Application<AUTH, ORG, TEAM, CLOCK>,
    session_store: Store,
) -> Router {
    let config = application.config();
    let same_site = if config.secure_session {
        SameSite::None
    } else {
        SameSite::Lax
    };
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.secure_session)
        .with_expiry(Expiry::OnInactivity(Duration::hours(1)))
        .with_same_site(same_site);

    let hosts: Vec<HeaderValue> = config
        .cors_hosts
        .clone()
        .into_iter()
        .map(|host| host.parse().unwrap())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![
            ORIGIN,
            AUTHORIZATION,
            ACCEPT,
            CONTENT_TYPE,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        ])
        .allow_origin(hosts)
        .allow_credentials(true);

    let auth_routes = auth_routes(application.clone());
    let org_routes = org_routes(application.clone());
    let team_routes = team_routes(application.clone());
    let timeclock_routes = timeclock_routes(application.clone());

    Router::new()
        .route("/healthz", get(server_health))
        .nest("/backend/auth", auth_routes)
        .nest("/backend/orgs", org_routes)
        .nest("/backend/teams", team_routes)
        .nest("/backend/timeclock", timeclock_routes)
        .layer(cors)
        .layer(session_layer)
        .layer((
            SetSensitiveHeadersLayer::new([AUTHORIZATION]),
            CompressionLayer::new(),
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                .on_failure(()),
            TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                std::time::Duration::from_secs(30),
            ),
            CatchPanicLayer::new(),
        ))
        .with_state(application)
}

fn auth_routes<APP>(application: APP) -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/profile", get(auth_profile::<APP>))
        .route("/profile", put(auth_update_profile::<APP>))
        .route("/profile", delete(auth_delete_account::<APP>))
        .route("/select", post(auth_select::<APP>))
        .route_layer(from_fn_with_state(application, auth::<APP>));

    Router::new()
        .route("/register", post(auth_register::<APP>))
        .route("/login", post(auth_login::<APP>))
        .route("/logout", get(auth_logout::<APP>))
        .merge(protected)
}

fn org_routes<APP>(application: APP) -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(org_create::<APP>))
        .route("/{org_id}", get(org_get::<APP>))
        .route("/{org_id}", put(org_update::<APP>))
        .route("/{org_id}", delete(org_delete::<APP>))
        .route("/{org_id}/roles", post(org_upsert_role::<APP>))
        .route("/{org_id}/roles/{role_key}", delete(org_remove_role::<APP>))
        .route("/{org_id}/permissions", post(org_add_permission::<APP>))
        .route("/{org_id}/members", post(org_add_member::<APP>))
        .route(
            "/{org_id}/members/{user_id}",
            delete(org_remove_member::<APP>),
        )
        .route("/{org_id}/invites", post(org_invite_member::<APP>))
        .route("/{org_id}/invites", get(org_list_invites::<APP>))
        .route_layer(from_fn_with_state(application, auth::<APP>))
}

fn team_routes<APP>(application: APP) -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(team_create::<APP>))
        .route("/", get(team_list::<APP>))
        .route("/{team_id}", get(team_get::<APP>))
        .route("/{team_id}", put(team_update::<APP>))
        .route("/{team_id}", delete(team_delete::<APP>))
        .route("/{team_id}/members", post(team_add_member::<APP>))
        .route(
            "/{team_id}/members/{user_id}",
            put(team_update_member::<APP>),
        )
        .route(
            "/{team_id}/members/{user_id}",
            delete(team_remove_member::<APP>),
        )
        .route("/{team_id}/tasks", post(team_add_task::<APP>))
        .route("/{team_id}/tasks/{task_id}", put(team_update_task::<APP>))
        .route(
            "/{team_id}/tasks/{task_id}/assign",
            post(team_assign_task::<APP>),
        )
        .route(
            "/{team_id}/tasks/{task_id}",
            delete(team_remove_task::<APP>),
        )
        .route_layer(from_fn_with_state(application, auth::<APP>))
}

fn timeclock_routes<APP>(application: APP) -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route("/in", post(timeclock_in::<APP>))
        .route("/out", post(timeclock_out::<APP>))
        .route("/status", get(timeclock_status::<APP>))
        .route_layer(from_fn_with_state(application, auth::<APP>))
}
