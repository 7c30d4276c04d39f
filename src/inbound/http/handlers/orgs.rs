use crate::core::application::ApplicationServices;
use crate::domain::org::{
    AddMemberServiceParams, AddPermissionServiceParams, CreateOrgServiceParams,
    DeleteOrgServiceParams, GetOrgServiceParams, InviteMemberServiceParams,
    ListInvitesServiceParams, OrgError, OrgMember, OrgService, RemoveMemberServiceParams,
    RemoveRoleServiceParams, UpdateOrgServiceParams, UpsertRoleServiceParams,
};
use crate::domain::rbac::Role;
use crate::errors::{AppError, bad_request, internal_error, not_found, rejected};
use crate::inbound::http::handlers::caller_identity;
use crate::inbound::http::responses::org::{InviteListResponse, InviteResponse, OrgResponse};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use http::StatusCode;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

fn map_org_error(e: OrgError) -> AppError {
    match e {
        OrgError::Forbidden => AppError::Forbidden,
        OrgError::UnknownRole(e) => bad_request(e),
        e @ (OrgError::OrgNotFound | OrgError::RoleNotFound | OrgError::MemberNotFound) => {
            not_found(e)
        }
        e @ OrgError::Conflict => rejected(e),
        OrgError::DatabaseError(e) => internal_error(e),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Organizations
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct CreateOrgBody {
    pub department: String,
}

pub async fn org_create<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Json(body): Json<CreateOrgBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let org = state
        .org_service()
        .create_org(CreateOrgServiceParams {
            caller,
            department: body.department,
        })
        .await
        .map_err(map_org_error)?;

    Ok((StatusCode::CREATED, Json(OrgResponse::from(org))))
}

pub async fn org_get<S: ApplicationServices>(
    State(state): State<S>,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let org = state
        .org_service()
        .get_org(GetOrgServiceParams { org_id })
        .await
        .map_err(map_org_error)?;

    Ok(OrgResponse::from(org))
}

#[derive(Deserialize)]
pub struct UpdateOrgBody {
    pub department: String,
}

pub async fn org_update<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(org_id): Path<Uuid>,
    Json(body): Json<UpdateOrgBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let org = state
        .org_service()
        .update_org(UpdateOrgServiceParams {
            caller,
            org_id,
            department: body.department,
        })
        .await
        .map_err(map_org_error)?;

    Ok(OrgResponse::from(org))
}

pub async fn org_delete<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    state
        .org_service()
        .delete_org(DeleteOrgServiceParams { caller, org_id })
        .await
        .map_err(map_org_error)?;

    Ok(StatusCode::NO_CONTENT)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Roles and permissions
////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn org_upsert_role<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(org_id): Path<Uuid>,
    Json(role): Json<Role>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let org = state
        .org_service()
        .upsert_role(UpsertRoleServiceParams {
            caller,
            org_id,
            role,
        })
        .await
        .map_err(map_org_error)?;

    Ok(OrgResponse::from(org))
}

pub async fn org_remove_role<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path((org_id, role_key)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let org = state
        .org_service()
        .remove_role(RemoveRoleServiceParams {
            caller,
            org_id,
            role_key,
        })
        .await
        .map_err(map_org_error)?;

    Ok(OrgResponse::from(org))
}

#[derive(Deserialize)]
pub struct AddPermissionBody {
    pub permission: String,
}

pub async fn org_add_permission<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(org_id): Path<Uuid>,
    Json(body): Json<AddPermissionBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let org = state
        .org_service()
        .add_permission(AddPermissionServiceParams {
            caller,
            org_id,
            permission: body.permission,
        })
        .await
        .map_err(map_org_error)?;

    Ok(OrgResponse::from(org))
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Members and invites
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct AddOrgMemberBody {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
}

pub async fn org_add_member<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(org_id): Path<Uuid>,
    Json(body): Json<AddOrgMemberBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let org = state
        .org_service()
        .add_member(AddMemberServiceParams {
            caller,
            org_id,
            member: OrgMember {
                id: body.user_id,
                name: body.name,
                role: body.role,
            },
        })
        .await
        .map_err(map_org_error)?;

    Ok(OrgResponse::from(org))
}

pub async fn org_remove_member<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path((org_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let org = state
        .org_service()
        .remove_member(RemoveMemberServiceParams {
            caller,
            org_id,
            user_id,
        })
        .await
        .map_err(map_org_error)?;

    Ok(OrgResponse::from(org))
}

#[derive(Deserialize)]
pub struct InviteMemberBody {
    pub email: String,
    pub role: String,
}

pub async fn org_invite_member<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(org_id): Path<Uuid>,
    Json(body): Json<InviteMemberBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let invite = state
        .org_service()
        .invite_member(InviteMemberServiceParams {
            caller,
            org_id,
            email: body.email,
            role_key: body.role,
        })
        .await
        .map_err(map_org_error)?;

    Ok(InviteResponse::from(invite))
}

pub async fn org_list_invites<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let invites = state
        .org_service()
        .list_invites(ListInvitesServiceParams { caller, org_id })
        .await
        .map_err(map_org_error)?;

    Ok(InviteListResponse::from(invites))
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::auth::MockAuthService;
    use crate::domain::org::{MockOrgService, OrgError, Organization};
    use crate::domain::rbac::default_role_map;
    use crate::domain::session::{ActiveSelection, UserSession};
    use crate::domain::auth::ServiceIdentityResult;
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::json;
    use std::future;
    use time::macros::datetime;
    use tower_sessions::MemoryStore;
    use uuid::Uuid;

    fn test_org(owner_id: Uuid) -> Organization {
        Organization {
            id: Uuid::now_v7(),
            owner_id,
            department: "Engineering".to_string(),
            roles: default_role_map(),
            permissions_list: vec![],
            users: vec![],
            created_at: datetime!(2025-01-01 00:00:00),
            updated_at: datetime!(2025-01-01 00:00:00),
        }
    }

    fn authed_service() -> MockAuthService {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .returning(|_| Box::pin(future::ready(Ok(true))));
        auth_service.expect_identity().returning(|_| {
            Box::pin(future::ready(Ok(ServiceIdentityResult {
                user_session: UserSession {
                    user_id: Uuid::now_v7(),
                    email: "ada@example.com".to_string(),
                    name: "Ada".to_string(),
                    role_key: "owner".to_string(),
                },
                selection: ActiveSelection::default(),
            })))
        });
        auth_service
    }

    fn server_with(org_service: MockOrgService) -> TestServer {
        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            config: None,
            auth_service: Some(authed_service()),
            org_service: Some(org_service),
            team_service: None,
            timeclock_service: None,
        });
        TestServer::new(router(app, MemoryStore::default())).unwrap()
    }

    #[tokio::test]
    async fn test_org_create() {
        let mut org_service = MockOrgService::new();
        org_service.expect_create_org().times(1).returning(|params| {
            Box::pin(future::ready(Ok(test_org(params.caller.user_id))))
        });

        let server = server_with(org_service);

        let response = server
            .post("/backend/orgs")
            .json(&json!({ "department": "Engineering" }))
            .await;

        response.assert_status(http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_org_get_not_found() {
        let mut org_service = MockOrgService::new();
        org_service
            .expect_get_org()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(OrgError::OrgNotFound))));

        let server = server_with(org_service);

        let response = server
            .get(format!("/backend/orgs/{}", Uuid::now_v7()).as_str())
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_org_delete_forbidden() {
        let mut org_service = MockOrgService::new();
        org_service
            .expect_delete_org()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(OrgError::Forbidden))));

        let server = server_with(org_service);

        let response = server
            .delete(format!("/backend/orgs/{}", Uuid::now_v7()).as_str())
            .await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_org_add_member_conflict() {
        let mut org_service = MockOrgService::new();
        org_service
            .expect_add_member()
            .times(1)
            .returning(|_| Box::pin(future::ready(Err(OrgError::Conflict))));

        let server = server_with(org_service);

        let response = server
            .post(format!("/backend/orgs/{}/members", Uuid::now_v7()).as_str())
            .json(&json!({
                "user_id": Uuid::now_v7(),
                "name": "Grace",
                "role": "user",
            }))
            .await;

        response.assert_status(http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_org_upsert_role_unknown_inherited_key() {
        let mut org_service = MockOrgService::new();
        org_service.expect_upsert_role().times(1).returning(|params| {
            Box::pin(future::ready(Ok(test_org(params.caller.user_id))))
        });

        let server = server_with(org_service);

        let response = server
            .post(format!("/backend/orgs/{}/roles", Uuid::now_v7()).as_str())
            .json(&json!({
                "label": "Superuser",
                "key": "superuser",
                "weight": 60,
                "permissions": ["report:view"],
                "inherits": "admin",
            }))
            .await;

        response.assert_status_ok();
    }
}
