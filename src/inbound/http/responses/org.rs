use crate::domain::org::{InviteRecord, OrgMember, Organization};
use crate::domain::rbac::RoleMap;
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Organization
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct OrgResponse {
    data: OrgData,
}

#[derive(Serialize)]
pub struct OrgData {
    id: Uuid,
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: OrgAttributes,
}

#[derive(Serialize)]
pub struct OrgAttributes {
    owner_id: Uuid,
    department: String,
    roles: RoleMap,
    permissions_list: Vec<String>,
    users: Vec<OrgMember>,
    created_at: String,
    updated_at: String,
}

impl From<Organization> for OrgResponse {
    fn from(org: Organization) -> Self {
        Self {
            data: OrgData {
                id: org.id,
                object_type: ResponseType::Organization,
                attributes: OrgAttributes {
                    owner_id: org.owner_id,
                    department: org.department,
                    roles: org.roles,
                    permissions_list: org.permissions_list,
                    users: org.users,
                    created_at: org.created_at.to_string(),
                    updated_at: org.updated_at.to_string(),
                },
            },
        }
    }
}

impl IntoResponse for OrgResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Invites
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct InviteResponse {
    data: InviteData,
}

#[derive(Serialize)]
pub struct InviteListResponse {
    data: Vec<InviteData>,
}

#[derive(Serialize)]
pub struct InviteData {
    id: Uuid,
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: InviteAttributes,
}

#[derive(Serialize)]
pub struct InviteAttributes {
    org_id: Uuid,
    email: String,
    invited_by: Uuid,
    role: String,
    created_at: String,
}

impl From<InviteRecord> for InviteData {
    fn from(invite: InviteRecord) -> Self {
        Self {
            id: invite.id,
            object_type: ResponseType::Invite,
            attributes: InviteAttributes {
                org_id: invite.org_id,
                email: invite.email,
                invited_by: invite.invited_by,
                role: invite.role_key,
                created_at: invite.created_at.to_string(),
            },
        }
    }
}

impl IntoResponse for InviteResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

impl From<InviteRecord> for InviteResponse {
    fn from(invite: InviteRecord) -> Self {
        Self {
            data: invite.into(),
        }
    }
}

impl From<Vec<InviteRecord>> for InviteListResponse {
    fn from(invites: Vec<InviteRecord>) -> Self {
        Self {
            data: invites.into_iter().map(InviteData::from).collect(),
        }
    }
}

impl IntoResponse for InviteListResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
