use crate::domain::auth::User;
use crate::domain::org::{InviteRecord, OrgMember, Organization};
use crate::domain::rbac::RoleMap;
use crate::domain::team::{Task, Team, TeamMember};
use crate::outbound::db::error::Error;
use sqlx::FromRow;
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(FromRow, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_key: String,
    pub role_weight: i32,
    pub status: String,
    pub profile_image_url: Option<String>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role_key: value.role_key,
            role_weight: value.role_weight,
            status: value.status,
            profile_image_url: value.profile_image_url,
            password_hash: value.password_hash,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct OrganizationRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub department: String,
    pub roles: serde_json::Value,
    pub permissions_list: serde_json::Value,
    pub users: serde_json::Value,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = Error;

    fn try_from(value: OrganizationRow) -> Result<Self, Self::Error> {
        let roles: RoleMap = serde_json::from_value(value.roles)?;
        let permissions_list: Vec<String> = serde_json::from_value(value.permissions_list)?;
        let users: Vec<OrgMember> = serde_json::from_value(value.users)?;

        Ok(Self {
            id: value.id,
            owner_id: value.owner_id,
            department: value.department,
            roles,
            permissions_list,
            users,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(FromRow, Clone)]
pub struct TeamRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub owner_id: Uuid,
    pub department: String,
    pub members: serde_json::Value,
    pub tasks: serde_json::Value,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl TryFrom<TeamRow> for Team {
    type Error = Error;

    fn try_from(value: TeamRow) -> Result<Self, Self::Error> {
        let members: Vec<TeamMember> = serde_json::from_value(value.members)?;
        let tasks: Vec<Task> = serde_json::from_value(value.tasks)?;

        Ok(Self {
            id: value.id,
            org_id: value.org_id,
            owner_id: value.owner_id,
            department: value.department,
            members,
            tasks,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

pub struct TeamRowList(pub Vec<TeamRow>);

impl TryFrom<TeamRowList> for Vec<Team> {
    type Error = Error;

    fn try_from(value: TeamRowList) -> Result<Self, Self::Error> {
        value.0.into_iter().map(|row| row.try_into()).collect()
    }
}

#[derive(FromRow, Clone)]
pub struct InviteRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub email: String,
    pub invited_by: Uuid,
    pub role_key: String,
    pub created_at: PrimitiveDateTime,
}

impl From<InviteRow> for InviteRecord {
    fn from(value: InviteRow) -> Self {
        Self {
            id: value.id,
            org_id: value.org_id,
            email: value.email,
            invited_by: value.invited_by,
            role_key: value.role_key,
            created_at: value.created_at,
        }
    }
}

pub struct InviteRowList(pub Vec<InviteRow>);

impl From<InviteRowList> for Vec<InviteRecord> {
    fn from(value: InviteRowList) -> Self {
        value.0.into_iter().map(|row| row.into()).collect()
    }
}
