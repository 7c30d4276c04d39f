use crate::domain::org::{Caller, InviteRecord, OrgMember, Organization};
use crate::domain::rbac::{RbacError, Role, RoleMap};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait OrgService: Send + Sync {
    async fn create_org(&self, params: CreateOrgServiceParams) -> Result<Organization, OrgError>;
    async fn get_org(&self, params: GetOrgServiceParams) -> Result<Organization, OrgError>;
    async fn update_org(&self, params: UpdateOrgServiceParams) -> Result<Organization, OrgError>;
    async fn delete_org(&self, params: DeleteOrgServiceParams) -> Result<(), OrgError>;

    async fn upsert_role(&self, params: UpsertRoleServiceParams) -> Result<Organization, OrgError>;
    async fn remove_role(&self, params: RemoveRoleServiceParams) -> Result<Organization, OrgError>;
    async fn add_permission(
        &self,
        params: AddPermissionServiceParams,
    ) -> Result<Organization, OrgError>;

    async fn add_member(&self, params: AddMemberServiceParams) -> Result<Organization, OrgError>;
    async fn remove_member(
        &self,
        params: RemoveMemberServiceParams,
    ) -> Result<Organization, OrgError>;

    async fn invite_member(
        &self,
        params: InviteMemberServiceParams,
    ) -> Result<InviteRecord, OrgError>;
    async fn list_invites(
        &self,
        params: ListInvitesServiceParams,
    ) -> Result<Vec<InviteRecord>, OrgError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait OrgRepository: Send + Sync + 'static {
    async fn create_org(&self, params: CreateOrgDBParams) -> Result<Organization, DatabaseError>;
    async fn find_org_by_id(
        &self,
        params: FindOrgDBParams,
    ) -> Result<Option<Organization>, DatabaseError>;
    async fn update_department(
        &self,
        params: UpdateDepartmentDBParams,
    ) -> Result<Organization, DatabaseError>;
    async fn delete_org(&self, params: DeleteOrgDBParams) -> Result<(), DatabaseError>;

    async fn upsert_role(&self, params: UpsertRoleDBParams) -> Result<Organization, DatabaseError>;
    async fn remove_role(&self, params: RemoveRoleDBParams) -> Result<Organization, DatabaseError>;
    async fn add_permission(
        &self,
        params: AddPermissionDBParams,
    ) -> Result<Organization, DatabaseError>;

    async fn add_member(&self, params: AddMemberDBParams) -> Result<Organization, DatabaseError>;
    async fn remove_member(
        &self,
        params: RemoveMemberDBParams,
    ) -> Result<Organization, DatabaseError>;

    async fn record_invite(
        &self,
        params: RecordInviteDBParams,
    ) -> Result<InviteRecord, DatabaseError>;
    async fn list_invites(
        &self,
        params: ListInvitesDBParams,
    ) -> Result<Vec<InviteRecord>, DatabaseError>;
}

/// Read-only role table lookup. Implemented by the same repository and
/// consumed by services outside this module that gate on org roles.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait RoleMapSource: Send + Sync + 'static {
    async fn role_map(&self, org_id: Uuid) -> Result<Option<RoleMap>, DatabaseError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct CreateOrgServiceParams {
    pub caller: Caller,
    pub department: String,
}

pub struct GetOrgServiceParams {
    pub org_id: Uuid,
}

pub struct UpdateOrgServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub department: String,
}

pub struct DeleteOrgServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
}

pub struct UpsertRoleServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub role: Role,
}

pub struct RemoveRoleServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub role_key: String,
}

pub struct AddPermissionServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub permission: String,
}

pub struct AddMemberServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub member: OrgMember,
}

pub struct RemoveMemberServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub user_id: Uuid,
}

pub struct InviteMemberServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub email: String,
    pub role_key: String,
}

pub struct ListInvitesServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
}

pub struct CreateOrgDBParams {
    pub owner_id: Uuid,
    pub department: String,
    pub roles: RoleMap,
    pub permissions_list: Vec<String>,
    pub users: Vec<OrgMember>,
}

pub struct FindOrgDBParams {
    pub org_id: Uuid,
}

pub struct UpdateDepartmentDBParams {
    pub org_id: Uuid,
    pub department: String,
}

pub struct DeleteOrgDBParams {
    pub org_id: Uuid,
}

pub struct UpsertRoleDBParams {
    pub org_id: Uuid,
    pub role: Role,
}

pub struct RemoveRoleDBParams {
    pub org_id: Uuid,
    pub role_key: String,
}

pub struct AddPermissionDBParams {
    pub org_id: Uuid,
    pub permission: String,
}

pub struct AddMemberDBParams {
    pub org_id: Uuid,
    pub member: OrgMember,
}

pub struct RemoveMemberDBParams {
    pub org_id: Uuid,
    pub user_id: Uuid,
}

pub struct RecordInviteDBParams {
    pub org_id: Uuid,
    pub email: String,
    pub invited_by: Uuid,
    pub role_key: String,
}

pub struct ListInvitesDBParams {
    pub org_id: Uuid,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum OrgError {
    #[error("caller may not perform this operation")]
    Forbidden,

    #[error(transparent)]
    UnknownRole(#[from] RbacError),

    #[error("organization not found")]
    OrgNotFound,

    #[error("role not found")]
    RoleNotFound,

    #[error("member not found")]
    MemberNotFound,

    #[error("the resource already exists")]
    Conflict,

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}
