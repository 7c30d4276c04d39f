use crate::domain::rbac::RoleMap;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

/// Identity of the user performing a gated operation, taken from the
/// session. Permission resolution happens against the organization's role
/// table on every call.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: Uuid,
    pub name: String,
    pub role_key: String,
}

#[derive(Debug, Clone)]
pub struct Organization {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub department: String,
    pub roles: RoleMap,
    pub permissions_list: Vec<String>,
    pub users: Vec<OrgMember>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct InviteRecord {
    pub id: Uuid,
    pub org_id: Uuid,
    pub email: String,
    pub invited_by: Uuid,
    pub role_key: String,
    pub created_at: PrimitiveDateTime,
}
