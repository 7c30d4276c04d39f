use crate::domain::org::{
    AddMemberDBParams, AddMemberServiceParams, AddPermissionDBParams, AddPermissionServiceParams,
    Caller, CreateOrgDBParams, CreateOrgServiceParams, DeleteOrgDBParams, DeleteOrgServiceParams,
    FindOrgDBParams, GetOrgServiceParams, InviteMemberServiceParams, InviteRecord,
    ListInvitesDBParams, ListInvitesServiceParams, OrgError, OrgMember, OrgRepository, OrgService,
    Organization, RecordInviteDBParams, RemoveMemberDBParams, RemoveMemberServiceParams,
    RemoveRoleDBParams, RemoveRoleServiceParams, UpdateDepartmentDBParams, UpdateOrgServiceParams,
    UpsertRoleDBParams, UpsertRoleServiceParams,
};
use crate::domain::rbac::{default_role_map, resolve_role};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;

const OWNER_ROLE_KEY: &str = "owner";

#[derive(Debug, Clone)]
pub struct Service<DB>
where
    DB: OrgRepository,
{
    db: DB,
}

impl<DB> Service<DB>
where
    DB: OrgRepository,
{
    pub fn new(db: DB) -> Self {
        Self { db }
    }

    /// permission check -> existence check, shared by every gated op.
    async fn authorize(
        &self,
        caller: &Caller,
        org_id: uuid::Uuid,
        required: &[&str],
    ) -> Result<Organization, OrgError> {
        let org = self
            .db
            .find_org_by_id(FindOrgDBParams { org_id })
            .await?
            .ok_or(OrgError::OrgNotFound)?;

        let resolved = resolve_role(&org.roles, caller.role_key.as_str())?;
        if !resolved.check_permissions(required) {
            return Err(OrgError::Forbidden);
        }

        Ok(org)
    }
}

#[async_trait]
impl<DB> OrgService for Service<DB>
where
    DB: OrgRepository,
{
    async fn create_org(&self, params: CreateOrgServiceParams) -> Result<Organization, OrgError> {
        let owner = OrgMember {
            id: params.caller.user_id,
            name: params.caller.name.clone(),
            role: OWNER_ROLE_KEY.to_string(),
        };

        let org = self
            .db
            .create_org(CreateOrgDBParams {
                owner_id: params.caller.user_id,
                department: params.department,
                roles: default_role_map(),
                permissions_list: Vec::new(),
                users: vec![owner],
            })
            .await?;

        Ok(org)
    }

    async fn get_org(&self, params: GetOrgServiceParams) -> Result<Organization, OrgError> {
        let org = self
            .db
            .find_org_by_id(FindOrgDBParams {
                org_id: params.org_id,
            })
            .await?
            .ok_or(OrgError::OrgNotFound)?;

        Ok(org)
    }

    async fn update_org(&self, params: UpdateOrgServiceParams) -> Result<Organization, OrgError> {
        self.authorize(&params.caller, params.org_id, &["org:update"])
            .await?;

        let org = self
            .db
            .update_department(UpdateDepartmentDBParams {
                org_id: params.org_id,
                department: params.department,
            })
            .await?;

        Ok(org)
    }

    async fn delete_org(&self, params: DeleteOrgServiceParams) -> Result<(), OrgError> {
        let org = self
            .authorize(&params.caller, params.org_id, &["org:delete"])
            .await?;

        // deletion is reserved for the owning user even when the role
        // table grants the permission more widely
        if org.owner_id != params.caller.user_id {
            return Err(OrgError::Forbidden);
        }

        self.db
            .delete_org(DeleteOrgDBParams {
                org_id: params.org_id,
            })
            .await?;

        Ok(())
    }

    async fn upsert_role(&self, params: UpsertRoleServiceParams) -> Result<Organization, OrgError> {
        self.authorize(&params.caller, params.org_id, &["role:manage"])
            .await?;

        let org = self
            .db
            .upsert_role(UpsertRoleDBParams {
                org_id: params.org_id,
                role: params.role,
            })
            .await?;

        Ok(org)
    }

    async fn remove_role(&self, params: RemoveRoleServiceParams) -> Result<Organization, OrgError> {
        let org = self
            .authorize(&params.caller, params.org_id, &["role:manage"])
            .await?;

        if params.role_key == OWNER_ROLE_KEY {
            return Err(OrgError::Forbidden);
        }
        if !org.roles.contains_key(params.role_key.as_str()) {
            return Err(OrgError::RoleNotFound);
        }

        let org = self
            .db
            .remove_role(RemoveRoleDBParams {
                org_id: params.org_id,
                role_key: params.role_key,
            })
            .await?;

        Ok(org)
    }

    async fn add_permission(
        &self,
        params: AddPermissionServiceParams,
    ) -> Result<Organization, OrgError> {
        let org = self
            .authorize(&params.caller, params.org_id, &["role:manage"])
            .await?;

        if org.permissions_list.contains(&params.permission) {
            return Err(OrgError::Conflict);
        }

        let org = self
            .db
            .add_permission(AddPermissionDBParams {
                org_id: params.org_id,
                permission: params.permission,
            })
            .await?;

        Ok(org)
    }

    async fn add_member(&self, params: AddMemberServiceParams) -> Result<Organization, OrgError> {
        let org = self
            .authorize(&params.caller, params.org_id, &["member:manage"])
            .await?;

        if org.users.iter().any(|m| m.id == params.member.id) {
            return Err(OrgError::Conflict);
        }
        if !org.roles.contains_key(params.member.role.as_str()) {
            return Err(OrgError::RoleNotFound);
        }

        let org = self
            .db
            .add_member(AddMemberDBParams {
                org_id: params.org_id,
                member: params.member,
            })
            .await?;

        Ok(org)
    }

    async fn remove_member(
        &self,
        params: RemoveMemberServiceParams,
    ) -> Result<Organization, OrgError> {
        let org = self
            .authorize(&params.caller, params.org_id, &["member:manage"])
            .await?;

        if org.owner_id == params.user_id {
            return Err(OrgError::Forbidden);
        }
        if !org.users.iter().any(|m| m.id == params.user_id) {
            return Err(OrgError::MemberNotFound);
        }

        let org = self
            .db
            .remove_member(RemoveMemberDBParams {
                org_id: params.org_id,
                user_id: params.user_id,
            })
            .await?;

        Ok(org)
    }

    async fn invite_member(
        &self,
        params: InviteMemberServiceParams,
    ) -> Result<InviteRecord, OrgError> {
        let org = self
            .authorize(&params.caller, params.org_id, &["member:invite"])
            .await?;

        if !org.roles.contains_key(params.role_key.as_str()) {
            return Err(OrgError::RoleNotFound);
        }

        let invite = self
            .db
            .record_invite(RecordInviteDBParams {
                org_id: params.org_id,
                email: params.email,
                invited_by: params.caller.user_id,
                role_key: params.role_key,
            })
            .await?;

        Ok(invite)
    }

    async fn list_invites(
        &self,
        params: ListInvitesServiceParams,
    ) -> Result<Vec<InviteRecord>, OrgError> {
        self.authorize(&params.caller, params.org_id, &["member:invite"])
            .await?;

        let invites = self
            .db
            .list_invites(ListInvitesDBParams {
                org_id: params.org_id,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound => OrgError::OrgNotFound,
                other => OrgError::DatabaseError(other),
            })?;

        Ok(invites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::org::MockOrgRepository;
    use std::future;
    use time::macros::datetime;
    use uuid::Uuid;

    fn caller(role_key: &str) -> Caller {
        Caller {
            user_id: Uuid::now_v7(),
            name: "Ada".to_string(),
            role_key: role_key.to_string(),
        }
    }

    fn org(owner_id: Uuid) -> Organization {
        Organization {
            id: Uuid::now_v7(),
            owner_id,
            department: "Engineering".to_string(),
            roles: default_role_map(),
            permissions_list: vec![],
            users: vec![OrgMember {
                id: owner_id,
                name: "Owner".to_string(),
                role: "owner".to_string(),
            }],
            created_at: datetime!(2025-01-01 00:00:00),
            updated_at: datetime!(2025-01-01 00:00:00),
        }
    }

    #[tokio::test]
    async fn test_create_org_seeds_owner_membership() {
        let mut db = MockOrgRepository::new();
        db.expect_create_org().times(1).return_once(|params| {
            assert_eq!(1, params.users.len());
            assert_eq!("owner", params.users[0].role);
            assert!(params.roles.contains_key("owner"));
            let org = Organization {
                id: Uuid::now_v7(),
                owner_id: params.owner_id,
                department: params.department,
                roles: params.roles,
                permissions_list: params.permissions_list,
                users: params.users,
                created_at: datetime!(2025-01-01 00:00:00),
                updated_at: datetime!(2025-01-01 00:00:00),
            };
            Box::pin(future::ready(Ok(org)))
        });

        let service = Service::new(db);
        let result = service
            .create_org(CreateOrgServiceParams {
                caller: caller("user"),
                department: "Engineering".to_string(),
            })
            .await
            .unwrap();

        assert_eq!("Engineering", result.department);
    }

    #[tokio::test]
    async fn test_update_org_requires_permission() {
        let org = org(Uuid::now_v7());
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));

        let service = Service::new(db);
        let result = service
            .update_org(UpdateOrgServiceParams {
                caller: caller("user"),
                org_id: Uuid::now_v7(),
                department: "Sales".to_string(),
            })
            .await;

        assert!(matches!(result, Err(OrgError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_org_admin_allowed() {
        let org_id = Uuid::now_v7();
        let existing = org(Uuid::now_v7());
        let updated = Organization {
            department: "Sales".to_string(),
            ..existing.clone()
        };
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(existing)))));
        db.expect_update_department()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(updated))));

        let service = Service::new(db);
        let result = service
            .update_org(UpdateOrgServiceParams {
                caller: caller("admin"),
                org_id,
                department: "Sales".to_string(),
            })
            .await
            .unwrap();

        assert_eq!("Sales", result.department);
    }

    #[tokio::test]
    async fn test_update_org_unknown_caller_role() {
        let org = org(Uuid::now_v7());
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));

        let service = Service::new(db);
        let result = service
            .update_org(UpdateOrgServiceParams {
                caller: caller("ghost"),
                org_id: Uuid::now_v7(),
                department: "Sales".to_string(),
            })
            .await;

        assert!(matches!(result, Err(OrgError::UnknownRole(_))));
    }

    #[tokio::test]
    async fn test_delete_org_not_owner() {
        // admin inherits no org:delete; give the caller owner role but a
        // different user id than the owning user
        let org = org(Uuid::now_v7());
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));

        let service = Service::new(db);
        let result = service
            .delete_org(DeleteOrgServiceParams {
                caller: caller("owner"),
                org_id: Uuid::now_v7(),
            })
            .await;

        assert!(matches!(result, Err(OrgError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_org_owner() {
        let owner = caller("owner");
        let org = org(owner.user_id);
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));
        db.expect_delete_org()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(()))));

        let service = Service::new(db);
        let result = service
            .delete_org(DeleteOrgServiceParams {
                caller: owner,
                org_id: Uuid::now_v7(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_remove_role_owner_key_rejected() {
        let org = org(Uuid::now_v7());
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));

        let service = Service::new(db);
        let result = service
            .remove_role(RemoveRoleServiceParams {
                caller: caller("admin"),
                org_id: Uuid::now_v7(),
                role_key: "owner".to_string(),
            })
            .await;

        assert!(matches!(result, Err(OrgError::Forbidden)));
    }

    #[tokio::test]
    async fn test_remove_role_missing_key() {
        let org = org(Uuid::now_v7());
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));

        let service = Service::new(db);
        let result = service
            .remove_role(RemoveRoleServiceParams {
                caller: caller("admin"),
                org_id: Uuid::now_v7(),
                role_key: "ghost".to_string(),
            })
            .await;

        assert!(matches!(result, Err(OrgError::RoleNotFound)));
    }

    #[tokio::test]
    async fn test_add_member_duplicate() {
        let member_id = Uuid::now_v7();
        let mut existing = org(Uuid::now_v7());
        existing.users.push(OrgMember {
            id: member_id,
            name: "Grace".to_string(),
            role: "user".to_string(),
        });
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(existing)))));

        let service = Service::new(db);
        let result = service
            .add_member(AddMemberServiceParams {
                caller: caller("admin"),
                org_id: Uuid::now_v7(),
                member: OrgMember {
                    id: member_id,
                    name: "Grace".to_string(),
                    role: "user".to_string(),
                },
            })
            .await;

        assert!(matches!(result, Err(OrgError::Conflict)));
    }

    #[tokio::test]
    async fn test_add_member_unknown_role() {
        let org = org(Uuid::now_v7());
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));

        let service = Service::new(db);
        let result = service
            .add_member(AddMemberServiceParams {
                caller: caller("admin"),
                org_id: Uuid::now_v7(),
                member: OrgMember {
                    id: Uuid::now_v7(),
                    name: "Grace".to_string(),
                    role: "ghost".to_string(),
                },
            })
            .await;

        assert!(matches!(result, Err(OrgError::RoleNotFound)));
    }

    #[tokio::test]
    async fn test_remove_member_owner_rejected() {
        let owner_id = Uuid::now_v7();
        let org = org(owner_id);
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));

        let service = Service::new(db);
        let result = service
            .remove_member(RemoveMemberServiceParams {
                caller: caller("admin"),
                org_id: Uuid::now_v7(),
                user_id: owner_id,
            })
            .await;

        assert!(matches!(result, Err(OrgError::Forbidden)));
    }

    #[tokio::test]
    async fn test_invite_member_records_history() {
        let org_id = Uuid::now_v7();
        let admin = caller("admin");
        let admin_id = admin.user_id;
        let org = org(Uuid::now_v7());
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(org)))));
        db.expect_record_invite().times(1).return_once(move |params| {
            assert_eq!(admin_id, params.invited_by);
            Box::pin(future::ready(Ok(InviteRecord {
                id: Uuid::now_v7(),
                org_id: params.org_id,
                email: params.email,
                invited_by: params.invited_by,
                role_key: params.role_key,
                created_at: datetime!(2025-01-01 00:00:00),
            })))
        });

        let service = Service::new(db);
        let result = service
            .invite_member(InviteMemberServiceParams {
                caller: admin,
                org_id,
                email: "grace@example.com".to_string(),
                role_key: "user".to_string(),
            })
            .await
            .unwrap();

        assert_eq!("grace@example.com", result.email);
    }

    #[tokio::test]
    async fn test_get_org_not_found() {
        let mut db = MockOrgRepository::new();
        db.expect_find_org_by_id()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(None))));

        let service = Service::new(db);
        let result = service
            .get_org(GetOrgServiceParams {
                org_id: Uuid::now_v7(),
            })
            .await;

        assert!(matches!(result, Err(OrgError::OrgNotFound)));
    }
}
