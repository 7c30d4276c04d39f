use crate::domain::org::{
    AddMemberDBParams, AddPermissionDBParams, CreateOrgDBParams, DeleteOrgDBParams,
    FindOrgDBParams, InviteRecord, ListInvitesDBParams, OrgRepository, Organization,
    RecordInviteDBParams, RemoveMemberDBParams, RemoveRoleDBParams, RoleMapSource,
    UpdateDepartmentDBParams, UpsertRoleDBParams,
};
use crate::domain::rbac::RoleMap;
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{InviteRow, InviteRowList, OrganizationRow};
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Row-locked read used by every array/map mutation so that concurrent
/// writers serialize on the organization row.
async fn lock_org(
    tx: &mut Transaction<'_, Postgres>,
    org_id: Uuid,
) -> Result<Organization, Error> {
    let row = sqlx::query_as::<_, OrganizationRow>(
        "select * from organizations where id = $1 for update",
    )
    .bind(org_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(Error::NotFound)?;

    row.try_into()
}

async fn write_roles(
    tx: &mut Transaction<'_, Postgres>,
    org_id: Uuid,
    roles: &RoleMap,
) -> Result<Organization, Error> {
    let row = sqlx::query_as::<_, OrganizationRow>(
        "update organizations set roles = $2, updated_at = now() where id = $1 returning *",
    )
    .bind(org_id)
    .bind(serde_json::to_value(roles)?)
    .fetch_one(&mut **tx)
    .await?;

    row.try_into()
}

#[async_trait]
impl OrgRepository for Repository {
    async fn create_org(&self, params: CreateOrgDBParams) -> Result<Organization, Error> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            "insert into organizations (id, owner_id, department, roles, permissions_list, users) \
             values ($1, $2, $3, $4, $5, $6) returning *",
        )
        .bind(Uuid::now_v7())
        .bind(params.owner_id)
        .bind(params.department)
        .bind(serde_json::to_value(&params.roles)?)
        .bind(serde_json::to_value(&params.permissions_list)?)
        .bind(serde_json::to_value(&params.users)?)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_org_by_id(&self, params: FindOrgDBParams) -> Result<Option<Organization>, Error> {
        let result = sqlx::query_as::<_, OrganizationRow>(
            "select * from organizations where id = $1",
        )
        .bind(params.org_id)
        .fetch_optional(&self.pool)
        .await?;

        match result {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    async fn update_department(
        &self,
        params: UpdateDepartmentDBParams,
    ) -> Result<Organization, Error> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            "update organizations set department = $2, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(params.org_id)
        .bind(params.department)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound)?;

        row.try_into()
    }

    async fn delete_org(&self, params: DeleteOrgDBParams) -> Result<(), Error> {
        let result = sqlx::query("delete from organizations where id = $1")
            .bind(params.org_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    async fn upsert_role(&self, params: UpsertRoleDBParams) -> Result<Organization, Error> {
        let mut tx = self.pool.begin().await?;
        let mut org = lock_org(&mut tx, params.org_id).await?;

        org.roles.insert(params.role.key.clone(), params.role);
        let org = write_roles(&mut tx, params.org_id, &org.roles).await?;
        tx.commit().await?;

        Ok(org)
    }

    async fn remove_role(&self, params: RemoveRoleDBParams) -> Result<Organization, Error> {
        let mut tx = self.pool.begin().await?;
        let mut org = lock_org(&mut tx, params.org_id).await?;

        if org.roles.remove(params.role_key.as_str()).is_none() {
            return Err(Error::NotFound);
        }
        let org = write_roles(&mut tx, params.org_id, &org.roles).await?;
        tx.commit().await?;

        Ok(org)
    }

    async fn add_permission(&self, params: AddPermissionDBParams) -> Result<Organization, Error> {
        let mut tx = self.pool.begin().await?;
        let mut org = lock_org(&mut tx, params.org_id).await?;

        if org.permissions_list.contains(&params.permission) {
            return Err(Error::OnConflict);
        }
        org.permissions_list.push(params.permission);

        let row = sqlx::query_as::<_, OrganizationRow>(
            "update organizations set permissions_list = $2, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(params.org_id)
        .bind(serde_json::to_value(&org.permissions_list)?)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        row.try_into()
    }

    async fn add_member(&self, params: AddMemberDBParams) -> Result<Organization, Error> {
        let mut tx = self.pool.begin().await?;
        let mut org = lock_org(&mut tx, params.org_id).await?;

        if org.users.iter().any(|m| m.id == params.member.id) {
            return Err(Error::OnConflict);
        }
        org.users.push(params.member);

        let row = sqlx::query_as::<_, OrganizationRow>(
            "update organizations set users = $2, updated_at = now() where id = $1 returning *",
        )
        .bind(params.org_id)
        .bind(serde_json::to_value(&org.users)?)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        row.try_into()
    }

    async fn remove_member(&self, params: RemoveMemberDBParams) -> Result<Organization, Error> {
        let mut tx = self.pool.begin().await?;
        let mut org = lock_org(&mut tx, params.org_id).await?;

        // remove the first matching entry only
        let position = org
            .users
            .iter()
            .position(|m| m.id == params.user_id)
            .ok_or(Error::NotFound)?;
        org.users.remove(position);

        let row = sqlx::query_as::<_, OrganizationRow>(
            "update organizations set users = $2, updated_at = now() where id = $1 returning *",
        )
        .bind(params.org_id)
        .bind(serde_json::to_value(&org.users)?)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        row.try_into()
    }

    async fn record_invite(&self, params: RecordInviteDBParams) -> Result<InviteRecord, Error> {
        let row = sqlx::query_as::<_, InviteRow>(
            "insert into org_invites (id, org_id, email, invited_by, role_key) \
             values ($1, $2, $3, $4, $5) returning *",
        )
        .bind(Uuid::now_v7())
        .bind(params.org_id)
        .bind(params.email)
        .bind(params.invited_by)
        .bind(params.role_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_invites(&self, params: ListInvitesDBParams) -> Result<Vec<InviteRecord>, Error> {
        let rows = sqlx::query_as::<_, InviteRow>(
            "select * from org_invites where org_id = $1 order by created_at desc",
        )
        .bind(params.org_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(InviteRowList(rows).into())
    }
}

#[async_trait]
impl RoleMapSource for Repository {
    async fn role_map(&self, org_id: Uuid) -> Result<Option<RoleMap>, Error> {
        let result: Option<(serde_json::Value,)> =
            sqlx::query_as("select roles from organizations where id = $1")
                .bind(org_id)
                .fetch_optional(&self.pool)
                .await?;

        match result {
            Some((roles,)) => Ok(Some(serde_json::from_value(roles)?)),
            None => Ok(None),
        }
    }
}
