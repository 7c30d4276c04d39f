use crate::domain::team::{
    AddTaskDBParams, AddTeamMemberDBParams, AssignTaskDBParams, CreateTeamDBParams,
    DeleteTeamDBParams, FindTeamDBParams, ListTeamsDBParams, RemoveTaskDBParams,
    RemoveTeamMemberDBParams, Task, Team, TeamMember, TeamRepository, UpdateTaskDBParams,
    UpdateTeamDBParams, UpdateTeamMemberDBParams, remove_member_entry, remove_task_entry,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{TeamRow, TeamRowList};
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

async fn lock_team(tx: &mut Transaction<'_, Postgres>, team_id: Uuid) -> Result<Team, Error> {
    let row = sqlx::query_as::<_, TeamRow>("select * from teams where id = $1 for update")
        .bind(team_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(Error::NotFound)?;

    row.try_into()
}

async fn write_members(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    members: &[TeamMember],
) -> Result<Team, Error> {
    let row = sqlx::query_as::<_, TeamRow>(
        "update teams set members = $2, updated_at = now() where id = $1 returning *",
    )
    .bind(team_id)
    .bind(serde_json::to_value(members)?)
    .fetch_one(&mut **tx)
    .await?;

    row.try_into()
}

async fn write_tasks(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    tasks: &[Task],
) -> Result<Team, Error> {
    let row = sqlx::query_as::<_, TeamRow>(
        "update teams set tasks = $2, updated_at = now() where id = $1 returning *",
    )
    .bind(team_id)
    .bind(serde_json::to_value(tasks)?)
    .fetch_one(&mut **tx)
    .await?;

    row.try_into()
}

#[async_trait]
impl TeamRepository for Repository {
    async fn create_team(&self, params: CreateTeamDBParams) -> Result<Team, Error> {
        let row = sqlx::query_as::<_, TeamRow>(
            "insert into teams (id, org_id, owner_id, department, members, tasks) \
             values ($1, $2, $3, $4, $5, $6) returning *",
        )
        .bind(Uuid::now_v7())
        .bind(params.org_id)
        .bind(params.owner_id)
        .bind(params.department)
        .bind(serde_json::to_value(&params.members)?)
        .bind(serde_json::to_value::<Vec<Task>>(vec![])?)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_team_by_id(&self, params: FindTeamDBParams) -> Result<Option<Team>, Error> {
        let result = sqlx::query_as::<_, TeamRow>("select * from teams where id = $1")
            .bind(params.team_id)
            .fetch_optional(&self.pool)
            .await?;

        match result {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    async fn list_teams(&self, params: ListTeamsDBParams) -> Result<Vec<Team>, Error> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "select * from teams where org_id = $1 order by created_at",
        )
        .bind(params.org_id)
        .fetch_all(&self.pool)
        .await?;

        TeamRowList(rows).try_into()
    }

    async fn update_team(&self, params: UpdateTeamDBParams) -> Result<Team, Error> {
        let row = sqlx::query_as::<_, TeamRow>(
            "update teams set department = $2, updated_at = now() where id = $1 returning *",
        )
        .bind(params.team_id)
        .bind(params.department)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound)?;

        row.try_into()
    }

    async fn delete_team(&self, params: DeleteTeamDBParams) -> Result<(), Error> {
        let result = sqlx::query("delete from teams where id = $1")
            .bind(params.team_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    async fn add_member(&self, params: AddTeamMemberDBParams) -> Result<Team, Error> {
        let mut tx = self.pool.begin().await?;
        let mut team = lock_team(&mut tx, params.team_id).await?;

        if team.members.iter().any(|m| m.id == params.member.id) {
            return Err(Error::OnConflict);
        }
        team.members.push(params.member);

        let team = write_members(&mut tx, params.team_id, &team.members).await?;
        tx.commit().await?;

        Ok(team)
    }

    async fn update_member_role(&self, params: UpdateTeamMemberDBParams) -> Result<Team, Error> {
        let mut tx = self.pool.begin().await?;
        let mut team = lock_team(&mut tx, params.team_id).await?;

        let member = team
            .members
            .iter_mut()
            .find(|m| m.id == params.user_id)
            .ok_or(Error::NotFound)?;
        member.role = params.role;

        let team = write_members(&mut tx, params.team_id, &team.members).await?;
        tx.commit().await?;

        Ok(team)
    }

    async fn remove_member(&self, params: RemoveTeamMemberDBParams) -> Result<Team, Error> {
        let mut tx = self.pool.begin().await?;
        let mut team = lock_team(&mut tx, params.team_id).await?;

        if remove_member_entry(&mut team.members, params.user_id).is_none() {
            return Err(Error::NotFound);
        }

        let team = write_members(&mut tx, params.team_id, &team.members).await?;
        tx.commit().await?;

        Ok(team)
    }

    async fn add_task(&self, params: AddTaskDBParams) -> Result<Team, Error> {
        let mut tx = self.pool.begin().await?;
        let mut team = lock_team(&mut tx, params.team_id).await?;

        team.tasks.push(params.task);

        let team = write_tasks(&mut tx, params.team_id, &team.tasks).await?;
        tx.commit().await?;

        Ok(team)
    }

    async fn update_task(&self, params: UpdateTaskDBParams) -> Result<Team, Error> {
        let mut tx = self.pool.begin().await?;
        let mut team = lock_team(&mut tx, params.team_id).await?;

        let task = team
            .tasks
            .iter_mut()
            .find(|t| t.task_id == params.task_id)
            .ok_or(Error::NotFound)?;
        task.task_name = params.task_name;

        let team = write_tasks(&mut tx, params.team_id, &team.tasks).await?;
        tx.commit().await?;

        Ok(team)
    }

    async fn assign_task(&self, params: AssignTaskDBParams) -> Result<Team, Error> {
        let mut tx = self.pool.begin().await?;
        let mut team = lock_team(&mut tx, params.team_id).await?;

        let task = team
            .tasks
            .iter_mut()
            .find(|t| t.task_id == params.task_id)
            .ok_or(Error::NotFound)?;
        task.assigned_user_id = Some(params.assigned_user_id);
        task.assigned_user_name = Some(params.assigned_user_name);

        let team = write_tasks(&mut tx, params.team_id, &team.tasks).await?;
        tx.commit().await?;

        Ok(team)
    }

    async fn remove_task(&self, params: RemoveTaskDBParams) -> Result<Team, Error> {
        let mut tx = self.pool.begin().await?;
        let mut team = lock_team(&mut tx, params.team_id).await?;

        if remove_task_entry(&mut team.tasks, params.task_id).is_none() {
            return Err(Error::NotFound);
        }

        let team = write_tasks(&mut tx, params.team_id, &team.tasks).await?;
        tx.commit().await?;

        Ok(team)
    }
}
