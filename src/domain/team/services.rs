use crate::domain::org::{Caller, RoleMapSource};
use crate::domain::rbac::resolve_role;
use crate::domain::team::{
    AddTaskDBParams, AddTaskServiceParams, AddTeamMemberDBParams, AddTeamMemberServiceParams,
    AssignTaskDBParams, AssignTaskServiceParams, CreateTeamDBParams, CreateTeamServiceParams,
    DeleteTeamDBParams, DeleteTeamServiceParams, FindTeamDBParams, GetTeamServiceParams,
    ListTeamsDBParams, ListTeamsServiceParams, RemoveTaskDBParams, RemoveTaskServiceParams,
    RemoveTeamMemberDBParams, RemoveTeamMemberServiceParams, Task, Team, TeamError, TeamMember,
    TeamRepository, TeamService, UpdateTaskDBParams, UpdateTaskServiceParams, UpdateTeamDBParams,
    UpdateTeamMemberDBParams, UpdateTeamMemberServiceParams, UpdateTeamServiceParams,
};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Service<DB, ROLES>
where
    DB: TeamRepository,
    ROLES: RoleMapSource,
{
    db: DB,
    roles: ROLES,
}

impl<DB, ROLES> Service<DB, ROLES>
where
    DB: TeamRepository,
    ROLES: RoleMapSource,
{
    pub fn new(db: DB, roles: ROLES) -> Self {
        Self { db, roles }
    }

    async fn check_org_permission(
        &self,
        caller: &Caller,
        org_id: Uuid,
        required: &[&str],
    ) -> Result<(), TeamError> {
        let roles = self
            .roles
            .role_map(org_id)
            .await?
            .ok_or(TeamError::OrgNotFound)?;

        let resolved = resolve_role(&roles, caller.role_key.as_str())?;
        if !resolved.check_permissions(required) {
            return Err(TeamError::Forbidden);
        }

        Ok(())
    }

    /// existence check + permission check for ops addressed by team id.
    async fn load_authorized(
        &self,
        caller: &Caller,
        team_id: Uuid,
        required: &[&str],
    ) -> Result<Team, TeamError> {
        let team = self
            .db
            .find_team_by_id(FindTeamDBParams { team_id })
            .await?
            .ok_or(TeamError::TeamNotFound)?;

        self.check_org_permission(caller, team.org_id, required)
            .await?;

        Ok(team)
    }
}

#[async_trait]
impl<DB, ROLES> TeamService for Service<DB, ROLES>
where
    DB: TeamRepository,
    ROLES: RoleMapSource,
{
    async fn create_team(&self, params: CreateTeamServiceParams) -> Result<Team, TeamError> {
        self.check_org_permission(&params.caller, params.org_id, &["team:manage"])
            .await?;

        let creator = TeamMember {
            id: params.caller.user_id,
            name: params.caller.name.clone(),
            role: params.caller.role_key.clone(),
        };

        let team = self
            .db
            .create_team(CreateTeamDBParams {
                org_id: params.org_id,
                owner_id: params.caller.user_id,
                department: params.department,
                members: vec![creator],
            })
            .await?;

        Ok(team)
    }

    async fn get_team(&self, params: GetTeamServiceParams) -> Result<Team, TeamError> {
        let team = self
            .load_authorized(&params.caller, params.team_id, &["team:view", "team:manage"])
            .await?;

        Ok(team)
    }

    async fn list_teams(&self, params: ListTeamsServiceParams) -> Result<Vec<Team>, TeamError> {
        self.check_org_permission(&params.caller, params.org_id, &["team:view", "team:manage"])
            .await?;

        let teams = self
            .db
            .list_teams(ListTeamsDBParams {
                org_id: params.org_id,
            })
            .await?;

        Ok(teams)
    }

    async fn update_team(&self, params: UpdateTeamServiceParams) -> Result<Team, TeamError> {
        self.load_authorized(&params.caller, params.team_id, &["team:manage"])
            .await?;

        let team = self
            .db
            .update_team(UpdateTeamDBParams {
                team_id: params.team_id,
                department: params.department,
            })
            .await?;

        Ok(team)
    }

    async fn delete_team(&self, params: DeleteTeamServiceParams) -> Result<(), TeamError> {
        self.load_authorized(&params.caller, params.team_id, &["team:manage"])
            .await?;

        self.db
            .delete_team(DeleteTeamDBParams {
                team_id: params.team_id,
            })
            .await?;

        Ok(())
    }

    async fn add_member(&self, params: AddTeamMemberServiceParams) -> Result<Team, TeamError> {
        let team = self
            .load_authorized(&params.caller, params.team_id, &["member:manage"])
            .await?;

        if team.members.iter().any(|m| m.id == params.member.id) {
            return Err(TeamError::Conflict);
        }

        let team = self
            .db
            .add_member(AddTeamMemberDBParams {
                team_id: params.team_id,
                member: params.member,
            })
            .await?;

        Ok(team)
    }

    async fn update_member_role(
        &self,
        params: UpdateTeamMemberServiceParams,
    ) -> Result<Team, TeamError> {
        let team = self
            .load_authorized(&params.caller, params.team_id, &["member:manage"])
            .await?;

        if !team.members.iter().any(|m| m.id == params.user_id) {
            return Err(TeamError::MemberNotFound);
        }

        let team = self
            .db
            .update_member_role(UpdateTeamMemberDBParams {
                team_id: params.team_id,
                user_id: params.user_id,
                role: params.role,
            })
            .await?;

        Ok(team)
    }

    async fn remove_member(
        &self,
        params: RemoveTeamMemberServiceParams,
    ) -> Result<Team, TeamError> {
        let team = self
            .load_authorized(&params.caller, params.team_id, &["member:manage"])
            .await?;

        if !team.members.iter().any(|m| m.id == params.user_id) {
            return Err(TeamError::MemberNotFound);
        }

        let team = self
            .db
            .remove_member(RemoveTeamMemberDBParams {
                team_id: params.team_id,
                user_id: params.user_id,
            })
            .await?;

        Ok(team)
    }

    async fn add_task(&self, params: AddTaskServiceParams) -> Result<Team, TeamError> {
        self.load_authorized(&params.caller, params.team_id, &["task:manage"])
            .await?;

        let team = self
            .db
            .add_task(AddTaskDBParams {
                team_id: params.team_id,
                task: Task {
                    task_id: Uuid::now_v7(),
                    task_name: params.task_name,
                    assigned_user_id: None,
                    assigned_user_name: None,
                },
            })
            .await?;

        Ok(team)
    }

    async fn update_task(&self, params: UpdateTaskServiceParams) -> Result<Team, TeamError> {
        let team = self
            .load_authorized(&params.caller, params.team_id, &["task:manage"])
            .await?;

        if !team.tasks.iter().any(|t| t.task_id == params.task_id) {
            return Err(TeamError::TaskNotFound);
        }

        let team = self
            .db
            .update_task(UpdateTaskDBParams {
                team_id: params.team_id,
                task_id: params.task_id,
                task_name: params.task_name,
            })
            .await?;

        Ok(team)
    }

    async fn assign_task(&self, params: AssignTaskServiceParams) -> Result<Team, TeamError> {
        let team = self
            .load_authorized(&params.caller, params.team_id, &["task:manage"])
            .await?;

        if !team.tasks.iter().any(|t| t.task_id == params.task_id) {
            return Err(TeamError::TaskNotFound);
        }
        let assignee = team
            .members
            .iter()
            .find(|m| m.id == params.user_id)
            .ok_or(TeamError::MemberNotFound)?;

        let team = self
            .db
            .assign_task(AssignTaskDBParams {
                team_id: params.team_id,
                task_id: params.task_id,
                assigned_user_id: assignee.id,
                assigned_user_name: assignee.name.clone(),
            })
            .await?;

        Ok(team)
    }

    async fn remove_task(&self, params: RemoveTaskServiceParams) -> Result<Team, TeamError> {
        let team = self
            .load_authorized(&params.caller, params.team_id, &["task:manage"])
            .await?;

        if !team.tasks.iter().any(|t| t.task_id == params.task_id) {
            return Err(TeamError::TaskNotFound);
        }

        let team = self
            .db
            .remove_task(RemoveTaskDBParams {
                team_id: params.team_id,
                task_id: params.task_id,
            })
            .await?;

        Ok(team)
    }
}
