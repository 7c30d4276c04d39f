use crate::domain::org::Caller;
use crate::domain::rbac::RbacError;
use crate::domain::team::{Task, Team, TeamMember};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TeamService: Send + Sync {
    async fn create_team(&self, params: CreateTeamServiceParams) -> Result<Team, TeamError>;
    async fn get_team(&self, params: GetTeamServiceParams) -> Result<Team, TeamError>;
    async fn list_teams(&self, params: ListTeamsServiceParams) -> Result<Vec<Team>, TeamError>;
    async fn update_team(&self, params: UpdateTeamServiceParams) -> Result<Team, TeamError>;
    async fn delete_team(&self, params: DeleteTeamServiceParams) -> Result<(), TeamError>;

    async fn add_member(&self, params: AddTeamMemberServiceParams) -> Result<Team, TeamError>;
    async fn update_member_role(
        &self,
        params: UpdateTeamMemberServiceParams,
    ) -> Result<Team, TeamError>;
    async fn remove_member(&self, params: RemoveTeamMemberServiceParams)
    -> Result<Team, TeamError>;

    async fn add_task(&self, params: AddTaskServiceParams) -> Result<Team, TeamError>;
    async fn update_task(&self, params: UpdateTaskServiceParams) -> Result<Team, TeamError>;
    async fn assign_task(&self, params: AssignTaskServiceParams) -> Result<Team, TeamError>;
    async fn remove_task(&self, params: RemoveTaskServiceParams) -> Result<Team, TeamError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TeamRepository: Send + Sync + 'static {
    async fn create_team(&self, params: CreateTeamDBParams) -> Result<Team, DatabaseError>;
    async fn find_team_by_id(
        &self,
        params: FindTeamDBParams,
    ) -> Result<Option<Team>, DatabaseError>;
    async fn list_teams(&self, params: ListTeamsDBParams) -> Result<Vec<Team>, DatabaseError>;
    async fn update_team(&self, params: UpdateTeamDBParams) -> Result<Team, DatabaseError>;
    async fn delete_team(&self, params: DeleteTeamDBParams) -> Result<(), DatabaseError>;

    async fn add_member(&self, params: AddTeamMemberDBParams) -> Result<Team, DatabaseError>;
    async fn update_member_role(
        &self,
        params: UpdateTeamMemberDBParams,
    ) -> Result<Team, DatabaseError>;
    async fn remove_member(&self, params: RemoveTeamMemberDBParams) -> Result<Team, DatabaseError>;

    async fn add_task(&self, params: AddTaskDBParams) -> Result<Team, DatabaseError>;
    async fn update_task(&self, params: UpdateTaskDBParams) -> Result<Team, DatabaseError>;
    async fn assign_task(&self, params: AssignTaskDBParams) -> Result<Team, DatabaseError>;
    async fn remove_task(&self, params: RemoveTaskDBParams) -> Result<Team, DatabaseError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct CreateTeamServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
    pub department: String,
}

pub struct GetTeamServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
}

pub struct ListTeamsServiceParams {
    pub caller: Caller,
    pub org_id: Uuid,
}

pub struct UpdateTeamServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
    pub department: String,
}

pub struct DeleteTeamServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
}

pub struct AddTeamMemberServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
    pub member: TeamMember,
}

pub struct UpdateTeamMemberServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
}

pub struct RemoveTeamMemberServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
    pub user_id: Uuid,
}

pub struct AddTaskServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
    pub task_name: String,
}

pub struct UpdateTaskServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
    pub task_id: Uuid,
    pub task_name: String,
}

pub struct AssignTaskServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
}

pub struct RemoveTaskServiceParams {
    pub caller: Caller,
    pub team_id: Uuid,
    pub task_id: Uuid,
}

pub struct CreateTeamDBParams {
    pub org_id: Uuid,
    pub owner_id: Uuid,
    pub department: String,
    pub members: Vec<TeamMember>,
}

pub struct FindTeamDBParams {
    pub team_id: Uuid,
}

pub struct ListTeamsDBParams {
    pub org_id: Uuid,
}

pub struct UpdateTeamDBParams {
    pub team_id: Uuid,
    pub department: String,
}

pub struct DeleteTeamDBParams {
    pub team_id: Uuid,
}

pub struct AddTeamMemberDBParams {
    pub team_id: Uuid,
    pub member: TeamMember,
}

pub struct UpdateTeamMemberDBParams {
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
}

pub struct RemoveTeamMemberDBParams {
    pub team_id: Uuid,
    pub user_id: Uuid,
}

pub struct AddTaskDBParams {
    pub team_id: Uuid,
    pub task: Task,
}

pub struct UpdateTaskDBParams {
    pub team_id: Uuid,
    pub task_id: Uuid,
    pub task_name: String,
}

pub struct AssignTaskDBParams {
    pub team_id: Uuid,
    pub task_id: Uuid,
    pub assigned_user_id: Uuid,
    pub assigned_user_name: String,
}

pub struct RemoveTaskDBParams {
    pub team_id: Uuid,
    pub task_id: Uuid,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("caller may not perform this operation")]
    Forbidden,

    #[error(transparent)]
    UnknownRole(#[from] RbacError),

    #[error("team not found")]
    TeamNotFound,

    #[error("organization not found")]
    OrgNotFound,

    #[error("member not found")]
    MemberNotFound,

    #[error("task not found")]
    TaskNotFound,

    #[error("the resource already exists")]
    Conflict,

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}
