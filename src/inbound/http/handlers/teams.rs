use crate::core::application::ApplicationServices;
use crate::domain::team::{
    AddTaskServiceParams, AddTeamMemberServiceParams, AssignTaskServiceParams,
    CreateTeamServiceParams, DeleteTeamServiceParams, GetTeamServiceParams, ListTeamsServiceParams,
    RemoveTaskServiceParams, RemoveTeamMemberServiceParams, TeamError, TeamMember, TeamService,
    UpdateTaskServiceParams, UpdateTeamMemberServiceParams, UpdateTeamServiceParams,
};
use crate::errors::{AppError, bad_request, internal_error, not_found, rejected};
use crate::inbound::http::handlers::caller_identity;
use crate::inbound::http::responses::team::{TeamListResponse, TeamResponse};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use http::StatusCode;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

fn map_team_error(e: TeamError) -> AppError {
    match e {
        TeamError::Forbidden => AppError::Forbidden,
        TeamError::UnknownRole(e) => bad_request(e),
        e @ (TeamError::TeamNotFound
        | TeamError::OrgNotFound
        | TeamError::MemberNotFound
        | TeamError::TaskNotFound) => not_found(e),
        e @ TeamError::Conflict => rejected(e),
        TeamError::DatabaseError(e) => internal_error(e),
    }
}

fn no_org_selected() -> AppError {
    bad_request("no organization selected")
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Teams
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct CreateTeamBody {
    pub org_id: Option<Uuid>,
    pub department: String,
}

pub async fn team_create<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Json(body): Json<CreateTeamBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, selection) = caller_identity(&state, session).await?;
    let org_id = body.org_id.or(selection.org_id).ok_or_else(no_org_selected)?;

    let team = state
        .team_service()
        .create_team(CreateTeamServiceParams {
            caller,
            org_id,
            department: body.department,
        })
        .await
        .map_err(map_team_error)?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))))
}

pub async fn team_get<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(team_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .get_team(GetTeamServiceParams { caller, team_id })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}

#[derive(Deserialize)]
pub struct ListTeamsQuery {
    pub org_id: Option<Uuid>,
}

pub async fn team_list<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Query(query): Query<ListTeamsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, selection) = caller_identity(&state, session).await?;
    let org_id = query
        .org_id
        .or(selection.org_id)
        .ok_or_else(no_org_selected)?;

    let teams = state
        .team_service()
        .list_teams(ListTeamsServiceParams { caller, org_id })
        .await
        .map_err(map_team_error)?;

    Ok(TeamListResponse::from(teams))
}

#[derive(Deserialize)]
pub struct UpdateTeamBody {
    pub department: String,
}

pub async fn team_update<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(team_id): Path<Uuid>,
    Json(body): Json<UpdateTeamBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .update_team(UpdateTeamServiceParams {
            caller,
            team_id,
            department: body.department,
        })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}

pub async fn team_delete<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(team_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    state
        .team_service()
        .delete_team(DeleteTeamServiceParams { caller, team_id })
        .await
        .map_err(map_team_error)?;

    Ok(StatusCode::NO_CONTENT)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Members
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct AddTeamMemberBody {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
}

pub async fn team_add_member<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(team_id): Path<Uuid>,
    Json(body): Json<AddTeamMemberBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .add_member(AddTeamMemberServiceParams {
            caller,
            team_id,
            member: TeamMember {
                id: body.user_id,
                name: body.name,
                role: body.role,
            },
        })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}

#[derive(Deserialize)]
pub struct UpdateTeamMemberBody {
    pub role: String,
}

pub async fn team_update_member<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateTeamMemberBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .update_member_role(UpdateTeamMemberServiceParams {
            caller,
            team_id,
            user_id,
            role: body.role,
        })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}

pub async fn team_remove_member<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .remove_member(RemoveTeamMemberServiceParams {
            caller,
            team_id,
            user_id,
        })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Tasks
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct AddTaskBody {
    pub task_name: String,
}

pub async fn team_add_task<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path(team_id): Path<Uuid>,
    Json(body): Json<AddTaskBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .add_task(AddTaskServiceParams {
            caller,
            team_id,
            task_name: body.task_name,
        })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}

#[derive(Deserialize)]
pub struct UpdateTaskBody {
    pub task_name: String,
}

pub async fn team_update_task<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path((team_id, task_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .update_task(UpdateTaskServiceParams {
            caller,
            team_id,
            task_id,
            task_name: body.task_name,
        })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}

#[derive(Deserialize)]
pub struct AssignTaskBody {
    pub user_id: Uuid,
}

pub async fn team_assign_task<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path((team_id, task_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<AssignTaskBody>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .assign_task(AssignTaskServiceParams {
            caller,
            team_id,
            task_id,
            user_id: body.user_id,
        })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}

pub async fn team_remove_task<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Path((team_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let (caller, _) = caller_identity(&state, session).await?;

    let team = state
        .team_service()
        .remove_task(RemoveTaskServiceParams {
            caller,
            team_id,
            task_id,
        })
        .await
        .map_err(map_team_error)?;

    Ok(TeamResponse::from(team))
}
