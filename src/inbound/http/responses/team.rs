use crate::domain::team::{Task, Team, TeamMember};
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct TeamResponse {
    data: TeamData,
}

#[derive(Serialize)]
pub struct TeamListResponse {
    data: Vec<TeamData>,
}

#[derive(Serialize)]
pub struct TeamData {
    id: Uuid,
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: TeamAttributes,
}

#[derive(Serialize)]
pub struct TeamAttributes {
    org_id: Uuid,
    owner_id: Uuid,
    department: String,
    members: Vec<TeamMember>,
    tasks: Vec<Task>,
    created_at: String,
    updated_at: String,
}

impl From<Team> for TeamData {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            object_type: ResponseType::Team,
            attributes: TeamAttributes {
                org_id: team.org_id,
                owner_id: team.owner_id,
                department: team.department,
                members: team.members,
                tasks: team.tasks,
                created_at: team.created_at.to_string(),
                updated_at: team.updated_at.to_string(),
            },
        }
    }
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self { data: team.into() }
    }
}

impl From<Vec<Team>> for TeamListResponse {
    fn from(teams: Vec<Team>) -> Self {
        Self {
            data: teams.into_iter().map(TeamData::from).collect(),
        }
    }
}

impl IntoResponse for TeamResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl IntoResponse for TeamListResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
