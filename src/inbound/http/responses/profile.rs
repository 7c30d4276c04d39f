use crate::domain::auth::{ServiceLoginResult, ServiceProfileResult, ServiceRegisterResult, User};
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Session (register / login)
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct SessionResponse {
    data: SessionData,
}

#[derive(Serialize)]
pub struct SessionData {
    id: Uuid,
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: SessionAttributes,
}

#[derive(Serialize)]
pub struct SessionAttributes {
    name: String,
    email: String,
    role: String,
}

fn session_response(user: &User) -> SessionResponse {
    SessionResponse {
        data: SessionData {
            id: user.id,
            object_type: ResponseType::Session,
            attributes: SessionAttributes {
                name: user.name.clone(),
                email: user.email.clone(),
                role: user.role_key.clone(),
            },
        },
    }
}

impl IntoResponse for ServiceRegisterResult {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(session_response(&self.user))).into_response()
    }
}

impl IntoResponse for ServiceLoginResult {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(session_response(&self.user))).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Profile
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct ProfileResponse {
    data: ProfileData,
}

#[derive(Serialize)]
pub struct ProfileData {
    id: Uuid,
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: ProfileAttributes,
}

#[derive(Serialize)]
pub struct ProfileAttributes {
    name: String,
    email: String,
    role: String,
    status: String,
    profile_image_url: Option<String>,
    selected_org_id: Option<Uuid>,
    selected_team_id: Option<Uuid>,
}

impl IntoResponse for ServiceProfileResult {
    fn into_response(self) -> Response {
        let response = ProfileResponse {
            data: ProfileData {
                id: self.user.id,
                object_type: ResponseType::Profile,
                attributes: ProfileAttributes {
                    name: self.user.name,
                    email: self.user.email,
                    role: self.user.role_key,
                    status: self.user.status,
                    profile_image_url: self.user.profile_image_url,
                    selected_org_id: self.selection.org_id,
                    selected_team_id: self.selection.team_id,
                },
            },
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}
