use crate::domain::timeclock::{PunchRecord, PunchState};
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
pub struct PunchResponse {
    data: PunchData,
}

/// `data` is null when no punch record exists for the caller.
#[derive(Serialize)]
pub struct PunchStatusResponse {
    data: Option<PunchData>,
}

#[derive(Serialize)]
pub struct PunchData {
    id: String,
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: PunchAttributes,
}

#[derive(Serialize)]
pub struct PunchAttributes {
    state: PunchState,
    recorded_at: String,
}

impl From<PunchRecord> for PunchData {
    fn from(record: PunchRecord) -> Self {
        Self {
            id: record.punch_id,
            object_type: ResponseType::Punch,
            attributes: PunchAttributes {
                state: record.state,
                recorded_at: record.recorded_at,
            },
        }
    }
}

impl From<PunchRecord> for PunchResponse {
    fn from(record: PunchRecord) -> Self {
        Self {
            data: record.into(),
        }
    }
}

impl From<Option<PunchRecord>> for PunchStatusResponse {
    fn from(record: Option<PunchRecord>) -> Self {
        Self {
            data: record.map(PunchData::from),
        }
    }
}

impl IntoResponse for PunchResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl IntoResponse for PunchStatusResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
