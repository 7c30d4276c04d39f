use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunchState {
    In,
    Out,
}

/// Record returned by the external time-tracking API. The upstream body is
/// ad hoc JSON; this is the subset the dashboard reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRecord {
    pub punch_id: String,
    pub state: PunchState,
    pub recorded_at: String,
}
