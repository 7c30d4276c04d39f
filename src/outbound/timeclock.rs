use crate::domain::timeclock::{
    PunchInParams, PunchOutParams, PunchRecord, PunchStatusParams, TimeApiError, TimeApiPort,
};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct PunchInBody {
    user_id: Uuid,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct PunchOutBody {
    user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct TimeApiAdapter {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

pub struct NewTimeApiAdapterParams {
    pub base_url: String,
    pub api_key: String,
}

impl TimeApiAdapter {
    pub fn new(params: NewTimeApiAdapterParams) -> Result<Self, Error> {
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http_client,
            base_url: params.base_url.trim_end_matches('/').to_string(),
            api_key: params.api_key,
        })
    }

    async fn decode_punch(&self, response: reqwest::Response) -> Result<PunchRecord, TimeApiError> {
        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "time api rejected the request");
            return Err(TimeApiError::UpstreamStatus(status.as_u16()));
        }

        response.json::<PunchRecord>().await.map_err(|e| {
            tracing::error!("failed to decode time api response: {}", e);
            TimeApiError::DecodeError
        })
    }
}

#[async_trait]
impl TimeApiPort for TimeApiAdapter {
    async fn punch_in(&self, params: PunchInParams) -> Result<PunchRecord, TimeApiError> {
        let response = self
            .http_client
            .post(format!("{}/punches/in", self.base_url))
            .bearer_auth(self.api_key.as_str())
            .json(&PunchInBody {
                user_id: params.user_id,
                latitude: params.location.latitude,
                longitude: params.location.longitude,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("time api request failed: {}", e);
                TimeApiError::RequestError
            })?;

        self.decode_punch(response).await
    }

    async fn punch_out(&self, params: PunchOutParams) -> Result<PunchRecord, TimeApiError> {
        let response = self
            .http_client
            .post(format!("{}/punches/out", self.base_url))
            .bearer_auth(self.api_key.as_str())
            .json(&PunchOutBody {
                user_id: params.user_id,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("time api request failed: {}", e);
                TimeApiError::RequestError
            })?;

        self.decode_punch(response).await
    }

    async fn punch_status(
        &self,
        params: PunchStatusParams,
    ) -> Result<Option<PunchRecord>, TimeApiError> {
        let response = self
            .http_client
            .get(format!(
                "{}/punches/current?user_id={}",
                self.base_url, params.user_id
            ))
            .bearer_auth(self.api_key.as_str())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("time api request failed: {}", e);
                TimeApiError::RequestError
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(self.decode_punch(response).await?))
    }
}
