//! HttpEffortPredictor - REST API の予測エンドポイントを呼ぶ EffortPredictor
//!
//! `POST {base_url}/api/todo/predict` に `PredictionRequest` を送り、
//! `{"pred": <number>}` を受け取ります。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{BoardError, PredictionRequest};
use crate::ports::EffortPredictor;
use crate::settings::Settings;

const PREDICT_PATH: &str = "api/todo/predict";

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("invalid API base URL {0}")]
    BaseUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    pred: f64,
}

pub struct HttpEffortPredictor {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpEffortPredictor {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PredictError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url, token)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, PredictError> {
        Self::new(
            &settings.api_base_url,
            settings.api_token.clone(),
            settings.request_timeout(),
        )
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        token: Option<String>,
    ) -> Result<Self, PredictError> {
        let raw = format!("{}/{PREDICT_PATH}", base_url.trim_end_matches('/'));
        let endpoint =
            Url::parse(&raw).map_err(|e| PredictError::BaseUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn request(&self, request: &PredictionRequest) -> Result<f64, PredictError> {
        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let response: PredictResponse = builder
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.pred)
    }
}

#[async_trait]
impl EffortPredictor for HttpEffortPredictor {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, BoardError> {
        let score = self
            .request(request)
            .await
            .map_err(|e| BoardError::external("effort prediction", e))?;
        debug!(endpoint = %self.endpoint, score, "prediction received");
        Ok(score)
    }
}
