use std::time::Duration;

use dash_logging::dash_info;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{ApiError, CampaignData, CampaignPayload, Envelope, MarketData};

/// Envelope status value that marks a successful response.
pub const SUCCESS_SENTINEL: &str = "success";
/// Health-endpoint status value that marks a reachable, working backend.
pub const HEALTHY_SENTINEL: &str = "healthy";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Seam over the backend contract so the shell can be exercised without a
/// live server.
#[async_trait::async_trait]
pub trait BackendApi: Send + Sync {
    /// GET `/api/health`; `Ok` only for the healthy sentinel.
    async fn health(&self) -> Result<(), ApiError>;
    /// GET `/api/market-intelligence`.
    async fn market_intelligence(&self) -> Result<MarketData, ApiError>;
    /// GET `/api/performance-analytics`. Stub scope: the decoded payload is
    /// summarized to the log and discarded.
    async fn performance_analytics(&self) -> Result<(), ApiError>;
    /// POST `/api/generate-campaign`.
    async fn generate_campaign(&self, payload: &CampaignPayload)
        -> Result<CampaignData, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

impl ApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base_url = reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }

    async fn get_data<T: DeserializeOwned + Default>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.endpoint(path)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = Self::read_body(response).await?;
        decode_envelope(&body)
    }
}

#[async_trait::async_trait]
impl BackendApi for ApiClient {
    async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .get(self.endpoint("/api/health")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = Self::read_body(response).await?;
        let health: HealthBody =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        if health.status == HEALTHY_SENTINEL {
            Ok(())
        } else {
            Err(ApiError::Service {
                message: Some(format!("backend reported status \"{}\"", health.status)),
            })
        }
    }

    async fn market_intelligence(&self) -> Result<MarketData, ApiError> {
        self.get_data("/api/market-intelligence").await
    }

    async fn performance_analytics(&self) -> Result<(), ApiError> {
        let payload: serde_json::Value = self.get_data("/api/performance-analytics").await?;
        dash_info!(
            "performance analytics received ({} top-level keys)",
            payload.as_object().map(|map| map.len()).unwrap_or(0)
        );
        Ok(())
    }

    async fn generate_campaign(
        &self,
        payload: &CampaignPayload,
    ) -> Result<CampaignData, ApiError> {
        let body = serde_json::to_vec(payload).map_err(|err| ApiError::Decode(err.to_string()))?;
        let response = self
            .http
            .post(self.endpoint("/api/generate-campaign")?)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = Self::read_body(response).await?;
        decode_envelope(&body)
    }
}

/// Decodes the standard envelope and unwraps its payload. A status other
/// than the success sentinel is a service failure even on HTTP 200.
fn decode_envelope<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    if envelope.status != SUCCESS_SENTINEL {
        return Err(ApiError::Service {
            message: envelope.message,
        });
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("envelope is missing its data field".to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}
