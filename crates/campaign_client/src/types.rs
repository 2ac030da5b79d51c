use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Correlates a generation request with its eventual event.
pub type RequestToken = u64;

/// Failure surface for all backend calls. Any response whose envelope does
/// not indicate success is a failure regardless of HTTP status code, and
/// non-2xx HTTP, timeouts, and JSON-parse failures all land here too.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {0}")]
    Http(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    /// Backend answered but reported failure. Carries the server-provided
    /// message when one was present in the envelope.
    #[error("{}", message.as_deref().unwrap_or("backend reported failure"))]
    Service { message: Option<String> },
}

/// Standard response wrapper used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CityStatsData {
    pub positions_available: u64,
    pub companies_hiring: u64,
}

/// Wire shape of `/api/market-intelligence`. Extra per-city fields are
/// ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct MarketData {
    #[serde(default)]
    pub city_performance: BTreeMap<String, CityStatsData>,
    #[serde(default)]
    pub total_companies: u64,
}

/// POST body for `/api/generate-campaign`; field names are the wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignPayload {
    pub course: String,
    pub city: String,
    pub campaign_type: String,
    pub trend_integration: bool,
    pub localization: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ContentData {
    #[serde(default)]
    pub email_subject: Option<String>,
    #[serde(default)]
    pub email_body: Option<String>,
    #[serde(default)]
    pub social_post: Option<String>,
    #[serde(default)]
    pub regional_version: Option<String>,
}

/// Predicted metrics arrive preformatted for display ("16.8%", "4.2x", …).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PredictionsData {
    pub ctr: String,
    pub conversion_rate: String,
    pub roas: String,
    pub cost_per_conversion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct CampaignData {
    #[serde(default)]
    pub content: ContentData,
    #[serde(default)]
    pub predictions: Option<PredictionsData>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl fmt::Display for CampaignPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} (trends: {}, localization: {})",
            self.course, self.city, self.campaign_type, self.trend_integration, self.localization
        )
    }
}
