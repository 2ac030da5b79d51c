//! Campaign client: typed HTTP access to the backend contract and the
//! thread boundary that runs it off the UI loop.
mod client;
mod handle;
mod types;

pub use client::{ApiClient, BackendApi, ClientSettings, HEALTHY_SENTINEL, SUCCESS_SENTINEL};
pub use handle::{ClientCommand, ClientEvent, ClientHandle};
pub use types::{
    ApiError, CampaignData, CampaignPayload, CityStatsData, ContentData, Envelope, MarketData,
    PredictionsData, RequestToken,
};
