//! Campaign dashboard core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{CampaignFailure, Msg};
pub use state::{
    impact_label, AppState, CampaignContent, CampaignForm, CampaignOutcome, CampaignRequest,
    CityStats, HealthStatus, MarketSnapshot, NoticeKind, Predictions, RequestId, Section, TimerId,
    ERROR_DISMISS_AFTER, GENERATE_FAILED_FALLBACK, PROGRESS_STEPS, SUCCESS_DISMISS_AFTER,
    TICKER_INTERVAL,
};
pub use update::update;
pub use view_model::{
    AppViewModel, KpiView, RegionsView, TrendCardView, GENERATE_BUSY_LABEL, GENERATE_LABEL,
};
