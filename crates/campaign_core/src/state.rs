use std::collections::BTreeMap;
use std::time::Duration;

/// Identifier for a timer owned by the shell on behalf of the core.
pub type TimerId = u64;
/// Identifier for an in-flight generation request.
pub type RequestId = u64;

/// Fixed progress messages shown while a generation request is in flight.
pub const PROGRESS_STEPS: [&str; 5] = [
    "Analyzing market data…",
    "Generating AI content…",
    "Applying localization…",
    "Optimizing performance…",
    "Finalizing campaign…",
];

/// Interval between progress-message advances.
pub const TICKER_INTERVAL: Duration = Duration::from_millis(1500);
/// Auto-dismiss delay for error notices.
pub const ERROR_DISMISS_AFTER: Duration = Duration::from_secs(5);
/// Auto-dismiss delay for success notices.
pub const SUCCESS_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Shown when generation fails without a server-provided message.
pub const GENERATE_FAILED_FALLBACK: &str = "Campaign generation failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityStats {
    pub positions_available: u64,
    pub companies_hiring: u64,
}

/// Last-fetched market intelligence dataset, replaced wholesale on each
/// successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarketSnapshot {
    pub city_performance: BTreeMap<String, CityStats>,
    pub total_companies: u64,
}

/// Impact tier for a trend card, derived from open positions in a city.
pub fn impact_label(positions_available: u64) -> &'static str {
    if positions_available > 1000 {
        "Very High Impact"
    } else if positions_available > 500 {
        "High Impact"
    } else if positions_available > 100 {
        "Moderate Impact"
    } else {
        "Emerging Market"
    }
}

/// Current values of the generator form controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignForm {
    pub course: String,
    pub city: String,
    pub campaign_type: String,
    pub trend_integration: bool,
    pub localization: String,
}

impl Default for CampaignForm {
    fn default() -> Self {
        Self {
            course: String::new(),
            city: String::new(),
            campaign_type: String::new(),
            trend_integration: true,
            localization: "basic".to_string(),
        }
    }
}

impl CampaignForm {
    /// Local validation: course, city and campaign type must be selected.
    pub fn is_complete(&self) -> bool {
        !self.course.is_empty() && !self.city.is_empty() && !self.campaign_type.is_empty()
    }

    /// Snapshots the form into a request payload.
    pub fn to_request(&self) -> CampaignRequest {
        CampaignRequest {
            course: self.course.clone(),
            city: self.city.clone(),
            campaign_type: self.campaign_type.clone(),
            trend_integration: self.trend_integration,
            localization: self.localization.clone(),
        }
    }
}

/// One submission's worth of form values, discarded after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRequest {
    pub course: String,
    pub city: String,
    pub campaign_type: String,
    pub trend_integration: bool,
    pub localization: String,
}

/// Generated content fields, each independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CampaignContent {
    pub email_subject: Option<String>,
    pub email_body: Option<String>,
    pub social_post: Option<String>,
    pub regional_version: Option<String>,
}

/// Predicted performance metrics, preformatted by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predictions {
    pub ctr: String,
    pub conversion_rate: String,
    pub roas: String,
    pub cost_per_conversion: String,
}

/// Successful generation response, held only for one merge pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CampaignOutcome {
    pub content: CampaignContent,
    pub predictions: Option<Predictions>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// Navigable page sections. Selecting an id that matches no section
/// leaves nothing visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Generator,
    Intelligence,
    Analytics,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Generator, Section::Intelligence, Section::Analytics];

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "generator" => Some(Section::Generator),
            "intelligence" => Some(Section::Intelligence),
            "analytics" => Some(Section::Analytics),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Section::Generator => "generator",
            Section::Intelligence => "intelligence",
            Section::Analytics => "analytics",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Generator => "Generator",
            Section::Intelligence => "Market Intelligence",
            Section::Analytics => "Analytics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub(crate) text: String,
    pub(crate) timer: TimerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Busy {
    pub(crate) request: RequestId,
    pub(crate) ticker: TimerId,
    pub(crate) step: usize,
}

/// Result regions keep their last values; an absent field in a new
/// outcome never blanks the corresponding region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Regions {
    pub(crate) email_subject: Option<String>,
    pub(crate) email_body: Option<String>,
    pub(crate) social_post: Option<String>,
    pub(crate) regional_version: Option<String>,
    pub(crate) predictions: Option<Predictions>,
    pub(crate) image_url: Option<String>,
    pub(crate) revealed: bool,
}

/// Outcome of applying a ticker tick to the busy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProgressAdvance {
    Advanced,
    ReachedLast,
    Stale,
}

/// The controller's whole mutable state. All mutation funnels through
/// `update`; presentation code only sees the read-only view model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    health: HealthStatus,
    market: Option<MarketSnapshot>,
    form: CampaignForm,
    busy: Option<Busy>,
    regions: Regions,
    error_notice: Option<Notice>,
    success_notice: Option<Notice>,
    active_section: Option<Section>,
    next_timer: TimerId,
    next_request: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_section: Some(Section::Generator),
            ..Self::default()
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn health(&self) -> HealthStatus {
        self.health
    }

    pub(crate) fn set_health(&mut self, health: HealthStatus) {
        self.health = health;
        self.mark_dirty();
    }

    pub(crate) fn market(&self) -> Option<&MarketSnapshot> {
        self.market.as_ref()
    }

    pub(crate) fn replace_market(&mut self, snapshot: MarketSnapshot) {
        self.market = Some(snapshot);
        self.mark_dirty();
    }

    pub(crate) fn form(&self) -> &CampaignForm {
        &self.form
    }

    pub(crate) fn form_mut(&mut self) -> &mut CampaignForm {
        self.mark_dirty();
        &mut self.form
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    pub(crate) fn busy(&self) -> Option<&Busy> {
        self.busy.as_ref()
    }

    pub(crate) fn alloc_timer(&mut self) -> TimerId {
        self.next_timer += 1;
        self.next_timer
    }

    pub(crate) fn alloc_request(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    pub(crate) fn enter_busy(&mut self, request: RequestId, ticker: TimerId) {
        self.busy = Some(Busy {
            request,
            ticker,
            step: 0,
        });
        self.mark_dirty();
    }

    /// Advances the progress step if the tick belongs to the live ticker.
    pub(crate) fn advance_progress(&mut self, timer: TimerId) -> ProgressAdvance {
        let Some(busy) = self.busy.as_mut() else {
            return ProgressAdvance::Stale;
        };
        if busy.ticker != timer || busy.step + 1 >= PROGRESS_STEPS.len() {
            return ProgressAdvance::Stale;
        }
        busy.step += 1;
        let reached_last = busy.step + 1 == PROGRESS_STEPS.len();
        self.mark_dirty();
        if reached_last {
            ProgressAdvance::ReachedLast
        } else {
            ProgressAdvance::Advanced
        }
    }

    /// Leaves the busy state if `request` is the live one, returning the
    /// ticker timer to cancel. `None` means the resolution was stale.
    pub(crate) fn exit_busy(&mut self, request: RequestId) -> Option<TimerId> {
        match self.busy {
            Some(busy) if busy.request == request => {
                self.busy = None;
                self.mark_dirty();
                Some(busy.ticker)
            }
            _ => None,
        }
    }

    /// Merges a successful outcome into the result regions. Absent fields
    /// leave the prior region values untouched.
    pub(crate) fn merge_outcome(&mut self, outcome: CampaignOutcome) {
        let regions = &mut self.regions;
        if let Some(text) = outcome.content.email_subject {
            regions.email_subject = Some(text);
        }
        if let Some(text) = outcome.content.email_body {
            regions.email_body = Some(text);
        }
        if let Some(text) = outcome.content.social_post {
            regions.social_post = Some(text);
        }
        if let Some(text) = outcome.content.regional_version {
            regions.regional_version = Some(text);
        }
        if let Some(predictions) = outcome.predictions {
            regions.predictions = Some(predictions);
        }
        if let Some(url) = outcome.image_url {
            regions.image_url = Some(url);
        }
        regions.revealed = true;
        self.mark_dirty();
    }

    pub(crate) fn regions(&self) -> &Regions {
        &self.regions
    }

    fn notice_slot(&mut self, kind: NoticeKind) -> &mut Option<Notice> {
        match kind {
            NoticeKind::Error => &mut self.error_notice,
            NoticeKind::Success => &mut self.success_notice,
        }
    }

    pub(crate) fn notice_text(&self, kind: NoticeKind) -> Option<&str> {
        let slot = match kind {
            NoticeKind::Error => &self.error_notice,
            NoticeKind::Success => &self.success_notice,
        };
        slot.as_ref().map(|notice| notice.text.as_str())
    }

    /// Installs a notice, returning the superseded dismissal timer so the
    /// caller can cancel it.
    pub(crate) fn set_notice(
        &mut self,
        kind: NoticeKind,
        text: String,
        timer: TimerId,
    ) -> Option<TimerId> {
        let previous = self.notice_slot(kind).replace(Notice { text, timer });
        self.mark_dirty();
        previous.map(|notice| notice.timer)
    }

    /// Clears a notice unconditionally (manual close), returning its timer.
    pub(crate) fn clear_notice(&mut self, kind: NoticeKind) -> Option<TimerId> {
        let previous = self.notice_slot(kind).take();
        if previous.is_some() {
            self.mark_dirty();
        }
        previous.map(|notice| notice.timer)
    }

    /// Clears a notice only if it is still owned by `timer` (auto-dismiss).
    pub(crate) fn clear_notice_if(&mut self, kind: NoticeKind, timer: TimerId) -> bool {
        let slot = self.notice_slot(kind);
        match slot {
            Some(notice) if notice.timer == timer => {
                *slot = None;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn active_section(&self) -> Option<Section> {
        self.active_section
    }

    pub(crate) fn set_section(&mut self, section: Option<Section>) {
        self.active_section = section;
        self.mark_dirty();
    }
}
