/// A generation failure as reported by the shell. The server-provided
/// message is surfaced when present; otherwise the fixed fallback is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CampaignFailure {
    pub server_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// First message dispatched by the shell; kicks off initialization.
    AppStarted,
    /// Health check resolved. Any failure (network, non-healthy status,
    /// malformed body) arrives as `Err` with a display message.
    HealthChecked(Result<(), String>),
    /// Market intelligence fetch resolved.
    MarketLoaded(Result<crate::MarketSnapshot, String>),
    /// Performance analytics fetch resolved (stub scope: attempt and log).
    AnalyticsLoaded(Result<(), String>),
    /// User asked for a fresh market snapshot.
    MarketRefreshRequested,
    /// Generator form edits.
    CourseChanged(String),
    CityChanged(String),
    CampaignTypeChanged(String),
    TrendIntegrationToggled,
    LocalizationChanged(String),
    /// User pressed the generate trigger.
    GenerateClicked,
    /// The step ticker fired.
    TickerTick { timer: crate::TimerId },
    /// The generation request resolved.
    CampaignResolved {
        request: crate::RequestId,
        result: Result<crate::CampaignOutcome, CampaignFailure>,
    },
    /// A notice's auto-dismiss timer fired.
    NoticeExpired {
        kind: crate::NoticeKind,
        timer: crate::TimerId,
    },
    /// User closed a notice manually.
    NoticeDismissed { kind: crate::NoticeKind },
    /// User navigated to a page section by id.
    SectionSelected(String),
    /// Fallback for placeholder wiring.
    NoOp,
}
