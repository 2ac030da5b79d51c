#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET the health endpoint.
    CheckHealth,
    /// GET the market-intelligence snapshot.
    FetchMarketIntelligence,
    /// GET performance analytics (stub scope: attempt and log).
    FetchPerformanceAnalytics,
    /// POST the campaign request.
    SubmitCampaign {
        request: crate::RequestId,
        payload: crate::CampaignRequest,
    },
    /// Start the repeating progress ticker for the current busy state.
    StartTicker { timer: crate::TimerId },
    /// Schedule auto-dismissal of a notice.
    StartDismissal {
        kind: crate::NoticeKind,
        timer: crate::TimerId,
    },
    /// Cancel a previously started timer. Unknown ids are a no-op.
    CancelTimer { timer: crate::TimerId },
}
