use crate::state::ProgressAdvance;
use crate::{
    AppState, CampaignFailure, Effect, HealthStatus, Msg, NoticeKind, Section,
    GENERATE_FAILED_FALLBACK,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted => {
            state.mark_dirty();
            vec![Effect::CheckHealth]
        }
        Msg::HealthChecked(Ok(())) => {
            state.set_health(HealthStatus::Online);
            vec![Effect::FetchMarketIntelligence]
        }
        Msg::HealthChecked(Err(reason)) => {
            // Fatal: the rest of the initialization sequence is abandoned.
            state.set_health(HealthStatus::Offline);
            let mut effects = Vec::new();
            show_notice(
                &mut state,
                &mut effects,
                NoticeKind::Error,
                format!("Backend offline: {reason}"),
            );
            effects
        }
        Msg::MarketLoaded(Ok(snapshot)) => {
            state.replace_market(snapshot);
            vec![Effect::FetchPerformanceAnalytics]
        }
        Msg::MarketLoaded(Err(reason)) => {
            // Non-fatal: the prior snapshot (if any) stays as is and
            // initialization continues.
            let mut effects = Vec::new();
            show_notice(
                &mut state,
                &mut effects,
                NoticeKind::Error,
                format!("Failed to load market intelligence: {reason}"),
            );
            effects.push(Effect::FetchPerformanceAnalytics);
            effects
        }
        Msg::AnalyticsLoaded(_) => Vec::new(),
        Msg::MarketRefreshRequested => {
            // Health is advisory only; refreshes are attempted regardless.
            vec![Effect::FetchMarketIntelligence]
        }
        Msg::CourseChanged(course) => {
            state.form_mut().course = course;
            Vec::new()
        }
        Msg::CityChanged(city) => {
            state.form_mut().city = city;
            Vec::new()
        }
        Msg::CampaignTypeChanged(campaign_type) => {
            state.form_mut().campaign_type = campaign_type;
            Vec::new()
        }
        Msg::TrendIntegrationToggled => {
            let form = state.form_mut();
            form.trend_integration = !form.trend_integration;
            Vec::new()
        }
        Msg::LocalizationChanged(localization) => {
            state.form_mut().localization = localization;
            Vec::new()
        }
        Msg::GenerateClicked => {
            if state.is_busy() {
                // One request at a time; re-entry is rejected outright.
                return (state, Vec::new());
            }
            if !state.form().is_complete() {
                let mut effects = Vec::new();
                show_notice(
                    &mut state,
                    &mut effects,
                    NoticeKind::Error,
                    "Select a course, city, and campaign type before generating.".to_string(),
                );
                return (state, effects);
            }
            let payload = state.form().to_request();
            let request = state.alloc_request();
            let ticker = state.alloc_timer();
            state.enter_busy(request, ticker);
            vec![
                Effect::SubmitCampaign { request, payload },
                Effect::StartTicker { timer: ticker },
            ]
        }
        Msg::TickerTick { timer } => match state.advance_progress(timer) {
            // The fifth message is final; the ticker must not fire again,
            // though the modal stays up until the request resolves.
            ProgressAdvance::ReachedLast => vec![Effect::CancelTimer { timer }],
            ProgressAdvance::Advanced | ProgressAdvance::Stale => Vec::new(),
        },
        Msg::CampaignResolved { request, result } => {
            let Some(ticker) = state.exit_busy(request) else {
                // Stale resolution from a superseded request.
                return (state, Vec::new());
            };
            let mut effects = vec![Effect::CancelTimer { timer: ticker }];
            match result {
                Ok(outcome) => {
                    state.merge_outcome(outcome);
                    show_notice(
                        &mut state,
                        &mut effects,
                        NoticeKind::Success,
                        "Campaign generated successfully.".to_string(),
                    );
                }
                Err(CampaignFailure { server_message }) => {
                    let text =
                        server_message.unwrap_or_else(|| GENERATE_FAILED_FALLBACK.to_string());
                    show_notice(&mut state, &mut effects, NoticeKind::Error, text);
                }
            }
            effects
        }
        Msg::NoticeExpired { kind, timer } => {
            // A stale timer (already replaced or closed) is ignored.
            state.clear_notice_if(kind, timer);
            Vec::new()
        }
        Msg::NoticeDismissed { kind } => match state.clear_notice(kind) {
            Some(timer) => vec![Effect::CancelTimer { timer }],
            None => Vec::new(),
        },
        Msg::SectionSelected(id) => {
            state.set_section(Section::from_id(&id));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Installs a notice in its singleton slot, cancelling the dismissal timer
/// of any notice it replaces and scheduling a fresh one.
fn show_notice(state: &mut AppState, effects: &mut Vec<Effect>, kind: NoticeKind, text: String) {
    let timer = state.alloc_timer();
    if let Some(superseded) = state.set_notice(kind, text, timer) {
        effects.push(Effect::CancelTimer { timer: superseded });
    }
    effects.push(Effect::StartDismissal { kind, timer });
}
