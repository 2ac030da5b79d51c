use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use campaign_client::{
    ApiError, BackendApi, CampaignData, CampaignPayload, ClientCommand, ClientEvent, ClientHandle,
    MarketData,
};
use campaign_core::{
    CampaignContent, CampaignFailure, CampaignOutcome, CityStats, Effect, MarketSnapshot, Msg,
    NoticeKind, Predictions, TimerId, ERROR_DISMISS_AFTER, PROGRESS_STEPS, SUCCESS_DISMISS_AFTER,
    TICKER_INTERVAL,
};
use dash_logging::{dash_info, dash_warn};

/// Executes core effects: backend calls go to the client worker, timers run
/// on cancellable threads, and everything reports back as messages.
pub(crate) struct EffectRunner {
    client: ClientHandle,
    msg_tx: mpsc::Sender<Msg>,
    timers: TimerRegistry,
}

impl EffectRunner {
    pub(crate) fn new(api: Arc<dyn BackendApi>, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (client, events) = ClientHandle::new(api);
        spawn_event_loop(events, msg_tx.clone());
        Self {
            client,
            msg_tx,
            timers: TimerRegistry::default(),
        }
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CheckHealth => self.client.send(ClientCommand::CheckHealth),
                Effect::FetchMarketIntelligence => {
                    self.client.send(ClientCommand::FetchMarketIntelligence)
                }
                Effect::FetchPerformanceAnalytics => {
                    self.client.send(ClientCommand::FetchPerformanceAnalytics)
                }
                Effect::SubmitCampaign { request, payload } => {
                    let payload = CampaignPayload {
                        course: payload.course,
                        city: payload.city,
                        campaign_type: payload.campaign_type,
                        trend_integration: payload.trend_integration,
                        localization: payload.localization,
                    };
                    dash_info!("submitting campaign request {}: {}", request, payload);
                    self.client
                        .send(ClientCommand::GenerateCampaign { request, payload });
                }
                Effect::StartTicker { timer } => {
                    // The initial message is already visible; the ticker
                    // advances through the remaining four and exits.
                    let msg_tx = self.msg_tx.clone();
                    self.timers.start(
                        timer,
                        TICKER_INTERVAL,
                        PROGRESS_STEPS.len() - 1,
                        msg_tx,
                        move || Msg::TickerTick { timer },
                    );
                }
                Effect::StartDismissal { kind, timer } => {
                    let delay = dismiss_delay(kind);
                    let msg_tx = self.msg_tx.clone();
                    self.timers
                        .start(timer, delay, 1, msg_tx, move || Msg::NoticeExpired {
                            kind,
                            timer,
                        });
                }
                Effect::CancelTimer { timer } => self.timers.cancel(timer),
            }
        }
    }
}

/// Errors linger longer than success confirmations before auto-dismissal.
fn dismiss_delay(kind: NoticeKind) -> Duration {
    match kind {
        NoticeKind::Error => ERROR_DISMISS_AFTER,
        NoticeKind::Success => SUCCESS_DISMISS_AFTER,
    }
}

/// Owns every live timer thread. Each timer is uniquely identified, can be
/// cancelled exactly once, and removes itself from the registry when done.
#[derive(Default)]
struct TimerRegistry {
    alive: Arc<Mutex<HashMap<TimerId, Arc<AtomicBool>>>>,
}

impl TimerRegistry {
    fn start<F>(
        &self,
        timer: TimerId,
        interval: Duration,
        ticks: usize,
        msg_tx: mpsc::Sender<Msg>,
        make_msg: F,
    ) where
        F: Fn() -> Msg + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        {
            let mut alive = self.alive.lock().expect("lock timer registry");
            // Ids are allocated monotonically by the core, so a collision
            // here would be a bug; the stale flag is dropped if it happens.
            alive.insert(timer, cancelled.clone());
        }

        let alive = self.alive.clone();
        thread::spawn(move || {
            for _ in 0..ticks {
                thread::sleep(interval);
                if cancelled.load(Ordering::Relaxed) {
                    break;
                }
                if msg_tx.send(make_msg()).is_err() {
                    break;
                }
            }
            alive.lock().expect("lock timer registry").remove(&timer);
        });
    }

    fn cancel(&self, timer: TimerId) {
        let mut alive = self.alive.lock().expect("lock timer registry");
        if let Some(flag) = alive.remove(&timer) {
            flag.store(true, Ordering::Relaxed);
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<ClientEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            let msg = match event {
                ClientEvent::Health(result) => {
                    if let Err(err) = &result {
                        dash_warn!("health check failed: {err}");
                    }
                    Msg::HealthChecked(result.map_err(|err| err.to_string()))
                }
                ClientEvent::Market(result) => Msg::MarketLoaded(
                    result
                        .map(map_snapshot)
                        .map_err(|err| {
                            dash_warn!("market intelligence fetch failed: {err}");
                            err.to_string()
                        }),
                ),
                ClientEvent::Analytics(result) => {
                    match &result {
                        Ok(()) => dash_info!("performance analytics loaded"),
                        Err(err) => dash_warn!("performance analytics failed: {err}"),
                    }
                    Msg::AnalyticsLoaded(result.map_err(|err| err.to_string()))
                }
                ClientEvent::Campaign { request, result } => Msg::CampaignResolved {
                    request,
                    result: result.map(map_outcome).map_err(campaign_failure),
                },
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn map_snapshot(data: MarketData) -> MarketSnapshot {
    MarketSnapshot {
        city_performance: data
            .city_performance
            .into_iter()
            .map(|(city, stats)| {
                (
                    city,
                    CityStats {
                        positions_available: stats.positions_available,
                        companies_hiring: stats.companies_hiring,
                    },
                )
            })
            .collect(),
        total_companies: data.total_companies,
    }
}

fn map_outcome(data: CampaignData) -> CampaignOutcome {
    CampaignOutcome {
        content: CampaignContent {
            email_subject: data.content.email_subject,
            email_body: data.content.email_body,
            social_post: data.content.social_post,
            regional_version: data.content.regional_version,
        },
        predictions: data.predictions.map(|predictions| Predictions {
            ctr: predictions.ctr,
            conversion_rate: predictions.conversion_rate,
            roas: predictions.roas,
            cost_per_conversion: predictions.cost_per_conversion,
        }),
        image_url: data.image_url,
    }
}

/// Only a service failure carries a server message; connectivity failures
/// fall back to the core's generic retry text.
fn campaign_failure(err: ApiError) -> CampaignFailure {
    dash_warn!("campaign generation failed: {err}");
    match err {
        ApiError::Service { message } => CampaignFailure {
            server_message: message,
        },
        _ => CampaignFailure::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_notices_linger_five_seconds_and_success_three() {
        assert_eq!(dismiss_delay(NoticeKind::Error), Duration::from_secs(5));
        assert_eq!(dismiss_delay(NoticeKind::Success), Duration::from_secs(3));
    }
}
