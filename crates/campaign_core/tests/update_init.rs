use std::collections::BTreeMap;
use std::sync::Once;

use campaign_core::{
    update, AppState, CityStats, Effect, HealthStatus, MarketSnapshot, Msg, NoticeKind,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dash_logging::initialize_for_tests);
}

fn snapshot_with(city: &str, positions: u64, companies: u64, total: u64) -> MarketSnapshot {
    let mut city_performance = BTreeMap::new();
    city_performance.insert(
        city.to_string(),
        CityStats {
            positions_available: positions,
            companies_hiring: companies,
        },
    );
    MarketSnapshot {
        city_performance,
        total_companies: total,
    }
}

#[test]
fn startup_issues_health_check_first() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::AppStarted);

    assert_eq!(effects, vec![Effect::CheckHealth]);
    assert_eq!(state.view().health, HealthStatus::Unknown);
}

#[test]
fn healthy_backend_continues_with_market_fetch() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, effects) = update(state, Msg::HealthChecked(Ok(())));

    assert_eq!(state.view().health, HealthStatus::Online);
    assert_eq!(effects, vec![Effect::FetchMarketIntelligence]);
}

#[test]
fn unhealthy_backend_aborts_initialization() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AppStarted);
    let (state, effects) = update(
        state,
        Msg::HealthChecked(Err("backend reported status \"unhealthy\"".to_string())),
    );

    let view = state.view();
    assert_eq!(view.health, HealthStatus::Offline);
    assert!(view
        .error_notice
        .as_deref()
        .unwrap()
        .starts_with("Backend offline"));
    // The market fetch must never be attempted.
    assert!(!effects.contains(&Effect::FetchMarketIntelligence));
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, Effect::StartDismissal { kind: NoticeKind::Error, .. })));
}

#[test]
fn market_snapshot_replaces_and_continues_with_analytics() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::HealthChecked(Ok(())));
    let (state, effects) = update(
        state,
        Msg::MarketLoaded(Ok(snapshot_with("Bangalore", 6195, 44, 472))),
    );

    assert_eq!(effects, vec![Effect::FetchPerformanceAnalytics]);

    let view = state.view();
    assert_eq!(view.trend_cards.len(), 1);
    assert_eq!(view.trend_cards[0].city, "Bangalore");
    assert_eq!(view.trend_cards[0].positions_available, 6195);
    assert_eq!(view.trend_cards[0].impact, "Very High Impact");

    let kpis = view.kpis.unwrap();
    assert_eq!(kpis.active_markets, 1);
    assert_eq!(kpis.total_companies, 472);
    assert_eq!(kpis.total_positions, 6195);
}

#[test]
fn market_failure_is_non_fatal_and_keeps_prior_snapshot() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::HealthChecked(Ok(())));
    let (state, _) = update(
        state,
        Msg::MarketLoaded(Ok(snapshot_with("Mumbai", 800, 30, 120))),
    );
    let (state, effects) = update(
        state,
        Msg::MarketLoaded(Err("http status 500".to_string())),
    );

    // Initialization continues past a market failure.
    assert!(effects.contains(&Effect::FetchPerformanceAnalytics));

    let view = state.view();
    assert!(view.error_notice.is_some());
    assert_eq!(view.trend_cards.len(), 1);
    assert_eq!(view.trend_cards[0].city, "Mumbai");
    assert_eq!(view.trend_cards[0].impact, "High Impact");
}

#[test]
fn refresh_is_attempted_regardless_of_health() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::HealthChecked(Err("connection refused".to_string())),
    );
    let (_state, effects) = update(state, Msg::MarketRefreshRequested);

    assert_eq!(effects, vec![Effect::FetchMarketIntelligence]);
}

#[test]
fn analytics_result_is_log_only() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::AnalyticsLoaded(Err("timeout".into())));

    assert_eq!(next.view(), state.view());
    assert!(effects.is_empty());
}
