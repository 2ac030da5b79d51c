use std::sync::Once;

use campaign_core::{update, AppState, Effect, Msg, NoticeKind, TimerId};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dash_logging::initialize_for_tests);
}

/// Drives the state into showing an error notice and returns its timer.
fn show_validation_error(state: AppState) -> (AppState, TimerId) {
    let (state, effects) = update(state, Msg::GenerateClicked);
    let timer = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::StartDismissal {
                kind: NoticeKind::Error,
                timer,
            } => Some(*timer),
            _ => None,
        })
        .expect("dismissal effect");
    (state, timer)
}

#[test]
fn expiry_clears_the_notice_it_owns() {
    init_logging();
    let (state, timer) = show_validation_error(AppState::new());
    assert!(state.view().error_notice.is_some());

    let (state, effects) = update(
        state,
        Msg::NoticeExpired {
            kind: NoticeKind::Error,
            timer,
        },
    );

    assert!(effects.is_empty());
    assert!(state.view().error_notice.is_none());
}

#[test]
fn replacement_cancels_the_superseded_dismissal_timer() {
    init_logging();
    let (state, first_timer) = show_validation_error(AppState::new());
    let (state, effects) = update(state, Msg::GenerateClicked);

    // The new notice re-renders the singleton slot and restarts its timer.
    assert!(effects.contains(&Effect::CancelTimer { timer: first_timer }));
    let second_timer = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::StartDismissal {
                kind: NoticeKind::Error,
                timer,
            } => Some(*timer),
            _ => None,
        })
        .expect("dismissal effect");
    assert_ne!(second_timer, first_timer);

    // The stale expiry must not tear down the replacement.
    let (state, _) = update(
        state,
        Msg::NoticeExpired {
            kind: NoticeKind::Error,
            timer: first_timer,
        },
    );
    assert!(state.view().error_notice.is_some());
}

#[test]
fn manual_close_removes_the_notice_and_cancels_its_timer() {
    init_logging();
    let (state, timer) = show_validation_error(AppState::new());
    let (state, effects) = update(
        state,
        Msg::NoticeDismissed {
            kind: NoticeKind::Error,
        },
    );

    assert_eq!(effects, vec![Effect::CancelTimer { timer }]);
    assert!(state.view().error_notice.is_none());
}

#[test]
fn closing_an_empty_slot_is_a_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::NoticeDismissed {
            kind: NoticeKind::Success,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next.view(), state.view());
}

#[test]
fn error_and_success_slots_are_independent() {
    init_logging();
    let (state, _) = show_validation_error(AppState::new());

    let view = state.view();
    assert!(view.error_notice.is_some());
    assert!(view.success_notice.is_none());

    let (state, _) = update(
        state,
        Msg::NoticeDismissed {
            kind: NoticeKind::Success,
        },
    );
    assert!(state.view().error_notice.is_some());
}
