use campaign_core::{update, AppState, Msg, Section};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn generator_section_is_visible_at_startup() {
    let state = AppState::new();
    assert_eq!(state.view().active_section, Some(Section::Generator));
}

#[test]
fn selecting_a_known_section_shows_exactly_that_one() {
    let state = AppState::new();
    let (state, effects) = update(state, Msg::SectionSelected("intelligence".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.view().active_section, Some(Section::Intelligence));

    let (state, _) = update(state, Msg::SectionSelected("analytics".to_string()));
    assert_eq!(state.view().active_section, Some(Section::Analytics));
}

#[test]
fn unknown_section_id_hides_every_section_without_panicking() {
    let state = AppState::new();
    let (state, effects) = update(state, Msg::SectionSelected("no-such-page".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.view().active_section, None);
}

#[test]
fn section_ids_round_trip() {
    for section in Section::ALL {
        assert_eq!(Section::from_id(section.id()), Some(section));
    }
}
