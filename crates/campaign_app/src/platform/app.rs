use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use campaign_client::{ApiClient, BackendApi};
use campaign_core::{update, AppState, AppViewModel, CampaignForm, Msg, NoticeKind, Section};
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dash_logging::dash_info;

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use super::ui::constants::{CAMPAIGN_TYPES, CITIES, COURSES, LOCALIZATION_TIERS};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// How long the results border stays highlighted after fresh content lands.
const RESULTS_FLASH: Duration = Duration::from_millis(450);

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load(Path::new(config::CONFIG_FILENAME));
    logging::initialize(
        Path::new(&config.log_file),
        logging::parse_level(&config.log_level),
    );
    dash_info!("Starting campaign dashboard against {}", config.base_url);

    let api = ApiClient::new(config.client_settings()).context("building backend client")?;
    let api: Arc<dyn BackendApi> = Arc::new(api);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(api, msg_tx);

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &runner, &msg_rx);
    ratatui::restore();
    result
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> anyhow::Result<()> {
    let mut state = AppState::new();
    let mut shell = Shell::default();
    let mut redraw = true;

    dispatch(&mut state, runner, &mut shell, Msg::AppStarted);

    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            dispatch(&mut state, runner, &mut shell, msg);
        }

        // The flash decays on wall-clock time, not on a state change, so
        // keep drawing while it is active.
        if state.consume_dirty() || shell.results_highlighted() {
            redraw = true;
        }
        if redraw {
            let view = state.view();
            terminal.draw(|frame| ui::render::render(frame, &view, &shell))?;
            redraw = false;
        }

        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_quit(&key) {
                        dash_info!("Quit requested");
                        return Ok(());
                    }
                    if handle_key(&key, &mut state, runner, &mut shell) {
                        redraw = true;
                    }
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }
    }
}

fn dispatch(state: &mut AppState, runner: &EffectRunner, shell: &mut Shell, msg: Msg) {
    let resolved_ok = matches!(&msg, Msg::CampaignResolved { result: Ok(_), .. });
    let was_busy = resolved_ok && state.view().busy;

    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;

    // A stale resolution leaves the busy state untouched and must not flash.
    if was_busy && !state.view().busy {
        shell.note_results_updated();
    }
    runner.run(effects);
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Maps a key press to a message (or a shell-local focus move). Returns
/// true when the screen needs a redraw that no message will trigger.
fn handle_key(
    key: &KeyEvent,
    state: &mut AppState,
    runner: &EffectRunner,
    shell: &mut Shell,
) -> bool {
    match key.code {
        KeyCode::Char('1') => {
            dispatch(state, runner, shell, section_msg(Section::Generator));
            false
        }
        KeyCode::Char('2') => {
            dispatch(state, runner, shell, section_msg(Section::Intelligence));
            false
        }
        KeyCode::Char('3') => {
            dispatch(state, runner, shell, section_msg(Section::Analytics));
            false
        }
        KeyCode::Tab | KeyCode::Down => {
            shell.focus_next();
            true
        }
        KeyCode::BackTab | KeyCode::Up => {
            shell.focus_prev();
            true
        }
        KeyCode::Left => {
            let msg = cycle_msg(&state.view().form, shell.focus, -1);
            dispatch(state, runner, shell, msg);
            false
        }
        KeyCode::Right => {
            let msg = cycle_msg(&state.view().form, shell.focus, 1);
            dispatch(state, runner, shell, msg);
            false
        }
        KeyCode::Char(' ') => {
            dispatch(state, runner, shell, Msg::TrendIntegrationToggled);
            false
        }
        KeyCode::Enter | KeyCode::Char('g') => {
            dispatch(state, runner, shell, Msg::GenerateClicked);
            false
        }
        KeyCode::Char('r') => {
            dispatch(state, runner, shell, Msg::MarketRefreshRequested);
            false
        }
        KeyCode::Esc => {
            if let Some(kind) = visible_notice(&state.view()) {
                dispatch(state, runner, shell, Msg::NoticeDismissed { kind });
            }
            false
        }
        _ => false,
    }
}

fn section_msg(section: Section) -> Msg {
    Msg::SectionSelected(section.id().to_string())
}

/// Errors take dismissal priority over success notices.
fn visible_notice(view: &AppViewModel) -> Option<NoticeKind> {
    if view.error_notice.is_some() {
        Some(NoticeKind::Error)
    } else if view.success_notice.is_some() {
        Some(NoticeKind::Success)
    } else {
        None
    }
}

fn cycle_msg(form: &CampaignForm, focus: FormField, delta: isize) -> Msg {
    match focus {
        FormField::Course => Msg::CourseChanged(cycle(&COURSES, &form.course, delta)),
        FormField::City => Msg::CityChanged(cycle(&CITIES, &form.city, delta)),
        FormField::CampaignType => {
            Msg::CampaignTypeChanged(cycle(&CAMPAIGN_TYPES, &form.campaign_type, delta))
        }
        FormField::Localization => {
            Msg::LocalizationChanged(cycle(&LOCALIZATION_TIERS, &form.localization, delta))
        }
        FormField::TrendIntegration => Msg::TrendIntegrationToggled,
    }
}

/// Steps through an option list, wrapping at both ends. An unset or
/// unknown current value starts from the nearest end.
fn cycle(options: &[&str], current: &str, delta: isize) -> String {
    let len = options.len() as isize;
    let next = match options.iter().position(|option| *option == current) {
        Some(index) => (index as isize + delta).rem_euclid(len) as usize,
        None if delta >= 0 => 0,
        None => options.len() - 1,
    };
    options[next].to_string()
}

/// State owned by the terminal shell rather than the core: which form
/// row has focus and the short highlight after results arrive.
#[derive(Debug, Default)]
pub(crate) struct Shell {
    pub(crate) focus: FormField,
    pub(crate) last_generated: Option<DateTime<Local>>,
    results_flash: Option<Instant>,
}

impl Shell {
    fn note_results_updated(&mut self) {
        self.results_flash = Some(Instant::now());
        self.last_generated = Some(Local::now());
    }

    pub(crate) fn results_highlighted(&self) -> bool {
        self.results_flash
            .is_some_and(|at| at.elapsed() < RESULTS_FLASH)
    }

    fn focus_next(&mut self) {
        let index = FormField::ALL
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        self.focus = FormField::ALL[(index + 1) % FormField::ALL.len()];
    }

    fn focus_prev(&mut self) {
        let index = FormField::ALL
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        self.focus = FormField::ALL[(index + FormField::ALL.len() - 1) % FormField::ALL.len()];
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FormField {
    #[default]
    Course,
    City,
    CampaignType,
    Localization,
    TrendIntegration,
}

impl FormField {
    pub(crate) const ALL: [FormField; 5] = [
        FormField::Course,
        FormField::City,
        FormField::CampaignType,
        FormField::Localization,
        FormField::TrendIntegration,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            FormField::Course => "Course",
            FormField::City => "Target City",
            FormField::CampaignType => "Campaign Type",
            FormField::Localization => "Localization",
            FormField::TrendIntegration => "Trend Integration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_in_both_directions() {
        assert_eq!(cycle(&COURSES, "AI/ML", -1), "MSc Finance");
        assert_eq!(cycle(&COURSES, "MSc Finance", 1), "AI/ML");
    }

    #[test]
    fn cycle_starts_from_nearest_end_when_unset() {
        assert_eq!(cycle(&CITIES, "", 1), "Bangalore");
        assert_eq!(cycle(&CITIES, "", -1), "Ahmedabad");
    }

    #[test]
    fn focus_cycles_through_every_field_and_back() {
        let mut shell = Shell::default();
        for _ in 0..FormField::ALL.len() {
            shell.focus_next();
        }
        assert_eq!(shell.focus, FormField::Course);
        shell.focus_prev();
        assert_eq!(shell.focus, FormField::TrendIntegration);
    }
}
