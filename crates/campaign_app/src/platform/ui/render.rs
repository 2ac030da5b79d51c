//! Ratatui presentation of the view model. Everything here is a pure
//! function of the view model plus shell-local state (focus, flash);
//! no rendering path mutates application state.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use campaign_core::{AppViewModel, HealthStatus, Section, PROGRESS_STEPS};

use crate::platform::app::{FormField, Shell};

pub(crate) fn render(frame: &mut Frame, view: &AppViewModel, shell: &Shell) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, rows[0], view);
    render_tabs(frame, rows[1], view);
    match view.active_section {
        Some(Section::Generator) => render_generator(frame, rows[2], view, shell),
        Some(Section::Intelligence) => render_intelligence(frame, rows[2], view),
        Some(Section::Analytics) => render_analytics(frame, rows[2]),
        None => {}
    }
    render_footer(frame, rows[3]);

    if view.busy {
        render_busy_modal(frame, view);
    }
    render_notices(frame, view);
}

fn render_header(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let health = match view.health {
        HealthStatus::Online => Span::styled("backend: online", Style::default().fg(Color::Green)),
        HealthStatus::Offline => Span::styled("backend: offline", Style::default().fg(Color::Red)),
        HealthStatus::Unknown => Span::styled(
            "backend: checking",
            Style::default().add_modifier(Modifier::DIM),
        ),
    };
    let line = Line::from(vec![
        Span::styled(
            " Campaign Dashboard ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        health,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(index, section)| Line::from(format!("{} {}", index + 1, section.title())))
        .collect();
    let selected = view
        .active_section
        .and_then(|section| Section::ALL.iter().position(|other| *other == section));

    let mut tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    if let Some(selected) = selected {
        tabs = tabs.select(selected);
    }
    frame.render_widget(tabs, area);
}

fn render_generator(frame: &mut Frame, area: Rect, view: &AppViewModel, shell: &Shell) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    render_form(frame, columns[0], view, shell);
    render_results(frame, columns[1], view, shell);
}

fn render_form(frame: &mut Frame, area: Rect, view: &AppViewModel, shell: &Shell) {
    let form = &view.form;
    let mut lines: Vec<Line> = Vec::new();
    for field in FormField::ALL {
        let value = match field {
            FormField::Course => placeholder(&form.course),
            FormField::City => placeholder(&form.city),
            FormField::CampaignType => placeholder(&form.campaign_type),
            FormField::Localization => form.localization.clone(),
            FormField::TrendIntegration => {
                if form.trend_integration {
                    "on".to_string()
                } else {
                    "off".to_string()
                }
            }
        };
        let style = if shell.focus == field {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(" {:<18} {}", field.label(), value),
            style,
        )));
        lines.push(Line::default());
    }

    let generate_style = if view.generate_enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    lines.push(Line::from(Span::styled(
        format!(" [ {} ]", view.generate_label),
        generate_style,
    )));

    let block = Block::default().borders(Borders::ALL).title(" Campaign Setup ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn placeholder(value: &str) -> String {
    if value.is_empty() {
        "(select)".to_string()
    } else {
        value.to_string()
    }
}

fn render_results(frame: &mut Frame, area: Rect, view: &AppViewModel, shell: &Shell) {
    let mut title = " Campaign Results ".to_string();
    if let Some(at) = shell.last_generated {
        title = format!(" Campaign Results (generated {}) ", at.format("%H:%M:%S"));
    }
    let border_style = if shell.results_highlighted() {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !view.regions.revealed {
        frame.render_widget(
            Paragraph::new("Generate a campaign to see results here.")
                .style(Style::default().add_modifier(Modifier::DIM)),
            inner,
        );
        return;
    }

    let regions = &view.regions;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inner);

    render_region(frame, rows[0], "Email Subject", regions.email_subject.as_deref());
    render_region(frame, rows[1], "Email Body", regions.email_body.as_deref());
    render_region(frame, rows[2], "Social Post", regions.social_post.as_deref());
    render_region(
        frame,
        rows[3],
        "Regional Version",
        regions.regional_version.as_deref(),
    );
    render_predictions(frame, rows[4], view);
    render_region(frame, rows[5], "Creative", regions.image_url.as_deref());
}

fn render_region(frame: &mut Frame, area: Rect, title: &str, text: Option<&str>) {
    let (content, style) = match text {
        Some(text) => (text, Style::default()),
        None => ("-", Style::default().add_modifier(Modifier::DIM)),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "));
    frame.render_widget(
        Paragraph::new(content)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn render_predictions(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let predictions = view.regions.predictions.as_ref();
    let slots = [
        ("CTR", predictions.map(|p| p.ctr.as_str())),
        ("Conversion", predictions.map(|p| p.conversion_rate.as_str())),
        ("ROAS", predictions.map(|p| p.roas.as_str())),
        ("Cost/Conv", predictions.map(|p| p.cost_per_conversion.as_str())),
    ];
    for (cell, (label, value)) in cells.iter().zip(slots) {
        render_region(frame, *cell, label, value);
    }
}

fn render_intelligence(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    match view.kpis {
        Some(kpis) => {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(34),
                    Constraint::Percentage(33),
                    Constraint::Percentage(33),
                ])
                .split(rows[0]);
            render_kpi(frame, cells[0], "Active Markets", kpis.active_markets as u64);
            render_kpi(frame, cells[1], "Companies Tracked", kpis.total_companies);
            render_kpi(frame, cells[2], "Open Positions", kpis.total_positions);
        }
        None => {
            frame.render_widget(
                Paragraph::new("No market snapshot yet. Press r to refresh.")
                    .style(Style::default().add_modifier(Modifier::DIM))
                    .block(Block::default().borders(Borders::ALL)),
                rows[0],
            );
        }
    }

    let lines: Vec<Line> = view
        .trend_cards
        .iter()
        .map(|card| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<14}", card.city),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "{} positions, {} companies hiring  ",
                    card.positions_available, card.companies_hiring
                )),
                Span::styled(card.impact, Style::default().fg(impact_color(card.impact))),
            ])
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title(" City Trends ");
    frame.render_widget(Paragraph::new(lines).block(block), rows[1]);
}

fn render_kpi(frame: &mut Frame, area: Rect, label: &str, value: u64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {label} "));
    frame.render_widget(
        Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(block),
        area,
    );
}

fn impact_color(impact: &str) -> Color {
    match impact {
        "Very High Impact" => Color::LightGreen,
        "High Impact" => Color::Green,
        "Moderate Impact" => Color::Yellow,
        _ => Color::Gray,
    }
}

fn render_analytics(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Analytics ");
    frame.render_widget(
        Paragraph::new(
            "Performance analytics is fetched in the background at startup.\n\
             Results are recorded in dashboard.log.",
        )
        .wrap(Wrap { trim: true })
        .block(block),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = " 1/2/3 section  Tab focus  Left/Right change  Space trends  \
                 Enter generate  r refresh  Esc dismiss  q quit";
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().add_modifier(Modifier::DIM)),
        area,
    );
}

fn render_busy_modal(frame: &mut Frame, view: &AppViewModel) {
    let area = centered_rect(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let step = PROGRESS_STEPS
        .iter()
        .position(|message| *message == view.progress_message)
        .unwrap_or(0)
        + 1;
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            view.progress_message,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("step {step} of {}", PROGRESS_STEPS.len()),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Generating Campaign ");
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_notices(frame: &mut Frame, view: &AppViewModel) {
    let mut offset = 0;
    if let Some(text) = &view.error_notice {
        render_notice(frame, text, Color::Red, offset);
        offset += 5;
    }
    if let Some(text) = &view.success_notice {
        render_notice(frame, text, Color::Green, offset);
    }
}

fn render_notice(frame: &mut Frame, text: &str, color: Color, offset: u16) {
    let area = top_right_rect(44, 5, offset, frame.area());
    if area.height == 0 {
        return;
    }
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(" notice (Esc to close) ");
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn top_right_rect(width: u16, height: u16, offset_y: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let y = area.y + 1 + offset_y;
    if y >= area.y + area.height {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let height = height.min(area.height - (y - area.y));
    Rect {
        x: area.x + area.width - width,
        y,
        width,
        height,
    }
}
