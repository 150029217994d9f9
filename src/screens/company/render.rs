//! Employer screen rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{BarChart, Block, Borders, Gauge, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::screens::actions::{BACK, LOGOUT, POST_ANOTHER, TAB_BASE};
use crate::screens::form::Form;
use crate::screens::{format_amount, render_header};
use crate::state::ApplicationState;
use crate::widgets::{ClickableList, TabBar};

use super::insights::{insights, Insights, FUNNEL_STAGES, WEEK_LABELS};
use super::{DashboardScreen, DASHBOARD_TABS};

pub fn render_company_registration(
    form: &Form,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Hire with RAVYZ", state);
    form.render(f, body, "Company profile", "Continue", click_state);
}

pub fn render_job_posting(
    form: &Form,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Hire with RAVYZ", state);
    form.render(f, body, "Post a job", "Publish", click_state);
}

// ── Dashboard ──────────────────────────────────────────────────────

pub fn render_dashboard(
    screen: &DashboardScreen,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Insights", state);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(6),    // Content
            Constraint::Length(5), // Actions
        ])
        .split(body);

    let mut bar = TabBar::new(" │ ").block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    for (i, label) in DASHBOARD_TABS.iter().enumerate() {
        let style = if i == screen.tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        bar = bar.tab(*label, style, TAB_BASE + i as u16);
    }
    bar.render(f, chunks[0], &mut click_state.borrow_mut());

    let data = insights(state.job_posting.as_ref());
    match screen.tab {
        0 => render_overview(state, &data, f, chunks[1]),
        1 => render_candidates(&data, f, chunks[1]),
        _ => render_funnel(&data, f, chunks[1]),
    }

    render_actions(f, chunks[2], click_state);
}

fn render_overview(state: &ApplicationState, data: &Insights, f: &mut Frame, area: Rect) {
    let is_narrow = is_narrow_layout(area.width);
    let chunks = Layout::default()
        .direction(if is_narrow {
            Direction::Vertical
        } else {
            Direction::Horizontal
        })
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let label = Style::default().fg(Color::Gray);
    let mut lines = Vec::new();
    if let Some(company) = &state.company {
        lines.push(Line::from(Span::styled(
            format!(" {}", company.name),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {} · {} people", company.sector, company.size.label()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    match &state.job_posting {
        Some(posting) => {
            lines.push(Line::from(vec![
                Span::styled(" Opening: ", label),
                Span::styled(
                    posting.title.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled(" Where:   ", label),
                Span::raw(format!("{} · {}", posting.city, posting.work_model.label())),
            ]));
            lines.push(Line::from(vec![
                Span::styled(" Salary:  ", label),
                Span::raw(format!(
                    "{} to {}/mo",
                    format_amount(posting.salary_min),
                    format_amount(posting.salary_max)
                )),
            ]));
            lines.push(Line::from(vec![
                Span::styled(" Applied: ", label),
                Span::styled(
                    data.total_applicants().to_string(),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            " No opening posted yet.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Opening "),
            )
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    let bars: Vec<(&str, u64)> = WEEK_LABELS
        .iter()
        .copied()
        .zip(data.weekly_applicants)
        .collect();
    f.render_widget(
        BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Applicants per week "),
            )
            .data(&bars[..])
            .bar_width(if is_narrow { 3 } else { 5 })
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan)),
        chunks[1],
    );
}

fn render_candidates(data: &Insights, f: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    let bar_width = area.width.saturating_sub(8).min(20) as usize;
    for candidate in &data.candidates {
        let filled = bar_width * candidate.score as usize / 100;
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", candidate.name),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", candidate.headline),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", "█".repeat(filled)),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                "░".repeat(bar_width - filled),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!(" {}%", candidate.score),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Best matches "),
        ),
        area,
    );
}

fn render_funnel(data: &Insights, f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Hiring funnel ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 4])
        .split(inner);

    let applied = data.funnel[0];
    for (i, stage) in FUNNEL_STAGES.iter().enumerate() {
        let count = data.funnel[i];
        let ratio = if applied == 0 {
            0.0
        } else {
            count as f64 / applied as f64
        };
        f.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
                .ratio(ratio)
                .label(format!("{stage}: {count}")),
            rows[i],
        );
    }
}

fn render_actions(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(Span::styled(
            " [N] Post another job",
            Style::default().fg(Color::Green),
        )),
        POST_ANOTHER,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [X] Log out", Style::default().fg(Color::Red))),
        LOGOUT,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [Esc] Back", Style::default().fg(Color::DarkGray))),
        BACK,
    );

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}
