//! Candidate screen rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::screens::actions::{ANSWER_BASE, APPLY_BASE, BACK, LOGOUT, QUESTION_BASE, SKIP, SUBMIT};
use crate::screens::form::Form;
use crate::screens::menu::Menu;
use crate::screens::{format_amount, render_header};
use crate::state::{ApplicationState, ALL_MENTORS, PERSONALITY_QUESTIONS};
use crate::widgets::ClickableList;

use super::jobs::ranked;
use super::{CandidatePageScreen, PersonalityScreen, LIKERT};

fn step_title(step: usize, title: &str) -> String {
    format!("Step {step}/5 · {title}")
}

pub fn render_registration(
    form: &Form,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Create your profile", state);
    form.render(f, body, &step_title(1, "Basic information"), "Continue", click_state);
}

pub fn render_dream_job(
    form: &Form,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Create your profile", state);
    form.render(f, body, &step_title(2, "Dream job builder"), "Continue", click_state);
}

pub fn render_mentor(
    menu: &Menu,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Create your profile", state);
    let items = ALL_MENTORS.map(|m| (m.name(), m.blurb()));
    menu.render(f, body, &step_title(3, "Choose your mentor"), &items, click_state);
}

pub fn render_personality(
    screen: &PersonalityScreen,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Create your profile", state);

    let mut cl = ClickableList::new();
    for (i, question) in PERSONALITY_QUESTIONS.iter().enumerate() {
        let focused = i == screen.current;
        let style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let answer = match screen.answers[i] {
            Some(v) => Span::styled(
                format!("  {v}/5"),
                Style::default().fg(Color::Green),
            ),
            None => Span::styled("  -", Style::default().fg(Color::DarkGray)),
        };
        let marker = if focused { "▶ " } else { "  " };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!("{marker}{}. {question}", i + 1), style),
                answer,
            ]),
            QUESTION_BASE + i as u16,
        );
    }

    cl.push(Line::from(""));
    let chosen = screen.answers[screen.current];
    for (i, label) in LIKERT.iter().enumerate() {
        let value = i as u8 + 1;
        let style = if chosen == Some(value) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };
        cl.push_clickable(
            Line::from(Span::styled(format!("   [{value}] {label}"), style)),
            ANSWER_BASE + value as u16,
        );
    }

    if let Some(error) = screen.error {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [Enter] Continue",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        SUBMIT,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [Esc] Back", Style::default().fg(Color::DarkGray))),
        BACK,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", step_title(4, "Personality profile")));

    let mut cs = click_state.borrow_mut();
    cl.register_targets(body, &mut cs, 1, 1, 0, body.width.saturating_sub(2));
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .wrap(Wrap { trim: false }),
        body,
    );
}

pub fn render_resume(
    form: &Form,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Create your profile", state);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(4)])
        .split(body);

    form.render(f, chunks[0], &step_title(5, "Upload your resume"), "Finish", click_state);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " PDF, DOC or DOCX. Leave the name empty to skip.",
        Style::default().fg(Color::DarkGray),
    )));
    cl.push_clickable(
        Line::from(Span::styled(
            " Skip for now",
            Style::default().fg(Color::Cyan),
        )),
        SKIP,
    );

    let mut cs = click_state.borrow_mut();
    cl.register_targets(chunks[1], &mut cs, 1, 1, 0, 0);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        chunks[1],
    );
}

// ── Candidate page ─────────────────────────────────────────────────

pub fn render_candidate_page(
    screen: &CandidatePageScreen,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Your RAVYZ page", state);
    let is_narrow = is_narrow_layout(body.width);

    let chunks = if is_narrow {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(6)])
            .split(body)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(body)
    };

    render_profile(state, f, chunks[0]);
    render_jobs(screen, state, f, chunks[1], click_state);
}

fn render_profile(state: &ApplicationState, f: &mut Frame, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);
    let missing = Span::styled("not filled yet", Style::default().fg(Color::DarkGray));

    let mut lines = Vec::new();
    let name = state.display_name().unwrap_or("Candidate").to_string();
    lines.push(Line::from(Span::styled(
        format!(" {name}"),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )));
    if let Some(info) = &state.basic_info {
        lines.push(Line::from(Span::styled(
            format!(" {} · {}", info.city, info.email),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    let dream = match &state.dream_job {
        Some(d) => Span::styled(
            format!(
                "{} {} · {} · from {}/mo",
                d.seniority.label(),
                d.area.label(),
                d.work_model.label(),
                format_amount(d.salary_floor)
            ),
            value,
        ),
        None => missing.clone(),
    };
    lines.push(Line::from(vec![Span::styled(" Dream job: ", label), dream]));

    let mentor = match &state.mentor {
        Some(m) => Span::styled(m.mentor.name(), value),
        None => missing.clone(),
    };
    lines.push(Line::from(vec![Span::styled(" Mentor:    ", label), mentor]));

    let personality = match &state.personality {
        Some(p) => Span::styled(
            format!(
                "social {} · planner {} · resilient {} · self-taught {}",
                p.answers[0], p.answers[1], p.answers[2], p.answers[3]
            ),
            value,
        ),
        None => missing.clone(),
    };
    lines.push(Line::from(vec![Span::styled(" Profile:   ", label), personality]));

    let resume = match &state.resume {
        Some(r) => Span::styled(
            r.file_name.clone().unwrap_or_else(|| "skipped".to_string()),
            value,
        ),
        None => missing,
    };
    lines.push(Line::from(vec![Span::styled(" Resume:    ", label), resume]));

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Profile "),
            )
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_jobs(
    screen: &CandidatePageScreen,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for (i, (job, score)) in ranked(state.dream_job.as_ref()).into_iter().enumerate() {
        let applied = screen.applied.contains(&job.id);
        let title_style = if applied {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        };
        let status = if applied {
            Span::styled("  applied", Style::default().fg(Color::Green))
        } else if score > 0 {
            Span::styled(format!("  {score}% match"), Style::default().fg(Color::Yellow))
        } else {
            Span::raw("")
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] {} · {}", i + 1, job.title, job.company), title_style),
                status,
            ]),
            APPLY_BASE + i as u16,
        );
        cl.push_clickable(
            Line::from(Span::styled(
                format!(
                    "     {} · {} · {}/mo",
                    job.city,
                    job.work_model.label(),
                    format_amount(job.salary)
                ),
                Style::default().fg(Color::DarkGray),
            )),
            APPLY_BASE + i as u16,
        );
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [X] Log out", Style::default().fg(Color::Red))),
        LOGOUT,
    );
    cl.push_clickable(
        Line::from(Span::styled(" [Esc] Back", Style::default().fg(Color::DarkGray))),
        BACK,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Jobs for you · tap or press a number to apply ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, area.width.saturating_sub(2));
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
