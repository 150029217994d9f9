//! Entry screen rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::screens::actions::SKIP;
use crate::screens::form::Form;
use crate::screens::menu::Menu;
use crate::screens::render_header;
use crate::state::ApplicationState;
use crate::widgets::ClickableList;

use super::{SplashScreen, LOGIN_SELECTION_ITEMS, PROFILE_ITEMS};

const LOGO: [&str; 5] = [
    "██████   █████  ██    ██ ██    ██ ███████",
    "██   ██ ██   ██ ██    ██  ██  ██     ███ ",
    "██████  ███████ ██    ██   ████     ███  ",
    "██   ██ ██   ██  ██  ██     ██     ███   ",
    "██   ██ ██   ██   ████      ██    ███████",
];

pub fn render_splash(
    screen: &SplashScreen,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let logo_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);

    let mut cl = ClickableList::new();
    let logo_rows = if is_narrow_layout(area.width) { 1 } else { LOGO.len() };
    let top_pad = area.height.saturating_sub(logo_rows as u16 + 8) / 2;
    for _ in 0..top_pad {
        cl.push(Line::from(""));
    }
    if is_narrow_layout(area.width) {
        cl.push(Line::from(Span::styled("R A V Y Z", logo_style)));
    } else {
        for row in LOGO {
            cl.push(Line::from(Span::styled(row, logo_style)));
        }
    }
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "Your next job, matched to you.",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));

    let seconds = screen.countdown().seconds_left();
    if seconds > 0 {
        cl.push(Line::from(Span::styled(
            format!("Starting in {seconds}s"),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        cl.push(Line::from(""));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            "[Enter] Skip",
            Style::default().fg(Color::Cyan),
        )),
        SKIP,
    );

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        area,
    );
}

pub fn render_login_selection(
    menu: &Menu,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Welcome", state);
    menu.render(f, body, "How do you want to start?", &LOGIN_SELECTION_ITEMS, click_state);
}

pub fn render_login(
    form: &Form,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Sign in", state);
    form.render(f, body, "Sign in", "Sign in", click_state);
}

pub fn render_profile_selection(
    menu: &Menu,
    state: &ApplicationState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let body = render_header(f, area, "Create account", state);
    menu.render(f, body, "Who are you?", &PROFILE_ITEMS, click_state);
}
