//! Screen components.
//!
//! A screen is mounted fresh whenever it becomes current and torn down when it
//! stops being current. It reads the session through `&ApplicationState`,
//! limited to the sections its binding declares, and answers input with at
//! most one [`ScreenAction`]; the app turns that into a store operation.
//! Screens never hold or touch the store.

pub mod actions;
pub mod candidate;
pub mod company;
pub mod form;
pub mod menu;
pub mod welcome;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::api::ApiRequest;
use crate::config::Config;
use crate::input::{is_narrow_layout, ClickState, InputEvent};
use crate::registry::ScreenName;
use crate::state::{ApplicationState, StepData};

/// What a screen asks the app to do.
#[derive(Clone, Debug, PartialEq)]
pub enum ScreenAction {
    /// Advance to `next` with this screen's payload. `submit` is sent only if
    /// the advance succeeds.
    Complete {
        next: ScreenName,
        data: StepData,
        submit: Option<ApiRequest>,
    },
    Back,
    Logout,
    /// Fire-and-forget request, no navigation.
    Submit(ApiRequest),
}

impl ScreenAction {
    pub fn complete(next: ScreenName, data: StepData) -> Self {
        ScreenAction::Complete {
            next,
            data,
            submit: None,
        }
    }
}

pub trait Screen {
    fn name(&self) -> ScreenName;

    fn handle_input(&mut self, event: &InputEvent, state: &ApplicationState)
        -> Option<ScreenAction>;

    /// Advance timers by `delta_ms` of frame time.
    fn tick(&mut self, _delta_ms: f64) -> Option<ScreenAction> {
        None
    }

    fn render(
        &self,
        state: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    );

    /// Called once before the screen is dropped. Pending timers must not fire
    /// afterwards.
    fn teardown(&mut self) {}
}

/// Build the component for `screen`. It pre-fills from the sections its
/// binding reads and sees nothing else.
pub fn mount(screen: ScreenName, state: &ApplicationState, config: &Config) -> Box<dyn Screen> {
    tracing::debug!(screen = %screen, "mounting screen");
    let view = screen.binding().view(state);
    let state = &view;
    match screen {
        ScreenName::Splash => Box::new(welcome::SplashScreen::new(config.splash_ms)),
        ScreenName::LoginSelection => Box::new(welcome::LoginSelectionScreen::new()),
        ScreenName::Login => Box::new(welcome::LoginScreen::new(state)),
        ScreenName::ProfileSelection => Box::new(welcome::ProfileSelectionScreen::new(state)),
        ScreenName::CandidateRegistration => {
            Box::new(candidate::CandidateRegistrationScreen::new(state))
        }
        ScreenName::DreamJobBuilder => Box::new(candidate::DreamJobScreen::new(state)),
        ScreenName::MentorAvatar => Box::new(candidate::MentorScreen::new(state)),
        ScreenName::PersonalityProfile => Box::new(candidate::PersonalityScreen::new(state)),
        ScreenName::ResumeUpload => Box::new(candidate::ResumeUploadScreen::new(state)),
        ScreenName::CandidatePage => Box::new(candidate::CandidatePageScreen::new()),
        ScreenName::CompanyRegistration => {
            Box::new(company::CompanyRegistrationScreen::new(state))
        }
        ScreenName::JobPosting => Box::new(company::JobPostingScreen::new()),
        ScreenName::CompanyDashboard => Box::new(company::DashboardScreen::new()),
    }
}

/// Draw the title bar and return the area left for the screen body.
pub fn render_header(f: &mut Frame, area: Rect, title: &str, state: &ApplicationState) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let borders = if is_narrow_layout(area.width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let mut spans = vec![
        Span::styled(
            " RAVYZ ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {title}"), Style::default().fg(Color::White)),
    ];
    if let Some(name) = state.display_name() {
        spans.push(Span::styled(
            format!("   {name}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        chunks[0],
    );
    chunks[1]
}

/// `3200` → `"3 200"`.
pub fn format_amount(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
