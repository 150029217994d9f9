//! Entry screens: splash, login selection, login, profile selection.

pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::registry::ScreenName;
use crate::state::{ApplicationState, Credentials, Role, StepData};
use crate::time::Countdown;

use super::actions::SKIP;
use super::form::{self, Form, FormEvent};
use super::menu::{Menu, MenuEvent};
use super::{Screen, ScreenAction};

// ── Splash ─────────────────────────────────────────────────────────

pub struct SplashScreen {
    countdown: Countdown,
}

impl SplashScreen {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            countdown: Countdown::new(delay_ms),
        }
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    fn finish(&mut self) -> Option<ScreenAction> {
        self.countdown.cancel();
        Some(ScreenAction::complete(
            ScreenName::LoginSelection,
            StepData::Empty,
        ))
    }
}

impl Screen for SplashScreen {
    fn name(&self) -> ScreenName {
        ScreenName::Splash
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        match event {
            InputEvent::Enter | InputEvent::Key(' ') | InputEvent::Click(SKIP) => self.finish(),
            _ => None,
        }
    }

    fn tick(&mut self, delta_ms: f64) -> Option<ScreenAction> {
        self.countdown.advance(delta_ms).then(|| {
            ScreenAction::complete(ScreenName::LoginSelection, StepData::Empty)
        })
    }

    fn render(
        &self,
        _: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render_splash(self, f, area, click_state);
    }

    fn teardown(&mut self) {
        self.countdown.cancel();
    }
}

// ── Login selection ────────────────────────────────────────────────

pub const LOGIN_SELECTION_ITEMS: [(&str, &str); 2] = [
    ("Sign in", "I already have a RAVYZ account"),
    ("Create account", "Candidates and companies start here"),
];

pub struct LoginSelectionScreen {
    menu: Menu,
}

impl LoginSelectionScreen {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(LOGIN_SELECTION_ITEMS.len()),
        }
    }
}

impl Default for LoginSelectionScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LoginSelectionScreen {
    fn name(&self) -> ScreenName {
        ScreenName::LoginSelection
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        match self.menu.handle(event) {
            MenuEvent::Chosen(0) => Some(ScreenAction::complete(ScreenName::Login, StepData::Empty)),
            MenuEvent::Chosen(_) => Some(ScreenAction::complete(
                ScreenName::ProfileSelection,
                StepData::Empty,
            )),
            MenuEvent::Back => Some(ScreenAction::Back),
            MenuEvent::Changed | MenuEvent::Ignored => None,
        }
    }

    fn render(
        &self,
        state: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render_login_selection(&self.menu, state, f, area, click_state);
    }
}

// ── Login ──────────────────────────────────────────────────────────

const LOGIN_EMAIL: usize = 0;
const LOGIN_ROLE: usize = 2;

pub struct LoginScreen {
    form: Form,
}

impl LoginScreen {
    pub fn new(state: &ApplicationState) -> Self {
        let email = state
            .account
            .as_ref()
            .map(|a| a.email.as_str())
            .unwrap_or("");
        let role = match state.role {
            Some(Role::Company) => 1,
            _ => 0,
        };
        Self {
            form: Form::new()
                .text("Email", true)
                .validated(form::email)
                .prefill(email)
                .masked("Password")
                .validated(form::password)
                .choice("I am a", vec![Role::Candidate.label(), Role::Company.label()])
                .select(role),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }
}

impl Screen for LoginScreen {
    fn name(&self) -> ScreenName {
        ScreenName::Login
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        match self.form.handle(event) {
            FormEvent::Submit => {
                let role = if self.form.selected(LOGIN_ROLE) == 1 {
                    Role::Company
                } else {
                    Role::Candidate
                };
                let next = match role {
                    Role::Candidate => ScreenName::CandidatePage,
                    Role::Company => ScreenName::CompanyDashboard,
                };
                // The password is checked by the service, never kept.
                Some(ScreenAction::complete(
                    next,
                    StepData::SignIn(Credentials {
                        email: self.form.value(LOGIN_EMAIL).to_string(),
                        role,
                    }),
                ))
            }
            FormEvent::Back => Some(ScreenAction::Back),
            FormEvent::Changed | FormEvent::Ignored => None,
        }
    }

    fn render(
        &self,
        state: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render_login(&self.form, state, f, area, click_state);
    }
}

// ── Profile selection ──────────────────────────────────────────────

pub const PROFILE_ITEMS: [(&str, &str); 2] = [
    ("I'm a candidate", "Build your dream job and meet your mentor"),
    ("I'm hiring", "Register your company and post openings"),
];

pub struct ProfileSelectionScreen {
    menu: Menu,
}

impl ProfileSelectionScreen {
    pub fn new(state: &ApplicationState) -> Self {
        let selected = match state.role {
            Some(Role::Company) => 1,
            _ => 0,
        };
        Self {
            menu: Menu::new(PROFILE_ITEMS.len()).with_selected(selected),
        }
    }
}

impl Screen for ProfileSelectionScreen {
    fn name(&self) -> ScreenName {
        ScreenName::ProfileSelection
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        match self.menu.handle(event) {
            MenuEvent::Chosen(0) => Some(ScreenAction::complete(
                ScreenName::CandidateRegistration,
                StepData::Role(Role::Candidate),
            )),
            MenuEvent::Chosen(_) => Some(ScreenAction::complete(
                ScreenName::CompanyRegistration,
                StepData::Role(Role::Company),
            )),
            MenuEvent::Back => Some(ScreenAction::Back),
            MenuEvent::Changed | MenuEvent::Ignored => None,
        }
    }

    fn render(
        &self,
        state: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render_profile_selection(&self.menu, state, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::actions::{OPTION_BASE, SUBMIT};

    fn empty() -> ApplicationState {
        ApplicationState::default()
    }

    #[test]
    fn splash_advances_once_after_delay() {
        let mut splash = SplashScreen::new(1_000);
        assert_eq!(splash.tick(600.0), None);
        assert_eq!(
            splash.tick(600.0),
            Some(ScreenAction::complete(
                ScreenName::LoginSelection,
                StepData::Empty
            ))
        );
        assert_eq!(splash.tick(600.0), None);
    }

    #[test]
    fn torn_down_splash_never_fires() {
        let mut splash = SplashScreen::new(1_000);
        splash.tick(900.0);
        splash.teardown();
        assert!(splash.countdown().is_cancelled());
        assert_eq!(splash.tick(10_000.0), None);
    }

    #[test]
    fn skipping_splash_cancels_the_timer() {
        let mut splash = SplashScreen::new(1_000);
        let action = splash.handle_input(&InputEvent::Click(SKIP), &empty());
        assert!(matches!(
            action,
            Some(ScreenAction::Complete {
                next: ScreenName::LoginSelection,
                ..
            })
        ));
        assert_eq!(splash.tick(2_000.0), None);
    }

    #[test]
    fn login_selection_routes() {
        let mut screen = LoginSelectionScreen::new();
        assert_eq!(
            screen.handle_input(&InputEvent::Key('1'), &empty()),
            Some(ScreenAction::complete(ScreenName::Login, StepData::Empty))
        );
        assert_eq!(
            screen.handle_input(&InputEvent::Click(OPTION_BASE + 1), &empty()),
            Some(ScreenAction::complete(
                ScreenName::ProfileSelection,
                StepData::Empty
            ))
        );
        assert_eq!(
            screen.handle_input(&InputEvent::Esc, &empty()),
            Some(ScreenAction::Back)
        );
    }

    #[test]
    fn login_emits_credentials_and_routes_by_role() {
        let mut screen = LoginScreen::new(&empty());
        for c in "hr@acme.io".chars() {
            screen.handle_input(&InputEvent::Key(c), &empty());
        }
        screen.handle_input(&InputEvent::Tab, &empty());
        for c in "hunter22".chars() {
            screen.handle_input(&InputEvent::Key(c), &empty());
        }
        screen.handle_input(&InputEvent::Tab, &empty());
        screen.handle_input(&InputEvent::Right, &empty());

        let action = screen.handle_input(&InputEvent::Click(SUBMIT), &empty());
        assert_eq!(
            action,
            Some(ScreenAction::complete(
                ScreenName::CompanyDashboard,
                StepData::SignIn(Credentials {
                    email: "hr@acme.io".into(),
                    role: Role::Company,
                })
            ))
        );
    }

    #[test]
    fn login_requires_password() {
        let mut screen = LoginScreen::new(&empty());
        for c in "ana@example.com".chars() {
            screen.handle_input(&InputEvent::Key(c), &empty());
        }
        assert_eq!(screen.handle_input(&InputEvent::Enter, &empty()), None);
        assert_eq!(screen.form().error(1), Some("Required"));
    }

    #[test]
    fn profile_selection_emits_role() {
        let mut screen = ProfileSelectionScreen::new(&empty());
        assert_eq!(
            screen.handle_input(&InputEvent::Enter, &empty()),
            Some(ScreenAction::complete(
                ScreenName::CandidateRegistration,
                StepData::Role(Role::Candidate)
            ))
        );
        assert_eq!(
            screen.handle_input(&InputEvent::Key('2'), &empty()),
            Some(ScreenAction::complete(
                ScreenName::CompanyRegistration,
                StepData::Role(Role::Company)
            ))
        );
    }
}
