//! Employer flow: company registration, job posting, insights dashboard.

pub mod insights;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::api::ApiRequest;
use crate::input::{ClickState, InputEvent};
use crate::registry::ScreenName;
use crate::state::{
    ApplicationState, CompanyProfile, JobPosting, StepData, ALL_COMPANY_SIZES, ALL_WORK_MODELS,
};

use super::actions::{BACK, LOGOUT, POST_ANOTHER, TAB_BASE};
use super::form::{self, Form, FormEvent};
use super::{Screen, ScreenAction};

// ── Company registration ───────────────────────────────────────────

pub struct CompanyRegistrationScreen {
    form: Form,
}

impl CompanyRegistrationScreen {
    pub fn new(state: &ApplicationState) -> Self {
        let company = state.company.as_ref();
        let size = company
            .and_then(|c| ALL_COMPANY_SIZES.iter().position(|s| *s == c.size))
            .unwrap_or(0);
        Self {
            form: Form::new()
                .text("Company name", true)
                .prefill(company.map(|c| c.name.as_str()).unwrap_or(""))
                .text("Sector", true)
                .prefill(company.map(|c| c.sector.as_str()).unwrap_or(""))
                .choice("People", ALL_COMPANY_SIZES.iter().map(|s| s.label()).collect())
                .select(size)
                .text("Website", false)
                .validated(form::website)
                .prefill(company.and_then(|c| c.website.as_deref()).unwrap_or("")),
        }
    }

    fn profile(&self) -> CompanyProfile {
        CompanyProfile {
            name: self.form.value(0).to_string(),
            sector: self.form.value(1).to_string(),
            size: ALL_COMPANY_SIZES[self.form.selected(2)],
            website: self.form.optional(3),
        }
    }
}

impl Screen for CompanyRegistrationScreen {
    fn name(&self) -> ScreenName {
        ScreenName::CompanyRegistration
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        state: &ApplicationState,
    ) -> Option<ScreenAction> {
        match self.form.handle(event) {
            FormEvent::Submit => {
                let data = StepData::Company(self.profile());
                let mut preview = state.clone();
                preview.merge(data.clone());
                Some(ScreenAction::Complete {
                    next: ScreenName::JobPosting,
                    data,
                    submit: ApiRequest::company(&preview),
                })
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
        render::render_company_registration(&self.form, state, f, area, click_state);
    }
}

// ── Job posting ────────────────────────────────────────────────────

const SALARY_MIN: usize = 3;
const SALARY_MAX: usize = 4;

pub struct JobPostingScreen {
    form: Form,
}

impl JobPostingScreen {
    pub fn new() -> Self {
        Self {
            form: Form::new()
                .text("Job title", true)
                .text("City", true)
                .choice("Work model", ALL_WORK_MODELS.iter().map(|w| w.label()).collect())
                .text("Salary from / month", true)
                .validated(form::amount)
                .text("Salary up to / month", true)
                .validated(form::amount),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// `None` (with the error shown) when the range is inverted.
    fn posting(&mut self) -> Option<JobPosting> {
        let salary_min = form::parse_amount(self.form.value(SALARY_MIN)).unwrap_or_default();
        let salary_max = form::parse_amount(self.form.value(SALARY_MAX)).unwrap_or_default();
        if salary_max < salary_min {
            self.form
                .set_error(SALARY_MAX, "Must be at least the starting salary");
            return None;
        }
        Some(JobPosting {
            title: self.form.value(0).to_string(),
            city: self.form.value(1).to_string(),
            work_model: ALL_WORK_MODELS[self.form.selected(2)],
            salary_min,
            salary_max,
        })
    }
}

impl Default for JobPostingScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for JobPostingScreen {
    fn name(&self) -> ScreenName {
        ScreenName::JobPosting
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        state: &ApplicationState,
    ) -> Option<ScreenAction> {
        match self.form.handle(event) {
            FormEvent::Submit => {
                let posting = self.posting()?;
                let submit = state
                    .company
                    .as_ref()
                    .map(|company| ApiRequest::job(company, &posting));
                Some(ScreenAction::Complete {
                    next: ScreenName::CompanyDashboard,
                    data: StepData::JobPosting(posting),
                    submit,
                })
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
        render::render_job_posting(&self.form, state, f, area, click_state);
    }
}

// ── Dashboard ──────────────────────────────────────────────────────

pub const DASHBOARD_TABS: [&str; 3] = ["Overview", "Candidates", "Funnel"];

pub struct DashboardScreen {
    pub tab: usize,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self { tab: 0 }
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for DashboardScreen {
    fn name(&self) -> ScreenName {
        ScreenName::CompanyDashboard
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        let n = DASHBOARD_TABS.len();
        match event {
            InputEvent::Right | InputEvent::Tab => {
                self.tab = (self.tab + 1) % n;
                None
            }
            InputEvent::Left | InputEvent::BackTab => {
                self.tab = (self.tab + n - 1) % n;
                None
            }
            InputEvent::Click(id) if (TAB_BASE..TAB_BASE + n as u16).contains(id) => {
                self.tab = (*id - TAB_BASE) as usize;
                None
            }
            InputEvent::Key(c) => match c.to_ascii_lowercase() {
                'n' => Some(ScreenAction::complete(ScreenName::JobPosting, StepData::Empty)),
                'x' => Some(ScreenAction::Logout),
                d @ '1'..='3' => {
                    self.tab = (d as u8 - b'1') as usize;
                    None
                }
                _ => None,
            },
            InputEvent::Click(POST_ANOTHER) => Some(ScreenAction::complete(
                ScreenName::JobPosting,
                StepData::Empty,
            )),
            InputEvent::Click(LOGOUT) => Some(ScreenAction::Logout),
            InputEvent::Esc | InputEvent::Click(BACK) => Some(ScreenAction::Back),
            _ => None,
        }
    }

    fn render(
        &self,
        state: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render_dashboard(self, state, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::actions::SUBMIT;
    use crate::state::{CompanySize, WorkModel};

    fn type_str(screen: &mut dyn Screen, state: &ApplicationState, s: &str) {
        for c in s.chars() {
            screen.handle_input(&InputEvent::Key(c), state);
        }
    }

    fn acme() -> CompanyProfile {
        CompanyProfile {
            name: "Acme".into(),
            sector: "Retail".into(),
            size: CompanySize::Small,
            website: None,
        }
    }

    #[test]
    fn registration_emits_profile_and_request() {
        let state = ApplicationState::default();
        let mut screen = CompanyRegistrationScreen::new(&state);
        type_str(&mut screen, &state, "Acme");
        screen.handle_input(&InputEvent::Tab, &state);
        type_str(&mut screen, &state, "Retail");
        screen.handle_input(&InputEvent::Tab, &state);
        screen.handle_input(&InputEvent::Right, &state);

        let action = screen.handle_input(&InputEvent::Enter, &state);
        let Some(ScreenAction::Complete { next, data, submit }) = action else {
            panic!("expected completion");
        };
        assert_eq!(next, ScreenName::JobPosting);
        assert_eq!(data, StepData::Company(acme()));
        assert_eq!(submit.map(|r| r.path()), Some("/companies"));
    }

    fn fill_posting(screen: &mut JobPostingScreen, state: &ApplicationState, min: &str, max: &str) {
        type_str(screen, state, "Data analyst");
        screen.handle_input(&InputEvent::Tab, state);
        type_str(screen, state, "Porto");
        screen.handle_input(&InputEvent::Tab, state);
        screen.handle_input(&InputEvent::Right, state);
        screen.handle_input(&InputEvent::Tab, state);
        type_str(screen, state, min);
        screen.handle_input(&InputEvent::Tab, state);
        type_str(screen, state, max);
    }

    #[test]
    fn posting_rejects_inverted_range() {
        let state = ApplicationState::default();
        let mut screen = JobPostingScreen::new();
        fill_posting(&mut screen, &state, "3000", "2000");
        assert_eq!(screen.handle_input(&InputEvent::Click(SUBMIT), &state), None);
        assert!(screen.form().error(SALARY_MAX).is_some());
        assert_eq!(screen.form().focus(), SALARY_MAX);
    }

    #[test]
    fn posting_sends_job_for_registered_company() {
        let mut state = ApplicationState::default();
        state.merge(StepData::Company(acme()));
        let mut screen = JobPostingScreen::new();
        fill_posting(&mut screen, &state, "1800", "2400");

        let action = screen.handle_input(&InputEvent::Enter, &state);
        let expected = JobPosting {
            title: "Data analyst".into(),
            city: "Porto".into(),
            work_model: WorkModel::Hybrid,
            salary_min: 1_800,
            salary_max: 2_400,
        };
        assert_eq!(
            action,
            Some(ScreenAction::Complete {
                next: ScreenName::CompanyDashboard,
                data: StepData::JobPosting(expected.clone()),
                submit: Some(ApiRequest::job(&acme(), &expected)),
            })
        );
    }

    #[test]
    fn posting_without_company_sends_nothing() {
        let state = ApplicationState::default();
        let mut screen = JobPostingScreen::new();
        fill_posting(&mut screen, &state, "1800", "2400");
        let action = screen.handle_input(&InputEvent::Enter, &state);
        assert!(matches!(
            action,
            Some(ScreenAction::Complete { submit: None, .. })
        ));
    }

    #[test]
    fn dashboard_tabs_and_actions() {
        let state = ApplicationState::default();
        let mut screen = DashboardScreen::new();
        screen.handle_input(&InputEvent::Left, &state);
        assert_eq!(screen.tab, 2);
        screen.handle_input(&InputEvent::Click(TAB_BASE + 1), &state);
        assert_eq!(screen.tab, 1);
        screen.handle_input(&InputEvent::Key('1'), &state);
        assert_eq!(screen.tab, 0);
        assert_eq!(
            screen.handle_input(&InputEvent::Key('N'), &state),
            Some(ScreenAction::complete(ScreenName::JobPosting, StepData::Empty))
        );
        assert_eq!(
            screen.handle_input(&InputEvent::Click(LOGOUT), &state),
            Some(ScreenAction::Logout)
        );
    }
}
