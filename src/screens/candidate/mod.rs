//! Candidate onboarding and the candidate page.
//!
//! Registration → dream job → mentor → personality → resume → page. Every
//! step pre-fills from the session, so going back never loses typed data.

pub mod jobs;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::api::{ApiRequest, ApplicationRecord};
use crate::input::{ClickState, InputEvent};
use crate::registry::ScreenName;
use crate::state::{
    ApplicationState, BasicInfo, DreamJob, MentorChoice, PersonalityProfile, ResumeUpload,
    StepData, ALL_JOB_AREAS, ALL_MENTORS, ALL_SENIORITIES, ALL_WORK_MODELS,
    PERSONALITY_QUESTIONS,
};

use super::actions::{
    ANSWER_BASE, APPLY_BASE, BACK, LOGOUT, QUESTION_BASE, SKIP, SUBMIT,
};
use super::form::{self, Form, FormEvent};
use super::menu::{Menu, MenuEvent};
use super::{Screen, ScreenAction};

fn form_action(event: FormEvent, submit: impl FnOnce() -> ScreenAction) -> Option<ScreenAction> {
    match event {
        FormEvent::Submit => Some(submit()),
        FormEvent::Back => Some(ScreenAction::Back),
        FormEvent::Changed | FormEvent::Ignored => None,
    }
}

// ── Candidate registration ─────────────────────────────────────────

pub struct CandidateRegistrationScreen {
    form: Form,
}

impl CandidateRegistrationScreen {
    pub fn new(state: &ApplicationState) -> Self {
        let info = state.basic_info.as_ref();
        let email = info
            .map(|b| b.email.as_str())
            .or_else(|| state.account.as_ref().map(|a| a.email.as_str()))
            .unwrap_or("");
        Self {
            form: Form::new()
                .text("Full name", true)
                .prefill(info.map(|b| b.full_name.as_str()).unwrap_or(""))
                .text("Email", true)
                .validated(form::email)
                .prefill(email)
                .text("Phone", false)
                .validated(form::phone)
                .prefill(info.and_then(|b| b.phone.as_deref()).unwrap_or(""))
                .text("City", true)
                .prefill(info.map(|b| b.city.as_str()).unwrap_or("")),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    fn basic_info(&self) -> BasicInfo {
        BasicInfo {
            full_name: self.form.value(0).to_string(),
            email: self.form.value(1).to_string(),
            phone: self.form.optional(2),
            city: self.form.value(3).to_string(),
        }
    }
}

impl Screen for CandidateRegistrationScreen {
    fn name(&self) -> ScreenName {
        ScreenName::CandidateRegistration
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        let event = self.form.handle(event);
        form_action(event, || {
            ScreenAction::complete(
                ScreenName::DreamJobBuilder,
                StepData::BasicInfo(self.basic_info()),
            )
        })
    }

    fn render(
        &self,
        state: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render_registration(&self.form, state, f, area, click_state);
    }
}

// ── Dream job builder ──────────────────────────────────────────────

pub struct DreamJobScreen {
    form: Form,
}

impl DreamJobScreen {
    pub fn new(state: &ApplicationState) -> Self {
        let dream = state.dream_job.as_ref();
        let area = dream
            .and_then(|d| ALL_JOB_AREAS.iter().position(|a| *a == d.area))
            .unwrap_or(0);
        let seniority = dream
            .and_then(|d| ALL_SENIORITIES.iter().position(|s| *s == d.seniority))
            .unwrap_or(2);
        let work_model = dream
            .and_then(|d| ALL_WORK_MODELS.iter().position(|w| *w == d.work_model))
            .unwrap_or(0);
        let salary = dream.map(|d| d.salary_floor.to_string()).unwrap_or_default();

        Self {
            form: Form::new()
                .choice("Area", ALL_JOB_AREAS.iter().map(|a| a.label()).collect())
                .select(area)
                .choice("Seniority", ALL_SENIORITIES.iter().map(|s| s.label()).collect())
                .select(seniority)
                .choice("Work model", ALL_WORK_MODELS.iter().map(|w| w.label()).collect())
                .select(work_model)
                .text("Salary floor / month", true)
                .validated(form::amount)
                .prefill(&salary),
        }
    }

    fn dream_job(&self) -> DreamJob {
        DreamJob {
            area: ALL_JOB_AREAS[self.form.selected(0)],
            seniority: ALL_SENIORITIES[self.form.selected(1)],
            work_model: ALL_WORK_MODELS[self.form.selected(2)],
            salary_floor: form::parse_amount(self.form.value(3)).unwrap_or_default(),
        }
    }
}

impl Screen for DreamJobScreen {
    fn name(&self) -> ScreenName {
        ScreenName::DreamJobBuilder
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        let event = self.form.handle(event);
        form_action(event, || {
            ScreenAction::complete(
                ScreenName::MentorAvatar,
                StepData::DreamJob(self.dream_job()),
            )
        })
    }

    fn render(
        &self,
        state: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render_dream_job(&self.form, state, f, area, click_state);
    }
}

// ── Mentor avatar ──────────────────────────────────────────────────

pub struct MentorScreen {
    menu: Menu,
}

impl MentorScreen {
    pub fn new(state: &ApplicationState) -> Self {
        let selected = state
            .mentor
            .as_ref()
            .and_then(|m| ALL_MENTORS.iter().position(|a| *a == m.mentor))
            .unwrap_or(0);
        Self {
            menu: Menu::new(ALL_MENTORS.len()).with_selected(selected),
        }
    }
}

impl Screen for MentorScreen {
    fn name(&self) -> ScreenName {
        ScreenName::MentorAvatar
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        match self.menu.handle(event) {
            MenuEvent::Chosen(i) => Some(ScreenAction::complete(
                ScreenName::PersonalityProfile,
                StepData::Mentor(MentorChoice {
                    mentor: ALL_MENTORS[i],
                }),
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
        render::render_mentor(&self.menu, state, f, area, click_state);
    }
}

// ── Personality profile ────────────────────────────────────────────

pub const LIKERT: [&str; 5] = [
    "Strongly disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly agree",
];

pub struct PersonalityScreen {
    pub answers: [Option<u8>; 4],
    pub current: usize,
    pub error: Option<&'static str>,
}

impl PersonalityScreen {
    pub fn new(state: &ApplicationState) -> Self {
        let answers = match &state.personality {
            Some(profile) => profile.answers.map(Some),
            None => [None; 4],
        };
        Self {
            answers,
            current: 0,
            error: None,
        }
    }

    fn answer(&mut self, value: u8) {
        self.answers[self.current] = Some(value);
        self.error = None;
        if self.current + 1 < PERSONALITY_QUESTIONS.len() {
            self.current += 1;
        }
    }

    fn finish(&mut self) -> Option<ScreenAction> {
        let mut answers = [0u8; 4];
        for (i, answer) in self.answers.iter().enumerate() {
            match answer {
                Some(v) => answers[i] = *v,
                None => {
                    self.current = i;
                    self.error = Some("Answer every statement to continue");
                    return None;
                }
            }
        }
        Some(ScreenAction::complete(
            ScreenName::ResumeUpload,
            StepData::Personality(PersonalityProfile { answers }),
        ))
    }
}

impl Screen for PersonalityScreen {
    fn name(&self) -> ScreenName {
        ScreenName::PersonalityProfile
    }

    fn handle_input(&mut self, event: &InputEvent, _: &ApplicationState) -> Option<ScreenAction> {
        let n = PERSONALITY_QUESTIONS.len();
        match event {
            InputEvent::Up | InputEvent::BackTab => {
                self.current = (self.current + n - 1) % n;
                None
            }
            InputEvent::Down | InputEvent::Tab => {
                self.current = (self.current + 1) % n;
                None
            }
            InputEvent::Key(c) => {
                if let Some(v @ 1..=5) = c.to_digit(10) {
                    self.answer(v as u8);
                }
                None
            }
            InputEvent::Click(id) if (QUESTION_BASE..QUESTION_BASE + n as u16).contains(id) => {
                self.current = (*id - QUESTION_BASE) as usize;
                None
            }
            InputEvent::Click(id) if (ANSWER_BASE + 1..=ANSWER_BASE + 5).contains(id) => {
                self.answer((*id - ANSWER_BASE) as u8);
                None
            }
            InputEvent::Enter | InputEvent::Click(SUBMIT) => self.finish(),
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
        render::render_personality(self, state, f, area, click_state);
    }
}

// ── Resume upload ──────────────────────────────────────────────────

pub struct ResumeUploadScreen {
    form: Form,
}

impl ResumeUploadScreen {
    pub fn new(state: &ApplicationState) -> Self {
        let file = state
            .resume
            .as_ref()
            .and_then(|r| r.file_name.as_deref())
            .unwrap_or("");
        Self {
            form: Form::new()
                .text("File name", false)
                .validated(form::document)
                .prefill(file),
        }
    }

    /// Finishing the flow registers the candidate with everything collected.
    fn complete(state: &ApplicationState, file_name: Option<String>) -> ScreenAction {
        let data = StepData::Resume(ResumeUpload { file_name });
        let mut preview = state.clone();
        preview.merge(data.clone());
        ScreenAction::Complete {
            next: ScreenName::CandidatePage,
            data,
            submit: ApiRequest::candidate(&preview),
        }
    }
}

impl Screen for ResumeUploadScreen {
    fn name(&self) -> ScreenName {
        ScreenName::ResumeUpload
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        state: &ApplicationState,
    ) -> Option<ScreenAction> {
        if *event == InputEvent::Click(SKIP) {
            return Some(Self::complete(state, None));
        }
        let event = self.form.handle(event);
        form_action(event, || Self::complete(state, self.form.optional(0)))
    }

    fn render(
        &self,
        state: &ApplicationState,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render_resume(&self.form, state, f, area, click_state);
    }
}

// ── Candidate page ─────────────────────────────────────────────────

pub struct CandidatePageScreen {
    pub applied: Vec<u32>,
}

impl CandidatePageScreen {
    pub fn new() -> Self {
        Self {
            applied: Vec::new(),
        }
    }

    fn apply(&mut self, index: usize, state: &ApplicationState) -> Option<ScreenAction> {
        let jobs = jobs::ranked(state.dream_job.as_ref());
        let (job, _) = jobs.get(index)?;
        if self.applied.contains(&job.id) {
            return None;
        }
        let email = state
            .basic_info
            .as_ref()
            .map(|b| b.email.clone())
            .or_else(|| state.account.as_ref().map(|a| a.email.clone()));
        let Some(candidate_email) = email else {
            tracing::warn!(job = job.id, "cannot apply without an email");
            return None;
        };
        self.applied.push(job.id);
        Some(ScreenAction::Submit(ApiRequest::ApplyToJob(
            ApplicationRecord {
                job_id: job.id,
                candidate_email,
            },
        )))
    }
}

impl Default for CandidatePageScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for CandidatePageScreen {
    fn name(&self) -> ScreenName {
        ScreenName::CandidatePage
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        state: &ApplicationState,
    ) -> Option<ScreenAction> {
        match event {
            InputEvent::Key(c) => match c.to_digit(10) {
                Some(n @ 1..=9) => self.apply(n as usize - 1, state),
                _ if c.eq_ignore_ascii_case(&'x') => Some(ScreenAction::Logout),
                _ => None,
            },
            InputEvent::Click(LOGOUT) => Some(ScreenAction::Logout),
            InputEvent::Click(id) if (APPLY_BASE..APPLY_BASE + 10).contains(id) => {
                self.apply((*id - APPLY_BASE) as usize, state)
            }
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
        render::render_candidate_page(self, state, f, area, click_state);
    }
}
