//! View registry: the closed set of screens and what each one exchanges.

use std::fmt;

use crate::state::{ApplicationState, Section, StepKind};

/// Every view the application can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScreenName {
    Splash,
    LoginSelection,
    Login,
    ProfileSelection,
    CandidateRegistration,
    DreamJobBuilder,
    MentorAvatar,
    PersonalityProfile,
    ResumeUpload,
    CandidatePage,
    CompanyRegistration,
    JobPosting,
    CompanyDashboard,
}

/// All screens in flow order.
pub const ALL_SCREENS: [ScreenName; 13] = [
    ScreenName::Splash,
    ScreenName::LoginSelection,
    ScreenName::Login,
    ScreenName::ProfileSelection,
    ScreenName::CandidateRegistration,
    ScreenName::DreamJobBuilder,
    ScreenName::MentorAvatar,
    ScreenName::PersonalityProfile,
    ScreenName::ResumeUpload,
    ScreenName::CandidatePage,
    ScreenName::CompanyRegistration,
    ScreenName::JobPosting,
    ScreenName::CompanyDashboard,
];

impl ScreenName {
    /// Stable tag written to mirrors and the URL hash.
    pub fn tag(self) -> &'static str {
        match self {
            ScreenName::Splash => "splash",
            ScreenName::LoginSelection => "login-selection",
            ScreenName::Login => "login",
            ScreenName::ProfileSelection => "profile-selection",
            ScreenName::CandidateRegistration => "candidate-registration",
            ScreenName::DreamJobBuilder => "dream-job-builder",
            ScreenName::MentorAvatar => "mentor-avatar",
            ScreenName::PersonalityProfile => "personality-profile",
            ScreenName::ResumeUpload => "resume-upload",
            ScreenName::CandidatePage => "candidate-page",
            ScreenName::CompanyRegistration => "company-registration",
            ScreenName::JobPosting => "job-posting",
            ScreenName::CompanyDashboard => "company-dashboard",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ScreenName> {
        ALL_SCREENS.iter().copied().find(|s| s.tag() == tag)
    }

    /// The screen's contract, whether or not a registry includes it.
    pub fn binding(self) -> Binding {
        binding(self)
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Contract between the store and one screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub screen: ScreenName,
    pub title: &'static str,
    /// Payload kind emitted on completion.
    pub produces: StepKind,
    /// Sections that must be filled before the screen can be entered from a
    /// mirror or a resume.
    pub requires: &'static [Section],
    /// Every section the screen is shown. Always a superset of `requires`.
    pub reads: &'static [Section],
}

impl Binding {
    /// Required sections `state` does not hold yet.
    pub fn missing(&self, state: &ApplicationState) -> Vec<Section> {
        state.missing(self.requires)
    }

    /// The slice of `state` this screen is allowed to see.
    pub fn view(&self, state: &ApplicationState) -> ApplicationState {
        state.only(self.reads)
    }
}

fn binding(screen: ScreenName) -> Binding {
    use Section::*;
    type Sections = &'static [Section];
    const CANDIDATE_PROFILE: Sections = &[Account, BasicInfo, DreamJob, Mentor, Personality, Resume];

    let (title, produces, requires, reads): (&'static str, StepKind, Sections, Sections) =
        match screen {
            ScreenName::Splash => ("RAVYZ", StepKind::Empty, &[], &[]),
            ScreenName::LoginSelection => ("Welcome", StepKind::Empty, &[], &[]),
            ScreenName::Login => ("Sign in", StepKind::SignIn, &[], &[Role, Account]),
            ScreenName::ProfileSelection => {
                ("Who are you?", StepKind::Role, &[], &[Role, Account])
            }
            ScreenName::CandidateRegistration => (
                "Basic information",
                StepKind::BasicInfo,
                &[Role],
                &[Role, Account, BasicInfo],
            ),
            ScreenName::DreamJobBuilder => (
                "Dream job builder",
                StepKind::DreamJob,
                &[Role, BasicInfo],
                &[Role, BasicInfo, DreamJob],
            ),
            ScreenName::MentorAvatar => (
                "Choose your mentor",
                StepKind::Mentor,
                &[BasicInfo],
                &[BasicInfo, Mentor],
            ),
            ScreenName::PersonalityProfile => (
                "Personality profile",
                StepKind::Personality,
                &[Mentor],
                &[BasicInfo, Mentor, Personality],
            ),
            // Completing the upload sends the whole profile.
            ScreenName::ResumeUpload => (
                "Upload your resume",
                StepKind::Resume,
                &[BasicInfo],
                CANDIDATE_PROFILE,
            ),
            // Reached by signing in as well, so only the account is required.
            ScreenName::CandidatePage => (
                "Your RAVYZ page",
                StepKind::Empty,
                &[Account],
                CANDIDATE_PROFILE,
            ),
            ScreenName::CompanyRegistration => (
                "Company profile",
                StepKind::Company,
                &[Role],
                &[Role, Account, Company],
            ),
            ScreenName::JobPosting => (
                "Post a job",
                StepKind::JobPosting,
                &[Company],
                &[Account, Company, JobPosting],
            ),
            ScreenName::CompanyDashboard => (
                "Insights",
                StepKind::Empty,
                &[Account],
                &[Account, Company, JobPosting],
            ),
        };
    Binding {
        screen,
        title,
        produces,
        requires,
        reads,
    }
}

/// The set of screens active for this session.
#[derive(Clone, Debug)]
pub struct Registry {
    bindings: Vec<Binding>,
    entry: ScreenName,
}

impl Registry {
    /// Every screen, starting at the splash.
    pub fn standard() -> Self {
        Self {
            bindings: ALL_SCREENS.iter().map(|s| binding(*s)).collect(),
            entry: ScreenName::Splash,
        }
    }

    /// The candidate flow only: employer screens are not registered.
    pub fn candidate_only() -> Self {
        let employer = [
            ScreenName::CompanyRegistration,
            ScreenName::JobPosting,
            ScreenName::CompanyDashboard,
        ];
        Self {
            bindings: ALL_SCREENS
                .iter()
                .filter(|s| !employer.contains(s))
                .map(|s| binding(*s))
                .collect(),
            entry: ScreenName::Splash,
        }
    }

    pub fn entry(&self) -> ScreenName {
        self.entry
    }

    pub fn resolve(&self, screen: ScreenName) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.screen == screen)
    }

    /// Resolve a raw tag, e.g. from a mirror or the URL hash.
    pub fn resolve_tag(&self, tag: &str) -> Option<&Binding> {
        ScreenName::from_tag(tag).and_then(|s| self.resolve(s))
    }

    pub fn contains(&self, screen: ScreenName) -> bool {
        self.resolve(screen).is_some()
    }

    pub fn screens(&self) -> impl Iterator<Item = ScreenName> + '_ {
        self.bindings.iter().map(|b| b.screen)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
