//! Accumulated session data and the per-screen payloads that build it.

use serde::{Deserialize, Serialize};

/// Which side of the job board the user is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Company,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Candidate => "Candidate",
            Role::Company => "Company",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkModel {
    Remote,
    Hybrid,
    OnSite,
}

pub const ALL_WORK_MODELS: [WorkModel; 3] = [WorkModel::Remote, WorkModel::Hybrid, WorkModel::OnSite];

impl WorkModel {
    pub fn label(self) -> &'static str {
        match self {
            WorkModel::Remote => "Remote",
            WorkModel::Hybrid => "Hybrid",
            WorkModel::OnSite => "On-site",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobArea {
    Engineering,
    Design,
    Product,
    Data,
    Marketing,
    Sales,
    Operations,
}

pub const ALL_JOB_AREAS: [JobArea; 7] = [
    JobArea::Engineering,
    JobArea::Design,
    JobArea::Product,
    JobArea::Data,
    JobArea::Marketing,
    JobArea::Sales,
    JobArea::Operations,
];

impl JobArea {
    pub fn label(self) -> &'static str {
        match self {
            JobArea::Engineering => "Engineering",
            JobArea::Design => "Design",
            JobArea::Product => "Product",
            JobArea::Data => "Data",
            JobArea::Marketing => "Marketing",
            JobArea::Sales => "Sales",
            JobArea::Operations => "Operations",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seniority {
    Intern,
    Junior,
    Mid,
    Senior,
    Lead,
}

pub const ALL_SENIORITIES: [Seniority; 5] = [
    Seniority::Intern,
    Seniority::Junior,
    Seniority::Mid,
    Seniority::Senior,
    Seniority::Lead,
];

impl Seniority {
    pub fn label(self) -> &'static str {
        match self {
            Seniority::Intern => "Intern",
            Seniority::Junior => "Junior",
            Seniority::Mid => "Mid-level",
            Seniority::Senior => "Senior",
            Seniority::Lead => "Lead",
        }
    }
}

/// Mentor avatars offered during onboarding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mentor {
    Strategist,
    Builder,
    Connector,
    Explorer,
}

pub const ALL_MENTORS: [Mentor; 4] = [
    Mentor::Strategist,
    Mentor::Builder,
    Mentor::Connector,
    Mentor::Explorer,
];

impl Mentor {
    pub fn name(self) -> &'static str {
        match self {
            Mentor::Strategist => "Sofia, the Strategist",
            Mentor::Builder => "Theo, the Builder",
            Mentor::Connector => "Lia, the Connector",
            Mentor::Explorer => "Rafa, the Explorer",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Mentor::Strategist => "Plans the long game and keeps you focused on the next step.",
            Mentor::Builder => "Hands-on. Pushes you to ship portfolio work every week.",
            Mentor::Connector => "Opens doors. Knows who is hiring before the posting goes up.",
            Mentor::Explorer => "Curious about everything. Good when you are changing careers.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Enterprise,
}

pub const ALL_COMPANY_SIZES: [CompanySize; 4] = [
    CompanySize::Startup,
    CompanySize::Small,
    CompanySize::Medium,
    CompanySize::Enterprise,
];

impl CompanySize {
    pub fn label(self) -> &'static str {
        match self {
            CompanySize::Startup => "1-10",
            CompanySize::Small => "11-50",
            CompanySize::Medium => "51-500",
            CompanySize::Enterprise => "500+",
        }
    }
}

// ── Payloads ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamJob {
    pub area: JobArea,
    pub seniority: Seniority,
    pub work_model: WorkModel,
    /// Monthly, in whole currency units.
    pub salary_floor: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorChoice {
    pub mentor: Mentor,
}

pub const PERSONALITY_QUESTIONS: [&str; 4] = [
    "I enjoy working with people I have never met before.",
    "I prefer a clear plan over improvising.",
    "I recover quickly after a bad day at work.",
    "I like to learn new tools on my own.",
];

/// Likert answers (1-5), one per [`PERSONALITY_QUESTIONS`] entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub answers: [u8; 4],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUpload {
    /// `None` when the candidate skipped the upload.
    pub file_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub sector: String,
    pub size: CompanySize,
    pub website: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub title: String,
    pub city: String,
    pub work_model: WorkModel,
    pub salary_min: u32,
    pub salary_max: u32,
}

/// Data a screen hands over on completion, keyed by what produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepData {
    Empty,
    Role(Role),
    SignIn(Credentials),
    BasicInfo(BasicInfo),
    DreamJob(DreamJob),
    Mentor(MentorChoice),
    Personality(PersonalityProfile),
    Resume(ResumeUpload),
    Company(CompanyProfile),
    JobPosting(JobPosting),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    Empty,
    Role,
    SignIn,
    BasicInfo,
    DreamJob,
    Mentor,
    Personality,
    Resume,
    Company,
    JobPosting,
}

impl StepData {
    pub fn kind(&self) -> StepKind {
        match self {
            StepData::Empty => StepKind::Empty,
            StepData::Role(_) => StepKind::Role,
            StepData::SignIn(_) => StepKind::SignIn,
            StepData::BasicInfo(_) => StepKind::BasicInfo,
            StepData::DreamJob(_) => StepKind::DreamJob,
            StepData::Mentor(_) => StepKind::Mentor,
            StepData::Personality(_) => StepKind::Personality,
            StepData::Resume(_) => StepKind::Resume,
            StepData::Company(_) => StepKind::Company,
            StepData::JobPosting(_) => StepKind::JobPosting,
        }
    }
}

/// Named slices of [`ApplicationState`] a screen may read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Role,
    Account,
    BasicInfo,
    DreamJob,
    Mentor,
    Personality,
    Resume,
    Company,
    JobPosting,
}

/// Everything the session has collected so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationState {
    pub role: Option<Role>,
    pub account: Option<Credentials>,
    pub authenticated: bool,
    pub basic_info: Option<BasicInfo>,
    pub dream_job: Option<DreamJob>,
    pub mentor: Option<MentorChoice>,
    pub personality: Option<PersonalityProfile>,
    pub resume: Option<ResumeUpload>,
    pub company: Option<CompanyProfile>,
    pub job_posting: Option<JobPosting>,
}

impl ApplicationState {
    /// Shallow merge: the payload's section replaces its namesake, the rest
    /// stays as it was.
    pub fn merge(&mut self, data: StepData) {
        match data {
            StepData::Empty => {}
            StepData::Role(role) => self.role = Some(role),
            StepData::SignIn(credentials) => {
                self.role = Some(credentials.role);
                self.account = Some(credentials);
                self.authenticated = true;
            }
            StepData::BasicInfo(info) => self.basic_info = Some(info),
            StepData::DreamJob(job) => self.dream_job = Some(job),
            StepData::Mentor(choice) => self.mentor = Some(choice),
            StepData::Personality(profile) => self.personality = Some(profile),
            // Finishing the candidate flow creates the account.
            StepData::Resume(resume) => {
                self.resume = Some(resume);
                self.authenticated = true;
            }
            StepData::Company(company) => self.company = Some(company),
            StepData::JobPosting(posting) => {
                self.job_posting = Some(posting);
                self.authenticated = true;
            }
        }
    }

    pub fn has(&self, section: Section) -> bool {
        match section {
            Section::Role => self.role.is_some(),
            Section::Account => self.account.is_some() || self.authenticated,
            Section::BasicInfo => self.basic_info.is_some(),
            Section::DreamJob => self.dream_job.is_some(),
            Section::Mentor => self.mentor.is_some(),
            Section::Personality => self.personality.is_some(),
            Section::Resume => self.resume.is_some(),
            Section::Company => self.company.is_some(),
            Section::JobPosting => self.job_posting.is_some(),
        }
    }

    /// Sections of `required` that are still empty.
    pub fn missing(&self, required: &[Section]) -> Vec<Section> {
        required.iter().copied().filter(|s| !self.has(*s)).collect()
    }

    /// A copy holding only `sections`; everything else is left at its default.
    pub fn only(&self, sections: &[Section]) -> ApplicationState {
        let mut view = ApplicationState::default();
        for section in sections {
            match section {
                Section::Role => view.role = self.role,
                Section::Account => {
                    view.account = self.account.clone();
                    view.authenticated = self.authenticated;
                }
                Section::BasicInfo => view.basic_info = self.basic_info.clone(),
                Section::DreamJob => view.dream_job = self.dream_job.clone(),
                Section::Mentor => view.mentor = self.mentor.clone(),
                Section::Personality => view.personality = self.personality.clone(),
                Section::Resume => view.resume = self.resume.clone(),
                Section::Company => view.company = self.company.clone(),
                Section::JobPosting => view.job_posting = self.job_posting.clone(),
            }
        }
        view
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Best display name collected so far.
    pub fn display_name(&self) -> Option<&str> {
        if let Some(info) = &self.basic_info {
            return Some(&info.full_name);
        }
        if let Some(company) = &self.company {
            return Some(&company.name);
        }
        self.account.as_ref().map(|a| a.email.as_str())
    }
}
