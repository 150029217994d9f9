//! Fire-and-forget requests to the account/profile/job service.
//!
//! Screens hand over an [`ApiRequest`]; the [`Outbox`] posts it as JSON and
//! records what happened. Navigation never waits on the response and nothing
//! is retried. Outcomes that arrive later are collected by [`Outbox::poll`]
//! for the status line.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;

use crate::state::{
    ApplicationState, BasicInfo, CompanyProfile, DreamJob, JobPosting, Mentor, PersonalityProfile,
};

/// Entries kept for display.
const OUTBOX_CAPACITY: usize = 20;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub basic_info: BasicInfo,
    pub dream_job: Option<DreamJob>,
    pub mentor: Option<Mentor>,
    pub personality: Option<PersonalityProfile>,
    pub resume_file: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub company: CompanyProfile,
    pub contact_email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub company_name: String,
    pub posting: JobPosting,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub job_id: u32,
    pub candidate_email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiRequest {
    CreateCandidate(CandidateRecord),
    CreateCompany(CompanyRecord),
    CreateJob(JobRecord),
    ApplyToJob(ApplicationRecord),
}

impl ApiRequest {
    pub fn path(&self) -> &'static str {
        match self {
            ApiRequest::CreateCandidate(_) => "/candidates",
            ApiRequest::CreateCompany(_) => "/companies",
            ApiRequest::CreateJob(_) => "/jobs",
            ApiRequest::ApplyToJob(_) => "/applications",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApiRequest::CreateCandidate(_) => "create candidate",
            ApiRequest::CreateCompany(_) => "create company",
            ApiRequest::CreateJob(_) => "post job",
            ApiRequest::ApplyToJob(_) => "apply",
        }
    }

    pub fn body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The candidate record, once basic info exists.
    pub fn candidate(state: &ApplicationState) -> Option<ApiRequest> {
        let basic_info = state.basic_info.clone()?;
        Some(ApiRequest::CreateCandidate(CandidateRecord {
            basic_info,
            dream_job: state.dream_job.clone(),
            mentor: state.mentor.as_ref().map(|m| m.mentor),
            personality: state.personality.clone(),
            resume_file: state.resume.as_ref().and_then(|r| r.file_name.clone()),
        }))
    }

    pub fn company(state: &ApplicationState) -> Option<ApiRequest> {
        let company = state.company.clone()?;
        Some(ApiRequest::CreateCompany(CompanyRecord {
            company,
            contact_email: state.account.as_ref().map(|a| a.email.clone()),
        }))
    }

    pub fn job(company: &CompanyProfile, posting: &JobPosting) -> ApiRequest {
        ApiRequest::CreateJob(JobRecord {
            company_name: company.name.clone(),
            posting: posting.clone(),
        })
    }
}

/// Outcomes reported after [`Transport::post`] returned, by request id.
pub type Completions = Rc<RefCell<Vec<(u64, Result<(), String>)>>>;

/// What `post` knows when it returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Done,
    /// The outcome will be pushed to the completions list under the id.
    Pending,
}

/// Delivers a request body somewhere.
pub trait Transport {
    fn post(
        &mut self,
        id: u64,
        url: &str,
        body: &str,
        completions: &Completions,
    ) -> Result<Delivery, String>;
}

/// Drops everything; used where no network exists.
pub struct NullTransport;

impl Transport for NullTransport {
    fn post(
        &mut self,
        _id: u64,
        url: &str,
        _body: &str,
        _: &Completions,
    ) -> Result<Delivery, String> {
        tracing::debug!(url, "no transport, request dropped");
        Ok(Delivery::Done)
    }
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;

#[cfg(target_arch = "wasm32")]
mod fetch {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use super::{Completions, Delivery, Transport};

    /// `window.fetch` POST with a JSON body. Network errors and non-2xx
    /// responses are reported through the completions list.
    pub struct FetchTransport;

    impl Transport for FetchTransport {
        fn post(
            &mut self,
            id: u64,
            url: &str,
            body: &str,
            completions: &Completions,
        ) -> Result<Delivery, String> {
            let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
            let headers = web_sys::Headers::new().map_err(|e| format!("{e:?}"))?;
            headers
                .set("Content-Type", "application/json")
                .map_err(|e| format!("{e:?}"))?;

            let init = web_sys::RequestInit::new();
            init.set_method("POST");
            init.set_headers(&headers);
            init.set_body(&js_sys::JsString::from(body));

            let promise = window.fetch_with_str_and_init(url, &init);
            let completions = completions.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match JsFuture::from(promise).await {
                    Ok(value) => match value.dyn_into::<web_sys::Response>() {
                        Ok(response) if response.ok() => Ok(()),
                        Ok(response) => Err(format!(
                            "HTTP {} {}",
                            response.status(),
                            response.status_text()
                        )),
                        Err(_) => Err("fetch resolved to a non-response".to_string()),
                    },
                    Err(e) => Err(e
                        .as_string()
                        .unwrap_or_else(|| "network error".to_string())),
                };
                completions.borrow_mut().push((id, outcome));
            });
            Ok(Delivery::Pending)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestStatus {
    /// Handed to the network, no answer yet.
    Pending,
    Sent,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct OutboxEntry {
    pub id: u64,
    pub request: ApiRequest,
    pub status: RequestStatus,
}

pub struct Outbox {
    base: String,
    transport: Box<dyn Transport>,
    entries: VecDeque<OutboxEntry>,
    next_id: u64,
    completions: Completions,
}

impl Outbox {
    pub fn new(base: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            transport,
            entries: VecDeque::new(),
            next_id: 0,
            completions: Completions::default(),
        }
    }

    /// The transport for the current target.
    pub fn platform(base: impl Into<String>) -> Self {
        #[cfg(target_arch = "wasm32")]
        let transport: Box<dyn Transport> = Box::new(FetchTransport);
        #[cfg(not(target_arch = "wasm32"))]
        let transport: Box<dyn Transport> = Box::new(NullTransport);
        Self::new(base, transport)
    }

    pub fn url(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base, request.path())
    }

    pub fn submit(&mut self, request: ApiRequest) -> &OutboxEntry {
        self.next_id += 1;
        let url = self.url(&request);
        let status = match request.body() {
            Ok(body) => match self
                .transport
                .post(self.next_id, &url, &body, &self.completions)
            {
                Ok(Delivery::Done) => {
                    tracing::info!(id = self.next_id, %url, "{} sent", request.label());
                    RequestStatus::Sent
                }
                Ok(Delivery::Pending) => {
                    tracing::debug!(id = self.next_id, %url, "{} pending", request.label());
                    RequestStatus::Pending
                }
                Err(e) => {
                    tracing::warn!(id = self.next_id, %url, error = %e, "{} failed", request.label());
                    RequestStatus::Failed(e)
                }
            },
            Err(e) => {
                tracing::warn!(id = self.next_id, error = %e, "request body not serializable");
                RequestStatus::Failed(e.to_string())
            }
        };

        if self.entries.len() == OUTBOX_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(OutboxEntry {
            id: self.next_id,
            request,
            status,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Apply outcomes that arrived since the last call and return the
    /// entries they settled.
    pub fn poll(&mut self) -> Vec<OutboxEntry> {
        let arrived: Vec<(u64, Result<(), String>)> =
            self.completions.borrow_mut().drain(..).collect();
        let mut settled = Vec::new();
        for (id, outcome) in arrived {
            let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
                tracing::debug!(id, "outcome for an evicted request");
                continue;
            };
            entry.status = match outcome {
                Ok(()) => {
                    tracing::info!(id, "{} delivered", entry.request.label());
                    RequestStatus::Sent
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "{} rejected", entry.request.label());
                    RequestStatus::Failed(e)
                }
            };
            settled.push(entry.clone());
        }
        settled
    }

    pub fn entries(&self) -> impl Iterator<Item = &OutboxEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&OutboxEntry> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CompanySize, Credentials, MentorChoice, Role, StepData, WorkModel};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recording {
        posts: Rc<RefCell<Vec<(String, String)>>>,
        fail: bool,
    }

    impl Transport for Recording {
        fn post(
            &mut self,
            _id: u64,
            url: &str,
            body: &str,
            _: &Completions,
        ) -> Result<Delivery, String> {
            if self.fail {
                return Err("offline".into());
            }
            self.posts.borrow_mut().push((url.to_string(), body.to_string()));
            Ok(Delivery::Done)
        }
    }

    /// Answers later, the way `fetch` does.
    #[derive(Default)]
    struct Deferred {
        completions: Rc<RefCell<Option<Completions>>>,
    }

    impl Transport for Deferred {
        fn post(
            &mut self,
            _id: u64,
            _url: &str,
            _body: &str,
            completions: &Completions,
        ) -> Result<Delivery, String> {
            *self.completions.borrow_mut() = Some(completions.clone());
            Ok(Delivery::Pending)
        }
    }

    fn candidate_state() -> ApplicationState {
        let mut state = ApplicationState::default();
        state.merge(StepData::Role(Role::Candidate));
        state.merge(StepData::BasicInfo(BasicInfo {
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: Some("+351 900 000 000".into()),
            city: "Lisbon".into(),
        }));
        state.merge(StepData::Mentor(MentorChoice {
            mentor: Mentor::Builder,
        }));
        state
    }

    #[test]
    fn candidate_requires_basic_info() {
        assert!(ApiRequest::candidate(&ApplicationState::default()).is_none());
        let request = ApiRequest::candidate(&candidate_state()).unwrap();
        assert_eq!(request.path(), "/candidates");
        let body = request.body().unwrap();
        assert!(body.contains("\"fullName\":\"Ana\""));
        assert!(body.contains("\"mentor\":\"builder\""));
        assert!(!body.contains("CreateCandidate"));
    }

    #[test]
    fn company_carries_contact_email() {
        let mut state = ApplicationState::default();
        state.merge(StepData::SignIn(Credentials {
            email: "hr@acme.io".into(),
            role: Role::Company,
        }));
        state.company = Some(CompanyProfile {
            name: "Acme".into(),
            sector: "Retail".into(),
            size: CompanySize::Small,
            website: None,
        });
        let body = ApiRequest::company(&state).unwrap().body().unwrap();
        assert!(body.contains("\"contactEmail\":\"hr@acme.io\""));
    }

    #[test]
    fn outbox_posts_to_base_plus_path() {
        let transport = Recording::default();
        let posts = transport.posts.clone();
        let mut outbox = Outbox::new("https://api.ravyz.io/", Box::new(transport));

        let posting = JobPosting {
            title: "Data analyst".into(),
            city: "Porto".into(),
            work_model: WorkModel::Hybrid,
            salary_min: 1_800,
            salary_max: 2_400,
        };
        let company = CompanyProfile {
            name: "Acme".into(),
            sector: "Retail".into(),
            size: CompanySize::Medium,
            website: Some("acme.io".into()),
        };
        let entry = outbox.submit(ApiRequest::job(&company, &posting));
        assert_eq!(entry.status, RequestStatus::Sent);
        assert_eq!(entry.id, 1);

        let posts = posts.borrow();
        assert_eq!(posts[0].0, "https://api.ravyz.io/jobs");
        assert!(posts[0].1.contains("\"companyName\":\"Acme\""));
    }

    #[test]
    fn failures_are_recorded_not_retried() {
        let transport = Recording {
            fail: true,
            ..Recording::default()
        };
        let mut outbox = Outbox::new("/api", Box::new(transport));
        let request = ApiRequest::ApplyToJob(ApplicationRecord {
            job_id: 7,
            candidate_email: "ana@example.com".into(),
        });
        outbox.submit(request);
        assert_eq!(
            outbox.last().map(|e| e.status.clone()),
            Some(RequestStatus::Failed("offline".into()))
        );
        assert_eq!(outbox.entries().count(), 1);
    }

    #[test]
    fn late_failure_settles_pending_entry() {
        let transport = Deferred::default();
        let handle = transport.completions.clone();
        let mut outbox = Outbox::new("/api", Box::new(transport));
        let entry = outbox.submit(ApiRequest::ApplyToJob(ApplicationRecord {
            job_id: 3,
            candidate_email: "ana@example.com".into(),
        }));
        assert_eq!(entry.status, RequestStatus::Pending);
        assert!(outbox.poll().is_empty());

        let completions = handle.borrow().clone().unwrap();
        completions.borrow_mut().push((1, Err("HTTP 500 Internal Server Error".into())));
        let settled = outbox.poll();
        assert_eq!(settled.len(), 1);
        assert_eq!(
            settled[0].status,
            RequestStatus::Failed("HTTP 500 Internal Server Error".into())
        );
        assert_eq!(outbox.last().map(|e| &e.status), Some(&settled[0].status));
        assert!(outbox.poll().is_empty());
    }

    #[test]
    fn outbox_is_bounded() {
        let mut outbox = Outbox::new("/api", Box::new(NullTransport));
        for id in 0..(OUTBOX_CAPACITY as u32 + 5) {
            outbox.submit(ApiRequest::ApplyToJob(ApplicationRecord {
                job_id: id,
                candidate_email: "a@b.c".into(),
            }));
        }
        assert_eq!(outbox.entries().count(), OUTBOX_CAPACITY);
        assert_eq!(outbox.entries().next().map(|e| e.id), Some(6));
    }
}
