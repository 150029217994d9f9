//! Navigation store: sole owner of the current screen and session data.
//!
//! Every successful `advance`, `go_back`, `reset` or `resume` publishes
//! exactly one [`Notification`], after the mutation is complete. Failed
//! transitions publish nothing and leave the store untouched.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::NavError;
use crate::registry::{Registry, ScreenName};
use crate::state::{ApplicationState, StepData, StepKind};

/// Default bound on the back stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionCause {
    Advance,
    Back,
    Reset,
    /// Explicit "resume session" from a mirrored value.
    Resume,
}

/// Published once per logical transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Starts at 1 and increases by exactly one per notification.
    pub seq: u64,
    pub screen: ScreenName,
    pub cause: TransitionCause,
}

/// Receives store notifications. Observers never see the store itself.
pub trait NavObserver {
    fn on_change(&mut self, notification: &Notification);
}

impl<T: NavObserver + ?Sized> NavObserver for Rc<RefCell<T>> {
    fn on_change(&mut self, notification: &Notification) {
        self.borrow_mut().on_change(notification);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Everything observable about a store, for comparisons in tests and
/// diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub current: ScreenName,
    pub state: ApplicationState,
    pub history: Vec<ScreenName>,
    pub seq: u64,
}

pub struct NavigationStore {
    registry: Registry,
    current: ScreenName,
    state: ApplicationState,
    history: Vec<ScreenName>,
    history_limit: usize,
    seq: u64,
    observers: Vec<(SubscriptionId, Box<dyn NavObserver>)>,
    next_subscription: u64,
}

impl NavigationStore {
    /// Start at the registry's entry screen with empty data.
    pub fn new(registry: Registry) -> Self {
        let entry = registry.entry();
        Self {
            registry,
            current: entry,
            state: ApplicationState::default(),
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            seq: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Start at `screen`, falling back to the entry screen if it is not
    /// registered or needs data a fresh session cannot have.
    pub fn with_initial(registry: Registry, screen: ScreenName) -> Self {
        let mut store = Self::new(registry);
        match store.check_entry(screen) {
            Ok(()) => store.current = screen,
            Err(e) => tracing::warn!(
                error = %e,
                fallback = %store.current,
                "initial screen rejected, using entry screen"
            ),
        }
        store
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn current(&self) -> ScreenName {
        self.current
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn history(&self) -> &[ScreenName] {
        &self.history
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Sequence number of the last published notification (0 = none yet).
    pub fn last_seq(&self) -> u64 {
        self.seq
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            current: self.current,
            state: self.state.clone(),
            history: self.history.clone(),
            seq: self.seq,
        }
    }

    pub fn subscribe(&mut self, observer: impl NavObserver + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Merge `data` into the session and move to `next`.
    pub fn advance(&mut self, next: ScreenName, data: StepData) -> Result<(), NavError> {
        if !self.registry.contains(next) {
            tracing::warn!(screen = %next, "advance to unregistered screen rejected");
            return Err(NavError::UnknownScreen(next.tag().to_string()));
        }

        let expected = self
            .registry
            .resolve(self.current)
            .map(|b| b.produces)
            .unwrap_or(StepKind::Empty);
        let got = data.kind();
        if got != StepKind::Empty && got != expected {
            tracing::warn!(
                screen = %self.current,
                ?expected,
                ?got,
                "payload does not match producing screen"
            );
            return Err(NavError::PayloadMismatch {
                screen: self.current,
                expected,
                got,
            });
        }

        self.state.merge(data);
        self.push_history(self.current);
        self.current = next;
        self.publish(TransitionCause::Advance);
        Ok(())
    }

    /// Like [`advance`](Self::advance) for a raw tag.
    pub fn advance_tag(&mut self, tag: &str, data: StepData) -> Result<(), NavError> {
        match self.registry.resolve_tag(tag) {
            Some(binding) => {
                let screen = binding.screen;
                self.advance(screen, data)
            }
            None => {
                tracing::warn!(tag, "advance to unknown screen tag rejected");
                Err(NavError::UnknownScreen(tag.to_string()))
            }
        }
    }

    /// Return to the previous screen. Collected data is kept.
    ///
    /// Returns `false` (and publishes nothing) when there is no history.
    pub fn go_back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            tracing::debug!(screen = %self.current, "go_back with empty history ignored");
            return false;
        };
        self.current = previous;
        self.publish(TransitionCause::Back);
        true
    }

    /// Clear everything and return to the entry screen (logout / restart).
    pub fn reset(&mut self) {
        self.state = ApplicationState::default();
        self.history.clear();
        self.current = self.registry.entry();
        self.publish(TransitionCause::Reset);
    }

    /// Jump to a screen recovered from a mirror. Only called from an explicit
    /// user action.
    pub fn resume(&mut self, screen: ScreenName) -> Result<(), NavError> {
        if let Err(e) = self.check_entry(screen) {
            tracing::warn!(error = %e, "resume rejected");
            return Err(e);
        }
        self.push_history(self.current);
        self.current = screen;
        self.publish(TransitionCause::Resume);
        Ok(())
    }

    /// Whether `screen` may be entered outside the normal flow with the data
    /// collected so far.
    fn check_entry(&self, screen: ScreenName) -> Result<(), NavError> {
        let binding = self
            .registry
            .resolve(screen)
            .ok_or_else(|| NavError::UnknownScreen(screen.tag().to_string()))?;
        let missing = binding.missing(&self.state);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(NavError::MissingSections { screen, missing })
        }
    }

    fn push_history(&mut self, screen: ScreenName) {
        self.history.push(screen);
        if self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(..excess);
        }
    }

    fn publish(&mut self, cause: TransitionCause) {
        self.seq += 1;
        let notification = Notification {
            seq: self.seq,
            screen: self.current,
            cause,
        };
        tracing::debug!(
            seq = notification.seq,
            screen = %notification.screen,
            ?cause,
            "navigation"
        );
        for (_, observer) in &mut self.observers {
            observer.on_change(&notification);
        }
    }
}

impl fmt::Debug for NavigationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationStore")
            .field("current", &self.current)
            .field("history", &self.history)
            .field("seq", &self.seq)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        BasicInfo, Credentials, DreamJob, JobArea, Role, Section, Seniority, WorkModel,
    };
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Notification>,
    }

    impl NavObserver for Recorder {
        fn on_change(&mut self, notification: &Notification) {
            self.seen.push(*notification);
        }
    }

    fn recorded(store: &mut NavigationStore) -> Rc<RefCell<Recorder>> {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        store.subscribe(recorder.clone());
        recorder
    }

    fn basic(name: &str) -> StepData {
        StepData::BasicInfo(BasicInfo {
            full_name: name.into(),
            email: "ana@example.com".into(),
            phone: None,
            city: "Porto".into(),
        })
    }

    fn store_at(screen: ScreenName) -> NavigationStore {
        NavigationStore::with_initial(Registry::standard(), screen)
    }

    #[test]
    fn starts_at_entry_with_empty_state() {
        let store = NavigationStore::new(Registry::standard());
        assert_eq!(store.current(), ScreenName::Splash);
        assert!(store.state().is_empty());
        assert!(!store.can_go_back());
        assert_eq!(store.last_seq(), 0);
    }

    #[test]
    fn unregistered_initial_screen_falls_back_to_entry() {
        let store = NavigationStore::with_initial(Registry::candidate_only(), ScreenName::JobPosting);
        assert_eq!(store.current(), ScreenName::Splash);
    }

    #[test]
    fn candidate_scenario_keeps_data_on_back() {
        let mut store = store_at(ScreenName::ProfileSelection);

        store
            .advance(ScreenName::CandidateRegistration, StepData::Role(Role::Candidate))
            .unwrap();
        assert_eq!(store.current(), ScreenName::CandidateRegistration);
        assert_eq!(store.state().role, Some(Role::Candidate));

        store.advance(ScreenName::DreamJobBuilder, basic("Ana")).unwrap();
        assert_eq!(store.current(), ScreenName::DreamJobBuilder);
        assert_eq!(store.state().role, Some(Role::Candidate));
        assert_eq!(store.state().display_name(), Some("Ana"));

        assert!(store.go_back());
        assert_eq!(store.current(), ScreenName::CandidateRegistration);
        assert_eq!(store.state().role, Some(Role::Candidate));
        assert_eq!(store.state().display_name(), Some("Ana"));
    }

    #[test]
    fn unknown_tag_leaves_store_unchanged() {
        let mut store = store_at(ScreenName::ProfileSelection);
        store
            .advance(ScreenName::CandidateRegistration, StepData::Role(Role::Candidate))
            .unwrap();
        let recorder = recorded(&mut store);
        let before = store.snapshot();

        let err = store.advance_tag("not-a-real-screen", basic("x")).unwrap_err();
        assert_eq!(err, NavError::UnknownScreen("not-a-real-screen".into()));
        assert_eq!(store.snapshot(), before);
        assert!(recorder.borrow().seen.is_empty());
    }

    #[test]
    fn unregistered_screen_is_unknown() {
        let mut store = NavigationStore::with_initial(
            Registry::candidate_only(),
            ScreenName::ProfileSelection,
        );
        let before = store.snapshot();
        let err = store
            .advance(ScreenName::CompanyRegistration, StepData::Role(Role::Company))
            .unwrap_err();
        assert_eq!(err, NavError::UnknownScreen("company-registration".into()));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn mismatched_payload_is_rejected_without_mutation() {
        let mut store = store_at(ScreenName::ProfileSelection);
        let before = store.snapshot();
        let err = store
            .advance(ScreenName::CandidateRegistration, basic("Ana"))
            .unwrap_err();
        assert_eq!(
            err,
            NavError::PayloadMismatch {
                screen: ScreenName::ProfileSelection,
                expected: StepKind::Role,
                got: StepKind::BasicInfo,
            }
        );
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn go_back_on_empty_history_is_noop() {
        let mut store = store_at(ScreenName::LoginSelection);
        let recorder = recorded(&mut store);
        let before = store.snapshot();
        assert!(!store.go_back());
        assert_eq!(store.snapshot(), before);
        assert!(recorder.borrow().seen.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = store_at(ScreenName::Login);
        store
            .advance(
                ScreenName::CandidatePage,
                StepData::SignIn(Credentials {
                    email: "ana@example.com".into(),
                    role: Role::Candidate,
                }),
            )
            .unwrap();
        store.reset();
        assert_eq!(store.current(), ScreenName::Splash);
        assert!(store.state().is_empty());
        assert!(store.history().is_empty());
    }

    #[test]
    fn one_notification_per_transition() {
        let mut store = store_at(ScreenName::ProfileSelection);
        let recorder = recorded(&mut store);

        store
            .advance(ScreenName::CandidateRegistration, StepData::Role(Role::Candidate))
            .unwrap();
        store.go_back();
        store.reset();
        store.resume(ScreenName::LoginSelection).unwrap();

        let seen = &recorder.borrow().seen;
        let causes: Vec<TransitionCause> = seen.iter().map(|n| n.cause).collect();
        assert_eq!(
            causes,
            vec![
                TransitionCause::Advance,
                TransitionCause::Back,
                TransitionCause::Reset,
                TransitionCause::Resume,
            ]
        );
        let seqs: Vec<u64> = seen.iter().map(|n| n.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
        assert_eq!(seen[0].screen, ScreenName::CandidateRegistration);
        assert_eq!(seen[1].screen, ScreenName::ProfileSelection);
        assert_eq!(seen[2].screen, ScreenName::Splash);
        assert_eq!(seen[3].screen, ScreenName::LoginSelection);
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let mut store = store_at(ScreenName::LoginSelection);
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let id = store.subscribe(recorder.clone());
        store.advance(ScreenName::Login, StepData::Empty).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.go_back();
        assert_eq!(recorder.borrow().seen.len(), 1);
    }

    #[test]
    fn history_is_bounded() {
        let mut store = store_at(ScreenName::LoginSelection).with_history_limit(3);
        for _ in 0..5 {
            store.advance(ScreenName::Login, StepData::Empty).unwrap();
            store.advance(ScreenName::LoginSelection, StepData::Empty).unwrap();
        }
        assert_eq!(store.history().len(), 3);
    }

    #[test]
    fn initial_screen_with_missing_sections_falls_back_to_entry() {
        assert_eq!(store_at(ScreenName::CandidatePage).current(), ScreenName::Splash);
        assert_eq!(store_at(ScreenName::DreamJobBuilder).current(), ScreenName::Splash);
        assert_eq!(store_at(ScreenName::Login).current(), ScreenName::Login);
    }

    #[test]
    fn resume_needs_required_sections() {
        let mut store = store_at(ScreenName::ProfileSelection);
        let before = store.snapshot();
        let err = store.resume(ScreenName::CompanyDashboard).unwrap_err();
        assert_eq!(
            err,
            NavError::MissingSections {
                screen: ScreenName::CompanyDashboard,
                missing: vec![Section::Account],
            }
        );
        assert_eq!(store.snapshot(), before);

        store
            .advance(ScreenName::CompanyRegistration, StepData::Role(Role::Company))
            .unwrap();
        store.resume(ScreenName::CandidateRegistration).unwrap();
        assert_eq!(store.current(), ScreenName::CandidateRegistration);
    }

    #[test]
    fn resume_rejects_unregistered_screen() {
        let mut store = NavigationStore::new(Registry::candidate_only());
        let before = store.snapshot();
        assert!(store.resume(ScreenName::CompanyDashboard).is_err());
        assert_eq!(store.snapshot(), before);
    }

    // ── properties ─────────────────────────────────────────────────

    fn sample_payload(kind: StepKind, seed: u8) -> StepData {
        let name = format!("user-{seed}");
        match kind {
            StepKind::Role => StepData::Role(if seed % 2 == 0 {
                Role::Candidate
            } else {
                Role::Company
            }),
            StepKind::BasicInfo => basic(&name),
            StepKind::DreamJob => StepData::DreamJob(DreamJob {
                area: JobArea::Data,
                seniority: Seniority::Mid,
                work_model: WorkModel::Remote,
                salary_floor: seed as u32 * 100,
            }),
            StepKind::SignIn => StepData::SignIn(Credentials {
                email: format!("{name}@example.com"),
                role: Role::Candidate,
            }),
            _ => StepData::Empty,
        }
    }

    /// Screens whose payload `sample_payload` can build, plus data-less ones.
    const PROP_SCREENS: [ScreenName; 6] = [
        ScreenName::LoginSelection,
        ScreenName::Login,
        ScreenName::ProfileSelection,
        ScreenName::CandidateRegistration,
        ScreenName::DreamJobBuilder,
        ScreenName::CandidatePage,
    ];

    proptest! {
        #[test]
        fn advance_sequence_ends_on_last_target_with_merged_state(
            steps in prop::collection::vec((0usize..PROP_SCREENS.len(), any::<bool>(), any::<u8>()), 1..30)
        ) {
            let mut store = store_at(ScreenName::LoginSelection);
            let recorder = recorded(&mut store);
            let mut role = None;
            let mut account = None;
            let mut basic_info = None;
            let mut dream_job = None;
            let mut last = store.current();

            for (idx, with_data, seed) in &steps {
                let next = PROP_SCREENS[*idx];
                let produces = store.registry().resolve(store.current()).unwrap().produces;
                let data = if *with_data { sample_payload(produces, *seed) } else { StepData::Empty };
                match &data {
                    StepData::Role(r) => role = Some(*r),
                    StepData::SignIn(c) => { role = Some(c.role); account = Some(c.clone()); }
                    StepData::BasicInfo(b) => basic_info = Some(b.clone()),
                    StepData::DreamJob(d) => dream_job = Some(d.clone()),
                    _ => {}
                }
                store.advance(next, data).unwrap();
                last = next;
            }

            prop_assert_eq!(store.current(), last);
            prop_assert_eq!(store.state().role, role);
            prop_assert_eq!(store.state().authenticated, account.is_some());
            prop_assert_eq!(&store.state().account, &account);
            prop_assert_eq!(&store.state().basic_info, &basic_info);
            prop_assert_eq!(&store.state().dream_job, &dream_job);
            prop_assert_eq!(recorder.borrow().seen.len(), steps.len());
        }

        #[test]
        fn go_back_returns_to_previous_screen_and_keeps_data(
            targets in prop::collection::vec(0usize..PROP_SCREENS.len(), 1..20)
        ) {
            let mut store = store_at(ScreenName::LoginSelection);
            let mut visited = vec![store.current()];
            for idx in &targets {
                store.advance(PROP_SCREENS[*idx], StepData::Empty).unwrap();
                visited.push(PROP_SCREENS[*idx]);
            }
            let state_before = store.state().clone();
            let seq_before = store.last_seq();

            prop_assert!(store.go_back());
            prop_assert_eq!(store.current(), visited[visited.len() - 2]);
            prop_assert_eq!(store.state(), &state_before);
            prop_assert_eq!(store.last_seq(), seq_before + 1);
        }

        #[test]
        fn reset_always_lands_on_entry(
            depth in 0usize..40
        ) {
            let mut store = store_at(ScreenName::LoginSelection);
            for i in 0..depth {
                let next = PROP_SCREENS[i % PROP_SCREENS.len()];
                store.advance(next, StepData::Empty).unwrap();
            }
            let seq_before = store.last_seq();
            store.reset();
            prop_assert_eq!(store.current(), ScreenName::Splash);
            prop_assert!(store.state().is_empty());
            prop_assert!(!store.can_go_back());
            prop_assert_eq!(store.last_seq(), seq_before + 1);
        }
    }
}
