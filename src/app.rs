//! Application wiring: store, mounted screen, mirrors, overlay and outbox.
//!
//! `App` is the only thing that calls store operations. Screens answer input
//! with a [`ScreenAction`] and the app translates it; after every transition
//! the old screen is torn down and the new current screen is mounted fresh.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::api::{ApiRequest, Outbox, OutboxEntry, RequestStatus};
use crate::config::Config;
use crate::diagnostics::{Diagnostics, TOGGLE_DIAGNOSTICS};
use crate::error::{MirrorError, StaleMirror};
use crate::input::{ClickState, InputEvent};
use crate::mirror::{Mirror, ScreenMirror};
use crate::screens::{self, Screen, ScreenAction};
use crate::state::ApplicationState;
use crate::store::NavigationStore;

/// Click action of the "resume" hint on the status line.
pub const RESUME_STALE: u16 = 201;

/// How often mirrors are compared with the store.
const MIRROR_CHECK_MS: f64 = 1_000.0;

pub type SharedMirror = Rc<RefCell<dyn ScreenMirror>>;

/// Mirrors handed to [`App::new`].
#[derive(Default)]
pub struct AppMirrors {
    /// Read once at startup when `restore_on_start` is set.
    pub recovery: Option<SharedMirror>,
    /// Written on every transition, never read at startup.
    pub shadows: Vec<SharedMirror>,
}

impl AppMirrors {
    /// `localStorage` recovery plus the URL hash on wasm; in-memory elsewhere.
    pub fn platform(config: &Config) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            use crate::mirror::{HashMedium, LocalStorageMedium};
            let recovery: SharedMirror = Rc::new(RefCell::new(Mirror::new(
                LocalStorageMedium::new(config.storage_key.clone()),
            )));
            let mut shadows: Vec<SharedMirror> = Vec::new();
            if config.hash_mirror {
                shadows.push(Rc::new(RefCell::new(Mirror::new(HashMedium))));
            }
            Self {
                recovery: Some(recovery),
                shadows,
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = config;
            Self {
                recovery: Some(Rc::new(RefCell::new(Mirror::new(
                    crate::mirror::MemoryMedium::new(),
                )))),
                shadows: Vec::new(),
            }
        }
    }
}

/// One line of feedback under the screen.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App {
    config: Config,
    store: NavigationStore,
    screen: Box<dyn Screen>,
    /// Store sequence number the mounted screen was built for.
    mounted_seq: u64,
    mirrors: Vec<SharedMirror>,
    diagnostics: Rc<RefCell<Diagnostics>>,
    outbox: Outbox,
    show_diagnostics: bool,
    status: Option<Status>,
    stale: Vec<StaleMirror>,
    since_check_ms: f64,
}

impl App {
    pub fn new(config: Config, mirrors: AppMirrors, outbox: Outbox) -> Self {
        let registry = config.registry();
        let mut status = None;

        let seeded = match (&mirrors.recovery, config.restore_on_start) {
            (Some(mirror), true) => match mirror.borrow().seed(&registry) {
                Ok(screen) => {
                    tracing::info!(screen = %screen, "restored last screen");
                    Some(screen)
                }
                Err(MirrorError::Missing) => {
                    tracing::debug!("nothing to restore, starting at entry");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "could not restore last screen, starting at entry");
                    status = Some(Status::Error(format!("Could not restore your session: {e}")));
                    None
                }
            },
            _ => None,
        };

        let store = match seeded {
            Some(screen) => NavigationStore::with_initial(registry, screen),
            None => NavigationStore::new(registry),
        };
        let mut store = store.with_history_limit(config.history_limit);
        if let Some(screen) = seeded.filter(|s| *s != store.current()) {
            // The mirror holds only the screen, so deep screens cannot resume
            // into an empty session.
            status = Some(Status::Info(format!(
                "Your session at {screen} has expired, please start again"
            )));
        }

        let diagnostics = Rc::new(RefCell::new(Diagnostics::new()));
        store.subscribe(diagnostics.clone());

        let all: Vec<SharedMirror> = mirrors.recovery.into_iter().chain(mirrors.shadows).collect();
        for mirror in &all {
            store.subscribe(mirror.clone());
        }

        let screen = screens::mount(store.current(), store.state(), &config);
        Self {
            show_diagnostics: config.show_diagnostics,
            mounted_seq: store.last_seq(),
            config,
            store,
            screen,
            mirrors: all,
            diagnostics,
            outbox,
            status,
            stale: Vec::new(),
            since_check_ms: 0.0,
        }
    }

    pub fn store(&self) -> &NavigationStore {
        &self.store
    }

    /// The screen currently mounted.
    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    pub fn diagnostics(&self) -> &Rc<RefCell<Diagnostics>> {
        &self.diagnostics
    }

    pub fn show_diagnostics(&self) -> bool {
        self.show_diagnostics
    }

    /// Mirrors that disagreed with the store at the last check.
    pub fn stale(&self) -> &[StaleMirror] {
        &self.stale
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::F(2) | InputEvent::Click(TOGGLE_DIAGNOSTICS) => {
                self.show_diagnostics = !self.show_diagnostics;
                return;
            }
            InputEvent::F(3) | InputEvent::Click(RESUME_STALE) => {
                self.resume_stale();
                return;
            }
            _ => {}
        }

        let view = self.view();
        if let Some(action) = self.screen.handle_input(&event, &view) {
            self.apply(action);
        }
    }

    /// Advance screen timers and, once a second, compare mirrors with the
    /// store.
    pub fn tick(&mut self, delta_ms: f64) {
        if let Some(action) = self.screen.tick(delta_ms) {
            self.apply(action);
        }
        for entry in self.outbox.poll() {
            self.status = Some(request_status(&entry));
        }
        self.since_check_ms += delta_ms;
        if self.since_check_ms >= MIRROR_CHECK_MS {
            self.since_check_ms = 0.0;
            self.check_mirrors();
        }
    }

    pub fn check_mirrors(&mut self) {
        let stale: Vec<StaleMirror> = self
            .mirrors
            .iter()
            .filter_map(|m| m.borrow().check())
            .collect();
        let health = self.mirrors.iter().map(|m| m.borrow().health()).collect();
        let mut diagnostics = self.diagnostics.borrow_mut();
        diagnostics.report_stale(stale.clone());
        diagnostics.report_mirrors(health);
        drop(diagnostics);
        self.stale = stale;
    }

    /// The slice of the session the mounted screen is allowed to read.
    fn view(&self) -> ApplicationState {
        self.screen.name().binding().view(self.store.state())
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Complete { next, data, submit } => {
                match self.store.advance(next, data) {
                    Ok(()) => {
                        self.status = None;
                        if let Some(request) = submit {
                            self.send(request);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "navigation rejected");
                        self.status = Some(Status::Error(e.to_string()));
                    }
                }
            }
            ScreenAction::Back => {
                if self.store.go_back() {
                    self.status = None;
                } else {
                    self.status = Some(Status::Info("Nothing to go back to".to_string()));
                }
            }
            ScreenAction::Logout => {
                self.store.reset();
                self.forget_mirrors();
                self.status = None;
            }
            ScreenAction::Submit(request) => self.send(request),
        }
        self.sync_screen();
    }

    fn send(&mut self, request: ApiRequest) {
        let entry = self.outbox.submit(request);
        self.status = Some(request_status(entry));
    }

    /// Logging out leaves nothing for the next start to restore.
    fn forget_mirrors(&mut self) {
        for mirror in &self.mirrors {
            let mut mirror = mirror.borrow_mut();
            if let Err(e) = mirror.clear() {
                tracing::warn!(mirror = mirror.name(), error = %e, "could not clear mirror");
            }
        }
        self.stale.clear();
    }

    /// Adopt the screen a diverged mirror holds. This is the only path from
    /// a mirror back into the store.
    fn resume_stale(&mut self) {
        let Some(target) = self.stale.iter().find_map(StaleMirror::found_screen) else {
            self.status = Some(Status::Info("No other session to resume".to_string()));
            return;
        };
        match self.store.resume(target) {
            Ok(()) => {
                self.status = Some(Status::Info(format!("Resumed at {target}")));
                self.stale.clear();
                self.diagnostics.borrow_mut().report_stale(Vec::new());
            }
            Err(e) => {
                tracing::warn!(error = %e, "resume rejected");
                self.status = Some(Status::Error(e.to_string()));
            }
        }
        self.sync_screen();
    }

    fn sync_screen(&mut self) {
        if self.store.last_seq() == self.mounted_seq {
            return;
        }
        self.screen.teardown();
        self.screen = screens::mount(self.store.current(), self.store.state(), &self.config);
        self.mounted_seq = self.store.last_seq();
    }

    pub fn render(&self, f: &mut Frame, click_state: &Rc<RefCell<ClickState>>) {
        let size = f.area();
        {
            let mut cs = click_state.borrow_mut();
            cs.terminal_cols = size.width;
            cs.terminal_rows = size.height;
            cs.clear_targets();
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        self.screen.render(&self.view(), f, chunks[0], click_state);
        self.render_status(f, chunks[1], click_state);

        if self.show_diagnostics {
            self.diagnostics.borrow().render(
                f,
                size,
                self.store.current(),
                self.store.history().len(),
                click_state,
            );
        }
        self.diagnostics.borrow_mut().record_render();
    }

    fn render_status(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        let line = if let Some(found) = self.stale.iter().find_map(StaleMirror::found_screen) {
            click_state
                .borrow_mut()
                .add_row_target(area, area.y, RESUME_STALE);
            Line::from(vec![
                Span::styled(" [F3] ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("Resume at {found} (changed in another tab)"),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        } else {
            match &self.status {
                Some(Status::Error(msg)) => Line::from(Span::styled(
                    format!(" {msg}"),
                    Style::default().fg(Color::Red),
                )),
                Some(Status::Info(msg)) => Line::from(Span::styled(
                    format!(" {msg}"),
                    Style::default().fg(Color::Gray),
                )),
                None => {
                    click_state
                        .borrow_mut()
                        .add_row_target(area, area.y, TOGGLE_DIAGNOSTICS);
                    Line::from(Span::styled(
                        " [F2] Diagnostics",
                        Style::default().fg(Color::DarkGray),
                    ))
                }
            }
        };
        f.render_widget(Paragraph::new(line), area);
    }
}

fn request_status(entry: &OutboxEntry) -> Status {
    let label = entry.request.label();
    match &entry.status {
        RequestStatus::Pending => Status::Info(format!("{label} sending")),
        RequestStatus::Sent => Status::Info(format!("{label} sent")),
        RequestStatus::Failed(e) => Status::Error(format!("{label} failed: {e}")),
    }
}
