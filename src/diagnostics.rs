//! Diagnostics overlay.
//!
//! Subscribes to the store like any other observer and keeps counters that
//! make notification bugs visible: missing or repeated sequence numbers,
//! renders per notification, and mirrors that drifted from the store.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::error::StaleMirror;
use crate::input::ClickState;
use crate::mirror::MirrorHealth;
use crate::registry::ScreenName;
use crate::store::{NavObserver, Notification, TransitionCause};
use crate::widgets::ClickableList;

pub const CHANGE_LOG_CAPACITY: usize = 12;

/// Click action that opens or closes the overlay.
pub const TOGGLE_DIAGNOSTICS: u16 = 200;

#[derive(Default)]
pub struct Diagnostics {
    notifications: u64,
    renders: u64,
    last_seq: u64,
    gaps: u64,
    duplicates: u64,
    log: VecDeque<Notification>,
    stale: Vec<StaleMirror>,
    mirrors: Vec<MirrorHealth>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> u64 {
        self.notifications
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn record_render(&mut self) {
        self.renders += 1;
    }

    /// Oldest first.
    pub fn log(&self) -> impl Iterator<Item = &Notification> {
        self.log.iter()
    }

    pub fn gaps(&self) -> u64 {
        self.gaps
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Every notification arrived exactly once and in order.
    pub fn is_consistent(&self) -> bool {
        self.gaps == 0 && self.duplicates == 0 && self.last_seq == self.notifications
    }

    pub fn report_stale(&mut self, stale: Vec<StaleMirror>) {
        self.stale = stale;
    }

    pub fn stale(&self) -> &[StaleMirror] {
        &self.stale
    }

    pub fn report_mirrors(&mut self, mirrors: Vec<MirrorHealth>) {
        self.mirrors = mirrors;
    }

    pub fn mirrors(&self) -> &[MirrorHealth] {
        &self.mirrors
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        current: ScreenName,
        history_depth: usize,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        let width = area.width.min(60);
        let height = area.height.min(20);
        let overlay = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let label = Style::default().fg(Color::Gray);
        let mut cl = ClickableList::new();
        cl.push(Line::from(vec![
            Span::styled(" screen ", label),
            Span::styled(current.tag(), Style::default().fg(Color::Cyan)),
            Span::styled(format!("  history {history_depth}"), label),
        ]));
        cl.push(Line::from(Span::styled(
            format!(
                " notifications {}  renders {}",
                self.notifications, self.renders
            ),
            label,
        )));

        let (sequence, style) = if self.is_consistent() {
            ("in order".to_string(), Style::default().fg(Color::Green))
        } else {
            (
                format!("{} gaps, {} duplicates", self.gaps, self.duplicates),
                Style::default().fg(Color::Red),
            )
        };
        cl.push(Line::from(vec![
            Span::styled(" sequence ", label),
            Span::styled(sequence, style),
        ]));

        for mirror in &self.mirrors {
            let (state, style) = match &mirror.last_error {
                Some(e) => (e.to_string(), Style::default().fg(Color::Red)),
                None => (format!("{} writes", mirror.writes), Style::default().fg(Color::Green)),
            };
            cl.push(Line::from(vec![
                Span::styled(format!(" {} ", mirror.name), label),
                Span::styled(state, style),
            ]));
        }
        if self.stale.is_empty() {
            cl.push(Line::from(vec![
                Span::styled(" mirrors ", label),
                Span::styled("in sync", Style::default().fg(Color::Green)),
            ]));
        } else {
            for stale in &self.stale {
                cl.push(Line::from(Span::styled(
                    format!(" {stale}"),
                    Style::default().fg(Color::Yellow),
                )));
            }
        }

        // Newest entries that still leave room for the close row.
        let inner_width = overlay.width.saturating_sub(2);
        let inner_height = overlay.height.saturating_sub(2);
        let footer = 2;
        let room = inner_height
            .saturating_sub(cl.visual_height(inner_width))
            .saturating_sub(footer);
        if room >= 2 {
            cl.push(Line::from(""));
            cl.push(Line::from(Span::styled(
                " recent",
                label.add_modifier(Modifier::BOLD),
            )));
            for n in self.log.iter().rev().take(room as usize - 2) {
                cl.push(Line::from(Span::styled(
                    format!("  #{:<4} {:<7} {}", n.seq, cause_label(n.cause), n.screen),
                    Style::default().fg(Color::White),
                )));
            }
        }
        cl.push(Line::from(""));
        cl.push_clickable(
            Line::from(Span::styled(" [F2] Close", Style::default().fg(Color::DarkGray))),
            TOGGLE_DIAGNOSTICS,
        );

        let mut cs = click_state.borrow_mut();
        cl.register_targets(overlay, &mut cs, 1, 1, 0, inner_width);
        f.render_widget(Clear, overlay);
        f.render_widget(
            Paragraph::new(cl.into_lines())
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(" Diagnostics "),
                ),
            overlay,
        );
    }
}

fn cause_label(cause: TransitionCause) -> &'static str {
    match cause {
        TransitionCause::Advance => "advance",
        TransitionCause::Back => "back",
        TransitionCause::Reset => "reset",
        TransitionCause::Resume => "resume",
    }
}

impl NavObserver for Diagnostics {
    fn on_change(&mut self, notification: &Notification) {
        self.notifications += 1;
        let expected = self.last_seq + 1;
        if notification.seq < expected {
            self.duplicates += 1;
            tracing::warn!(seq = notification.seq, expected, "duplicate navigation notification");
        } else if notification.seq > expected {
            self.gaps += 1;
            tracing::warn!(seq = notification.seq, expected, "navigation notification missing");
        }
        self.last_seq = self.last_seq.max(notification.seq);

        if self.log.len() == CHANGE_LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(*notification);
    }
}
