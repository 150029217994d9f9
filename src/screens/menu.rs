//! Numbered option list used by the selection screens.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::widgets::ClickableList;

use super::actions::{BACK, OPTION_BASE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Chosen(usize),
    Back,
    Changed,
    Ignored,
}

pub struct Menu {
    len: usize,
    selected: usize,
}

impl Menu {
    pub fn new(len: usize) -> Self {
        Self { len, selected: 0 }
    }

    pub fn with_selected(mut self, index: usize) -> Self {
        if index < self.len {
            self.selected = index;
        }
        self
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle(&mut self, event: &InputEvent) -> MenuEvent {
        if self.len == 0 {
            return MenuEvent::Ignored;
        }
        match event {
            InputEvent::Up | InputEvent::BackTab => {
                self.selected = (self.selected + self.len - 1) % self.len;
                MenuEvent::Changed
            }
            InputEvent::Down | InputEvent::Tab => {
                self.selected = (self.selected + 1) % self.len;
                MenuEvent::Changed
            }
            InputEvent::Enter => MenuEvent::Chosen(self.selected),
            InputEvent::Esc | InputEvent::Click(BACK) => MenuEvent::Back,
            InputEvent::Key(c) => match c.to_digit(10) {
                Some(n) if n >= 1 && (n as usize) <= self.len => {
                    self.selected = n as usize - 1;
                    MenuEvent::Chosen(self.selected)
                }
                _ => MenuEvent::Ignored,
            },
            InputEvent::Click(id) if *id >= OPTION_BASE && *id < OPTION_BASE + self.len as u16 => {
                self.selected = (*id - OPTION_BASE) as usize;
                MenuEvent::Chosen(self.selected)
            }
            _ => MenuEvent::Ignored,
        }
    }

    /// `items` are `(label, detail)` pairs; detail may be empty.
    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        items: &[(&str, &str)],
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        let mut cl = ClickableList::new();
        cl.push(Line::from(""));
        for (i, (label, detail)) in items.iter().enumerate() {
            let selected = i == self.selected;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if selected { "▶" } else { " " };
            cl.push_clickable(
                Line::from(Span::styled(format!("{marker} [{}] {label}", i + 1), style)),
                OPTION_BASE + i as u16,
            );
            if !detail.is_empty() {
                cl.push_clickable(
                    Line::from(Span::styled(
                        format!("      {detail}"),
                        Style::default().fg(Color::DarkGray),
                    )),
                    OPTION_BASE + i as u16,
                );
            }
        }
        cl.push(Line::from(""));
        cl.push_clickable(
            Line::from(Span::styled(" [Esc] Back", Style::default().fg(Color::DarkGray))),
            BACK,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {title} "));

        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, area.width.saturating_sub(2));
        f.render_widget(
            Paragraph::new(cl.into_lines())
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}
