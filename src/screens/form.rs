//! Shared form widget: text and choice fields with focus cycling and inline
//! validation.
//!
//! A form never decides where to go next. It reports [`FormEvent::Submit`]
//! once every field passes and leaves the payload to the owning screen.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::widgets::ClickableList;

use super::actions::{BACK, FIELD_BASE, SUBMIT};

/// Checks a non-empty, trimmed value.
pub type Validator = fn(&str) -> Result<(), &'static str>;

const DEFAULT_MAX_LEN: usize = 64;

pub enum FieldKind {
    Text {
        value: String,
        max_len: usize,
        masked: bool,
    },
    Choice {
        options: Vec<&'static str>,
        selected: usize,
    },
}

pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
    required: bool,
    validator: Option<Validator>,
    error: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// Every field passed validation.
    Submit,
    Back,
    Changed,
    Ignored,
}

#[derive(Default)]
pub struct Form {
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, label: &'static str, required: bool) -> Self {
        self.fields.push(Field {
            label,
            kind: FieldKind::Text {
                value: String::new(),
                max_len: DEFAULT_MAX_LEN,
                masked: false,
            },
            required,
            validator: None,
            error: None,
        });
        self
    }

    /// Required text field rendered as bullets.
    pub fn masked(mut self, label: &'static str) -> Self {
        self = self.text(label, true);
        if let Some(FieldKind::Text { masked, .. }) = self.fields.last_mut().map(|f| &mut f.kind) {
            *masked = true;
        }
        self
    }

    pub fn choice(mut self, label: &'static str, options: Vec<&'static str>) -> Self {
        self.fields.push(Field {
            label,
            kind: FieldKind::Choice {
                options,
                selected: 0,
            },
            required: false,
            validator: None,
            error: None,
        });
        self
    }

    /// Attach a validator to the last field added.
    pub fn validated(mut self, validator: Validator) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.validator = Some(validator);
        }
        self
    }

    /// Pre-fill the last text field.
    pub fn prefill(mut self, text: &str) -> Self {
        if let Some(FieldKind::Text { value, max_len, .. }) =
            self.fields.last_mut().map(|f| &mut f.kind)
        {
            *value = text.chars().take(*max_len).collect();
        }
        self
    }

    /// Pre-select an option of the last choice field.
    pub fn select(mut self, index: usize) -> Self {
        if let Some(FieldKind::Choice { options, selected }) =
            self.fields.last_mut().map(|f| &mut f.kind)
        {
            if index < options.len() {
                *selected = index;
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Trimmed text, or the selected option label.
    pub fn value(&self, index: usize) -> &str {
        match self.fields.get(index).map(|f| &f.kind) {
            Some(FieldKind::Text { value, .. }) => value.trim(),
            Some(FieldKind::Choice { options, selected }) => {
                options.get(*selected).copied().unwrap_or("")
            }
            None => "",
        }
    }

    /// Text value, `None` when blank.
    pub fn optional(&self, index: usize) -> Option<String> {
        let value = self.value(index);
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn selected(&self, index: usize) -> usize {
        match self.fields.get(index).map(|f| &f.kind) {
            Some(FieldKind::Choice { selected, .. }) => *selected,
            _ => 0,
        }
    }

    pub fn error(&self, index: usize) -> Option<&'static str> {
        self.fields.get(index).and_then(|f| f.error)
    }

    /// Flag a field from outside (cross-field rules). Focus moves to it.
    pub fn set_error(&mut self, index: usize, message: &'static str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(message);
            self.focus = index;
        }
    }

    /// Run every field check. Focus lands on the first failing field.
    pub fn validate(&mut self) -> bool {
        let mut first_invalid = None;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.error = match &field.kind {
                FieldKind::Text { value, .. } => {
                    let value = value.trim();
                    if value.is_empty() {
                        field.required.then_some("Required")
                    } else {
                        field.validator.and_then(|check| check(value).err())
                    }
                }
                FieldKind::Choice { .. } => None,
            };
            if field.error.is_some() && first_invalid.is_none() {
                first_invalid = Some(i);
            }
        }
        match first_invalid {
            Some(i) => {
                self.focus = i;
                false
            }
            None => true,
        }
    }

    pub fn handle(&mut self, event: &InputEvent) -> FormEvent {
        if self.fields.is_empty() {
            return FormEvent::Ignored;
        }
        match event {
            InputEvent::Key(c) => self.type_char(*c),
            InputEvent::Backspace => {
                let field = &mut self.fields[self.focus];
                match &mut field.kind {
                    FieldKind::Text { value, .. } => {
                        value.pop();
                        field.error = None;
                        FormEvent::Changed
                    }
                    FieldKind::Choice { .. } => FormEvent::Ignored,
                }
            }
            InputEvent::Tab | InputEvent::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
                FormEvent::Changed
            }
            InputEvent::BackTab | InputEvent::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
                FormEvent::Changed
            }
            InputEvent::Left => self.cycle(false),
            InputEvent::Right => self.cycle(true),
            InputEvent::Enter => self.submit(),
            InputEvent::Esc => FormEvent::Back,
            InputEvent::Click(SUBMIT) => self.submit(),
            InputEvent::Click(BACK) => FormEvent::Back,
            InputEvent::Click(id) if *id >= FIELD_BASE && *id < FIELD_BASE + self.len() as u16 => {
                let index = (*id - FIELD_BASE) as usize;
                if index == self.focus {
                    // A second tap on a focused choice steps through it.
                    return self.cycle(true);
                }
                self.focus = index;
                FormEvent::Changed
            }
            InputEvent::Click(_) | InputEvent::F(_) => FormEvent::Ignored,
        }
    }

    fn submit(&mut self) -> FormEvent {
        if self.validate() {
            FormEvent::Submit
        } else {
            FormEvent::Changed
        }
    }

    fn type_char(&mut self, c: char) -> FormEvent {
        let field = &mut self.fields[self.focus];
        if let FieldKind::Text { value, max_len, .. } = &mut field.kind {
            if c.is_control() || value.chars().count() >= *max_len {
                return FormEvent::Ignored;
            }
            value.push(c);
            field.error = None;
            return FormEvent::Changed;
        }
        if c == ' ' {
            self.cycle(true)
        } else {
            FormEvent::Ignored
        }
    }

    fn cycle(&mut self, forward: bool) -> FormEvent {
        match &mut self.fields[self.focus].kind {
            FieldKind::Choice { options, selected } if !options.is_empty() => {
                let n = options.len();
                *selected = if forward {
                    (*selected + 1) % n
                } else {
                    (*selected + n - 1) % n
                };
                FormEvent::Changed
            }
            _ => FormEvent::Ignored,
        }
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        submit_label: &str,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {title} "));

        let mut cl = ClickableList::new();
        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let (marker, label_style) = if focused {
                (
                    "▶ ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(Color::Gray))
            };
            let required = if field.required { "*" } else { "" };
            let shown = match &field.kind {
                FieldKind::Text { value, masked, .. } => {
                    let text = if *masked {
                        "•".repeat(value.chars().count())
                    } else {
                        value.clone()
                    };
                    if focused {
                        format!("{text}_")
                    } else {
                        text
                    }
                }
                FieldKind::Choice { options, selected } => {
                    format!("◀ {} ▶", options.get(*selected).copied().unwrap_or("-"))
                }
            };
            cl.push_clickable(
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("{}{}: ", field.label, required), label_style),
                    Span::styled(shown, Style::default().fg(Color::White)),
                ]),
                FIELD_BASE + i as u16,
            );
            if let Some(error) = field.error {
                cl.push(Line::from(Span::styled(
                    format!("    {error}"),
                    Style::default().fg(Color::Red),
                )));
            }
        }

        cl.push(Line::from(""));
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [Enter] {submit_label}"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            SUBMIT,
        );
        cl.push_clickable(
            Line::from(Span::styled(" [Esc] Back", Style::default().fg(Color::DarkGray))),
            BACK,
        );

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

// ── Validators ─────────────────────────────────────────────────────

pub fn email(value: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = value.split_once('@') else {
        return Err("Enter a valid email");
    };
    let valid = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err("Enter a valid email")
    }
}

pub fn phone(value: &str) -> Result<(), &'static str> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if allowed && (8..=15).contains(&digits) {
        Ok(())
    } else {
        Err("Use 8 to 15 digits")
    }
}

pub fn password(value: &str) -> Result<(), &'static str> {
    if value.chars().count() >= 6 {
        Ok(())
    } else {
        Err("At least 6 characters")
    }
}

/// Whole currency amount, thousands separators allowed.
pub fn amount(value: &str) -> Result<(), &'static str> {
    parse_amount(value).map(|_| ()).ok_or("Enter a whole amount")
}

pub fn parse_amount(value: &str) -> Option<u32> {
    let digits: String = value.chars().filter(|c| !matches!(c, ',' | '.' | ' ')).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

pub fn document(value: &str) -> Result<(), &'static str> {
    let ext = value
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.to_ascii_lowercase()));
    match ext {
        Some((stem, ext)) if !stem.is_empty() && matches!(ext.as_str(), "pdf" | "doc" | "docx") => {
            Ok(())
        }
        _ => Err("Use a .pdf, .doc or .docx file"),
    }
}

pub fn website(value: &str) -> Result<(), &'static str> {
    let host = value
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    if host.contains('.') && !host.starts_with('.') && !host.contains(' ') {
        Ok(())
    } else {
        Err("Enter a web address")
    }
}
