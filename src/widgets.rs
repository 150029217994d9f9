//! Clickable UI components.
//!
//! Each component renders and registers its own click targets, so visual
//! output and interactive behaviour stay together.
//!
//! - [`TabBar`]: horizontal tabs (dashboard sections).
//! - [`ClickableList`]: lines paired with actions (menus, form fields).

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A single-row tab bar whose click targets follow the rendered labels.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap in a block; targets are placed inside its borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut spans: Vec<Span> = Vec::new();
        let sep_width = Line::from(self.separator).width() as u16;
        let mut tab_widths: Vec<(u16, u16)> = Vec::new();

        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            tab_widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for horizontal accuracy, outer rows for tap tolerance.
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with click actions.
///
/// Clickable lines remember their own index, so inserting lines above them
/// moves their targets automatically.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Pick one"));
/// cl.push_clickable(Line::from(" [1] Candidate"), PICK_CANDIDATE);
/// cl.register_targets(area, &mut cs, 1, 1, 0, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rows the lines occupy once wrapped to `width`.
    pub fn visual_height(&self, width: u16) -> u16 {
        if width == 0 {
            return self.lines.len() as u16;
        }
        Paragraph::new(self.lines.clone())
            .wrap(Wrap { trim: false })
            .line_count(width) as u16
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines.
    ///
    /// * `top_offset` / `bottom_offset`: rows taken by borders.
    /// * `scroll`: vertical scroll in visual rows.
    /// * `inner_width`: wrap width, or `0` when the widget does not wrap
    ///   (one logical line per row).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        // Visual start row and height of every logical line.
        let mut starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            starts.push(cumulative);
            let h = if inner_width == 0 {
                1
            } else {
                let lw = line.width();
                let w = inner_width as usize;
                if lw <= w {
                    1
                } else {
                    lw.div_ceil(w) as u16
                }
            };
            heights.push(h);
            cumulative += h;
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            if li >= self.lines.len() {
                continue;
            }
            for r in 0..heights[li] {
                let vr = starts[li] + r;
                if vr < scroll {
                    continue;
                }
                let row = content_y + (vr - scroll);
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

impl Default for ClickableList<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_rows_skip_plain_lines() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("item 0"), 10);
        cl.push_clickable(Line::from("item 1"), 11);
        cl.push(Line::from("footer"));
        assert_eq!(cl.len(), 4);

        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 7), Some(10));
        assert_eq!(cs.hit_test(10, 8), Some(11));
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn scrolled_out_items_not_registered() {
        let mut cl = ClickableList::new();
        for i in 0..4 {
            cl.push_clickable(Line::from(format!("item {i}")), 100 + i);
        }
        let area = Rect::new(0, 10, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 10), Some(102));
        assert_eq!(cs.hit_test(10, 11), Some(103));
    }

    #[test]
    fn clipped_by_area() {
        let mut cl = ClickableList::new();
        for i in 0..20 {
            cl.push_clickable(Line::from(format!("item {i}")), 50 + i);
        }
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn wrapped_line_is_clickable_on_every_row() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890"));
        cl.push_clickable(Line::from("123456789012345678901234567890"), 42);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 1), None);
        assert_eq!(cs.hit_test(5, 2), Some(42));
        assert_eq!(cs.hit_test(5, 4), Some(42));
        assert_eq!(cs.hit_test(5, 5), None);
    }

    #[test]
    fn visual_height_counts_wrapped_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("short"));
        cl.push(Line::from("x".repeat(25)));
        assert_eq!(cl.visual_height(0), 2);
        assert_eq!(cl.visual_height(10), 4);
    }
}
