//! Input normalization and click hit-testing.
//!
//! Keyboard and pointer events from ratzilla are turned into [`InputEvent`]s.
//! Clickable regions are registered during render into a [`ClickState`] and
//! hit-tested when a tap arrives.

use ratzilla::ratatui::layout::Rect;

/// All input a screen can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable character.
    Key(char),
    Backspace,
    Enter,
    /// Move focus forward.
    Tab,
    /// Move focus backward.
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Esc,
    /// Function key `F1`..`F12`.
    F(u8),
    /// A click/tap on a registered target, identified by a semantic action ID.
    Click(u16),
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render pass and the pointer handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register click targets for a horizontal tab bar.
    ///
    /// `tab_widths` holds `(display_width, action_id)` for each padded label.
    /// Each target covers its label plus half of the neighbouring separators;
    /// the first and last tabs extend to the edges of the bar.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for (i, &(width, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };
            let right = if i == n - 1 {
                total_width
            } else {
                let end = starts[i] + width;
                end + (starts[i + 1] - end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Action of the topmost target containing the cell. Later registrations
    /// sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}

/// Below this width screens stack their panels vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel offset inside the grid into a cell index along one axis.
///
/// Returns `None` outside the grid or for degenerate sizes.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_basic() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 80, 1), 2);

        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_overlap_last_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(5, 5, 10, 1), 2);

        assert_eq!(cs.hit_test(7, 5), Some(2));
        assert_eq!(cs.hit_test(0, 5), Some(1));
        assert_eq!(cs.hit_test(20, 5), Some(1));
    }

    #[test]
    fn row_target_outside_area_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 99);
        cs.add_row_target(area, 15, 98);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 12, 97);
        assert_eq!(cs.hit_test(15, 12), Some(97));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn clear_drops_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    #[test]
    fn tab_targets_cover_whole_bar() {
        // [6][3][6][3][6] in an 80-wide bar
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(6, 10), (6, 11), (6, 12)], 3, 0, 5, 80, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(0, 5), Some(10));
        assert_eq!(cs.hit_test(6, 5), Some(10));
        assert_eq!(cs.hit_test(7, 5), Some(11));
        assert_eq!(cs.hit_test(15, 5), Some(11));
        assert_eq!(cs.hit_test(16, 5), Some(12));
        assert_eq!(cs.hit_test(79, 5), Some(12));
    }

    #[test]
    fn tab_targets_with_offset() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(6, 10), (6, 11)], 1, 5, 3, 30, 2);
        assert_eq!(cs.hit_test(5, 3), Some(10));
        assert_eq!(cs.hit_test(5, 4), Some(10));
        assert_eq!(cs.hit_test(4, 3), None);
    }

    #[test]
    fn tab_targets_empty() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 3, 0, 0, 80, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_conversion() {
        assert_eq!(pixel_to_cell(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_to_cell(14.0, 450.0, 30), Some(0));
        assert_eq!(pixel_to_cell(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_to_cell(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_to_cell(450.0, 450.0, 30), None);
        assert_eq!(pixel_to_cell(-1.0, 450.0, 30), None);
        assert_eq!(pixel_to_cell(10.0, 0.0, 30), None);
        assert_eq!(pixel_to_cell(10.0, 450.0, 0), None);
    }

    #[test]
    fn tap_pipeline_on_narrow_grid() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 37;
        cs.terminal_rows = 50;
        cs.add_click_target(Rect::new(0, 9, 37, 1), 1);
        cs.add_click_target(Rect::new(0, 10, 37, 1), 2);

        let grid_height = 50.0 * 15.0;
        let cell = grid_height / 50.0;
        for (row, id) in [(9u16, 1u16), (10, 2)] {
            let y = row as f64 * cell + cell / 2.0;
            let hit = pixel_to_cell(y, grid_height, cs.terminal_rows);
            assert_eq!(hit, Some(row));
            assert_eq!(cs.hit_test(3, row), Some(id));
        }
    }
}
