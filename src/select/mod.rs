//! Interactive hierarchical selection.
//!
//! The picker is split into a pure state machine ([`Picker`]) that
//! consumes abstract [`PickerEvent`]s, and a terminal driver
//! ([`tui::pick`]) that feeds it key presses. The split keeps the
//! selection logic testable with scripted event sequences instead of a
//! real terminal.

pub mod theme;
pub mod tui;

pub use theme::Theme;

/// One abstract input event for the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    MoveUp,
    MoveDown,
    Toggle,
    Confirm,
    Quit,
}

/// Result of one picker invocation.
///
/// `cancelled` means the operator quit; callers must abort the whole
/// multi-level selection flow, not just the current level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub chosen: Vec<String>,
    pub cancelled: bool,
}

impl Selection {
    /// An empty, non-cancelled selection.
    pub fn empty() -> Self {
        Self {
            chosen: Vec::new(),
            cancelled: false,
        }
    }
}

/// Scrollable multi-select list over a fixed set of candidate rows.
///
/// One row is highlighted; navigation wraps at both ends. Toggled rows
/// accumulate in toggle order. The machine is terminal-agnostic: it only
/// ever sees [`PickerEvent`]s.
#[derive(Debug)]
pub struct Picker {
    rows: Vec<String>,
    highlighted: usize,
    /// Indices of toggled rows, in toggle order.
    selected: Vec<usize>,
}

impl Picker {
    /// Create a picker over `rows`.
    ///
    /// Callers handle the empty-candidate case themselves (it short
    /// circuits to an empty selection without entering interactive
    /// mode), so `rows` must be non-empty here.
    pub fn new(rows: Vec<String>) -> Self {
        debug_assert!(!rows.is_empty(), "picker requires at least one row");
        Self {
            rows,
            highlighted: 0,
            selected: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Whether the row at `index` is currently toggled on.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Advance the state machine by one event.
    ///
    /// Returns `Some` when a terminal state (confirmed or cancelled) is
    /// reached; the picker must not be fed further events after that.
    pub fn handle(&mut self, event: PickerEvent) -> Option<Selection> {
        match event {
            PickerEvent::MoveDown => {
                self.highlighted = (self.highlighted + 1) % self.rows.len();
                None
            }
            PickerEvent::MoveUp => {
                self.highlighted = if self.highlighted == 0 {
                    self.rows.len() - 1
                } else {
                    self.highlighted - 1
                };
                None
            }
            PickerEvent::Toggle => {
                if let Some(at) = self.selected.iter().position(|&i| i == self.highlighted) {
                    self.selected.remove(at);
                } else {
                    self.selected.push(self.highlighted);
                }
                None
            }
            PickerEvent::Confirm => {
                let chosen = if self.selected.is_empty() {
                    // Nothing toggled: the highlighted row alone is the result.
                    vec![self.rows[self.highlighted].clone()]
                } else {
                    self.chosen_rows()
                };
                Some(Selection {
                    chosen,
                    cancelled: false,
                })
            }
            PickerEvent::Quit => Some(Selection {
                chosen: self.chosen_rows(),
                cancelled: true,
            }),
        }
    }

    fn chosen_rows(&self) -> Vec<String> {
        self.selected.iter().map(|&i| self.rows[i].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(rows: &[&str]) -> Picker {
        Picker::new(rows.iter().map(|r| r.to_string()).collect())
    }

    fn drive(picker: &mut Picker, events: &[PickerEvent]) -> Option<Selection> {
        let mut outcome = None;
        for &event in events {
            assert!(outcome.is_none(), "event after terminal state");
            outcome = picker.handle(event);
        }
        outcome
    }

    #[test]
    fn test_confirm_with_empty_set_yields_highlighted_singleton() {
        let mut p = picker(&["a", "b", "c"]);
        let outcome = drive(
            &mut p,
            &[PickerEvent::MoveDown, PickerEvent::MoveDown, PickerEvent::Confirm],
        )
        .unwrap();
        assert_eq!(outcome.chosen, vec!["c".to_string()]);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_toggle_twice_returns_to_unselected() {
        let mut p = picker(&["a", "b"]);
        p.handle(PickerEvent::Toggle);
        assert!(p.is_selected(0));
        p.handle(PickerEvent::Toggle);
        assert!(!p.is_selected(0));
        // With nothing toggled, confirm falls back to the highlight.
        let outcome = p.handle(PickerEvent::Confirm).unwrap();
        assert_eq!(outcome.chosen, vec!["a".to_string()]);
    }

    #[test]
    fn test_selection_order_is_toggle_order() {
        let mut p = picker(&["a", "b", "c"]);
        let outcome = drive(
            &mut p,
            &[
                PickerEvent::MoveDown,
                PickerEvent::MoveDown,
                PickerEvent::Toggle, // c
                PickerEvent::MoveUp,
                PickerEvent::Toggle, // b
                PickerEvent::Confirm,
            ],
        )
        .unwrap();
        assert_eq!(outcome.chosen, vec!["c".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_untoggle_removes_from_order() {
        let mut p = picker(&["a", "b", "c"]);
        let outcome = drive(
            &mut p,
            &[
                PickerEvent::Toggle, // a
                PickerEvent::MoveDown,
                PickerEvent::Toggle, // b
                PickerEvent::MoveUp,
                PickerEvent::Toggle, // a off again
                PickerEvent::Confirm,
            ],
        )
        .unwrap();
        assert_eq!(outcome.chosen, vec!["b".to_string()]);
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let mut p = picker(&["a", "b", "c"]);
        p.handle(PickerEvent::MoveUp);
        assert_eq!(p.highlighted(), 2);
        p.handle(PickerEvent::MoveDown);
        assert_eq!(p.highlighted(), 0);
    }

    #[test]
    fn test_quit_returns_partial_selection_cancelled() {
        let mut p = picker(&["a", "b"]);
        let outcome = drive(
            &mut p,
            &[PickerEvent::Toggle, PickerEvent::MoveDown, PickerEvent::Quit],
        )
        .unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.chosen, vec!["a".to_string()]);
    }

    #[test]
    fn test_quit_with_nothing_toggled_is_empty_and_cancelled() {
        let mut p = picker(&["a"]);
        let outcome = p.handle(PickerEvent::Quit).unwrap();
        assert!(outcome.cancelled);
        assert!(outcome.chosen.is_empty());
    }
}
