//! Drag selection state machine.
//!
//! A gesture starts on one cell, captures at press time whether it will
//! select or deselect, and sweeps the rectangle between the start cell and
//! the cursor. The rectangle is recomputed from the two corners on every
//! move, so sweeping out and back shrinks it again.

use crate::slot::SlotCoord;

/// What a gesture does to every cell it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    Select,
    Deselect,
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        action: SlotAction,
        origin: SlotCoord,
        cursor: SlotCoord,
    },
}

/// Tracks one in-progress drag gesture.
#[derive(Debug, Default)]
pub struct DragSelection {
    state: DragState,
}

impl DragSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture at `origin`.
    ///
    /// `already_marked` is whether the acting user currently has a mark on
    /// that cell: pressing a marked cell starts a deselect sweep, anything
    /// else starts a select sweep. Pressing mid-gesture restarts it.
    pub fn press(&mut self, origin: SlotCoord, already_marked: bool) {
        let action = if already_marked {
            SlotAction::Deselect
        } else {
            SlotAction::Select
        };

        self.state = DragState::Dragging {
            action,
            origin,
            cursor: origin,
        };
    }

    /// Move the cursor corner of the gesture. Ignored while idle.
    pub fn move_to(&mut self, coord: SlotCoord) {
        if let DragState::Dragging { cursor, .. } = &mut self.state {
            *cursor = coord;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The action captured at press time, while a gesture is in progress.
    pub fn action(&self) -> Option<SlotAction> {
        match self.state {
            DragState::Dragging { action, .. } => Some(action),
            DragState::Idle => None,
        }
    }

    /// Every cell in the rectangle spanned by the press cell and the
    /// cursor, inclusive of both. Empty while idle.
    pub fn selection(&self) -> Vec<SlotCoord> {
        match &self.state {
            DragState::Dragging { origin, cursor, .. } => rectangle(*origin, *cursor),
            DragState::Idle => Vec::new(),
        }
    }

    /// Finish the gesture, yielding the captured action and covered cells.
    ///
    /// Releasing while idle yields nothing; either way the machine is idle
    /// afterwards and ready for the next press.
    pub fn release(&mut self) -> Option<(SlotAction, Vec<SlotCoord>)> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                action,
                origin,
                cursor,
            } => Some((action, rectangle(origin, cursor))),
            DragState::Idle => None,
        }
    }

    /// Abandon any in-progress gesture without producing cells.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Cells between two corners, in day-major order.
fn rectangle(a: SlotCoord, b: SlotCoord) -> Vec<SlotCoord> {
    let (day_lo, day_hi) = ordered(a.day(), b.day());
    let (time_lo, time_hi) = ordered(a.time_index(), b.time_index());

    let mut cells = Vec::new();
    for day in day_lo..=day_hi {
        for time_index in time_lo..=time_hi {
            cells.push(SlotCoord::new_unchecked(day, time_index));
        }
    }
    cells
}

fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(day: u8, time_index: u8) -> SlotCoord {
        SlotCoord::new(day, time_index).unwrap()
    }

    #[test]
    fn press_captures_select_on_unmarked_cells() {
        let mut drag = DragSelection::new();
        drag.press(coord(2, 5), false);
        assert_eq!(drag.action(), Some(SlotAction::Select));
    }

    #[test]
    fn press_captures_deselect_on_marked_cells() {
        let mut drag = DragSelection::new();
        drag.press(coord(2, 5), true);
        assert_eq!(drag.action(), Some(SlotAction::Deselect));
    }

    #[test]
    fn rectangle_is_the_same_from_either_corner() {
        let mut forward = DragSelection::new();
        forward.press(coord(2, 5), false);
        forward.move_to(coord(0, 3));

        let mut backward = DragSelection::new();
        backward.press(coord(0, 3), false);
        backward.move_to(coord(2, 5));

        let mut a = forward.selection();
        let mut b = backward.selection();
        a.sort();
        b.sort();

        assert_eq!(a, b);
        assert_eq!(a.len(), 9);
        assert!(a.contains(&coord(0, 3)));
        assert!(a.contains(&coord(2, 5)));
        assert!(a.contains(&coord(1, 4)));
        assert!(!a.contains(&coord(2, 6)));
    }

    #[test]
    fn moving_back_shrinks_the_rectangle() {
        let mut drag = DragSelection::new();
        drag.press(coord(0, 0), false);
        drag.move_to(coord(2, 2));
        assert_eq!(drag.selection().len(), 9);

        drag.move_to(coord(0, 1));
        let cells = drag.selection();
        assert_eq!(cells, vec![coord(0, 0), coord(0, 1)]);
    }

    #[test]
    fn press_without_movement_covers_one_cell() {
        let mut drag = DragSelection::new();
        drag.press(coord(4, 10), false);

        let (action, cells) = drag.release().unwrap();
        assert_eq!(action, SlotAction::Select);
        assert_eq!(cells, vec![coord(4, 10)]);
    }

    #[test]
    fn release_resets_to_idle() {
        let mut drag = DragSelection::new();
        drag.press(coord(1, 1), false);
        drag.release();

        assert!(!drag.is_dragging());
        assert!(drag.selection().is_empty());
    }

    #[test]
    fn release_without_press_yields_nothing() {
        let mut drag = DragSelection::new();
        assert!(drag.release().is_none());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut drag = DragSelection::new();
        drag.move_to(coord(3, 3));
        assert!(drag.selection().is_empty());
    }

    #[test]
    fn cancel_discards_the_gesture() {
        let mut drag = DragSelection::new();
        drag.press(coord(1, 1), true);
        drag.move_to(coord(5, 5));
        drag.cancel();

        assert!(drag.release().is_none());
    }

    #[test]
    fn pressing_again_restarts_the_gesture() {
        let mut drag = DragSelection::new();
        drag.press(coord(0, 0), true);
        drag.move_to(coord(6, 17));
        drag.press(coord(3, 3), false);

        let (action, cells) = drag.release().unwrap();
        assert_eq!(action, SlotAction::Select);
        assert_eq!(cells, vec![coord(3, 3)]);
    }
}
