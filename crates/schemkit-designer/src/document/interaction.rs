//! Pointer interaction: clicks, drags and marquee selection.
//!
//! Positions are device pixels interpreted through the document's
//! [`MapCoordinates`](crate::map_coordinates::MapCoordinates).

use tracing::debug;

use super::Document;
use crate::drag_controller::{DragKind, DragOutcome, Marquee};

impl Document {
    /// Click: selects the primitive under the pointer, clearing the rest.
    pub fn select_at(&mut self, px: i32, py: i32) -> Option<usize> {
        self.selection.select_at(&mut self.drawing, &self.map, px, py)
    }

    /// Click with the multiple selection modifier.
    pub fn toggle_at(&mut self, px: i32, py: i32) -> Option<usize> {
        self.selection.toggle_at(&mut self.drawing, &self.map, px, py)
    }

    pub fn begin_drag(&mut self, px: i32, py: i32, multiple: bool) -> DragKind {
        self.drag.start(&mut self.drawing, &self.map, px, py, multiple)
    }

    pub fn drag_to(&mut self, px: i32, py: i32, constrain: bool) {
        self.drag.drag(&mut self.drawing, &self.map, px, py, constrain);
    }

    /// Ends the current gesture. A gesture that moved something records
    /// one undo step; a press and release in place records none.
    pub fn end_drag(&mut self, px: i32, py: i32, multiple: bool) -> DragOutcome {
        let outcome = self.drag.finish(&mut self.drawing, &self.map, px, py, multiple);
        if outcome.changed_drawing() {
            self.save_undo_state();
        }
        debug!("Drag finished: {:?}", outcome);
        outcome
    }

    /// Abandons the current gesture, putting moved points back.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel(&mut self.drawing);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Marquee being drawn, for the renderer.
    pub fn marquee(&self) -> Option<Marquee> {
        self.drag.marquee()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_in_place_adds_no_undo() {
        let mut doc = Document::new();
        doc.load_text("LI 10 10 50 10 0\n");
        doc.select_all();
        assert_eq!(doc.begin_drag(50, 10, false), DragKind::Handle);
        doc.drag_to(50, 10, false);
        let outcome = doc.end_drag(50, 10, false);
        assert_eq!(outcome, DragOutcome::HandleMoved { changed: false });
        assert_eq!(doc.history().undo_count(), 0);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_drag_records_one_step() {
        let mut doc = Document::new();
        doc.load_text("LI 10 10 50 10 0\n");
        doc.begin_drag(30, 10, false);
        doc.drag_to(35, 12, false);
        doc.drag_to(40, 20, false);
        doc.end_drag(40, 20, false);
        assert_eq!(doc.history().undo_count(), 1);
        assert_eq!(doc.text(true), "LI 20 20 60 20 0\n");
        doc.undo().unwrap();
        assert_eq!(doc.text(true), "LI 10 10 50 10 0\n");
    }

    #[test]
    fn test_cancel_leaves_drawing() {
        let mut doc = Document::new();
        doc.load_text("LI 10 10 50 10 0\n");
        doc.begin_drag(30, 10, false);
        doc.drag_to(60, 40, false);
        doc.cancel_drag();
        assert!(!doc.is_dragging());
        assert_eq!(doc.text(true), "LI 10 10 50 10 0\n");
    }
}
