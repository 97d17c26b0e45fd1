//! Editing operations on the selected primitives.
//!
//! Every operation that changes the drawing records an undo step. An
//! operation that finds nothing to act on leaves both the drawing and the
//! history alone.

use schemkit_core::constants::MAX_LAYERS;
use schemkit_core::geometry::clamp_coord;
use schemkit_core::{Point, Rect};
use tracing::debug;

use super::Document;
use crate::parser::ParseReport;

/// Line of the selection bounds the selected primitives are brought onto.
#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Right,
    Top,
    Bottom,
    /// Vertical middle of the bounds, primitives move up or down.
    HorizontalCenter,
    /// Horizontal middle of the bounds, primitives move sideways.
    VerticalCenter,
}

impl Align {
    /// Translation bringing `own` onto the matching line of `target`.
    fn offset(self, target: &Rect, own: &Rect) -> (i32, i32) {
        let delta = |to: i32, from: i32| clamp_coord(i64::from(to) - i64::from(from));
        match self {
            Align::Left => (delta(target.x, own.x), 0),
            Align::Right => (delta(target.right(), own.right()), 0),
            Align::Top => (0, delta(target.y, own.y)),
            Align::Bottom => (0, delta(target.bottom(), own.bottom())),
            Align::HorizontalCenter => (0, delta(target.center().y, own.center().y)),
            Align::VerticalCenter => (delta(target.center().x, own.center().x), 0),
        }
    }
}

impl Document {
    /// Pivot used by rotate and mirror: the first control point of the first
    /// selected primitive.
    fn selection_pivot(&self) -> Option<Point> {
        self.selection
            .first_selected(&self.drawing)
            .and_then(|i| self.drawing.get(i))
            .and_then(|p| p.control_point(0))
    }

    /// Rotates the selection a quarter turn.
    pub fn rotate_selected(&mut self, ccw: bool) -> bool {
        let Some(center) = self.selection_pivot() else {
            return false;
        };
        for prim in self.drawing.iter_mut().filter(|p| p.selected) {
            prim.rotate(ccw, center);
        }
        self.save_undo_state();
        true
    }

    /// Mirrors the selection about the vertical axis through the pivot.
    pub fn mirror_selected(&mut self) -> bool {
        let Some(pivot) = self.selection_pivot() else {
            return false;
        };
        for prim in self.drawing.iter_mut().filter(|p| p.selected) {
            prim.mirror(pivot.x);
        }
        self.save_undo_state();
        true
    }

    pub fn move_selected(&mut self, dx: i32, dy: i32) -> bool {
        if (dx == 0 && dy == 0) || !self.selection.has_selection(&self.drawing) {
            return false;
        }
        for prim in self.drawing.iter_mut().filter(|p| p.selected) {
            prim.translate(dx, dy);
        }
        self.save_undo_state();
        true
    }

    fn align_selected(&mut self, align: Align) -> bool {
        let Some(target) = self.selection.selected_bounds(&self.drawing) else {
            return false;
        };
        let mut moved = 0;
        for prim in self.drawing.iter_mut().filter(|p| p.selected) {
            let Some(own) = prim.bounds() else {
                continue;
            };
            let (dx, dy) = align.offset(&target, &own);
            if dx != 0 || dy != 0 {
                prim.translate(dx, dy);
                moved += 1;
            }
        }
        if moved == 0 {
            return false;
        }
        debug!("Aligned {} primitives ({:?})", moved, align);
        self.save_undo_state();
        true
    }

    /// Moves every selected primitive so its left edge sits on the left
    /// edge of the selection bounds.
    pub fn align_left(&mut self) -> bool {
        self.align_selected(Align::Left)
    }

    pub fn align_right(&mut self) -> bool {
        self.align_selected(Align::Right)
    }

    pub fn align_top(&mut self) -> bool {
        self.align_selected(Align::Top)
    }

    pub fn align_bottom(&mut self) -> bool {
        self.align_selected(Align::Bottom)
    }

    /// Centers the selected primitives vertically on the middle of the
    /// selection bounds.
    pub fn align_horizontal_center(&mut self) -> bool {
        self.align_selected(Align::HorizontalCenter)
    }

    /// Centers the selected primitives horizontally on the middle of the
    /// selection bounds.
    pub fn align_vertical_center(&mut self) -> bool {
        self.align_selected(Align::VerticalCenter)
    }

    /// Deletes the selection and returns how many primitives went away.
    pub fn delete_selected(&mut self) -> usize {
        let removed = self.drawing.remove_selected();
        if removed > 0 {
            debug!("Deleted {} primitives", removed);
            self.save_undo_state();
        }
        removed
    }

    /// Moves the selected primitives to `layer` and restores the layer
    /// order. Macros keep their layers. Returns the number changed.
    pub fn set_layer_for_selected(&mut self, layer: usize) -> usize {
        if layer >= MAX_LAYERS {
            return 0;
        }
        let mut changed = 0;
        for prim in self
            .drawing
            .iter_mut()
            .filter(|p| p.selected && !p.is_macro())
        {
            if prim.layer != layer {
                prim.layer = layer;
                changed += 1;
            }
        }
        if changed > 0 {
            self.drawing.sort_by_layer();
            self.save_undo_state();
        }
        changed
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&mut self.drawing);
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all(&mut self.drawing);
    }

    /// Selection flags in store order.
    pub fn selection_state(&self) -> Vec<bool> {
        self.selection.selection_state(&self.drawing)
    }

    pub fn restore_selection(&mut self, state: &[bool]) {
        self.selection.restore_selection(&mut self.drawing, state);
    }

    /// The selection as standalone drawing text.
    pub fn selected_text(&self, extensions: bool) -> String {
        self.selection.selected_text(&self.drawing, extensions)
    }

    /// Parses `text` into the drawing, appending to what is there. With
    /// `select_new` the previous selection is cleared and the added
    /// primitives become selected.
    pub fn add_text(&mut self, text: &str, select_new: bool) -> ParseReport {
        if select_new {
            self.deselect_all();
        }
        let report = self.drawing.add_text(text, select_new);
        if report.added > 0 {
            self.save_undo_state();
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        let mut doc = Document::new();
        doc.load_text(text);
        doc
    }

    #[test]
    fn test_rotate_about_first_point() {
        let mut d = doc("LI 10 10 20 10 0\n");
        d.select_all();
        assert!(d.rotate_selected(true));
        assert_eq!(d.text(true), "LI 10 10 10 0 0\n");
        assert_eq!(d.history().undo_count(), 1);
    }

    #[test]
    fn test_mirror_without_selection_does_nothing() {
        let mut d = doc("LI 10 10 20 10 0\n");
        assert!(!d.mirror_selected());
        assert!(!d.can_undo());
    }

    #[test]
    fn test_set_layer_resorts() {
        let mut d = doc("LI 0 0 10 0 0\nLI 0 5 10 5 1\n");
        d.restore_selection(&[true, false]);
        assert_eq!(d.set_layer_for_selected(2), 1);
        assert_eq!(d.text(true), "LI 0 5 10 5 1\nLI 0 0 10 0 2\n");
        assert!(!d.drawing().is_layer_in_use(0));
        assert_eq!(d.set_layer_for_selected(99), 0);
    }

    #[test]
    fn test_paste_selects_new() {
        let mut d = doc("LI 0 0 10 0 0\n");
        d.select_all();
        let report = d.add_text("SA 5 5 0\n", true);
        assert_eq!(report.added, 1);
        assert_eq!(d.selection_state(), vec![false, true]);
        assert_eq!(d.selected_text(true), "[FIDOCAD]\nSA 5 5 0\n");
    }

    #[test]
    fn test_delete_and_undo() {
        let mut d = doc("LI 0 0 10 0 0\nSA 5 5 0\n");
        d.restore_selection(&[false, true]);
        assert_eq!(d.delete_selected(), 1);
        assert_eq!(d.drawing().len(), 1);
        d.undo().unwrap();
        assert_eq!(d.drawing().len(), 2);
    }

    #[test]
    fn test_align_left_and_right() {
        let mut d = doc("LI 10 0 30 0 0\nLI 40 10 50 10 0\nSA 100 100 0\n");
        d.restore_selection(&[true, true, false]);
        assert!(d.align_left());
        assert_eq!(
            d.text(true),
            "LI 10 0 30 0 0\nLI 10 10 20 10 0\nSA 100 100 0\n"
        );
        assert!(d.align_right());
        assert_eq!(
            d.text(true),
            "LI 10 0 30 0 0\nLI 20 10 30 10 0\nSA 100 100 0\n"
        );
        assert_eq!(d.history().undo_count(), 2);
    }

    #[test]
    fn test_align_top_and_bottom() {
        let mut d = doc("RV 0 0 10 10 0\nRV 20 30 30 50 0\n");
        d.select_all();
        assert!(d.align_top());
        assert_eq!(d.text(true), "RV 0 0 10 10 0\nRV 20 0 30 20 0\n");
        assert!(d.align_bottom());
        assert_eq!(d.text(true), "RV 0 10 10 20 0\nRV 20 0 30 20 0\n");
    }

    #[test]
    fn test_align_centers() {
        let mut d = doc("RV 0 0 10 10 0\nRV 20 30 30 50 0\n");
        d.select_all();
        assert!(d.align_horizontal_center());
        // Bounds run from y 0 to 50, so both centers land on y 25.
        assert_eq!(d.text(true), "RV 0 20 10 30 0\nRV 20 15 30 35 0\n");

        let mut d = doc("LI 0 0 10 0 0\nLI 40 10 60 10 0\n");
        d.select_all();
        assert!(d.align_vertical_center());
        assert_eq!(d.text(true), "LI 25 0 35 0 0\nLI 20 10 40 10 0\n");
    }

    #[test]
    fn test_align_records_one_undo_step() {
        let mut d = doc("SA 0 0 0\nSA 10 20 0\nSA 30 40 0\n");
        d.select_all();
        assert!(d.align_left());
        assert_eq!(d.history().undo_count(), 1);
        assert_eq!(d.text(true), "SA 0 0 0\nSA 0 20 0\nSA 0 40 0\n");
        d.undo().unwrap();
        assert_eq!(d.text(true), "SA 0 0 0\nSA 10 20 0\nSA 30 40 0\n");
    }

    #[test]
    fn test_align_without_movement_does_nothing() {
        let mut d = doc("SA 0 0 0\nSA 0 20 0\n");
        assert!(!d.align_left());
        d.select_all();
        assert!(!d.align_left());
        assert!(!d.can_undo());
    }
}
