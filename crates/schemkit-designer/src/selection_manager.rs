use schemkit_core::constants::DEFAULT_SELECTION_TOLERANCE;
use schemkit_core::{Point, Rect};

use crate::drawing::Drawing;
use crate::map_coordinates::MapCoordinates;
use crate::model::Primitive;

/// Smallest hit tolerance in logical units.
const MIN_LOGICAL_TOLERANCE: i32 = 2;

/// Selection operations over a [`Drawing`].
///
/// `SelectionManager` is responsible for:
/// - Point selection (click) and toggling (click with the multiple
///   selection modifier)
/// - Rectangle selection, in either direction
/// - Reading and restoring the selection state
/// - Extracting the selected primitives as drawing text
///
/// # Hit testing
///
/// The primitive closest to the pointer wins. On equal distance the first
/// one in store order is kept. Primitives on hidden layers are skipped,
/// except macros, which span several layers and stay selectable.
#[derive(Debug, Clone)]
pub struct SelectionManager {
    tolerance_px: i32,
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_SELECTION_TOLERANCE)
    }

    /// Creates a manager with a hit tolerance in device pixels.
    pub fn with_tolerance(tolerance_px: i32) -> Self {
        Self {
            tolerance_px: tolerance_px.max(0),
        }
    }

    pub fn tolerance_px(&self) -> i32 {
        self.tolerance_px
    }

    pub fn set_tolerance_px(&mut self, tolerance_px: i32) {
        self.tolerance_px = tolerance_px.max(0);
    }

    /// Converts the pixel tolerance at device column `px` into logical
    /// units, never less than 2.
    ///
    /// # Arguments
    ///
    /// * `map` - Current coordinate mapping
    /// * `px` - Device X of the pointer
    pub fn logical_tolerance(&self, map: &MapCoordinates, px: i32) -> i32 {
        let t = map
            .unmap_x_nosnap(px.saturating_add(self.tolerance_px))
            .saturating_sub(map.unmap_x_nosnap(px))
            .saturating_abs();
        t.max(MIN_LOGICAL_TOLERANCE)
    }

    /// Finds the primitive closest to a logical point.
    ///
    /// # Returns
    ///
    /// The index and distance of the closest hit-testable primitive, or
    /// `None` for an empty drawing.
    pub fn nearest_primitive(&self, drawing: &Drawing, p: Point) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        for (i, prim) in drawing.primitives().iter().enumerate() {
            if !is_hit_testable(drawing, prim) {
                continue;
            }
            let d = prim.distance_to(p);
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((i, d));
            }
        }
        best
    }

    /// Clears the selection, then selects the primitive under the pointer.
    ///
    /// # Returns
    ///
    /// The index of the selected primitive, if one was within tolerance.
    pub fn select_at(
        &self,
        drawing: &mut Drawing,
        map: &MapCoordinates,
        px: i32,
        py: i32,
    ) -> Option<usize> {
        self.deselect_all(drawing);
        let index = self.hit(drawing, map, px, py)?;
        if let Some(prim) = drawing.get_mut(index) {
            prim.selected = true;
        }
        Some(index)
    }

    /// Flips the selection of the primitive under the pointer, leaving the
    /// others untouched.
    pub fn toggle_at(
        &self,
        drawing: &mut Drawing,
        map: &MapCoordinates,
        px: i32,
        py: i32,
    ) -> Option<usize> {
        let index = self.hit(drawing, map, px, py)?;
        if let Some(prim) = drawing.get_mut(index) {
            prim.selected = !prim.selected;
        }
        Some(index)
    }

    fn hit(&self, drawing: &Drawing, map: &MapCoordinates, px: i32, py: i32) -> Option<usize> {
        let tolerance = self.logical_tolerance(map, px);
        let p = Point::new(map.unmap_x_nosnap(px), map.unmap_y_nosnap(py));
        self.nearest_primitive(drawing, p)
            .filter(|(_, d)| *d < tolerance)
            .map(|(i, _)| i)
    }

    /// Selects every primitive matching a logical rectangle. Primitives on
    /// hidden layers are skipped unless they are macros, and a rectangle
    /// narrower or shorter than one unit selects nothing.
    ///
    /// # Arguments
    ///
    /// * `rect` - Selection rectangle in logical units
    /// * `left_to_right` - Requires full enclosure when true, any overlap
    ///   when false
    /// * `multiple` - Keeps the current selection when true
    ///
    /// # Returns
    ///
    /// The number of primitives selected by the rectangle.
    pub fn select_rect(
        &self,
        drawing: &mut Drawing,
        rect: &Rect,
        left_to_right: bool,
        multiple: bool,
    ) -> usize {
        if !multiple {
            self.deselect_all(drawing);
        }
        if rect.width < 1 || rect.height < 1 {
            return 0;
        }
        let hits: Vec<usize> = drawing
            .primitives()
            .iter()
            .enumerate()
            .filter(|(_, p)| is_hit_testable(drawing, p) && p.intersects(rect, left_to_right))
            .map(|(i, _)| i)
            .collect();
        for &i in &hits {
            if let Some(prim) = drawing.get_mut(i) {
                prim.selected = true;
            }
        }
        hits.len()
    }

    pub fn deselect_all(&self, drawing: &mut Drawing) {
        for prim in drawing.iter_mut() {
            prim.selected = false;
        }
    }

    pub fn select_all(&self, drawing: &mut Drawing) {
        for prim in drawing.iter_mut() {
            prim.selected = true;
        }
    }

    pub fn selected_indices(&self, drawing: &Drawing) -> Vec<usize> {
        drawing
            .primitives()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.selected)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn first_selected(&self, drawing: &Drawing) -> Option<usize> {
        drawing.primitives().iter().position(|p| p.selected)
    }

    pub fn has_selection(&self, drawing: &Drawing) -> bool {
        drawing.primitives().iter().any(|p| p.selected)
    }

    /// True when exactly one primitive is selected.
    pub fn is_unique_selected(&self, drawing: &Drawing) -> bool {
        drawing.primitives().iter().filter(|p| p.selected).count() == 1
    }

    /// Selection flags in store order.
    pub fn selection_state(&self, drawing: &Drawing) -> Vec<bool> {
        drawing.primitives().iter().map(|p| p.selected).collect()
    }

    /// Applies flags captured by [`SelectionManager::selection_state`].
    /// Extra flags are ignored and missing ones deselect.
    pub fn restore_selection(&self, drawing: &mut Drawing, state: &[bool]) {
        for (i, prim) in drawing.iter_mut().enumerate() {
            prim.selected = state.get(i).copied().unwrap_or(false);
        }
    }

    /// Bounding box of the selected primitives' control points.
    pub fn selected_bounds(&self, drawing: &Drawing) -> Option<Rect> {
        drawing
            .primitives()
            .iter()
            .filter(|p| p.selected)
            .filter_map(|p| p.bounds())
            .reduce(|a, b| a.union(&b))
    }

    /// The selected primitives as a standalone drawing text, ready for the
    /// clipboard.
    pub fn selected_text(&self, drawing: &Drawing, extensions: bool) -> String {
        let mut out = String::from("[FIDOCAD]\n");
        out.push_str(&drawing.header(extensions));
        for prim in drawing.primitives().iter().filter(|p| p.selected) {
            out.push_str(&prim.write(extensions, drawing.config()));
        }
        out
    }
}

/// Macros span several layers and stay selectable when their own layer is
/// hidden.
fn is_hit_testable(drawing: &Drawing, prim: &Primitive) -> bool {
    prim.is_macro() || drawing.is_layer_visible(prim.layer)
}
