//! Pointer gesture handling.
//!
//! A gesture starts with [`DragController::start`], continues with any
//! number of [`DragController::drag`] calls and ends with either
//! [`DragController::finish`] or [`DragController::cancel`]:
//!
//! ```text
//! Idle --start--> Handle | Primitives | Marquee --finish/cancel--> Idle
//! ```
//!
//! The controller keeps indices into the drawing, never references, and
//! records the control points it may move so a cancel can put them back.
//! Pointer positions are device pixels; they are unmapped through the
//! [`MapCoordinates`] passed to each call.

use schemkit_core::geometry::clamp_coord;
use schemkit_core::{Point, Rect};
use tracing::debug;

use crate::drawing::Drawing;
use crate::map_coordinates::MapCoordinates;
use crate::model::Shape;
use crate::selection_manager::SelectionManager;

/// What the current gesture is doing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Moving one control point of a selected primitive.
    Handle {
        index: usize,
        handle: usize,
        origin: Point,
    },
    /// Moving every selected primitive by the same delta.
    Primitives {
        /// Last snapped pointer position, logical.
        last: Point,
        /// Control points of every selected primitive at gesture start.
        origin: Vec<(usize, Vec<Point>)>,
    },
    /// Drawing a selection rectangle.
    Marquee {
        /// Snapped start, logical.
        anchor: Point,
        /// Start and current pointer, device.
        anchor_px: (i32, i32),
        current_px: (i32, i32),
        left_to_right: bool,
    },
}

/// Kind of gesture chosen by [`DragController::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Handle,
    Primitives,
    Marquee,
}

/// Result of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No gesture was in progress.
    None,
    HandleMoved { changed: bool },
    PrimitivesMoved { moved: bool },
    MarqueeSelected { count: usize },
}

impl DragOutcome {
    /// True when the drawing content changed and deserves an undo entry.
    pub fn changed_drawing(&self) -> bool {
        matches!(
            self,
            DragOutcome::HandleMoved { changed: true }
                | DragOutcome::PrimitivesMoved { moved: true }
        )
    }
}

/// Marquee rectangle to show while dragging, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marquee {
    pub rect: Rect,
    /// Left-to-right selects enclosed primitives; right-to-left selects
    /// every primitive the rectangle touches.
    pub left_to_right: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    phase: DragPhase,
    selection: SelectionManager,
}

impl DragController {
    pub fn new(selection: SelectionManager) -> Self {
        Self {
            phase: DragPhase::Idle,
            selection,
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// Starts a gesture at device position `(px, py)`.
    ///
    /// A handle of a selected primitive under the pointer wins. Otherwise
    /// the closest primitive within tolerance is dragged as a whole, and
    /// selected unless `multiple` is set. Otherwise a marquee begins.
    pub fn start(
        &mut self,
        drawing: &mut Drawing,
        map: &MapCoordinates,
        px: i32,
        py: i32,
        multiple: bool,
    ) -> DragKind {
        let tolerance = self.selection.logical_tolerance(map, px);
        let pointer = Point::new(map.unmap_x_nosnap(px), map.unmap_y_nosnap(py));

        let handle = drawing.primitives().iter().enumerate().find_map(|(i, p)| {
            let visible = p.is_macro() || drawing.is_layer_visible(p.layer);
            if !(visible && p.selected) {
                return None;
            }
            p.on_handle(map, px, py).map(|h| (i, h))
        });
        if let Some((index, handle)) = handle {
            if let Some(origin) = drawing.get(index).and_then(|p| p.control_point(handle)) {
                debug!("Dragging handle {} of primitive {}", handle, index);
                self.phase = DragPhase::Handle {
                    index,
                    handle,
                    origin,
                };
                return DragKind::Handle;
            }
        }

        let hit = self
            .selection
            .nearest_primitive(drawing, pointer)
            .filter(|(_, d)| *d < tolerance)
            .map(|(i, _)| i);
        let snapped = map.unmap_snap(px, py);

        if let Some(index) = hit {
            let already = drawing.get(index).is_some_and(|p| p.selected);
            if !multiple && !already {
                self.selection.deselect_all(drawing);
            }
            if !multiple {
                if let Some(p) = drawing.get_mut(index) {
                    p.selected = true;
                }
            }
            let origin = drawing
                .primitives()
                .iter()
                .enumerate()
                .filter(|(_, p)| p.selected)
                .map(|(i, p)| (i, p.control_points()))
                .collect();
            self.phase = DragPhase::Primitives {
                last: snapped,
                origin,
            };
            return DragKind::Primitives;
        }

        self.phase = DragPhase::Marquee {
            anchor: snapped,
            anchor_px: (px, py),
            current_px: (px, py),
            left_to_right: true,
        };
        DragKind::Marquee
    }

    /// Continues the gesture at `(px, py)`. `constrain` keeps a dragged
    /// rectangle or oval corner on the square diagonal.
    pub fn drag(
        &mut self,
        drawing: &mut Drawing,
        map: &MapCoordinates,
        px: i32,
        py: i32,
        constrain: bool,
    ) {
        match &mut self.phase {
            DragPhase::Idle => {}
            DragPhase::Handle { index, handle, .. } => {
                let (index, handle) = (*index, *handle);
                drag_handle(drawing, map, index, handle, px, py, constrain);
            }
            DragPhase::Primitives { last, .. } => {
                let to = map.unmap_snap(px, py);
                let (dx, dy) = (to.x.saturating_sub(last.x), to.y.saturating_sub(last.y));
                *last = to;
                if dx != 0 || dy != 0 {
                    move_selected(drawing, dx, dy);
                }
            }
            DragPhase::Marquee {
                anchor_px,
                current_px,
                left_to_right,
                ..
            } => {
                *current_px = (px, py);
                *left_to_right = px >= anchor_px.0;
            }
        }
    }

    /// The marquee being drawn, if any.
    pub fn marquee(&self) -> Option<Marquee> {
        match &self.phase {
            DragPhase::Marquee {
                anchor_px,
                current_px,
                left_to_right,
                ..
            } => Some(Marquee {
                rect: Rect::from_corners(
                    Point::new(anchor_px.0, anchor_px.1),
                    Point::new(current_px.0, current_px.1),
                ),
                left_to_right: *left_to_right,
            }),
            _ => None,
        }
    }

    /// Ends the gesture at `(px, py)` and reports what happened.
    pub fn finish(
        &mut self,
        drawing: &mut Drawing,
        map: &MapCoordinates,
        px: i32,
        py: i32,
        multiple: bool,
    ) -> DragOutcome {
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => DragOutcome::None,
            DragPhase::Handle {
                index,
                handle,
                origin,
            } => {
                let now = drawing.get(index).and_then(|p| p.control_point(handle));
                DragOutcome::HandleMoved {
                    changed: now.is_some_and(|p| p != origin),
                }
            }
            DragPhase::Primitives { origin, .. } => {
                let moved = origin.iter().any(|(i, points)| {
                    drawing
                        .get(*i)
                        .is_some_and(|p| p.control_points() != *points)
                });
                DragOutcome::PrimitivesMoved { moved }
            }
            DragPhase::Marquee {
                anchor,
                left_to_right,
                ..
            } => {
                let end = Point::new(map.unmap_x_nosnap(px), map.unmap_y_nosnap(py));
                let rect = Rect::from_corners(anchor, end);
                let count = self
                    .selection
                    .select_rect(drawing, &rect, left_to_right, multiple);
                DragOutcome::MarqueeSelected { count }
            }
        }
    }

    /// Abandons the gesture and puts back every point it moved.
    pub fn cancel(&mut self, drawing: &mut Drawing) {
        match std::mem::take(&mut self.phase) {
            DragPhase::Handle {
                index,
                handle,
                origin,
            } => {
                if let Some(p) = drawing.get_mut(index) {
                    p.set_control_point(handle, origin);
                }
            }
            DragPhase::Primitives { origin, .. } => {
                for (i, points) in origin {
                    if let Some(p) = drawing.get_mut(i) {
                        for (handle, point) in points.into_iter().enumerate() {
                            p.set_control_point(handle, point);
                        }
                    }
                }
            }
            DragPhase::Idle | DragPhase::Marquee { .. } => {}
        }
    }
}

fn drag_handle(
    drawing: &mut Drawing,
    map: &MapCoordinates,
    index: usize,
    handle: usize,
    px: i32,
    py: i32,
    constrain: bool,
) {
    let Some(prim) = drawing.get_mut(index) else {
        return;
    };
    let boxed = matches!(prim.shape, Shape::Rectangle(_) | Shape::Oval(_));
    let device_y = if constrain && boxed && handle < 2 {
        let other = prim.control_point(1 - handle).unwrap_or_default();
        clamp_coord(
            i64::from(map.map_y(other.x, other.y)) + i64::from(px)
                - i64::from(map.map_x(other.x, other.y)),
        )
    } else {
        py
    };
    let to = Point::new(map.unmap_x_snap(px), map.unmap_y_snap(device_y));
    prim.set_control_point(handle, to);
}

/// Moves every selected primitive, or none of them when a valid control
/// point would get a negative coordinate.
fn move_selected(drawing: &mut Drawing, dx: i32, dy: i32) {
    let blocked = drawing.primitives().iter().filter(|p| p.selected).any(|p| {
        p.control_points()
            .iter()
            .enumerate()
            .filter(|(i, _)| p.is_handle_valid(*i))
            .any(|(_, c)| {
                i64::from(c.x) + i64::from(dx) < 0 || i64::from(c.y) + i64::from(dy) < 0
            })
    });
    if blocked {
        debug!("Move by ({}, {}) refused: negative coordinates", dx, dy);
        return;
    }
    for prim in drawing.iter_mut().filter(|p| p.selected) {
        prim.translate(dx, dy);
        if let Some(m) = prim.as_macro_mut() {
            m.set_draw_only_layer(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Drawing, MapCoordinates, DragController) {
        let mut d = Drawing::new();
        d.parse("LI 10 10 50 10 0\nRV 100 100 120 110 0\n");
        (d, MapCoordinates::new(), DragController::default())
    }

    #[test]
    fn test_whole_primitive_drag() {
        let (mut d, map, mut c) = setup();
        assert_eq!(c.start(&mut d, &map, 30, 11, false), DragKind::Primitives);
        assert!(d.primitives()[0].selected);
        c.drag(&mut d, &map, 40, 21, false);
        assert_eq!(d.primitives()[0].control_point(0), Some(Point::new(20, 20)));
        assert_eq!(d.primitives()[0].control_point(1), Some(Point::new(60, 20)));
        let outcome = c.finish(&mut d, &map, 40, 21, false);
        assert_eq!(outcome, DragOutcome::PrimitivesMoved { moved: true });
        assert!(!c.is_active());
    }

    #[test]
    fn test_handle_drag_and_cancel() {
        let (mut d, map, mut c) = setup();
        d.get_mut(0).unwrap().selected = true;
        assert_eq!(c.start(&mut d, &map, 50, 10, false), DragKind::Handle);
        c.drag(&mut d, &map, 70, 30, false);
        assert_eq!(d.primitives()[0].control_point(1), Some(Point::new(70, 30)));
        c.cancel(&mut d);
        assert_eq!(d.primitives()[0].control_point(1), Some(Point::new(50, 10)));
    }

    #[test]
    fn test_no_op_handle_drag_reports_no_change() {
        let (mut d, map, mut c) = setup();
        d.get_mut(0).unwrap().selected = true;
        c.start(&mut d, &map, 50, 10, false);
        let outcome = c.finish(&mut d, &map, 50, 10, false);
        assert_eq!(outcome, DragOutcome::HandleMoved { changed: false });
        assert!(!outcome.changed_drawing());
    }

    #[test]
    fn test_constrained_rectangle_corner() {
        let (mut d, map, mut c) = setup();
        d.get_mut(1).unwrap().selected = true;
        assert_eq!(c.start(&mut d, &map, 120, 110, false), DragKind::Handle);
        c.drag(&mut d, &map, 140, 115, true);
        assert_eq!(d.primitives()[1].control_point(1), Some(Point::new(140, 140)));
    }

    #[test]
    fn test_negative_move_is_refused() {
        let (mut d, map, mut c) = setup();
        c.start(&mut d, &map, 30, 10, false);
        c.drag(&mut d, &map, 15, 10, false);
        assert_eq!(d.primitives()[0].control_point(0), Some(Point::new(10, 10)));
    }

    #[test]
    fn test_marquee_direction() {
        let (mut d, map, mut c) = setup();
        assert_eq!(c.start(&mut d, &map, 200, 200, false), DragKind::Marquee);
        c.drag(&mut d, &map, 110, 105, false);
        let marquee = c.marquee().unwrap();
        assert!(!marquee.left_to_right);
        assert_eq!(marquee.rect, Rect::new(110, 105, 90, 95));
        let outcome = c.finish(&mut d, &map, 110, 105, false);
        assert_eq!(outcome, DragOutcome::MarqueeSelected { count: 1 });
        assert!(d.primitives()[1].selected);
    }
}
