//! Logical to device coordinate mapping.
//!
//! Drawings use integer logical units. A [`MapCoordinates`] turns them into
//! device pixels and back, applies grid snapping when unmapping pointer
//! positions and records the extent of everything mapped during a pass.

use std::fmt;

use schemkit_core::constants::{DEFAULT_GRID_STEP, MACRO_ORIGIN, MAX_MAGNITUDE, MIN_MAGNITUDE};
use schemkit_core::Point;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
struct MapFrame {
    x_center: f64,
    y_center: f64,
    x_magnitude: f64,
    y_magnitude: f64,
    orientation: i32,
    mirror: bool,
    is_macro: bool,
    snap: bool,
    x_grid_step: i32,
    y_grid_step: i32,
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
}

impl Default for MapFrame {
    fn default() -> Self {
        Self {
            x_center: 0.0,
            y_center: 0.0,
            x_magnitude: 1.0,
            y_magnitude: 1.0,
            orientation: 0,
            mirror: false,
            is_macro: false,
            snap: true,
            x_grid_step: DEFAULT_GRID_STEP,
            y_grid_step: DEFAULT_GRID_STEP,
            x_min: i32::MAX,
            x_max: i32::MIN,
            y_min: i32::MAX,
            y_max: i32::MIN,
        }
    }
}

/// Coordinate system state plus a stack of saved states.
#[derive(Debug, Clone, Default)]
pub struct MapCoordinates {
    frame: MapFrame,
    stack: Vec<MapFrame>,
}

impl MapCoordinates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_center(&self) -> f64 {
        self.frame.x_center
    }

    pub fn y_center(&self) -> f64 {
        self.frame.y_center
    }

    /// Sets the device position of the logical origin.
    pub fn set_center(&mut self, x: f64, y: f64) {
        self.frame.x_center = x;
        self.frame.y_center = y;
    }

    pub fn x_magnitude(&self) -> f64 {
        self.frame.x_magnitude
    }

    pub fn y_magnitude(&self) -> f64 {
        self.frame.y_magnitude
    }

    /// Sets the X zoom factor, clamped to the supported range.
    pub fn set_x_magnitude(&mut self, magnitude: f64) {
        self.frame.x_magnitude = clamp_magnitude(magnitude);
    }

    /// Sets the Y zoom factor, clamped to the supported range.
    pub fn set_y_magnitude(&mut self, magnitude: f64) {
        self.frame.y_magnitude = clamp_magnitude(magnitude);
    }

    pub fn set_magnitudes(&mut self, x: f64, y: f64) {
        self.set_x_magnitude(x);
        self.set_y_magnitude(y);
    }

    /// Sets both zoom factors without range checks, for export backends
    /// working at very small or very large scales.
    pub fn set_magnitudes_no_check(&mut self, x: f64, y: f64) {
        self.frame.x_magnitude = x;
        self.frame.y_magnitude = y;
    }

    pub fn orientation(&self) -> i32 {
        self.frame.orientation
    }

    /// Quarter turns, clamped to 0..=3.
    pub fn set_orientation(&mut self, orientation: i32) {
        self.frame.orientation = orientation.clamp(0, 3);
    }

    pub fn mirror(&self) -> bool {
        self.frame.mirror
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.frame.mirror = mirror;
    }

    pub fn is_macro(&self) -> bool {
        self.frame.is_macro
    }

    /// Orientation and mirroring only apply in macro mode.
    pub fn set_macro(&mut self, is_macro: bool) {
        self.frame.is_macro = is_macro;
    }

    pub fn snap(&self) -> bool {
        self.frame.snap
    }

    pub fn set_snap(&mut self, snap: bool) {
        self.frame.snap = snap;
    }

    pub fn x_grid_step(&self) -> i32 {
        self.frame.x_grid_step
    }

    pub fn y_grid_step(&self) -> i32 {
        self.frame.y_grid_step
    }

    /// Ignored unless positive.
    pub fn set_x_grid_step(&mut self, step: i32) {
        if step > 0 {
            self.frame.x_grid_step = step;
        }
    }

    /// Ignored unless positive.
    pub fn set_y_grid_step(&mut self, step: i32) {
        if step > 0 {
            self.frame.y_grid_step = step;
        }
    }

    /// Saves the whole state.
    pub fn push(&mut self) {
        self.stack.push(self.frame);
    }

    /// Restores the last saved state. Popping an empty stack leaves the
    /// state unchanged.
    pub fn pop(&mut self) {
        match self.stack.pop() {
            Some(frame) => self.frame = frame,
            None => warn!("Cannot pop the coordinate state out of an empty stack"),
        }
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// X device coordinate, unrounded.
    ///
    /// Outside a macro:
    /// ```text
    /// vx = x * x_magnitude + x_center
    /// ```
    /// Inside a macro the point is first taken relative to the macro origin
    /// and turned by the orientation, then mirrored.
    pub fn map_xr(&self, x: f64, y: f64) -> f64 {
        let f = &self.frame;
        if !f.is_macro {
            return x * f.x_magnitude + f.x_center;
        }
        let origin = f64::from(MACRO_ORIGIN);
        let xc = x - origin;
        let yc = y - origin;
        let vx = match (f.mirror, f.orientation) {
            (false, 1) => -yc * f.y_magnitude,
            (false, 2) => -xc * f.x_magnitude,
            (false, 3) => yc * f.y_magnitude,
            (false, _) => xc * f.x_magnitude,
            (true, 1) => yc * f.y_magnitude,
            (true, 2) => xc * f.x_magnitude,
            (true, 3) => -yc * f.y_magnitude,
            (true, _) => -xc * f.x_magnitude,
        };
        vx + f.x_center
    }

    /// Y device coordinate, unrounded.
    pub fn map_yr(&self, x: f64, y: f64) -> f64 {
        let f = &self.frame;
        if !f.is_macro {
            return y * f.y_magnitude + f.y_center;
        }
        let origin = f64::from(MACRO_ORIGIN);
        let xc = x - origin;
        let yc = y - origin;
        let vy = match f.orientation {
            1 => xc * f.x_magnitude,
            2 => -yc * f.y_magnitude,
            3 => -xc * f.x_magnitude,
            _ => yc * f.y_magnitude,
        };
        vy + f.y_center
    }

    /// X device pixel of a logical point. Does not track extents.
    pub fn map_x(&self, x: i32, y: i32) -> i32 {
        self.map_xr(f64::from(x), f64::from(y)).round() as i32
    }

    /// Y device pixel of a logical point. Does not track extents.
    pub fn map_y(&self, x: i32, y: i32) -> i32 {
        self.map_yr(f64::from(x), f64::from(y)).round() as i32
    }

    /// Maps a point and records it in the tracked extents.
    pub fn map_point_tracked(&mut self, p: Point) -> (i32, i32) {
        let vx = self.map_x(p.x, p.y);
        let vy = self.map_y(p.x, p.y);
        self.track_point(vx, vy);
        (vx, vy)
    }

    /// Records a device position in the tracked extents.
    pub fn track_point(&mut self, vx: i32, vy: i32) {
        let f = &mut self.frame;
        f.x_min = f.x_min.min(vx);
        f.x_max = f.x_max.max(vx);
        f.y_min = f.y_min.min(vy);
        f.y_max = f.y_max.max(vy);
    }

    pub fn reset_min_max(&mut self) {
        let f = &mut self.frame;
        f.x_min = i32::MAX;
        f.y_min = i32::MAX;
        f.x_max = i32::MIN;
        f.y_max = i32::MIN;
    }

    /// Tracked extents as `(x_min, y_min, x_max, y_max)`, or `None` when
    /// nothing was tracked since the last reset.
    pub fn extents(&self) -> Option<(i32, i32, i32, i32)> {
        let f = &self.frame;
        (f.x_min <= f.x_max && f.y_min <= f.y_max).then_some((f.x_min, f.y_min, f.x_max, f.y_max))
    }

    /// Logical X of a device column, without snapping.
    ///
    /// ```text
    /// x = round((vx - x_center) / x_magnitude)
    /// ```
    pub fn unmap_x_nosnap(&self, vx: i32) -> i32 {
        ((f64::from(vx) - self.frame.x_center) / self.frame.x_magnitude).round() as i32
    }

    pub fn unmap_y_nosnap(&self, vy: i32) -> i32 {
        ((f64::from(vy) - self.frame.y_center) / self.frame.y_magnitude).round() as i32
    }

    /// Logical X of a device column, rounded to the grid when snapping.
    pub fn unmap_x_snap(&self, vx: i32) -> i32 {
        let x = self.unmap_x_nosnap(vx);
        if self.frame.snap {
            snap_to(x, self.frame.x_grid_step)
        } else {
            x
        }
    }

    pub fn unmap_y_snap(&self, vy: i32) -> i32 {
        let y = self.unmap_y_nosnap(vy);
        if self.frame.snap {
            snap_to(y, self.frame.y_grid_step)
        } else {
            y
        }
    }

    /// Logical point under a device position, snapped.
    pub fn unmap_snap(&self, vx: i32, vy: i32) -> Point {
        Point::new(self.unmap_x_snap(vx), self.unmap_y_snap(vy))
    }
}

fn clamp_magnitude(magnitude: f64) -> f64 {
    if magnitude.abs() < MIN_MAGNITUDE {
        MIN_MAGNITUDE
    } else if magnitude.abs() > MAX_MAGNITUDE {
        MAX_MAGNITUDE
    } else {
        magnitude
    }
}

fn snap_to(value: i32, step: i32) -> i32 {
    ((f64::from(value) / f64::from(step)).round() as i32).saturating_mul(step)
}

impl fmt::Display for MapCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.frame;
        write!(
            f,
            "[xCenter={}|yCenter={}|xMagnitude={}|yMagnitude={}|orientation={}|mirror={}|isMacro={}|snap={}|xMin={}|xMax={}|yMin={}|yMax={}|xGridStep={}|yGridStep={}]",
            s.x_center,
            s.y_center,
            s.x_magnitude,
            s.y_magnitude,
            s.orientation,
            s.mirror,
            s.is_macro,
            s.snap,
            s.x_min,
            s.x_max,
            s.y_min,
            s.y_max,
            s.x_grid_step,
            s.y_grid_step
        )
    }
}
