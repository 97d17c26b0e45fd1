//! Integer geometry and point-distance helpers used for hit testing.
//!
//! Distances are only meaningful near a primitive: anything further than
//! [`MIN_DISTANCE`] in both axes is reported as exactly `MIN_DISTANCE`, which
//! keeps selection cheap on large drawings.
//!
//! Coordinates may sit anywhere in the `i32` range, so differences are taken
//! in `i64` and results saturate back into `i32`.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_BEZIER_SEGMENTS, MIN_DISTANCE};

/// A point in logical drawing units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> i32 {
        point_to_point(*self, *other)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Rotates a quarter turn about `center`.
    ///
    /// ```text
    /// ccw: (x, y) -> (cx + (y - cy), cy - (x - cx))
    /// cw:  (x, y) -> (cx - (y - cy), cy + (x - cx))
    /// ```
    pub fn rotated(&self, ccw: bool, center: Point) -> Point {
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        let dx = i64::from(self.x) - cx;
        let dy = i64::from(self.y) - cy;
        if ccw {
            Point::new(clamp_coord(cx + dy), clamp_coord(cy - dx))
        } else {
            Point::new(clamp_coord(cx - dy), clamp_coord(cy + dx))
        }
    }

    /// Mirrors about the vertical axis through `axis_x`.
    pub fn mirrored(&self, axis_x: i32) -> Point {
        Point::new(
            clamp_coord(2 * i64::from(axis_x) - i64::from(self.x)),
            self.y,
        )
    }
}

/// An axis-aligned rectangle given by its corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the normalized rectangle spanned by two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: span(a.x, b.x),
            height: span(a.y, b.y),
        }
    }

    /// Smallest rectangle holding every point, or `None` for no points.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Self::new(x0, y0, span(x0, x1), span(y0, y1)))
    }

    pub fn contains(&self, p: Point) -> bool {
        point_in_rectangle(self.x, self.y, self.width, self.height, p)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(
            clamp_coord(i64::from(self.x) + i64::from(self.width) / 2),
            clamp_coord(i64::from(self.y) + i64::from(self.height) / 2),
        )
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            span(x, self.right().max(other.right())),
            span(y, self.bottom().max(other.bottom())),
        )
    }
}

/// Narrows a wide intermediate back to a coordinate, saturating.
pub fn clamp_coord(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `|a - b|`, saturating at `i32::MAX`.
fn span(a: i32, b: i32) -> i32 {
    clamp_coord((i64::from(a) - i64::from(b)).abs())
}

/// Distance between two points, saturating at [`MIN_DISTANCE`].
pub fn point_to_point(a: Point, b: Point) -> i32 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    if dx.abs() < MIN_DISTANCE as f64 || dy.abs() < MIN_DISTANCE as f64 {
        (dx * dx + dy * dy).sqrt() as i32
    } else {
        MIN_DISTANCE
    }
}

/// Distance between `p` and the segment `a`-`b`.
pub fn point_to_segment(a: Point, b: Point, p: Point) -> i32 {
    let far = i64::from(MIN_DISTANCE);
    let (px, py) = (i64::from(p.x), i64::from(p.y));
    if px < i64::from(a.x.min(b.x)) - far || px > i64::from(a.x.max(b.x)) + far {
        return MIN_DISTANCE;
    }
    if py < i64::from(a.y.min(b.y)) - far || py > i64::from(a.y.max(b.y)) + far {
        return MIN_DISTANCE;
    }
    segment_distance(a, b, p) as i32
}

fn segment_distance(a: Point, b: Point, p: Point) -> f64 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (px, py) = (p.x as f64, p.y as f64);
    let dx = bx - ax;
    let dy = by - ay;
    if dx == 0.0 && dy == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let t = ((px - ax) * dx + (py - ay) * dy) / (dx * dx + dy * dy);
    let (ex, ey) = if t < 0.0 {
        (px - ax, py - ay)
    } else if t > 1.0 {
        (px - bx, py - by)
    } else {
        (px - (ax + t * dx), py - (ay + t * dy))
    };
    (ex * ex + ey * ey).sqrt()
}

/// Minimum distance between `p` and a chain of segments.
pub fn point_to_polyline(points: &[Point], closed: bool, p: Point) -> i32 {
    match points {
        [] => MIN_DISTANCE,
        [single] => point_to_point(*single, p),
        _ => {
            let mut best = i32::MAX;
            for pair in points.windows(2) {
                best = best.min(point_to_segment(pair[0], pair[1], p));
            }
            if closed {
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    best = best.min(point_to_segment(*last, *first, p));
                }
            }
            best
        }
    }
}

/// Crossing-number test: true if `p` lies inside the polygon.
pub fn point_in_polygon(points: &[Point], p: Point) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let (x, y) = (p.x as f64, p.y as f64);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (points[i].x as f64, points[i].y as f64);
        let (xj, yj) = (points[j].x as f64, points[j].y as f64);
        if ((yi <= y && y < yj) || (yj <= y && y < yi)) && x < (xj - xi) * (y - yi) / (yj - yi) + xi
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True if `p` lies inside the ellipse inscribed in the given box.
pub fn point_in_ellipse(ex: i32, ey: i32, w: i32, h: i32, p: Point) -> bool {
    let (w, h) = (w as f64, h as f64);
    let dx = (p.x as f64 - (ex as f64 + w / 2.0)).abs();
    let dy = (p.y as f64 - (ey as f64 + h / 2.0)).abs();
    if dx > w / 2.0 || dy > h / 2.0 || w == 0.0 || h == 0.0 {
        return false;
    }
    4.0 * dx * dx / w / w + 4.0 * dy * dy / h / h < 1.0
}

/// Approximate distance between `p` and the contour of an ellipse.
///
/// ```text
/// d = |4 (dx²/w² + dy²/h²) - 1| * min(w, h) / 4
/// ```
///
/// Degenerate ellipses fall back to segment distance.
pub fn point_to_ellipse(ex: i32, ey: i32, w: i32, h: i32, p: Point) -> i32 {
    if w == 0 {
        return point_to_segment(Point::new(ex, ey), Point::new(ex, ey.saturating_add(h)), p);
    }
    if h == 0 {
        return point_to_segment(Point::new(ex, ey), Point::new(ex.saturating_add(w), ey), p);
    }
    let (wf, hf) = (w as f64, h as f64);
    let dx = (p.x as f64 - (ex as f64 + wf / 2.0)).abs();
    let dy = (p.y as f64 - (ey as f64 + hf / 2.0)).abs();
    let l = (dx * dx / wf / wf + dy * dy / hf / hf) * 4.0;
    ((l - 1.0).abs() * wf.min(hf) / 4.0).round() as i32
}

/// True if `p` lies inside or on the border of the rectangle.
pub fn point_in_rectangle(ex: i32, ey: i32, w: i32, h: i32, p: Point) -> bool {
    let (px, py) = (i64::from(p.x), i64::from(p.y));
    let (ex, ey) = (i64::from(ex), i64::from(ey));
    !(ex > px || px > ex + i64::from(w) || ey > py || py > ey + i64::from(h))
}

/// Distance between `p` and the nearest border of a rectangle.
pub fn point_to_rectangle(ex: i32, ey: i32, w: i32, h: i32, p: Point) -> i32 {
    let (x1, y1) = (ex.saturating_add(w), ey.saturating_add(h));
    let a = Point::new(ex, ey);
    let b = Point::new(x1, ey);
    let c = Point::new(x1, y1);
    let d = Point::new(ex, y1);
    point_to_segment(a, b, p)
        .min(point_to_segment(b, c, p))
        .min(point_to_segment(c, d, p))
        .min(point_to_segment(d, a, p))
}

/// Flattens a cubic Bezier curve into `MAX_BEZIER_SEGMENTS` segments.
pub fn flatten_bezier(control: &[Point; 4]) -> Vec<Point> {
    let mut out = Vec::with_capacity(MAX_BEZIER_SEGMENTS + 1);
    for i in 0..=MAX_BEZIER_SEGMENTS {
        let t = i as f64 / MAX_BEZIER_SEGMENTS as f64;
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * t * u * u;
        let b2 = 3.0 * t * t * u;
        let b3 = t * t * t;
        let x = b0 * control[0].x as f64
            + b1 * control[1].x as f64
            + b2 * control[2].x as f64
            + b3 * control[3].x as f64;
        let y = b0 * control[0].y as f64
            + b1 * control[1].y as f64
            + b2 * control[2].y as f64
            + b3 * control[3].y as f64;
        out.push(Point::new(x.round() as i32, y.round() as i32));
    }
    out
}

/// Distance between `p` and a cubic Bezier curve.
pub fn point_to_bezier(control: &[Point; 4], p: Point) -> i32 {
    point_to_polyline(&flatten_bezier(control), false, p)
}
