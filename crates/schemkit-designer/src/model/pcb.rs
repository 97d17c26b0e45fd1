use schemkit_core::geometry::{point_to_point, point_to_segment};
use schemkit_core::{Point, PrimitiveError};
use serde::{Deserialize, Serialize};

use super::tokens::{format_number, Tokens};
use super::{Parsed, PrimitiveShape};

/// A copper trace of a given width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbLine {
    pub start: Point,
    pub end: Point,
    pub width: f64,
}

impl PcbLine {
    pub fn new(start: Point, end: Point, width: f64) -> Self {
        Self { start, end, width }
    }

    // PL x1 y1 x2 y2 width layer
    pub(crate) fn parse(t: &Tokens) -> Result<Parsed<Self>, PrimitiveError> {
        t.require(7)?;
        Ok(Parsed {
            shape: Self {
                start: t.point(1)?,
                end: t.point(3)?,
                width: t.float(5)?,
            },
            layer: t.layer(6)?,
            annotated: false,
        })
    }
}

impl PrimitiveShape for PcbLine {
    fn points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        vec![&mut self.start, &mut self.end]
    }

    fn distance_to(&self, p: Point) -> i32 {
        let d = point_to_segment(self.start, self.end, p) as f64 - self.width / 2.0;
        (d as i32).max(0)
    }

    fn base_line(&self, layer: usize) -> String {
        format!(
            "PL {} {} {} {} {} {}",
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            format_number(self.width),
            layer
        )
    }
}

/// A pad with an optional drill hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbPad {
    pub at: Point,
    pub rx: i32,
    pub ry: i32,
    pub drill: i32,
    /// 0 oval, 1 rectangular, 2 rounded rectangle.
    pub style: i32,
}

impl PcbPad {
    pub fn new(at: Point, rx: i32, ry: i32, drill: i32) -> Self {
        Self {
            at,
            rx,
            ry,
            drill,
            style: 0,
        }
    }

    // PA x y rx ry drill style layer
    pub(crate) fn parse(t: &Tokens) -> Result<Parsed<Self>, PrimitiveError> {
        t.require(8)?;
        Ok(Parsed {
            shape: Self {
                at: t.point(1)?,
                rx: t.int(3)?,
                ry: t.int(4)?,
                drill: t.int(5)?,
                style: t.int(6)?,
            },
            layer: t.layer(7)?,
            annotated: false,
        })
    }
}

impl PrimitiveShape for PcbPad {
    fn points(&self) -> Vec<Point> {
        vec![self.at]
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        vec![&mut self.at]
    }

    fn distance_to(&self, p: Point) -> i32 {
        point_to_point(self.at, p)
            .saturating_sub(self.rx.min(self.ry) / 2)
            .max(0)
    }

    fn base_line(&self, layer: usize) -> String {
        format!(
            "PA {} {} {} {} {} {} {}",
            self.at.x, self.at.y, self.rx, self.ry, self.drill, self.style, layer
        )
    }

    fn rotate(&mut self, ccw: bool, center: Point) {
        self.at = self.at.rotated(ccw, center);
        std::mem::swap(&mut self.rx, &mut self.ry);
    }
}
