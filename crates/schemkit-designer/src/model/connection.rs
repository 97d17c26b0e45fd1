use schemkit_core::geometry::point_to_point;
use schemkit_core::{Point, PrimitiveError};
use serde::{Deserialize, Serialize};

use super::tokens::Tokens;
use super::{Parsed, PrimitiveShape};

/// A connection dot joining wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub at: Point,
}

impl Connection {
    pub fn new(at: Point) -> Self {
        Self { at }
    }

    pub(crate) fn parse(t: &Tokens) -> Result<Parsed<Self>, PrimitiveError> {
        t.require(4)?;
        Ok(Parsed {
            shape: Self { at: t.point(1)? },
            layer: t.layer(3)?,
            annotated: false,
        })
    }
}

impl PrimitiveShape for Connection {
    fn points(&self) -> Vec<Point> {
        vec![self.at]
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        vec![&mut self.at]
    }

    // Slightly negative at the dot itself so pins win ties with wires.
    fn distance_to(&self, p: Point) -> i32 {
        point_to_point(self.at, p) - 1
    }

    fn base_line(&self, layer: usize) -> String {
        format!("SA {} {} {}", self.at.x, self.at.y, layer)
    }
}
