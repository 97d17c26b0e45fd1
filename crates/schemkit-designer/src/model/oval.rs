use schemkit_core::geometry::{point_in_ellipse, point_to_ellipse};
use schemkit_core::{Point, PrimitiveError, Rect};
use serde::{Deserialize, Serialize};

use super::style::read_dashed;
use super::tokens::Tokens;
use super::{Parsed, PrimitiveShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oval {
    pub corner1: Point,
    pub corner2: Point,
    pub filled: bool,
    pub dash: i32,
}

impl Oval {
    pub fn new(corner1: Point, corner2: Point, filled: bool) -> Self {
        Self {
            corner1,
            corner2,
            filled,
            dash: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.corner1, self.corner2)
    }

    pub(crate) fn parse(t: &Tokens, filled: bool) -> Result<Parsed<Self>, PrimitiveError> {
        t.require(6)?;
        let ext = read_dashed(t, t.extension_start(6))?;
        Ok(Parsed {
            shape: Self {
                corner1: t.point(1)?,
                corner2: t.point(3)?,
                filled,
                dash: ext.dash,
            },
            layer: t.layer(5)?,
            annotated: ext.annotated,
        })
    }
}

impl PrimitiveShape for Oval {
    fn points(&self) -> Vec<Point> {
        vec![self.corner1, self.corner2]
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        vec![&mut self.corner1, &mut self.corner2]
    }

    fn distance_to(&self, p: Point) -> i32 {
        let r = self.bounds();
        if self.filled {
            if point_in_ellipse(r.x, r.y, r.width, r.height, p) {
                0
            } else {
                1000
            }
        } else {
            point_to_ellipse(r.x, r.y, r.width, r.height, p)
        }
    }

    fn base_line(&self, layer: usize) -> String {
        format!(
            "{} {} {} {} {} {}",
            if self.filled { "EP" } else { "EV" },
            self.corner1.x,
            self.corner1.y,
            self.corner2.x,
            self.corner2.y,
            layer
        )
    }

    fn style_tokens(&self) -> Option<Vec<String>> {
        Some(vec![self.dash.to_string()])
    }

    fn has_custom_style(&self) -> bool {
        self.dash != 0
    }
}
