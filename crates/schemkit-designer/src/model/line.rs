use schemkit_core::geometry::point_to_segment;
use schemkit_core::{Point, PrimitiveError};
use serde::{Deserialize, Serialize};

use super::style::{arrowed_is_default, arrowed_tokens, read_arrowed, Arrows};
use super::tokens::Tokens;
use super::{Parsed, PrimitiveShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub arrows: Arrows,
    pub dash: i32,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            arrows: Arrows::default(),
            dash: 0,
        }
    }

    pub(crate) fn parse(t: &Tokens) -> Result<Parsed<Self>, PrimitiveError> {
        t.require(6)?;
        let ext = read_arrowed(t, t.extension_start(6))?;
        Ok(Parsed {
            shape: Self {
                start: t.point(1)?,
                end: t.point(3)?,
                arrows: ext.arrows,
                dash: ext.dash,
            },
            layer: t.layer(5)?,
            annotated: ext.annotated,
        })
    }
}

impl PrimitiveShape for Line {
    fn points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        vec![&mut self.start, &mut self.end]
    }

    fn distance_to(&self, p: Point) -> i32 {
        point_to_segment(self.start, self.end, p)
    }

    fn base_line(&self, layer: usize) -> String {
        format!(
            "LI {} {} {} {} {}",
            self.start.x, self.start.y, self.end.x, self.end.y, layer
        )
    }

    fn style_tokens(&self) -> Option<Vec<String>> {
        Some(arrowed_tokens(&self.arrows, self.dash))
    }

    fn has_custom_style(&self) -> bool {
        !arrowed_is_default(&self.arrows, self.dash)
    }

    fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}
