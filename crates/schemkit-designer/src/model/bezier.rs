use schemkit_core::geometry::point_to_bezier;
use schemkit_core::{Point, PrimitiveError};
use serde::{Deserialize, Serialize};

use super::style::{arrowed_is_default, arrowed_tokens, read_arrowed, Arrows};
use super::tokens::Tokens;
use super::{Parsed, PrimitiveShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bezier {
    pub control: [Point; 4],
    pub arrows: Arrows,
    pub dash: i32,
}

impl Bezier {
    pub fn new(control: [Point; 4]) -> Self {
        Self {
            control,
            arrows: Arrows::default(),
            dash: 0,
        }
    }

    pub(crate) fn parse(t: &Tokens) -> Result<Parsed<Self>, PrimitiveError> {
        t.require(10)?;
        let ext = read_arrowed(t, t.extension_start(10))?;
        Ok(Parsed {
            shape: Self {
                control: [t.point(1)?, t.point(3)?, t.point(5)?, t.point(7)?],
                arrows: ext.arrows,
                dash: ext.dash,
            },
            layer: t.layer(9)?,
            annotated: ext.annotated,
        })
    }
}

impl PrimitiveShape for Bezier {
    fn points(&self) -> Vec<Point> {
        self.control.to_vec()
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        self.control.iter_mut().collect()
    }

    fn distance_to(&self, p: Point) -> i32 {
        point_to_bezier(&self.control, p)
    }

    fn base_line(&self, layer: usize) -> String {
        let c = &self.control;
        format!(
            "BE {} {} {} {} {} {} {} {} {}",
            c[0].x, c[0].y, c[1].x, c[1].y, c[2].x, c[2].y, c[3].x, c[3].y, layer
        )
    }

    fn style_tokens(&self) -> Option<Vec<String>> {
        Some(arrowed_tokens(&self.arrows, self.dash))
    }

    fn has_custom_style(&self) -> bool {
        !arrowed_is_default(&self.arrows, self.dash)
    }
}
