use schemkit_core::geometry::{point_in_polygon, point_to_polyline};
use schemkit_core::{Point, PrimitiveError};
use serde::{Deserialize, Serialize};

use super::style::{arrowed_is_default, arrowed_tokens, read_arrowed, Arrows};
use super::tokens::Tokens;
use super::{Parsed, PrimitiveShape};

/// A smooth curve through its control points, open or closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexCurve {
    pub vertices: Vec<Point>,
    pub filled: bool,
    pub closed: bool,
    pub arrows: Arrows,
    pub dash: i32,
}

impl ComplexCurve {
    pub fn new(vertices: Vec<Point>, filled: bool, closed: bool) -> Self {
        Self {
            vertices,
            filled,
            closed,
            arrows: Arrows::default(),
            dash: 0,
        }
    }

    // CV closed x1 y1 ... xn yn layer [FCJ arrows style len hw dash text]
    pub(crate) fn parse(t: &Tokens, filled: bool) -> Result<Parsed<Self>, PrimitiveError> {
        let base = t.base_len();
        if base < 5 {
            return Err(PrimitiveError::MissingArguments {
                command: t.command().to_string(),
                expected: 5,
                found: base,
            });
        }
        let closed = t.int(1)? == 1;
        let count = (base - 3) / 2;
        let vertices = (0..count)
            .map(|i| t.point(2 + 2 * i))
            .collect::<Result<Vec<_>, _>>()?;
        let ext = if base < t.len() {
            read_arrowed(t, base + 1)?
        } else {
            Default::default()
        };
        Ok(Parsed {
            shape: Self {
                vertices,
                filled,
                closed,
                arrows: ext.arrows,
                dash: ext.dash,
            },
            layer: t.layer(base - 1)?,
            annotated: ext.annotated,
        })
    }
}

impl PrimitiveShape for ComplexCurve {
    fn points(&self) -> Vec<Point> {
        self.vertices.clone()
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        self.vertices.iter_mut().collect()
    }

    fn distance_to(&self, p: Point) -> i32 {
        if self.filled && point_in_polygon(&self.vertices, p) {
            return 1;
        }
        point_to_polyline(&self.vertices, self.closed, p)
    }

    fn base_line(&self, layer: usize) -> String {
        let mut line = format!(
            "{} {}",
            if self.filled { "CP" } else { "CV" },
            i32::from(self.closed)
        );
        for v in &self.vertices {
            line.push_str(&format!(" {} {}", v.x, v.y));
        }
        line.push_str(&format!(" {}", layer));
        line
    }

    fn style_tokens(&self) -> Option<Vec<String>> {
        Some(arrowed_tokens(&self.arrows, self.dash))
    }

    fn has_custom_style(&self) -> bool {
        !arrowed_is_default(&self.arrows, self.dash)
    }

    fn is_degenerate(&self) -> bool {
        self.vertices.len() < 2
    }
}
