use schemkit_core::geometry::{point_in_polygon, point_to_polyline};
use schemkit_core::{Point, PrimitiveError};
use serde::{Deserialize, Serialize};

use super::style::read_dashed;
use super::tokens::Tokens;
use super::{Parsed, PrimitiveShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
    pub filled: bool,
    pub dash: i32,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>, filled: bool) -> Self {
        Self {
            vertices,
            filled,
            dash: 0,
        }
    }

    // PV x1 y1 ... xn yn layer [FCJ dash text]
    pub(crate) fn parse(t: &Tokens, filled: bool) -> Result<Parsed<Self>, PrimitiveError> {
        let base = t.base_len();
        if base < 4 {
            return Err(PrimitiveError::MissingArguments {
                command: t.command().to_string(),
                expected: 4,
                found: base,
            });
        }
        let count = (base - 2) / 2;
        let vertices = (0..count)
            .map(|i| t.point(1 + 2 * i))
            .collect::<Result<Vec<_>, _>>()?;
        let ext = if base < t.len() {
            read_dashed(t, base + 1)?
        } else {
            Default::default()
        };
        Ok(Parsed {
            shape: Self {
                vertices,
                filled,
                dash: ext.dash,
            },
            layer: t.layer(base - 1)?,
            annotated: ext.annotated,
        })
    }
}

impl PrimitiveShape for Polygon {
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
        point_to_polyline(&self.vertices, true, p)
    }

    fn base_line(&self, layer: usize) -> String {
        let mut line = String::from(if self.filled { "PP" } else { "PV" });
        for v in &self.vertices {
            line.push_str(&format!(" {} {}", v.x, v.y));
        }
        line.push_str(&format!(" {}", layer));
        line
    }

    fn style_tokens(&self) -> Option<Vec<String>> {
        Some(vec![self.dash.to_string()])
    }

    fn has_custom_style(&self) -> bool {
        self.dash != 0
    }

    fn is_degenerate(&self) -> bool {
        self.vertices.is_empty()
    }
}
