use schemkit_core::constants::{DEFAULT_TEXT_FONT, TEXT_MIRRORED};
use schemkit_core::geometry::{point_in_polygon, point_in_rectangle};
use schemkit_core::{Point, PrimitiveError};
use serde::{Deserialize, Serialize};

use super::tokens::{decode_font, encode_font, Tokens};
use super::{Parsed, PrimitiveShape};

/// Free text with explicit size, orientation, style bits and font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvText {
    pub at: Point,
    pub size_x: i32,
    pub size_y: i32,
    /// Orientation in degrees.
    pub orientation: i32,
    pub style: i32,
    pub font: String,
    pub text: String,
}

impl AdvText {
    pub fn new(at: Point, text: impl Into<String>) -> Self {
        Self {
            at,
            size_x: 3,
            size_y: 4,
            orientation: 0,
            style: 0,
            font: DEFAULT_TEXT_FONT.to_string(),
            text: text.into(),
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.style & TEXT_MIRRORED != 0
    }

    // TY x y sizey sizex orientation style layer font text...
    // TE x y text...
    pub(crate) fn parse(t: &Tokens) -> Result<Parsed<Self>, PrimitiveError> {
        if t.command() == "TE" {
            t.require(3)?;
            return Ok(Parsed {
                shape: Self::new(t.point(1)?, t.rest(3)),
                layer: 0,
                annotated: false,
            });
        }
        t.require(8)?;
        let mut text = Self {
            at: t.point(1)?,
            size_y: t.int(3)?,
            size_x: t.int(4)?,
            orientation: t.int(5)?,
            style: t.int(6)?,
            font: DEFAULT_TEXT_FONT.to_string(),
            text: String::new(),
        };
        let layer = if t.len() == 8 {
            text.text = t.rest(7);
            0
        } else {
            text.font = decode_font(t.get(8).unwrap_or("*"));
            text.text = t.rest(9);
            t.layer(7)?
        };
        Ok(Parsed {
            shape: text,
            layer,
            annotated: false,
        })
    }

    fn outline(&self) -> (i32, i32) {
        let chars = self.text.chars().count() as i32;
        let width = chars.saturating_mul(self.size_x.max(1));
        let width = if self.is_mirrored() { -width } else { width };
        (width, self.size_y.max(1))
    }
}

impl PrimitiveShape for AdvText {
    fn points(&self) -> Vec<Point> {
        vec![self.at]
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        vec![&mut self.at]
    }

    fn distance_to(&self, p: Point) -> i32 {
        let (w, h) = self.outline();
        let (x, y) = (self.at.x, self.at.y);
        let inside = if self.orientation == 0 {
            point_in_rectangle(x.min(x.saturating_add(w)), y, w.saturating_abs(), h, p)
        } else {
            let angle = (self.orientation as f64).to_radians();
            let (si, co) = angle.sin_cos();
            let (wf, hf) = (f64::from(w), f64::from(h));
            let (xf, yf) = (f64::from(x), f64::from(y));
            let corners = [
                Point::new(x, y),
                Point::new((xf + hf * si) as i32, (yf + hf * co) as i32),
                Point::new(
                    (xf + hf * si + wf * co) as i32,
                    (yf + hf * co - wf * si) as i32,
                ),
                Point::new((xf + wf * co) as i32, (yf - wf * si) as i32),
            ];
            point_in_polygon(&corners, p)
        };
        if inside {
            0
        } else {
            i32::MAX / 2
        }
    }

    fn base_line(&self, layer: usize) -> String {
        format!(
            "TY {} {} {} {} {} {} {} {} {}",
            self.at.x,
            self.at.y,
            self.size_y,
            self.size_x,
            self.orientation,
            self.style,
            layer,
            encode_font(&self.font),
            self.text
        )
    }

    fn is_degenerate(&self) -> bool {
        self.text.is_empty()
    }

    fn rotate(&mut self, ccw: bool, center: Point) {
        self.at = self.at.rotated(ccw, center);
        let ccw = if self.is_mirrored() { !ccw } else { ccw };
        let quarter = self.orientation / 90 + if ccw { 1 } else { 3 };
        self.orientation = 90 * quarter.rem_euclid(4);
    }

    fn mirror(&mut self, axis_x: i32) {
        self.at = self.at.mirrored(axis_x);
        self.style ^= TEXT_MIRRORED;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        line.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn test_full_form() {
        let items = toks("TY 10 20 4 3 0 1 2 Times++New hello world");
        let parsed = AdvText::parse(&Tokens::new(&items)).unwrap();
        assert_eq!(parsed.layer, 2);
        assert_eq!(parsed.shape.font, "Times New");
        assert_eq!(parsed.shape.text, "hello world");
        assert_eq!(parsed.shape.style, 1);
    }

    #[test]
    fn test_short_form_and_legacy() {
        let items = toks("TY 1 2 0 0 0 0 Name");
        let parsed = AdvText::parse(&Tokens::new(&items)).unwrap();
        assert_eq!(parsed.shape.text, "Name");
        assert_eq!(parsed.layer, 0);

        let items = toks("TE 5 5 legacy text");
        let parsed = AdvText::parse(&Tokens::new(&items)).unwrap();
        assert_eq!(parsed.shape.text, "legacy text");
        assert_eq!((parsed.shape.size_x, parsed.shape.size_y), (3, 4));
    }

    #[test]
    fn test_rotation_steps_orientation() {
        let mut text = AdvText::new(Point::new(10, 0), "x");
        text.rotate(true, Point::new(0, 0));
        assert_eq!(text.orientation, 90);
        text.mirror(0);
        text.rotate(true, Point::new(0, 0));
        assert_eq!(text.orientation, 0);
    }

    #[test]
    fn test_hit_only_inside_box() {
        let text = AdvText::new(Point::new(0, 0), "abcd");
        assert_eq!(text.distance_to(Point::new(5, 2)), 0);
        assert_eq!(text.distance_to(Point::new(50, 2)), i32::MAX / 2);
    }
}
