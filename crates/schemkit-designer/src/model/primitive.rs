use std::collections::BTreeSet;
use std::sync::Arc;

use schemkit_core::constants::{DEFAULT_TEXT_SIZE, HANDLE_INCREASE, HANDLE_WIDTH};
use schemkit_core::geometry::point_in_rectangle;
use schemkit_core::{DocumentConfig, Point, PrimitiveError, Rect};

use super::tokens::{encode_font, Tokens};
use super::{MacroInstance, PrimitiveKind, PrimitiveShape, Shape};
use crate::library::MacroLibrary;
use crate::map_coordinates::MapCoordinates;

/// Collaborators needed while building primitives.
pub(crate) struct BuildContext<'a> {
    pub library: &'a Arc<MacroLibrary>,
    pub depth: usize,
}

/// A name or value annotation and where it is drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
    pub at: Point,
}

impl TextField {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn hit(&self, p: Point) -> bool {
        if self.text.is_empty() {
            return false;
        }
        let width = (self.text.chars().count() as i32).saturating_mul(DEFAULT_TEXT_SIZE);
        let height = DEFAULT_TEXT_SIZE * 4 / 3;
        point_in_rectangle(self.at.x, self.at.y, width, height, p)
    }
}

/// One element of a drawing.
///
/// Control points are addressed by index: first the shape's own points in
/// file order, then (for every kind except free text) the name and value
/// anchor points.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub layer: usize,
    pub selected: bool,
    pub name: TextField,
    pub value: TextField,
}

impl Primitive {
    pub fn new(shape: Shape, layer: usize) -> Self {
        let anchor = shape.points().first().copied().unwrap_or_default();
        let (name_at, value_at) = match shape {
            Shape::Macro(_) => (anchor.offset(10, 10), anchor.offset(10, 5)),
            _ => (anchor.offset(5, 5), anchor.offset(5, 10)),
        };
        Self {
            shape,
            layer,
            selected: false,
            name: TextField {
                text: String::new(),
                at: name_at,
            },
            value: TextField {
                text: String::new(),
                at: value_at,
            },
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.shape.kind()
    }

    pub fn is_macro(&self) -> bool {
        matches!(self.shape, Shape::Macro(_))
    }

    pub fn as_macro(&self) -> Option<&MacroInstance> {
        match &self.shape {
            Shape::Macro(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_macro_mut(&mut self) -> Option<&mut MacroInstance> {
        match &mut self.shape {
            Shape::Macro(m) => Some(m),
            _ => None,
        }
    }

    pub fn supports_annotation(&self) -> bool {
        !matches!(self.shape, Shape::Text(_))
    }

    pub fn has_annotation(&self) -> bool {
        !self.name.is_empty() || !self.value.is_empty()
    }

    /// Reads a name or value from a `TY` line that follows the primitive.
    pub(crate) fn apply_annotation(
        &mut self,
        items: &[String],
        is_value: bool,
    ) -> Result<(), PrimitiveError> {
        let t = Tokens::new(items);
        t.require(8)?;
        let at = t.point(1)?;
        let text = if t.len() == 8 { t.rest(7) } else { t.rest(9) };
        let field = if is_value {
            &mut self.value
        } else {
            &mut self.name
        };
        *field = TextField { text, at };
        Ok(())
    }

    pub fn control_points(&self) -> Vec<Point> {
        let mut points = self.shape.points();
        if self.supports_annotation() {
            points.push(self.name.at);
            points.push(self.value.at);
        }
        points
    }

    pub fn control_point_count(&self) -> usize {
        self.shape.points().len() + if self.supports_annotation() { 2 } else { 0 }
    }

    /// Name and value anchors only count while their text is set.
    pub fn is_handle_valid(&self, index: usize) -> bool {
        let own = self.shape.points().len();
        match index.checked_sub(own) {
            None => true,
            Some(0) => self.supports_annotation() && !self.name.is_empty(),
            Some(1) => self.supports_annotation() && !self.value.is_empty(),
            Some(_) => false,
        }
    }

    fn valid_points(&self) -> Vec<Point> {
        self.control_points()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| self.is_handle_valid(*i))
            .map(|(_, p)| p)
            .collect()
    }

    /// Moves one control point. Returns false for an index out of range.
    pub fn set_control_point(&mut self, index: usize, p: Point) -> bool {
        let own = self.shape.points().len();
        if index < own {
            if let Some(slot) = self.shape.points_mut().into_iter().nth(index) {
                *slot = p;
                return true;
            }
            return false;
        }
        if !self.supports_annotation() {
            return false;
        }
        match index - own {
            0 => self.name.at = p,
            1 => self.value.at = p,
            _ => return false,
        }
        true
    }

    pub fn control_point(&self, index: usize) -> Option<Point> {
        self.control_points().get(index).copied()
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.shape.translate(dx, dy);
        self.name.at = self.name.at.offset(dx, dy);
        self.value.at = self.value.at.offset(dx, dy);
    }

    pub fn rotate(&mut self, ccw: bool, center: Point) {
        self.shape.rotate(ccw, center);
        self.name.at = self.name.at.rotated(ccw, center);
        self.value.at = self.value.at.rotated(ccw, center);
    }

    pub fn mirror(&mut self, axis_x: i32) {
        self.shape.mirror(axis_x);
        self.name.at = self.name.at.mirrored(axis_x);
        self.value.at = self.value.at.mirrored(axis_x);
    }

    /// Distance in logical units; a hit on a name or value text is 0.
    pub fn distance_to(&self, p: Point) -> i32 {
        if self.name.hit(p) || self.value.hit(p) {
            return 0;
        }
        self.shape.distance_to(p)
    }

    /// Index of the control point whose handle lies under the device
    /// position `(px, py)`.
    pub fn on_handle(&self, map: &MapCoordinates, px: i32, py: i32) -> Option<usize> {
        let reach = i64::from(HANDLE_WIDTH / 2 + HANDLE_INCREASE);
        self.control_points()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| self.is_handle_valid(*i))
            .find(|(_, p)| {
                let sx = map.map_x(p.x, p.y);
                let sy = map.map_y(p.x, p.y);
                (i64::from(px) - i64::from(sx)).abs() <= reach
                    && (i64::from(py) - i64::from(sy)).abs() <= reach
            })
            .map(|(i, _)| i)
    }

    /// Marquee test. Left-to-right needs every valid control point inside
    /// the rectangle; right-to-left accepts any of them.
    pub fn intersects(&self, rect: &Rect, left_to_right: bool) -> bool {
        let points = self.valid_points();
        if left_to_right {
            !points.is_empty() && points.iter().all(|p| rect.contains(*p))
        } else {
            points.iter().any(|p| rect.contains(*p))
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(&self.shape.points())
    }

    /// Layers the primitive draws on.
    pub fn layers(&self) -> BTreeSet<usize> {
        match &self.shape {
            Shape::Macro(m) => m.layers(),
            _ => BTreeSet::from([self.layer]),
        }
    }

    pub fn contains_layer(&self, layer: usize) -> bool {
        match &self.shape {
            Shape::Macro(m) => m.contains_layer(layer),
            _ => self.layer == layer,
        }
    }

    /// Text form, one or more newline-terminated lines.
    pub fn write(&self, extensions: bool, config: &DocumentConfig) -> String {
        let annotated = self.supports_annotation() && self.has_annotation();
        if self.shape.is_degenerate() && !annotated {
            return String::new();
        }
        let mut out = self.shape.base_line(self.layer);
        out.push('\n');
        if !self.supports_annotation() {
            return out;
        }
        match (self.is_macro(), self.shape.style_tokens()) {
            (true, _) => {
                if annotated && extensions {
                    out.push_str("FCJ\n");
                }
            }
            (false, Some(style)) => {
                if annotated || (extensions && self.shape.has_custom_style()) {
                    out.push_str(&format!(
                        "FCJ {} {}\n",
                        style.join(" "),
                        i32::from(annotated)
                    ));
                }
            }
            (false, None) => {
                if annotated {
                    out.push_str("FCJ\n");
                }
            }
        }
        if annotated {
            out.push_str(&self.annotation_line(&self.name, config));
            out.push_str(&self.annotation_line(&self.value, config));
        }
        out
    }

    fn annotation_line(&self, field: &TextField, config: &DocumentConfig) -> String {
        let size = config.text_size;
        format!(
            "TY {} {} {} {} 0 0 {} {} {}\n",
            field.at.x,
            field.at.y,
            size * 4 / 3,
            size,
            self.layer,
            encode_font(&config.text_font),
            field.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdvText, Connection, Line, Rectangle};

    fn line() -> Primitive {
        Primitive::new(
            Shape::Line(Line::new(Point::new(0, 0), Point::new(10, 10))),
            1,
        )
    }

    #[test]
    fn test_plain_line_writes_one_line() {
        let config = DocumentConfig::default();
        assert_eq!(line().write(true, &config), "LI 0 0 10 10 1\n");
    }

    #[test]
    fn test_degenerate_line_writes_nothing() {
        let p = Primitive::new(
            Shape::Line(Line::new(Point::new(3, 3), Point::new(3, 3))),
            0,
        );
        assert_eq!(p.write(true, &DocumentConfig::default()), "");
    }

    #[test]
    fn test_annotated_line_writes_extension_and_texts() {
        let mut p = line();
        p.name.text = "R1".to_string();
        p.value.text = "10k".to_string();
        let text = p.write(false, &DocumentConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "FCJ 0 0 3 1 0 1");
        assert_eq!(lines[2], "TY 5 5 4 3 0 0 1 * R1");
        assert_eq!(lines[3], "TY 5 10 4 3 0 0 1 * 10k");
    }

    #[test]
    fn test_style_extension_only_with_extensions() {
        let mut rect = Rectangle::new(Point::new(0, 0), Point::new(5, 5), false);
        rect.dash = 2;
        let p = Primitive::new(Shape::Rectangle(rect), 0);
        let config = DocumentConfig::default();
        assert_eq!(p.write(false, &config), "RV 0 0 5 5 0\n");
        assert_eq!(p.write(true, &config), "RV 0 0 5 5 0\nFCJ 2 0\n");
    }

    #[test]
    fn test_name_value_handles_need_text() {
        let mut p = Primitive::new(Shape::Connection(Connection::new(Point::new(4, 4))), 0);
        assert_eq!(p.control_point_count(), 3);
        assert!(p.is_handle_valid(0));
        assert!(!p.is_handle_valid(1));
        p.name.text = "n".to_string();
        assert!(p.is_handle_valid(1));
        assert!(!p.is_handle_valid(2));
        assert!(p.set_control_point(2, Point::new(9, 9)));
        assert_eq!(p.value.at, Point::new(9, 9));
        assert!(!p.set_control_point(3, Point::new(0, 0)));
    }

    #[test]
    fn test_text_has_no_annotation_points() {
        let p = Primitive::new(Shape::Text(AdvText::new(Point::new(0, 0), "hi")), 2);
        assert_eq!(p.control_point_count(), 1);
        assert_eq!(
            p.write(true, &DocumentConfig::default()),
            "TY 0 0 4 3 0 0 2 * hi\n"
        );
    }

    #[test]
    fn test_marquee_direction() {
        let p = line();
        let partial = Rect::new(-5, -5, 10, 10);
        assert!(!p.intersects(&partial, true));
        assert!(p.intersects(&partial, false));
        let whole = Rect::new(-5, -5, 20, 20);
        assert!(p.intersects(&whole, true));
    }

    #[test]
    fn test_handle_hit_in_device_space() {
        let p = line();
        let mut map = MapCoordinates::new();
        map.set_magnitudes(2.0, 2.0);
        assert_eq!(p.on_handle(&map, 21, 19), Some(1));
        assert_eq!(p.on_handle(&map, 60, 60), None);
    }
}
