//! Primitive catalog.
//!
//! Every drawable kind is a variant of the closed [`Shape`] enum. Each kind
//! lives in its own module and knows how to read itself from a token list,
//! write its primary text line, report its distance to a point and apply the
//! quarter-turn transforms. [`Primitive`] wraps a shape with the data common
//! to all kinds: layer, selection flag and the optional name/value texts.

use schemkit_core::{Point, PrimitiveError};
use serde::{Deserialize, Serialize};

mod bezier;
mod complex_curve;
mod connection;
mod line;
mod macro_instance;
mod oval;
mod pcb;
mod polygon;
mod primitive;
mod rectangle;
pub(crate) mod style;
mod text;
pub(crate) mod tokens;

pub use bezier::Bezier;
pub use complex_curve::ComplexCurve;
pub use connection::Connection;
pub use line::Line;
pub use macro_instance::MacroInstance;
pub use oval::Oval;
pub use pcb::{PcbLine, PcbPad};
pub use polygon::Polygon;
pub use primitive::{Primitive, TextField};
pub use rectangle::Rectangle;
pub use style::Arrows;
pub use text::AdvText;

pub(crate) use primitive::BuildContext;

/// Capabilities shared by every primitive kind.
pub trait PrimitiveShape {
    /// Geometric control points, in file order.
    fn points(&self) -> Vec<Point>;
    fn points_mut(&mut self) -> Vec<&mut Point>;

    /// Approximate distance from `p`, in logical units.
    fn distance_to(&self, p: Point) -> i32;

    /// The primary text line, without a trailing newline.
    fn base_line(&self, layer: usize) -> String;

    /// Style fields written after `FCJ`; `None` for kinds whose extension
    /// line is a bare marker.
    fn style_tokens(&self) -> Option<Vec<String>> {
        None
    }

    fn has_custom_style(&self) -> bool {
        false
    }

    /// True when the primitive has nothing worth writing.
    fn is_degenerate(&self) -> bool {
        false
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        for p in self.points_mut() {
            *p = p.offset(dx, dy);
        }
    }

    fn rotate(&mut self, ccw: bool, center: Point) {
        for p in self.points_mut() {
            *p = p.rotated(ccw, center);
        }
    }

    fn mirror(&mut self, axis_x: i32) {
        for p in self.points_mut() {
            *p = p.mirrored(axis_x);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Line,
    Bezier,
    Rectangle,
    Oval,
    Polygon,
    ComplexCurve,
    AdvancedText,
    PcbLine,
    PcbPad,
    Connection,
    Macro,
}

impl PrimitiveKind {
    /// Maps a command token to the kind it creates.
    pub fn from_command(command: &str) -> Option<Self> {
        Some(match command {
            "LI" => PrimitiveKind::Line,
            "BE" => PrimitiveKind::Bezier,
            "RV" | "RP" => PrimitiveKind::Rectangle,
            "EV" | "EP" => PrimitiveKind::Oval,
            "PV" | "PP" => PrimitiveKind::Polygon,
            "CV" | "CP" => PrimitiveKind::ComplexCurve,
            "TY" | "TE" => PrimitiveKind::AdvancedText,
            "PL" => PrimitiveKind::PcbLine,
            "PA" => PrimitiveKind::PcbPad,
            "SA" => PrimitiveKind::Connection,
            "MC" => PrimitiveKind::Macro,
            _ => return None,
        })
    }

    /// Kinds whose `FCJ` line carries style fields that are merged into the
    /// primitive's own token list.
    pub fn has_style_extension(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Line
                | PrimitiveKind::Bezier
                | PrimitiveKind::Rectangle
                | PrimitiveKind::Oval
                | PrimitiveKind::Polygon
                | PrimitiveKind::ComplexCurve
        )
    }

    /// Kinds that may be followed by an `FCJ` line at all.
    pub fn accepts_extension(&self) -> bool {
        !matches!(self, PrimitiveKind::AdvancedText)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Bezier(Bezier),
    Rectangle(Rectangle),
    Oval(Oval),
    Polygon(Polygon),
    ComplexCurve(ComplexCurve),
    Text(AdvText),
    PcbLine(PcbLine),
    PcbPad(PcbPad),
    Connection(Connection),
    Macro(MacroInstance),
}

impl Shape {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Shape::Line(_) => PrimitiveKind::Line,
            Shape::Bezier(_) => PrimitiveKind::Bezier,
            Shape::Rectangle(_) => PrimitiveKind::Rectangle,
            Shape::Oval(_) => PrimitiveKind::Oval,
            Shape::Polygon(_) => PrimitiveKind::Polygon,
            Shape::ComplexCurve(_) => PrimitiveKind::ComplexCurve,
            Shape::Text(_) => PrimitiveKind::AdvancedText,
            Shape::PcbLine(_) => PrimitiveKind::PcbLine,
            Shape::PcbPad(_) => PrimitiveKind::PcbPad,
            Shape::Connection(_) => PrimitiveKind::Connection,
            Shape::Macro(_) => PrimitiveKind::Macro,
        }
    }

    fn as_dyn(&self) -> &dyn PrimitiveShape {
        match self {
            Shape::Line(s) => s,
            Shape::Bezier(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Oval(s) => s,
            Shape::Polygon(s) => s,
            Shape::ComplexCurve(s) => s,
            Shape::Text(s) => s,
            Shape::PcbLine(s) => s,
            Shape::PcbPad(s) => s,
            Shape::Connection(s) => s,
            Shape::Macro(s) => s,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn PrimitiveShape {
        match self {
            Shape::Line(s) => s,
            Shape::Bezier(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Oval(s) => s,
            Shape::Polygon(s) => s,
            Shape::ComplexCurve(s) => s,
            Shape::Text(s) => s,
            Shape::PcbLine(s) => s,
            Shape::PcbPad(s) => s,
            Shape::Connection(s) => s,
            Shape::Macro(s) => s,
        }
    }
}

impl PrimitiveShape for Shape {
    fn points(&self) -> Vec<Point> {
        self.as_dyn().points()
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        self.as_dyn_mut().points_mut()
    }

    fn distance_to(&self, p: Point) -> i32 {
        self.as_dyn().distance_to(p)
    }

    fn base_line(&self, layer: usize) -> String {
        self.as_dyn().base_line(layer)
    }

    fn style_tokens(&self) -> Option<Vec<String>> {
        self.as_dyn().style_tokens()
    }

    fn has_custom_style(&self) -> bool {
        self.as_dyn().has_custom_style()
    }

    fn is_degenerate(&self) -> bool {
        self.as_dyn().is_degenerate()
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.as_dyn_mut().translate(dx, dy)
    }

    fn rotate(&mut self, ccw: bool, center: Point) {
        self.as_dyn_mut().rotate(ccw, center)
    }

    fn mirror(&mut self, axis_x: i32) {
        self.as_dyn_mut().mirror(axis_x)
    }
}

/// A freshly parsed shape together with its layer and whether name/value
/// text lines are announced to follow.
pub(crate) struct Parsed<S> {
    pub shape: S,
    pub layer: usize,
    pub annotated: bool,
}

impl<S> Parsed<S> {
    fn map(self, f: impl FnOnce(S) -> Shape) -> Parsed<Shape> {
        Parsed {
            shape: f(self.shape),
            layer: self.layer,
            annotated: self.annotated,
        }
    }
}

/// Builds a shape from a complete (possibly merged) token list.
pub(crate) fn parse_shape(
    items: &[String],
    ctx: &BuildContext,
) -> Result<Parsed<Shape>, PrimitiveError> {
    let t = tokens::Tokens::new(items);
    let command = t.command().to_string();
    let kind = PrimitiveKind::from_command(&command)
        .ok_or_else(|| PrimitiveError::Unsupported {
            command: command.clone(),
        })?;
    let filled = matches!(command.as_str(), "RP" | "EP" | "PP" | "CP");
    Ok(match kind {
        PrimitiveKind::Line => Line::parse(&t)?.map(Shape::Line),
        PrimitiveKind::Bezier => Bezier::parse(&t)?.map(Shape::Bezier),
        PrimitiveKind::Rectangle => Rectangle::parse(&t, filled)?.map(Shape::Rectangle),
        PrimitiveKind::Oval => Oval::parse(&t, filled)?.map(Shape::Oval),
        PrimitiveKind::Polygon => Polygon::parse(&t, filled)?.map(Shape::Polygon),
        PrimitiveKind::ComplexCurve => ComplexCurve::parse(&t, filled)?.map(Shape::ComplexCurve),
        PrimitiveKind::AdvancedText => AdvText::parse(&t)?.map(Shape::Text),
        PrimitiveKind::PcbLine => PcbLine::parse(&t)?.map(Shape::PcbLine),
        PrimitiveKind::PcbPad => PcbPad::parse(&t)?.map(Shape::PcbPad),
        PrimitiveKind::Connection => Connection::parse(&t)?.map(Shape::Connection),
        PrimitiveKind::Macro => MacroInstance::parse(&t, ctx)?.map(Shape::Macro),
    })
}
