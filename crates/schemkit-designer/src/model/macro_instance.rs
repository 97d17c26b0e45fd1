use std::collections::BTreeSet;

use schemkit_core::constants::{MACRO_ORIGIN, MAX_MACRO_DEPTH};
use schemkit_core::geometry::{clamp_coord, point_to_point};
use schemkit_core::{Point, PrimitiveError};
use tracing::{debug, warn};

use super::tokens::Tokens;
use super::{BuildContext, Parsed, PrimitiveShape};
use crate::drawing::Drawing;

/// A placed library symbol.
///
/// The expansion is a private nested drawing built from the library body.
/// A key missing from the library keeps the instance (so it is written back
/// unchanged) with no expansion.
#[derive(Debug, Clone)]
pub struct MacroInstance {
    pub at: Point,
    /// Quarter turns, 0..=3.
    pub orientation: i32,
    pub mirror: bool,
    pub key: String,
    expansion: Option<Box<Drawing>>,
    draw_only_layer: Option<usize>,
}

impl PartialEq for MacroInstance {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
            && self.orientation == other.orientation
            && self.mirror == other.mirror
            && self.key == other.key
    }
}

impl MacroInstance {
    pub fn new(at: Point, key: impl Into<String>) -> Self {
        Self {
            at,
            orientation: 0,
            mirror: false,
            key: key.into().to_lowercase(),
            expansion: None,
            draw_only_layer: None,
        }
    }

    // MC x y orientation mirror key...
    pub(crate) fn parse(t: &Tokens, ctx: &BuildContext) -> Result<Parsed<Self>, PrimitiveError> {
        t.require(6)?;
        let mut instance = Self::new(t.point(1)?, t.rest(5));
        instance.orientation = t.int(3)?.rem_euclid(4);
        instance.mirror = t.int(4)? == 1;
        instance.expand(ctx);
        Ok(Parsed {
            shape: instance,
            layer: 0,
            annotated: false,
        })
    }

    fn expand(&mut self, ctx: &BuildContext) {
        let Some(descriptor) = ctx.library.get(&self.key) else {
            warn!("{}", PrimitiveError::UnknownMacro { key: self.key.clone() });
            return;
        };
        if ctx.depth >= MAX_MACRO_DEPTH {
            warn!("Macro '{}' nested too deeply, not expanded", self.key);
            return;
        }
        let mut nested = Drawing::with_library(ctx.library.clone());
        let report = nested.parse_nested(&descriptor.body, ctx.depth + 1);
        if !report.is_clean() {
            debug!(
                "Macro '{}' expansion has {} diagnostics",
                self.key,
                report.diagnostics.len()
            );
        }
        self.expansion = Some(Box::new(nested));
    }

    pub fn expansion(&self) -> Option<&Drawing> {
        self.expansion.as_deref()
    }

    pub fn is_expanded(&self) -> bool {
        self.expansion.is_some()
    }

    /// Layer the renderer is restricted to, if any.
    pub fn draw_only_layer(&self) -> Option<usize> {
        self.draw_only_layer
    }

    pub fn set_draw_only_layer(&mut self, layer: Option<usize>) {
        self.draw_only_layer = layer;
    }

    /// Layers used by the expansion. An unexpanded macro counts as layer 0.
    pub fn layers(&self) -> BTreeSet<usize> {
        match &self.expansion {
            Some(nested) => nested.layers_in_use(),
            None => BTreeSet::from([0]),
        }
    }

    pub fn contains_layer(&self, layer: usize) -> bool {
        match &self.expansion {
            Some(nested) => nested.is_layer_in_use(layer),
            None => layer == 0,
        }
    }

    /// Maps a drawing point into the macro's own coordinate system.
    pub fn to_macro_space(&self, p: Point) -> Point {
        let dx = i64::from(p.x) - i64::from(self.at.x);
        let dy = i64::from(p.y) - i64::from(self.at.y);
        let (x, y) = match (self.mirror, self.orientation) {
            (false, 0) => (dx, dy),
            (false, 1) => (dy, -dx),
            (false, 2) => (-dx, -dy),
            (false, _) => (-dy, dx),
            (true, 0) => (-dx, dy),
            (true, 1) => (dy, dx),
            (true, 2) => (dx, -dy),
            (true, _) => (-dy, -dx),
        };
        let origin = i64::from(MACRO_ORIGIN);
        Point::new(clamp_coord(x + origin), clamp_coord(y + origin))
    }
}

impl PrimitiveShape for MacroInstance {
    fn points(&self) -> Vec<Point> {
        vec![self.at]
    }

    fn points_mut(&mut self) -> Vec<&mut Point> {
        vec![&mut self.at]
    }

    fn distance_to(&self, p: Point) -> i32 {
        let Some(nested) = &self.expansion else {
            return point_to_point(self.at, p);
        };
        let local = self.to_macro_space(p);
        nested
            .primitives()
            .iter()
            .map(|prim| prim.distance_to(local))
            .min()
            .unwrap_or(i32::MAX)
    }

    fn base_line(&self, _layer: usize) -> String {
        format!(
            "MC {} {} {} {} {}",
            self.at.x,
            self.at.y,
            self.orientation,
            i32::from(self.mirror),
            self.key
        )
    }

    fn rotate(&mut self, ccw: bool, center: Point) {
        self.at = self.at.rotated(ccw, center);
        self.orientation = (self.orientation + if ccw { 3 } else { 1 }) % 4;
    }

    fn mirror(&mut self, axis_x: i32) {
        self.at = self.at.mirrored(axis_x);
        self.mirror = !self.mirror;
    }
}
