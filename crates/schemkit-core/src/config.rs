//! Document-level drawing configuration.
//!
//! These values used to be process-wide defaults; here they travel with each
//! drawing. `FJC` lines override them while parsing and the serializer
//! writes back only the ones that differ from the documented defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_EPSILON, DEFAULT_CONNECTION_DIAMETER, DEFAULT_LINE_WIDTH, DEFAULT_LINE_WIDTH_CIRCLES,
    DEFAULT_TEXT_FONT, DEFAULT_TEXT_SIZE,
};

/// Per-document drawing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Diameter of connection dots (`FJC C`).
    pub connection_diameter: f64,
    /// Stroke width of lines and shapes (`FJC A`).
    pub line_width: f64,
    /// Stroke width of ovals (`FJC B`).
    pub line_width_circles: f64,
    /// Font written with name/value annotations.
    pub text_font: String,
    /// Size written with name/value annotations.
    pub text_size: i32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            connection_diameter: DEFAULT_CONNECTION_DIAMETER,
            line_width: DEFAULT_LINE_WIDTH,
            line_width_circles: DEFAULT_LINE_WIDTH_CIRCLES,
            text_font: DEFAULT_TEXT_FONT.to_string(),
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

impl DocumentConfig {
    /// Returns true when `FJC C` must be written.
    pub fn connection_diameter_modified(&self) -> bool {
        differs(self.connection_diameter, DEFAULT_CONNECTION_DIAMETER)
    }

    /// Returns true when `FJC A` must be written.
    pub fn line_width_modified(&self) -> bool {
        differs(self.line_width, DEFAULT_LINE_WIDTH)
    }

    /// Returns true when `FJC B` must be written.
    pub fn line_width_circles_modified(&self) -> bool {
        differs(self.line_width_circles, DEFAULT_LINE_WIDTH_CIRCLES)
    }

    /// Sets the connection diameter; non-positive values are ignored.
    pub fn set_connection_diameter(&mut self, value: f64) -> bool {
        set_positive(&mut self.connection_diameter, value)
    }

    /// Sets the line width; non-positive values are ignored.
    pub fn set_line_width(&mut self, value: f64) -> bool {
        set_positive(&mut self.line_width, value)
    }

    /// Sets the oval line width; non-positive values are ignored.
    pub fn set_line_width_circles(&mut self, value: f64) -> bool {
        set_positive(&mut self.line_width_circles, value)
    }
}

fn differs(value: f64, default: f64) -> bool {
    (value - default).abs() > CONFIG_EPSILON
}

fn set_positive(slot: &mut f64, value: f64) -> bool {
    if value > 0.0 {
        *slot = value;
        true
    } else {
        false
    }
}
