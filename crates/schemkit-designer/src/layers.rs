//! Layer descriptors.
//!
//! A drawing has [`MAX_LAYERS`] layers created from a fixed template. `FJC L`
//! and `FJC N` lines change a layer's colour, alpha or name and mark it as
//! modified, which is what decides whether it is written back.

use schemkit_core::constants::MAX_LAYERS;
use serde::{Deserialize, Serialize};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LayerColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Reads a packed ARGB integer; the alpha byte is ignored.
    pub fn from_argb(argb: i32) -> Self {
        let v = argb as u32;
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Packs the colour as a signed ARGB integer with full alpha.
    pub fn to_argb(&self) -> i32 {
        (0xFF00_0000u32 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32) as i32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub color: LayerColor,
    pub alpha: f32,
    pub visible: bool,
    pub description: String,
    pub modified: bool,
}

const STANDARD: [(&str, LayerColor); MAX_LAYERS] = [
    ("Circuit", LayerColor::new(0, 0, 0)),
    ("Bottom copper", LayerColor::new(0, 0, 128)),
    ("Top copper", LayerColor::new(255, 0, 0)),
    ("Silkscreen", LayerColor::new(0, 128, 128)),
    ("Other 1", LayerColor::new(255, 200, 0)),
    ("Other 2", LayerColor::new(127, 255, 0)),
    ("Other 3", LayerColor::new(0, 255, 255)),
    ("Other 4", LayerColor::new(0, 128, 0)),
    ("Other 5", LayerColor::new(154, 205, 50)),
    ("Other 6", LayerColor::new(255, 20, 147)),
    ("Other 7", LayerColor::new(181, 155, 12)),
    ("Other 8", LayerColor::new(1, 128, 255)),
    ("Other 9", LayerColor::new(225, 225, 225)),
    ("Other 10", LayerColor::new(162, 162, 162)),
    ("Other 11", LayerColor::new(95, 95, 95)),
    ("Other 12", LayerColor::new(0, 0, 0)),
];

/// Name of a layer in the standard template.
pub fn standard_layer_name(index: usize) -> Option<&'static str> {
    STANDARD.get(index).map(|(name, _)| *name)
}

/// The standard layer template.
pub fn standard_layers() -> Vec<LayerDescriptor> {
    STANDARD
        .iter()
        .map(|(name, color)| LayerDescriptor {
            color: *color,
            alpha: 1.0,
            visible: true,
            description: name.to_string(),
            modified: false,
        })
        .collect()
}
