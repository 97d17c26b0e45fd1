//! Token access shared by the primitive parsers.

use schemkit_core::constants::{CONFIG_EPSILON, DEFAULT_TEXT_FONT, MAX_LAYERS};
use schemkit_core::{Point, PrimitiveError};

pub(crate) const FCJ: &str = "FCJ";

/// A command's token list with typed, error-reporting accessors.
pub(crate) struct Tokens<'a> {
    items: &'a [String],
}

impl<'a> Tokens<'a> {
    pub fn new(items: &'a [String]) -> Self {
        Self { items }
    }

    pub fn command(&self) -> &str {
        self.items.first().map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.items.get(index).map(String::as_str)
    }

    /// Fails unless at least `expected` tokens are present.
    pub fn require(&self, expected: usize) -> Result<(), PrimitiveError> {
        if self.items.len() < expected {
            return Err(PrimitiveError::MissingArguments {
                command: self.command().to_string(),
                expected,
                found: self.items.len(),
            });
        }
        Ok(())
    }

    /// Number of tokens before an `FCJ` marker (or all of them).
    pub fn base_len(&self) -> usize {
        self.items
            .iter()
            .position(|t| t == FCJ)
            .unwrap_or(self.items.len())
    }

    /// Index where extension fields start for a kind with `base` fixed tokens.
    pub fn extension_start(&self, base: usize) -> usize {
        if self.get(base) == Some(FCJ) {
            base + 1
        } else {
            base
        }
    }

    pub fn int(&self, index: usize) -> Result<i32, PrimitiveError> {
        let token = self.get(index).unwrap_or("");
        token.parse::<i32>().map_err(|_| self.invalid(token))
    }

    pub fn float(&self, index: usize) -> Result<f64, PrimitiveError> {
        let token = self.get(index).unwrap_or("");
        token.parse::<f64>().map_err(|_| self.invalid(token))
    }

    /// Reads an optional trailing integer.
    pub fn int_or(&self, index: usize, default: i32) -> Result<i32, PrimitiveError> {
        match self.get(index) {
            Some(_) => self.int(index),
            None => Ok(default),
        }
    }

    /// Reads an optional trailing float.
    pub fn float_or(&self, index: usize, default: f64) -> Result<f64, PrimitiveError> {
        match self.get(index) {
            Some(_) => self.float(index),
            None => Ok(default),
        }
    }

    pub fn point(&self, index: usize) -> Result<Point, PrimitiveError> {
        Ok(Point::new(self.int(index)?, self.int(index + 1)?))
    }

    /// Reads a layer index; values outside the layer range map to 0.
    pub fn layer(&self, index: usize) -> Result<usize, PrimitiveError> {
        let raw = self.int(index)?;
        Ok(usize::try_from(raw)
            .ok()
            .filter(|l| *l < MAX_LAYERS)
            .unwrap_or(0))
    }

    /// Joins every token from `index` on with single spaces.
    pub fn rest(&self, index: usize) -> String {
        self.items.get(index..).map(|t| t.join(" ")).unwrap_or_default()
    }

    fn invalid(&self, token: &str) -> PrimitiveError {
        PrimitiveError::InvalidNumber {
            command: self.command().to_string(),
            token: token.to_string(),
        }
    }
}

/// Writes a float as an integer when it is one.
pub(crate) fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < CONFIG_EPSILON {
        format!("{}", value.round() as i64)
    } else {
        format!("{}", value)
    }
}

/// Encodes a font name for a single token.
pub(crate) fn encode_font(font: &str) -> String {
    if font == DEFAULT_TEXT_FONT {
        "*".to_string()
    } else {
        font.replace(' ', "++")
    }
}

pub(crate) fn decode_font(token: &str) -> String {
    if token == "*" {
        DEFAULT_TEXT_FONT.to_string()
    } else {
        token.replace("++", " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        line.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn test_extension_start_skips_marker() {
        let items = toks("LI 0 0 10 10 0 FCJ 1 2 3");
        let t = Tokens::new(&items);
        assert_eq!(t.extension_start(6), 7);
        assert_eq!(t.base_len(), 6);

        let items = toks("LI 0 0 10 10 0 1 2 3");
        let t = Tokens::new(&items);
        assert_eq!(t.extension_start(6), 6);
        assert_eq!(t.base_len(), 9);
    }

    #[test]
    fn test_layer_out_of_range_maps_to_zero() {
        let items = toks("SA 1 2 42");
        assert_eq!(Tokens::new(&items).layer(3), Ok(0));
        let items = toks("SA 1 2 x");
        assert!(Tokens::new(&items).layer(3).is_err());
    }

    #[test]
    fn test_format_number_and_font() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(encode_font("Courier New"), "*");
        assert_eq!(encode_font("Times New Roman"), "Times++New++Roman");
        assert_eq!(decode_font("Times++New++Roman"), "Times New Roman");
    }
}
