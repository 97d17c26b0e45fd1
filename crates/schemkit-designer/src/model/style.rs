//! Optional style fields carried by `FCJ` extension lines.

use schemkit_core::constants::{DASH_STYLES, DEFAULT_ARROW_HALF_WIDTH, DEFAULT_ARROW_LENGTH};
use schemkit_core::PrimitiveError;
use serde::{Deserialize, Serialize};

use super::tokens::{format_number, Tokens};

/// Arrow heads drawn at the ends of a line or open curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrows {
    pub at_start: bool,
    pub at_end: bool,
    pub style: i32,
    pub length: f64,
    pub half_width: f64,
}

impl Default for Arrows {
    fn default() -> Self {
        Self {
            at_start: false,
            at_end: false,
            style: 0,
            length: DEFAULT_ARROW_LENGTH,
            half_width: DEFAULT_ARROW_HALF_WIDTH,
        }
    }
}

impl Arrows {
    pub fn any(&self) -> bool {
        self.at_start || self.at_end
    }

    /// Bit set written to the file: 1 for the start, 2 for the end.
    pub fn flags(&self) -> i32 {
        i32::from(self.at_start) | (i32::from(self.at_end) << 1)
    }

    pub fn swap_ends(&mut self) {
        std::mem::swap(&mut self.at_start, &mut self.at_end);
    }
}

/// Decoded extension fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Extension {
    pub arrows: Arrows,
    pub dash: i32,
    pub annotated: bool,
}

pub(crate) fn clamp_dash(dash: i32) -> i32 {
    dash.clamp(0, DASH_STYLES - 1)
}

/// Reads `arrows style length halfwidth dash text`, each optional from the right.
pub(crate) fn read_arrowed(t: &Tokens, start: usize) -> Result<Extension, PrimitiveError> {
    let flags = t.int_or(start, 0)?;
    let arrows = Arrows {
        at_start: flags & 1 != 0,
        at_end: flags & 2 != 0,
        style: t.int_or(start + 1, 0)?,
        length: t.float_or(start + 2, DEFAULT_ARROW_LENGTH)?,
        half_width: t.float_or(start + 3, DEFAULT_ARROW_HALF_WIDTH)?,
    };
    Ok(Extension {
        arrows,
        dash: clamp_dash(t.int_or(start + 4, 0)?),
        annotated: t.get(start + 5) == Some("1"),
    })
}

/// Reads `dash text`, each optional from the right.
pub(crate) fn read_dashed(t: &Tokens, start: usize) -> Result<Extension, PrimitiveError> {
    Ok(Extension {
        arrows: Arrows::default(),
        dash: clamp_dash(t.int_or(start, 0)?),
        annotated: t.get(start + 1) == Some("1"),
    })
}

pub(crate) fn arrowed_tokens(arrows: &Arrows, dash: i32) -> Vec<String> {
    vec![
        arrows.flags().to_string(),
        arrows.style.to_string(),
        format_number(arrows.length),
        format_number(arrows.half_width),
        dash.to_string(),
    ]
}

pub(crate) fn arrowed_is_default(arrows: &Arrows, dash: i32) -> bool {
    !arrows.any() && dash == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        line.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn test_partial_arrowed_extension_keeps_defaults() {
        let items = toks("LI 0 0 10 10 0 FCJ 1 2 3");
        let ext = read_arrowed(&Tokens::new(&items), 7).unwrap();
        assert!(ext.arrows.at_start);
        assert!(!ext.arrows.at_end);
        assert_eq!(ext.arrows.style, 2);
        assert_eq!(ext.arrows.length, 3.0);
        assert_eq!(ext.arrows.half_width, DEFAULT_ARROW_HALF_WIDTH);
        assert_eq!(ext.dash, 0);
        assert!(!ext.annotated);
    }

    #[test]
    fn test_dash_is_clamped() {
        let items = toks("RV 0 0 1 1 0 FCJ 9 1");
        let ext = read_dashed(&Tokens::new(&items), 7).unwrap();
        assert_eq!(ext.dash, DASH_STYLES - 1);
        assert!(ext.annotated);
    }

    #[test]
    fn test_flags() {
        let arrows = Arrows {
            at_start: true,
            at_end: true,
            ..Arrows::default()
        };
        assert_eq!(arrows.flags(), 3);
        assert_eq!(
            arrowed_tokens(&arrows, 2),
            vec!["3", "0", "3", "1", "2"]
        );
    }
}
