//! Drawing text parser.
//!
//! Reads the line-oriented drawing format into a [`Drawing`]. Parsing is
//! fail-soft: a bad line becomes a [`ParseError`] in the returned
//! [`ParseReport`] and the next line is read as usual.
//!
//! Two pieces of state make the format context dependent:
//!
//! ```text
//! LI 0 0 10 10 0      <- buffered, not built yet
//! FCJ 1 2 3 1 0 1     <- merged into the LI tokens, announces name/value
//! TY 5 5 4 3 0 0 0 * R1      <- name of the line
//! TY 5 10 4 3 0 0 0 * 10k    <- value of the line, commits it
//! ```
//!
//! Every primitive that may carry an `FCJ` line is held as
//! [`LookaheadState::Pending`] until the next line shows whether the
//! extension follows. A primitive announced to have a name and value waits
//! in `awaiting` for its two `TY` lines.

use std::sync::Arc;

use schemkit_core::constants::MAX_TOKENS;
use schemkit_core::{ParseError, PrimitiveError};
use tracing::{debug, warn};

use crate::drawing::Drawing;
use crate::layers::LayerColor;
use crate::library::MacroLibrary;
use crate::model::tokens::{Tokens, FCJ};
use crate::model::{parse_shape, BuildContext, Primitive, PrimitiveKind};

const DOCUMENT_MARKER: &str = "[FIDOCAD]";
const CONFIG_COMMAND: &str = "FJC";

/// Outcome of one parse run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Recoverable per-line failures, in line order.
    pub diagnostics: Vec<ParseError>,
    /// Number of primitives added to the drawing.
    pub added: usize,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Lookahead register: the raw tokens of a primitive whose line may still
/// be extended by a following `FCJ` line.
#[derive(Debug, Default)]
enum LookaheadState {
    #[default]
    Idle,
    Pending {
        kind: PrimitiveKind,
        tokens: Vec<String>,
        line: usize,
    },
}

/// Which `TY` line the awaiting primitive expects next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum TextExpect {
    #[default]
    None,
    Name,
    Value,
}

/// Streaming parser feeding one drawing.
pub struct DocumentParser<'a> {
    drawing: &'a mut Drawing,
    library: Arc<MacroLibrary>,
    depth: usize,
    select_new: bool,
    state: LookaheadState,
    text_expect: TextExpect,
    awaiting: Option<Primitive>,
    report: ParseReport,
}

impl<'a> DocumentParser<'a> {
    pub fn new(drawing: &'a mut Drawing) -> Self {
        let library = drawing.library().clone();
        Self {
            drawing,
            library,
            depth: 0,
            select_new: false,
            state: LookaheadState::Idle,
            text_expect: TextExpect::None,
            awaiting: None,
            report: ParseReport::default(),
        }
    }

    /// Marks every primitive added by this run as selected.
    pub fn select_new(mut self, select: bool) -> Self {
        self.select_new = select;
        self
    }

    pub(crate) fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Parses `text`, appends its primitives and sorts the drawing once.
    pub fn run(mut self, text: &str) -> ParseReport {
        for (index, line) in split_lines(text).enumerate() {
            let line_number = index + 1;
            let mut words = line.split_whitespace();
            let tokens: Vec<String> = words.by_ref().take(MAX_TOKENS).map(String::from).collect();
            if tokens.is_empty() {
                continue;
            }
            if words.next().is_some() {
                self.diagnose(ParseError::TooManyTokens {
                    line_number,
                    limit: MAX_TOKENS,
                });
            }
            self.feed(tokens, line_number);
        }
        self.discharge();
        self.drawing.sort_by_layer();
        debug!(
            "Parsed {} primitives with {} diagnostics",
            self.report.added,
            self.report.diagnostics.len()
        );
        self.report
    }

    fn feed(&mut self, tokens: Vec<String>, line_number: usize) {
        let command = tokens[0].clone();
        if command == FCJ {
            self.on_extension(tokens, line_number);
            return;
        }

        self.resolve_pending();

        if command == "TY" && self.text_expect != TextExpect::None {
            self.on_annotation(&tokens, line_number);
            return;
        }
        self.commit_awaiting();

        match command.as_str() {
            DOCUMENT_MARKER => {}
            CONFIG_COMMAND => {
                if let Err(e) = self.apply_config(&tokens) {
                    self.diagnose(ParseError::from_primitive(line_number, e));
                }
            }
            _ => match PrimitiveKind::from_command(&command) {
                Some(kind) if kind.accepts_extension() => {
                    self.state = LookaheadState::Pending {
                        kind,
                        tokens,
                        line: line_number,
                    };
                }
                Some(_) => {
                    if let Some((primitive, _)) = self.build(&tokens, line_number) {
                        self.commit(primitive);
                    }
                }
                None => self.diagnose(ParseError::UnknownCommand {
                    line_number,
                    command,
                }),
            },
        }
    }

    fn on_extension(&mut self, extension: Vec<String>, line_number: usize) {
        let LookaheadState::Pending { kind, mut tokens, line } =
            std::mem::take(&mut self.state)
        else {
            debug!("Ignoring FCJ at line {} with nothing to extend", line_number);
            return;
        };

        if kind.has_style_extension() {
            tokens.extend(extension);
            match self.build(&tokens, line) {
                Some((primitive, true)) => self.await_texts(primitive),
                Some((primitive, false)) => self.commit(primitive),
                None => {}
            }
        } else if let Some((primitive, _)) = self.build(&tokens, line) {
            self.await_texts(primitive);
        }
    }

    fn on_annotation(&mut self, tokens: &[String], line_number: usize) {
        let Some(mut primitive) = self.awaiting.take() else {
            self.text_expect = TextExpect::None;
            return;
        };
        let is_value = self.text_expect == TextExpect::Value;
        if let Err(e) = primitive.apply_annotation(tokens, is_value) {
            self.diagnose(ParseError::from_primitive(line_number, e));
            self.text_expect = TextExpect::None;
            self.commit(primitive);
            return;
        }
        if is_value {
            self.text_expect = TextExpect::None;
            self.commit(primitive);
        } else {
            self.text_expect = TextExpect::Value;
            self.awaiting = Some(primitive);
        }
    }

    /// Builds the buffered primitive, if any. A macro built here still
    /// binds the `TY` lines that may follow it.
    fn resolve_pending(&mut self) {
        let LookaheadState::Pending { kind, tokens, line } = std::mem::take(&mut self.state)
        else {
            return;
        };
        if let Some((primitive, _)) = self.build(&tokens, line) {
            if kind == PrimitiveKind::Macro {
                self.await_texts(primitive);
            } else {
                self.commit(primitive);
            }
        }
    }

    fn discharge(&mut self) {
        self.resolve_pending();
        self.commit_awaiting();
    }

    fn await_texts(&mut self, primitive: Primitive) {
        self.commit_awaiting();
        self.awaiting = Some(primitive);
        self.text_expect = TextExpect::Name;
    }

    fn commit_awaiting(&mut self) {
        self.text_expect = TextExpect::None;
        if let Some(primitive) = self.awaiting.take() {
            self.commit(primitive);
        }
    }

    fn commit(&mut self, mut primitive: Primitive) {
        primitive.selected = self.select_new;
        self.drawing.insert(primitive);
        self.report.added += 1;
    }

    /// Returns the primitive and whether it announced name/value lines.
    fn build(&mut self, tokens: &[String], line_number: usize) -> Option<(Primitive, bool)> {
        let ctx = BuildContext {
            library: &self.library,
            depth: self.depth,
        };
        match parse_shape(tokens, &ctx) {
            Ok(parsed) => Some((Primitive::new(parsed.shape, parsed.layer), parsed.annotated)),
            Err(e) => {
                self.diagnose(ParseError::from_primitive(line_number, e));
                None
            }
        }
    }

    fn apply_config(&mut self, items: &[String]) -> Result<(), PrimitiveError> {
        let t = Tokens::new(items);
        t.require(3)?;
        let config = self.drawing.config_mut();
        match t.get(1).unwrap_or("") {
            "C" => {
                config.set_connection_diameter(t.float(2)?);
            }
            "A" => {
                config.set_line_width(t.float(2)?);
            }
            "B" => {
                config.set_line_width_circles(t.float(2)?);
            }
            "L" => {
                t.require(5)?;
                let index = t.int(2)?;
                let argb = t.int(3)?;
                let alpha = t.float(4)? as f32;
                if let Some(layer) = usize::try_from(index)
                    .ok()
                    .and_then(|i| self.drawing.layer_mut(i))
                {
                    layer.color = LayerColor::from_argb(argb);
                    layer.alpha = alpha;
                    layer.modified = true;
                }
            }
            "N" => {
                t.require(4)?;
                let index = t.int(2)?;
                let name = t.rest(3);
                if let Some(layer) = usize::try_from(index)
                    .ok()
                    .and_then(|i| self.drawing.layer_mut(i))
                {
                    layer.description = name;
                    layer.modified = true;
                }
            }
            other => {
                return Err(PrimitiveError::Unsupported {
                    command: format!("{} {}", CONFIG_COMMAND, other),
                })
            }
        }
        Ok(())
    }

    fn diagnose(&mut self, error: ParseError) {
        warn!("{}", error);
        self.report.diagnostics.push(error);
    }
}

/// Splits on `\n`, `\r\n` or a lone `\r`.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    })
}

impl Drawing {
    /// Replaces the whole drawing with the content of `text`.
    pub fn parse(&mut self, text: &str) -> ParseReport {
        self.reset();
        DocumentParser::new(self).run(text)
    }

    /// Appends the content of `text` to the drawing.
    pub fn add_text(&mut self, text: &str, select_new: bool) -> ParseReport {
        DocumentParser::new(self).select_new(select_new).run(text)
    }

    pub(crate) fn parse_nested(&mut self, text: &str, depth: usize) -> ParseReport {
        DocumentParser::new(self).with_depth(depth).run(text)
    }

    /// Builds a new drawing from `text` using `library` for macros.
    pub fn from_text(text: &str, library: Arc<MacroLibrary>) -> (Self, ParseReport) {
        let mut drawing = Drawing::with_library(library);
        let report = drawing.add_text(text, false);
        (drawing, report)
    }
}
