//! One-line lookahead: `FCJ` extension lines and name/value `TY` binding.

use schemkit_core::ParseError;
use schemkit_designer::{Drawing, PrimitiveKind, Shape};

fn parse(text: &str) -> Drawing {
    let mut drawing = Drawing::new();
    drawing.parse(text);
    drawing
}

#[test]
fn test_fcj_merges_into_previous_line() {
    let extended = parse("LI 0 0 10 10 0\nFCJ 1 2 3\n");
    let merged = parse("LI 0 0 10 10 0 1 2 3\n");
    assert_eq!(extended.len(), 1);
    assert_eq!(extended.primitives(), merged.primitives());

    let Shape::Line(line) = &extended.primitives()[0].shape else {
        panic!("expected a line");
    };
    assert!(line.arrows.at_start);
    assert!(!line.arrows.at_end);
    assert_eq!(line.arrows.style, 2);
    assert_eq!(line.arrows.length, 3.0);
}

#[test]
fn test_lines_without_fcj_stay_independent() {
    let drawing = parse("LI 0 0 10 10 0\nLI 1 1 5 5 0\n");
    assert_eq!(drawing.len(), 2);
}

#[test]
fn test_macro_binds_name_and_value() {
    let drawing = parse("MC 10 10 0 0 key\nTY 1 2 0 0 0 0 Name\nTY 1 2 0 0 0 0 Val\n");
    assert_eq!(drawing.len(), 1);
    let prim = &drawing.primitives()[0];
    assert_eq!(prim.kind(), PrimitiveKind::Macro);
    assert_eq!(prim.name.text, "Name");
    assert_eq!(prim.value.text, "Val");
}

#[test]
fn test_third_ty_is_standalone() {
    let drawing = parse(
        "MC 10 10 0 0 key\nTY 1 2 0 0 0 0 Name\nTY 1 2 0 0 0 0 Val\nTY 5 5 4 3 0 0 Free\n",
    );
    assert_eq!(drawing.len(), 2);
    assert_eq!(drawing.primitives()[1].kind(), PrimitiveKind::AdvancedText);
}

#[test]
fn test_macro_with_name_only() {
    let drawing = parse("MC 10 10 0 0 key\nTY 1 2 0 0 0 0 R1\nSA 0 0 0\n");
    assert_eq!(drawing.len(), 2);
    let prim = &drawing.primitives()[0];
    assert_eq!(prim.name.text, "R1");
    assert!(prim.value.is_empty());
}

#[test]
fn test_text_flag_on_styled_line() {
    let drawing = parse(
        "LI 0 0 10 0 0\nFCJ 0 0 3 1 0 1\nTY 0 5 4 3 0 0 0 * D1\nTY 0 10 4 3 0 0 0 * 1N4148\n",
    );
    assert_eq!(drawing.len(), 1);
    let prim = &drawing.primitives()[0];
    assert_eq!(prim.name.text, "D1");
    assert_eq!(prim.value.text, "1N4148");
}

#[test]
fn test_plain_fcj_flag_leaves_ty_standalone() {
    let drawing = parse("LI 0 0 10 0 0\nFCJ 0 0 3 1 2 0\nTY 0 5 4 3 0 0 0 * note\n");
    assert_eq!(drawing.len(), 2);
    let Shape::Line(line) = &drawing.primitives()[0].shape else {
        panic!("expected a line");
    };
    assert_eq!(line.dash, 2);
}

#[test]
fn test_bare_fcj_on_pcb_kinds() {
    let drawing = parse(
        "PL 0 0 10 0 2 1\nFCJ\nTY 0 5 4 3 0 0 1 * NET1\nTY 0 10 4 3 0 0 1 * 5V\nSA 5 5 0\nFCJ\nTY 5 10 4 3 0 0 0 * P1\n",
    );
    assert_eq!(drawing.len(), 2);
    // the connection is on layer 0, so it sorts first
    assert_eq!(drawing.primitives()[0].name.text, "P1");
    assert_eq!(drawing.primitives()[1].name.text, "NET1");
    assert_eq!(drawing.primitives()[1].value.text, "5V");
}

#[test]
fn test_fcj_after_text_is_ignored() {
    let mut drawing = Drawing::new();
    let report = drawing.parse("TY 0 0 4 3 0 0 0 * hi\nFCJ 1 0 3 1 0 0\nLI 0 0 5 5 0\n");
    assert!(report.is_clean());
    assert_eq!(drawing.len(), 2);
}

#[test]
fn test_bad_extension_reports_the_primitive_line() {
    let mut drawing = Drawing::new();
    let report = drawing.parse("SA 0 0 0\nLI 0 0 10 10 0\nFCJ x\nSA 1 1 0\n");
    assert_eq!(drawing.len(), 2);
    assert!(matches!(
        report.diagnostics.as_slice(),
        [ParseError::InvalidNumber { line_number: 2, .. }]
    ));
}
