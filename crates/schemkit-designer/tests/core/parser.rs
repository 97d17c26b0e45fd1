use std::sync::Arc;

use schemkit_core::{ParseError, Point};
use schemkit_designer::library::MacroDescriptor;
use schemkit_designer::{Drawing, MacroLibrary, PrimitiveKind, Shape};

fn parse(text: &str) -> (Drawing, schemkit_designer::ParseReport) {
    let mut drawing = Drawing::new();
    let report = drawing.parse(text);
    (drawing, report)
}

#[test]
fn test_every_command_creates_its_kind() {
    let text = "LI 0 0 10 10 0\n\
                BE 0 0 5 5 10 5 15 0 0\n\
                RV 0 0 10 10 0\n\
                EP 0 0 10 10 0\n\
                PV 0 0 10 0 10 10 0\n\
                CP 1 0 0 10 0 10 10 0\n\
                TY 0 0 4 3 0 0 0 * hello\n\
                TE 5 5 legacy\n\
                PL 0 0 10 0 2 1\n\
                PA 5 5 4 4 2 0 1\n\
                SA 5 5 0\n";
    let (drawing, report) = parse(text);
    assert!(report.is_clean(), "{:?}", report.diagnostics);
    let kinds: Vec<PrimitiveKind> = drawing.primitives().iter().map(|p| p.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            PrimitiveKind::Line,
            PrimitiveKind::Bezier,
            PrimitiveKind::Rectangle,
            PrimitiveKind::Oval,
            PrimitiveKind::Polygon,
            PrimitiveKind::ComplexCurve,
            PrimitiveKind::AdvancedText,
            PrimitiveKind::AdvancedText,
            PrimitiveKind::Connection,
            PrimitiveKind::PcbLine,
            PrimitiveKind::PcbPad,
        ]
    );
}

#[test]
fn test_malformed_line_keeps_the_rest() {
    let (drawing, report) = parse("LI 0 0 10 10 0\nLI 0 x 10 10 0\nSA 5 5 0\n");
    assert_eq!(drawing.len(), 2);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        report.diagnostics[0],
        ParseError::InvalidNumber { line_number: 2, .. }
    ));
}

#[test]
fn test_too_many_tokens_keeps_head() {
    let mut line = String::from("PV 0 0 10 0 10 10 0");
    for _ in 0..10_000 {
        line.push_str(" 1");
    }
    let (drawing, report) = parse(&format!("{}\nSA 1 1 0\n", line));
    assert!(matches!(
        report.diagnostics.first(),
        Some(ParseError::TooManyTokens { line_number: 1, .. })
    ));
    assert_eq!(drawing.len(), 2);
}

#[test]
fn test_unknown_macro_is_kept() {
    let (drawing, report) = parse("MC 10 20 1 0 Missing.Part\n");
    assert!(report.is_clean());
    let m = drawing.primitives()[0].as_macro().unwrap();
    assert_eq!(m.key, "missing.part");
    assert!(!m.is_expanded());
    assert_eq!(drawing.serialize(true), "MC 10 20 1 0 missing.part\n");
}

#[test]
fn test_macro_expansion_contributes_layers() {
    let mut library = MacroLibrary::new();
    library.insert(MacroDescriptor {
        key: "res".to_string(),
        name: "Resistor".to_string(),
        category: "Passive".to_string(),
        library: "Standard".to_string(),
        file_name: String::new(),
        body: "LI 100 100 110 100 1\nRV 110 98 125 102 3\n".to_string(),
    });
    let mut drawing = Drawing::with_library(Arc::new(library));
    drawing.parse("MC 50 50 0 0 res\n");

    let m = drawing.primitives()[0].as_macro().unwrap();
    assert!(m.is_expanded());
    assert_eq!(
        drawing.layers_in_use().into_iter().collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert!(!drawing.is_layer_in_use(0));
    let prim = &drawing.primitives()[0];
    assert_eq!(prim.distance_to(Point::new(55, 50)), 0);
}

#[test]
fn test_text_short_form() {
    let (drawing, _) = parse("TY 10 10 4 3 0 0 Hello\n");
    let Shape::Text(text) = &drawing.primitives()[0].shape else {
        panic!("expected text");
    };
    assert_eq!(text.text, "Hello");
    assert_eq!(drawing.primitives()[0].layer, 0);
}

#[test]
fn test_select_new_on_append() {
    let mut drawing = Drawing::new();
    drawing.parse("LI 0 0 10 10 0\n");
    let report = drawing.add_text("SA 5 5 0\n", true);
    assert_eq!(report.added, 1);
    let flags: Vec<bool> = drawing.primitives().iter().map(|p| p.selected).collect();
    assert_eq!(flags, vec![false, true]);
}
