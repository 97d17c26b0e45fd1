use criterion::{black_box, criterion_group, criterion_main, Criterion};
use schemkit_designer::{Document, Drawing};

fn sample(lines: usize) -> String {
    let mut text = String::from("[FIDOCAD]\n");
    for i in 0..lines {
        let x = (i % 100) as i32 * 10;
        let y = (i / 100) as i32 * 10;
        let layer = i % 16;
        match i % 4 {
            0 => text.push_str(&format!(
                "LI {} {} {} {} {}\nFCJ 1 0 3 1 0 0\n",
                x,
                y,
                x + 5,
                y,
                layer
            )),
            1 => text.push_str(&format!("RV {} {} {} {} {}\n", x, y, x + 5, y + 5, layer)),
            2 => text.push_str(&format!("SA {} {} {}\n", x, y, layer)),
            _ => text.push_str(&format!(
                "PV {} {} {} {} {} {} {}\n",
                x,
                y,
                x + 5,
                y,
                x,
                y + 5,
                layer
            )),
        }
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let text = sample(5_000);
    c.bench_function("parse_5000", |b| {
        b.iter(|| {
            let mut drawing = Drawing::new();
            drawing.parse(black_box(&text))
        })
    });

    let mut drawing = Drawing::new();
    drawing.parse(&text);
    c.bench_function("serialize_5000", |b| b.iter(|| drawing.serialize(black_box(true))));
    c.bench_function("sort_by_layer_5000", |b| {
        b.iter(|| {
            let mut copy = drawing.clone();
            copy.sort_by_layer();
            copy
        })
    });
}

fn bench_undo(c: &mut Criterion) {
    let text = sample(1_000);
    c.bench_function("undo_redo_1000", |b| {
        let mut doc = Document::new();
        doc.load_text(&text);
        doc.select_all();
        doc.move_selected(5, 5);
        b.iter(|| {
            let _ = doc.undo();
            let _ = doc.redo();
        })
    });
}

criterion_group!(benches, bench_parse, bench_undo);
criterion_main!(benches);
