use proptest::prelude::*;
use schemkit_core::Point;
use schemkit_designer::model::Connection;
use schemkit_designer::{Drawing, Primitive, Shape};

fn pin(x: i32, layer: usize) -> Primitive {
    Primitive::new(Shape::Connection(Connection::new(Point::new(x, 0))), layer)
}

#[test]
fn test_sort_is_stable() {
    let mut drawing = Drawing::new();
    for (x, layer) in [(1, 2), (2, 0), (3, 2), (4, 1)] {
        drawing.insert(pin(x, layer));
    }
    drawing.sort_by_layer();
    let order: Vec<(usize, i32)> = drawing
        .primitives()
        .iter()
        .map(|p| (p.layer, p.control_point(0).unwrap().x))
        .collect();
    assert_eq!(order, vec![(0, 2), (1, 4), (2, 1), (2, 3)]);
}

#[test]
fn test_layers_in_use_with_holes() {
    let mut drawing = Drawing::new();
    drawing.parse("SA 0 0 3\nSA 5 5 0\n");
    assert!(drawing.is_layer_in_use(0));
    assert!(!drawing.is_layer_in_use(1));
    assert!(!drawing.is_layer_in_use(2));
    assert!(drawing.is_layer_in_use(3));
    assert_eq!(drawing.max_layer(), Some(3));
}

#[test]
fn test_scoped_iteration_stops_at_layer() {
    let mut drawing = Drawing::new();
    drawing.parse("SA 0 0 1\nSA 1 0 0\nSA 2 0 1\nSA 3 0 2\n");
    let on_one: Vec<i32> = drawing
        .primitives_on_layer(1)
        .map(|p| p.control_point(0).unwrap().x)
        .collect();
    assert_eq!(on_one, vec![0, 2]);
    assert_eq!(drawing.primitives_on_layer(5).count(), 0);
}

#[test]
fn test_header_only_when_modified() {
    let mut drawing = Drawing::new();
    drawing.parse("FJC C 2\nFJC A 0.5\nSA 0 0 0\n");
    assert_eq!(drawing.serialize(true), "SA 0 0 0\n");

    drawing.parse("FJC C 3\nFJC N 2 Copper top\nSA 0 0 0\n");
    assert_eq!(
        drawing.serialize(true),
        "FJC C 3\nFJC L 2 -65536 1\nFJC N 2 Copper top\nSA 0 0 0\n"
    );
    assert_eq!(drawing.serialize(false), "SA 0 0 0\n");
}

#[test]
fn test_remove_selected_rescans_layers() {
    let mut drawing = Drawing::new();
    drawing.parse("SA 0 0 0\nSA 0 0 4\n");
    drawing.iter_mut().for_each(|p| p.selected = p.layer == 4);
    assert_eq!(drawing.remove_selected(), 1);
    assert!(!drawing.is_layer_in_use(4));
    assert_eq!(drawing.max_layer(), Some(0));
}

proptest! {
    #[test]
    fn prop_sort_groups_layers_and_keeps_order(layers in prop::collection::vec(0usize..16, 0..64)) {
        let mut drawing = Drawing::new();
        for (i, layer) in layers.iter().enumerate() {
            drawing.insert(pin(i as i32, *layer));
        }
        drawing.sort_by_layer();
        prop_assert!(drawing.is_sorted_by_layer());

        let mut expected: Vec<(usize, i32)> =
            layers.iter().enumerate().map(|(i, l)| (*l, i as i32)).collect();
        expected.sort_by_key(|(l, _)| *l);
        let got: Vec<(usize, i32)> = drawing
            .primitives()
            .iter()
            .map(|p| (p.layer, p.control_point(0).unwrap().x))
            .collect();
        prop_assert_eq!(got, expected);

        for layer in 0..16 {
            prop_assert_eq!(drawing.is_layer_in_use(layer), layers.contains(&layer));
        }
    }
}
