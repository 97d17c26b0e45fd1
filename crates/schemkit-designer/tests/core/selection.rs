use schemkit_core::{Point, Rect};
use schemkit_designer::{Drawing, MapCoordinates, SelectionManager};

fn drawing() -> Drawing {
    let mut d = Drawing::new();
    d.parse("LI 0 0 100 0 0\nRV 20 20 40 40 0\nSA 60 30 0\n");
    d
}

#[test]
fn test_equal_distance_picks_first_in_store_order() {
    let mut d = Drawing::new();
    d.parse("LI 0 0 100 0 0\nLI 0 10 100 10 0\n");
    let s = SelectionManager::new();
    let (index, distance) = s.nearest_primitive(&d, Point::new(50, 5)).unwrap();
    assert_eq!(index, 0);
    assert_eq!(distance, 5);
}

#[test]
fn test_left_to_right_needs_enclosure() {
    let mut d = drawing();
    let s = SelectionManager::new();
    let rect = Rect::new(10, 10, 40, 40);
    assert_eq!(s.select_rect(&mut d, &rect, true, false), 1);
    assert_eq!(s.selected_indices(&d), vec![1]);
}

#[test]
fn test_right_to_left_accepts_touch() {
    let mut d = drawing();
    let s = SelectionManager::new();
    let rect = Rect::new(30, 25, 40, 20);
    assert_eq!(s.select_rect(&mut d, &rect, false, false), 2);
    assert_eq!(s.selected_indices(&d), vec![1, 2]);
}

#[test]
fn test_multiple_keeps_previous() {
    let mut d = drawing();
    let s = SelectionManager::new();
    let map = MapCoordinates::new();
    s.select_at(&mut d, &map, 50, 1);
    s.select_rect(&mut d, &Rect::new(55, 25, 10, 10), true, true);
    assert_eq!(s.selected_indices(&d), vec![0, 2]);
    assert_eq!(s.selected_bounds(&d), Some(Rect::new(0, 0, 100, 30)));
}

#[test]
fn test_macro_on_hidden_layer_stays_selectable() {
    let mut d = Drawing::new();
    d.parse("MC 10 10 0 0 unknown\n");
    if let Some(layer) = d.layer_mut(0) {
        layer.visible = false;
    }
    let s = SelectionManager::new();
    assert!(s.nearest_primitive(&d, Point::new(10, 10)).is_some());
}

#[test]
fn test_rect_skips_hidden_layers() {
    let mut d = Drawing::new();
    d.parse("SA 10 10 0\nSA 20 20 2\nMC 30 30 0 0 unknown\n");
    for hidden in [0, 2] {
        if let Some(layer) = d.layer_mut(hidden) {
            layer.visible = false;
        }
    }
    let s = SelectionManager::new();
    let n = s.select_rect(&mut d, &Rect::new(0, 0, 200, 200), false, false);
    assert_eq!(n, 1);
    let selected: Vec<(bool, bool)> = d
        .primitives()
        .iter()
        .map(|p| (p.is_macro(), p.selected))
        .collect();
    assert_eq!(selected, vec![(false, false), (true, true), (false, false)]);
}

#[test]
fn test_trivial_rect_selects_nothing() {
    let mut d = drawing();
    let s = SelectionManager::new();
    s.select_all(&mut d);
    assert_eq!(s.select_rect(&mut d, &Rect::new(60, 30, 0, 10), false, false), 0);
    assert!(!s.has_selection(&d));
    s.select_all(&mut d);
    assert_eq!(s.select_rect(&mut d, &Rect::new(60, 30, 10, 0), false, true), 0);
    assert_eq!(s.selection_state(&d), vec![true, true, true]);
}

#[test]
fn test_hit_testing_far_coordinates() {
    let mut d = Drawing::new();
    let report = d.parse(
        "LI -2147483600 0 -2147483600 10 0\n\
         RV 2147483600 -2147483600 -2147483600 2147483600 0\n\
         SA 2147483647 -2147483648 0\n",
    );
    assert!(report.is_clean(), "{:?}", report.diagnostics);
    let s = SelectionManager::new();
    for p in [
        Point::new(0, 0),
        Point::new(i32::MIN, i32::MAX),
        Point::new(i32::MAX, i32::MIN),
    ] {
        assert!(s.nearest_primitive(&d, p).is_some());
    }
    let map = MapCoordinates::new();
    s.select_at(&mut d, &map, i32::MAX, i32::MIN);
}
