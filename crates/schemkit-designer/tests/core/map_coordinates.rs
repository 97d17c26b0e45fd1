use proptest::prelude::*;
use schemkit_core::Point;
use schemkit_designer::grid::least_integer_multiple;
use schemkit_designer::MapCoordinates;

#[test]
fn test_scale_and_translate() {
    let mut map = MapCoordinates::new();
    map.set_center(20.0, -10.0);
    map.set_magnitudes(2.0, 3.0);
    assert_eq!(map.map_x(5, 7), 30);
    assert_eq!(map.map_y(5, 7), 11);
    assert_eq!(map.unmap_x_nosnap(30), 5);
    assert_eq!(map.unmap_y_nosnap(11), 7);
}

#[test]
fn test_snap_rounds_to_grid() {
    let mut map = MapCoordinates::new();
    assert_eq!(map.unmap_snap(12, 13), Point::new(10, 15));
    map.set_snap(false);
    assert_eq!(map.unmap_snap(12, 13), Point::new(12, 13));
}

#[test]
fn test_magnitude_is_clamped() {
    let mut map = MapCoordinates::new();
    map.set_magnitudes(0.01, 500.0);
    assert_eq!(map.x_magnitude(), 0.25);
    assert_eq!(map.y_magnitude(), 100.0);
    map.set_magnitudes_no_check(0.01, 0.01);
    assert_eq!(map.x_magnitude(), 0.01);
}

#[test]
fn test_macro_orientation() {
    let mut map = MapCoordinates::new();
    map.set_macro(true);
    map.set_orientation(1);
    // (110, 100) is 10 units right of the macro origin
    assert_eq!(map.map_x(110, 100), 0);
    assert_eq!(map.map_y(110, 100), 10);
    map.set_mirror(true);
    map.set_orientation(0);
    assert_eq!(map.map_x(110, 100), -10);
}

#[test]
fn test_push_pop_and_extents() {
    let mut map = MapCoordinates::new();
    map.map_point_tracked(Point::new(3, 4));
    map.map_point_tracked(Point::new(-2, 9));
    assert_eq!(map.extents(), Some((-2, 4, 3, 9)));

    map.push();
    map.set_magnitudes(4.0, 4.0);
    map.pop();
    assert_eq!(map.x_magnitude(), 1.0);
    map.pop();
    assert_eq!(map.stack_depth(), 0);

    map.reset_min_max();
    assert_eq!(map.extents(), None);
}

#[test]
fn test_grid_multiple() {
    assert_eq!(least_integer_multiple(0.75), 4);
    assert_eq!(least_integer_multiple(3.0), 1);
}

proptest! {
    #[test]
    fn prop_unmap_inverts_map_within_a_step(
        x in -5000i32..5000,
        y in -5000i32..5000,
        mag in 0.25f64..20.0,
        cx in -500i32..500,
        cy in -500i32..500,
        orientation in 0i32..4,
        mirror in any::<bool>(),
    ) {
        let mut map = MapCoordinates::new();
        map.set_magnitudes(mag, mag);
        map.set_center(f64::from(cx), f64::from(cy));
        map.set_orientation(orientation);
        map.set_mirror(mirror);

        let step = map.x_grid_step();
        let back_x = map.unmap_x_snap(map.map_x(x, y));
        let back_y = map.unmap_y_snap(map.map_y(x, y));
        prop_assert!((back_x - x).abs() <= step);
        prop_assert!((back_y - y).abs() <= step);

        let gx = x - x.rem_euclid(step);
        let gy = y - y.rem_euclid(step);
        prop_assert_eq!(map.unmap_x_snap(map.map_x(gx, gy)), gx);
        prop_assert_eq!(map.unmap_y_snap(map.map_y(gx, gy)), gy);
    }
}
