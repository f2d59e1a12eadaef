#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn camera_deserialize_fills_missing_fields() {
    let cam: Camera = serde_json::from_str(r#"{"zoom": 2.0}"#).unwrap();
    assert_eq!(cam, Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 });
}

// --- screen_to_layout ---

#[test]
fn screen_to_layout_identity() {
    let cam = Camera::default();
    let layout = cam.screen_to_layout(Point::new(50.0, 75.0));
    assert!(point_approx_eq(layout, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_layout_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    let layout = cam.screen_to_layout(Point::new(40.0, 80.0));
    assert!(point_approx_eq(layout, Point::new(10.0, 20.0)));
}

#[test]
fn screen_to_layout_with_pan() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 1.0 };
    let layout = cam.screen_to_layout(Point::new(100.0, 50.0));
    assert!(point_approx_eq(layout, Point::new(0.0, 0.0)));
}

#[test]
fn screen_to_layout_origin_with_pan_and_zoom() {
    let cam = Camera { pan_x: 50.0, pan_y: 30.0, zoom: 2.0 };
    let layout = cam.screen_to_layout(Point::new(0.0, 0.0));
    assert!(point_approx_eq(layout, Point::new(-25.0, -15.0)));
}

#[test]
fn screen_to_layout_fractional_zoom() {
    let cam = Camera { pan_x: 13.5, pan_y: -42.0, zoom: 0.75 };
    let layout = cam.screen_to_layout(Point::new(88.5, 33.0));
    assert!(point_approx_eq(layout, Point::new(100.0, 100.0)));
}

// --- is_valid ---

#[test]
fn is_valid_rejects_zero_negative_and_nan_zoom() {
    assert!(Camera::default().is_valid());
    assert!(!Camera { zoom: 0.0, ..Camera::default() }.is_valid());
    assert!(!Camera { zoom: -1.0, ..Camera::default() }.is_valid());
    assert!(!Camera { zoom: f64::NAN, ..Camera::default() }.is_valid());
    assert!(!Camera { pan_x: f64::INFINITY, ..Camera::default() }.is_valid());
}
