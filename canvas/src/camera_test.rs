#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn camera(zoom_percent: f64, origin: Point) -> Camera {
    Camera { zoom_percent, origin, ..Camera::default() }
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_sub() {
    let p = Point::new(10.0, 4.0).sub(Point::new(3.0, 6.0));
    assert_eq!(p, Point::new(7.0, -2.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_hundred_percent_at_half_scale() {
    let cam = Camera::default();
    assert_eq!(cam.zoom_percent, 100.0);
    assert_eq!(cam.display_scale, 0.5);
    assert_eq!(cam.origin, Point::default());
    assert_eq!(cam.scale(), 0.5);
}

#[test]
fn scale_follows_zoom() {
    assert_eq!(camera(200.0, Point::default()).scale(), 1.0);
    assert_eq!(camera(50.0, Point::default()).scale(), 0.25);
}

// --- set_zoom ---

#[test]
fn set_zoom_clamps_to_range() {
    let mut cam = Camera::default();
    cam.set_zoom(5.0);
    assert_eq!(cam.zoom_percent, 10.0);
    cam.set_zoom(1000.0);
    assert_eq!(cam.zoom_percent, 400.0);
    cam.set_zoom(150.0);
    assert_eq!(cam.zoom_percent, 150.0);
}

#[test]
fn set_zoom_non_finite_resets() {
    let mut cam = camera(250.0, Point::default());
    cam.set_zoom(f64::NAN);
    assert_eq!(cam.zoom_percent, 100.0);
}

// --- conversions ---

#[test]
fn screen_to_logical_default() {
    let cam = Camera::default();
    let p = cam.screen_to_logical(Point::new(50.0, 75.0));
    assert!(point_approx_eq(p, Point::new(100.0, 150.0)));
}

#[test]
fn screen_to_logical_with_origin() {
    let cam = camera(200.0, Point::new(100.0, 50.0));
    let p = cam.screen_to_logical(Point::new(100.0, 50.0));
    assert!(point_approx_eq(p, Point::new(0.0, 0.0)));
    let p = cam.screen_to_logical(Point::new(110.0, 70.0));
    assert!(point_approx_eq(p, Point::new(10.0, 20.0)));
}

#[test]
fn round_trip_at_several_zooms() {
    for zoom in [10.0, 50.0, 100.0, 175.0, 400.0] {
        let cam = camera(zoom, Point::new(37.0, -12.0));
        let logical = Point::new(123.4, 567.8);
        let back = cam.screen_to_logical(cam.logical_to_screen(logical));
        assert!((back.x - logical.x).abs() < 1e-9, "zoom {zoom}");
        assert!((back.y - logical.y).abs() < 1e-9, "zoom {zoom}");
    }
}

#[test]
fn screen_dist_to_logical_inverts_scale() {
    let cam = camera(200.0, Point::default());
    assert!(approx_eq(cam.screen_dist_to_logical(8.0), 8.0));
    let cam = camera(50.0, Point::default());
    assert!(approx_eq(cam.screen_dist_to_logical(8.0), 32.0));
}

#[test]
fn camera_serializes_camel_case() {
    let value = serde_json::to_value(Camera::default()).unwrap();
    assert_eq!(value["zoomPercent"], 100.0);
    assert_eq!(value["displayScale"], 0.5);
}
