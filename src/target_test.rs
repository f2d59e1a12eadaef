#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn make_target(rect: Rect, angle: f64) -> Target {
    Target::new(Uuid::new_v4(), rect, angle, TargetOptions::default()).unwrap()
}

// =============================================================
// TargetOptions
// =============================================================

#[test]
fn options_default_matches_widget() {
    let o = TargetOptions::default();
    assert_eq!(o.min_width, 30.0);
    assert_eq!(o.min_height, 30.0);
    assert_eq!(o.max_width, None);
    assert!(o.aspect_ratio);
    assert!(!o.resize_from_center);
    assert!(o.enable_move && o.enable_move_x && o.enable_move_y);
    assert_eq!(o.handles, HandleSet::all());
}

#[test]
fn options_deserialize_partial() {
    let o: TargetOptions = serde_json::from_str(r#"{"aspect_ratio": false, "max_width": 400}"#).unwrap();
    assert!(!o.aspect_ratio);
    assert_eq!(o.max_width, Some(400.0));
    assert_eq!(o.min_width, 30.0);
}

#[test]
fn options_constraints_map_none_to_infinity() {
    let c = TargetOptions::default().constraints();
    assert!(c.max_width.is_infinite());
    assert!(c.max_height.is_infinite());
}

#[test]
fn options_validate_rejects_negative_minimum() {
    let o = TargetOptions { min_height: -1.0, ..TargetOptions::default() };
    assert!(o.validate().is_err());
}

// =============================================================
// Target construction
// =============================================================

#[test]
fn new_normalizes_angle() {
    let t = make_target(Rect::new(0.0, 0.0, 100.0, 100.0), -90.0);
    assert_eq!(t.angle(), 270.0);
}

#[test]
fn new_clamps_rect_into_limits() {
    let t = make_target(Rect::new(5.0, 5.0, 10.0, 400.0), 0.0);
    assert_eq!(t.rect(), Rect::new(5.0, 5.0, 30.0, 400.0));
}

#[test]
fn new_rejects_non_finite_rect() {
    let result = Target::new(Uuid::new_v4(), Rect::new(f64::NAN, 0.0, 50.0, 50.0), 0.0, TargetOptions::default());
    assert!(matches!(result, Err(EngineError::InvalidOptions(_))));
}

#[test]
fn new_rejects_bad_options() {
    let o = TargetOptions { min_width: 0.0, ..TargetOptions::default() };
    assert!(Target::new(Uuid::new_v4(), Rect::new(0.0, 0.0, 50.0, 50.0), 0.0, o).is_err());
}

#[test]
fn new_defaults_flags_and_scale() {
    let t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    assert_eq!(t.scale(), 1.0);
    assert!(!t.is_locked());
    assert!(!t.is_disabled());
    assert!(t.containment().is_none());
    assert!(t.is_interactive());
}

// =============================================================
// Mutation
// =============================================================

#[test]
fn apply_geometry_writes_through() {
    let mut t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    t.apply_geometry(Rect::new(1.0, 2.0, 3.0, 4.0), 725.0);
    // No validation: the 3x4 rect is below the minimum but stored as given.
    assert_eq!(t.rect(), Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(t.angle(), 5.0);
}

#[test]
fn set_angle_normalizes() {
    let mut t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    t.set_angle(360.0);
    assert_eq!(t.angle(), 0.0);
    t.set_angle(-45.0);
    assert_eq!(t.angle(), 315.0);
}

#[test]
fn set_scale_rejects_zero_and_nan() {
    let mut t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    assert!(t.set_scale(0.0).is_err());
    assert!(t.set_scale(f64::NAN).is_err());
    assert!(t.set_scale(2.0).is_ok());
    assert_eq!(t.scale(), 2.0);
}

#[test]
fn set_options_reclamps_rect() {
    let mut t = make_target(Rect::new(0.0, 0.0, 200.0, 200.0), 0.0);
    let o = TargetOptions { max_width: Some(120.0), ..TargetOptions::default() };
    t.set_options(o).unwrap();
    assert_eq!(t.rect().width, 120.0);
    assert_eq!(t.constraints().max_width, 120.0);
}

#[test]
fn locked_or_disabled_is_not_interactive() {
    let mut t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    t.set_locked(true);
    assert!(!t.is_interactive());
    assert!(!t.can_move());
    t.set_locked(false);
    t.set_disabled(true);
    assert!(!t.is_interactive());
}

#[test]
fn can_move_respects_enable_move() {
    let o = TargetOptions { enable_move: false, ..TargetOptions::default() };
    let t = Target::new(Uuid::new_v4(), Rect::new(0.0, 0.0, 50.0, 50.0), 0.0, o).unwrap();
    assert!(t.is_interactive());
    assert!(!t.can_move());
}

// =============================================================
// Containment
// =============================================================

#[test]
fn containment_frame_absent_without_bounds() {
    let t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    assert!(t.containment_frame().is_none());
}

#[test]
fn containment_frame_unrotated_has_zero_offset() {
    let mut t = make_target(Rect::new(10.0, 10.0, 50.0, 40.0), 0.0);
    t.set_containment(Some(Rect::new(0.0, 0.0, 200.0, 200.0)));
    let frame = t.containment_frame().unwrap();
    assert!(approx_eq(frame.offset.x, 0.0) && approx_eq(frame.offset.y, 0.0));
    assert!(approx_eq(frame.width, 50.0) && approx_eq(frame.height, 40.0));
}

#[test]
fn containment_frame_rotated_uses_rendered_box() {
    let mut t = make_target(Rect::new(0.0, 0.0, 100.0, 50.0), 90.0);
    t.set_containment(Some(Rect::new(0.0, 0.0, 500.0, 500.0)));
    let frame = t.containment_frame().unwrap();
    assert!(approx_eq(frame.offset.x, 25.0));
    assert!(approx_eq(frame.offset.y, -25.0));
    assert!(approx_eq(frame.width, 50.0));
    assert!(approx_eq(frame.height, 100.0));
}

#[test]
fn containment_clamp_keeps_box_inside() {
    let frame = ContainmentFrame {
        bounds: Rect::new(0.0, 0.0, 200.0, 100.0),
        offset: Point::new(0.0, 0.0),
        width: 50.0,
        height: 50.0,
    };
    assert_eq!(frame.clamp(Point::new(-10.0, -10.0)), Point::new(0.0, 0.0));
    assert_eq!(frame.clamp(Point::new(190.0, 90.0)), Point::new(150.0, 50.0));
    assert_eq!(frame.clamp(Point::new(20.0, 30.0)), Point::new(20.0, 30.0));
}

#[test]
fn containment_clamp_applies_offset() {
    let frame = ContainmentFrame {
        bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
        offset: Point::new(25.0, -25.0),
        width: 50.0,
        height: 100.0,
    };
    // Rendered box left = x + 25 must be >= 0; top = y - 25 must be >= 0.
    assert_eq!(frame.clamp(Point::new(-100.0, 0.0)), Point::new(-25.0, 25.0));
}

#[test]
fn containment_clamp_oversized_box_prefers_far_edge() {
    let frame = ContainmentFrame {
        bounds: Rect::new(0.0, 0.0, 40.0, 40.0),
        offset: Point::new(0.0, 0.0),
        width: 60.0,
        height: 60.0,
    };
    assert_eq!(frame.clamp(Point::new(5.0, 5.0)), Point::new(-20.0, -20.0));
}

// =============================================================
// TargetStore
// =============================================================

#[test]
fn store_insert_get_remove() {
    let mut store = TargetStore::new();
    assert!(store.ids().is_empty());
    let t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    let id = t.id();
    assert!(store.insert(t));
    assert_eq!(store.ids(), vec![id]);
    assert!(store.contains(&id));
    assert_eq!(store.get(&id).map(Target::id), Some(id));
    assert!(store.remove(&id).is_some());
    assert!(store.get(&id).is_none());
}

#[test]
fn store_insert_duplicate_is_rejected() {
    let mut store = TargetStore::new();
    let t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    let id = t.id();
    let mut dup = t.clone();
    dup.set_angle(45.0);
    assert!(store.insert(t));
    assert!(!store.insert(dup));
    assert_eq!(store.ids().len(), 1);
    assert_eq!(store.get(&id).map(Target::angle), Some(0.0));
}

#[test]
fn store_get_mut_allows_updates() {
    let mut store = TargetStore::new();
    let t = make_target(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0);
    let id = t.id();
    store.insert(t);
    if let Some(target) = store.get_mut(&id) {
        target.set_locked(true);
    }
    assert!(store.get(&id).is_some_and(Target::is_locked));
}
