#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use super::*;

fn canvas(w: f64, h: f64) -> CanvasBounds {
    CanvasBounds::new(w, h)
}

fn store_with(symbols: &[&str]) -> (DocStore, Vec<ObjectId>) {
    let mut store = DocStore::new();
    let ids = symbols
        .iter()
        .map(|s| store.create_object(s, canvas(300.0, 500.0)).id)
        .collect();
    (store, ids)
}

fn selected_count(store: &DocStore) -> usize {
    store.iter().filter(|o| o.selected).count()
}

// =============================================================
// CanvasBounds
// =============================================================

#[test]
fn bounds_negative_extent_becomes_zero() {
    let b = canvas(-10.0, f64::NAN);
    assert_eq!(b.width, 0.0);
    assert_eq!(b.height, 0.0);
}

#[test]
fn bounds_max_position_subtracts_size() {
    let max = canvas(300.0, 500.0).max_position(40.0);
    assert_eq!(max, Point::new(260.0, 460.0));
}

#[test]
fn bounds_max_position_never_negative() {
    let max = canvas(20.0, 10.0).max_position(40.0);
    assert_eq!(max, Point::new(0.0, 0.0));
}

// =============================================================
// PlacedObject
// =============================================================

#[test]
fn display_rotation_normalizes() {
    let (mut store, ids) = store_with(&["⭐"]);
    store.apply_pinch(&ids[0], 1.0, -90.0);
    assert_eq!(store.get(&ids[0]).map(PlacedObject::display_rotation), Some(270.0));
    store.apply_pinch(&ids[0], 1.0, 810.0);
    assert_eq!(store.get(&ids[0]).map(|o| o.rotation), Some(720.0));
    assert_eq!(store.get(&ids[0]).map(PlacedObject::display_rotation), Some(0.0));
}

#[test]
fn placed_object_serde_roundtrip() {
    let (store, ids) = store_with(&["🍕"]);
    let obj = store.get(&ids[0]).cloned().unwrap();
    let json = serde_json::to_string(&obj).unwrap();
    let back: PlacedObject = serde_json::from_str(&json).unwrap();
    assert_eq!(back, obj);
}

// =============================================================
// create_object
// =============================================================

#[test]
fn create_centers_on_canvas() {
    let mut store = DocStore::new();
    let obj = store.create_object("🔥", canvas(300.0, 500.0));
    assert_eq!(obj.symbol, "🔥");
    assert_eq!(obj.position, Point::new(130.0, 230.0));
    assert_eq!(obj.scale, 1.0);
    assert_eq!(obj.rotation, 0.0);
    assert!(obj.selected);
}

#[test]
fn create_records_bounds() {
    let mut store = DocStore::new();
    store.create_object("🔥", canvas(300.0, 500.0));
    assert_eq!(store.bounds(), canvas(300.0, 500.0));
}

#[test]
fn create_sanitizes_raw_bounds() {
    let mut store = DocStore::new();
    let obj = store.create_object("🔥", CanvasBounds { width: f64::NAN, height: -50.0 });
    assert_eq!(store.bounds(), CanvasBounds::default());
    assert!(obj.position.x.is_finite() && obj.position.y.is_finite());
    assert_eq!(store.move_by(&obj.id, 5.0, 5.0), Some(Point::new(0.0, 0.0)));
}

#[test]
fn set_bounds_sanitizes_raw_bounds() {
    let mut store = DocStore::new();
    store.set_bounds(CanvasBounds { width: f64::INFINITY, height: -1.0 });
    assert_eq!(store.bounds(), CanvasBounds::default());
}

#[test]
fn invalid_config_falls_back_to_default_limits() {
    let config = EngineConfig { min_scale: f64::NAN, ..Default::default() };
    let mut store = DocStore::with_config(config);
    let id = store.create_object("😀", canvas(300.0, 500.0)).id;
    assert_eq!(store.apply_pinch(&id, 10.0, 0.0), Some((3.0, 0.0)));
}

#[test]
fn create_deselects_previous() {
    let (store, ids) = store_with(&["😀", "😍", "🔥"]);
    assert_eq!(selected_count(&store), 1);
    assert_eq!(store.selected().map(|o| o.id), Some(ids[2]));
}

#[test]
fn create_preserves_insertion_order() {
    let (store, ids) = store_with(&["😀", "😍", "🔥"]);
    let order: Vec<ObjectId> = store.snapshot().iter().map(|o| o.id).collect();
    assert_eq!(order, ids);
}

#[test]
fn create_assigns_unique_ids() {
    let (_, ids) = store_with(&["😀", "😀"]);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn create_uses_configured_icon_size() {
    let config = EngineConfig { icon_size: 100.0, ..Default::default() };
    let mut store = DocStore::with_config(config);
    let obj = store.create_object("🎸", canvas(300.0, 500.0));
    assert_eq!(obj.position, Point::new(100.0, 200.0));
}

// =============================================================
// select
// =============================================================

#[test]
fn select_moves_selection() {
    let (mut store, ids) = store_with(&["😀", "😍", "🔥"]);
    assert!(store.select(&ids[0]));
    assert_eq!(selected_count(&store), 1);
    assert_eq!(store.selected().map(|o| o.id), Some(ids[0]));
}

#[test]
fn select_unknown_clears_all() {
    let (mut store, _) = store_with(&["😀", "😍"]);
    assert!(!store.select(&Uuid::new_v4()));
    assert_eq!(selected_count(&store), 0);
}

#[test]
fn select_same_twice_is_stable() {
    let (mut store, ids) = store_with(&["😀", "😍"]);
    store.select(&ids[0]);
    store.select(&ids[0]);
    assert_eq!(selected_count(&store), 1);
}

// =============================================================
// delete
// =============================================================

#[test]
fn delete_removes_object() {
    let (mut store, ids) = store_with(&["😀", "😍"]);
    let removed = store.delete(&ids[0]);
    assert_eq!(removed.map(|o| o.id), Some(ids[0]));
    assert_eq!(store.len(), 1);
    assert!(store.get(&ids[0]).is_none());
}

#[test]
fn delete_unknown_is_noop() {
    let (mut store, _) = store_with(&["😀"]);
    assert!(store.delete(&Uuid::new_v4()).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn delete_keeps_remaining_order() {
    let (mut store, ids) = store_with(&["😀", "😍", "🔥"]);
    store.delete(&ids[1]);
    let order: Vec<ObjectId> = store.iter().map(|o| o.id).collect();
    assert_eq!(order, vec![ids[0], ids[2]]);
}

#[test]
fn clear_empties_store() {
    let (mut store, _) = store_with(&["😀", "😍"]);
    store.clear();
    assert!(store.is_empty());
}

// =============================================================
// move_by
// =============================================================

#[test]
fn move_adds_delta() {
    let (mut store, ids) = store_with(&["😀"]);
    assert_eq!(store.move_by(&ids[0], 10.0, -30.0), Some(Point::new(140.0, 200.0)));
}

#[test]
fn move_clamps_to_max_corner() {
    let mut store = DocStore::new();
    let id = store.create_object("😀", canvas(100.0, 80.0)).id;
    assert_eq!(store.move_by(&id, 1000.0, 1000.0), Some(Point::new(60.0, 40.0)));
}

#[test]
fn move_clamps_to_origin() {
    let (mut store, ids) = store_with(&["😀"]);
    assert_eq!(store.move_by(&ids[0], -5000.0, -5000.0), Some(Point::new(0.0, 0.0)));
}

#[test]
fn move_clamps_axes_independently() {
    let (mut store, ids) = store_with(&["😀"]);
    // Past the right edge, but y still moves freely.
    assert_eq!(store.move_by(&ids[0], 1000.0, 50.0), Some(Point::new(260.0, 280.0)));
}

#[test]
fn move_unknown_is_noop() {
    let (mut store, _) = store_with(&["😀"]);
    assert!(store.move_by(&Uuid::new_v4(), 1.0, 1.0).is_none());
}

#[test]
fn move_non_finite_delta_is_ignored() {
    let (mut store, ids) = store_with(&["😀"]);
    assert_eq!(store.move_by(&ids[0], f64::NAN, f64::INFINITY), Some(Point::new(130.0, 230.0)));
}

#[test]
fn move_uses_updated_bounds() {
    let (mut store, ids) = store_with(&["😀"]);
    store.set_bounds(canvas(100.0, 100.0));
    assert_eq!(store.move_by(&ids[0], 0.0, 0.0), Some(Point::new(60.0, 60.0)));
}

#[test]
fn move_canvas_smaller_than_icon_pins_to_origin() {
    let mut store = DocStore::new();
    let id = store.create_object("😀", canvas(30.0, 30.0)).id;
    assert_eq!(store.move_by(&id, 5.0, 5.0), Some(Point::new(0.0, 0.0)));
}

// =============================================================
// apply_pinch
// =============================================================

#[test]
fn pinch_scales_and_rotates() {
    let (mut store, ids) = store_with(&["😀"]);
    assert_eq!(store.apply_pinch(&ids[0], 1.25, 15.0), Some((1.25, 15.0)));
    assert_eq!(store.apply_pinch(&ids[0], 0.8, -5.0), Some((1.0, 10.0)));
}

#[test]
fn pinch_clamps_to_max_scale() {
    let (mut store, ids) = store_with(&["😀"]);
    assert_eq!(store.apply_pinch(&ids[0], 100.0, 0.0), Some((3.0, 0.0)));
}

#[test]
fn pinch_clamps_to_min_scale() {
    let (mut store, ids) = store_with(&["😀"]);
    assert_eq!(store.apply_pinch(&ids[0], 0.0001, 0.0), Some((0.5, 0.0)));
}

#[test]
fn pinch_rotation_is_unbounded() {
    let (mut store, ids) = store_with(&["😀"]);
    for _ in 0..10 {
        store.apply_pinch(&ids[0], 1.0, 90.0);
    }
    assert_eq!(store.get(&ids[0]).map(|o| o.rotation), Some(900.0));
}

#[test]
fn pinch_non_finite_is_no_change() {
    let (mut store, ids) = store_with(&["😀"]);
    assert_eq!(store.apply_pinch(&ids[0], f64::NAN, f64::NEG_INFINITY), Some((1.0, 0.0)));
}

#[test]
fn pinch_unknown_is_noop() {
    let (mut store, _) = store_with(&["😀"]);
    assert!(store.apply_pinch(&Uuid::new_v4(), 2.0, 2.0).is_none());
}

// =============================================================
// Properties
// =============================================================

proptest! {
    #[test]
    fn scale_always_within_limits(factors in proptest::collection::vec(-1e6f64..1e6, 1..40)) {
        let (mut store, ids) = store_with(&["😀"]);
        for f in factors {
            if let Some((scale, _)) = store.apply_pinch(&ids[0], f, 0.0) {
                prop_assert!((0.5..=3.0).contains(&scale));
            }
        }
    }

    #[test]
    fn move_always_within_bounds(
        w in 0.0f64..2000.0,
        h in 0.0f64..2000.0,
        deltas in proptest::collection::vec((-5000.0f64..5000.0, -5000.0f64..5000.0), 1..40),
    ) {
        let mut store = DocStore::new();
        let id = store.create_object("😀", canvas(w, h)).id;
        let max = canvas(w, h).max_position(40.0);
        for (dx, dy) in deltas {
            let p = store.move_by(&id, dx, dy).unwrap();
            prop_assert!(p.x >= 0.0 && p.x <= max.x);
            prop_assert!(p.y >= 0.0 && p.y <= max.y);
        }
    }

    #[test]
    fn select_leaves_at_most_one(n in 1usize..8, pick in 0usize..10) {
        let symbols = vec!["😀"; n];
        let (mut store, ids) = store_with(&symbols);
        let target = ids.get(pick).copied().unwrap_or_else(Uuid::new_v4);
        store.select(&target);
        let expected = usize::from(pick < n);
        prop_assert_eq!(selected_count(&store), expected);
    }
}
