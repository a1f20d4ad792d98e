use super::*;
use crate::doc::ObjectKind;
use crate::grid::GridBlock;

fn store_at(points: &[(&str, f64, f64)]) -> ObjectStore {
    let mut store = ObjectStore::new();
    for &(id, x, y) in points {
        store.add(WorldObject::new(id, ObjectKind::Request, Point::new(x, y)));
    }
    store
}

// =============================================================
// Card geometry
// =============================================================

#[test]
fn card_rect_is_centered_four_by_three() {
    let obj = WorldObject::new("a", ObjectKind::Request, Point::new(100.0, 50.0));
    let r = card_rect(&obj);
    assert_eq!(r, Rect::new(-100.0, -100.0, 400.0, 300.0));
}

#[test]
fn grip_sits_in_top_right_corner() {
    let g = grip_rect(Rect::new(0.0, 0.0, 400.0, 300.0));
    assert_eq!(g, Rect::new(368.0, 16.0, 16.0, 16.0));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn miss_on_empty_canvas() {
    assert!(hit_test(Point::new(0.0, 0.0), &ObjectStore::new()).is_none());
}

#[test]
fn body_hit() {
    let store = store_at(&[("a", 0.0, 0.0)]);
    let hit = hit_test(Point::new(0.0, 0.0), &store).unwrap();
    assert_eq!(hit, Hit { object_id: "a".into(), part: HitPart::Body });
}

#[test]
fn grip_hit() {
    let store = store_at(&[("a", 0.0, 0.0)]);
    // Card spans x in [-200, 200], y in [-150, 150]; grip at (168..184, -134..-118).
    let hit = hit_test(Point::new(176.0, -126.0), &store).unwrap();
    assert_eq!(hit.part, HitPart::Grip);
}

#[test]
fn outside_card_misses() {
    let store = store_at(&[("a", 0.0, 0.0)]);
    assert!(hit_test(Point::new(201.0, 0.0), &store).is_none());
    assert!(hit_test(Point::new(0.0, -151.0), &store).is_none());
}

#[test]
fn topmost_card_wins() {
    let store = store_at(&[("below", 0.0, 0.0), ("above", 100.0, 0.0)]);
    assert_eq!(hit_test(Point::new(50.0, 0.0), &store).unwrap().object_id, "above");
    assert_eq!(hit_test(Point::new(-150.0, 0.0), &store).unwrap().object_id, "below");
}

// =============================================================
// hovered
// =============================================================

#[test]
fn hover_box_is_larger_than_card() {
    let store = store_at(&[("a", 0.0, 0.0)]);
    // Outside the card (half height 150) but inside the hover box (half 250).
    let p = Point::new(0.0, 240.0);
    assert!(hit_test(p, &store).is_none());
    assert_eq!(hovered(p, &store), vec!["a".to_string()]);
}

#[test]
fn hover_reports_every_overlapping_box() {
    let store = store_at(&[("a", 0.0, 0.0), ("b", 400.0, 0.0), ("c", 2000.0, 0.0)]);
    assert_eq!(hovered(Point::new(200.0, 0.0), &store), vec!["a".to_string(), "b".to_string()]);
}

// =============================================================
// Grid handles
// =============================================================

fn grid_with(blocks: Vec<GridBlock<()>>) -> GridLayout<()> {
    let mut layout = GridLayout::default();
    layout.replace_all(blocks);
    layout
}

#[test]
fn resize_strips_sit_at_mid_height() {
    let block = Rect::new(0.0, 0.0, 500.0, 300.0);
    assert_eq!(resize_handle_rect(block, ResizeEdge::Left), Rect::new(0.0, 130.0, 8.0, 40.0));
    assert_eq!(resize_handle_rect(block, ResizeEdge::Right), Rect::new(492.0, 130.0, 8.0, 40.0));
}

#[test]
fn move_handle_is_inset_top_left() {
    assert_eq!(move_handle_rect(Rect::new(100.0, 40.0, 500.0, 300.0)), Rect::new(108.0, 48.0, 12.0, 12.0));
}

#[test]
fn grid_hit_finds_each_handle() {
    // Block at cells (0,0) size 25x15 -> 500x300 px at zoom 0.
    let layout = grid_with(vec![GridBlock::new("a", 0, 0, 25, 15, ())]);

    let hit = grid_hit_test(Point::new(12.0, 12.0), &layout).unwrap();
    assert_eq!(hit, GridHit { block_id: "a".into(), handle: GridHandle::Move });

    let hit = grid_hit_test(Point::new(4.0, 150.0), &layout).unwrap();
    assert_eq!(hit.handle, GridHandle::Resize(ResizeEdge::Left));

    let hit = grid_hit_test(Point::new(496.0, 150.0), &layout).unwrap();
    assert_eq!(hit.handle, GridHandle::Resize(ResizeEdge::Right));
}

#[test]
fn grid_body_is_not_a_handle() {
    let layout = grid_with(vec![GridBlock::new("a", 0, 0, 25, 15, ())]);
    assert!(grid_hit_test(Point::new(250.0, 150.0), &layout).is_none());
    assert!(grid_hit_test(Point::new(4.0, 20.0), &layout).is_none());
}

#[test]
fn grid_hit_follows_zoom() {
    let mut layout = grid_with(vec![GridBlock::new("a", 1, 0, 25, 15, ())]);
    layout.set_zoom(1.0);
    // Cell size 40: block spans x in [40, 1040], right strip at [1032, 1040].
    let hit = grid_hit_test(Point::new(1036.0, 300.0), &layout).unwrap();
    assert_eq!(hit.handle, GridHandle::Resize(ResizeEdge::Right));
}
