#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn obj(id: &str, x: f64, y: f64) -> WorldObject {
    WorldObject::new(id, ObjectKind::Request, Point::new(x, y))
}

fn store_with(ids: &[&str]) -> ObjectStore {
    let mut store = ObjectStore::new();
    for (i, id) in ids.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let x = i as f64 * 10.0;
        store.add(obj(id, x, 0.0));
    }
    store
}

fn ids(store: &ObjectStore) -> Vec<&str> {
    store.list().iter().map(|o| o.id.as_str()).collect()
}

// =============================================================
// ObjectKind serde
// =============================================================

#[test]
fn kind_serde_all_variants() {
    for kind in ObjectKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.tag()));
        let back: ObjectKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn kind_default_is_request() {
    assert_eq!(ObjectKind::default(), ObjectKind::Request);
}

#[test]
fn kind_deserialize_invalid_rejects() {
    assert!(serde_json::from_str::<ObjectKind>("\"dashboard\"").is_err());
}

// =============================================================
// WorldObject serde
// =============================================================

#[test]
fn world_object_serializes_type_field() {
    let value = serde_json::to_value(obj("a", 1.0, 2.0)).unwrap();
    assert_eq!(value, json!({ "id": "a", "type": "request", "position": { "x": 1.0, "y": 2.0 } }));
}

#[test]
fn world_object_accepts_integer_coordinates() {
    let o: WorldObject = serde_json::from_value(json!({ "id": "a", "type": "schema", "position": { "x": 3, "y": -4 } })).unwrap();
    assert_eq!(o.kind, ObjectKind::Schema);
    assert_eq!(o.position, Point::new(3.0, -4.0));
}

#[test]
fn world_object_missing_y_defaults_to_zero() {
    let o: WorldObject = serde_json::from_value(json!({ "id": "a", "position": { "x": 3 } })).unwrap();
    assert_eq!(o.position, Point::new(3.0, 0.0));
}

// =============================================================
// Store operations
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = ObjectStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.list().is_empty());
}

#[test]
fn add_preserves_insertion_order() {
    let store = store_with(&["c", "a", "b"]);
    assert_eq!(ids(&store), vec!["c", "a", "b"]);
}

#[test]
fn add_same_id_replaces_in_place() {
    let mut store = store_with(&["a", "b", "c"]);
    store.add(WorldObject::new("b", ObjectKind::Middleware, Point::new(99.0, 99.0)));
    assert_eq!(ids(&store), vec!["a", "b", "c"]);
    assert_eq!(store.get("b").unwrap().kind, ObjectKind::Middleware);
}

#[test]
fn get_returns_none_for_missing() {
    let store = store_with(&["a"]);
    assert!(store.get("zzz").is_none());
}

#[test]
fn remove_by_id_returns_removed() {
    let mut store = store_with(&["a", "b", "c"]);
    let removed = store.remove_by_id("b").unwrap();
    assert_eq!(removed.id, "b");
    assert_eq!(ids(&store), vec!["a", "c"]);
}

#[test]
fn remove_missing_is_noop() {
    let mut store = store_with(&["a"]);
    assert!(store.remove_by_id("nope").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn update_position_moves_only_target() {
    let mut store = store_with(&["a", "b"]);
    assert!(store.update_position("b", Point::new(-5.0, 7.5)));
    assert_eq!(store.get("b").unwrap().position, Point::new(-5.0, 7.5));
    assert_eq!(store.get("a").unwrap().position, Point::new(0.0, 0.0));
}

#[test]
fn update_position_missing_returns_false() {
    let mut store = store_with(&["a"]);
    assert!(!store.update_position("x", Point::new(1.0, 1.0)));
}

#[test]
fn replace_all_swaps_contents() {
    let mut store = store_with(&["a", "b"]);
    store.replace_all(vec![obj("z", 0.0, 0.0)]);
    assert_eq!(ids(&store), vec!["z"]);
}

#[test]
fn clear_empties_store() {
    let mut store = store_with(&["a", "b"]);
    store.clear();
    assert!(store.is_empty());
}

// =============================================================
// Persistence boundary
// =============================================================

#[test]
fn serialize_then_load_restores_store() {
    let mut source = ObjectStore::new();
    source.add(obj("a", 1.5, -2.0));
    source.add(WorldObject::new("b", ObjectKind::Response, Point::new(0.0, 10.0)));

    let mut target = ObjectStore::new();
    assert_eq!(target.load(&source.serialize()).unwrap(), 2);
    assert_eq!(target.list(), source.list());
}

#[test]
fn empty_array_loads_as_empty() {
    let mut store = store_with(&["a"]);
    assert_eq!(store.load("[]").unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn missing_type_is_accepted_as_request() {
    let mut store = ObjectStore::new();
    store.load(r#"[{"id":"a","position":{"x":1,"y":2}}]"#).unwrap();
    let a = store.get("a").unwrap();
    assert_eq!(a.kind, ObjectKind::Request);
    assert_eq!(a.position, Point::new(1.0, 2.0));
}

fn assert_rejected_and_kept(blob: &str) {
    let mut store = store_with(&["keep1", "keep2"]);
    let before = store.list().to_vec();
    assert!(store.load(blob).is_err(), "blob should be rejected: {blob}");
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn not_json_is_rejected() {
    assert_rejected_and_kept("{not json");
}

#[test]
fn non_array_is_rejected() {
    assert_rejected_and_kept(r#"{"id":"a","position":{"x":1}}"#);
}

#[test]
fn numeric_id_is_rejected() {
    assert_rejected_and_kept(r#"[{"id":1,"position":{"x":1}}]"#);
}

#[test]
fn missing_id_is_rejected() {
    assert_rejected_and_kept(r#"[{"position":{"x":1}}]"#);
}

#[test]
fn missing_position_is_rejected() {
    assert_rejected_and_kept(r#"[{"id":"a"}]"#);
}

#[test]
fn string_x_is_rejected() {
    assert_rejected_and_kept(r#"[{"id":"a","position":{"x":"1","y":2}}]"#);
}

#[test]
fn unknown_type_is_rejected() {
    assert_rejected_and_kept(r#"[{"id":"a","type":"widget","position":{"x":1,"y":2}}]"#);
}

#[test]
fn one_bad_element_rejects_whole_blob() {
    assert_rejected_and_kept(r#"[{"id":"ok","position":{"x":1}},{"id":"bad","position":{}}]"#);
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = ObjectStore::deserialize(r#"[{"id":"a","position":{"x":1}},{"id":"a","position":{"x":2}}]"#).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateId(ref id) if id == "a"));
}

#[test]
fn element_error_reports_index() {
    let err = ObjectStore::deserialize(r#"[{"id":"a","position":{"x":1}},{"id":2,"position":{"x":2}}]"#).unwrap_err();
    assert!(matches!(err, LoadError::Element { index: 1, .. }));
    assert!(err.to_string().contains("element 1"));
}
