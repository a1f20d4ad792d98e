//! Document model: placed world objects and the store that owns them.
//!
//! `ObjectStore` is the single source of truth for what sits on the canvas.
//! Everything else (engine, hit-testing, scene layout) reads it through
//! `list`/`get` and mutates it through the handful of operations below.
//!
//! Persistence is an external concern. The store only converts itself to and
//! from a JSON blob; `load` validates the whole blob before touching state so
//! a malformed blob never leaves the store half-replaced.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Unique identifier for a world object.
pub type ObjectId = String;

/// The closed set of things that can be placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// HTTP request definition (name, path, method).
    #[default]
    Request,
    /// Body schema definition.
    Schema,
    /// Collection of stored records.
    Collection,
    /// Named type definition.
    Type,
    /// Response template.
    Response,
    /// Middleware step.
    Middleware,
}

impl ObjectKind {
    /// Every variant, in creation-menu order.
    pub const ALL: [Self; 6] = [Self::Request, Self::Schema, Self::Collection, Self::Type, Self::Response, Self::Middleware];

    /// Lowercase tag used in the persisted blob.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Schema => "schema",
            Self::Collection => "collection",
            Self::Type => "type",
            Self::Response => "response",
            Self::Middleware => "middleware",
        }
    }
}

/// A placed object: identity, kind and world position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredObject")]
pub struct WorldObject {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub position: Point,
}

impl WorldObject {
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, kind: ObjectKind, position: Point) -> Self {
        Self { id: id.into(), kind, position }
    }
}

/// Wire shape accepted on load.
///
/// `id` must be a string and `position.x` a number. `type` falls back to
/// `request` and `position.y` to `0` when absent; an unknown `type` is an error.
#[derive(Deserialize)]
struct StoredObject {
    id: String,
    #[serde(default, rename = "type")]
    kind: ObjectKind,
    position: StoredPosition,
}

#[derive(Deserialize)]
struct StoredPosition {
    x: f64,
    #[serde(default)]
    y: f64,
}

impl From<StoredObject> for WorldObject {
    fn from(raw: StoredObject) -> Self {
        Self { id: raw.id, kind: raw.kind, position: Point::new(raw.position.x, raw.position.y) }
    }
}

/// Why a persisted blob was rejected.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The blob is not valid JSON or not a JSON array.
    #[error("blob is not a JSON array of objects: {0}")]
    Shape(#[source] serde_json::Error),
    /// One element failed validation.
    #[error("element {index} is invalid: {source}")]
    Element {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    /// Two elements share an id.
    #[error("duplicate object id {0:?}")]
    DuplicateId(ObjectId),
}

/// In-memory, insertion-ordered store of world objects.
///
/// Order only affects stacking when rendering; later objects draw on top.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: Vec<WorldObject>,
}

impl ObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn list(&self) -> &[WorldObject] {
        &self.objects
    }

    /// Return a reference to an object by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Append an object. An object with the same id is replaced in place,
    /// keeping its stacking position.
    pub fn add(&mut self, obj: WorldObject) {
        if let Some(existing) = self.objects.iter_mut().find(|o| o.id == obj.id) {
            tracing::debug!(id = %obj.id, "add replaced existing object");
            *existing = obj;
        } else {
            self.objects.push(obj);
        }
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove_by_id(&mut self, id: &str) -> Option<WorldObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Replace every object with `objects`, in the given order.
    pub fn replace_all(&mut self, objects: Vec<WorldObject>) {
        self.objects = objects;
    }

    /// Move an object. Returns false if the object doesn't exist.
    pub fn update_position(&mut self, id: &str, position: Point) -> bool {
        let Some(obj) = self.objects.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        obj.position = position;
        true
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of objects currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialize the store to its persisted JSON form.
    #[must_use]
    pub fn serialize(&self) -> String {
        // Plain strings, enums and floats: serde_json cannot fail on these.
        serde_json::to_string(&self.objects).unwrap_or_default()
    }

    /// Parse and validate a persisted blob without touching any store.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the blob is not an array, an element fails
    /// validation, or two elements share an id.
    pub fn deserialize(blob: &str) -> Result<Vec<WorldObject>, LoadError> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(blob).map_err(LoadError::Shape)?;

        let mut seen = HashSet::with_capacity(raw.len());
        let mut objects = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            let obj: WorldObject =
                serde_json::from_value(value).map_err(|source| LoadError::Element { index, source })?;
            if !seen.insert(obj.id.clone()) {
                return Err(LoadError::DuplicateId(obj.id));
            }
            objects.push(obj);
        }
        Ok(objects)
    }

    /// Replace the store's contents from a persisted blob.
    ///
    /// On failure the previous contents are kept. Returns the number of
    /// objects loaded.
    ///
    /// # Errors
    ///
    /// Propagates [`LoadError`] from [`ObjectStore::deserialize`].
    pub fn load(&mut self, blob: &str) -> Result<usize, LoadError> {
        match Self::deserialize(blob) {
            Ok(objects) => {
                let count = objects.len();
                self.replace_all(objects);
                tracing::debug!(count, "store loaded");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, kept = self.objects.len(), "rejected store blob");
                Err(e)
            }
        }
    }
}
