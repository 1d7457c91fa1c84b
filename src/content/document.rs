//! # Content Document
//!
//! The in-memory model: a mapping from section name to section value.
//! A section value is either a free-form mapping of scalar fields
//! (`hero: {title, subtitle}`) or an object carrying a `title` plus an
//! `items` array of identified records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{ContentError, ContentResult};

/// The full editable site content
///
/// Section order is preserved as stored on disk (`serde_json` with the
/// `preserve_order` default off still round-trips keys stably enough for
/// this document size; items keep their array order by construction).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ContentDocument {
    sections: Map<String, Value>,
}

/// Compute the id for a newly created item
///
/// Ids are `max(existing ids, 0) + 1` — monotonic per section, not globally
/// unique. An id is reused only if every higher-numbered item has been
/// deleted. That quirk is long-standing observable behavior and is kept.
pub fn next_item_id(items: &[Value]) -> i64 {
    items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1
}

/// Shallow-merge `patch` into `target`
///
/// Top-level keys present in `patch` overwrite; all other keys are left
/// untouched.
pub fn shallow_merge(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
}

impl ContentDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the document has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The full document as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.sections.clone())
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> ContentResult<&Value> {
        self.sections
            .get(name)
            .ok_or_else(|| ContentError::SectionNotFound(name.to_string()))
    }

    /// Create or update a section
    ///
    /// Array bodies replace the section wholesale. Mapping bodies are
    /// shallow-merged into the existing section mapping; a section that is
    /// absent (or not currently a mapping) starts from an empty mapping.
    /// Any other body shape is rejected.
    ///
    /// Returns the resulting section value.
    pub fn upsert_section(&mut self, name: &str, body: Value) -> ContentResult<Value> {
        match body {
            Value::Array(_) => {
                self.sections.insert(name.to_string(), body.clone());
                Ok(body)
            }
            Value::Object(patch) => {
                let section = self
                    .sections
                    .entry(name.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !section.is_object() {
                    *section = Value::Object(Map::new());
                }
                // unwrap is safe: section was just forced to an object
                let target = section.as_object_mut().unwrap();
                shallow_merge(target, &patch);
                Ok(section.clone())
            }
            _ => Err(ContentError::MalformedInput(
                "section body must be an object or an array".to_string(),
            )),
        }
    }

    /// Borrow a section's item list mutably
    ///
    /// Fails with `SectionNotFound` if the section is absent and with
    /// `InvalidShape` if it does not carry an `items` array.
    fn items_mut(&mut self, name: &str) -> ContentResult<&mut Vec<Value>> {
        let section = self
            .sections
            .get_mut(name)
            .ok_or_else(|| ContentError::SectionNotFound(name.to_string()))?;

        section
            .get_mut("items")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| ContentError::InvalidShape(name.to_string()))
    }

    /// Append a new item to a section's item list
    ///
    /// The id is assigned by [`next_item_id`]; any id supplied in `fields`
    /// is overridden. Returns the created item.
    ///
    /// Unlike update and delete, creation treats a missing section the same
    /// as a section without an item list: the caller named an invalid
    /// creation target, not a missing resource.
    pub fn create_item(&mut self, name: &str, fields: Value) -> ContentResult<Value> {
        let Value::Object(fields) = fields else {
            return Err(ContentError::MalformedInput(
                "item fields must be an object".to_string(),
            ));
        };

        let items = self.items_mut(name).map_err(|e| match e {
            ContentError::SectionNotFound(section) => ContentError::InvalidShape(section),
            other => other,
        })?;
        let id = next_item_id(items);

        let mut item = fields;
        item.insert("id".to_string(), Value::from(id));
        let item = Value::Object(item);
        items.push(item.clone());

        Ok(item)
    }

    /// Shallow-merge a patch into an existing item, preserving its position
    ///
    /// Returns the updated item.
    pub fn update_item(&mut self, name: &str, id: i64, patch: Value) -> ContentResult<Value> {
        let Value::Object(patch) = patch else {
            return Err(ContentError::MalformedInput(
                "item patch must be an object".to_string(),
            ));
        };

        let items = self.items_mut(name)?;
        let item = items
            .iter_mut()
            .find(|item| item.get("id").and_then(Value::as_i64) == Some(id))
            .ok_or_else(|| ContentError::ItemNotFound(name.to_string(), id))?;

        // unwrap is safe: only objects are ever stored as items
        let target = item.as_object_mut().unwrap();
        shallow_merge(target, &patch);
        // the id survives any patch
        target.insert("id".to_string(), Value::from(id));

        Ok(item.clone())
    }

    /// Remove an item, preserving the relative order of the rest
    ///
    /// No ids are renumbered.
    pub fn delete_item(&mut self, name: &str, id: i64) -> ContentResult<()> {
        let items = self.items_mut(name)?;
        let idx = items
            .iter()
            .position(|item| item.get("id").and_then(Value::as_i64) == Some(id))
            .ok_or_else(|| ContentError::ItemNotFound(name.to_string(), id))?;

        items.remove(idx);
        Ok(())
    }

    /// Make sure a section exists and carries an `items` array
    ///
    /// Used for internally-managed sections (contact messages) that are
    /// created on first use rather than through the API.
    pub fn ensure_items_section(&mut self, name: &str, title: &str) {
        let section = self.sections.entry(name.to_string()).or_insert_with(|| {
            serde_json::json!({ "title": title, "items": [] })
        });
        if section.get("items").and_then(Value::as_array).is_none() {
            if let Some(obj) = section.as_object_mut() {
                obj.insert("items".to_string(), Value::Array(Vec::new()));
            } else {
                *section = serde_json::json!({ "title": title, "items": [] });
            }
        }
    }
}
