//! Ordered registry of resolvable record shapes.
//!
//! Each entry binds a [`Schema`] to the storage area its records live in
//! and to the typed decoder that turns a raw payload into a [`Document`].
//! Entries keep registration order; resolution prefers earlier entries
//! when scores tie, so the order here is part of the contract.

use serde_json::Value;

use crate::config::DocumentArea;
use crate::model::{Document, Image, ScreenData, ScreenObject};

use super::types::Schema;

/// One resolvable shape: schema, storage area, and typed decoder.
pub struct SchemaEntry {
    schema: Schema,
    area: DocumentArea,
    decode: fn(Value) -> Result<Document, serde_json::Error>,
}

impl SchemaEntry {
    /// Creates an entry for a schema stored under `area`.
    pub fn new(
        schema: Schema,
        area: DocumentArea,
        decode: fn(Value) -> Result<Document, serde_json::Error>,
    ) -> Self {
        Self {
            schema,
            area,
            decode,
        }
    }

    /// Returns the schema name.
    pub fn name(&self) -> &'static str {
        self.schema.name()
    }

    /// Returns the schema description.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the storage area records of this shape are filed under.
    pub fn area(&self) -> DocumentArea {
        self.area
    }

    /// Decodes a raw payload into a typed document.
    ///
    /// Absent fields take the record's defaults; unknown fields are
    /// ignored. Fails only when a required field is missing or a present
    /// field has the wrong type.
    pub fn decode(&self, value: Value) -> Result<Document, serde_json::Error> {
        (self.decode)(value)
    }
}

fn decode_image(value: Value) -> Result<Document, serde_json::Error> {
    serde_json::from_value::<Image>(value).map(Document::Image)
}

fn decode_screen_object(value: Value) -> Result<Document, serde_json::Error> {
    serde_json::from_value::<ScreenObject>(value).map(Document::ScreenObject)
}

fn decode_screen_data(value: Value) -> Result<Document, serde_json::Error> {
    serde_json::from_value::<ScreenData>(value).map(Document::ScreenData)
}

/// The set of shapes a resolver scores against, in registration order.
pub struct SchemaRegistry {
    entries: Vec<SchemaEntry>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a registry holding the capture shapes: `image`,
    /// `screen_object`, `screen_data`, registered in that order.
    pub fn capture_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SchemaEntry::new(
            Schema::new("image", Image::FIELDS),
            DocumentArea::Images,
            decode_image,
        ));
        registry.register(SchemaEntry::new(
            Schema::new("screen_object", ScreenObject::FIELDS),
            DocumentArea::ScreenData,
            decode_screen_object,
        ));
        registry.register(SchemaEntry::new(
            Schema::new("screen_data", ScreenData::FIELDS),
            DocumentArea::ScreenData,
            decode_screen_data,
        ));
        registry
    }

    /// Appends an entry. Later entries lose ties against earlier ones.
    pub fn register(&mut self, entry: SchemaEntry) {
        self.entries.push(entry);
    }

    /// Returns the first entry with the given name.
    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Iterates entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter()
    }

    /// Returns the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capture_defaults_register_in_fixed_order() {
        let registry = SchemaRegistry::capture_defaults();
        let names: Vec<&str> = registry.iter().map(SchemaEntry::name).collect();
        assert_eq!(names, ["image", "screen_object", "screen_data"]);
    }

    #[test]
    fn test_get_finds_entry_by_name() {
        let registry = SchemaRegistry::capture_defaults();
        let entry = registry.get("screen_object").unwrap();
        assert_eq!(entry.area(), DocumentArea::ScreenData);
        assert!(registry.get("mouse_position").is_none());
    }

    #[test]
    fn test_entry_decode_produces_typed_document() {
        let registry = SchemaRegistry::capture_defaults();
        let entry = registry.get("image").unwrap();

        let document = entry.decode(json!({"base64str": "aGVsbG8="})).unwrap();
        match document {
            Document::Image(image) => assert_eq!(image.width, 1920),
            other => panic!("decoded wrong variant: {}", other.schema_name()),
        }
    }

    #[test]
    fn test_entry_decode_rejects_missing_required_field() {
        let registry = SchemaRegistry::capture_defaults();
        let entry = registry.get("screen_data").unwrap();

        let result = entry.decode(json!({"screen_obj_ids": []}));
        assert!(result.is_err());
    }
}
