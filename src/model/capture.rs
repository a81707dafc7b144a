//! Captured-screen records: images, recognized screen objects, capture
//! frames, and the auxiliary records that tie captures to their sources.
//!
//! The document-stored kinds (`Image`, `ScreenObject`, `ScreenData`) each
//! expose a `FIELDS` list naming their serialized fields. The schema
//! registry scores raw payloads against those lists, so they must stay in
//! lockstep with the struct definitions; the tests at the bottom of this
//! module pin them together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::DocumentArea;
use crate::store::DocumentRecord;

fn default_kind_text() -> String {
    "text".to_string()
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_x2() -> i32 {
    1920
}

fn default_y2() -> i32 {
    1080
}

fn default_static() -> bool {
    true
}

/// A stored screenshot, or a crop of one, with the screen region it was
/// taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Whether the crop region is fixed on screen across captures.
    #[serde(default = "default_static")]
    pub is_static_position: bool,
    #[serde(default)]
    pub x1: i32,
    #[serde(default)]
    pub y1: i32,
    #[serde(default = "default_x2")]
    pub x2: i32,
    #[serde(default = "default_y2")]
    pub y2: i32,
    /// Base64-encoded PNG bytes.
    pub base64str: String,
}

impl Image {
    /// Serialized field names, in declaration order.
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "width",
        "height",
        "timestamp",
        "is_static_position",
        "x1",
        "y1",
        "x2",
        "y2",
        "base64str",
    ];

    /// Creates a full-screen image record for the given encoded bytes.
    pub fn new(base64str: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            width: default_width(),
            height: default_height(),
            timestamp: Utc::now(),
            is_static_position: default_static(),
            x1: 0,
            y1: 0,
            x2: default_x2(),
            y2: default_y2(),
            base64str: base64str.into(),
        }
    }
}

impl DocumentRecord for Image {
    fn token(&self) -> Uuid {
        self.id
    }

    fn area(&self) -> DocumentArea {
        DocumentArea::Images
    }
}

/// One recognized element inside a capture frame: its kind, bounding box,
/// and any text read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenObject {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "type", default = "default_kind_text")]
    pub kind: String,
    /// Dense id of the action that produced this observation, when known.
    #[serde(default)]
    pub action_id: Option<u32>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl ScreenObject {
    /// Serialized field names, in declaration order.
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "type",
        "action_id",
        "timestamp",
        "text",
        "x1",
        "y1",
        "x2",
        "y2",
    ];

    /// Creates a text observation for the given bounding box.
    pub fn new(text: impl Into<String>, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: default_kind_text(),
            action_id: None,
            timestamp: Utc::now(),
            text: text.into(),
            x1,
            y1,
            x2,
            y2,
        }
    }
}

impl DocumentRecord for ScreenObject {
    fn token(&self) -> Uuid {
        self.id
    }

    fn area(&self) -> DocumentArea {
        DocumentArea::ScreenData
    }
}

/// One capture frame: the encoded screenshot plus the screen objects
/// recognized in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenData {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub base64str: String,
    pub screen_obj_ids: Vec<Uuid>,
}

impl ScreenData {
    /// Serialized field names, in declaration order.
    pub const FIELDS: &'static [&'static str] =
        &["id", "timestamp", "base64str", "screen_obj_ids"];

    /// Creates a frame for the given encoded bytes and recognized objects.
    pub fn new(base64str: impl Into<String>, screen_obj_ids: Vec<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            base64str: base64str.into(),
            screen_obj_ids,
        }
    }
}

impl DocumentRecord for ScreenData {
    fn token(&self) -> Uuid {
        self.id
    }

    fn area(&self) -> DocumentArea {
        DocumentArea::ScreenData
    }
}

/// A decoded document of any registered kind.
///
/// Resolution picks the variant by field similarity; the payload then
/// round-trips through the matching struct, so serializing a `Document`
/// yields exactly that struct's fields (the enum adds no tag).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Image(Image),
    ScreenObject(ScreenObject),
    ScreenData(ScreenData),
}

impl Document {
    /// The registered schema name of the decoded variant.
    pub fn schema_name(&self) -> &'static str {
        match self {
            Document::Image(_) => "image",
            Document::ScreenObject(_) => "screen_object",
            Document::ScreenData(_) => "screen_data",
        }
    }
}

impl DocumentRecord for Document {
    fn token(&self) -> Uuid {
        match self {
            Document::Image(image) => image.token(),
            Document::ScreenObject(object) => object.token(),
            Document::ScreenData(data) => data.token(),
        }
    }

    fn area(&self) -> DocumentArea {
        match self {
            Document::Image(image) => image.area(),
            Document::ScreenObject(object) => object.area(),
            Document::ScreenData(data) => data.area(),
        }
    }
}

/// An arbitrary JSON payload stored under a numeric key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonData {
    pub id: u32,
    pub data: Value,
}

/// Where a capture came from: a URL, a window title, a file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: u32,
    pub uri: String,
}

/// Links one captured payload to its source and the schedule that ran it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedData {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub source_id: u32,
    pub json_data_id: u32,
    pub schedule_id: u32,
}
