//! The event record.
//!
//! Events are stored as self-describing JSON objects:
//!
//! ```json
//! {
//!   "id": "8d3c0f0e-5f7a-4b8e-9d43-2c0f6f0a9a11",
//!   "title": "Birthday",
//!   "date": "2025-12-25T00:00:00Z",
//!   "textColor": {"red": 255, "green": 59, "blue": 48, "alpha": 255},
//!   "imageData": "iVBORw0KGgo="
//! }
//! ```
//!
//! `textColor` is `{"useDefault": true}` or integer RGBA components in
//! `0..=255`. `imageData` is omitted when there is no image. A missing or
//! unreadable `textColor` degrades to the default color instead of failing
//! the record.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::color::TextColor;
use crate::error::{CountdownError, CountdownResult};

/// Identity of an event, assigned at construction and never changed.
pub type EventId = Uuid;

/// A dated event shown in the countdown list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    id: EventId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub text_color: TextColor,
    pub image_data: Option<Vec<u8>>,
}

impl Event {
    /// Create an event with a freshly generated id. No validation is done here.
    pub fn new(
        title: impl Into<String>,
        date: DateTime<Utc>,
        text_color: TextColor,
        image_data: Option<Vec<u8>>,
    ) -> Self {
        Event {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            text_color,
            image_data,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    /// The same event contents under another identity.
    pub(crate) fn with_id(mut self, id: EventId) -> Self {
        self.id = id;
        self
    }

    pub fn has_image(&self) -> bool {
        self.image_data.is_some()
    }

    pub fn to_bytes(&self) -> CountdownResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CountdownError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> CountdownResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| CountdownError::MalformedRecord(e.to_string()))
    }
}

impl Default for Event {
    fn default() -> Self {
        Event::new("", Utc::now(), TextColor::Default, None)
    }
}

/// Encode a whole collection as a JSON array.
pub fn encode_events(events: &[Event]) -> CountdownResult<Vec<u8>> {
    serde_json::to_vec(events).map_err(|e| CountdownError::Serialization(e.to_string()))
}

/// Decode a JSON array of events. One bad record fails the whole collection.
pub fn decode_events(bytes: &[u8]) -> CountdownResult<Vec<Event>> {
    serde_json::from_slice(bytes).map_err(|e| CountdownError::MalformedRecord(e.to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRecordRef<'a> {
    id: &'a EventId,
    title: &'a str,
    date: &'a DateTime<Utc>,
    text_color: &'a TextColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_data: Option<String>,
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EventRecordRef {
            id: &self.id,
            title: &self.title,
            date: &self.date,
            text_color: &self.text_color,
            image_data: self.image_data.as_ref().map(|data| BASE64.encode(data)),
        }
        .serialize(serializer)
    }
}

/// Wire form of an event as read from storage
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    id: EventId,
    title: String,
    date: DateTime<Utc>,
    #[serde(default)]
    text_color: Option<serde_json::Value>,
    #[serde(default)]
    image_data: Option<String>,
}

impl TryFrom<EventRecord> for Event {
    type Error = CountdownError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let text_color = match record.text_color {
            Some(value) => TextColor::decode(&value).unwrap_or_else(|e| {
                warn!("Event {}: {}, using default color", record.id, e);
                TextColor::Default
            }),
            None => TextColor::Default,
        };

        let image_data = record
            .image_data
            .map(|encoded| BASE64.decode(encoded))
            .transpose()
            .map_err(|e| {
                CountdownError::MalformedRecord(format!("imageData of {}: {}", record.id, e))
            })?;

        Ok(Event {
            id: record.id,
            title: record.title,
            date: record.date,
            text_color,
            image_data,
        })
    }
}
