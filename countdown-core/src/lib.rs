//! Core of the Event Countdown app.
//!
//! This crate holds everything below the UI:
//! - `Event` and `TextColor`, the persisted record and its color
//! - `EventStore`, the date-ordered collection mirrored to a `ByteStore`
//! - `EventFormMode` and `EventDraft` for add/edit forms
//! - relative time labels for list rows
//! - `StoreConfig` for where events live on disk

pub mod byte_store;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod image;
pub mod logging;
pub mod relative_time;
pub mod store;

pub use byte_store::{ByteStore, FileByteStore, MemoryByteStore};
pub use color::{Rgba, TextColor};
pub use config::{PersistPolicy, StoreConfig};
pub use error::{CountdownError, CountdownResult};
pub use event::{Event, EventId};
pub use form::{EventDraft, EventFormMode};
pub use image::{FileImageSource, ImageSource};
pub use relative_time::relative_label;
pub use store::{EventStore, DEFAULT_STORE_KEY};
