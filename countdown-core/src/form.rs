//! Add/edit form model.
//!
//! Sits between a UI form and the store: holds the fields being edited,
//! validates them and produces the event to save.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

use crate::color::TextColor;
use crate::error::{CountdownError, CountdownResult};
use crate::event::Event;

/// Whether a form creates a new event or edits an existing one.
#[derive(Debug, Clone)]
pub enum EventFormMode {
    Add,
    Edit(Event),
}

impl EventFormMode {
    pub fn navigation_title(&self) -> String {
        match self {
            EventFormMode::Add => "Add Event".to_string(),
            EventFormMode::Edit(event) => format!("Edit {}", event.title),
        }
    }
}

// Two edit modes are the same destination when they target the same event
impl PartialEq for EventFormMode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EventFormMode::Add, EventFormMode::Add) => true,
            (EventFormMode::Edit(a), EventFormMode::Edit(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl Eq for EventFormMode {}

impl Hash for EventFormMode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            EventFormMode::Add => "add".hash(state),
            EventFormMode::Edit(event) => {
                "edit".hash(state);
                event.id().hash(state);
            }
        }
    }
}

/// Field values of an event form.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: DateTime<Utc>,
    pub text_color: TextColor,
    pub image_data: Option<Vec<u8>>,
}

impl Default for EventDraft {
    fn default() -> Self {
        EventDraft {
            title: String::new(),
            date: Utc::now(),
            text_color: TextColor::Default,
            image_data: None,
        }
    }
}

impl EventDraft {
    /// Initial field values for a form in `mode`.
    pub fn for_mode(mode: &EventFormMode) -> Self {
        match mode {
            EventFormMode::Add => EventDraft::default(),
            EventFormMode::Edit(event) => EventDraft {
                title: event.title.clone(),
                date: event.date,
                text_color: event.text_color,
                image_data: event.image_data.clone(),
            },
        }
    }

    pub fn is_valid_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn remove_image(&mut self) {
        self.image_data = None;
    }

    /// Build the event to save. Edits keep the original event's id.
    pub fn build(&self, mode: &EventFormMode) -> CountdownResult<Event> {
        if !self.is_valid_title() {
            return Err(CountdownError::InvalidTitle);
        }

        let event = match mode {
            EventFormMode::Add => Event::new(
                self.title.clone(),
                self.date,
                self.text_color,
                self.image_data.clone(),
            ),
            EventFormMode::Edit(existing) => {
                let mut updated = existing.clone();
                updated.title = self.title.clone();
                updated.date = self.date;
                updated.text_color = self.text_color;
                updated.image_data = self.image_data.clone();
                updated
            }
        };

        Ok(event)
    }
}
