//! Booking and contact form records.
//!
//! A submitted form becomes a [`BookingRecord`]: an ordered map of field
//! names to values, tagged with the kind of form it came from. Records
//! are handed to a [`Notifier`] for delivery; the page layer never knows
//! how delivery happens.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;

/// Which form produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Table reservation form.
    Table,
    /// Private event / catering enquiry form.
    Event,
    /// General contact form.
    Contact,
}

impl FormKind {
    /// Human-readable tag stored in the record's `booking_type` field.
    pub fn booking_type(&self) -> &'static str {
        match self {
            FormKind::Table => "Table Booking",
            FormKind::Event => "Event Booking",
            FormKind::Contact => "Contact",
        }
    }
}

/// A validated form submission, ready for delivery.
///
/// Serializes as a flat JSON object of field name to value, which is the
/// shape the relay's template substitution expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BookingRecord {
    fields: BTreeMap<String, String>,
}

impl BookingRecord {
    /// Create a record for the given form, pre-tagged with its
    /// `booking_type`.
    pub fn new(kind: FormKind) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("booking_type".to_string(), kind.booking_type().to_string());
        BookingRecord { fields }
    }

    /// Set a field value, replacing any previous value.
    pub fn set(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields, including the `booking_type` tag.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// A record always carries at least its `booking_type` tag.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Delivery backend for submitted records.
///
/// Implementations deliver to every configured destination and report a
/// single success or failure for the whole submission.
pub trait Notifier {
    /// Deliver a record. `Ok(())` only when every destination accepted it.
    fn notify(&self, record: &BookingRecord) -> Result<()>;
}
