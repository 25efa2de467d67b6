//! Booking and contact form flows.
//!
//! Each form runs the same pipeline: validate the raw fields, build a
//! tagged record, hand it to the notifier, and show a banner with the
//! outcome. Success banners auto-hide; error banners stay until
//! dismissed or the next attempt. On delivery failure the inputs keep
//! their values so nothing the visitor typed is lost.

use yafe_types::record::{BookingRecord, FormKind, Notifier};

/// Where a form currently is in its flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Idle,
    /// Delivered; success banner showing since this timestamp.
    Success { shown_at: u64 },
    /// Validation or delivery failed; banner shows this message.
    Error { message: String },
}

/// Banner message for incomplete submissions.
const VALIDATION_MESSAGE: &str = "Please fill in all required fields.";

/// Look up a submitted field by name.
fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// Validate raw submitted fields and build the delivery record.
///
/// Every field must be non-blank after trimming. The event form is
/// special-cased: `event_type` of `"other"` substitutes the
/// `custom_event` text (then required); any other selection drops
/// `custom_event` entirely. Both resolve to a single `event` field on
/// the record.
pub fn validate(
    kind: FormKind,
    fields: &[(String, String)],
) -> std::result::Result<BookingRecord, String> {
    let mut record = BookingRecord::new(kind);

    if kind == FormKind::Event {
        let event_type = field(fields, "event_type").unwrap_or("").trim();
        if event_type.is_empty() {
            return Err(VALIDATION_MESSAGE.to_string());
        }
        if event_type == "other" {
            let custom = field(fields, "custom_event").unwrap_or("").trim();
            if custom.is_empty() {
                return Err(VALIDATION_MESSAGE.to_string());
            }
            record.set("event", custom);
        } else {
            record.set("event", event_type);
        }
    }

    for (name, value) in fields {
        if name == "event_type" || name == "custom_event" {
            continue;
        }
        let value = value.trim();
        if value.is_empty() {
            return Err(VALIDATION_MESSAGE.to_string());
        }
        record.set(name, value);
    }

    Ok(record)
}

/// One form's state machine.
#[derive(Debug)]
pub struct FormFlow {
    kind: FormKind,
    phase: FormPhase,
    banner_hide_ms: u64,
}

impl FormFlow {
    pub fn new(kind: FormKind, banner_hide_ms: u64) -> Self {
        FormFlow {
            kind,
            phase: FormPhase::Idle,
            banner_hide_ms,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Run a submission end to end. Returns true when the record was
    /// delivered (the caller then clears the form). On any failure the
    /// fields must be left as typed.
    pub fn submit(
        &mut self,
        fields: &[(String, String)],
        notifier: &dyn Notifier,
        now_ms: u64,
        fallback_phone: &str,
    ) -> bool {
        let record = match validate(self.kind, fields) {
            Ok(record) => record,
            Err(message) => {
                self.phase = FormPhase::Error { message };
                return false;
            },
        };

        match notifier.notify(&record) {
            Ok(()) => {
                self.phase = FormPhase::Success { shown_at: now_ms };
                true
            },
            Err(err) => {
                log::warn!("{} delivery failed: {err}", self.kind.booking_type());
                self.phase = FormPhase::Error {
                    message: format!(
                        "We couldn't send your request. Please call us at {fallback_phone}.",
                    ),
                };
                false
            },
        }
    }

    /// Auto-hide an aged-out success banner. Error banners stay.
    /// Returns true when the banner hid on this call.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if let FormPhase::Success { shown_at } = self.phase
            && now_ms >= shown_at + self.banner_hide_ms
        {
            self.phase = FormPhase::Idle;
            return true;
        }
        false
    }

    /// Close whatever banner is showing.
    pub fn dismiss(&mut self) {
        self.phase = FormPhase::Idle;
    }
}

/// Event-type dropdown state: selecting "other" reveals the free-text
/// event field, which is then required.
#[derive(Debug, Default)]
pub struct EventTypeField {
    selection: String,
}

impl EventTypeField {
    pub fn select(&mut self, value: &str) {
        self.selection = value.to_string();
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    /// Whether the custom event input shows (and is required).
    pub fn custom_visible(&self) -> bool {
        self.selection == "other"
    }
}
