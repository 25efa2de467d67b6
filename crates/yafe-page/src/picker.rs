//! Booking date and time picker setup.
//!
//! The booking forms carry date inputs that should open an enhanced
//! picker when one is available, bounded to future dates and service
//! hours. Without one, the inputs fall back to native date fields with
//! a `min` attribute. Per-input attach failures are logged and skipped;
//! a broken picker must never take the form down with it.

use yafe_types::config::PickerSection;
use yafe_types::error::Result;

/// Everything a picker needs to configure one input.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerPlan {
    /// Earliest selectable date (today), ISO `YYYY-MM-DD`.
    pub min_date: String,
    /// Earliest selectable time of day, `HH:MM`.
    pub open_time: String,
    /// Latest selectable time of day, `HH:MM`.
    pub close_time: String,
    /// Display format for the picked date.
    pub date_format: String,
}

/// An enhanced picker the host may provide.
pub trait DatePicker {
    /// Attach the picker to one input element.
    fn attach(&mut self, input_id: &str, plan: &PickerPlan) -> Result<()>;
}

/// What the setup pass did.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerSetup {
    /// Enhanced picker attached to these inputs.
    Attached { inputs: Vec<String> },
    /// No picker available. Inputs stay native date fields and should
    /// carry this `min` attribute.
    NativeFallback { min_date: String },
}

/// Build the per-input plan from config and today's date.
pub fn plan(config: &PickerSection, today: (u32, u32, u32)) -> PickerPlan {
    PickerPlan {
        min_date: iso_date(today),
        open_time: config.open_time.clone(),
        close_time: config.close_time.clone(),
        date_format: config.date_format.clone(),
    }
}

/// Attach the picker (when present) to every date input.
pub fn setup(
    picker: Option<&mut dyn DatePicker>,
    input_ids: &[&str],
    config: &PickerSection,
    today: (u32, u32, u32),
) -> PickerSetup {
    let plan = plan(config, today);
    let Some(picker) = picker else {
        return PickerSetup::NativeFallback {
            min_date: plan.min_date,
        };
    };

    let mut attached = Vec::new();
    for id in input_ids {
        match picker.attach(id, &plan) {
            Ok(()) => attached.push(id.to_string()),
            Err(err) => log::warn!("date picker skipped input {id}: {err}"),
        }
    }
    PickerSetup::Attached { inputs: attached }
}

fn iso_date((year, month, day): (u32, u32, u32)) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use yafe_types::error::YafeError;

    struct RecordingPicker {
        attached: Vec<String>,
    }

    impl DatePicker for RecordingPicker {
        fn attach(&mut self, input_id: &str, _plan: &PickerPlan) -> Result<()> {
            self.attached.push(input_id.to_string());
            Ok(())
        }
    }

    /// Fails for one specific input id.
    struct FlakyPicker {
        bad_id: &'static str,
    }

    impl DatePicker for FlakyPicker {
        fn attach(&mut self, input_id: &str, _plan: &PickerPlan) -> Result<()> {
            if input_id == self.bad_id {
                Err(YafeError::Form("picker init failed".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn plan_carries_service_hours_and_today() {
        let plan = plan(&PickerSection::default(), (2025, 6, 1));
        assert_eq!(plan.min_date, "2025-06-01");
        assert_eq!(plan.open_time, "12:00");
        assert_eq!(plan.close_time, "22:00");
    }

    #[test]
    fn iso_date_zero_pads() {
        assert_eq!(iso_date((2026, 1, 9)), "2026-01-09");
        assert_eq!(iso_date((999, 12, 31)), "0999-12-31");
    }

    #[test]
    fn attaches_every_input() {
        let mut picker = RecordingPicker { attached: vec![] };
        let setup = setup(
            Some(&mut picker),
            &["table-date", "event-date"],
            &PickerSection::default(),
            (2025, 6, 1),
        );
        assert_eq!(
            setup,
            PickerSetup::Attached {
                inputs: vec!["table-date".to_string(), "event-date".to_string()],
            },
        );
        assert_eq!(picker.attached.len(), 2);
    }

    #[test]
    fn failed_input_is_skipped_not_fatal() {
        let mut picker = FlakyPicker { bad_id: "table-date" };
        let setup = setup(
            Some(&mut picker),
            &["table-date", "event-date"],
            &PickerSection::default(),
            (2025, 6, 1),
        );
        assert_eq!(
            setup,
            PickerSetup::Attached {
                inputs: vec!["event-date".to_string()],
            },
        );
    }

    #[test]
    fn no_picker_falls_back_to_native_min() {
        let setup = setup(
            None,
            &["table-date"],
            &PickerSection::default(),
            (2025, 12, 3),
        );
        assert_eq!(
            setup,
            PickerSetup::NativeFallback {
                min_date: "2025-12-03".to_string(),
            },
        );
    }
}
