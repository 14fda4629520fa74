// Aperture module
// Payload sent to the valve API and how it is derived from the picker

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

/// Time-of-day the valve should open, as accepted by the valve API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeToSend {
    pub hour: u32,
    pub minute: u32,
}

impl TimeToSend {
    /// Extract hour and minute from a moment in local time
    pub fn from_moment(moment: &DateTime<Local>) -> Self {
        Self {
            hour: moment.hour(),
            minute: moment.minute(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Which value the payload is derived from when the picker reports a selection.
///
/// `Previous` reads the store before the new selection is written, so the
/// payload lags one selection behind the displayed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeDerivation {
    #[default]
    Selected,
    Previous,
}

impl TimeDerivation {
    pub fn derive(
        &self,
        previous: &DateTime<Local>,
        selected: &DateTime<Local>,
    ) -> TimeToSend {
        match self {
            TimeDerivation::Selected => TimeToSend::from_moment(selected),
            TimeDerivation::Previous => TimeToSend::from_moment(previous),
        }
    }
}
