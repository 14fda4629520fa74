// Test fixtures - reusable test data
// Fakes for the valve API and notification collaborators plus sample moments

#![allow(dead_code)]

use aperture_time::models::aperture::TimeToSend;
use aperture_time::services::notification::{
    validate_trigger, NotificationContent, NotificationError, NotificationScheduler,
};
use aperture_time::services::valve_api::{ApertureUpdater, ValveApiError};
use chrono::{DateTime, Local, TimeZone};
use reqwest::StatusCode;
use std::sync::Mutex;

/// Sample moments for testing
pub mod moments {
    use super::*;

    /// Returns Jun 1, 2025 at 06:30 local time
    pub fn early_morning() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 6, 30, 0).single().unwrap()
    }

    /// Returns Jun 1, 2025 at 21:15 local time
    pub fn evening() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 21, 15, 0).single().unwrap()
    }
}

/// Records every PUT and answers with a fixed outcome
#[derive(Default)]
pub struct FakeUpdater {
    pub calls: Mutex<Vec<TimeToSend>>,
    pub fail_with_status: Option<StatusCode>,
}

impl FakeUpdater {
    pub fn failing(status: StatusCode) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ApertureUpdater for FakeUpdater {
    fn put_aperture_time(&self, time: &TimeToSend) -> Result<serde_json::Value, ValveApiError> {
        self.calls.lock().unwrap().push(*time);
        match self.fail_with_status {
            Some(status) => Err(ValveApiError::Status(status)),
            None => Ok(serde_json::json!({ "status": "ok" })),
        }
    }
}

/// Records every trigger and rejects the ones not in the future
#[derive(Default)]
pub struct FakeScheduler {
    pub triggers: Mutex<Vec<DateTime<Local>>>,
}

impl FakeScheduler {
    pub fn call_count(&self) -> usize {
        self.triggers.lock().unwrap().len()
    }
}

impl NotificationScheduler for FakeScheduler {
    fn schedule(
        &self,
        trigger: DateTime<Local>,
        _content: &NotificationContent,
    ) -> Result<(), NotificationError> {
        self.triggers.lock().unwrap().push(trigger);
        validate_trigger(trigger, Local::now())
    }
}
