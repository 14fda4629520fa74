use chrono::{DateTime, Local};
use notify_rust::{Notification, Timeout};
use std::thread;
use thiserror::Error;

use crate::models::settings::Settings;

/// Title, body and sound of a scheduled reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub sound: String,
}

impl NotificationContent {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            title: settings.notification_title.clone(),
            body: settings.notification_body.clone(),
            sound: settings.notification_sound.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Trigger {trigger} is not in the future")]
    TriggerNotInFuture { trigger: DateTime<Local> },
    #[error("Failed to start notification timer: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Schedules a local notification for a given moment.
pub trait NotificationScheduler: Send + Sync {
    fn schedule(
        &self,
        trigger: DateTime<Local>,
        content: &NotificationContent,
    ) -> Result<(), NotificationError>;
}

/// A trigger is accepted only if it lies strictly after `now`
pub fn validate_trigger(
    trigger: DateTime<Local>,
    now: DateTime<Local>,
) -> Result<(), NotificationError> {
    if trigger <= now {
        return Err(NotificationError::TriggerNotInFuture { trigger });
    }
    Ok(())
}

/// Desktop notifications shown through the system notification daemon.
///
/// Each scheduled notification waits on its own detached timer thread;
/// there is no way to cancel it once scheduled.
#[derive(Debug, Default)]
pub struct DesktopNotificationScheduler;

impl DesktopNotificationScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Show a notification immediately
    pub fn show(content: &NotificationContent) -> anyhow::Result<()> {
        Notification::new()
            .summary(&content.title)
            .body(&content.body)
            .sound_name(&content.sound)
            .timeout(Timeout::Milliseconds(10000))
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(())
    }
}

impl NotificationScheduler for DesktopNotificationScheduler {
    fn schedule(
        &self,
        trigger: DateTime<Local>,
        content: &NotificationContent,
    ) -> Result<(), NotificationError> {
        let now = Local::now();
        validate_trigger(trigger, now)?;

        let wait = (trigger - now)
            .to_std()
            .map_err(|_| NotificationError::TriggerNotInFuture { trigger })?;
        let content = content.clone();

        thread::Builder::new()
            .name("aperture-reminder".to_string())
            .spawn(move || {
                thread::sleep(wait);
                if let Err(e) = Self::show(&content) {
                    log::warn!("Failed to show scheduled notification: {}", e);
                }
            })?;

        Ok(())
    }
}
