//! Fire-and-forget dispatch of aperture-time updates.
//!
//! The HTTP update and the optional reminder each run on a detached worker
//! thread. Neither is joined: the caller closes the modal right away and
//! picks up the outcomes later through [`UpdateDispatcher::drain_events`].

use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::models::aperture::TimeToSend;
use crate::services::notification::{NotificationContent, NotificationScheduler};
use crate::services::valve_api::ApertureUpdater;

/// What a single confirmation asks the dispatcher to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRequest {
    pub time: TimeToSend,
    pub with_alert: bool,
    pub trigger: DateTime<Local>,
}

/// Outcome reported back from a worker thread
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    UpdateSucceeded(serde_json::Value),
    UpdateFailed(String),
    NotificationScheduled(DateTime<Local>),
    NotificationFailed(String),
}

pub struct UpdateDispatcher {
    updater: Arc<dyn ApertureUpdater>,
    scheduler: Arc<dyn NotificationScheduler>,
    content: NotificationContent,
    events_tx: Sender<DispatchEvent>,
    events_rx: Receiver<DispatchEvent>,
    /// Outcomes started but not yet picked up by the caller
    outstanding: AtomicUsize,
}

impl UpdateDispatcher {
    pub fn new(
        updater: Arc<dyn ApertureUpdater>,
        scheduler: Arc<dyn NotificationScheduler>,
        content: NotificationContent,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            updater,
            scheduler,
            content,
            events_tx,
            events_rx,
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Start the update (and reminder, if requested) without waiting for either
    pub fn dispatch(&self, request: DispatchRequest) {
        self.spawn_update(request.time);

        if request.with_alert {
            self.spawn_reminder(request.trigger);
        }
    }

    fn spawn_update(&self, time: TimeToSend) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        let updater = Arc::clone(&self.updater);
        let tx = self.events_tx.clone();

        let spawned = thread::Builder::new()
            .name("aperture-update".to_string())
            .spawn(move || {
                let event = match updater.put_aperture_time(&time) {
                    Ok(response) => {
                        log::info!("Update response: {}", response);
                        DispatchEvent::UpdateSucceeded(response)
                    }
                    Err(err) => {
                        log::error!(
                            "Failed to update aperture time to {:02}:{:02}: {}",
                            time.hour,
                            time.minute,
                            err
                        );
                        DispatchEvent::UpdateFailed(err.to_string())
                    }
                };
                let _ = tx.send(event);
            });

        if let Err(err) = spawned {
            log::error!("Failed to start aperture update worker: {}", err);
            let _ = self.events_tx.send(DispatchEvent::UpdateFailed(err.to_string()));
        }
    }

    fn spawn_reminder(&self, trigger: DateTime<Local>) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        let scheduler = Arc::clone(&self.scheduler);
        let content = self.content.clone();
        let tx = self.events_tx.clone();

        let spawned = thread::Builder::new()
            .name("aperture-schedule".to_string())
            .spawn(move || {
                let event = match scheduler.schedule(trigger, &content) {
                    Ok(()) => {
                        log::info!("Notification was scheduled for {}", trigger);
                        DispatchEvent::NotificationScheduled(trigger)
                    }
                    Err(err) => {
                        log::warn!("Failed to schedule notification: {}", err);
                        DispatchEvent::NotificationFailed(err.to_string())
                    }
                };
                let _ = tx.send(event);
            });

        if let Err(err) = spawned {
            log::warn!("Failed to start notification worker: {}", err);
            let _ = self
                .events_tx
                .send(DispatchEvent::NotificationFailed(err.to_string()));
        }
    }

    /// Outcomes that arrived since the last call, without blocking
    pub fn drain_events(&self) -> Vec<DispatchEvent> {
        let events: Vec<DispatchEvent> = self.events_rx.try_iter().collect();
        self.mark_received(events.len());
        events
    }

    /// Wait up to `timeout` for the next outcome
    pub fn recv_event_timeout(&self, timeout: Duration) -> Option<DispatchEvent> {
        match self.events_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.mark_received(1);
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// True while some worker's outcome has not been received yet
    pub fn has_pending(&self) -> bool {
        self.outstanding.load(Ordering::SeqCst) > 0
    }

    fn mark_received(&self, count: usize) {
        if count == 0 {
            return;
        }
        let _ = self
            .outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_sub(count))
            });
    }
}
