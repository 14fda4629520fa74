use chrono::{DateTime, Local, Timelike};
use egui::Vec2;

use crate::models::aperture::{TimeDerivation, TimeToSend};
use crate::models::settings::Settings;
use crate::services::aperture::ApertureStore;
use crate::services::dispatch::{DispatchEvent, DispatchRequest, UpdateDispatcher};
use crate::ui_egui::alert::AlertDialogState;
use crate::ui_egui::drag::{DragDismissGesture, DragOutcome};
use crate::ui_egui::spring::SpringBack;
use crate::utils::date::with_time_of_day;

pub const NOTIFICATION_FAILED_MESSAGE: &str =
    "The notification failed, because the hour is not valid.";

/// Draft values of the 24-hour time picker popup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimePickerState {
    pub is_open: bool,
    pub hour: u32,
    pub minute: u32,
}

impl TimePickerState {
    pub fn open(&mut self, current: DateTime<Local>) {
        self.is_open = true;
        self.hour = current.hour();
        self.minute = current.minute();
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// The draft time applied to the date of `base`
    pub fn selection(&self, base: DateTime<Local>) -> Option<DateTime<Local>> {
        with_time_of_day(base, self.hour, self.minute)
    }
}

/// Controller state for the aperture-time modal.
///
/// The visibility flag and the aperture store belong to the parent and are
/// passed into each operation; everything here lives as long as the modal
/// stays mounted.
pub struct ApertureModalState {
    with_alert: bool,
    time_to_send: Option<TimeToSend>,
    derivation: TimeDerivation,
    picker: TimePickerState,
    gesture: DragDismissGesture,
    spring: SpringBack,
    alert: AlertDialogState,
}

impl ApertureModalState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            with_alert: false,
            time_to_send: None,
            derivation: settings.time_derivation,
            picker: TimePickerState::default(),
            gesture: DragDismissGesture::new(settings.dismiss_threshold),
            spring: SpringBack::default(),
            alert: AlertDialogState::new(),
        }
    }

    pub fn with_alert(&self) -> bool {
        self.with_alert
    }

    pub fn toggle_alert(&mut self) {
        self.with_alert = !self.with_alert;
    }

    pub fn time_to_send(&self) -> Option<TimeToSend> {
        self.time_to_send
    }

    pub fn picker(&self) -> &TimePickerState {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut TimePickerState {
        &mut self.picker
    }

    pub fn open_picker(&mut self, store: &ApertureStore) {
        self.picker.open(store.aperture_date());
    }

    pub fn gesture(&self) -> &DragDismissGesture {
        &self.gesture
    }

    pub fn alert(&self) -> &AlertDialogState {
        &self.alert
    }

    pub fn alert_mut(&mut self) -> &mut AlertDialogState {
        &mut self.alert
    }

    /// Picker callback. `None` means the picker was dismissed without a choice.
    pub fn on_time_changed(&mut self, selected: Option<DateTime<Local>>, store: &mut ApertureStore) {
        self.picker.close();

        let Some(selected) = selected else {
            log::debug!("Time picker closed without a selection");
            return;
        };

        let previous = store.aperture_date();
        store.set_aperture_date(selected);

        let time = self.derivation.derive(&previous, &selected);
        log::debug!(
            "Aperture time selected: {}, payload {:02}:{:02}",
            selected.format("%H:%M"),
            time.hour,
            time.minute
        );
        self.time_to_send = Some(time);
    }

    /// Send the chosen time and close the modal without waiting for the result
    pub fn confirm_update(
        &mut self,
        store: &ApertureStore,
        dispatcher: &UpdateDispatcher,
        open: &mut bool,
    ) {
        let aperture_date = store.aperture_date();
        let time = self
            .time_to_send
            .take()
            .unwrap_or_else(|| TimeToSend::from_moment(&aperture_date));

        log::info!(
            "Setting aperture time to {:02}:{:02} (reminder: {})",
            time.hour,
            time.minute,
            self.with_alert
        );

        dispatcher.dispatch(DispatchRequest {
            time,
            with_alert: self.with_alert,
            trigger: aperture_date,
        });

        self.close(open);
    }

    pub fn close(&mut self, open: &mut bool) {
        *open = false;
        self.on_hidden();
    }

    /// Clear transient interaction state once the modal is no longer shown
    pub fn on_hidden(&mut self) {
        self.picker.close();
        self.gesture.reset();
        self.spring.reset();
    }

    pub fn on_pointer_down(&mut self) {
        self.spring.reset();
        self.gesture.press();
    }

    /// Feed a per-frame vertical pointer delta
    pub fn on_pointer_move(&mut self, delta_y: f32, open: &mut bool) {
        if self.gesture.move_by(delta_y) == DragOutcome::Dismiss {
            log::debug!("Modal dragged past {} units, closing", self.gesture.threshold());
            self.close(open);
        }
    }

    pub fn on_pointer_release(&mut self) {
        if let DragOutcome::Released { dy } = self.gesture.release() {
            self.spring.start(Vec2::new(0.0, dy));
        }
    }

    /// Advance the spring-back animation; returns true while it is still moving
    pub fn tick(&mut self, dt: f32) -> bool {
        self.spring.tick(dt);
        !self.spring.is_settled()
    }

    /// Where the sheet is drawn relative to its rest position
    pub fn sheet_offset(&self) -> Vec2 {
        if self.gesture.is_dragging() {
            Vec2::new(0.0, self.gesture.offset().max(0.0))
        } else {
            let offset = self.spring.offset();
            Vec2::new(offset.x, offset.y.max(0.0))
        }
    }

    /// Handle outcomes reported by the dispatcher since the last frame
    pub fn poll_dispatch_events(&mut self, dispatcher: &UpdateDispatcher) {
        for event in dispatcher.drain_events() {
            self.apply_dispatch_event(event);
        }
    }

    pub fn apply_dispatch_event(&mut self, event: DispatchEvent) {
        // Update outcomes are already logged by the worker
        if let DispatchEvent::NotificationFailed(_) = event {
            self.alert.show(NOTIFICATION_FAILED_MESSAGE);
        }
    }
}
