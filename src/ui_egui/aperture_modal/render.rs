//! Bottom-sheet rendering for the aperture-time modal.
//!
//! The sheet slides up from the bottom of the window and can be dragged down
//! to dismiss. Pointer events on the sheet feed the drag gesture; everything
//! else is plain widgets wired to [`ApertureModalState`].

use egui::{Color32, RichText};
use std::time::Duration;

use super::state::ApertureModalState;
use super::widgets::{close_button, render_time_picker, toggle_switch, TimePickerAction};
use crate::services::aperture::ApertureStore;
use crate::services::dispatch::UpdateDispatcher;
use crate::utils::date::format_time_of_day;

const SHEET_TOP_MARGIN: f32 = 218.0;
const SHEET_CORNER_RADIUS: f32 = 42.0;
const ACCENT: Color32 = Color32::from_rgb(92, 201, 140);
const SELECTED_TIME: Color32 = Color32::from_rgb(97, 188, 132);
const SECONDARY_TEXT: Color32 = Color32::from_rgb(69, 69, 69);
/// How often to poll for dispatch outcomes while a worker is still running
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Render the modal while `open` is true.
///
/// `open` belongs to the parent; the modal only ever clears it.
pub fn render_aperture_modal(
    ctx: &egui::Context,
    open: &mut bool,
    state: &mut ApertureModalState,
    store: &mut ApertureStore,
    dispatcher: &UpdateDispatcher,
) {
    state.poll_dispatch_events(dispatcher);
    state.alert_mut().render(ctx);
    if dispatcher.has_pending() {
        ctx.request_repaint_after(EVENT_POLL_INTERVAL);
    }

    if !*open {
        state.on_hidden();
        return;
    }

    let dt = ctx.input(|i| i.stable_dt);
    if state.tick(dt) {
        ctx.request_repaint();
    }

    let screen = ctx.screen_rect();
    let backdrop = egui::LayerId::new(egui::Order::Middle, egui::Id::new("aperture_modal_backdrop"));
    ctx.layer_painter(backdrop)
        .rect_filled(screen, 0.0, Color32::from_rgba_unmultiplied(135, 135, 135, 160));

    let offset = state.sheet_offset();
    let sheet_pos = egui::pos2(screen.left(), screen.top() + SHEET_TOP_MARGIN) + offset;
    let sheet_size = egui::vec2(
        screen.width(),
        (screen.height() - SHEET_TOP_MARGIN).max(0.0),
    );

    egui::Area::new(egui::Id::new("aperture_modal_sheet"))
        .order(egui::Order::Foreground)
        .fixed_pos(sheet_pos)
        .show(ctx, |ui| {
            let sheet_rect = egui::Rect::from_min_size(sheet_pos, sheet_size);
            ui.set_min_size(sheet_size);
            ui.painter().rect_filled(
                sheet_rect,
                egui::Rounding {
                    nw: SHEET_CORNER_RADIUS,
                    ne: SHEET_CORNER_RADIUS,
                    sw: 0.0,
                    se: 0.0,
                },
                Color32::WHITE,
            );

            // Registered before the content so widgets on top keep their clicks
            let drag = ui.interact(
                sheet_rect,
                ui.id().with("aperture_sheet_drag"),
                egui::Sense::drag(),
            );
            if drag.drag_started() {
                state.on_pointer_down();
            }
            if drag.dragged() {
                state.on_pointer_move(drag.drag_delta().y, open);
            }
            if drag.drag_stopped() {
                state.on_pointer_release();
            }
            if !*open {
                return;
            }

            let content_rect = sheet_rect
                .shrink2(egui::vec2(32.0, 0.0))
                .translate(egui::vec2(0.0, 24.0));
            ui.allocate_ui_at_rect(content_rect, |ui| {
                render_sheet_content(ui, open, state, store, dispatcher);
            });
        });
}

fn render_sheet_content(
    ui: &mut egui::Ui,
    open: &mut bool,
    state: &mut ApertureModalState,
    store: &mut ApertureStore,
    dispatcher: &UpdateDispatcher,
) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
        if close_button(ui).clicked() {
            state.close(open);
        }
    });
    if !*open {
        return;
    }

    ui.add_space(34.0);
    ui.label(RichText::new("⏰ Update aperture time!").size(34.0).strong());
    ui.add_space(28.0);

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.set_width(ui.available_width() * 0.7);
            ui.label(RichText::new("Select an aperture time:").size(19.0).strong());
            ui.label(
                RichText::new("Make click in the square to open the Hour Picker. 👆")
                    .size(14.0)
                    .color(Color32::GRAY),
            );
        });

        let time_label = store.aperture_date().format("%H:%M").to_string();
        let picker_open = state.picker().is_open;
        if ui
            .selectable_label(picker_open, RichText::new(time_label).size(20.0))
            .on_hover_text("Click to choose the hour")
            .clicked()
        {
            if picker_open {
                state.on_time_changed(None, store);
            } else {
                state.open_picker(store);
            }
        }
    });

    if state.picker().is_open {
        ui.add_space(8.0);
        match render_time_picker(ui, state.picker_mut()) {
            TimePickerAction::Done => {
                let selection = state.picker().selection(store.aperture_date());
                if selection.is_none() {
                    log::warn!("Selected time does not exist on this date, ignoring");
                }
                state.on_time_changed(selection, store);
            }
            TimePickerAction::Cancel => state.on_time_changed(None, store),
            TimePickerAction::None => {}
        }
    }

    ui.add_space(28.0);
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.set_width(ui.available_width() * 0.82);
            ui.label(
                RichText::new("Do you want to get a notification when the valve is open?")
                    .color(SECONDARY_TEXT),
            );
        });
        if toggle_switch(ui, state.with_alert()).changed() {
            state.toggle_alert();
        }
    });

    ui.add_space(32.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("The aperture time will be: ")
                .size(18.0)
                .strong()
                .color(SECONDARY_TEXT),
        );
        ui.label(
            RichText::new(format_time_of_day(&store.aperture_date()))
                .size(18.0)
                .strong()
                .color(SELECTED_TIME),
        );
    });

    ui.add_space(52.0);
    let set_hour = egui::Button::new(
        RichText::new("Set Hour")
            .size(18.0)
            .strong()
            .color(Color32::WHITE),
    )
    .fill(ACCENT)
    .rounding(32.0)
    .min_size(egui::vec2(ui.available_width(), 52.0));

    if ui.add(set_hour).clicked() {
        state.confirm_update(store, dispatcher, open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::aperture::TimeToSend;
    use crate::models::settings::Settings;
    use crate::services::notification::{
        validate_trigger, NotificationContent, NotificationError, NotificationScheduler,
    };
    use crate::services::valve_api::{ApertureUpdater, ValveApiError};
    use chrono::{DateTime, Local, TimeZone};
    use pretty_assertions::assert_eq;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Instant;

    const SCREEN: egui::Vec2 = egui::vec2(420.0, 860.0);
    const FRAME_DT: f32 = 1.0 / 60.0;
    const WARM_UP_FRAMES: usize = 3;
    /// Empty area of the sheet, below every widget
    const SHEET_GRAB_POINT: egui::Pos2 = egui::pos2(200.0, 800.0);

    #[derive(Default)]
    struct RecordingUpdater {
        calls: Mutex<Vec<TimeToSend>>,
        /// When set, each update waits for a message before answering
        gate: Option<Mutex<mpsc::Receiver<()>>>,
    }

    impl RecordingUpdater {
        fn gated() -> (Self, mpsc::Sender<()>) {
            let (tx, rx) = mpsc::channel();
            let updater = Self {
                gate: Some(Mutex::new(rx)),
                ..Self::default()
            };
            (updater, tx)
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl ApertureUpdater for RecordingUpdater {
        fn put_aperture_time(
            &self,
            time: &TimeToSend,
        ) -> Result<serde_json::Value, ValveApiError> {
            self.calls.lock().unwrap().push(*time);
            if let Some(gate) = &self.gate {
                let _ = gate.lock().unwrap().recv();
            }
            Ok(serde_json::json!({ "hour": time.hour, "minute": time.minute }))
        }
    }

    struct NoopScheduler;

    impl NotificationScheduler for NoopScheduler {
        fn schedule(
            &self,
            trigger: DateTime<Local>,
            _content: &NotificationContent,
        ) -> Result<(), NotificationError> {
            validate_trigger(trigger, Local::now())
        }
    }

    /// Headless egui context driving the modal one frame at a time
    struct ModalHarness {
        ctx: egui::Context,
        time: f64,
        open: bool,
        state: ApertureModalState,
        store: ApertureStore,
        dispatcher: UpdateDispatcher,
        updater: Arc<RecordingUpdater>,
        last_output: Option<egui::FullOutput>,
    }

    impl ModalHarness {
        fn new(open: bool) -> Self {
            Self::with_updater(open, RecordingUpdater::default())
        }

        fn with_updater(open: bool, updater: RecordingUpdater) -> Self {
            let settings = Settings::default();
            let updater = Arc::new(updater);
            let dispatcher = UpdateDispatcher::new(
                updater.clone(),
                Arc::new(NoopScheduler),
                NotificationContent::from_settings(&settings),
            );
            let aperture_date = Local
                .with_ymd_and_hms(2025, 6, 1, 6, 30, 0)
                .single()
                .unwrap();

            Self {
                ctx: egui::Context::default(),
                time: 0.0,
                open,
                state: ApertureModalState::new(&settings),
                store: ApertureStore::new(aperture_date),
                dispatcher,
                updater,
                last_output: None,
            }
        }

        fn frame(&mut self, events: Vec<egui::Event>) {
            self.time += f64::from(FRAME_DT);
            let input = egui::RawInput {
                screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, SCREEN)),
                time: Some(self.time),
                predicted_dt: FRAME_DT,
                events,
                ..Default::default()
            };
            let output = self.ctx.run(input, |ctx| {
                render_aperture_modal(
                    ctx,
                    &mut self.open,
                    &mut self.state,
                    &mut self.store,
                    &self.dispatcher,
                );
            });
            self.last_output = Some(output);
        }

        fn idle_frames(&mut self, count: usize) {
            for _ in 0..count {
                self.frame(Vec::new());
            }
        }

        fn press(&mut self, pos: egui::Pos2) {
            self.frame(vec![
                egui::Event::PointerMoved(pos),
                pointer_button(pos, true),
            ]);
        }

        fn move_to(&mut self, pos: egui::Pos2) {
            self.frame(vec![egui::Event::PointerMoved(pos)]);
        }

        fn release(&mut self, pos: egui::Pos2) {
            self.frame(vec![pointer_button(pos, false)]);
        }

        fn click(&mut self, pos: egui::Pos2) {
            self.press(pos);
            self.release(pos);
        }

        fn sheet_rect(&self) -> Option<egui::Rect> {
            self.ctx
                .memory(|mem| mem.area_rect(egui::Id::new("aperture_modal_sheet")))
        }

        /// Center of the last painted text equal to `text`
        fn text_center(&self, text: &str) -> Option<egui::Pos2> {
            let output = self.last_output.as_ref()?;
            output
                .shapes
                .iter()
                .find_map(|clipped| find_text(&clipped.shape, text))
        }

        fn repaint_delay(&self) -> Option<Duration> {
            let output = self.last_output.as_ref()?;
            output
                .viewport_output
                .get(&egui::ViewportId::ROOT)
                .map(|viewport| viewport.repaint_delay)
        }
    }

    fn pointer_button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn find_text(shape: &egui::Shape, text: &str) -> Option<egui::Pos2> {
        match shape {
            egui::Shape::Text(text_shape) if text_shape.galley.text() == text => Some(
                text_shape
                    .galley
                    .rect
                    .translate(text_shape.pos.to_vec2())
                    .center(),
            ),
            egui::Shape::Vec(shapes) => shapes.iter().find_map(|shape| find_text(shape, text)),
            _ => None,
        }
    }

    fn wait_for(done: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn test_hidden_modal_never_shows_sheet() {
        let mut harness = ModalHarness::new(false);
        harness.idle_frames(WARM_UP_FRAMES + 2);

        assert!(!harness.open);
        assert_eq!(harness.sheet_rect(), None);
        assert_eq!(harness.text_center("Set Hour"), None);
    }

    #[test]
    fn test_visible_modal_lays_out_sheet() {
        let mut harness = ModalHarness::new(true);
        harness.idle_frames(WARM_UP_FRAMES);

        let sheet = harness.sheet_rect().expect("sheet area laid out");
        assert!(sheet.width() > 0.0 && sheet.height() > 0.0);
        assert!(harness.text_center("Set Hour").is_some());
        assert!(harness.open);
    }

    #[test]
    fn test_drag_past_threshold_closes() {
        let mut harness = ModalHarness::new(true);
        harness.idle_frames(WARM_UP_FRAMES);
        harness.press(SHEET_GRAB_POINT);

        let mut closed_after = None;
        for step in 1..=80 {
            harness.move_to(SHEET_GRAB_POINT + egui::vec2(0.0, step as f32));
            if !harness.open {
                closed_after = Some(step);
                break;
            }
        }

        let closed_after = closed_after.expect("drag should dismiss the modal");
        assert!(closed_after > 50, "closed after only {} units", closed_after);
        assert_eq!(harness.state.sheet_offset(), egui::Vec2::ZERO);
    }

    #[test]
    fn test_short_drag_springs_back_and_stays_open() {
        let mut harness = ModalHarness::new(true);
        harness.idle_frames(WARM_UP_FRAMES);
        harness.press(SHEET_GRAB_POINT);

        let end = SHEET_GRAB_POINT + egui::vec2(0.0, 30.0);
        for step in 1..=30 {
            harness.move_to(SHEET_GRAB_POINT + egui::vec2(0.0, step as f32));
        }
        assert!(harness.open);
        assert!(harness.state.sheet_offset().y > 0.0, "sheet follows the pointer");

        harness.release(end);
        let mut frames = 0;
        while harness.state.sheet_offset() != egui::Vec2::ZERO && frames < 600 {
            harness.frame(Vec::new());
            frames += 1;
        }

        assert!(harness.open);
        assert_eq!(harness.state.sheet_offset(), egui::Vec2::ZERO);
        assert_eq!(harness.updater.call_count(), 0);
    }

    #[test]
    fn test_set_hour_sends_once_and_closes() {
        let mut harness = ModalHarness::new(true);
        harness.idle_frames(WARM_UP_FRAMES);
        let button = harness.text_center("Set Hour").expect("Set Hour painted");

        harness.click(button);

        assert!(!harness.open);
        assert!(wait_for(|| harness.updater.call_count() == 1));
        thread::sleep(Duration::from_millis(100));
        assert_eq!(
            *harness.updater.calls.lock().unwrap(),
            vec![TimeToSend { hour: 6, minute: 30 }]
        );
    }

    #[test]
    fn test_close_button_closes_without_sending() {
        let mut harness = ModalHarness::new(true);
        harness.idle_frames(WARM_UP_FRAMES);
        let close = harness.text_center("✖").expect("close button painted");

        harness.click(close);

        assert!(!harness.open);
        assert!(!harness.dispatcher.has_pending());
        assert_eq!(harness.updater.call_count(), 0);
    }

    #[test]
    fn test_polls_for_outcomes_only_while_pending() {
        let (updater, release) = RecordingUpdater::gated();
        let mut harness = ModalHarness::with_updater(false, updater);
        harness.idle_frames(WARM_UP_FRAMES + 2);
        let idle_delay = harness.repaint_delay().unwrap();
        assert!(idle_delay > EVENT_POLL_INTERVAL, "idle delay {:?}", idle_delay);

        let mut open = true;
        harness
            .state
            .confirm_update(&harness.store, &harness.dispatcher, &mut open);
        harness.frame(Vec::new());
        assert!(harness.repaint_delay().unwrap() <= EVENT_POLL_INTERVAL);

        release.send(()).unwrap();
        let mut frames = 0;
        while harness.dispatcher.has_pending() && frames < 500 {
            thread::sleep(Duration::from_millis(10));
            harness.frame(Vec::new());
            frames += 1;
        }
        assert!(!harness.dispatcher.has_pending());

        harness.idle_frames(2);
        assert!(harness.repaint_delay().unwrap() > EVENT_POLL_INTERVAL);
    }
}
