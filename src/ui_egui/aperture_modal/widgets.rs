use egui::{Color32, RichText};

use super::state::TimePickerState;

/// Result of one frame of the time picker popup
pub enum TimePickerAction {
    None,
    /// User confirmed the draft hour and minute
    Done,
    /// User closed the picker without choosing
    Cancel,
}

/// Render the 24-hour hour/minute picker
pub fn render_time_picker(ui: &mut egui::Ui, picker: &mut TimePickerState) -> TimePickerAction {
    let mut action = TimePickerAction::None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_source("aperture_picker_hour")
                .width(60.0)
                .selected_text(format!("{:02}", picker.hour))
                .show_ui(ui, |ui| {
                    for h in 0..24 {
                        ui.selectable_value(&mut picker.hour, h, format!("{:02}", h));
                    }
                });

            ui.label(":");

            egui::ComboBox::from_id_source("aperture_picker_minute")
                .width(60.0)
                .selected_text(format!("{:02}", picker.minute))
                .show_ui(ui, |ui| {
                    for m in 0..60 {
                        ui.selectable_value(&mut picker.minute, m, format!("{:02}", m));
                    }
                });
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Done").clicked() {
                action = TimePickerAction::Done;
            }
            if ui.button("Cancel").clicked() {
                action = TimePickerAction::Cancel;
            }
        });
    });

    action
}

/// iOS-style on/off switch
pub fn toggle_switch(ui: &mut egui::Ui, on: bool) -> egui::Response {
    let desired_size = ui.spacing().interact_size.y * egui::vec2(2.0, 1.0);
    let (rect, mut response) = ui.allocate_exact_size(desired_size, egui::Sense::click());
    if response.clicked() {
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let how_on = ui.ctx().animate_bool(response.id, on);
        let visuals = ui.style().interact_selectable(&response, on);
        let rect = rect.expand(visuals.expansion);
        let radius = 0.5 * rect.height();
        let track = if on {
            Color32::from_rgb(92, 201, 140)
        } else {
            Color32::from_rgb(62, 62, 62)
        };
        ui.painter().rect(rect, radius, track, visuals.bg_stroke);

        let circle_x = egui::lerp((rect.left() + radius)..=(rect.right() - radius), how_on);
        let center = egui::pos2(circle_x, rect.center().y);
        ui.painter()
            .circle(center, 0.75 * radius, Color32::WHITE, visuals.fg_stroke);
    }

    response
}

/// Close button drawn as a circled cross
pub fn close_button(ui: &mut egui::Ui) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new("✖").size(22.0))
            .frame(false)
            .min_size(egui::vec2(32.0, 32.0)),
    )
    .on_hover_text("Close")
}
