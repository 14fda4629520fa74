//! Blocking alert dialog.
//!
//! Shows a single message with an OK button. While open, the host screen
//! disables its own controls so the user has to acknowledge it first.

use egui::{Context, RichText};

#[derive(Debug, Default)]
pub struct AlertDialogState {
    message: Option<String>,
}

impl AlertDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn render(&mut self, ctx: &Context) {
        let Some(message) = self.message.clone() else {
            return;
        };

        // Below windows, above the host panels
        let backdrop = egui::LayerId::new(
            egui::Order::PanelResizeLine,
            egui::Id::new("alert_backdrop"),
        );
        ctx.layer_painter(backdrop)
            .rect_filled(ctx.screen_rect(), 0.0, egui::Color32::from_black_alpha(100));

        let mut should_close = false;

        egui::Window::new("Alert")
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(260.0);
                ui.set_max_width(340.0);

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("⚠")
                            .size(24.0)
                            .color(egui::Color32::from_rgb(220, 150, 50)),
                    );
                    ui.vertical(|ui| {
                        ui.label(message.as_str());
                    });
                });
                ui.add_space(15.0);
                ui.separator();

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
            should_close = true;
        }

        if should_close {
            self.dismiss();
        }
    }
}
