use std::sync::Arc;

use anyhow::Result;
use egui::RichText;

use crate::models::settings::Settings;
use crate::services::aperture::ApertureStore;
use crate::services::dispatch::UpdateDispatcher;
use crate::services::notification::{DesktopNotificationScheduler, NotificationContent};
use crate::services::valve_api::ValveApiClient;
use crate::ui_egui::aperture_modal::{render_aperture_modal, ApertureModalState};
use crate::utils::date::format_time_of_day;

/// Parent screen: owns the aperture store and the modal's visibility flag
pub struct ApertureApp {
    store: ApertureStore,
    dispatcher: UpdateDispatcher,
    modal_state: ApertureModalState,
    show_aperture_modal: bool,
    endpoint: String,
}

impl ApertureApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Result<Self> {
        let client = ValveApiClient::new(&settings)?;
        let endpoint = client.endpoint().to_string();
        log::info!("Valve API endpoint: {}", endpoint);

        let dispatcher = UpdateDispatcher::new(
            Arc::new(client),
            Arc::new(DesktopNotificationScheduler::new()),
            NotificationContent::from_settings(&settings),
        );

        let mut store = ApertureStore::default();
        store.subscribe(Box::new(|date| {
            log::info!("Aperture date changed to {}", date.format("%Y-%m-%d %H:%M"));
        }));

        Ok(Self {
            store,
            dispatcher,
            modal_state: ApertureModalState::new(&settings),
            show_aperture_modal: false,
            endpoint,
        })
    }
}

impl eframe::App for ApertureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let blocked = self.modal_state.alert().is_open();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(24.0);
            ui.heading("Vertical garden valve");
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.label("Current aperture time:");
                ui.label(
                    RichText::new(format_time_of_day(&self.store.aperture_date())).strong(),
                );
            });
            ui.label(RichText::new(&self.endpoint).small().weak());
            ui.add_space(16.0);

            let open_button = egui::Button::new("⏰ Update aperture time");
            if ui
                .add_enabled(!blocked && !self.show_aperture_modal, open_button)
                .clicked()
            {
                self.show_aperture_modal = true;
            }
        });

        render_aperture_modal(
            ctx,
            &mut self.show_aperture_modal,
            &mut self.modal_state,
            &mut self.store,
            &self.dispatcher,
        );
    }
}
