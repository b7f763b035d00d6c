use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

pub const MRT_MAP_URL: &str = "https://mrtmapsingapore.com/";

/// Render the map screen: a framed placeholder and a link to the full map.
pub fn map_screen(ui: &mut Ui, state: &mut AppState) {
    if ui.button("← Back").clicked() {
        state.go_home();
        return;
    }

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("SG MRT Map");
        ui.add_space(12.0);

        let width = ui.available_width().min(720.0);
        egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
            ui.set_width(width);
            ui.set_height(width / 1.5);
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new("Singapore MRT & LRT network").weak());
            });
        });
        ui.add_space(12.0);

        ui.hyperlink_to("View Full MRT System Map", MRT_MAP_URL);
    });
}
