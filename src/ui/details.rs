use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::plot;

const WHY_IT_MATTERS: [&str; 5] = [
    "This dataset provides valuable insights into the ridership trends of various public transport modes in Singapore, including MRT, LRT, Bus, and Taxi, over the years.",
    "These insights are crucial for understanding public transport usage patterns, enabling the planning of future transportation infrastructure to meet the needs of a growing population in line with the Singapore Green Plan 2030.",
    "The data can help identify gaps in transport accessibility, guiding investments in sustainable and green transport solutions, aligning with the Green Plan's goal of increasing the share of public transport use.",
    "By tracking ridership in different transport modes, this information supports the goal of reducing carbon emissions and promoting sustainable mobility options for Singapore's residents.",
    "With the Green Plan 2030 focusing on sustainability, this data is instrumental in shaping policies to reduce reliance on private vehicles and improve the efficiency of public transport networks.",
];

/// Render the detail screen for the record at `index`.
pub fn details_screen(ui: &mut Ui, state: &mut AppState, index: usize) {
    let Some(record) = state.engine.record(index).cloned() else {
        state.go_home();
        return;
    };

    if ui.button("← Back").clicked() {
        state.go_home();
        return;
    }
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Transport Details");
    });
    ui.add_space(8.0);

    let color = state
        .color_map
        .as_ref()
        .map(|cm| cm.color_for(record.transport_type.as_deref()))
        .unwrap_or(Color32::GRAY);

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(
            RichText::new(record.display_transport_type())
                .size(24.0)
                .strong()
                .color(color),
        );
        ui.label(format!("Year: {}", record.display_year()));
        ui.label(format!("Average Ridership: {}", record.display_ridership()));
    });
    ui.add_space(8.0);

    if let Some(ty) = record.transport_type.as_deref() {
        ui.strong(format!("{ty} ridership by year"));
        plot::ridership_trend(ui, state.engine.dataset(), ty, record.year.as_deref(), color);
        ui.add_space(8.0);
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new("Why This Data Matters:").size(20.0).strong());
            ui.add_space(6.0);
            for paragraph in WHY_IT_MATTERS {
                ui.label(paragraph);
                ui.add_space(6.0);
            }
        });
}
