use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, Screen};

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Left side panel – search and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut search = state.criteria.search_text.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut search)
            .hint_text("Search by transport type or year")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_search_text(search);
    }
    ui.add_space(6.0);

    let years = state.engine.distinct_years().to_vec();
    if let Some(year) = option_combo(
        ui,
        "year_filter",
        "Select Year",
        &years,
        &state.criteria.year_filter,
    ) {
        state.set_year_filter(year);
    }
    ui.add_space(6.0);

    let types = state.engine.distinct_transport_types().to_vec();
    if let Some(ty) = option_combo(
        ui,
        "transport_type_filter",
        "Select Transport Type",
        &types,
        &state.criteria.transport_type_filter,
    ) {
        state.set_transport_type_filter(ty);
    }

    ui.add_space(6.0);
    if !state.criteria.is_empty() && ui.button("Clear filters").clicked() {
        state.set_search_text(String::new());
        state.set_year_filter(String::new());
        state.set_transport_type_filter(String::new());
    }

    // ---- Legend ----
    if let Some(cm) = &state.color_map {
        ui.separator();
        ui.strong("Transport types");
        ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui: &mut Ui| {
                for (label, color) in cm.legend_entries() {
                    ui.label(RichText::new(format!("■ {label}")).color(color));
                }
            });
    }
}

/// A selector whose first entry is the empty "no constraint" option.
/// Returns the newly chosen value, if the user picked one.
fn option_combo(
    ui: &mut Ui,
    id: &str,
    placeholder: &str,
    options: &[String],
    current: &str,
) -> Option<String> {
    let mut chosen = None;
    let selected_text = if current.is_empty() { placeholder } else { current };
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_empty(), placeholder).clicked() {
                chosen = Some(String::new());
            }
            for opt in options {
                if ui.selectable_label(current == opt.as_str(), opt).clicked() {
                    chosen = Some(opt.clone());
                }
            }
        });
    chosen.filter(|c: &String| c.as_str() != current)
}

// ---------------------------------------------------------------------------
// Central panel – record list
// ---------------------------------------------------------------------------

struct Row {
    index: usize,
    transport_type: String,
    year: String,
    ridership: String,
    color: Color32,
}

/// Render the visible records; clicking a row opens its details.
pub fn record_list(ui: &mut Ui, state: &mut AppState) {
    if state.loading {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Loading ridership data…");
            });
        });
        return;
    }

    if state.engine.visible_len() == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.engine.dataset().is_empty() {
                ui.label("No records available.");
            } else {
                ui.label("No records match the current filters.");
            }
        });
        return;
    }

    let color_map = state.color_map.as_ref();
    let rows: Vec<Row> = state
        .engine
        .visible()
        .map(|(index, rec)| Row {
            index,
            transport_type: rec.display_transport_type().to_string(),
            year: rec.display_year().to_string(),
            ridership: rec.display_ridership(),
            color: color_map
                .map(|cm| cm.color_for(rec.transport_type.as_deref()))
                .unwrap_or(Color32::GRAY),
        })
        .collect();

    let mut clicked = None;
    TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(140.0))
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Transport");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Year");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Average ridership");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(&r.transport_type).color(r.color).strong());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.year);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.ridership);
                });
                if row.response().clicked() {
                    clicked = Some(r.index);
                }
            });
        });

    if let Some(index) = clicked {
        state.open_details(index);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with counts, navigation and errors.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Public Transport Tracker");
        ui.separator();

        if state.engine.is_loaded() {
            ui.label(format!(
                "{} records loaded, {} visible",
                state.engine.dataset().len(),
                state.engine.visible_len()
            ));
            ui.separator();
        }

        if state.screen == Screen::Home && ui.button("SG MRT Map").clicked() {
            state.open_map();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
