use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::data::model::RidershipDataset;

// ---------------------------------------------------------------------------
// Ridership trend (details screen)
// ---------------------------------------------------------------------------

/// `[year, average ridership]` for every record of `transport_type` where both
/// parse as numbers, sorted by year.
pub fn trend_points(dataset: &RidershipDataset, transport_type: &str) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = dataset
        .records()
        .iter()
        .filter(|r| r.transport_type.as_deref() == Some(transport_type))
        .filter_map(|r| {
            let year = r.year.as_deref()?.trim().parse::<f64>().ok()?;
            let ridership = r.average_ridership.as_ref()?.as_f64()?;
            Some([year, ridership])
        })
        .collect();
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    points
}

/// Plot ridership over the years for one transport type, marking `highlight_year`.
pub fn ridership_trend(
    ui: &mut Ui,
    dataset: &RidershipDataset,
    transport_type: &str,
    highlight_year: Option<&str>,
    color: Color32,
) {
    let points = trend_points(dataset, transport_type);
    if points.is_empty() {
        ui.label("No numeric ridership values for this transport type.");
        return;
    }

    let highlight: Vec<[f64; 2]> = highlight_year
        .and_then(|y| y.trim().parse::<f64>().ok())
        .map(|year| points.iter().copied().filter(|p| p[0] == year).collect())
        .unwrap_or_default();

    Plot::new("ridership_trend")
        .height(220.0)
        .x_axis_label("Year")
        .y_axis_label("Average ridership")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(transport_type)
                    .color(color)
                    .width(1.5),
            );
            plot_ui.points(Points::new(PlotPoints::from(points)).color(color).radius(2.5));
            if !highlight.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(highlight))
                        .color(Color32::RED)
                        .radius(5.0),
                );
            }
        });
}
