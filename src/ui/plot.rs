use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::series_colors;
use crate::data::chart::{ChartSpec, SeriesKind};

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render one [`ChartSpec`] as an interactive plot of the given height.
pub fn chart_plot(ui: &mut Ui, id: &str, chart: &ChartSpec, height: f32) {
    ui.heading(chart.title.as_str());

    if chart.point_count() == 0 {
        ui.label("No observations in the selected range.");
    }

    let colors = series_colors(chart.series.len());

    Plot::new(id)
        .legend(Legend::default())
        .height(height)
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (series, &color) in chart.series.iter().zip(colors.iter()) {
                let points: PlotPoints = series.points.iter().copied().collect();
                match series.kind {
                    SeriesKind::Line => {
                        let line = Line::new(points)
                            .name(&series.name)
                            .color(color)
                            .width(1.5);
                        plot_ui.line(line);
                    }
                    SeriesKind::Scatter => {
                        let markers = Points::new(points)
                            .name(&series.name)
                            .color(color)
                            .radius(1.5);
                        plot_ui.points(markers);
                    }
                }
            }
        });
}
