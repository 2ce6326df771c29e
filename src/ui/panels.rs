use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::config::DashboardConfig;
use crate::data::chart::ChartSpec;
use crate::data::loader::load_file;
use crate::state::{ControlEvent, DashboardState, CYCLE_DOMAIN, WINDOW_DOMAIN, YEAR_DOMAIN, YEAR_STEP};

// ---------------------------------------------------------------------------
// Left side panel – control sliders
// ---------------------------------------------------------------------------

/// Render the slider panel and return the control changes made this frame.
///
/// Every slider that changed yields exactly one event.
pub fn side_panel(ui: &mut Ui, state: &DashboardState) -> Vec<ControlEvent> {
    let mut events = Vec::new();
    let controls = state.controls();

    ui.heading("Controls");
    ui.separator();

    ui.strong("Which years?");
    let (mut begin, mut end) = controls.year_range;
    let begin_changed = ui
        .add(
            Slider::new(&mut begin, YEAR_DOMAIN)
                .step_by(YEAR_STEP as f64)
                .text("from"),
        )
        .changed();
    let end_changed = ui
        .add(
            Slider::new(&mut end, YEAR_DOMAIN)
                .step_by(YEAR_STEP as f64)
                .text("until"),
        )
        .changed();
    if begin_changed || end_changed {
        events.push(ControlEvent::YearRange(begin, end));
    }
    ui.add_space(8.0);

    ui.strong("How smooth?");
    let mut window = controls.smoothing_window;
    if ui
        .add(Slider::new(&mut window, WINDOW_DOMAIN).text("months"))
        .changed()
    {
        events.push(ControlEvent::SmoothingWindow(window));
    }
    ui.add_space(8.0);

    ui.strong("How many years for one cycle?");
    let mut cycle = controls.cycle_years;
    if ui
        .add(Slider::new(&mut cycle, CYCLE_DOMAIN).text("years"))
        .changed()
    {
        events.push(ControlEvent::CycleLength(cycle));
    }

    events
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export sunspot chart…").clicked() {
                let chart = state.sunspot_chart().clone();
                export_dialog(state, &chart, "sunspot_chart.json");
                ui.close_menu();
            }
            if ui.button("Export cycle chart…").clicked() {
                let chart = state.cycle_chart().clone();
                export_dialog(state, &chart, "cycle_chart.json");
                ui.close_menu();
            }
        });

        ui.separator();

        let ds = state.dataset();
        match ds.year_bounds() {
            Some((first, last)) => ui.label(format!(
                "{}: {} months ({first}–{last}), {} missing",
                state.source_label,
                ds.len(),
                ds.missing_count()
            )),
            None => ui.label(format!("{}: empty dataset", state.source_label)),
        };

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – live solar imagery
// ---------------------------------------------------------------------------

/// Show the configured images of the Sun side by side.
pub fn sun_images(ui: &mut Ui, config: &DashboardConfig) {
    ui.horizontal(|ui: &mut Ui| {
        let width = ui.available_width() * 0.2;
        ui.vertical(|ui: &mut Ui| {
            ui.label("Current Real Image of the Sun");
            ui.add(egui::Image::new(config.sun_image_url.as_str()).max_width(width));
        });
        ui.vertical(|ui: &mut Ui| {
            ui.label("A 360 Degree View of the Sun");
            ui.add(egui::Image::new(config.sun_animation_url.as_str()).max_width(width));
        });
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sunspot data")
        .add_filter("Semicolon-separated", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path);
    }
}

/// Load `path` and bind it; on failure the current dataset stays.
pub fn open_path(state: &mut DashboardState, path: &Path) {
    match load_file(path) {
        Ok(dataset) => {
            state.replace_dataset(Arc::new(dataset), path.display().to_string());
        }
        Err(e) => {
            log::error!("Failed to load file: {e}");
            state.report_error(format!("Error: {e}"));
        }
    }
}

fn export_dialog(state: &mut DashboardState, chart: &ChartSpec, default_name: &str) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name(default_name)
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match export_chart(chart, &path) {
            Ok(()) => {
                log::info!("Exported '{}' to {}", chart.title, path.display());
                state.clear_status();
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.report_error(format!("Error: {e:#}"));
            }
        }
    }
}

/// Write a chart as pretty-printed JSON.
pub fn export_chart(chart: &ChartSpec, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), chart)
        .context("writing chart JSON")?;
    Ok(())
}
