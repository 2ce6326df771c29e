use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::DashboardState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SundashApp {
    pub state: DashboardState,
    pub config: DashboardConfig,
}

impl SundashApp {
    pub fn new(state: DashboardState, config: DashboardConfig) -> Self {
        Self { state, config }
    }
}

impl eframe::App for SundashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: sliders ----
        let events = egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &self.state))
            .inner;
        for event in events {
            self.state.apply(event);
        }

        // ---- Bottom panel: solar imagery ----
        egui::TopBottomPanel::bottom("sun_images")
            .resizable(true)
            .show(ctx, |ui| {
                panels::sun_images(ui, &self.config);
            });

        // ---- Central panel: both charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let height = (ui.available_height() / 2.0 - 40.0).max(150.0);
            plot::chart_plot(ui, "sunspot_plot", self.state.sunspot_chart(), height);
            ui.separator();
            plot::chart_plot(ui, "cycle_plot", self.state.cycle_chart(), height);
        });
    }
}
