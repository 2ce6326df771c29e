use std::process::ExitCode;

use eframe::egui;
use sundash::app::SundashApp;
use sundash::config::DashboardConfig;
use sundash::data::loader::DatasetCache;
use sundash::state::DashboardState;

fn main() -> ExitCode {
    env_logger::init();

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // No dashboard without data: a load failure aborts startup.
    let cache = DatasetCache::new(&config.data_path);
    let dataset = match cache.get() {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Cannot start dashboard: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = DashboardState::new(
        dataset,
        cache.path().display().to_string(),
        config.initial,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Sundash – Monitoring and Analyzing Solar Activity",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can fetch the solar imagery.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(SundashApp::new(state, config)))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("UI terminated with error: {e}");
            ExitCode::FAILURE
        }
    }
}
