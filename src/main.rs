#![windows_subsystem = "windows"]
//! Eagle Folder Browser - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod config;
mod constants;
mod error;
mod state;
mod theme;
mod tree;
mod types;
mod ui;

use app::App;
use config::ApiConfig;
use constants::*;
use eframe::egui;
use error::AppError;
use std::path::PathBuf;
use tracing::{error, info};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "eagle-folder-browser.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,eagle_folder_browser=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> Result<(), AppError> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME);

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "{} starting", APP_NAME);

    let config = ApiConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1200.0, 800.0))
        .with_min_inner_size([640.0, 480.0])
        .with_title(APP_NAME);

    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, config, runtime)))),
    )
    .map_err(|e| {
        error!(error = %e, "Window closed with an error");
        AppError::from(e)
    })
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Fetch the folder tree on the first frame
        if !self.initial_load_started {
            self.initial_load_started = true;
            self.load_folders(ctx);
        }

        // Apply results from background fetches
        self.poll_events(ctx);

        // Left panel - folder tree (must be added BEFORE CentralPanel)
        egui::SidePanel::left("folder_panel")
            .default_width(theme::SIDEBAR_WIDTH)
            .min_width(theme::SIDEBAR_MIN_WIDTH)
            .resizable(true)
            .frame(theme::sidebar_frame())
            .show(ctx, |ui| {
                self.render_folder_panel(ui, ctx);
            });

        egui::CentralPanel::default()
            .frame(theme::central_frame())
            .show(ctx, |ui| {
                self.render_items(ui, ctx);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
    }
}
