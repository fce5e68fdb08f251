pub mod config;
pub mod flow;
pub mod mqtt;
pub mod ui;

use crate::config::VisualizerDefaults;
use crate::mqtt::worker::MqttWorker;
use crate::ui::FlowVisualizerApp;
use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use tokio::sync::mpsc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let defaults = VisualizerDefaults::load().await;
    info!(
        "Connection defaults: broker '{}:{}', topic '{}'",
        defaults.broker, defaults.port, defaults.topic
    );

    // UI -> worker connect requests, worker -> UI lifecycle and messages
    let (connect_tx, connect_rx) = mpsc::channel(8);
    let (event_tx, event_rx) = mpsc::channel(100);

    let worker = MqttWorker::new(connect_rx, event_tx);
    let _worker_handle = tokio::spawn(worker.run());

    info!("Starting UI");
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default().with_inner_size([780.0, 720.0]);

    eframe::run_native(
        "MQTT Message Flow Visualizer",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(FlowVisualizerApp::new(
                cc, defaults, connect_tx, event_rx,
            )))
        }),
    )
    .map_err(|e| eyre!("UI terminated with error: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();
}
