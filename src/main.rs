// src/main.rs
use eframe::egui;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod analysis;
mod app;
mod config;
mod controller;
mod input;
mod render;
mod state;
mod transport;
mod ui;

#[cfg(test)]
mod test_utils;

use crate::app::DashboardApp;
use crate::config::DashboardConfig;
use crate::transport::HttpTransport;

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let config = DashboardConfig::load()?;
    init_tracing(&config.log_filter);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("analysis-transport")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let transport = Arc::new(
        HttpTransport::new(config.endpoint.clone()).context("Failed to build HTTP client")?,
    );
    tracing::info!(endpoint = transport.endpoint(), variant = ?config.variant, "starting sales dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_title("Sales Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |_cc| Box::new(DashboardApp::new(&config, runtime, transport))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
