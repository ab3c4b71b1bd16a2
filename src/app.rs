// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::analysis::PickedFile;
use crate::config::DashboardConfig;
use crate::controller::Controller;
use crate::input::command::{ApplyFiltersCommand, Command, DismissAlertCommand};
use crate::input::{DropZone, InputHandler};
use crate::render::RenderOptions;
use crate::transport::AnalysisTransport;
use crate::ui::upload::show_upload_area;
use crate::ui::DashboardView;

const LOADING_REPAINT: Duration = Duration::from_millis(100);

pub struct DashboardApp {
    controller: Controller,
    view: DashboardView,
    input: InputHandler,
    drop_zone: DropZone,
    // Keeps the worker threads alive for as long as the window is open.
    _runtime: Runtime,
}

impl DashboardApp {
    pub fn new(config: &DashboardConfig, runtime: Runtime, transport: Arc<dyn AnalysisTransport>) -> Self {
        let options = RenderOptions {
            currency_symbol: config.currency_symbol.clone(),
            variant: config.variant,
        };
        Self {
            controller: Controller::new(transport, runtime.handle().clone(), options),
            view: DashboardView::new(),
            input: InputHandler::new(),
            drop_zone: DropZone::new(),
            _runtime: runtime,
        }
    }

    fn run(&mut self, command: Box<dyn Command>) {
        if let Err(e) = command.execute(&mut self.controller, &mut self.view) {
            self.controller.state.raise_alert(e.to_string());
        }
    }

    fn select_files(&mut self, files: Vec<PickedFile>) {
        if let Some(command) = self.input.select_files(files) {
            self.run(command);
        }
    }

    fn browse_for_file(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_title("Open Sales Data");

        if let Some(path) = file_dialog.pick_file() {
            match PickedFile::from_path(&path) {
                Ok(file) => self.select_files(vec![file]),
                Err(e) => self.controller.state.raise_alert(format!("{:#}", e)),
            }
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone()));

        let mut files = Vec::new();
        for file in &dropped {
            match PickedFile::from_dropped(file) {
                Ok(file) => files.push(file),
                Err(e) => tracing::warn!(error = %e, "could not read dropped file"),
            }
        }

        for event in self.drop_zone.events_for_frame(hovering, files) {
            let files = self.drop_zone.handle(event);
            if !files.is_empty() {
                self.select_files(files);
            }
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open CSV...").clicked() {
                    ui.close_menu();
                    self.browse_for_file();
                }
                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll(&mut self.view);
        self.handle_drag_and_drop(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let browse = show_upload_area(
                ui,
                &self.controller.state.status,
                self.drop_zone.is_active(),
                self.controller.is_loading(),
            );
            if browse {
                self.browse_for_file();
            }

            if self.controller.options().variant.has_filters() {
                ui.add_space(8.0);
                if self.view.show_filters(ui) {
                    self.run(Box::new(ApplyFiltersCommand));
                }
            }

            if self.controller.state.dashboard_visible {
                ui.add_space(8.0);
                egui::ScrollArea::vertical()
                    .id_source("dashboard_scroll")
                    .show(ui, |ui| self.view.show(ui));
            }
        });

        // Show alert modal if needed
        let alert = self.controller.state.alert.clone();
        if let Some(message) = alert {
            egui::Window::new("Alert")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(&message);
                    if ui.button("OK").clicked() {
                        self.run(Box::new(DismissAlertCommand));
                    }
                });
        }

        if self.controller.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT);
        }
    }
}
