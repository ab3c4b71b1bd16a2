// src/ui/upload.rs
use eframe::egui;

const DROP_ACTIVE_STROKE: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);
const DROP_ACTIVE_FILL: egui::Color32 = egui::Color32::from_rgb(238, 242, 255);

/// Draws the upload area. Returns true when the user asked to browse for a file.
pub fn show_upload_area(ui: &mut egui::Ui, status: &str, drop_active: bool, loading: bool) -> bool {
    let mut frame = egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(16.0));
    if drop_active {
        frame = frame
            .stroke(egui::Stroke::new(2.0, DROP_ACTIVE_STROKE))
            .fill(DROP_ACTIVE_FILL);
    }

    let mut browse = false;
    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            if ui.button("📂 Choose CSV file...").clicked() {
                browse = true;
            }
            ui.add_space(4.0);
            ui.label(status);
            if loading {
                ui.add_space(4.0);
                ui.spinner();
            }
        });
    });
    browse
}
