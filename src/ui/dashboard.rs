// src/ui/dashboard.rs
use eframe::egui;
use std::collections::HashMap;

use crate::analysis::DateRange;
use crate::render::{
    Canvas, ChartInstance, ChartSpec, Kpi, RenderError, RenderTargets, SummaryField, TableRow,
};
use crate::ui::canvas::PlotCanvas;

const KPI_TILES: [(Kpi, &str); 3] = [
    (Kpi::TotalRevenue, "Total Revenue"),
    (Kpi::TotalTransactions, "Total Transactions"),
    (Kpi::AvgTransactionValue, "Avg. Transaction Value"),
];

/// Everything the render engine writes to, plus the filter inputs the user types into.
#[derive(Debug)]
pub struct DashboardView {
    kpis: HashMap<Kpi, String>,
    rows: Vec<TableRow>,
    peak_hours: PlotCanvas,
    trends: PlotCanvas,
    summary: Option<[SummaryField; 3]>,
    filter: DateRange,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            kpis: HashMap::new(),
            rows: Vec::new(),
            peak_hours: PlotCanvas::new(Canvas::PeakHours),
            trends: PlotCanvas::new(Canvas::Trends),
            summary: None,
            filter: DateRange::default(),
        }
    }

    fn canvas(&self, canvas: Canvas) -> &PlotCanvas {
        match canvas {
            Canvas::PeakHours => &self.peak_hours,
            Canvas::Trends => &self.trends,
        }
    }

    /// Date inputs and the apply button. Returns true when the button was clicked.
    pub fn show_filters(&mut self, ui: &mut egui::Ui) -> bool {
        let mut apply = false;
        ui.horizontal(|ui| {
            ui.label("Start date");
            ui.add(egui::TextEdit::singleline(&mut self.filter.start)
                .hint_text("YYYY-MM-DD")
                .desired_width(100.0));
            ui.label("End date");
            ui.add(egui::TextEdit::singleline(&mut self.filter.end)
                .hint_text("YYYY-MM-DD")
                .desired_width(100.0));
            if ui.button("Apply Filters").clicked() {
                apply = true;
            }
        });
        apply
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        // KPI tiles
        ui.columns(KPI_TILES.len(), |columns| {
            for (column, (kpi, title)) in columns.iter_mut().zip(KPI_TILES) {
                column.group(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(title);
                        let value = self.kpis.get(&kpi).map(String::as_str).unwrap_or("-");
                        ui.heading(egui::RichText::new(value).strong());
                    });
                });
            }
        });
        ui.add_space(8.0);

        ui.columns(2, |columns| {
            columns[0].group(|ui| {
                ui.heading("Peak Hours");
                self.peak_hours.show(ui);
            });
            columns[1].group(|ui| {
                ui.heading("Transaction Trends");
                self.trends.show(ui);
            });
        });
        ui.add_space(8.0);

        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Top Customers");
            egui::Grid::new("top-customers-table")
                .num_columns(3)
                .striped(true)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Customer");
                    ui.strong("Total Spent");
                    ui.strong("Visits");
                    ui.end_row();

                    for row in &self.rows {
                        ui.label(row.customer.as_str());
                        ui.label(row.total_spent.as_str());
                        ui.label(row.visits.as_str());
                        ui.end_row();
                    }
                });
        });

        if let Some(fields) = &self.summary {
            ui.add_space(8.0);
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.heading("Data Cleaning Summary");
                for field in fields {
                    ui.horizontal(|ui| {
                        ui.strong(format!("{}:", field.label));
                        ui.label(field.value.to_string());
                    });
                }
            });
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTargets for DashboardView {
    fn set_kpi(&mut self, kpi: Kpi, text: String) {
        self.kpis.insert(kpi, text);
    }

    fn clear_table(&mut self) {
        self.rows.clear();
    }

    fn append_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    fn create_chart(&mut self, canvas: Canvas, spec: ChartSpec) -> Result<Box<dyn ChartInstance>, RenderError> {
        let chart = self.canvas(canvas).bind(spec)?;
        Ok(Box::new(chart))
    }

    fn show_summary(&mut self, fields: [SummaryField; 3]) {
        self.summary = Some(fields);
    }

    fn hide_summary(&mut self) {
        self.summary = None;
    }

    fn filter_range(&self) -> DateRange {
        self.filter.clone()
    }

    fn set_filter_range(&mut self, range: DateRange) {
        self.filter = range;
    }
}
