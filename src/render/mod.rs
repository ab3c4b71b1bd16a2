// src/render/mod.rs
use thiserror::Error;

use crate::analysis::{AnalysisResponse, CleaningSummary, DateRange};
use crate::config::Variant;

pub mod chart;
pub mod dates;
pub mod format;

pub use chart::{Canvas, ChartInstance, ChartKind, ChartSpec, Rgba};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kpi {
    TotalRevenue,
    TotalTransactions,
    AvgTransactionValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub customer: String,
    pub total_spent: String,
    pub visits: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryField {
    pub label: &'static str,
    pub value: u64,
}

impl SummaryField {
    fn from_summary(summary: &CleaningSummary) -> [SummaryField; 3] {
        [
            SummaryField { label: "Initial Records", value: summary.initial_records },
            SummaryField { label: "Final Records", value: summary.final_records },
            SummaryField { label: "Records Removed", value: summary.records_removed },
        ]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("canvas '{}' already has a live chart", .0.id())]
    CanvasInUse(Canvas),
}

/// The surfaces a rendered analysis is written to. The GUI view implements this,
/// tests use a recording double.
pub trait RenderTargets {
    fn set_kpi(&mut self, kpi: Kpi, text: String);
    fn clear_table(&mut self);
    fn append_row(&mut self, row: TableRow);
    fn create_chart(&mut self, canvas: Canvas, spec: ChartSpec) -> Result<Box<dyn ChartInstance>, RenderError>;
    fn show_summary(&mut self, fields: [SummaryField; 3]);
    fn hide_summary(&mut self);
    fn filter_range(&self) -> DateRange;
    fn set_filter_range(&mut self, range: DateRange);
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub currency_symbol: String,
    pub variant: Variant,
}

/// Live chart handles, kept between renders so the previous chart on each canvas
/// can be destroyed before its replacement is created.
#[derive(Default)]
pub struct RenderState {
    peak_hours: Option<Box<dyn ChartInstance>>,
    trends: Option<Box<dyn ChartInstance>>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn has_chart(&self, canvas: Canvas) -> bool {
        match canvas {
            Canvas::PeakHours => self.peak_hours.is_some(),
            Canvas::Trends => self.trends.is_some(),
        }
    }

    fn slot_mut(&mut self, canvas: Canvas) -> &mut Option<Box<dyn ChartInstance>> {
        match canvas {
            Canvas::PeakHours => &mut self.peak_hours,
            Canvas::Trends => &mut self.trends,
        }
    }

    fn replace_chart(
        &mut self,
        targets: &mut dyn RenderTargets,
        canvas: Canvas,
        spec: ChartSpec,
    ) -> Result<(), RenderError> {
        let slot = self.slot_mut(canvas);
        if let Some(previous) = slot.take() {
            tracing::debug!(canvas = previous.canvas().id(), "destroying previous chart");
            previous.destroy();
        }
        *slot = Some(targets.create_chart(canvas, spec)?);
        Ok(())
    }
}

impl std::fmt::Debug for RenderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderState")
            .field("peak_hours", &self.peak_hours.is_some())
            .field("trends", &self.trends.is_some())
            .finish()
    }
}

pub fn render_dashboard(
    state: &mut RenderState,
    targets: &mut dyn RenderTargets,
    response: &AnalysisResponse,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let symbol = options.currency_symbol.as_str();

    // KPIs
    targets.set_kpi(Kpi::TotalRevenue, format::currency(symbol, response.total_revenue));
    targets.set_kpi(Kpi::TotalTransactions, response.total_transactions.to_string());
    targets.set_kpi(Kpi::AvgTransactionValue, format::currency(symbol, response.avg_transaction_value));

    // Top customers
    targets.clear_table();
    for customer in &response.top_customers {
        targets.append_row(TableRow {
            customer: customer.customer.clone(),
            total_spent: format::currency(symbol, customer.total_spent),
            visits: customer.visits.to_string(),
        });
    }

    state.replace_chart(targets, Canvas::PeakHours, ChartSpec::peak_hours(&response.peak_hours))?;
    state.replace_chart(targets, Canvas::Trends, ChartSpec::trends(&response.trends, symbol))?;

    match &response.cleaning_summary {
        Some(summary) => targets.show_summary(SummaryField::from_summary(summary)),
        None => targets.hide_summary(),
    }

    if options.variant.has_filters() && targets.filter_range().start.trim().is_empty() {
        if let Some(span) = dates::span_of_labels(&response.trends.labels) {
            tracing::debug!(start = %span.start, end = %span.end, "seeding filter inputs from trend dates");
            targets.set_filter_range(span);
        }
    }

    Ok(())
}
