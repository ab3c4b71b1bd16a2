// src/render/chart.rs
use crate::analysis::Series;

/// The two chart surfaces of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Canvas {
    PeakHours,
    Trends,
}

impl Canvas {
    pub fn id(self) -> &'static str {
        match self {
            Canvas::PeakHours => "peak-hours-chart",
            Canvas::Trends => "trends-line-chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// Straight sRGB with alpha in 0..=1, the way the dashboard palette is written down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

const BLUE_FILL: Rgba = Rgba::new(59, 130, 246, 0.7);
const BLUE_BORDER: Rgba = Rgba::new(59, 130, 246, 1.0);
const GREEN_FILL: Rgba = Rgba::new(16, 185, 129, 0.2);
const GREEN_BORDER: Rgba = Rgba::new(16, 185, 129, 1.0);

/// Everything a canvas needs to draw one chart. Only `labels` and `data` vary
/// between renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub fill_color: Rgba,
    pub border_color: Rgba,
    pub border_width: f32,
    pub fill: bool,
    pub begin_at_zero: bool,
    pub integer_ticks: bool,
}

impl ChartSpec {
    pub fn peak_hours(series: &Series) -> Self {
        Self {
            kind: ChartKind::Bar,
            dataset_label: "Number of Transactions".to_string(),
            labels: series.labels.clone(),
            data: series.data.clone(),
            fill_color: BLUE_FILL,
            border_color: BLUE_BORDER,
            border_width: 1.0,
            fill: true,
            begin_at_zero: true,
            integer_ticks: true,
        }
    }

    pub fn trends(series: &Series, currency_symbol: &str) -> Self {
        Self {
            kind: ChartKind::Line,
            dataset_label: format!("Daily Revenue ({})", currency_symbol),
            labels: series.labels.clone(),
            data: series.data.clone(),
            fill_color: GREEN_FILL,
            border_color: GREEN_BORDER,
            border_width: 2.0,
            fill: true,
            begin_at_zero: true,
            integer_ticks: false,
        }
    }

    /// Pairs each value with its label; extra entries on either side are dropped.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels.iter().map(String::as_str).zip(self.data.iter().copied())
    }
}

/// A chart bound to a canvas. The canvas stays occupied until the instance is
/// destroyed.
pub trait ChartInstance {
    fn canvas(&self) -> Canvas;
    fn destroy(self: Box<Self>);
}
