// src/ui/mod.rs
pub mod canvas;
pub mod dashboard;
pub mod upload;

pub use canvas::{PlotCanvas, PlotChart};
pub use dashboard::DashboardView;
