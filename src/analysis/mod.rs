// src/analysis/mod.rs
pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::{AnalysisRequest, DateRange, FileContents, PickedFile};
pub use response::{
    AnalysisResponse,
    CleaningSummary,
    CustomerSummary,
    ErrorBody,
    Series,
};
