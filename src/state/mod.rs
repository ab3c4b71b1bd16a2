// src/state/mod.rs

/// Where the dashboard is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    ShowingResult,
    ShowingError,
}

/// What started a request, so its outcome can be reported in the right words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Upload { file_name: String },
    Filters,
}

impl Origin {
    pub fn pending_status(&self) -> String {
        match self {
            Origin::Upload { file_name } => format!("Processing file: {}...", file_name),
            Origin::Filters => "Applying filters...".to_string(),
        }
    }

    pub fn success_status(&self) -> String {
        match self {
            Origin::Upload { file_name } => format!("Showing analysis for: {}", file_name),
            Origin::Filters => "Showing filtered analysis".to_string(),
        }
    }

    pub fn failure_status(&self) -> String {
        match self {
            Origin::Upload { file_name } => format!("Failed to process: {}", file_name),
            Origin::Filters => "Failed to apply filters".to_string(),
        }
    }
}

pub const INVALID_FILE_ALERT: &str = "Please upload a valid CSV file.";
pub const IDLE_STATUS: &str = "Drop a CSV file here or click to browse";

pub fn failure_alert(message: &str) -> String {
    format!("An error occurred: {}. Please check the logs.", message)
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub status: String,
    pub alert: Option<String>,
    pub dashboard_visible: bool,
    pub phase: Phase,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status: IDLE_STATUS.to_string(),
            alert: None,
            dashboard_visible: false,
            phase: Phase::Idle,
        }
    }

    pub fn raise_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(alert = %message, "alerting user");
        self.alert = Some(message);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
