// src/transport/mod.rs
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use thiserror::Error;

use crate::analysis::{AnalysisRequest, AnalysisResponse, ErrorBody, FileContents};

pub mod loading;

pub use loading::{LoadingGuard, LoadingIndicator};

const CSV_MIME: &str = "text/csv";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not build upload form: {0}")]
    Form(#[source] reqwest::Error),

    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// One attempt, no retry.
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_user_agent(endpoint, USER_AGENT)
    }

    pub fn with_user_agent(endpoint: impl Into<String>, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, TransportError> {
        let form = build_form(request).await?;

        let response = self.client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::Network)?;
        tracing::debug!(%status, bytes = body.len(), "analysis service replied");

        if !status.is_success() {
            return Err(server_error(status, &body));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Builds the multipart body. Files picked from disk are read here, on the
/// runtime rather than the UI thread.
pub async fn build_form(request: AnalysisRequest) -> Result<Form, TransportError> {
    let mut form = Form::new();

    if let Some(file) = request.file {
        let bytes = match file.contents {
            FileContents::InMemory(bytes) => bytes,
            FileContents::OnDisk(path) => match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(source) => return Err(TransportError::Read { path, source }),
            },
        };
        let part = Part::bytes(bytes)
            .file_name(file.name)
            .mime_str(CSV_MIME)
            .map_err(TransportError::Form)?;
        form = form.part("file", part);
    }
    if let Some(start) = request.start_date.filter(|s| !s.is_empty()) {
        form = form.text("start_date", start);
    }
    if let Some(end) = request.end_date.filter(|s| !s.is_empty()) {
        form = form.text("end_date", end);
    }

    Ok(form)
}

fn server_error(status: StatusCode, body: &[u8]) -> TransportError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(message) }) => TransportError::Server {
            status: status.as_u16(),
            message,
        },
        Ok(ErrorBody { error: None }) => TransportError::Server {
            status: status.as_u16(),
            message: format!("server responded with status {}", status.as_u16()),
        },
        Err(e) => TransportError::Decode(e),
    }
}
