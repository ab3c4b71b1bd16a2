// src/analysis/response.rs
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    pub total_revenue: f64,
    pub total_transactions: u64,
    pub avg_transaction_value: f64,
    pub top_customers: Vec<CustomerSummary>,
    pub peak_hours: Series,
    pub trends: Series,
    #[serde(default)]
    pub cleaning_summary: Option<CleaningSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerSummary {
    /// The service passes the CSV's customer_id through, which may be numeric.
    #[serde(deserialize_with = "deserialize_customer_id")]
    pub customer: String,
    pub total_spent: f64,
    pub visits: u64,
}

fn deserialize_customer_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(D::Error::custom(format!(
            "customer id must be a string or a number, got {}",
            other
        ))),
    }
}

/// Parallel label/value sequences feeding one chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleaningSummary {
    pub initial_records: u64,
    pub final_records: u64,
    pub records_removed: u64,
}

/// Body of a non-2xx reply from the analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
