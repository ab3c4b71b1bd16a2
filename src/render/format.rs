// src/render/format.rs

/// Money amounts are always shown with two decimals behind the currency symbol.
pub fn currency(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}
