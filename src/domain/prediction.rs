use serde::{Deserialize, Serialize};

/// Regression models predict prices in millions of dollars.
pub const PRICE_UNIT: f64 = 1_000_000.0;

/// Combined output of the four models for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "Linear_Regression_Price_Prediction")]
    pub linear_regression_price: String,
    #[serde(rename = "Random_Forest_Price_Prediction")]
    pub random_forest_price: String,
    #[serde(rename = "K_Means_Cluster")]
    pub k_means_cluster: usize,
    #[serde(rename = "KNN_Price_Category")]
    pub knn_price_category: String,
}

/// Format a model estimate (in millions) as a dollar amount.
pub fn format_price(millions: f64) -> String {
    format_currency(millions * PRICE_UNIT)
}

/// `$` followed by the amount with thousands separators and two decimals,
/// e.g. `$1,234,567.89` or `$-500.00`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$nan".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "$inf" } else { "$-inf" }.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!("${sign}{grouped}.{fraction}")
}
