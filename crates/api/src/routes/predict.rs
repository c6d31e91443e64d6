//! Prediction Route

use axum::{extract::State, Json};
use regression_tree::RegressionTree;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::AppState;

/// Incoming feature record. Every field is optional and defaults to 0;
/// `location_urban` is accepted for input compatibility but only used if
/// the model schema names it. Unknown schema columns (from free-text
/// categories seen at training time) can be supplied via extra fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeatureRecord {
    pub surface_area: f64,
    pub room_count: f64,
    pub age: f64,
    pub location_rural: f64,
    pub location_urban: f64,
    #[serde(flatten)]
    pub extra: HashMap<String, f64>,
}

impl FeatureRecord {
    /// Reorder and zero-fill the record to the model's feature schema.
    pub fn reindex(&self, model: &RegressionTree) -> Vec<f64> {
        model
            .feature_names
            .iter()
            .map(|name| match name.as_str() {
                "surface_area" => self.surface_area,
                "room_count" => self.room_count,
                "age" => self.age,
                "location_rural" => self.location_rural,
                "location_urban" => self.location_urban,
                other => self.extra.get(other).copied().unwrap_or(0.0),
            })
            .collect()
    }
}

/// Response for the predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Estimated price, rounded to 2 decimal places
    pub estimated_price: f64,
    /// Display-formatted price string
    pub formatted_price: String,
}

/// Predict a house price for one feature record
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(record): Json<FeatureRecord>,
) -> Json<PredictResponse> {
    let features = record.reindex(&state.model);
    let raw = state.model.predict(&features);
    let estimated = (raw * 100.0).round() / 100.0;
    debug!(estimated, "prediction served");

    Json(PredictResponse {
        formatted_price: format_price(estimated),
        estimated_price: estimated,
    })
}

/// Render a price as `$1,234,567.89`.
fn format_price(price: f64) -> String {
    let negative = price < 0.0;
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regression_tree::{RegressionTree, TreeConfig};

    fn model() -> RegressionTree {
        // Rural houses cost 100k, urban 200k
        let x = vec![
            vec![80.0, 3.0, 5.0, 1.0],
            vec![85.0, 3.0, 6.0, 1.0],
            vec![80.0, 3.0, 5.0, 0.0],
            vec![85.0, 3.0, 6.0, 0.0],
        ];
        let y = vec![100_000.0, 100_000.0, 200_000.0, 200_000.0];
        let names = vec![
            "surface_area".to_string(),
            "room_count".to_string(),
            "age".to_string(),
            "location_rural".to_string(),
        ];
        RegressionTree::fit(&x, &y, names, TreeConfig::default()).unwrap()
    }

    #[test]
    fn test_reindex_follows_schema_order() {
        let model = model();
        let record = FeatureRecord {
            surface_area: 90.0,
            room_count: 4.0,
            age: 2.0,
            location_rural: 1.0,
            ..FeatureRecord::default()
        };
        assert_eq!(record.reindex(&model), vec![90.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let model = model();
        let record: FeatureRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.reindex(&model), vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_extra_schema_columns_are_honored() {
        let x = vec![vec![0.0, 1.0], vec![0.0, 0.0]];
        let y = vec![100.0, 200.0];
        let names = vec!["location_rural".to_string(), "location_suburbio".to_string()];
        let model = RegressionTree::fit(&x, &y, names, TreeConfig::default()).unwrap();

        let record: FeatureRecord =
            serde_json::from_str(r#"{"location_suburbio": 1.0}"#).unwrap();
        assert_eq!(record.reindex(&model), vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_predict_handler_rounds_and_formats() {
        let state = Arc::new(AppState::new(model()));
        let record: FeatureRecord = serde_json::from_str(
            r#"{"surface_area": 82.0, "room_count": 3, "age": 5, "location_rural": 0, "location_urban": 1}"#,
        )
        .unwrap();

        let Json(response) = predict(State(state), Json(record)).await;
        assert_eq!(response.estimated_price, 200_000.0);
        assert_eq!(response.formatted_price, "$200,000.00");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(95000.0), "$95,000.00");
        assert_eq!(format_price(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_price(0.5), "$0.50");
        assert_eq!(format_price(-12.0), "-$12.00");
    }
}
