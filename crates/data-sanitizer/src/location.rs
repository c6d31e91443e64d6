//! Location Column Normalization
//!
//! The raw dataset ships location in one of three shapes; the shape is
//! resolved once before any column is touched so an unusable table fails
//! fast, and the chosen transform runs after the price row filter.

use crate::stats::mode;
use crate::{SanitizeError, COL_LOCATION, COL_LOCATION_RURAL, COL_LOCATION_URBAN};
use table_io::{Table, Value};
use tracing::debug;

/// Correction map for noisy location labels, applied after lowercasing.
/// Labels not listed here and not already canonical pass through into
/// the encoding step as their own category.
pub const LABEL_CORRECTIONS: [(&str, &str); 5] = [
    ("urbnaa", "urbano"),
    ("urban", "urbano"),
    ("true", "urbano"),
    ("false", "rural"),
    ("rurall", "rural"),
];

/// Reference category dropped during one-hot encoding; the urban
/// indicator never survives sanitization.
const REFERENCE_LABEL: &str = "urbano";
const RURAL_LABEL: &str = "rural";

/// Input shape of the location field, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationShape {
    /// Both indicator columns present; unify into the rural one.
    IndicatorPair,
    /// A single free-text categorical column.
    FreeText,
    /// Already sanitized: only the rural indicator is present.
    Encoded,
}

impl LocationShape {
    /// Detect the location shape by column presence.
    pub fn resolve(table: &Table) -> Result<Self, SanitizeError> {
        if table.has_column(COL_LOCATION_RURAL) && table.has_column(COL_LOCATION_URBAN) {
            Ok(LocationShape::IndicatorPair)
        } else if table.has_column(COL_LOCATION) {
            Ok(LocationShape::FreeText)
        } else if table.has_column(COL_LOCATION_RURAL) {
            Ok(LocationShape::Encoded)
        } else {
            Err(SanitizeError::MissingColumn(COL_LOCATION.to_string()))
        }
    }
}

/// Coerce an indicator cell to 0/1. Unparseable cells default to 0.
fn coerce_indicator(value: &Value) -> f64 {
    match value {
        Value::Number(n) => {
            if *n != 0.0 {
                1.0
            } else {
                0.0
            }
        }
        Value::Text(s) => match s.to_lowercase().trim() {
            "true" => 1.0,
            _ => 0.0,
        },
        Value::Missing => 0.0,
    }
}

/// Canonical label for a free-text cell, if present.
fn corrected_label(value: &Value) -> Option<String> {
    let text = match value {
        Value::Text(s) => s.to_lowercase(),
        Value::Number(n) => Value::Number(*n).render().to_lowercase(),
        Value::Missing => return None,
    };
    let text = text.trim().to_string();
    for (noisy, canonical) in LABEL_CORRECTIONS {
        if text == noisy {
            return Some(canonical.to_string());
        }
    }
    Some(text)
}

/// Apply the resolved location transform to the (already row-filtered)
/// table. Returns the number of missing labels filled with the mode.
pub(crate) fn apply(
    shape: LocationShape,
    table: &mut Table,
) -> Result<usize, SanitizeError> {
    match shape {
        LocationShape::IndicatorPair => {
            let rural: Vec<Value> = table
                .column(COL_LOCATION_RURAL)?
                .iter()
                .map(|v| Value::Number(coerce_indicator(v)))
                .collect();
            table.set_column(COL_LOCATION_RURAL, rural)?;
            table.drop_column(COL_LOCATION_URBAN);
            Ok(0)
        }
        LocationShape::Encoded => {
            let rural: Vec<Value> = table
                .column(COL_LOCATION_RURAL)?
                .iter()
                .map(|v| Value::Number(coerce_indicator(v)))
                .collect();
            table.set_column(COL_LOCATION_RURAL, rural)?;
            Ok(0)
        }
        LocationShape::FreeText => encode_free_text(table),
    }
}

/// One-hot encode the free-text column with the urban label as the
/// dropped reference, guaranteeing a rural indicator in the output.
fn encode_free_text(table: &mut Table) -> Result<usize, SanitizeError> {
    let labels: Vec<Option<String>> = table
        .column(COL_LOCATION)?
        .iter()
        .map(corrected_label)
        .collect();

    let fill = mode(labels.iter().flatten().map(String::as_str))
        .unwrap_or_else(|| RURAL_LABEL.to_string());

    let mut filled_count = 0;
    let labels: Vec<String> = labels
        .into_iter()
        .map(|l| match l {
            Some(label) => label,
            None => {
                filled_count += 1;
                fill.clone()
            }
        })
        .collect();

    // Every category except the reference becomes an indicator column,
    // in sorted order for a deterministic header.
    let mut categories: Vec<&str> = labels.iter().map(String::as_str).collect();
    categories.sort_unstable();
    categories.dedup();
    categories.retain(|c| *c != REFERENCE_LABEL);

    table.drop_column(COL_LOCATION);
    for category in categories {
        let column: Vec<Value> = labels
            .iter()
            .map(|l| Value::Number(if l == category { 1.0 } else { 0.0 }))
            .collect();
        table.push_column(&format!("{COL_LOCATION}_{category}"), column)?;
    }

    // All rows were the reference category: synthesize the indicator.
    if !table.has_column(COL_LOCATION_RURAL) {
        debug!("no rural rows after encoding, synthesizing zero indicator");
        let zeros = vec![Value::Number(0.0); table.n_rows()];
        table.push_column(COL_LOCATION_RURAL, zeros)?;
    }

    Ok(filled_count)
}
