//! Per-Field Column Transforms
//!
//! Each transform takes a raw column and returns the cleaned column plus
//! the counts the sanitize report aggregates. None of them touch the
//! table directly; ordering is owned by the pipeline in `sanitizer`.

use crate::stats::{mean, median};
use crate::MAX_ROOMS;
use table_io::Value;
use tracing::warn;

/// Unit suffix stripped from textual surface areas.
const SURFACE_UNIT: &str = "m2";

/// Localized spellings accepted for a room count of three.
const ROOM_TOKENS: [&str; 2] = ["tres", "three"];

/// Localized spellings accepted for an age of zero.
const AGE_TOKENS: [&str; 2] = ["nueva", "new"];

/// Numeric view of a cell after field-specific token substitution.
///
/// `substitute` maps a lowercased textual cell to a number when the
/// field defines a spelling for it.
fn coerce(value: &Value, substitute: impl Fn(&str) -> Option<f64>) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Text(s) => {
            let lowered = s.to_lowercase();
            if let Some(n) = substitute(&lowered) {
                return Some(n);
            }
            lowered.trim().parse::<f64>().ok().filter(|n| n.is_finite())
        }
        Value::Missing => None,
    }
}

/// Impute `None` entries with `fill`, returning the column and the
/// number of imputed cells.
fn impute(parsed: Vec<Option<f64>>, fill: f64) -> (Vec<Value>, usize) {
    let mut imputed = 0;
    let column = parsed
        .into_iter()
        .map(|v| match v {
            Some(n) => Value::Number(n),
            None => {
                imputed += 1;
                Value::Number(fill)
            }
        })
        .collect();
    (column, imputed)
}

/// Fill value for a column with no usable entries at all.
fn fallback_fill(field: &str) -> f64 {
    warn!(field, "no parseable values in column, imputing zeros");
    0.0
}

/// Clean the surface area column: strip the unit suffix, coerce, treat
/// negative parses as coercion failures, impute with the median.
pub(crate) fn clean_surface(raw: &[Value]) -> (Vec<Value>, usize) {
    let parsed: Vec<Option<f64>> = raw
        .iter()
        .map(|v| {
            coerce(v, |text| {
                let stripped = text.replace(SURFACE_UNIT, "");
                stripped.trim().parse::<f64>().ok().filter(|n| n.is_finite())
            })
            .filter(|n| *n >= 0.0)
        })
        .collect();

    let valid: Vec<f64> = parsed.iter().flatten().copied().collect();
    let fill = median(&valid).unwrap_or_else(|| fallback_fill("surface_area"));
    impute(parsed, fill)
}

/// Clean the room count column: substitute the localized token, coerce,
/// impute with the median, then cap values above [`MAX_ROOMS`] with the
/// same median.
///
/// The single median is shared by imputation and capping on purpose; the
/// impute-then-cap order is part of the contract.
pub(crate) fn clean_rooms(raw: &[Value]) -> (Vec<Value>, usize, usize) {
    let parsed: Vec<Option<f64>> = raw
        .iter()
        .map(|v| {
            coerce(v, |text| {
                ROOM_TOKENS.contains(&text.trim()).then_some(3.0)
            })
        })
        .collect();

    let valid: Vec<f64> = parsed.iter().flatten().copied().collect();
    let fill = median(&valid).unwrap_or_else(|| fallback_fill("room_count"));
    let (column, imputed) = impute(parsed, fill);

    let mut capped = 0;
    let column = column
        .into_iter()
        .map(|v| match v.as_number() {
            Some(n) if n > MAX_ROOMS => {
                capped += 1;
                Value::Number(fill)
            }
            _ => v,
        })
        .collect();
    (column, imputed, capped)
}

/// Clean the age column: substitute the localized token for zero,
/// coerce, impute with the mean, then discard signs.
///
/// Mean rather than median is deliberate; negative ages are treated as
/// sign errors and corrected, not dropped.
pub(crate) fn clean_age(raw: &[Value]) -> (Vec<Value>, usize) {
    let parsed: Vec<Option<f64>> = raw
        .iter()
        .map(|v| {
            coerce(v, |text| {
                AGE_TOKENS.contains(&text.trim()).then_some(0.0)
            })
        })
        .collect();

    let valid: Vec<f64> = parsed.iter().flatten().copied().collect();
    let fill = mean(&valid).unwrap_or_else(|| fallback_fill("age"));
    let (column, imputed) = impute(parsed, fill);

    let column = column
        .into_iter()
        .map(|v| match v.as_number() {
            Some(n) => Value::Number(n.abs()),
            None => v,
        })
        .collect();
    (column, imputed)
}

/// Coerce the price column without imputation; non-parseable cells stay
/// missing so the row filter can drop them.
pub(crate) fn coerce_price(raw: &[Value]) -> Vec<Option<f64>> {
    raw.iter().map(|v| coerce(v, |_| None)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_surface_strips_unit_and_imputes() {
        let raw = vec![
            text("85m2"),
            Value::Number(100.0),
            text("garbage"),
            Value::Missing,
        ];
        let (clean, imputed) = clean_surface(&raw);
        assert_eq!(clean[0], Value::Number(85.0));
        assert_eq!(clean[1], Value::Number(100.0));
        // median of [85, 100] = 92.5 fills both unusable cells
        assert_eq!(clean[2], Value::Number(92.5));
        assert_eq!(clean[3], Value::Number(92.5));
        assert_eq!(imputed, 2);
    }

    #[test]
    fn test_surface_negative_is_treated_as_missing() {
        let raw = vec![Value::Number(-50.0), Value::Number(80.0), Value::Number(90.0)];
        let (clean, imputed) = clean_surface(&raw);
        assert_eq!(clean[0], Value::Number(85.0));
        assert_eq!(imputed, 1);
    }

    #[test]
    fn test_rooms_token_and_cap() {
        let raw = vec![
            text("tres"),
            Value::Number(2.0),
            Value::Number(4.0),
            Value::Number(15.0),
        ];
        let (clean, imputed, capped) = clean_rooms(&raw);
        assert_eq!(clean[0], Value::Number(3.0));
        // median of [3, 2, 4, 15] = 3.5 replaces the outlier
        assert_eq!(clean[3], Value::Number(3.5));
        assert_eq!(imputed, 0);
        assert_eq!(capped, 1);
    }

    #[test]
    fn test_rooms_imputation_uses_pre_cap_median() {
        let raw = vec![Value::Number(2.0), Value::Number(4.0), Value::Missing];
        let (clean, imputed, capped) = clean_rooms(&raw);
        assert_eq!(clean[2], Value::Number(3.0));
        assert_eq!(imputed, 1);
        assert_eq!(capped, 0);
    }

    #[test]
    fn test_age_token_mean_and_abs() {
        let raw = vec![text("nueva"), Value::Number(-10.0), Value::Missing];
        let (clean, imputed) = clean_age(&raw);
        assert_eq!(clean[0], Value::Number(0.0));
        assert_eq!(clean[1], Value::Number(10.0));
        // mean of [0, -10] = -5, imputed before abs
        assert_eq!(clean[2], Value::Number(5.0));
        assert_eq!(imputed, 1);
    }

    #[test]
    fn test_price_coercion_keeps_missing() {
        let raw = vec![Value::Number(95000.0), text("n/a"), Value::Missing];
        let parsed = coerce_price(&raw);
        assert_eq!(parsed, vec![Some(95000.0), None, None]);
    }
}
