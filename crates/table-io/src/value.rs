//! Cell Value Model

use serde::{Deserialize, Serialize};

/// One cell of a table: numeric, free text, or absent.
///
/// Raw CSV cells are classified on load; the sanitizer refines `Text`
/// cells into `Number` or `Missing` as it coerces each field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A parsed finite number
    Number(f64),
    /// Unparsed text (trimmed, original casing preserved)
    Text(String),
    /// No value present
    Missing,
}

impl Value {
    /// Classify a raw cell string.
    ///
    /// Empty or whitespace-only cells become `Missing`; cells that parse
    /// as a finite float become `Number`; everything else stays `Text`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text view of the cell, if it has one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell is absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Render the cell for delimited output.
    ///
    /// Integer-valued numbers print without a fractional part so that
    /// indicator columns round-trip as `0`/`1`.
    pub fn render(&self) -> String {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Value::Text(s) => s.clone(),
            Value::Missing => String::new(),
        }
    }
}
