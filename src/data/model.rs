use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};

// ---------------------------------------------------------------------------
// Sample / IntegralRecord – the rows of each category
// ---------------------------------------------------------------------------

/// One evaluation point of a derivative approximation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sample {
    pub x: f64,
    /// Writers emit `null` where the deviation is NaN.
    #[serde(deserialize_with = "nan_if_null")]
    pub deviation: f64,
}

impl Sample {
    pub fn point(&self) -> (f64, f64) {
        (self.x, self.deviation)
    }
}

/// Number of integration steps needed to reach a precision.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IntegralRecord {
    pub precision: f64,
    /// The producer stores this as a double (`10.0`); only whole values are accepted.
    #[serde(deserialize_with = "whole_number")]
    pub steps: u64,
}

impl IntegralRecord {
    pub fn point(&self) -> (f64, f64) {
        (self.precision, self.steps as f64)
    }
}

fn nan_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let v = f64::deserialize(deserializer)?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Ok(v as u64)
    } else {
        Err(D::Error::custom(format!(
            "expected a non-negative whole number of steps, got {v}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Category – the derivative sections of the document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FirstDerivative,
    SecondDerivative,
}

impl Category {
    /// Top-level key in `plots.json`.
    pub fn key(self) -> &'static str {
        match self {
            Category::FirstDerivative => FIRST_DERIVATIVE,
            Category::SecondDerivative => SECOND_DERIVATIVE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub const FIRST_DERIVATIVE: &str = "First derivative";
pub const SECOND_DERIVATIVE: &str = "Second derivative";
pub const INTEGRAL: &str = "Integral";
pub const INTEGRAL_ALIAS: &str = "Integral deviation";
pub const INTEGRAL_DEVIATION: &str = "IntegralDeviation";
pub const PRECISION_VALUES: &str = "PRECISION_VALUES";

/// Step-size key → samples in ascending x.
pub type DerivativeSeries = BTreeMap<String, Vec<Sample>>;

// ---------------------------------------------------------------------------
// DataDocument – the complete parsed plots.json
// ---------------------------------------------------------------------------

/// Parsed `plots.json`. Every section is optional; absence is reported at
/// lookup time, never while loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataDocument {
    pub first_derivative: Option<DerivativeSeries>,
    pub second_derivative: Option<DerivativeSeries>,
    /// `"Integral"`, or `"Integral deviation"` when the former is absent.
    pub integral: Option<Vec<IntegralRecord>>,
    /// Per-precision deviation of the integral, parallel to `precision_values`.
    pub integral_deviation: Option<Vec<f64>>,
    pub precision_values: Option<Vec<f64>>,
}

impl DataDocument {
    /// Parse a document from JSON text. Unknown top-level keys are ignored;
    /// known keys with the wrong shape are an error.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let root: JsonValue = serde_json::from_str(text)?;
        let JsonValue::Object(mut map) = root else {
            return Err(serde_json::Error::custom(
                "expected a JSON object at the top level",
            ));
        };

        let integral = match take(&mut map, INTEGRAL)? {
            Some(records) => Some(records),
            None => take(&mut map, INTEGRAL_ALIAS)?,
        };

        Ok(DataDocument {
            first_derivative: take(&mut map, FIRST_DERIVATIVE)?,
            second_derivative: take(&mut map, SECOND_DERIVATIVE)?,
            integral,
            integral_deviation: take(&mut map, INTEGRAL_DEVIATION)?,
            precision_values: take(&mut map, PRECISION_VALUES)?,
        })
    }

    pub fn category(&self, category: Category) -> Option<&DerivativeSeries> {
        match category {
            Category::FirstDerivative => self.first_derivative.as_ref(),
            Category::SecondDerivative => self.second_derivative.as_ref(),
        }
    }

    /// Samples for one step-size key, or `None` if the category or key is absent.
    pub fn series(&self, category: Category, key: &str) -> Option<&[Sample]> {
        self.category(category)?.get(key).map(Vec::as_slice)
    }
}

fn take<T: DeserializeOwned>(
    map: &mut Map<String, JsonValue>,
    key: &str,
) -> Result<Option<T>, serde_json::Error> {
    map.remove(key)
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|e| serde_json::Error::custom(format!("'{key}': {e}")))
        })
        .transpose()
}
