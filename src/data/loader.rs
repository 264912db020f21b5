use std::path::Path;

use log::debug;

use super::model::DataDocument;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load `plots.json`.
///
/// Expected schema (every section optional):
///
/// ```json
/// {
///   "First derivative":  { "0.2": [{ "x": -2.0, "deviation": 0.013 }, ...], ... },
///   "Second derivative": { "0.2": [{ "x": -1.65, "deviation": 0.002 }, ...], ... },
///   "Integral":          [{ "precision": 0.01, "steps": 8 }, ...],
///   "IntegralDeviation": [0.0004, ...],
///   "PRECISION_VALUES":  [0.01, ...]
/// }
/// ```
pub fn load_document(path: &Path) -> Result<DataDocument> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = DataDocument::from_json_str(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "loaded {}: first={} second={} integral={}",
        path.display(),
        document.first_derivative.as_ref().map_or(0, |s| s.len()),
        document.second_derivative.as_ref().map_or(0, |s| s.len()),
        document.integral.as_ref().map_or(0, |r| r.len()),
    );
    Ok(document)
}
