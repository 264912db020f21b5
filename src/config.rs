use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::key::KeyFormat;
use crate::error::{Error, Result};

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "config.json";

// ---------------------------------------------------------------------------
// RunConfig – everything a run needs, read once at startup
// ---------------------------------------------------------------------------

/// Settings for one run. Keys the producer also writes (`POINTS_NUMBER`,
/// `PRECISION_VALUES`, `A`, `B`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RunConfig {
    /// Step sizes to plot, in legend order.
    pub h_params: Vec<f64>,
    /// How step sizes map to series keys in the document.
    pub key_format: KeyFormat,
    #[serde(rename = "PLOTS_JSON_FILE")]
    pub plots_file: PathBuf,
    /// Where PNGs are written.
    pub output_dir: PathBuf,
    /// Open the viewer window once all charts are written.
    pub show: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            h_params: vec![0.2, 0.1, 0.05],
            key_format: KeyFormat::default(),
            plots_file: PathBuf::from("plots.json"),
            output_dir: PathBuf::from("."),
            show: false,
        }
    }
}

impl RunConfig {
    /// Read and parse a config file. A missing or malformed file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Destination of a chart file inside the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
