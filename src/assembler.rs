use log::{info, warn};

use crate::chart::{
    build_line_chart, build_steps_vs_precision_chart, trim_edges, Chart, ChartOptions,
};
use crate::config::RunConfig;
use crate::data::model::{
    Category, DataDocument, Sample, INTEGRAL, INTEGRAL_DEVIATION, PRECISION_VALUES,
};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// ChartKind – the catalogue of figures a run produces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    FirstDerivative,
    FirstDerivativeNoEdges,
    SecondDerivativeNoEdges,
    IntegralSteps,
    IntegralDeviation,
}

impl ChartKind {
    /// Every chart, in render order.
    pub const ALL: [ChartKind; 5] = [
        ChartKind::FirstDerivative,
        ChartKind::FirstDerivativeNoEdges,
        ChartKind::SecondDerivativeNoEdges,
        ChartKind::IntegralSteps,
        ChartKind::IntegralDeviation,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::FirstDerivative => "first_derivative_deviation.png",
            ChartKind::FirstDerivativeNoEdges => "first_derivative_deviation_no_edges.png",
            ChartKind::SecondDerivativeNoEdges => "second_derivative_deviation_no_edges.png",
            ChartKind::IntegralSteps => "integral_steps_vs_precision.png",
            ChartKind::IntegralDeviation => "integral_deviation_vs_precision.png",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::FirstDerivative => "First Derivative Deviation vs X",
            ChartKind::FirstDerivativeNoEdges => {
                "First Derivative Deviation vs X (Without Edge Points)"
            }
            ChartKind::SecondDerivativeNoEdges => {
                "Second Derivative Deviation vs X (Without Edge Points)"
            }
            ChartKind::IntegralSteps => "Integral Steps vs Precision",
            ChartKind::IntegralDeviation => "Integral Deviation vs Precision",
        }
    }

    pub fn options(self) -> ChartOptions {
        match self {
            ChartKind::FirstDerivative
            | ChartKind::FirstDerivativeNoEdges
            | ChartKind::SecondDerivativeNoEdges => ChartOptions {
                show_grid: true,
                show_legend: true,
                ..ChartOptions::default()
            },
            ChartKind::IntegralSteps | ChartKind::IntegralDeviation => ChartOptions {
                log_x_axis: true,
                invert_x_axis: true,
                show_markers: true,
                show_grid: true,
                show_legend: false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// ChartAssembler
// ---------------------------------------------------------------------------

/// Turns a loaded document into charts according to the run configuration.
pub struct ChartAssembler<'a> {
    config: &'a RunConfig,
    document: &'a DataDocument,
}

impl<'a> ChartAssembler<'a> {
    pub fn new(config: &'a RunConfig, document: &'a DataDocument) -> Self {
        Self { config, document }
    }

    /// Samples stored under `key`, or `None` when the category or key is absent.
    pub fn extract_series(&self, category: Category, key: &str) -> Option<&'a [Sample]> {
        self.document.series(category, key)
    }

    /// `h = <key>` labelled series for every configured step size present in
    /// `category`. Step sizes without a series are skipped.
    pub fn derivative_series(
        &self,
        category: Category,
        trim: bool,
    ) -> Result<Vec<(String, Vec<Sample>)>> {
        if self.document.category(category).is_none() {
            return Err(Error::MissingKey {
                key: category.key().to_string(),
            });
        }

        let mut series = Vec::with_capacity(self.config.h_params.len());
        for &h in &self.config.h_params {
            let key = self.config.key_format.format(h);
            let Some(samples) = self.extract_series(category, &key) else {
                info!("no '{category}' series for h = {key}, skipping");
                continue;
            };
            let samples = if trim { trim_edges(samples) } else { samples };
            series.push((format!("h = {key}"), samples.to_vec()));
        }
        Ok(series)
    }

    /// Build a single chart.
    pub fn build(&self, kind: ChartKind) -> Result<Chart> {
        match kind {
            ChartKind::FirstDerivative => {
                self.derivative_chart(kind, Category::FirstDerivative, false)
            }
            ChartKind::FirstDerivativeNoEdges => {
                self.derivative_chart(kind, Category::FirstDerivative, true)
            }
            ChartKind::SecondDerivativeNoEdges => {
                self.derivative_chart(kind, Category::SecondDerivative, true)
            }
            ChartKind::IntegralSteps => {
                let records = self.document.integral.as_deref().ok_or_else(|| {
                    Error::MissingKey {
                        key: INTEGRAL.to_string(),
                    }
                })?;
                Ok(build_steps_vs_precision_chart(records, kind.options()))
            }
            ChartKind::IntegralDeviation => self.integral_deviation_chart(kind),
        }
    }

    /// Build every chart in the catalogue. Building only fails on missing
    /// data, so those charts are reported and left out.
    pub fn assemble(&self) -> Vec<(ChartKind, Chart)> {
        ChartKind::ALL
            .into_iter()
            .filter_map(|kind| match self.build(kind) {
                Ok(chart) => Some((kind, chart)),
                Err(e) => {
                    warn!("skipping {}: {e}", kind.file_name());
                    None
                }
            })
            .collect()
    }

    fn derivative_chart(&self, kind: ChartKind, category: Category, trim: bool) -> Result<Chart> {
        let series = self.derivative_series(category, trim)?;
        Ok(build_line_chart(
            &series,
            kind.title(),
            "X",
            "Deviation",
            kind.options(),
        ))
    }

    fn integral_deviation_chart(&self, kind: ChartKind) -> Result<Chart> {
        let missing = |key: &str| Error::MissingKey {
            key: key.to_string(),
        };
        let deviations = self
            .document
            .integral_deviation
            .as_deref()
            .ok_or_else(|| missing(INTEGRAL_DEVIATION))?;
        let precisions = self
            .document
            .precision_values
            .as_deref()
            .ok_or_else(|| missing(PRECISION_VALUES))?;

        if deviations.len() != precisions.len() {
            warn!(
                "{INTEGRAL_DEVIATION} has {} values but {PRECISION_VALUES} has {}; using the shorter",
                deviations.len(),
                precisions.len()
            );
        }

        let samples: Vec<Sample> = precisions
            .iter()
            .zip(deviations)
            .map(|(&x, &deviation)| Sample { x, deviation })
            .collect();
        let series = if samples.is_empty() {
            Vec::new()
        } else {
            vec![("deviation".to_string(), samples)]
        };

        Ok(build_line_chart(
            &series,
            kind.title(),
            "Precision",
            "Deviation",
            kind.options(),
        ))
    }
}
