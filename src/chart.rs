use palette::Srgb;

use crate::color::line_color;
use crate::data::model::{IntegralRecord, Sample};

// ---------------------------------------------------------------------------
// Chart – a backend-independent description of one figure
// ---------------------------------------------------------------------------

/// Display switches for a chart. None of them alter the stored points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartOptions {
    pub log_x_axis: bool,
    pub invert_x_axis: bool,
    pub show_markers: bool,
    pub show_grid: bool,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub label: String,
    pub color: Srgb<u8>,
    /// Data coordinates, in draw order.
    pub points: Vec<(f64, f64)>,
}

/// A fully assembled chart, ready for either renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub options: ChartOptions,
    pub lines: Vec<Line>,
}

impl Chart {
    pub fn axis(&self) -> AxisTransform {
        AxisTransform::new(&self.options)
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Drop the first and last points when there are more than two.
pub fn trim_edges<T>(points: &[T]) -> &[T] {
    if points.len() <= 2 {
        points
    } else {
        &points[1..points.len() - 1]
    }
}

/// One line per labelled series, in the given order, coloured by position.
pub fn build_line_chart(
    series_by_label: &[(String, Vec<Sample>)],
    title: &str,
    x_label: &str,
    y_label: &str,
    options: ChartOptions,
) -> Chart {
    let lines = series_by_label
        .iter()
        .enumerate()
        .map(|(idx, (label, samples))| Line {
            label: label.clone(),
            color: line_color(idx),
            points: samples.iter().map(Sample::point).collect(),
        })
        .collect();

    Chart {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        options,
        lines,
    }
}

/// Integration steps against requested precision, in input order.
pub fn build_steps_vs_precision_chart(records: &[IntegralRecord], options: ChartOptions) -> Chart {
    let line = Line {
        label: "steps".to_string(),
        color: line_color(0),
        points: records.iter().map(IntegralRecord::point).collect(),
    };

    Chart {
        title: "Integral Steps vs Precision".to_string(),
        x_label: "Precision".to_string(),
        y_label: "Number of Steps".to_string(),
        options,
        lines: if records.is_empty() { Vec::new() } else { vec![line] },
    }
}

// ---------------------------------------------------------------------------
// AxisTransform – shared x projection for log / inverted axes
// ---------------------------------------------------------------------------

/// Maps data x to a linear plotting coordinate and back for tick labels.
///
/// Log scale plots `log10(x)`; inversion negates the coordinate so larger
/// values appear on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisTransform {
    log: bool,
    invert: bool,
}

impl AxisTransform {
    pub fn new(options: &ChartOptions) -> Self {
        Self {
            log: options.log_x_axis,
            invert: options.invert_x_axis,
        }
    }

    /// Plotting coordinate of `x`, or `None` when it cannot be shown.
    pub fn project(self, x: f64) -> Option<f64> {
        if !x.is_finite() || (self.log && x <= 0.0) {
            return None;
        }
        let v = if self.log { x.log10() } else { x };
        Some(if self.invert { -v } else { v })
    }

    /// Data value at plotting coordinate `v`.
    pub fn unproject(self, v: f64) -> f64 {
        let v = if self.invert { -v } else { v };
        if self.log {
            10f64.powf(v)
        } else {
            v
        }
    }

    /// Whether a data point can be drawn on this axis at all.
    pub fn is_visible(self, (x, y): (f64, f64)) -> bool {
        x.is_finite() && y.is_finite() && !(self.log && x <= 0.0)
    }

    /// Drawable points in data coordinates.
    pub fn visible_points(self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        points.iter().copied().filter(|&p| self.is_visible(p)).collect()
    }

    /// Drawable points in plotting coordinates.
    pub fn project_points(self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        points
            .iter()
            .filter(|&&p| self.is_visible(p))
            .filter_map(|&(x, y)| Some((self.project(x)?, y)))
            .collect()
    }

    /// Tick label for plotting coordinate `v`.
    pub fn label(self, v: f64) -> String {
        format_tick(self.unproject(v), self.log)
    }
}

/// Tick label for a data value. Log axes use three significant digits in
/// exponent form so neighbouring ticks inside one decade stay distinct.
pub fn format_tick(value: f64, log: bool) -> String {
    // `+ 0.0` folds negative zero.
    let value = value + 0.0;
    if log {
        let rounded: f64 = format!("{value:.2e}").parse().unwrap_or(value);
        format!("{rounded:e}")
    } else {
        format!("{}", (value * 1e6).round() / 1e6 + 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(f64, f64)]) -> Vec<Sample> {
        points
            .iter()
            .map(|&(x, deviation)| Sample { x, deviation })
            .collect()
    }

    #[test]
    fn trim_keeps_short_sequences() {
        let empty: [Sample; 0] = [];
        assert!(trim_edges(&empty).is_empty());
        assert_eq!(trim_edges(&[1]), &[1]);
        assert_eq!(trim_edges(&[1, 2]), &[1, 2]);
    }

    #[test]
    fn trim_drops_first_and_last() {
        assert_eq!(trim_edges(&[1, 2, 3]), &[2]);
        assert_eq!(trim_edges(&[1, 2, 3, 4, 5]), &[2, 3, 4]);

        let input = vec![10, 20, 30, 40];
        let trimmed = trim_edges(&input);
        assert_eq!(trimmed.len(), input.len() - 2);
        assert_eq!(input, vec![10, 20, 30, 40]);
    }

    #[test]
    fn empty_mapping_gives_empty_chart() {
        let chart = build_line_chart(&[], "t", "x", "y", ChartOptions::default());
        assert!(chart.lines.is_empty());
        assert_eq!(chart.title, "t");
    }

    #[test]
    fn lines_follow_insertion_order_and_palette() {
        let series = vec![
            ("h = 0.2".to_string(), samples(&[(0.0, 1.0)])),
            ("h = 0.1".to_string(), samples(&[(0.0, 2.0), (1.0, 3.0)])),
        ];
        let chart = build_line_chart(&series, "t", "x", "y", ChartOptions::default());

        let labels: Vec<_> = chart.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["h = 0.2", "h = 0.1"]);
        assert_eq!(chart.lines[0].color, line_color(0));
        assert_eq!(chart.lines[1].color, line_color(1));
        assert_eq!(chart.lines[1].points, vec![(0.0, 2.0), (1.0, 3.0)]);
    }

    #[test]
    fn steps_chart_keeps_input_order_regardless_of_axes() {
        let records = [
            IntegralRecord { precision: 0.1, steps: 10 },
            IntegralRecord { precision: 0.01, steps: 100 },
        ];
        let plain = build_steps_vs_precision_chart(&records, ChartOptions::default());
        let styled = build_steps_vs_precision_chart(
            &records,
            ChartOptions {
                log_x_axis: true,
                invert_x_axis: true,
                show_markers: true,
                show_grid: true,
                show_legend: false,
            },
        );

        for chart in [&plain, &styled] {
            assert_eq!(chart.lines.len(), 1);
            assert_eq!(chart.lines[0].points, vec![(0.1, 10.0), (0.01, 100.0)]);
        }
    }

    #[test]
    fn steps_chart_from_nothing_is_empty() {
        let chart = build_steps_vs_precision_chart(&[], ChartOptions::default());
        assert!(chart.lines.is_empty());
    }

    #[test]
    fn log_inverted_projection_round_trips() {
        let axis = AxisTransform::new(&ChartOptions {
            log_x_axis: true,
            invert_x_axis: true,
            ..ChartOptions::default()
        });
        let v = axis.project(0.01).unwrap();
        assert!((v - 2.0).abs() < 1e-12);
        assert!((axis.unproject(v) - 0.01).abs() < 1e-12);
        assert!(axis.project(0.1).unwrap() < v);
        assert_eq!(axis.project(0.0), None);
        assert_eq!(axis.project(-1.0), None);
        assert_eq!(axis.label(2.0), "1e-2");
        assert_eq!(axis.label(1.5), "3.16e-2");
    }

    #[test]
    fn log_ticks_within_a_decade_are_distinct() {
        let labels: Vec<String> = [0.1, 0.095, 0.09, 0.085, 0.08]
            .into_iter()
            .map(|v| format_tick(v, true))
            .collect();
        assert_eq!(labels, ["1e-1", "9.5e-2", "9e-2", "8.5e-2", "8e-2"]);
        assert_eq!(format_tick(0.08000000000000002, true), "8e-2");
    }

    #[test]
    fn projection_skips_non_finite_points() {
        let axis = AxisTransform::default();
        let points = axis.project_points(&[(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0)]);
        assert_eq!(points, vec![(0.0, 1.0), (2.0, 3.0)]);

        let log = AxisTransform::new(&ChartOptions {
            log_x_axis: true,
            ..ChartOptions::default()
        });
        assert_eq!(
            log.visible_points(&[(0.0, 1.0), (0.1, 2.0), (f64::INFINITY, 3.0)]),
            vec![(0.1, 2.0)]
        );
        assert_eq!(axis.label(0.5), "0.5");
        assert_eq!(axis.label(-0.0), "0");
    }
}
