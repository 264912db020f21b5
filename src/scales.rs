use std::ops::Range;

use plotters::coord::combinators::{IntoLogRange, LogCoord};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;

use crate::chart::ChartOptions;

/// Fewer log key points than this and the axis falls back to linear ticks,
/// which happens when the range sits inside a single decade.
const MIN_LOG_TICKS: usize = 3;

/// X coordinate for the PNG renderer: linear or logarithmic, optionally
/// drawn right-to-left.
pub struct XCoord {
    linear: RangedCoordf64,
    log: Option<LogCoord<f64>>,
    inverted: bool,
}

impl XCoord {
    /// `range` must be positive when `options.log_x_axis` is set.
    pub fn new(range: Range<f64>, options: &ChartOptions) -> Self {
        Self {
            linear: range.clone().into(),
            log: options.log_x_axis.then(|| range.log_scale().into()),
            inverted: options.invert_x_axis,
        }
    }
}

impl Ranged for XCoord {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let pixel = match &self.log {
            Some(log) => log.map(value, limit),
            None => self.linear.map(value, limit),
        };
        if self.inverted {
            limit.1 - pixel + limit.0
        } else {
            pixel
        }
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        let max_points = hint.max_num_points();
        match &self.log {
            Some(log) => {
                let points = log.key_points(hint);
                if points.len() >= MIN_LOG_TICKS {
                    points
                } else {
                    self.linear.key_points(max_points)
                }
            }
            None => self.linear.key_points(hint),
        }
    }

    fn range(&self) -> Range<f64> {
        self.linear.range()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::chart::format_tick;

    fn log_inverted() -> ChartOptions {
        ChartOptions {
            log_x_axis: true,
            invert_x_axis: true,
            ..ChartOptions::default()
        }
    }

    #[test]
    fn inverted_log_axis_puts_coarse_precision_left() {
        let coord = XCoord::new(0.01..0.1, &log_inverted());
        let coarse = coord.map(&0.1, (0, 1000));
        let fine = coord.map(&0.01, (0, 1000));
        assert!(coarse < fine);
        assert_eq!(coarse, 0);
        assert_eq!(fine, 1000);

        let midpoint = coord.map(&10f64.powf(-1.5), (0, 1000));
        assert!((midpoint - 500).abs() <= 1);
    }

    #[test]
    fn linear_axis_keeps_direction() {
        let coord = XCoord::new(0.0..10.0, &ChartOptions::default());
        assert!(coord.map(&1.0, (0, 100)) < coord.map(&9.0, (0, 100)));
    }

    #[test]
    fn narrow_log_range_has_distinct_tick_labels() {
        let coord = XCoord::new(0.08..0.1, &log_inverted());
        let ticks = coord.key_points(10);
        assert!(ticks.len() >= MIN_LOG_TICKS, "{ticks:?}");

        let labels: HashSet<String> = ticks.iter().map(|&v| format_tick(v, true)).collect();
        assert_eq!(labels.len(), ticks.len(), "{labels:?}");
    }

    #[test]
    fn decade_ticks_land_on_powers_of_ten() {
        let coord = XCoord::new(0.0005..2.0, &log_inverted());
        let labels: Vec<String> = coord
            .key_points(10)
            .into_iter()
            .map(|v| format_tick(v, true))
            .collect();
        for expected in ["1e-3", "1e-2", "1e-1", "1e0"] {
            assert!(labels.iter().any(|l| l == expected), "{labels:?}");
        }
    }
}
