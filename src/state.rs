use std::path::PathBuf;

use crate::assembler::ChartKind;
use crate::chart::Chart;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// One chart as shown in the viewer.
pub struct ViewerEntry {
    pub kind: ChartKind,
    pub chart: Chart,
    /// Where the PNG was written, if it was.
    pub written_to: Option<PathBuf>,
}

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    pub entries: Vec<ViewerEntry>,
    /// Index into `entries` of the chart in the central panel.
    pub selected: usize,
}

impl ViewerState {
    pub fn new(entries: Vec<ViewerEntry>) -> Self {
        Self {
            entries,
            selected: 0,
        }
    }

    pub fn current(&self) -> Option<&ViewerEntry> {
        self.entries.get(self.selected)
    }

    /// Select a chart; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = index;
        }
    }

    /// Number of entries whose PNG was written successfully.
    pub fn written_count(&self) -> usize {
        self.entries.iter().filter(|e| e.written_to.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_line_chart, ChartOptions};

    fn entry(kind: ChartKind, written: bool) -> ViewerEntry {
        ViewerEntry {
            kind,
            chart: build_line_chart(&[], kind.title(), "x", "y", ChartOptions::default()),
            written_to: written.then(|| PathBuf::from(kind.file_name())),
        }
    }

    #[test]
    fn selection_stays_in_range() {
        let mut state = ViewerState::new(vec![
            entry(ChartKind::FirstDerivative, true),
            entry(ChartKind::IntegralSteps, false),
        ]);
        assert_eq!(state.current().unwrap().kind, ChartKind::FirstDerivative);

        state.select(1);
        assert_eq!(state.current().unwrap().kind, ChartKind::IntegralSteps);

        state.select(7);
        assert_eq!(state.selected, 1);
        assert_eq!(state.written_count(), 1);
    }

    #[test]
    fn empty_state_has_no_current() {
        assert!(ViewerState::new(Vec::new()).current().is_none());
    }
}
