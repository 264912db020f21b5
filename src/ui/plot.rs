use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn chart_plot(ui: &mut Ui, state: &ViewerState) {
    let entry = match state.current() {
        Some(entry) => entry,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No charts to show");
            });
            return;
        }
    };
    let chart = &entry.chart;
    let options = chart.options;
    let axis = chart.axis();

    ui.heading(&chart.title);

    let mut plot = Plot::new(("chart_plot", state.selected))
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .show_grid(options.show_grid)
        .x_axis_formatter(move |mark, _range| axis.label(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if options.show_legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for line in &chart.lines {
            let (r, g, b) = line.color.into_components();
            let color = Color32::from_rgb(r, g, b);

            let points: Vec<[f64; 2]> = axis
                .project_points(&line.points)
                .into_iter()
                .map(|(x, y)| [x, y])
                .collect();

            if options.show_markers {
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .name(&line.label)
                        .color(color)
                        .radius(3.0),
                );
            }

            plot_ui.line(
                Line::new(PlotPoints::from(points))
                    .name(&line.label)
                    .color(color)
                    .width(1.5),
            );
        }
    });
}
