use eframe::egui::{RichText, ScrollArea, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – chart list
// ---------------------------------------------------------------------------

/// Render the left chart list.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Charts");
    ui.separator();

    if state.entries.is_empty() {
        ui.label("Nothing was rendered.");
        return;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, entry) in state.entries.iter().enumerate() {
                let mut text = RichText::new(entry.kind.title());
                if entry.written_to.is_none() {
                    text = text.weak();
                }
                if ui
                    .selectable_label(state.selected == idx, text)
                    .on_hover_text(entry.kind.file_name())
                    .clicked()
                {
                    clicked = Some(idx);
                }
            }
        });

    if let Some(idx) = clicked {
        state.select(idx);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &ViewerState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Deviation Plots");
        ui.separator();
        ui.label(format!(
            "{} of {} charts saved",
            state.written_count(),
            state.entries.len()
        ));
        if let Some(path) = state.current().and_then(|e| e.written_to.as_ref()) {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).monospace());
        }
    });
}
