// OkoView - ui/panels/warnings.rs
//
// Window listing skipped files and rejected rows.

use crate::app::state::AppState;

/// Render the warnings window (if state.show_warnings is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_warnings {
        return;
    }

    let mut open = true;
    egui::Window::new(format!("Warnings ({})", state.warning_count()))
        .id(egui::Id::new("warnings_window"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(520.0)
        .show(ctx, |ui| {
            if state.warning_count() == 0 {
                ui.label(egui::RichText::new("No warnings.").weak());
                return;
            }
            egui::ScrollArea::vertical()
                .max_height(360.0)
                .show(ui, |ui| {
                    for warning in state.all_warnings() {
                        ui.label(egui::RichText::new(warning).small());
                    }
                });
            ui.separator();
            if ui.button("Clear").clicked() {
                state.clear_warnings();
            }
        });

    if !open {
        state.show_warnings = false;
    }
}
