// OkoView - ui/panels/detail.rs
//
// Detail tab: the parsed rows of the loaded day.

use crate::app::state::AppState;
use crate::core::model::date_key;
use crate::core::table::DayTable;
use crate::ui::panels::table;

/// Render the detail tab.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let Some(day) = state.day.as_ref() else {
        ui.centered_and_justified(|ui| {
            ui.label("Select a day in the overview.");
        });
        return;
    };

    egui::Grid::new("day_header")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Date:");
            ui.strong(date_key(day.date));
            ui.end_row();

            ui.label("File:");
            ui.label(day.path.display().to_string());
            ui.end_row();

            ui.label("Rows:");
            if day.rejected.is_empty() {
                ui.label(format!("{} ({} columns)", day.rows.len(), day.column_count()));
            } else {
                ui.label(format!(
                    "{} ({} columns, {} rejected)",
                    day.rows.len(),
                    day.column_count(),
                    day.rejected.len()
                ));
            }
            ui.end_row();
        });
    ui.separator();

    table::render(ui, "day_table", &DayTable::new(day), None);
}
