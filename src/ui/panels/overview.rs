// OkoView - ui/panels/overview.rs
//
// Overview tab: calendar on the left, sortable list of catalogued days on
// the right.

use crate::app::state::AppState;
use crate::core::table::EntryTable;
use crate::ui::panels::{calendar, table};
use crate::ui::theme;

/// Render the overview tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::SidePanel::left("calendar_panel")
        .resizable(false)
        .exact_width(theme::CALENDAR_WIDTH)
        .show_inside(ui, |ui| {
            calendar::render(ui, state);
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        render_entry_list(ui, state);
    });
}

fn render_entry_list(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.strong(format!("{} day(s)", state.entries.len()));
        if let Some(root) = state.catalog.root() {
            ui.label(egui::RichText::new(root.display().to_string()).small().weak());
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(state.sort_order.label())
                .on_hover_text("Toggle date order")
                .clicked()
            {
                state.sort_order = state.sort_order.toggled();
            }
        });
    });
    ui.separator();

    if state.entries.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No log files catalogued.");
        });
        return;
    }

    let view = EntryTable::new(&state.entries, state.sort_order);
    let selected = state
        .selected_date
        .and_then(|date| (0..state.entries.len()).find(|&r| view.entry(r).map(|e| e.date) == Some(date)));
    let clicked = table::render(ui, "entry_table", &view, selected)
        .and_then(|row| view.entry(row))
        .map(|entry| entry.date);

    if let Some(date) = clicked {
        state.open_day(date);
    }
}
