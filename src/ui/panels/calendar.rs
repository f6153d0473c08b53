// OkoView - ui/panels/calendar.rs
//
// Month grid. Days with a catalogued file are clickable; clicking one opens
// it in the detail tab.

use crate::app::state::AppState;
use crate::ui::theme;
use chrono::{Datelike, NaiveDate};

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Number of days in the month starting at `first`.
fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

/// Render the calendar for `state.calendar_month`.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let month = state.calendar_month;
    let mut shift = 0;
    let mut open = None;

    ui.horizontal(|ui| {
        if ui.small_button("\u{25c0}").on_hover_text("Previous month").clicked() {
            shift = -1;
        }
        ui.label(egui::RichText::new(month.format("%B %Y").to_string()).strong());
        if ui.small_button("\u{25b6}").on_hover_text("Next month").clicked() {
            shift = 1;
        }
    });
    ui.add_space(4.0);

    let log_colour = theme::log_day_colour(state.dark_mode);
    let offset = month.weekday().num_days_from_monday();
    let cell = egui::vec2(theme::CALENDAR_CELL, theme::CALENDAR_CELL);

    egui::Grid::new("calendar_grid")
        .num_columns(7)
        .spacing([2.0, 2.0])
        .show(ui, |ui| {
            for name in WEEKDAYS {
                ui.label(egui::RichText::new(name).small().weak());
            }
            ui.end_row();

            for _ in 0..offset {
                ui.label("");
            }
            for day in 1..=days_in_month(month) {
                let Some(date) = month.with_day(day) else {
                    continue;
                };
                let has_log = state.catalog.contains(date);
                let mut text = egui::RichText::new(day.to_string());
                if has_log {
                    text = text.strong().color(log_colour);
                }
                let resp = ui.add_enabled(
                    has_log,
                    egui::Button::new(text)
                        .selected(state.selected_date == Some(date))
                        .min_size(cell),
                );
                if resp.clicked() {
                    open = Some(date);
                }
                if (offset + day) % 7 == 0 {
                    ui.end_row();
                }
            }
        });

    if shift != 0 {
        state.shift_calendar(shift);
    }
    if let Some(date) = open {
        state.open_day(date);
    }
}
