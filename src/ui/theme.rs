// OkoView - ui/theme.rs
//
// Colours and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Day numbers in the calendar that have a log file.
pub fn log_day_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(74, 222, 128) // Green 400
    } else {
        Color32::from_rgb(21, 128, 61) // Green 700
    }
}

/// Status bar colour while a scan is running.
pub const SCANNING_COLOUR: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Switch egui between dark and light visuals.
pub fn apply(ctx: &egui::Context, dark_mode: bool) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
}

/// Layout constants.
pub const CALENDAR_WIDTH: f32 = 260.0;
pub const CALENDAR_CELL: f32 = 30.0;
pub const ROW_HEIGHT: f32 = 20.0;

/// Approximate width of one character of body text, used to size table columns.
pub const CHAR_WIDTH: f32 = 7.5;
pub const MIN_COLUMN_WIDTH: f32 = 60.0;
