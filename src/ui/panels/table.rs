// OkoView - ui/panels/table.rs
//
// Generic virtual-scrolled grid for any `TableView`.
// Only the visible rows are laid out, so a full day (~1440 rows) stays cheap.

use crate::core::table::TableView;
use crate::ui::theme;

/// Width for a column titled `header`.
fn column_width(header: &str) -> f32 {
    (header.chars().count() as f32 * theme::CHAR_WIDTH + 16.0).max(theme::MIN_COLUMN_WIDTH)
}

/// Render `table` with a fixed header row.
///
/// `selected` highlights one display row. Returns the row clicked this frame.
pub fn render(
    ui: &mut egui::Ui,
    id: &str,
    table: &dyn TableView,
    selected: Option<usize>,
) -> Option<usize> {
    let widths: Vec<f32> = (0..table.column_count())
        .map(|col| column_width(table.header(col).unwrap_or_default()))
        .collect();
    let mut clicked = None;

    egui::ScrollArea::horizontal()
        .id_salt((id, "h"))
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    for (col, width) in widths.iter().enumerate() {
                        let title = table.header(col).unwrap_or_default();
                        ui.add_sized(
                            [*width, theme::ROW_HEIGHT],
                            egui::Label::new(egui::RichText::new(title).strong()).truncate(),
                        );
                    }
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .id_salt((id, "v"))
                    .auto_shrink([false; 2])
                    .show_rows(ui, theme::ROW_HEIGHT, table.row_count(), |ui, row_range| {
                        for row in row_range {
                            let is_selected = selected == Some(row);
                            ui.horizontal(|ui| {
                                for (col, width) in widths.iter().enumerate() {
                                    let text = table.cell(row, col).unwrap_or_default();
                                    let resp = ui.add_sized(
                                        [*width, theme::ROW_HEIGHT],
                                        egui::SelectableLabel::new(
                                            is_selected,
                                            egui::RichText::new(text.as_ref()).monospace(),
                                        ),
                                    );
                                    if resp.clicked() {
                                        clicked = Some(row);
                                    }
                                }
                            });
                        }
                    });
            });
        });

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_width_has_floor() {
        assert_eq!(column_width(""), theme::MIN_COLUMN_WIDTH);
        assert!(column_width("Kesseltemperatur Soll [°C]") > theme::MIN_COLUMN_WIDTH);
    }
}
