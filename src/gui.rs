// OkoView - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the UI panels and manages the scan lifecycle.

use crate::app::scan::ScanManager;
use crate::app::state::{AppState, Tab};
use crate::core::export;
use crate::core::model::{date_key, ScanProgress};
use crate::util::error::ExportError;
use crate::{platform, ui};
use std::io::Write;
use std::path::Path;

/// Export formats offered by the File menu.
#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// The OkoView application.
pub struct OkoViewApp {
    pub state: AppState,
    pub scan_manager: ScanManager,
}

impl OkoViewApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            scan_manager: ScanManager::new(),
        }
    }

    fn handle_progress(&mut self, msg: ScanProgress) {
        match msg {
            ScanProgress::Listed { total_files } => {
                self.state.scan_progress = Some((0, total_files));
                self.state.status_message = format!("Reading {total_files} log file(s)...");
            }
            ScanProgress::FileProcessed {
                processed, total, ..
            } => {
                self.state.scan_progress = Some((processed, total));
                self.state.status_message = format!("Reading log files ({processed}/{total})...");
            }
            ScanProgress::FileSkipped { path, reason } => {
                tracing::debug!(file = %path.display(), reason = %reason, "File skipped");
                self.state.warnings.push(reason);
            }
            ScanProgress::Completed { index } => {
                self.state.apply_index(index);
            }
            ScanProgress::Cancelled { processed, total } => {
                self.state.scan_in_progress = false;
                self.state.scan_progress = None;
                self.state.status_message = format!(
                    "Scan cancelled after {processed}/{total} files. Previous catalog kept."
                );
            }
            ScanProgress::Failed { error } => {
                self.state.scan_in_progress = false;
                self.state.scan_progress = None;
                self.state.status_message = format!("Scan failed: {error}");
            }
        }
    }

    /// Ask for a destination and write the loaded day there.
    fn export_day(&mut self, format: ExportFormat) {
        let Some(day) = self.state.day.as_ref() else {
            return;
        };
        let ext = format.extension();
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(ext.to_uppercase(), &[ext])
            .set_file_name(format!("{}.{ext}", date_key(day.date)))
            .save_file()
        else {
            return;
        };

        let result = std::fs::File::create(&dest)
            .map_err(|source| ExportError::Io {
                path: dest.clone(),
                source,
            })
            .and_then(|file| {
                let mut writer = std::io::BufWriter::new(file);
                let rows = match format {
                    ExportFormat::Csv => export::export_csv(day, &mut writer, &dest)?,
                    ExportFormat::Json => export::export_json(day, &mut writer, &dest)?,
                };
                writer.flush().map_err(|source| ExportError::Io {
                    path: dest.clone(),
                    source,
                })?;
                Ok(rows)
            });

        self.state.status_message = match result {
            Ok(rows) => {
                tracing::info!(file = %dest.display(), rows, "Day exported");
                format!("Exported {rows} rows to {}.", dest.display())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                format!("Export failed: {e}")
            }
        };
    }
}

impl eframe::App for OkoViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for scan progress
        let messages = self.scan_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            self.handle_progress(msg);
        }
        // Repaint when scan is active so progress updates appear promptly.
        if had_messages || self.state.scan_in_progress {
            ctx.request_repaint();
        }

        // Requests raised by panels on the previous frame.
        if let Some(path) = self.state.pending_scan.take() {
            self.state.begin_scan(path.clone());
            self.scan_manager.start_scan(path);
        }
        if self.state.request_cancel {
            self.state.request_cancel = false;
            self.scan_manager.cancel_scan();
        }

        ui::theme::apply(ctx, self.state.dark_mode);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Directory\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new().pick_folder() {
                            self.state.pending_scan = Some(path);
                        }
                        ui.close_menu();
                    }
                    let rescan_root = self
                        .state
                        .catalog
                        .root()
                        .map(Path::to_path_buf)
                        .or_else(|| self.state.scan_path.clone());
                    ui.add_enabled_ui(rescan_root.is_some() && !self.state.scan_in_progress, |ui| {
                        if ui.button("Rescan").clicked() {
                            self.state.pending_scan = rescan_root.clone();
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    let has_day = self.state.day.is_some();
                    ui.add_enabled_ui(has_day, |ui| {
                        if ui.button("Export Day as CSV\u{2026}").clicked() {
                            self.export_day(ExportFormat::Csv);
                            ui.close_menu();
                        }
                        if ui.button("Export Day as JSON\u{2026}").clicked() {
                            self.export_day(ExportFormat::Json);
                            ui.close_menu();
                        }
                        if ui.button("Reveal Day File").clicked() {
                            if let Some(day) = &self.state.day {
                                platform::fs::reveal_in_file_manager(&day.path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Overview").clicked() {
                        self.state.active_tab = Tab::Overview;
                        ui.close_menu();
                    }
                    if ui.button("Detail").clicked() {
                        self.state.active_tab = Tab::Detail;
                        ui.close_menu();
                    }
                    ui.separator();
                    let label = format!("Warnings ({})", self.state.warning_count());
                    if ui.button(label).clicked() {
                        self.state.show_warnings = true;
                        ui.close_menu();
                    }
                    ui.checkbox(&mut self.state.dark_mode, "Dark mode");
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.scan_in_progress {
                    ui.spinner();
                    if let Some((processed, total)) = self.state.scan_progress {
                        let fraction = if total == 0 {
                            0.0
                        } else {
                            processed as f32 / total as f32
                        };
                        ui.add(
                            egui::ProgressBar::new(fraction)
                                .desired_width(120.0)
                                .fill(ui::theme::SCANNING_COLOUR),
                        );
                    }
                }
                ui.label(&self.state.status_message);
                // Cancel button visible only while a scan is running
                if self.state.scan_in_progress && ui.small_button("Cancel").clicked() {
                    self.state.request_cancel = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let warning_count = self.state.warning_count();
                    if warning_count > 0
                        && ui
                            .small_button(format!("\u{26a0} {warning_count}"))
                            .on_hover_text("Show warnings")
                            .clicked()
                    {
                        self.state.show_warnings = true;
                    }
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("debug").small().weak());
                    }
                });
            });
        });

        // Central panel with tabs
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.state.active_tab, Tab::Overview, "Overview");
                ui.add_enabled_ui(self.state.day.is_some(), |ui| {
                    ui.selectable_value(&mut self.state.active_tab, Tab::Detail, "Detail");
                });
            });
            ui.separator();
            match self.state.active_tab {
                Tab::Overview => ui::panels::overview::render(ui, &mut self.state),
                Tab::Detail => ui::panels::detail::render(ui, &self.state),
            }
        });

        ui::panels::warnings::render(ctx, &mut self.state);
    }
}
