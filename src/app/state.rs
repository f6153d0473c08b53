// OkoView - app/state.rs
//
// Application state management. Holds the catalog, the entry list shown in
// the overview, the loaded day and the UI flags panels set for gui.rs.
// Owned by the eframe::App implementation.

use crate::app::catalog::LogCatalog;
use crate::core::model::{date_key, CatalogIndex, DayLog, LogFileEntry};
use crate::core::table::SortOrder;
use crate::util::error::CatalogError;
use chrono::{Datelike, Local, NaiveDate};
use std::path::PathBuf;

/// The two views of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Detail,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Date -> file mapping of the last completed scan.
    pub catalog: LogCatalog,

    /// Catalog entries, ascending by date (refreshed on commit).
    pub entries: Vec<LogFileEntry>,

    /// Directory of the running or last requested scan.
    pub scan_path: Option<PathBuf>,

    /// Whether a scan is currently in progress.
    pub scan_in_progress: bool,

    /// (processed, total) of the running scan.
    pub scan_progress: Option<(usize, usize)>,

    /// Order of the overview list.
    pub sort_order: SortOrder,

    /// First day of the month shown by the calendar.
    pub calendar_month: NaiveDate,

    /// Date selected in the calendar or list.
    pub selected_date: Option<NaiveDate>,

    /// The day shown in the detail tab.
    pub day: Option<DayLog>,

    pub active_tab: Tab,

    /// Status message for the status bar.
    pub status_message: String,

    /// config.toml problems found at startup. Kept for the whole session.
    pub config_warnings: Vec<String>,

    /// Skipped files of the current scan and day load failures.
    pub warnings: Vec<String>,

    /// Rejected rows of the loaded day, replaced on every load.
    pub day_warnings: Vec<String>,

    /// Set by panels: scan this directory next frame.
    pub pending_scan: Option<PathBuf>,

    /// Set by panels: cancel the running scan next frame.
    pub request_cancel: bool,

    pub show_warnings: bool,

    pub dark_mode: bool,

    pub debug_mode: bool,
}

impl AppState {
    pub fn new(dark_mode: bool, sort_order: SortOrder, debug_mode: bool) -> Self {
        Self {
            catalog: LogCatalog::new(),
            entries: Vec::new(),
            scan_path: None,
            scan_in_progress: false,
            scan_progress: None,
            sort_order,
            calendar_month: first_of_month(Local::now().date_naive()),
            selected_date: None,
            day: None,
            active_tab: Tab::Overview,
            status_message: "Ready. Open a log directory to begin.".to_string(),
            config_warnings: Vec::new(),
            warnings: Vec::new(),
            day_warnings: Vec::new(),
            pending_scan: None,
            request_cancel: false,
            show_warnings: false,
            dark_mode,
            debug_mode,
        }
    }

    /// Commit a finished index and refresh everything derived from the catalog.
    ///
    /// The loaded day is kept only if its date is still catalogued.
    pub fn apply_index(&mut self, index: CatalogIndex) {
        let report = self.catalog.commit(index);
        self.entries = report.entries;
        self.scan_in_progress = false;
        self.scan_progress = None;

        if self
            .day
            .as_ref()
            .is_some_and(|d| !self.catalog.contains(d.date))
        {
            self.day = None;
            self.day_warnings.clear();
            self.active_tab = Tab::Overview;
        }
        if self
            .selected_date
            .is_some_and(|d| !self.catalog.contains(d))
        {
            self.selected_date = None;
        }

        // Show the newest month that has data.
        if let Some(last) = self.entries.last() {
            self.calendar_month = first_of_month(last.date);
        }

        self.status_message = format!(
            "{} day(s) in {}{}",
            self.entries.len(),
            report.root.display(),
            if report.skipped.is_empty() {
                String::new()
            } else {
                format!(", {} file(s) skipped", report.skipped.len())
            }
        );
    }

    /// Load `date` into the detail tab.
    ///
    /// On failure the previously loaded day stays visible and the error is
    /// shown in the status bar.
    pub fn open_day(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
        let key = date_key(date);
        match self.catalog.load_day(&key) {
            Ok(day) => {
                self.day_warnings = day.rejected.iter().map(ToString::to_string).collect();
                self.status_message = format!(
                    "{key}: {} rows{}",
                    day.rows.len(),
                    if day.rejected.is_empty() {
                        String::new()
                    } else {
                        format!(", {} rejected", day.rejected.len())
                    }
                );
                self.day = Some(day);
                self.active_tab = Tab::Detail;
            }
            Err(CatalogError::NotFound { .. }) => {
                self.status_message = format!("No log for {key}.");
            }
            Err(e) => {
                tracing::warn!(date = %key, error = %e, "Day load failed");
                self.status_message = format!("Cannot open {key}: {e}");
                let message = e.to_string();
                if !self.warnings.contains(&message) {
                    self.warnings.push(message);
                }
            }
        }
    }

    /// Reset scan-derived view state ahead of a new scan. The catalog itself
    /// is left alone until the new scan completes; config and day warnings
    /// are kept.
    pub fn begin_scan(&mut self, path: PathBuf) {
        self.scan_path = Some(path);
        self.scan_in_progress = true;
        self.scan_progress = None;
        self.warnings.clear();
        self.status_message = "Scanning...".to_string();
    }

    /// Every warning, config first, then scan, then the loaded day.
    pub fn all_warnings(&self) -> impl Iterator<Item = &str> {
        self.config_warnings
            .iter()
            .chain(&self.warnings)
            .chain(&self.day_warnings)
            .map(String::as_str)
    }

    pub fn warning_count(&self) -> usize {
        self.config_warnings.len() + self.warnings.len() + self.day_warnings.len()
    }

    pub fn clear_warnings(&mut self) {
        self.config_warnings.clear();
        self.warnings.clear();
        self.day_warnings.clear();
    }

    /// Move the calendar by `months` (negative goes back).
    pub fn shift_calendar(&mut self, months: i32) {
        let total = self.calendar_month.year() * 12 + self.calendar_month.month0() as i32 + months;
        let (year, month0) = (total.div_euclid(12), total.rem_euclid(12));
        if let Some(d) = NaiveDate::from_ymd_opt(year, month0 as u32 + 1, 1) {
            self.calendar_month = d;
        }
    }
}

/// First day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    fn state() -> AppState {
        AppState::new(true, SortOrder::Descending, false)
    }

    fn scanned(files: &[(&str, &str)]) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let cancel = AtomicBool::new(false);
        let index = match crate::app::catalog::build_index(dir.path(), |_| {}, &cancel).unwrap() {
            crate::app::catalog::IndexOutcome::Built(index) => index,
            other => panic!("expected built index, got {other:?}"),
        };
        let mut s = state();
        s.apply_index(index);
        (dir, s)
    }

    #[test]
    fn test_apply_index_populates_entries() {
        let (_dir, s) = scanned(&[
            ("CM130513.csv", "Datum;Zeit\n13.05.2013;00:00:10\n"),
            ("CM130602.csv", "Datum;Zeit\n02.06.2013;00:00:10\n"),
            ("CM130603.csv", "Datum;Zeit\n"),
        ]);
        assert_eq!(s.entries.len(), 2);
        assert!(!s.scan_in_progress);
        assert_eq!(
            s.calendar_month,
            NaiveDate::from_ymd_opt(2013, 6, 1).unwrap()
        );
        assert!(s.status_message.contains("1 file(s) skipped"));
    }

    #[test]
    fn test_open_day_switches_to_detail() {
        let (_dir, mut s) = scanned(&[("CM130513.csv", "Datum;Zeit\n13.05.2013;00:00:10\n")]);
        s.open_day(NaiveDate::from_ymd_opt(2013, 5, 13).unwrap());
        assert_eq!(s.active_tab, Tab::Detail);
        assert_eq!(s.day.as_ref().map(|d| d.rows.len()), Some(1));
    }

    #[test]
    fn test_open_missing_day_keeps_current_view() {
        let (_dir, mut s) = scanned(&[("CM130513.csv", "Datum;Zeit\n13.05.2013;00:00:10\n")]);
        s.open_day(NaiveDate::from_ymd_opt(2013, 5, 14).unwrap());
        assert_eq!(s.active_tab, Tab::Overview);
        assert!(s.day.is_none());
        assert!(s.status_message.contains("No log for 2013-05-14"));
    }

    #[test]
    fn test_rejected_rows_become_warnings() {
        let (_dir, mut s) = scanned(&[(
            "CM130513.csv",
            "Datum;Zeit;AT\n13.05.2013;00:00:10;11,0\n13.05.2013;00:01:10\n",
        )]);
        s.open_day(NaiveDate::from_ymd_opt(2013, 5, 13).unwrap());
        assert_eq!(s.day_warnings.len(), 1);
        assert_eq!(s.warning_count(), 1);
        assert!(s.status_message.contains("1 rejected"));
    }

    #[test]
    fn test_reopening_day_does_not_duplicate_warnings() {
        let (_dir, mut s) = scanned(&[(
            "CM130513.csv",
            "Datum;Zeit;AT\n13.05.2013;00:00:10;11,0\n13.05.2013;00:01:10\n",
        )]);
        let date = NaiveDate::from_ymd_opt(2013, 5, 13).unwrap();
        s.open_day(date);
        s.open_day(date);
        s.open_day(date);
        assert_eq!(s.warning_count(), 1);
    }

    #[test]
    fn test_config_warnings_survive_new_scan() {
        let mut s = state();
        s.config_warnings.push("[ui] theme = \"sepia\" is not recognised.".to_string());
        s.warnings.push("stale skipped file".to_string());

        s.begin_scan(PathBuf::from("/logs"));

        assert!(s.warnings.is_empty());
        let all: Vec<_> = s.all_warnings().collect();
        assert_eq!(all, ["[ui] theme = \"sepia\" is not recognised."]);
    }

    #[test]
    fn test_shift_calendar_crosses_years() {
        let mut s = state();
        s.calendar_month = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        s.shift_calendar(-1);
        assert_eq!(s.calendar_month, NaiveDate::from_ymd_opt(2012, 12, 1).unwrap());
        s.shift_calendar(13);
        assert_eq!(s.calendar_month, NaiveDate::from_ymd_opt(2014, 1, 1).unwrap());
    }
}
