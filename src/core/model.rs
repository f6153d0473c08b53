// OkoView - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no UI.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::ParseError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// =============================================================================
// Catalog entries
// =============================================================================

/// One discovered day file with the date derived from its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogFileEntry {
    /// Date of the first data row. Unique within a catalog.
    pub date: NaiveDate,

    /// Location of the source file.
    pub path: PathBuf,
}

impl LogFileEntry {
    /// Canonical `YYYY-MM-DD` form of the entry's date.
    pub fn key(&self) -> String {
        date_key(self.date)
    }

    /// File name for display, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Format a date as a catalog key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(constants::KEY_DATE_FORMAT).to_string()
}

/// Parse a catalog key. Returns `None` for anything but a valid `YYYY-MM-DD` date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), constants::KEY_DATE_FORMAT).ok()
}

// =============================================================================
// Parsed day
// =============================================================================

/// One sampled instant from a day file's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    /// 1-based line in the source file, counting blank lines.
    pub line_number: u64,

    /// Field values in file order: date, time, then sensor/state columns.
    pub fields: Vec<String>,
}

impl LogRow {
    pub fn get(&self, col: usize) -> Option<&str> {
        self.fields.get(col).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The `HH:MM:SS` sample time (second column).
    pub fn time(&self) -> Option<&str> {
        self.get(1)
    }
}

/// A parsed day file.
#[derive(Debug, Serialize)]
pub struct DayLog {
    pub date: NaiveDate,
    pub path: PathBuf,

    /// Header names; every row has exactly this many fields.
    pub columns: Vec<String>,

    pub rows: Vec<LogRow>,

    /// Non-fatal problems: rows that were dropped because they did not fit
    /// the header. Capped at `MAX_REJECTED_ROWS`.
    #[serde(skip)]
    pub rejected: Vec<ParseError>,
}

impl DayLog {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

// =============================================================================
// Scan results
// =============================================================================

/// A matching file that could not be catalogued, with the reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ParseError,
}

/// A freshly built date index, not yet committed to a catalog.
///
/// Produced by `app::catalog::build_index` (possibly on a worker thread) and
/// consumed by `LogCatalog::commit`.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    /// Directory the index was built from.
    pub root: PathBuf,

    /// Date to path, last processed file wins.
    pub files: BTreeMap<NaiveDate, PathBuf>,

    /// Matching files that were skipped.
    pub skipped: Vec<SkippedFile>,
}

impl CatalogIndex {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ..Default::default()
        }
    }

    /// Entries in ascending date order.
    pub fn entries(&self) -> Vec<LogFileEntry> {
        entries_of(&self.files)
    }
}

/// Flatten a date map into entries, ascending by date.
pub fn entries_of(files: &BTreeMap<NaiveDate, PathBuf>) -> Vec<LogFileEntry> {
    files
        .iter()
        .map(|(date, path)| LogFileEntry {
            date: *date,
            path: path.clone(),
        })
        .collect()
}

/// What a completed scan found.
#[derive(Debug)]
pub struct ScanReport {
    pub root: PathBuf,

    /// Catalogued entries, ascending by date.
    pub entries: Vec<LogFileEntry>,

    /// Matching files that were not catalogued.
    pub skipped: Vec<SkippedFile>,
}

/// Result of a scan that did not fail at directory level.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The catalog now holds the new mapping.
    Completed(ScanReport),

    /// Cancelled after `processed` of `total` files; the catalog is unchanged.
    Cancelled { processed: usize, total: usize },
}

/// Per-file progress passed to the scan callback.
#[derive(Debug, Clone, Copy)]
pub struct ScanTick<'a> {
    /// Files processed so far, including this one.
    pub processed: usize,
    pub total: usize,
    pub path: &'a Path,
}

/// Progress messages sent from the background scan thread to the UI thread.
#[derive(Debug)]
pub enum ScanProgress {
    /// Directory listed; `total_files` day files will be read.
    Listed { total_files: usize },

    FileProcessed {
        path: PathBuf,
        processed: usize,
        total: usize,
    },

    /// A day file could not be catalogued (non-fatal).
    FileSkipped { path: PathBuf, reason: String },

    /// Index built; the receiver commits it to its catalog.
    Completed { index: CatalogIndex },

    Cancelled { processed: usize, total: usize },

    /// Directory-level failure.
    Failed { error: String },
}
