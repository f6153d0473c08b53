// OkoView - app/catalog.rs
//
// The date -> day file catalog for one log directory.
//
// A scan is split in two so the expensive half can run anywhere:
//   - `build_index` lists the directory and reads each file's date into a
//     fresh `CatalogIndex`. It never sees the catalog.
//   - `LogCatalog::commit` swaps that index in with a single assignment.
// A cancelled or failed build therefore cannot leave a half-updated catalog.
//
// The catalog itself is not synchronised; callers serialise access (the GUI
// builds on a worker thread and commits on the UI thread).

use crate::core::discovery;
use crate::core::model::{
    date_key, entries_of, parse_date_key, CatalogIndex, DayLog, LogFileEntry, ScanOutcome,
    ScanReport, ScanTick, SkippedFile,
};
use crate::core::parser;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{CatalogError, DiscoveryError, ParseError};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of `build_index`.
#[derive(Debug)]
pub enum IndexOutcome {
    Built(CatalogIndex),
    Cancelled { processed: usize, total: usize },
}

/// Build a date index for the day files in `root`.
///
/// `on_progress` is called after every file; `cancel` is checked before every
/// file and once more after the last one. Files whose date cannot be read are
/// collected in `CatalogIndex::skipped` and do not stop the build.
pub fn build_index<F>(
    root: &Path,
    mut on_progress: F,
    cancel: &AtomicBool,
) -> Result<IndexOutcome, DiscoveryError>
where
    F: FnMut(ScanTick<'_>),
{
    let (paths, warnings) = discovery::discover_log_files(root)?;
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Directory entry skipped");
    }

    let total = paths.len();
    let mut index = CatalogIndex::new(root);

    for (idx, path) in paths.iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            tracing::debug!(processed = idx, total, "Scan cancelled");
            return Ok(IndexOutcome::Cancelled {
                processed: idx,
                total,
            });
        }

        match read_file_date(path) {
            Ok(date) => {
                if let Some(previous) = index.files.insert(date, path.clone()) {
                    tracing::debug!(
                        date = %date_key(date),
                        replaced = %previous.display(),
                        by = %path.display(),
                        "Duplicate date, later file wins"
                    );
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "Day file skipped");
                index.skipped.push(SkippedFile {
                    path: path.clone(),
                    error,
                });
            }
        }

        on_progress(ScanTick {
            processed: idx + 1,
            total,
            path,
        });
    }

    if cancel.load(Ordering::SeqCst) {
        tracing::debug!(processed = total, total, "Scan cancelled");
        return Ok(IndexOutcome::Cancelled {
            processed: total,
            total,
        });
    }

    Ok(IndexOutcome::Built(index))
}

/// Read the date of a single day file. The file handle is closed on return.
fn read_file_date(path: &Path) -> Result<NaiveDate, ParseError> {
    let lines = fs::lossy_lines(path).map_err(|source| ParseError::Io {
        file: path.to_path_buf(),
        source,
    })?;
    parser::extract_date(lines, path)
}

// =============================================================================
// LogCatalog
// =============================================================================

/// Date -> day file mapping for the most recently completed scan.
#[derive(Debug, Default)]
pub struct LogCatalog {
    root: Option<PathBuf>,
    files: BTreeMap<NaiveDate, PathBuf>,
}

impl LogCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `root` and, unless cancelled, replace the catalog's mapping.
    ///
    /// Directory-level problems fail the call and leave the catalog as it was.
    /// Per-file problems are reported in `ScanReport::skipped`.
    pub fn scan<F>(
        &mut self,
        root: &Path,
        on_progress: F,
        cancel: &AtomicBool,
    ) -> Result<ScanOutcome, DiscoveryError>
    where
        F: FnMut(ScanTick<'_>),
    {
        match build_index(root, on_progress, cancel)? {
            IndexOutcome::Built(index) => Ok(ScanOutcome::Completed(self.commit(index))),
            IndexOutcome::Cancelled { processed, total } => {
                Ok(ScanOutcome::Cancelled { processed, total })
            }
        }
    }

    /// Replace the mapping with a built index.
    pub fn commit(&mut self, index: CatalogIndex) -> ScanReport {
        let entries = index.entries();
        let CatalogIndex {
            root,
            files,
            skipped,
        } = index;

        tracing::info!(
            root = %root.display(),
            days = files.len(),
            skipped = skipped.len(),
            "Catalog updated"
        );

        self.files = files;
        self.root = Some(root.clone());

        ScanReport {
            root,
            entries,
            skipped,
        }
    }

    /// Path of the day file for an ISO `YYYY-MM-DD` date.
    pub fn get_path(&self, date: &str) -> Result<&Path, CatalogError> {
        self.lookup(date).map(|(_, path)| path)
    }

    fn lookup(&self, date: &str) -> Result<(NaiveDate, &Path), CatalogError> {
        parse_date_key(date)
            .and_then(|d| self.files.get(&d).map(|p| (d, p.as_path())))
            .ok_or_else(|| CatalogError::NotFound {
                date: date.to_string(),
            })
    }

    /// Read and parse the day file for an ISO `YYYY-MM-DD` date.
    ///
    /// The file is re-read on every call.
    pub fn load_day(&self, date: &str) -> Result<DayLog, CatalogError> {
        let (day, path) = self.lookup(date)?;

        let content = match fs::read_file_lossy(path, constants::MAX_DAY_FILE_SIZE) {
            Ok(Ok(content)) => content,
            Ok(Err(size)) => {
                return Err(ParseError::FileTooLarge {
                    file: path.to_path_buf(),
                    size,
                    max: constants::MAX_DAY_FILE_SIZE,
                }
                .into())
            }
            Err(source) => {
                return Err(ParseError::Io {
                    file: path.to_path_buf(),
                    source,
                }
                .into())
            }
        };

        let parsed = parser::parse_day(&content, path, day)?;
        tracing::debug!(
            date = %date_key(day),
            rows = parsed.rows.len(),
            rejected = parsed.rejected.len(),
            "Day loaded"
        );
        Ok(parsed)
    }

    /// Entries in ascending date order.
    pub fn entries(&self) -> Vec<LogFileEntry> {
        entries_of(&self.files)
    }

    /// Catalogued dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.files.keys().copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.files.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Directory of the last committed scan.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

// =============================================================================
// Tests
// =============================================================================
