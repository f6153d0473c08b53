// OkoView - core/discovery.rs
//
// Non-recursive discovery of controller day files in one directory.
//
// Architecture note: this module reads only directory listings and file
// types, never file contents. Reading the date out of each file is the app
// layer's job (app::catalog).
//
// Per-entry access errors are non-fatal and returned as warnings; only a
// missing, non-directory or unlistable root is an error.

use crate::util::constants;
use crate::util::error::DiscoveryError;
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Compiled day-file name pattern.
fn log_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // The pattern is a compile-time constant covered by tests.
        Regex::new(constants::LOG_FILE_PATTERN).expect("LOG_FILE_PATTERN is a valid regex")
    })
}

/// Returns true if `file_name` is a controller day file name (`CM` + 6 digits + `.csv`).
pub fn is_log_file_name(file_name: &str) -> bool {
    log_file_regex().is_match(file_name)
}

/// Check that `root` exists, is a directory and can be listed.
pub fn check_root(root: &Path) -> Result<(), DiscoveryError> {
    // fs::metadata rather than Path::is_dir so PermissionDenied is not
    // reported as "does not exist".
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(e) => return Err(map_root_error(root, e)),
    }

    std::fs::read_dir(root)
        .map(|_| ())
        .map_err(|e| map_root_error(root, e))
}

fn map_root_error(root: &Path, e: io::Error) -> DiscoveryError {
    match e.kind() {
        io::ErrorKind::NotFound => DiscoveryError::RootNotFound {
            path: root.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => DiscoveryError::PermissionDenied {
            path: root.to_path_buf(),
            source: e,
        },
        _ => DiscoveryError::Unreadable {
            path: root.to_path_buf(),
            source: e,
        },
    }
}

/// List the day files directly inside `root`, sorted by file name.
///
/// Name order is the processing order of a scan, which makes
/// "last file wins" for duplicate dates deterministic.
///
/// Returns the matching paths and human-readable warnings for entries that
/// could not be inspected.
pub fn discover_log_files(root: &Path) -> Result<(Vec<PathBuf>, Vec<String>), DiscoveryError> {
    check_root(root)?;

    tracing::debug!(root = %root.display(), "Discovery starting");

    let mut files = Vec::new();
    let mut warnings = Vec::new();

    let walker = walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            tracing::trace!(path = %entry.path().display(), "Skipping non-UTF-8 file name");
            continue;
        };

        if !is_log_file_name(file_name) {
            tracing::trace!(file = file_name, "Not a day file");
            continue;
        }

        files.push(entry.into_path());
    }

    tracing::debug!(
        found = files.len(),
        warnings = warnings.len(),
        "Discovery complete"
    );

    Ok((files, warnings))
}

// =============================================================================
// Tests
// =============================================================================
