// OkoView - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "OkoView";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "OkoView";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Controller log format
// =============================================================================

/// File names the controller writes one per day: `CM` + `yymmdd` + `.csv`.
/// The prefix is case-sensitive, the extension is not.
pub const LOG_FILE_PATTERN: &str = r"^CM[0-9]{6}\.(?i:csv)$";

/// Field separator used by the controller.
pub const FIELD_DELIMITER: u8 = b';';

/// Date format of the first column of every data row.
pub const ROW_DATE_FORMAT: &str = "%d.%m.%Y";

/// Canonical text form of a catalog key.
pub const KEY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Column counts seen across controller firmware revisions (date and time
/// included, trailing empty field excluded). Other widths still parse but are
/// logged.
pub const KNOWN_COLUMN_COUNTS: [usize; 2] = [12, 13];

/// Number of non-blank lines needed to derive a file's date (header + first row).
pub const DATE_PROBE_LINES: usize = 2;

/// Day files above this size are refused. A full day sampled every few
/// seconds stays well below 10 MB.
pub const MAX_DAY_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MB

/// Maximum rejected rows recorded per day before further ones are only counted.
pub const MAX_REJECTED_ROWS: usize = 1_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Name of the optional configuration file in the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// UI
// =============================================================================

/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [1100.0, 720.0];

/// Minimum window size.
pub const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];
