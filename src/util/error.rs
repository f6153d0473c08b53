// OkoView - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all OkoView operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum OkoViewError {
    /// The log directory could not be scanned.
    Discovery(DiscoveryError),

    /// A day file could not be parsed.
    Parse(ParseError),

    /// A catalog lookup or day load failed.
    Catalog(CatalogError),

    /// Export operation failed.
    Export(ExportError),
}

impl fmt::Display for OkoViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Catalog(e) => write!(f, "Catalog error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for OkoViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Discovery(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Directory-level failures. Always fatal to the scan call.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The directory does not exist.
    RootNotFound { path: PathBuf },

    /// The path exists but is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the directory.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// The directory exists but its listing could not be read.
    Unreadable { path: PathBuf, source: io::Error },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Log directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "'{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied accessing '{}': {source}",
                    path.display()
                )
            }
            Self::Unreadable { path, source } => {
                write!(f, "Cannot list '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for OkoViewError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Problems with one day file or one of its rows.
///
/// File-level variants make a file unusable (it is skipped during a scan, or
/// the day load fails). `ColumnCount` and `Csv` reject a single row only.
#[derive(Debug)]
pub enum ParseError {
    /// The file could not be read.
    Io { file: PathBuf, source: io::Error },

    /// The file exceeds the size limit for a day file.
    FileTooLarge { file: PathBuf, size: u64, max: u64 },

    /// Nothing but blank lines (or NUL padding) in the file.
    Empty { file: PathBuf },

    /// A header is present but there is no data row to take the date from.
    MissingDate { file: PathBuf },

    /// The first field of the first data row is not a `DD.MM.YYYY` date.
    InvalidDate { file: PathBuf, raw: String },

    /// A data row does not have the header's column count.
    ColumnCount {
        file: PathBuf,
        line_number: u64,
        expected: usize,
        found: usize,
    },

    /// The CSV reader rejected a record.
    Csv { file: PathBuf, source: csv::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { file, source } => {
                write!(f, "'{}': I/O error: {source}", file.display())
            }
            Self::FileTooLarge { file, size, max } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max} bytes",
                file.display()
            ),
            Self::Empty { file } => write!(f, "'{}': file is empty", file.display()),
            Self::MissingDate { file } => {
                write!(f, "'{}': no data row after the header", file.display())
            }
            Self::InvalidDate { file, raw } => write!(
                f,
                "'{}': cannot parse date '{raw}' (expected DD.MM.YYYY)",
                file.display()
            ),
            Self::ColumnCount {
                file,
                line_number,
                expected,
                found,
            } => write!(
                f,
                "'{}' line {line_number}: expected {expected} fields, found {found}",
                file.display()
            ),
            Self::Csv { file, source } => {
                write!(f, "'{}': {source}", file.display())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for OkoViewError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors returned by catalog lookups and day loads.
#[derive(Debug)]
pub enum CatalogError {
    /// No file for this date in the current catalog. `date` is the text the
    /// caller asked for, which may not even be a valid date.
    NotFound { date: String },

    /// The file is catalogued but could not be parsed.
    Parse(ParseError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { date } => write!(f, "No log file for '{date}'"),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<ParseError> for CatalogError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<CatalogError> for OkoViewError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for OkoViewError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for OkoView results.
pub type Result<T> = std::result::Result<T, OkoViewError>;
