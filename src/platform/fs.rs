// OkoView - platform/fs.rs
//
// Filesystem helpers. Each call opens and closes its own handle; nothing
// here keeps a file open beyond the value it returns.
//
// The controller writes Latin-1 headers (°C), so all text is decoded lossily
// rather than rejected as invalid UTF-8.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lines of a file, decoded lossily. The file stays open only while the
/// iterator is alive.
pub struct LossyLines {
    reader: BufReader<std::fs::File>,
    buf: Vec<u8>,
}

impl Iterator for LossyLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Open `path` for lazy, lossy line-by-line reading.
pub fn lossy_lines(path: &Path) -> io::Result<LossyLines> {
    let file = std::fs::File::open(path)?;
    Ok(LossyLines {
        reader: BufReader::new(file),
        buf: Vec::new(),
    })
}

/// Read the full content of a file as a string, refusing files larger than
/// `max_size` bytes.
///
/// Returns `Ok(Err(size))` when the file is too large so the caller can
/// report the size without a second metadata call.
pub fn read_file_lossy(path: &Path, max_size: u64) -> io::Result<Result<String, u64>> {
    let size = std::fs::metadata(path)?.len();
    if size > max_size {
        return Ok(Err(size));
    }
    let bytes = std::fs::read(path)?;
    Ok(Ok(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Open the system file manager and highlight `path` within it.
///
/// Platform behaviour:
/// - **Windows**: `explorer.exe /select,"<path>"`
/// - **macOS**: `open -R "<path>"`
/// - **Linux**: `xdg-open "<parent>"` (no standard per-file selection)
///
/// The subprocess is spawned detached; launch failures are logged at WARN
/// level and never propagated so the UI never blocks.
pub fn reveal_in_file_manager(path: &Path) {
    #[cfg(target_os = "windows")]
    {
        // `/select,<path>` must be a single argument, no space after comma.
        let arg = format!("/select,{}", path.display());
        if let Err(e) = std::process::Command::new("explorer").arg(arg).spawn() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to reveal file in Explorer");
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Err(e) = std::process::Command::new("open")
            .arg("-R")
            .arg(path)
            .spawn()
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to reveal file in Finder");
        }
    }
    #[cfg(target_os = "linux")]
    {
        let parent = path.parent().unwrap_or(path);
        if let Err(e) = std::process::Command::new("xdg-open").arg(parent).spawn() {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to open parent directory in file manager"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossy_lines_decodes_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("CM130513.csv");
        // 0xB0 is '°' in Latin-1 and invalid as a lone UTF-8 byte.
        std::fs::write(&file, b"AT [\xB0C];Zeit\r\nsecond\nthird").unwrap();

        let lines: Vec<String> = lossy_lines(&file)
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("AT ["));
        assert!(lines[0].ends_with("C];Zeit\r"), "'\\r' is left for the parser");
        assert_eq!(lines[2], "third");
    }

    #[test]
    fn test_read_file_lossy_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("big.csv");
        std::fs::write(&file, "0123456789").unwrap();

        assert_eq!(read_file_lossy(&file, 4).unwrap(), Err(10));
        assert_eq!(
            read_file_lossy(&file, 10).unwrap(),
            Ok("0123456789".to_string())
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(lossy_lines(&dir.path().join("absent.csv")).is_err());
        assert!(read_file_lossy(&dir.path().join("absent.csv"), 10).is_err());
    }
}
