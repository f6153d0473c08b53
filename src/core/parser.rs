// OkoView - core/parser.rs
//
// Parsing of the controller's semicolon-delimited day files.
// Core layer: works on text and line iterators, never opens files itself.
//
// Every line goes through `clean_line` first: NUL bytes (the controller pads
// its files on power loss) and a trailing '\r' are removed. A line that is
// then empty, whitespace or separators only is blank and skipped by both
// date extraction and row parsing. Only '\n' ends a line; a stray '\r' in
// the middle of a line is data, so a cleaned line is always one record.
// Line numbers always refer to the raw file.

use crate::core::model::{DayLog, LogRow};
use crate::util::constants;
use crate::util::error::ParseError;
use chrono::NaiveDate;
use std::io;
use std::path::Path;

/// Strip NUL bytes and line-ending residue. Returns `None` for blank lines.
pub fn clean_line(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|&c| c != '\0').collect();
    let cleaned = cleaned.trim_end_matches(['\r', '\n']);
    let delimiter = char::from(constants::FIELD_DELIMITER);
    if cleaned.chars().all(|c| c == delimiter || c.is_whitespace()) {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Clean every line of `content`, keeping the 1-based raw line number.
pub fn clean_lines(content: &str) -> Vec<(u64, String)> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| clean_line(line).map(|l| (idx as u64 + 1, l)))
        .collect()
}

/// Derive a day file's date from the first field of its first data row.
///
/// `lines` is consumed lazily and only until the header and the first data
/// row have been seen, so callers can hand in a reader over a large file.
pub fn extract_date<I>(lines: I, file: &Path) -> Result<NaiveDate, ParseError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut seen = Vec::with_capacity(constants::DATE_PROBE_LINES);
    for line in lines {
        let line = line.map_err(|source| ParseError::Io {
            file: file.to_path_buf(),
            source,
        })?;
        if let Some(cleaned) = clean_line(&line) {
            seen.push(cleaned);
            if seen.len() == constants::DATE_PROBE_LINES {
                break;
            }
        }
    }

    match seen.len() {
        0 => Err(ParseError::Empty {
            file: file.to_path_buf(),
        }),
        1 => Err(ParseError::MissingDate {
            file: file.to_path_buf(),
        }),
        _ => {
            let first_row = &seen[1];
            let raw = first_row
                .split(char::from(constants::FIELD_DELIMITER))
                .next()
                .unwrap_or("")
                .trim();
            if raw.is_empty() {
                return Err(ParseError::MissingDate {
                    file: file.to_path_buf(),
                });
            }
            parse_row_date(raw).ok_or_else(|| ParseError::InvalidDate {
                file: file.to_path_buf(),
                raw: raw.to_string(),
            })
        }
    }
}

/// Parse a `DD.MM.YYYY` date as written in the first column.
pub fn parse_row_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), constants::ROW_DATE_FORMAT).ok()
}

/// Parse a whole day file.
///
/// The first non-blank line is the header and fixes the column count. Data
/// rows with a different field count are rejected (recorded in
/// `DayLog::rejected`, capped at `MAX_REJECTED_ROWS`) rather than failing the
/// whole file. A trailing empty field (lines ending in `;`) is dropped from
/// the header and from every row.
///
/// Fails only when the file has no header at all.
pub fn parse_day(content: &str, file: &Path, date: NaiveDate) -> Result<DayLog, ParseError> {
    let lines = clean_lines(content);
    if lines.is_empty() {
        return Err(ParseError::Empty {
            file: file.to_path_buf(),
        });
    }

    // The controller never quotes fields, so quoting is off. Records end at
    // '\n' only, matching how `clean_lines` split the content.
    let joined = lines
        .iter()
        .map(|(_, l)| l.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(constants::FIELD_DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(joined.as_bytes());

    // Record positions count lines of `joined`; map them back to the raw file.
    let raw_line = |position: Option<&csv::Position>| -> u64 {
        position
            .and_then(|p| p.line().checked_sub(1))
            .and_then(|idx| lines.get(idx as usize))
            .map_or(0, |(n, _)| *n)
    };

    let mut records = reader.records();

    let columns = match records.next() {
        Some(Ok(record)) => {
            let mut header: Vec<String> = record.iter().map(str::to_string).collect();
            drop_trailing_empty(&mut header);
            header
        }
        Some(Err(source)) => {
            return Err(ParseError::Csv {
                file: file.to_path_buf(),
                source,
            })
        }
        None => {
            return Err(ParseError::Empty {
                file: file.to_path_buf(),
            })
        }
    };

    let expected = columns.len();
    if !constants::KNOWN_COLUMN_COUNTS.contains(&expected) {
        tracing::debug!(
            file = %file.display(),
            columns = expected,
            "Unusual column count for a controller log"
        );
    }

    let mut rows = Vec::with_capacity(lines.len().saturating_sub(1));
    let mut rejected = Vec::new();
    let mut rejected_total = 0usize;

    for record in records {
        let problem = match record {
            Ok(record) => {
                let line_number = raw_line(record.position());
                let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
                if fields.len() == expected + 1 {
                    drop_trailing_empty(&mut fields);
                }
                if fields.len() == expected {
                    rows.push(LogRow {
                        line_number,
                        fields,
                    });
                    continue;
                }
                ParseError::ColumnCount {
                    file: file.to_path_buf(),
                    line_number,
                    expected,
                    found: fields.len(),
                }
            }
            Err(source) => ParseError::Csv {
                file: file.to_path_buf(),
                source,
            },
        };

        rejected_total += 1;
        if rejected.len() < constants::MAX_REJECTED_ROWS {
            tracing::trace!(error = %problem, "Row rejected");
            rejected.push(problem);
        }
    }

    if rejected_total > 0 {
        tracing::debug!(
            file = %file.display(),
            rejected = rejected_total,
            "Rows rejected while parsing day file"
        );
    }

    Ok(DayLog {
        date,
        path: file.to_path_buf(),
        columns,
        rows,
        rejected,
    })
}

/// Remove one trailing empty field, if present.
fn drop_trailing_empty(fields: &mut Vec<String>) {
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const HEADER: &str = "Datum ;Zeit ;AT [°C];ATakt [°C];HK1 VL Ist[°C];HK1 VL Soll[°C];\
HK1 RT Ist[°C];HK1 RT Soll[°C];HK1 Pumpe;HK1 Mischer;PE1 KT[°C];PE1 Modus;PE1 Status;";

    fn row(time: &str, outside: &str) -> String {
        format!("13.05.2013;{time};{outside};10,9;38,5;40,0;21,2;21,0;1;0;65,3;1;99;")
    }

    fn path() -> PathBuf {
        PathBuf::from("CM130513.csv")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 5, 13).unwrap()
    }

    fn ok_lines(lines: &[&str]) -> Vec<io::Result<String>> {
        lines.iter().map(|l| Ok((*l).to_string())).collect()
    }

    #[test]
    fn test_clean_line_strips_nul_and_cr() {
        assert_eq!(clean_line("a;\0b;c\r").as_deref(), Some("a;b;c"));
        assert_eq!(clean_line("\0\0\0"), None);
        assert_eq!(clean_line("   \r"), None);
        assert_eq!(clean_line(" ; ;;\r"), None);
        assert_eq!(clean_line("a\rb").as_deref(), Some("a\rb"));
    }

    #[test]
    fn test_extract_date_from_first_data_row() {
        let r = row("00:00:10", "11,0");
        let lines = ok_lines(&[HEADER, &r]);
        let parsed = extract_date(lines, &path()).unwrap();
        assert_eq!(parsed, date());
    }

    #[test]
    fn test_extract_date_skips_leading_blank_lines() {
        let r = row("00:00:10", "11,0");
        let lines = ok_lines(&["", "\0\0", HEADER, "  ", &r]);
        assert_eq!(extract_date(lines, &path()).unwrap(), date());
    }

    #[test]
    fn test_extract_date_ignores_filename() {
        let r = "01.02.2014;00:00:10;1;2;3;4;5;6;7;8;9;10;11;";
        let lines = ok_lines(&[HEADER, r]);
        let parsed = extract_date(lines, Path::new("CM991231.csv")).unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2014, 2, 1).unwrap());
    }

    #[test]
    fn test_extract_date_empty_file() {
        let result = extract_date(ok_lines(&["", "\0"]), &path());
        assert!(matches!(result, Err(ParseError::Empty { .. })));
    }

    #[test]
    fn test_extract_date_skips_separator_only_line() {
        let r = row("00:00:10", "11,0");
        let lines = ok_lines(&[HEADER, ";;;;;;;;;;;;;", &r]);
        assert_eq!(extract_date(lines, &path()).unwrap(), date());
    }

    #[test]
    fn test_extract_date_header_only() {
        let result = extract_date(ok_lines(&[HEADER]), &path());
        assert!(matches!(result, Err(ParseError::MissingDate { .. })));
    }

    #[test]
    fn test_extract_date_unparsable() {
        let result = extract_date(ok_lines(&[HEADER, "2013-05-13;00:00:10;1"]), &path());
        match result {
            Err(ParseError::InvalidDate { raw, .. }) => assert_eq!(raw, "2013-05-13"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_date_empty_first_field() {
        let result = extract_date(ok_lines(&[HEADER, ";00:00:10;1"]), &path());
        assert!(matches!(result, Err(ParseError::MissingDate { .. })));
    }

    #[test]
    fn test_extract_date_io_error() {
        let lines = vec![
            Ok(HEADER.to_string()),
            Err(io::Error::new(io::ErrorKind::Other, "disk gone")),
        ];
        let result = extract_date(lines, &path());
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }

    #[test]
    fn test_extract_date_stops_after_first_row() {
        // The third item would fail; it must never be pulled.
        let r = row("00:00:10", "11,0");
        let lines = vec![
            Ok(HEADER.to_string()),
            Ok(r),
            Err(io::Error::new(io::ErrorKind::Other, "not reached")),
        ];
        assert_eq!(extract_date(lines, &path()).unwrap(), date());
    }

    #[test]
    fn test_parse_day_row_count_and_width() {
        let content = [
            HEADER.to_string(),
            row("00:00:10", "11,0"),
            row("00:01:10", "11,1"),
            row("00:02:10", "11,2"),
        ]
        .join("\r\n");
        let day = parse_day(&content, &path(), date()).unwrap();
        assert_eq!(day.column_count(), 13, "trailing empty header field dropped");
        assert_eq!(day.rows.len(), 3);
        assert!(day.rows.iter().all(|r| r.len() == 13));
        assert_eq!(day.rows[1].time(), Some("00:01:10"));
        assert_eq!(day.rows[2].get(2), Some("11,2"));
        assert_eq!(day.columns[0], "Datum", "header fields are trimmed");
        assert!(day.rejected.is_empty());
    }

    #[test]
    fn test_parse_day_twelve_column_format_without_trailing_field() {
        let content = "Datum;Zeit;AT;ATakt;VL Ist;VL Soll;RT Ist;RT Soll;Pumpe;Mischer;KT;Status\n\
                       13.05.2013;00:00:10;11,0;10,9;38,5;40,0;21,2;21,0;1;0;65,3;99\n";
        let day = parse_day(content, &path(), date()).unwrap();
        assert_eq!(day.column_count(), 12);
        assert_eq!(day.rows.len(), 1);
        assert_eq!(day.rows[0].get(11), Some("99"));
    }

    #[test]
    fn test_parse_day_blank_lines_do_not_matter() {
        let dense = [
            HEADER.to_string(),
            row("00:00:10", "11,0"),
            row("00:01:10", "11,1"),
        ]
        .join("\n");
        let sparse = [
            String::new(),
            HEADER.to_string(),
            String::new(),
            row("00:00:10", "11,0"),
            "   ".to_string(),
            "\0\0\0".to_string(),
            row("00:01:10", "11,1"),
            String::new(),
        ]
        .join("\n");

        let a = parse_day(&dense, &path(), date()).unwrap();
        let b = parse_day(&sparse, &path(), date()).unwrap();
        assert_eq!(a.columns, b.columns);
        let fields = |day: &DayLog| day.rows.iter().map(|r| r.fields.clone()).collect::<Vec<_>>();
        assert_eq!(fields(&a), fields(&b));

        // Line numbers still point into the raw file.
        let numbers = |day: &DayLog| day.rows.iter().map(|r| r.line_number).collect::<Vec<_>>();
        assert_eq!(numbers(&a), [2, 3]);
        assert_eq!(numbers(&b), [4, 7]);
    }

    #[test]
    fn test_parse_day_stray_carriage_return_rejects_only_its_line() {
        let content = "Datum;Zeit;AT\n\
                       13.05.2013;00:00:10;1\r13.05.2013;00:00:20;2\n\
                       13.05.2013;00:00:30;3\n\
                       13.05.2013;00:00:40;4\n";
        let day = parse_day(content, &path(), date()).unwrap();

        let times: Vec<_> = day.rows.iter().filter_map(|r| r.time()).collect();
        assert_eq!(times, ["00:00:30", "00:00:40"]);
        assert_eq!(day.rows[1].line_number, 4);

        assert_eq!(day.rejected.len(), 1);
        match &day.rejected[0] {
            ParseError::ColumnCount {
                line_number, found, ..
            } => {
                assert_eq!(*line_number, 2);
                assert_eq!(*found, 5);
            }
            other => panic!("expected ColumnCount, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_day_strips_embedded_nul() {
        let content = format!("{HEADER}\n13.05.\0\02013;00:00:10;11,0;10,9;38,5;40,0;21,2;21,0;1;0;65,3;1;99;\n");
        let day = parse_day(&content, &path(), date()).unwrap();
        assert_eq!(day.rows.len(), 1);
        assert_eq!(day.rows[0].get(0), Some("13.05.2013"));
    }

    #[test]
    fn test_parse_day_rejects_short_row() {
        let content = [
            HEADER.to_string(),
            row("00:00:10", "11,0"),
            "13.05.2013;00:01:10;11,1".to_string(),
            row("00:02:10", "11,2"),
        ]
        .join("\n");
        let day = parse_day(&content, &path(), date()).unwrap();
        assert_eq!(day.rows.len(), 2);
        assert_eq!(day.rejected.len(), 1);
        match &day.rejected[0] {
            ParseError::ColumnCount {
                line_number,
                expected,
                found,
                ..
            } => {
                assert_eq!(*line_number, 3);
                assert_eq!(*expected, 13);
                assert_eq!(*found, 3);
            }
            other => panic!("expected ColumnCount, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_day_separator_only_line_is_blank() {
        let content = format!("{HEADER}\n;;;;;;;;;;;;;\n{}\n", row("00:00:10", "11,0"));
        let day = parse_day(&content, &path(), date()).unwrap();
        assert_eq!(day.rows.len(), 1);
        assert!(day.rejected.is_empty());
    }

    #[test]
    fn test_parse_day_header_only_has_no_rows() {
        let day = parse_day(HEADER, &path(), date()).unwrap();
        assert_eq!(day.column_count(), 13);
        assert!(day.rows.is_empty());
    }

    #[test]
    fn test_parse_day_empty_content_fails() {
        let result = parse_day("\n\n\0\0\n", &path(), date());
        assert!(matches!(result, Err(ParseError::Empty { .. })));
    }
}
