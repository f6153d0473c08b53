// OkoView - core/export.rs
//
// CSV and JSON export of a parsed day.
// Core layer: writes to any Write trait object.

use crate::core::model::DayLog;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export a day as semicolon-separated CSV (header + rows), the same layout
/// the controller writes minus the trailing empty field and blank lines.
///
/// Returns the number of data rows written.
pub fn export_csv<W: Write>(
    day: &DayLog,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(constants::FIELD_DELIMITER)
        .from_writer(writer);

    csv_writer.write_record(&day.columns).map_err(csv_err)?;

    for row in &day.rows {
        csv_writer.write_record(&row.fields).map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(day.rows.len())
}

/// Export a day as a JSON object (`date`, `path`, `columns`, `rows`).
pub fn export_json<W: Write>(
    day: &DayLog,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, day).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(day.rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LogRow;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn make_day() -> DayLog {
        DayLog {
            date: NaiveDate::from_ymd_opt(2013, 5, 13).unwrap(),
            path: PathBuf::from("CM130513.csv"),
            columns: vec!["Datum".into(), "Zeit".into(), "AT [°C]".into()],
            rows: vec![
                LogRow {
                    line_number: 2,
                    fields: vec!["13.05.2013".into(), "00:00:10".into(), "11,0".into()],
                },
                LogRow {
                    line_number: 3,
                    fields: vec!["13.05.2013".into(), "00:01:10".into(), "11,2".into()],
                },
            ],
            rejected: Vec::new(),
        }
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        let count = export_csv(&make_day(), &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Datum;Zeit;AT [°C]");
        assert_eq!(lines[2], "13.05.2013;00:01:10;11,2");
    }

    #[test]
    fn test_json_export() {
        let mut buf = Vec::new();
        let count = export_json(&make_day(), &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 2);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["date"], "2013-05-13");
        assert_eq!(value["columns"][2], "AT [°C]");
        assert_eq!(value["rows"][1]["fields"][1], "00:01:10");
        assert_eq!(value["rows"][1]["line_number"], 3);
        assert!(value.get("rejected").is_none());
    }
}
