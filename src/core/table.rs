// OkoView - core/table.rs
//
// Read-only grid projections of catalog entries and parsed days.
// The UI renders any `TableView` without knowing what it holds.

use crate::core::model::{DayLog, LogFileEntry};
use std::borrow::Cow;

/// A rectangular, read-only table.
pub trait TableView {
    fn column_count(&self) -> usize;
    fn row_count(&self) -> usize;

    /// Column title, `None` past the last column.
    fn header(&self, col: usize) -> Option<&str>;

    /// Cell text, `None` outside the table.
    fn cell(&self, row: usize, col: usize) -> Option<Cow<'_, str>>;
}

/// Display order of the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Oldest first",
            SortOrder::Descending => "Newest first",
        }
    }
}

// =============================================================================
// Entry list
// =============================================================================

const ENTRY_HEADERS: [&str; 2] = ["Date", "File"];

/// The catalog's day list, in the requested date order.
///
/// `entries` must be ascending by date, as returned by the catalog.
pub struct EntryTable<'a> {
    entries: &'a [LogFileEntry],
    order: SortOrder,
}

impl<'a> EntryTable<'a> {
    pub fn new(entries: &'a [LogFileEntry], order: SortOrder) -> Self {
        Self { entries, order }
    }

    /// The entry shown at display row `row`.
    pub fn entry(&self, row: usize) -> Option<&'a LogFileEntry> {
        if row >= self.entries.len() {
            return None;
        }
        let idx = match self.order {
            SortOrder::Ascending => row,
            SortOrder::Descending => self.entries.len() - 1 - row,
        };
        self.entries.get(idx)
    }
}

impl TableView for EntryTable<'_> {
    fn column_count(&self) -> usize {
        ENTRY_HEADERS.len()
    }

    fn row_count(&self) -> usize {
        self.entries.len()
    }

    fn header(&self, col: usize) -> Option<&str> {
        ENTRY_HEADERS.get(col).copied()
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cow<'_, str>> {
        let entry = self.entry(row)?;
        match col {
            0 => Some(Cow::Owned(entry.key())),
            1 => Some(Cow::Owned(entry.file_name())),
            _ => None,
        }
    }
}

// =============================================================================
// Day table
// =============================================================================

/// The rows of one parsed day, columns as in the file header.
pub struct DayTable<'a> {
    day: &'a DayLog,
}

impl<'a> DayTable<'a> {
    pub fn new(day: &'a DayLog) -> Self {
        Self { day }
    }
}

impl TableView for DayTable<'_> {
    fn column_count(&self) -> usize {
        self.day.column_count()
    }

    fn row_count(&self) -> usize {
        self.day.rows.len()
    }

    fn header(&self, col: usize) -> Option<&str> {
        self.day.columns.get(col).map(String::as_str)
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cow<'_, str>> {
        self.day.rows.get(row)?.get(col).map(Cow::Borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LogRow;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn entries() -> Vec<LogFileEntry> {
        [(2013, 5, 12), (2013, 5, 13), (2013, 5, 14)]
            .iter()
            .map(|&(y, m, d)| LogFileEntry {
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                path: PathBuf::from(format!("/logs/CM{:02}{m:02}{d:02}.csv", y % 100)),
            })
            .collect()
    }

    #[test]
    fn test_entry_table_ascending() {
        let entries = entries();
        let table = EntryTable::new(&entries, SortOrder::Ascending);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.header(0), Some("Date"));
        assert_eq!(table.cell(0, 0).as_deref(), Some("2013-05-12"));
        assert_eq!(table.cell(0, 1).as_deref(), Some("CM130512.csv"));
        assert_eq!(table.cell(3, 0), None);
        assert_eq!(table.cell(0, 2), None);
    }

    #[test]
    fn test_entry_table_descending() {
        let entries = entries();
        let table = EntryTable::new(&entries, SortOrder::Ascending.toggled());
        assert_eq!(table.cell(0, 0).as_deref(), Some("2013-05-14"));
        assert_eq!(table.cell(2, 0).as_deref(), Some("2013-05-12"));
        assert_eq!(table.entry(1).map(|e| e.key()), Some("2013-05-13".to_string()));
        assert!(table.entry(3).is_none());
    }

    #[test]
    fn test_entry_table_empty() {
        let table = EntryTable::new(&[], SortOrder::Descending);
        assert_eq!(table.row_count(), 0);
        assert!(table.entry(0).is_none());
    }

    #[test]
    fn test_day_table_projects_rows() {
        let day = DayLog {
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
        };
        let table = DayTable::new(&day);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.header(2), Some("AT [°C]"));
        assert_eq!(table.cell(1, 2).as_deref(), Some("11,2"));
        assert_eq!(table.cell(2, 0), None);
        assert_eq!(table.header(3), None);
    }
}
