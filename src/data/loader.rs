use std::path::{Path, PathBuf};

use super::model::{parse_date, CellValue, Row, RowTable};

/// Default filename of the daily table.
pub const DAY_FILE: &str = "day.csv";
/// Default filename of the hourly table.
pub const HOUR_FILE: &str = "hour.csv";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file is absent or could not be opened.
    #[error("data file not found or unreadable: {}", .path.display())]
    DataNotFound {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// The file opened but a record could not be parsed.
    #[error("malformed record in {} at line {line}", .path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// The two bike-share tables, at daily and hourly granularity.
#[derive(Debug, Clone)]
pub struct BikeDatasets {
    pub day: RowTable,
    pub hour: RowTable,
}

/// Filenames looked up inside the data directory.
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub day: String,
    pub hour: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        DataFiles {
            day: DAY_FILE.to_string(),
            hour: HOUR_FILE.to_string(),
        }
    }
}

/// Load both tables from `dir`. Either file missing is fatal.
pub fn load_datasets(dir: &Path, files: &DataFiles) -> Result<BikeDatasets, LoadError> {
    let day = load_table(&dir.join(&files.day))?;
    let hour = load_table(&dir.join(&files.hour))?;
    log::info!(
        "Loaded {} daily and {} hourly rows from {}",
        day.len(),
        hour.len(),
        dir.display()
    );
    Ok(BikeDatasets { day, hour })
}

/// CSV layout: header row with column names, one record per row.
/// Cells are typed individually, see [`guess_cell_type`].
pub fn load_table(path: &Path) -> Result<RowTable, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::DataNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    // I/O failures after opening (e.g. the path is a directory) mean the
    // file is unreadable; parse and UTF-8 failures mean it is malformed.
    let malformed = |source: csv::Error| match source.kind() {
        csv::ErrorKind::Io(_) => LoadError::DataNotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => LoadError::Malformed {
            path: path.to_path_buf(),
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        },
    };

    let columns: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(malformed)?;
        let cells = record.iter().map(guess_cell_type).collect();
        rows.push(Row::new(cells));
    }

    log::debug!(
        "{}: {} rows, columns {:?}",
        path.display(),
        rows.len(),
        columns
    );
    if let Some(first) = rows.first() {
        log::debug!("{}: first row {}", path.display(), first);
    }
    Ok(RowTable::new(columns, rows))
}

/// Infer a cell's type from its text: empty → null, then integer, float,
/// ISO date, falling back to text.
pub fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if let Some(d) = parse_date(s) {
        return CellValue::Date(d);
    }
    CellValue::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn cells_are_typed_by_content() {
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("985"), CellValue::Integer(985));
        assert_eq!(guess_cell_type("0.344167"), CellValue::Float(0.344167));
        assert_eq!(
            guess_cell_type("2011-01-01"),
            CellValue::Date(NaiveDate::from_ymd_opt(2011, 1, 1).unwrap())
        );
        assert_eq!(guess_cell_type("clear"), CellValue::Text("clear".into()));
    }
}
