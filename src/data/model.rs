use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a row table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes a CSV reader infers.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`, for quartiles and aggregations.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view, accepting floats that carry an integral value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Date view. Text cells are parsed as ISO `YYYY-MM-DD`, optionally
    /// followed by a time part which is ignored.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::Text(s) => parse_date(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

/// Parse the date part of an ISO timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Row – one record of a table
// ---------------------------------------------------------------------------

/// A single record. Cells are stored positionally, aligned with the owning
/// table's `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Row { cells }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RowTable – an ordered collection of uniformly-columned rows
// ---------------------------------------------------------------------------

static NULL_CELL: CellValue = CellValue::Null;

#[derive(Debug, Clone, PartialEq)]
pub struct RowTable {
    /// Column names in header order.
    pub columns: Vec<String>,
    /// Rows in file order.
    pub rows: Vec<Row>,
}

impl RowTable {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        RowTable { columns, rows }
    }

    /// Build a table from column names and per-row cell vectors.
    pub fn from_cells<S: Into<String>>(columns: Vec<S>, rows: Vec<Vec<CellValue>>) -> Self {
        RowTable {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: rows.into_iter().map(Row::new).collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell of `row` in `column`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.cells.get(idx)
    }

    /// Iterate the cells of one column, `Null` for rows too short to hold it.
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a CellValue> + 'a {
        let idx = self.column_index(column);
        self.rows.iter().map(move |row| {
            idx.and_then(|i| row.cells.get(i)).unwrap_or(&NULL_CELL)
        })
    }

    /// Columns whose non-null values are all integers or floats, in header
    /// order. All-null and all-text columns are not numeric.
    ///
    /// This departs from pandas, which types an all-empty column as float64
    /// NaN and would then drop every row when trimming outliers on it. Here
    /// such a column is skipped and the rows are kept.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|col| {
                let mut seen_number = false;
                for value in self.column_values(col) {
                    match value {
                        CellValue::Null => {}
                        v if v.is_numeric() => seen_number = true,
                        _ => return false,
                    }
                }
                seen_number
            })
            .cloned()
            .collect()
    }

    /// New table with the same columns holding the rows at `indices`, in
    /// the order given.
    pub fn select_rows(&self, indices: &[usize]) -> RowTable {
        RowTable {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }
}
