use super::model::RowTable;

/// Multiplier applied to the interquartile range to place the fences.
pub const IQR_FACTOR: f64 = 1.5;

// ---------------------------------------------------------------------------
// Quartiles
// ---------------------------------------------------------------------------

/// The `q`-quantile (0 ≤ q ≤ 1) of `values`, linearly interpolated between
/// the order statistics at `floor((n-1)·q)` and `ceil((n-1)·q)`.
/// NaN values are ignored; `None` when nothing is left.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

/// Same as [`quantile`] for data already sorted and free of NaN.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Tukey fences for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    pub fn from_quartiles(q1: f64, q3: f64) -> Self {
        let iqr = q3 - q1;
        IqrBounds {
            q1,
            q3,
            lower: q1 - IQR_FACTOR * iqr,
            upper: q3 + IQR_FACTOR * iqr,
        }
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Inclusive on both ends. NaN is never contained.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }
}

/// Fences computed over the numeric cells of `column` across all rows of
/// `table`. `None` when the column holds no numeric value.
pub fn iqr_bounds(table: &RowTable, column: &str) -> Option<IqrBounds> {
    let values: Vec<f64> = table
        .column_values(column)
        .filter_map(|v| v.as_f64())
        .collect();
    let q1 = quantile(&values, 0.25)?;
    let q3 = quantile(&values, 0.75)?;
    Some(IqrBounds::from_quartiles(q1, q3))
}

// ---------------------------------------------------------------------------
// Row removal
// ---------------------------------------------------------------------------

/// Keep the rows whose value in `column` lies within the column's IQR fences.
/// Rows with a null or non-numeric cell there are dropped, and so is every
/// row when the column has no numeric value at all.
pub fn remove_outliers_iqr(table: &RowTable, column: &str) -> RowTable {
    let all: Vec<usize> = (0..table.len()).collect();
    let kept = retain_inliers(table, &all, column);
    table.select_rows(&kept)
}

/// Remove outliers column by column over every numeric column, in header
/// order.
pub fn clean_table(table: &RowTable) -> RowTable {
    let columns = table.numeric_columns();
    clean_table_by(table, columns.as_slice())
}

/// Remove outliers one column at a time in the order given. Each column's
/// quartiles are computed on the rows surviving the previous columns, so the
/// result depends on `columns` order.
pub fn clean_table_by<S: AsRef<str>>(table: &RowTable, columns: &[S]) -> RowTable {
    let mut surviving: Vec<usize> = (0..table.len()).collect();
    for column in columns {
        let column = column.as_ref();
        let before = surviving.len();
        surviving = retain_inliers(table, &surviving, column);
        log::debug!(
            "outlier pass on '{column}': {} -> {} rows",
            before,
            surviving.len()
        );
    }
    log::info!(
        "Cleaned table: {} of {} rows kept across {} numeric columns",
        surviving.len(),
        table.len(),
        columns.len()
    );
    table.select_rows(&surviving)
}

/// Subset of `rows` (indices into `table`) whose `column` value passes the
/// fences computed over those same rows. Order is preserved.
fn retain_inliers(table: &RowTable, rows: &[usize], column: &str) -> Vec<usize> {
    let Some(idx) = table.column_index(column) else {
        log::warn!("outlier pass skipped: no column '{column}'");
        return rows.to_vec();
    };
    let cell = |row: usize| table.rows[row].cells.get(idx).and_then(|c| c.as_f64());

    let values: Vec<f64> = rows.iter().filter_map(|&r| cell(r)).collect();
    let (Some(q1), Some(q3)) = (quantile(&values, 0.25), quantile(&values, 0.75)) else {
        return Vec::new();
    };
    let bounds = IqrBounds::from_quartiles(q1, q3);
    log::debug!(
        "'{column}': q1={:.4} q3={:.4} bounds=[{:.4}, {:.4}]",
        bounds.q1,
        bounds.q3,
        bounds.lower,
        bounds.upper
    );

    rows.iter()
        .copied()
        .filter(|&r| cell(r).is_some_and(|v| bounds.contains(v)))
        .collect()
}
