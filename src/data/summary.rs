//! Aggregations behind the dashboard panels, computed from filtered tables.

use std::collections::BTreeMap;

use super::filter::{Season, SEASON_COLUMN};
use super::model::RowTable;
use super::outliers::{quantile_sorted, IQR_FACTOR};

/// Total rentals column.
pub const COUNT_COLUMN: &str = "cnt";
/// Columns of the environmental correlation heatmap.
pub const ENVIRONMENT_COLUMNS: [&str; 5] = ["temp", "atemp", "hum", "windspeed", "cnt"];
/// Working-day breakdown: key and value columns (daily table).
pub const WORKINGDAY_COLUMN: &str = "workingday";
pub const WORKINGDAY_VALUES: [&str; 3] = ["casual", "registered", "cnt"];
/// Hourly profile: key and value columns (hourly table).
pub const HOUR_COLUMN: &str = "hr";
pub const HOURLY_VALUES: [&str; 2] = ["casual", "registered"];

// ---------------------------------------------------------------------------
// Box plot statistics
// ---------------------------------------------------------------------------

/// Box-and-whisker statistics of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation at or above `q1 - 1.5·IQR`.
    pub lower_whisker: f64,
    /// Largest observation at or below `q3 + 1.5·IQR`.
    pub upper_whisker: f64,
    /// Observations beyond the whiskers.
    pub fliers: Vec<f64>,
}

impl BoxStats {
    /// `None` for an empty (or all-NaN) sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - IQR_FACTOR * iqr;
        let hi_fence = q3 + IQR_FACTOR * iqr;

        let lower_whisker = sorted.iter().copied().find(|&v| v >= lo_fence).unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().copied().find(|&v| v <= hi_fence).unwrap_or(q3);
        let fliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lo_fence || v > hi_fence)
            .collect();

        Some(BoxStats {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            fliers,
        })
    }
}

/// Distribution of `cnt` per season present in the table, ascending code.
pub fn season_boxes(table: &RowTable) -> Vec<(Season, BoxStats)> {
    let mut groups: BTreeMap<Season, Vec<f64>> = BTreeMap::new();
    let (Some(season_idx), Some(cnt_idx)) = (
        table.column_index(SEASON_COLUMN),
        table.column_index(COUNT_COLUMN),
    ) else {
        return Vec::new();
    };
    for row in &table.rows {
        let season = row
            .cells
            .get(season_idx)
            .and_then(|c| c.as_i64())
            .and_then(Season::from_code);
        let count = row.cells.get(cnt_idx).and_then(|c| c.as_f64());
        if let (Some(s), Some(c)) = (season, count) {
            groups.entry(s).or_default().push(c);
        }
    }
    groups
        .into_iter()
        .filter_map(|(s, values)| BoxStats::from_values(&values).map(|b| (s, b)))
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Symmetric Pearson correlation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` squared entries. NaN where undefined.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlations between `columns`, each pair over the rows where
/// both cells are numeric.
pub fn correlation_matrix(table: &RowTable, columns: &[&str]) -> CorrelationMatrix {
    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|c| {
            table
                .column_values(c)
                .map(|v| v.as_f64().filter(|x| !x.is_nan()))
                .collect()
        })
        .collect();

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let (xs, ys): (Vec<f64>, Vec<f64>) = series[i]
                .iter()
                .zip(&series[j])
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .unzip();
            let r = pearson(&xs, &ys);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        values,
    }
}

/// Pearson's r, NaN for fewer than two points or a constant series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// Group-by means
// ---------------------------------------------------------------------------

/// Mean of several value columns for each distinct integer key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedMeans {
    pub key_column: String,
    pub value_columns: Vec<String>,
    /// Keys ascending; one mean per value column (NaN if no numeric cell).
    pub groups: Vec<(i64, Vec<f64>)>,
}

impl GroupedMeans {
    /// `(key, mean)` pairs for one value column.
    pub fn series(&self, column: &str) -> Vec<(i64, f64)> {
        let Some(j) = self.value_columns.iter().position(|c| c == column) else {
            return Vec::new();
        };
        self.groups.iter().map(|(k, means)| (*k, means[j])).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Rows without an integral key are skipped; nulls are skipped per value
/// column.
pub fn grouped_means(table: &RowTable, key: &str, value_columns: &[&str]) -> GroupedMeans {
    let key_idx = table.column_index(key);
    let value_idx: Vec<Option<usize>> = value_columns
        .iter()
        .map(|c| table.column_index(c))
        .collect();

    // key → per column (sum, count)
    let mut acc: BTreeMap<i64, Vec<(f64, usize)>> = BTreeMap::new();
    if let Some(key_idx) = key_idx {
        for row in &table.rows {
            let Some(k) = row.cells.get(key_idx).and_then(|c| c.as_i64()) else {
                continue;
            };
            let sums = acc
                .entry(k)
                .or_insert_with(|| vec![(0.0, 0); value_columns.len()]);
            for (slot, idx) in sums.iter_mut().zip(&value_idx) {
                let v = idx
                    .and_then(|i| row.cells.get(i))
                    .and_then(|c| c.as_f64())
                    .filter(|v| !v.is_nan());
                if let Some(v) = v {
                    slot.0 += v;
                    slot.1 += 1;
                }
            }
        }
    }

    GroupedMeans {
        key_column: key.to_string(),
        value_columns: value_columns.iter().map(|c| c.to_string()).collect(),
        groups: acc
            .into_iter()
            .map(|(k, sums)| {
                let means = sums
                    .into_iter()
                    .map(|(s, n)| if n == 0 { f64::NAN } else { s / n as f64 })
                    .collect();
                (k, means)
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

/// Sum of `cnt`.
pub fn total_rentals(table: &RowTable) -> f64 {
    table
        .column_values(COUNT_COLUMN)
        .filter_map(|v| v.as_f64())
        .filter(|v| !v.is_nan())
        .sum()
}

/// Mean of `cnt`; `None` when no row has a count.
pub fn average_rentals(table: &RowTable) -> Option<f64> {
    let (sum, n) = table
        .column_values(COUNT_COLUMN)
        .filter_map(|v| v.as_f64())
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Everything the dashboard draws for one filter selection.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub season_boxes: Vec<(Season, BoxStats)>,
    pub correlations: CorrelationMatrix,
    pub by_workingday: GroupedMeans,
    pub by_hour: GroupedMeans,
    pub total_rentals: f64,
    pub average_rentals: Option<f64>,
    pub day_rows: usize,
    pub hour_rows: usize,
}

impl DashboardSummary {
    pub fn compute(day: &RowTable, hour: &RowTable) -> Self {
        DashboardSummary {
            season_boxes: season_boxes(day),
            correlations: correlation_matrix(day, &ENVIRONMENT_COLUMNS),
            by_workingday: grouped_means(day, WORKINGDAY_COLUMN, &WORKINGDAY_VALUES),
            by_hour: grouped_means(hour, HOUR_COLUMN, &HOURLY_VALUES),
            total_rentals: total_rentals(day),
            average_rentals: average_rentals(day),
            day_rows: day.len(),
            hour_rows: hour.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn int_table(columns: Vec<&str>, rows: Vec<Vec<i64>>) -> RowTable {
        RowTable::from_cells(
            columns,
            rows.into_iter()
                .map(|r| r.into_iter().map(CellValue::Integer).collect())
                .collect(),
        )
    }

    #[test]
    fn box_stats_split_whiskers_and_fliers() {
        let b = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 40.0]).unwrap();
        // q1 = 2.25, q3 = 4.75, upper fence = 8.5
        assert_eq!(b.q1, 2.25);
        assert_eq!(b.median, 3.5);
        assert_eq!(b.q3, 4.75);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 5.0);
        assert_eq!(b.fliers, vec![40.0]);
        assert!(BoxStats::from_values(&[]).is_none());
    }

    #[test]
    fn season_boxes_group_by_code() {
        let t = int_table(
            vec!["season", "cnt"],
            vec![vec![3, 10], vec![1, 4], vec![3, 20], vec![1, 6], vec![9, 1000]],
        );
        let boxes = season_boxes(&t);
        let seasons: Vec<Season> = boxes.iter().map(|(s, _)| *s).collect();
        assert_eq!(seasons, vec![Season::Spring, Season::Fall]);
        assert_eq!(boxes[0].1.median, 5.0);
        assert_eq!(boxes[1].1.median, 15.0);
    }

    #[test]
    fn pearson_detects_direction_and_degenerate_input() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&x, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
        assert!(pearson(&x, &[5.0, 5.0, 5.0, 5.0]).is_nan());
        assert!(pearson(&[1.0], &[2.0]).is_nan());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let t = RowTable::from_cells(
            vec!["temp", "hum", "cnt"],
            vec![
                vec![CellValue::Float(0.2), CellValue::Float(0.9), CellValue::Integer(100)],
                vec![CellValue::Float(0.4), CellValue::Float(0.7), CellValue::Integer(250)],
                vec![CellValue::Float(0.6), CellValue::Null, CellValue::Integer(300)],
                vec![CellValue::Float(0.8), CellValue::Float(0.2), CellValue::Integer(420)],
            ],
        );
        let m = correlation_matrix(&t, &["temp", "hum", "cnt"]);
        for c in &m.columns {
            assert!((m.get(c, c).unwrap() - 1.0).abs() < 1e-12);
        }
        assert_eq!(m.get("temp", "cnt"), m.get("cnt", "temp"));
        assert!(m.get("temp", "cnt").unwrap() > 0.9);
        assert!(m.get("temp", "hum").unwrap() < -0.9);
    }

    #[test]
    fn grouped_means_sort_keys_and_skip_nulls() {
        let t = RowTable::from_cells(
            vec!["workingday", "casual", "cnt"],
            vec![
                vec![CellValue::Integer(1), CellValue::Integer(10), CellValue::Integer(100)],
                vec![CellValue::Integer(0), CellValue::Integer(40), CellValue::Integer(300)],
                vec![CellValue::Integer(1), CellValue::Null, CellValue::Integer(200)],
                vec![CellValue::Null, CellValue::Integer(99), CellValue::Integer(999)],
            ],
        );
        let g = grouped_means(&t, "workingday", &["casual", "cnt"]);
        assert_eq!(g.groups.len(), 2);
        assert_eq!(g.series("casual"), vec![(0, 40.0), (1, 10.0)]);
        assert_eq!(g.series("cnt"), vec![(0, 300.0), (1, 150.0)]);
        assert!(g.series("missing").is_empty());
    }

    #[test]
    fn scalar_metrics() {
        let t = int_table(vec!["cnt"], vec![vec![985], vec![801], vec![1349]]);
        assert_eq!(total_rentals(&t), 3135.0);
        assert_eq!(average_rentals(&t), Some(1045.0));

        let with_nan = RowTable::from_cells(
            vec!["cnt"],
            vec![
                vec![CellValue::Integer(10)],
                vec![CellValue::Float(f64::NAN)],
                vec![CellValue::Integer(30)],
            ],
        );
        assert_eq!(total_rentals(&with_nan), 40.0);
        assert_eq!(average_rentals(&with_nan), Some(20.0));

        let nan_only = RowTable::from_cells(vec!["cnt"], vec![vec![CellValue::Float(f64::NAN)]]);
        assert_eq!(average_rentals(&nan_only), None);

        let empty = RowTable::from_cells(vec!["cnt"], Vec::new());
        assert_eq!(total_rentals(&empty), 0.0);
        assert_eq!(average_rentals(&empty), None);
    }
}
