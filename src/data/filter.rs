use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use super::model::RowTable;

/// Column holding the record date.
pub const DATE_COLUMN: &str = "dteday";
/// Column holding the season code.
pub const SEASON_COLUMN: &str = "season";

// ---------------------------------------------------------------------------
// Season codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Fall = 3,
    Winter = 4,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Option<Season> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Date interval (inclusive on both ends) and selected seasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub seasons: BTreeSet<Season>,
}

impl FilterCriteria {
    pub fn new(start: NaiveDate, end: NaiveDate, seasons: impl IntoIterator<Item = Season>) -> Self {
        FilterCriteria {
            start,
            end,
            seasons: seasons.into_iter().collect(),
        }
    }

    /// Initial criteria: the full date span of `table` and every season.
    /// `None` if no row carries a readable date.
    pub fn spanning(table: &RowTable) -> Option<Self> {
        let (start, end) = date_range(table)?;
        Some(FilterCriteria::new(start, end, Season::ALL))
    }

    /// Whether any row can match at all.
    pub fn is_satisfiable(&self) -> bool {
        !self.seasons.is_empty() && self.start <= self.end
    }

    pub fn matches(&self, date: NaiveDate, season: Season) -> bool {
        self.start <= date && date <= self.end && self.seasons.contains(&season)
    }
}

/// Earliest and latest readable date of the table.
pub fn date_range(table: &RowTable) -> Option<(NaiveDate, NaiveDate)> {
    table
        .column_values(DATE_COLUMN)
        .filter_map(|v| v.as_date())
        .fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
}

/// Return indices of rows that pass the criteria.
///
/// A row passes when:
/// * its date parses and lies within `[start, end]`
/// * its season cell is a known season code in the selected set
///
/// An empty season set or an inverted range matches nothing.
pub fn filtered_indices(table: &RowTable, criteria: &FilterCriteria) -> Vec<usize> {
    if !criteria.is_satisfiable() {
        return Vec::new();
    }
    let (Some(date_idx), Some(season_idx)) = (
        table.column_index(DATE_COLUMN),
        table.column_index(SEASON_COLUMN),
    ) else {
        log::warn!("table lacks '{DATE_COLUMN}' or '{SEASON_COLUMN}', nothing matches");
        return Vec::new();
    };

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            let date = row.cells.get(date_idx).and_then(|c| c.as_date());
            let season = row
                .cells
                .get(season_idx)
                .and_then(|c| c.as_i64())
                .and_then(Season::from_code);
            match (date, season) {
                (Some(d), Some(s)) => criteria.matches(d, s),
                _ => false,
            }
        })
        .map(|(i, _)| i)
        .collect()
}

/// New table holding the rows that pass the criteria, in their original
/// order.
pub fn filter_table(table: &RowTable, criteria: &FilterCriteria) -> RowTable {
    table.select_rows(&filtered_indices(table, criteria))
}
