mod common;

use bikeshare_dashboard::data::filter::{filter_table, FilterCriteria, Season};
use bikeshare_dashboard::data::loader::{load_datasets, load_table, DataFiles, LoadError};
use bikeshare_dashboard::data::model::{CellValue, RowTable};
use bikeshare_dashboard::data::outliers::{clean_table, remove_outliers_iqr};
use bikeshare_dashboard::data::summary::DashboardSummary;
use bikeshare_dashboard::state::AppState;
use chrono::NaiveDate;

fn ymd(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
}

#[test]
fn missing_day_file_is_data_not_found() {
    let dir = tempfile::tempdir().unwrap();
    common::write_hour_csv(dir.path());

    let err = load_datasets(dir.path(), &DataFiles::default()).unwrap_err();
    match err {
        LoadError::DataNotFound { path, .. } => assert!(path.ends_with("day.csv")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_hour_file_is_data_not_found() {
    let dir = tempfile::tempdir().unwrap();
    common::write_day_csv(dir.path());

    let err = load_datasets(dir.path(), &DataFiles::default()).unwrap_err();
    assert!(matches!(err, LoadError::DataNotFound { ref path, .. } if path.ends_with("hour.csv")));
    assert!(err.to_string().contains("hour.csv"));
}

#[test]
fn unreadable_path_is_data_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("day.csv");
    std::fs::create_dir(&path).unwrap();

    let err = load_table(&path).unwrap_err();
    assert!(
        matches!(err, LoadError::DataNotFound { ref path, .. } if path.ends_with("day.csv")),
        "got {err:?}"
    );
}

#[test]
fn ragged_record_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("day.csv");
    std::fs::write(&path, "dteday,season,cnt\n2011-01-01,1,985\n2011-01-02,1\n").unwrap();

    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, LoadError::Malformed { .. }), "got {err}");
}

#[test]
fn loader_keeps_header_order_and_types_cells() {
    let dir = tempfile::tempdir().unwrap();
    common::write_day_csv(dir.path());
    let day = load_table(&dir.path().join("day.csv")).unwrap();

    assert_eq!(day.columns, common::DAY_COLUMNS);
    assert_eq!(day.len(), 10);
    assert_eq!(day.value(0, "dteday"), Some(&CellValue::Date(ymd(1))));
    assert_eq!(day.value(0, "season"), Some(&CellValue::Integer(1)));
    assert_eq!(day.value(0, "temp"), Some(&CellValue::Float(0.21)));
    assert_eq!(
        day.numeric_columns(),
        vec!["instant", "season", "workingday", "temp", "casual", "registered", "cnt"]
    );
}

#[test]
fn load_clean_filter_summarise() {
    let dir = tempfile::tempdir().unwrap();
    common::write_day_csv(dir.path());
    common::write_hour_csv(dir.path());
    let raw = load_datasets(dir.path(), &DataFiles::default()).unwrap();

    // Day 6 carries an extreme `registered` value; nothing else is extreme.
    let day = clean_table(&raw.day);
    let hour = clean_table(&raw.hour);
    assert_eq!(day.len(), 9);
    assert!(day.column_values("dteday").all(|v| v.as_date() != Some(ymd(6))));
    assert_eq!(hour.len(), raw.hour.len());
    assert_eq!(raw.day.len(), 10, "loaded table must not change");

    let criteria = FilterCriteria::new(ymd(3), ymd(7), [Season::Spring]);
    let day = filter_table(&day, &criteria);
    let hour = filter_table(&hour, &criteria);
    let days: Vec<NaiveDate> = day.column_values("dteday").filter_map(|v| v.as_date()).collect();
    assert_eq!(days, vec![ymd(3), ymd(5), ymd(7)]);
    assert_eq!(hour.len(), 9);

    let summary = DashboardSummary::compute(&day, &hour);
    assert_eq!(summary.total_rentals, 2400.0);
    assert_eq!(summary.average_rentals, Some(800.0));
    assert_eq!(summary.by_workingday.series("cnt"), vec![(1, 800.0)]);
    assert_eq!(
        summary.by_hour.series("casual"),
        vec![(0, 15.0), (1, 20.0), (2, 25.0)]
    );
    assert_eq!(summary.season_boxes.len(), 1);
    assert_eq!(summary.season_boxes[0].0, Season::Spring);
}

#[test]
fn app_state_halts_on_missing_data() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::from_load(load_datasets(dir.path(), &DataFiles::default()));
    assert!(!state.has_data());
    assert!(state.view.is_none());
    assert!(state.error_message.is_some());
}

#[test]
fn cleaning_a_cleaned_fixture_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    common::write_day_csv(dir.path());
    let day = load_table(&dir.path().join("day.csv")).unwrap();

    let once = clean_table(&day);
    let twice = clean_table(&once);
    assert_eq!(once, twice);
}

#[test]
fn cleaning_is_not_idempotent_in_general() {
    // First pass: q1=19, q3=27, lower fence 7 → 0 dropped.
    // Second pass over the rest: q1=22, q3=27.75, lower fence 13.375 → 12 dropped.
    let t = RowTable::from_cells(
        vec!["v"],
        [0, 12, 19, 23, 25, 26, 27, 30, 30]
            .into_iter()
            .map(|v| vec![CellValue::Integer(v)])
            .collect(),
    );
    let once = clean_table(&t);
    let twice = clean_table(&once);
    assert_eq!(once.len(), 8);
    assert_eq!(twice.len(), 7);
    assert_eq!(remove_outliers_iqr(&once, "v"), twice);
}
