use std::path::Path;

pub const DAY_COLUMNS: [&str; 8] = [
    "instant", "dteday", "season", "workingday", "temp", "casual", "registered", "cnt",
];

/// Ten days 2011-01-01..=10, seasons alternating 1, 2. Day 6 has an extreme
/// `registered` count.
pub fn write_day_csv(dir: &Path) {
    let mut writer = csv::Writer::from_path(dir.join("day.csv")).unwrap();
    writer.write_record(DAY_COLUMNS).unwrap();
    for d in 1..=10u32 {
        let season = if d % 2 == 1 { 1 } else { 2 };
        let workingday = if [1, 2, 8, 9].contains(&d) { 0 } else { 1 };
        let casual = 100 + 10 * d;
        let registered = if d == 6 { 5000 } else { 600 + 10 * d };
        writer
            .write_record([
                d.to_string(),
                format!("2011-01-{d:02}"),
                season.to_string(),
                workingday.to_string(),
                format!("{:.2}", 0.20 + 0.01 * d as f64),
                casual.to_string(),
                registered.to_string(),
                (casual + registered).to_string(),
            ])
            .unwrap();
    }
    writer.flush().unwrap();
}

/// Three hours for each of the same ten days, no outliers.
pub fn write_hour_csv(dir: &Path) {
    let mut writer = csv::Writer::from_path(dir.join("hour.csv")).unwrap();
    writer
        .write_record(["instant", "dteday", "season", "hr", "casual", "registered", "cnt"])
        .unwrap();
    let mut instant = 0;
    for d in 1..=10u32 {
        let season = if d % 2 == 1 { 1 } else { 2 };
        for hr in 0..3u32 {
            instant += 1;
            let casual = 10 + 5 * hr + d;
            let registered = 50 + 10 * hr + d;
            writer
                .write_record([
                    instant.to_string(),
                    format!("2011-01-{d:02}"),
                    season.to_string(),
                    hr.to_string(),
                    casual.to_string(),
                    registered.to_string(),
                    (casual + registered).to_string(),
                ])
                .unwrap();
        }
    }
    writer.flush().unwrap();
}
