use std::path::PathBuf;

use anyhow::{Context, Result};
use bikeshare_dashboard::data::loader::{DAY_FILE, HOUR_FILE};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DAY_HEADER: [&str; 16] = [
    "instant", "dteday", "season", "yr", "mnth", "holiday", "weekday", "workingday",
    "weathersit", "temp", "atemp", "hum", "windspeed", "casual", "registered", "cnt",
];

const HOUR_HEADER: [&str; 17] = [
    "instant", "dteday", "season", "yr", "mnth", "hr", "holiday", "weekday", "workingday",
    "weathersit", "temp", "atemp", "hum", "windspeed", "casual", "registered", "cnt",
];

/// Fixed-date holidays, (month, day).
const HOLIDAYS: [(u32, u32); 4] = [(1, 1), (7, 4), (11, 11), (12, 25)];

/// Weather and calendar shared by a day and its hours.
struct DayContext {
    date: NaiveDate,
    season: u32,
    yr: u32,
    holiday: bool,
    workingday: bool,
    weathersit: u32,
    temp: f64,
    hum: f64,
    windspeed: f64,
}

impl DayContext {
    fn draw(date: NaiveDate, rng: &mut StdRng) -> Self {
        let month = date.month();
        let season = (month % 12) / 3 + 1;
        let holiday = HOLIDAYS.contains(&(month, date.day()));
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);

        // Normalised temperature peaking mid-year.
        let phase = (date.ordinal() as f64 / 365.0) * std::f64::consts::TAU;
        let temp = (0.5 - 0.3 * phase.cos() + rng.random_range(-0.08..0.08)).clamp(0.02, 0.98);

        DayContext {
            date,
            season,
            yr: (date.year() - 2011) as u32,
            holiday,
            workingday: !weekend && !holiday,
            weathersit: match rng.random::<f64>() {
                p if p < 0.65 => 1,
                p if p < 0.95 => 2,
                _ => 3,
            },
            temp,
            hum: rng.random_range(0.3..0.95),
            windspeed: rng.random_range(0.02..0.45),
        }
    }

    fn calendar_fields(&self) -> [String; 3] {
        [
            self.date.format("%Y-%m-%d").to_string(),
            self.season.to_string(),
            self.yr.to_string(),
        ]
    }

    fn atemp(&self) -> f64 {
        (self.temp * 0.92 + 0.03).clamp(0.0, 1.0)
    }

    /// Demand multiplier from weather and temperature.
    fn demand(&self) -> f64 {
        let weather = match self.weathersit {
            1 => 1.0,
            2 => 0.8,
            _ => 0.45,
        };
        weather * (0.4 + self.temp) * (1.1 - 0.3 * self.hum)
    }
}

/// Relative hourly demand: commuter peaks on working days, a midday hump
/// otherwise.
fn hourly_shape(hr: u32, workingday: bool) -> f64 {
    let h = hr as f64;
    let bump = |centre: f64, width: f64| (-(h - centre).powi(2) / (2.0 * width * width)).exp();
    if workingday {
        0.05 + bump(8.0, 1.2) + 1.1 * bump(17.5, 1.5) + 0.3 * bump(12.5, 2.0)
    } else {
        0.05 + 0.9 * bump(14.0, 3.5)
    }
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Bike Sharing Dataset"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(42);
    let mut day_writer = csv::Writer::from_path(out_dir.join(DAY_FILE)).context("creating day.csv")?;
    let mut hour_writer =
        csv::Writer::from_path(out_dir.join(HOUR_FILE)).context("creating hour.csv")?;
    day_writer.write_record(DAY_HEADER)?;
    hour_writer.write_record(HOUR_HEADER)?;

    let first = NaiveDate::from_ymd_opt(2011, 1, 1).context("invalid start date")?;
    let last = NaiveDate::from_ymd_opt(2012, 12, 31).context("invalid end date")?;

    let mut day_instant = 0u32;
    let mut hour_instant = 0u32;
    for date in first.iter_days().take_while(|d| *d <= last) {
        let ctx = DayContext::draw(date, &mut rng);
        day_instant += 1;

        let growth = 1.0 + 0.6 * ctx.yr as f64;
        let (mut casual_total, mut registered_total) = (0u32, 0u32);

        for hr in 0..24u32 {
            let shape = hourly_shape(hr, ctx.workingday) * ctx.demand() * growth;
            let casual_share = if ctx.workingday { 0.12 } else { 0.35 };
            let noise = rng.random_range(0.8..1.2);
            let total = 220.0 * shape * noise;
            // Occasional spikes give the outlier filter something to trim.
            let total = if rng.random::<f64>() < 0.003 { total * 4.0 } else { total };
            let casual = (total * casual_share).round() as u32;
            let registered = (total * (1.0 - casual_share)).round() as u32;
            casual_total += casual;
            registered_total += registered;

            hour_instant += 1;
            let [dteday, season, yr] = ctx.calendar_fields();
            hour_writer.write_record([
                hour_instant.to_string(),
                dteday,
                season,
                yr,
                date.month().to_string(),
                hr.to_string(),
                u8::from(ctx.holiday).to_string(),
                date.weekday().num_days_from_sunday().to_string(),
                u8::from(ctx.workingday).to_string(),
                ctx.weathersit.to_string(),
                format!("{:.2}", ctx.temp),
                format!("{:.4}", ctx.atemp()),
                format!("{:.2}", ctx.hum),
                format!("{:.4}", ctx.windspeed),
                casual.to_string(),
                registered.to_string(),
                (casual + registered).to_string(),
            ])?;
        }

        let [dteday, season, yr] = ctx.calendar_fields();
        day_writer.write_record([
            day_instant.to_string(),
            dteday,
            season,
            yr,
            date.month().to_string(),
            u8::from(ctx.holiday).to_string(),
            date.weekday().num_days_from_sunday().to_string(),
            u8::from(ctx.workingday).to_string(),
            ctx.weathersit.to_string(),
            format!("{:.6}", ctx.temp),
            format!("{:.6}", ctx.atemp()),
            format!("{:.6}", ctx.hum),
            format!("{:.6}", ctx.windspeed),
            casual_total.to_string(),
            registered_total.to_string(),
            (casual_total + registered_total).to_string(),
        ])?;
    }

    day_writer.flush()?;
    hour_writer.flush()?;

    println!(
        "Wrote {day_instant} days and {hour_instant} hours to {}",
        out_dir.display()
    );
    Ok(())
}
