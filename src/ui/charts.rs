use bikeshare_dashboard::data::filter::Season;
use bikeshare_dashboard::data::summary::{BoxStats, CorrelationMatrix, DashboardSummary, GroupedMeans};
use bikeshare_dashboard::state::AppState;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points,
};

use crate::color::{generate_palette, CoolWarm};
use crate::ui::panels::section_header;

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render every dashboard section for the current view.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data loaded.");
        });
        return;
    };
    let summary = &view.summary;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Bike Sharing Analysis Dashboard").size(26.0));

            section_header(ui, "1. Environmental and Seasonal Factors Impact");
            ui.columns(2, |cols| {
                cols[0].strong("Rental Distribution by Season");
                season_box_plot(&mut cols[0], &summary.season_boxes);
                cols[1].strong("Environmental Factors Correlation");
                correlation_heatmap(&mut cols[1], &summary.correlations);
            });

            section_header(ui, "2. Usage Patterns Analysis");
            ui.columns(2, |cols| {
                cols[0].strong("Average Usage by Day Type");
                workingday_bar_chart(&mut cols[0], &summary.by_workingday);
                cols[1].strong("Hourly Usage Patterns");
                hourly_line_chart(&mut cols[1], &summary.by_hour);
            });

            section_header(ui, "Summary Statistics");
            metrics(ui, summary);

            ui.add_space(12.0);
            ui.separator();
            ui.label("Data source: Bike Sharing Dataset");
        });
}

fn empty_notice(ui: &mut Ui) {
    ui.label(RichText::new("No rows match the current filters.").italics());
}

// ---------------------------------------------------------------------------
// Box plot: cnt by season
// ---------------------------------------------------------------------------

fn season_box_plot(ui: &mut Ui, boxes: &[(Season, BoxStats)]) {
    if boxes.is_empty() {
        empty_notice(ui);
        return;
    }
    let palette = generate_palette(Season::ALL.len());

    Plot::new("season_box_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Season (1:Spring, 2:Summer, 3:Fall, 4:Winter)")
        .y_axis_label("Rentals")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (season, stats) in boxes {
                let x = season.code() as f64;
                let color = palette[(season.code() - 1) as usize];
                let spread = BoxSpread::new(
                    stats.lower_whisker,
                    stats.q1,
                    stats.median,
                    stats.q3,
                    stats.upper_whisker,
                );
                let elem = BoxElem::new(x, spread)
                    .name(season.label())
                    .box_width(0.6)
                    .whisker_width(0.3)
                    .fill(color.linear_multiply(0.4))
                    .stroke(egui::Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(season.label()));

                if !stats.fliers.is_empty() {
                    let points: PlotPoints = stats.fliers.iter().map(|&v| [x, v]).collect();
                    plot_ui.points(Points::new(points).radius(2.5).color(color));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let scale = CoolWarm::default();

    egui::Grid::new("correlation_heatmap")
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for col in &matrix.columns {
                ui.strong(col);
            }
            ui.end_row();

            for (i, row_name) in matrix.columns.iter().enumerate() {
                ui.strong(row_name);
                for &r in &matrix.values[i] {
                    let text = if r.is_nan() {
                        "  -  ".to_string()
                    } else {
                        format!("{r:+.2}")
                    };
                    ui.label(
                        RichText::new(text)
                            .monospace()
                            .size(15.0)
                            .color(scale.text_color_for(r))
                            .background_color(scale.color_for(r)),
                    );
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Bar chart: mean usage by working day
// ---------------------------------------------------------------------------

fn workingday_bar_chart(ui: &mut Ui, means: &GroupedMeans) {
    if means.is_empty() {
        empty_notice(ui);
        return;
    }
    let n = means.value_columns.len();
    let palette = generate_palette(n);
    let width = 0.8 / n as f64;

    Plot::new("workingday_bar_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("workingday (0: weekend/holiday, 1: working day)")
        .y_axis_label("Average rentals")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (j, column) in means.value_columns.iter().enumerate() {
                let offset = (j as f64 - (n as f64 - 1.0) / 2.0) * width;
                let bars: Vec<Bar> = means
                    .series(column)
                    .into_iter()
                    .filter(|(_, mean)| !mean.is_nan())
                    .map(|(key, mean)| {
                        Bar::new(key as f64 + offset, mean)
                            .width(width)
                            .name(format!("{column} ({key})"))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(column).color(palette[j]));
            }
        });
}

// ---------------------------------------------------------------------------
// Line chart: mean usage by hour
// ---------------------------------------------------------------------------

fn hourly_line_chart(ui: &mut Ui, means: &GroupedMeans) {
    if means.is_empty() {
        empty_notice(ui);
        return;
    }
    let palette = generate_palette(means.value_columns.len());

    Plot::new("hourly_line_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Hour of day")
        .y_axis_label("Average rentals")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (j, column) in means.value_columns.iter().enumerate() {
                let points: PlotPoints = means
                    .series(column)
                    .into_iter()
                    .filter(|(_, mean)| !mean.is_nan())
                    .map(|(hr, mean)| [hr as f64, mean])
                    .collect();
                plot_ui.line(Line::new(points).name(column).color(palette[j]).width(2.0));
            }
        });
}

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

fn metrics(ui: &mut Ui, summary: &DashboardSummary) {
    ui.columns(2, |cols| {
        cols[0].strong("Total Rentals");
        cols[0].label("Total Bike Rentals");
        cols[0].heading(format_thousands(summary.total_rentals));

        cols[1].strong("Average Daily Rentals");
        cols[1].label("Average Daily Rentals");
        let avg = summary
            .average_rentals
            .map(format_thousands)
            .unwrap_or_else(|| "n/a".to_string());
        cols[1].heading(avg);
    });
}

/// Round to an integer and group digits by thousands: `1243103.4` → `1,243,103`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
