use bikeshare_dashboard::data::filter::Season;
use bikeshare_dashboard::state::AppState;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Bike Sharing Analysis Dashboard");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            ui.strong("Start Date");
            let mut start = state.criteria.start;
            ui.add(DatePickerButton::new(&mut start).id_salt("start_date"));
            if start != state.criteria.start {
                state.set_start(start);
            }

            ui.add_space(4.0);
            ui.strong("End Date");
            let mut end = state.criteria.end;
            ui.add(DatePickerButton::new(&mut end).id_salt("end_date"));
            if end != state.criteria.end {
                state.set_end(end);
            }

            if state.criteria.start > state.criteria.end {
                ui.label(
                    RichText::new("Start date is after end date: nothing to show.")
                        .color(Color32::YELLOW),
                );
            }
            ui.separator();

            // ---- Season multi-select ----
            let n_selected = state.criteria.seasons.len();
            ui.strong(format!("Select Season  ({n_selected}/{})", Season::ALL.len()));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_seasons();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_seasons();
                }
            });
            for season in Season::ALL {
                let mut checked = state.criteria.seasons.contains(&season);
                if ui.checkbox(&mut checked, season.label()).changed() {
                    state.toggle_season(season);
                }
            }
            ui.separator();

            // ---- Row counts ----
            if let (Some(cleaned), Some(view)) = (&state.cleaned, &state.view) {
                ui.label(format!(
                    "{} of {} days shown",
                    view.tables.day.len(),
                    cleaned.day.len()
                ));
                ui.label(format!(
                    "{} of {} hours shown",
                    view.tables.hour.len(),
                    cleaned.hour.len()
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Load failure
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when the datasets could not be loaded.
pub fn error_view(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(message).color(Color32::RED).heading());
    });
}

/// Section heading with some space above it.
pub fn section_header(ui: &mut Ui, text: &str) {
    ui.add_space(12.0);
    ui.heading(text);
    ui.add(egui::Separator::default().spacing(6.0));
}
