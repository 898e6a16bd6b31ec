/// Fit-results window: shows the table from an unpacked fitting-service report

use std::path::PathBuf;

use crate::data::fit_results::FitTable;
use crate::gui::theme::ThemeColors;

#[derive(Debug, Clone, Default)]
pub struct FitResultsState {
    pub open: bool,
    pub source: Option<PathBuf>,
    pub table: Option<FitTable>,
    pub error: Option<String>,
}

impl FitResultsState {
    pub fn show_table(&mut self, source: PathBuf, table: FitTable) {
        self.source = Some(source);
        self.table = Some(table);
        self.error = None;
        self.open = true;
    }

    pub fn show_error(&mut self, error: String) {
        self.table = None;
        self.error = Some(error);
        self.open = true;
    }
}

pub fn show_fit_results_window(ctx: &egui::Context, state: &mut FitResultsState, colors: &ThemeColors) {
    if !state.open {
        return;
    }
    let mut open = state.open;
    egui::Window::new("📈 Fit Results")
        .open(&mut open)
        .default_size([640.0, 360.0])
        .resizable(true)
        .show(ctx, |ui| {
            if let Some(source) = &state.source {
                ui.label(
                    egui::RichText::new(source.display().to_string())
                        .size(11.0)
                        .color(colors.text_muted),
                );
            }
            if let Some(error) = &state.error {
                ui.colored_label(colors.error, error);
                return;
            }
            let Some(table) = &state.table else {
                return;
            };

            if ui.button("📋 Copy as TSV").clicked() {
                ui.ctx().copy_text(table.to_display_text());
            }
            ui.separator();

            egui::ScrollArea::both().id_salt("fit_table").show(ui, |ui| {
                egui::Grid::new("fit_results_grid")
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        for header in &table.headers {
                            ui.label(egui::RichText::new(header).strong());
                        }
                        ui.end_row();
                        for row in &table.rows {
                            for cell in row {
                                ui.monospace(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
        });
    state.open = open;
}
