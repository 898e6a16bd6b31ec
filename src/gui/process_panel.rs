/// Processing panel: left sidebar with run settings and run feedback

use crate::data::zone::{Diagnostics, SkipReason};
use crate::gui::theme::ThemeColors;
use crate::pipeline::averaging::RowRange;
use crate::pipeline::processing::InputDialect;

/// Editable settings for the next run
#[derive(Debug, Clone, Default)]
pub struct ProcessPanelState {
    pub dialect: InputDialect,
    pub row_range: String,
    pub normalize: bool,
}

/// Actions triggered by the processing panel
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessAction {
    None,
    OpenFile,
    Process,
    /// Rescale the output currently shown, without re-reading the input
    NormalizeOutput,
    SaveOutput,
}

/// What the panel needs to know about the last run
pub struct RunSummary<'a> {
    pub input_name: Option<&'a str>,
    pub zone_count: usize,
    pub warnings: &'a [String],
    pub diagnostics: &'a Diagnostics,
    pub has_output: bool,
}

/// Render the processing panel in the left sidebar
pub fn show_process_panel(
    ui: &mut egui::Ui,
    state: &mut ProcessPanelState,
    run: &RunSummary<'_>,
    colors: &ThemeColors,
) -> ProcessAction {
    let mut action = ProcessAction::None;

    ui.vertical_centered(|ui| {
        ui.heading("⚙️ Processing");
    });
    ui.separator();

    match run.input_name {
        Some(name) => {
            ui.label(egui::RichText::new(format!("📄 {}", name)).strong());
        }
        None => {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Load a data file to begin.")
                    .size(12.5)
                    .color(colors.text_muted),
            );
            ui.label(
                egui::RichText::new("Drag & drop or File → Open")
                    .size(12.0)
                    .color(colors.text_muted),
            );
        }
    }
    ui.add_space(4.0);
    if ui.button("📂 Open…").clicked() {
        action = ProcessAction::OpenFile;
    }
    ui.separator();

    // ── Settings ──
    egui::CollapsingHeader::new("📊 Input")
        .default_open(true)
        .show(ui, |ui| {
            egui::ComboBox::from_label("Dialect")
                .selected_text(state.dialect.to_string())
                .show_ui(ui, |ui| {
                    for dialect in InputDialect::ALL {
                        ui.selectable_value(&mut state.dialect, dialect, dialect.to_string());
                    }
                });

            ui.add_enabled_ui(state.dialect == InputDialect::Sdf, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Rows per block:");
                    ui.add(
                        egui::TextEdit::singleline(&mut state.row_range)
                            .hint_text("start:end")
                            .desired_width(90.0),
                    );
                });
                let range_ok = RowRange::parse(&state.row_range).is_ok();
                if !range_ok {
                    ui.colored_label(colors.warning, "⚠ Not start:end, full blocks will be used");
                } else if state.row_range.trim().is_empty() {
                    ui.label(
                        egui::RichText::new("Empty averages every row of a block")
                            .size(11.0)
                            .color(colors.text_muted),
                    );
                }
            });

            ui.checkbox(&mut state.normalize, "Normalize each zone to [0, 1]");
        });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let run_btn = egui::Button::new(egui::RichText::new("▶ Process").strong());
        if ui.add_enabled(run.input_name.is_some(), run_btn).clicked() {
            action = ProcessAction::Process;
        }
        if ui
            .add_enabled(run.has_output, egui::Button::new("⇲ Normalize"))
            .on_hover_text("Rescale the displayed output in place")
            .clicked()
        {
            action = ProcessAction::NormalizeOutput;
        }
    });
    if ui
        .add_enabled(run.has_output, egui::Button::new("💾 Save Output…"))
        .clicked()
    {
        action = ProcessAction::SaveOutput;
    }

    if !run.has_output {
        return action;
    }

    // ── Last run ──
    ui.separator();
    ui.label(format!("Zones: {}", run.zone_count));
    let skipped = run.diagnostics.skipped_count();
    if skipped > 0 {
        ui.collapsing(format!("Skipped lines: {}", skipped), |ui| {
            ui.label(format!(
                "{} with too few fields",
                run.diagnostics.count_of(SkipReason::TooFewFields)
            ));
            ui.label(format!(
                "{} with unparsable values",
                run.diagnostics.count_of(SkipReason::UnparsableValue)
            ));
            egui::ScrollArea::vertical()
                .id_salt("skipped_lines")
                .max_height(120.0)
                .show(ui, |ui| {
                    for line in &run.diagnostics.skipped {
                        ui.label(
                            egui::RichText::new(format!("line {}: {}", line.line_number, line.reason))
                                .size(11.0)
                                .color(colors.text_muted),
                        );
                    }
                });
        });
    }

    if run.warnings.is_empty() {
        ui.colored_label(colors.success, "✔ No warnings");
    } else {
        ui.colored_label(colors.warning, format!("⚠ {} warnings", run.warnings.len()));
        egui::ScrollArea::vertical()
            .id_salt("run_warnings")
            .max_height(200.0)
            .show(ui, |ui| {
                for warning in run.warnings {
                    ui.label(egui::RichText::new(warning).size(11.5).color(colors.warning));
                }
            });
    }

    action
}
