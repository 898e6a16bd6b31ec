/// Toolbar: top menu bar with file operations and quick actions

use std::path::{Path, PathBuf};

use crate::pipeline::processing::InputDialect;

/// Actions that can be triggered from the toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    OpenFile,
    Reprocess,
    SaveOutput,
    ExportLog,
    OpenFitResults,
    ThemeToggle,
    ShowLog,
    ShowAbout,
}

/// Render the toolbar and return any triggered action
pub fn show_toolbar(ctx: &egui::Context, theme_label: &str, has_input: bool, has_output: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("📁 File", |ui| {
                if ui.button("📂 Open Data File…").clicked() {
                    action = ToolbarAction::OpenFile;
                    ui.close_menu();
                }
                if ui
                    .add_enabled(has_input, egui::Button::new("🔄 Reprocess"))
                    .clicked()
                {
                    action = ToolbarAction::Reprocess;
                    ui.close_menu();
                }
                ui.separator();
                if ui
                    .add_enabled(has_output, egui::Button::new("💾 Save Output…"))
                    .clicked()
                {
                    action = ToolbarAction::SaveOutput;
                    ui.close_menu();
                }
                if ui.button("📋 Export Log…").clicked() {
                    action = ToolbarAction::ExportLog;
                    ui.close_menu();
                }
            });

            ui.menu_button("📈 Results", |ui| {
                if ui.button("📂 Load Fit Results…").clicked() {
                    action = ToolbarAction::OpenFitResults;
                    ui.close_menu();
                }
            });

            ui.menu_button("🔍 View", |ui| {
                if ui.button("📋 Processing Log").clicked() {
                    action = ToolbarAction::ShowLog;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button(format!("🎨 Theme: {}", theme_label)).clicked() {
                    action = ToolbarAction::ThemeToggle;
                    ui.close_menu();
                }
            });

            ui.menu_button("❓ Help", |ui| {
                if ui.button("ℹ About").clicked() {
                    action = ToolbarAction::ShowAbout;
                    ui.close_menu();
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(egui::Button::new(
                    egui::RichText::new(theme_label).size(12.0)
                ).corner_radius(12.0)).clicked() {
                    action = ToolbarAction::ThemeToggle;
                }
                ui.separator();
                ui.label(
                    egui::RichText::new("Relaxometry Processing")
                        .color(egui::Color32::from_rgb(0x70, 0x75, 0x80))
                        .size(12.0),
                );
            });
        });
    });

    action
}

/// Show file-open dialog for relaxometry data, starting in `start_dir`
pub fn open_file_dialog(start_dir: Option<&Path>, dialect: InputDialect) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Open Relaxometry Data File");
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    // Current dialect's filter first so it is preselected
    dialog = match dialect {
        InputDialect::Sdf => dialog
            .add_filter("SDF files", &["sdf"])
            .add_filter("FFC-IST CSV", &["csv"]),
        InputDialect::FfcIst => dialog
            .add_filter("FFC-IST CSV", &["csv"])
            .add_filter("SDF files", &["sdf"]),
    };
    dialog.add_filter("All Files", &["*"]).pick_file()
}

/// Show save dialog for the processed zone text
pub fn save_output_dialog(suggested_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Processed Data")
        .set_file_name(suggested_name)
        .add_filter("Text File", &["txt"])
        .add_filter("All Files", &["*"])
        .save_file()
}

/// Show folder picker for an unpacked fitting-service archive
pub fn open_results_dialog(start_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Select Unpacked Fit Results Folder");
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_folder()
}

/// Show save dialog for log export
pub fn save_log_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export Processing Log")
        .add_filter("Text File", &["txt"])
        .add_filter("JSON", &["json"])
        .save_file()
}

/// `<stem>_processed.txt`, the name offered when saving output
pub fn suggested_output_name(input: Option<&Path>) -> String {
    let stem = input
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    format!("{}_processed.txt", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_output_name() {
        assert_eq!(
            suggested_output_name(Some(Path::new("/data/run_12.sdf"))),
            "run_12_processed.txt"
        );
        assert_eq!(suggested_output_name(None), "output_processed.txt");
    }
}
