/// Main application state and eframe::App implementation
///
/// Ties together all subsystems: processing, GUI, settings, and logging.

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::config::AppSettings;
use crate::data::fit_results;
use crate::data::zone::Diagnostics;
use crate::gui::fit_results_window::{self, FitResultsState};
use crate::gui::output_view::{self, OutputTab, OutputViewState};
use crate::gui::process_panel::{self, ProcessAction, ProcessPanelState, RunSummary};
use crate::gui::theme::{self, AppTheme, ThemeColors};
use crate::gui::toolbar::{self, ToolbarAction};
use crate::log::reproducibility::ReproLog;
use crate::pipeline::normalize;
use crate::pipeline::processing::{self, InputDialect, ProcessReport};
use crate::pipeline::series;

/// The main application
pub struct RelaxApp {
    /// Persisted settings and where they live
    settings: AppSettings,
    settings_path: PathBuf,

    /// File the current output was produced from
    input_path: Option<PathBuf>,
    /// Result of the last successful run
    report: Option<ProcessReport>,

    /// Reproducibility log
    repro_log: ReproLog,

    /// GUI sub-states
    panel_state: ProcessPanelState,
    output_state: OutputViewState,
    fit_results_state: FitResultsState,

    /// Status messages
    status_message: String,
    status_is_error: bool,
    show_log_window: bool,
    show_about: bool,

    /// Current theme
    current_theme: AppTheme,
    theme_colors: ThemeColors,

    /// Dropped files buffer
    dropped_files: Vec<PathBuf>,
}

impl RelaxApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = AppSettings::default_path();
        let settings = AppSettings::load(&settings_path);

        theme::apply_theme(&cc.egui_ctx, settings.theme);
        let theme_colors = ThemeColors::from_theme(settings.theme);

        // ── Typography: scale for monitor DPI ──
        let ppi = cc.egui_ctx.pixels_per_point();
        let base_size = if ppi > 1.5 { 14.0 } else { 13.0 };
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(base_size, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(base_size, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(base_size * 1.25, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::new(base_size * 0.92, egui::FontFamily::Monospace),
        );
        style.spacing.item_spacing = egui::vec2(8.0, 5.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        cc.egui_ctx.set_style(style);

        let panel_state = ProcessPanelState {
            dialect: settings.dialect,
            row_range: settings.row_range.clone(),
            normalize: settings.normalize,
        };

        Self {
            current_theme: settings.theme,
            settings,
            settings_path,
            input_path: None,
            report: None,
            repro_log: ReproLog::new(),
            panel_state,
            output_state: OutputViewState::default(),
            fit_results_state: FitResultsState::default(),
            status_message: "Ready — open an SDF or FFC-IST file to begin".to_string(),
            status_is_error: false,
            show_log_window: false,
            show_about: false,
            theme_colors,
            dropped_files: Vec::new(),
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = message;
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: String) {
        log::error!("{}", message);
        self.status_message = message;
        self.status_is_error = true;
    }

    /// Copy the panel into the settings and write them out
    fn persist_settings(&mut self) {
        self.settings.dialect = self.panel_state.dialect;
        self.settings.row_range = self.panel_state.row_range.clone();
        self.settings.normalize = self.panel_state.normalize;
        self.settings.theme = self.current_theme;
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Open a new input file and process it straight away
    fn load_path(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.set_error(format!("Not a data file: {}", path.display()));
            return;
        }
        if let Some(dialect) = InputDialect::from_path(&path) {
            self.panel_state.dialect = dialect;
        }
        self.settings.last_open_dir = path.parent().map(Path::to_path_buf);

        self.repro_log = ReproLog::new();
        self.repro_log.set_source(&path.to_string_lossy());
        self.input_path = Some(path);
        self.run_process();
    }

    fn run_process(&mut self) {
        let Some(path) = self.input_path.clone() else {
            return;
        };
        self.persist_settings();
        let options = self.settings.process_options();
        let settings_text = self.settings.describe();

        match processing::process_file(&path, &options) {
            Ok(report) => {
                let file_name = display_name(&path);
                self.repro_log.add_entry(
                    "Process",
                    &format!(
                        "Processed {}: {} zones, {} warnings, {} skipped lines",
                        file_name,
                        report.zone_count,
                        report.warnings.len(),
                        report.diagnostics.skipped_count()
                    ),
                    &settings_text,
                );
                self.set_status(format!(
                    "Processed {} — {} zones{}",
                    file_name,
                    report.zone_count,
                    if report.warnings.is_empty() {
                        String::new()
                    } else {
                        format!(", {} warnings", report.warnings.len())
                    }
                ));
                self.output_state.plot.reset_for(report.series.len());
                self.report = Some(report);
            }
            Err(e) => {
                self.repro_log
                    .add_entry("Process Failed", &e.to_string(), &settings_text);
                self.report = None;
                self.set_error(format!("Processing failed: {}", e));
            }
        }
    }

    /// Rescale the output on screen without touching the input file
    fn normalize_output(&mut self) {
        let Some(report) = self.report.as_mut() else {
            return;
        };
        report.output = normalize::normalize_text(&report.output);
        report.series = series::read_series(&report.output);
        let zones = report.series.len();
        self.output_state.plot.reset_for(zones);
        self.repro_log.add_entry(
            "Normalize",
            &format!("Normalized displayed output ({} zones) to [0, 1]", zones),
            "",
        );
        self.set_status(format!("Normalized {} zones", zones));
    }

    fn save_output(&mut self) {
        let Some(report) = &self.report else {
            return;
        };
        let name = toolbar::suggested_output_name(self.input_path.as_deref());
        let Some(path) = toolbar::save_output_dialog(&name) else {
            return;
        };
        match std::fs::write(&path, &report.output) {
            Ok(()) => {
                self.repro_log.add_entry(
                    "Save Output",
                    &format!("Saved processed data to {}", path.display()),
                    "",
                );
                self.set_status(format!("Saved: {}", path.display()));
            }
            Err(e) => self.set_error(format!("Save failed: {}", e)),
        }
    }

    fn export_log(&mut self) {
        let Some(path) = toolbar::save_log_dialog() else {
            return;
        };
        match self.repro_log.save(&path) {
            Ok(()) => self.set_status(format!("Log exported: {}", path.display())),
            Err(e) => self.set_error(format!("Log export failed: {}", e)),
        }
    }

    fn open_fit_results(&mut self) {
        let start = self
            .settings
            .results_dir
            .clone()
            .or_else(|| self.settings.last_open_dir.clone());
        let Some(dir) = toolbar::open_results_dialog(start.as_deref()) else {
            return;
        };
        self.settings.results_dir = Some(dir.clone());
        self.persist_settings();

        match fit_results::load_from_folder(&dir) {
            Ok((source, table)) => {
                self.repro_log.add_entry(
                    "Load Fit Results",
                    &format!("Read {} rows from {}", table.rows.len(), source.display()),
                    "",
                );
                self.set_status(format!("Fit results: {} rows", table.rows.len()));
                self.fit_results_state.show_table(source, table);
            }
            Err(e) => {
                self.fit_results_state.show_error(e.to_string());
                self.set_error(format!("Fit results: {}", e));
            }
        }
    }

    fn open_file(&mut self) {
        let start = self.settings.last_open_dir.clone();
        if let Some(path) = toolbar::open_file_dialog(start.as_deref(), self.panel_state.dialect) {
            self.load_path(path);
        }
    }

    fn handle_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::OpenFile => self.open_file(),
            ToolbarAction::Reprocess => self.run_process(),
            ToolbarAction::SaveOutput => self.save_output(),
            ToolbarAction::ExportLog => self.export_log(),
            ToolbarAction::OpenFitResults => self.open_fit_results(),
            ToolbarAction::ThemeToggle => {
                self.current_theme = self.current_theme.next();
                self.theme_colors = ThemeColors::from_theme(self.current_theme);
                self.persist_settings();
            }
            ToolbarAction::ShowLog => self.show_log_window = true,
            ToolbarAction::ShowAbout => self.show_about = true,
            ToolbarAction::None => {}
        }
    }

    fn handle_process_action(&mut self, action: ProcessAction) {
        match action {
            ProcessAction::OpenFile => self.open_file(),
            ProcessAction::Process => self.run_process(),
            ProcessAction::NormalizeOutput => self.normalize_output(),
            ProcessAction::SaveOutput => self.save_output(),
            ProcessAction::None => {}
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for RelaxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Re-apply theme each frame (ensures toggle takes effect) ──
        theme::apply_theme(ctx, self.current_theme);

        // Handle drag-and-drop
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    self.dropped_files.push(path.clone());
                }
            }
        });
        if let Some(path) = self.dropped_files.pop() {
            self.dropped_files.clear();
            self.load_path(path);
        }

        // ── Toolbar ──
        let toolbar_action = toolbar::show_toolbar(
            ctx,
            self.current_theme.label(),
            self.input_path.is_some(),
            self.report.is_some(),
        );
        if toolbar_action != ToolbarAction::None {
            self.handle_toolbar_action(toolbar_action);
        }

        // ── Status Bar ──
        let tc = self.theme_colors.clone();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::new()
                .fill(tc.status_bar_bg)
                .inner_margin(egui::Margin::symmetric(12, 4)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.5)
                            .color(if self.status_is_error { tc.error } else { tc.status_text }),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("📋 Log").clicked() {
                            self.show_log_window = !self.show_log_window;
                        }
                        ui.label(
                            egui::RichText::new(format!("{} ops", self.repro_log.len()))
                                .size(11.0)
                                .color(tc.text_muted),
                        );
                        ui.separator();
                        ui.label(
                            egui::RichText::new(self.panel_state.dialect.to_string())
                                .size(11.0)
                                .color(tc.accent),
                        );
                    });
                });
            });

        // ── Left Panel: Processing ──
        let empty_diagnostics = Diagnostics::default();
        let input_name = self.input_path.as_deref().map(display_name);
        let run = match &self.report {
            Some(report) => RunSummary {
                input_name: input_name.as_deref(),
                zone_count: report.zone_count,
                warnings: &report.warnings,
                diagnostics: &report.diagnostics,
                has_output: true,
            },
            None => RunSummary {
                input_name: input_name.as_deref(),
                zone_count: 0,
                warnings: &[],
                diagnostics: &empty_diagnostics,
                has_output: false,
            },
        };
        let mut process_action = ProcessAction::None;
        egui::SidePanel::left("process_panel")
            .default_width(270.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    process_action = process_panel::show_process_panel(
                        ui,
                        &mut self.panel_state,
                        &run,
                        &tc,
                    );
                });
            });
        self.handle_process_action(process_action);

        // ── Central Panel: Output ──
        egui::CentralPanel::default().show(ctx, |ui| match &self.report {
            Some(report) => {
                output_view::show_output_view(
                    ui,
                    &mut self.output_state,
                    &report.output,
                    &report.series,
                    &tc,
                );
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Drop an .sdf or FFC-IST .csv file here")
                            .size(16.0)
                            .color(tc.text_muted),
                    );
                });
            }
        });

        // ── Fit Results ──
        fit_results_window::show_fit_results_window(ctx, &mut self.fit_results_state, &tc);

        // ── Log Window ──
        if self.show_log_window {
            let mut export = false;
            egui::Window::new("📋 Processing Log")
                .open(&mut self.show_log_window)
                .default_size([600.0, 400.0])
                .resizable(true)
                .show(ctx, |ui| {
                    if ui.button("💾 Export…").clicked() {
                        export = true;
                    }
                    ui.separator();
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.style_mut().override_font_id = Some(egui::FontId::monospace(12.0));
                        ui.label(self.repro_log.to_text());
                    });
                });
            if export {
                self.export_log();
            }
        }

        // ── About Dialog ──
        if self.show_about {
            egui::Window::new("About")
                .open(&mut self.show_about)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading("🧲 Relaxometry Processing");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(10.0);
                    ui.label("Built with Rust + egui");
                    ui.add_space(10.0);
                    ui.label("Features:");
                    ui.label("• SDF zone files and FFC-IST tables");
                    ui.label("• Block averaging with optional row window");
                    ui.label("• Tau axes from TAU formulas");
                    ui.label("• Per-zone normalization to [0, 1]");
                    ui.label("• Fit-result tables from the fitting service");
                    ui.label("• Reproducibility log of every run");
                });
        }

        // Handle keyboard shortcuts
        let (open, save, reprocess, plot_tab) = ctx.input(|i| {
            let cmd = i.modifiers.ctrl || i.modifiers.command;
            (
                cmd && i.key_pressed(egui::Key::O),
                cmd && i.key_pressed(egui::Key::S),
                i.key_pressed(egui::Key::F5),
                cmd && i.key_pressed(egui::Key::P),
            )
        });
        if open {
            self.open_file();
        }
        if save {
            self.save_output();
        }
        if reprocess {
            self.run_process();
        }
        if plot_tab {
            self.output_state.tab = match self.output_state.tab {
                OutputTab::Text => OutputTab::Plot,
                OutputTab::Plot => OutputTab::Text,
            };
        }
    }
}
