/// Output view: central panel showing the processed text or its plot

use crate::data::zone::ZoneSeries;
use crate::gui::theme::ThemeColors;
use crate::gui::zone_plot::{self, ZonePlotState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTab {
    #[default]
    Text,
    Plot,
}

#[derive(Debug, Clone, Default)]
pub struct OutputViewState {
    pub tab: OutputTab,
    pub plot: ZonePlotState,
}

fn tab_button(ui: &mut egui::Ui, label: &str, active: bool, colors: &ThemeColors) -> bool {
    let text = egui::RichText::new(label)
        .size(13.0)
        .color(if active { colors.tab_active_text } else { colors.tab_inactive_text });
    let btn = egui::Button::new(text)
        .fill(if active { colors.tab_active_bg } else { colors.tab_inactive_bg })
        .corner_radius(6.0);
    ui.add(btn).clicked()
}

pub fn show_output_view(
    ui: &mut egui::Ui,
    state: &mut OutputViewState,
    output: &str,
    series: &[ZoneSeries],
    colors: &ThemeColors,
) {
    ui.horizontal(|ui| {
        ui.add_space(4.0);
        if tab_button(ui, "📝 Output", state.tab == OutputTab::Text, colors) {
            state.tab = OutputTab::Text;
        }
        ui.add_space(4.0);
        if tab_button(ui, "📈 Plot", state.tab == OutputTab::Plot, colors) {
            state.tab = OutputTab::Plot;
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("📋 Copy").clicked() {
                ui.ctx().copy_text(output.to_string());
            }
            ui.label(
                egui::RichText::new(format!("{} lines", output.lines().count()))
                    .size(11.0)
                    .color(colors.text_muted),
            );
        });
    });
    ui.separator();

    match state.tab {
        OutputTab::Text => {
            egui::ScrollArea::both()
                .id_salt("output_text")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.style_mut().override_font_id = Some(egui::FontId::monospace(12.0));
                    ui.label(egui::RichText::new(output).color(colors.text_primary));
                });
        }
        OutputTab::Plot => {
            zone_plot::show_zone_plot(ui, &mut state.plot, series, colors);
        }
    }
}
