/// Zone plot: decay curves of every processed zone
///
/// Each zone is drawn as a line with point markers over its tau axis.
/// Zones without a time axis are drawn against their block index.

use egui_plot::{Legend, Line, Plot, PlotPoints, PlotUi, Points};

use crate::data::zone::ZoneSeries;
use crate::gui::theme::ThemeColors;

#[derive(Debug, Clone)]
pub struct ZonePlotState {
    pub log_x: bool,
    pub show_markers: bool,
    /// Per-zone visibility, indexed like the series slice
    pub visible: Vec<bool>,
    /// Bumped to reset the plot's zoom when new data arrives
    pub plot_generation: u64,
}

impl Default for ZonePlotState {
    fn default() -> Self {
        Self {
            log_x: true,
            show_markers: true,
            visible: Vec::new(),
            plot_generation: 0,
        }
    }
}

impl ZonePlotState {
    /// Call after each run so every new zone starts visible
    pub fn reset_for(&mut self, zone_count: usize) {
        self.visible = vec![true; zone_count];
        self.plot_generation = self.plot_generation.wrapping_add(1);
    }
}

/// Points for one zone; on a log axis, non-positive x values are dropped
pub fn plot_points(series: &ZoneSeries, log_x: bool) -> Vec<[f64; 2]> {
    let points = series.points();
    // Index fallback has no meaningful log scale
    if !log_x || series.tau.is_none() {
        return points;
    }
    points
        .into_iter()
        .filter(|[x, _]| *x > 0.0)
        .map(|[x, y]| [x.log10(), y])
        .collect()
}

pub fn show_zone_plot(
    ui: &mut egui::Ui,
    state: &mut ZonePlotState,
    series: &[ZoneSeries],
    colors: &ThemeColors,
) {
    if state.visible.len() != series.len() {
        state.reset_for(series.len());
    }

    ui.horizontal(|ui| {
        if ui.checkbox(&mut state.log_x, "Log τ axis").changed() {
            state.plot_generation = state.plot_generation.wrapping_add(1);
        }
        ui.checkbox(&mut state.show_markers, "Markers");
        ui.separator();
        if ui.small_button("All").clicked() {
            state.visible.iter_mut().for_each(|v| *v = true);
        }
        if ui.small_button("None").clicked() {
            state.visible.iter_mut().for_each(|v| *v = false);
        }
    });

    ui.horizontal_wrapped(|ui| {
        for (i, zone) in series.iter().enumerate() {
            let label = egui::RichText::new(&zone.tag).color(colors.zone_color(i));
            ui.checkbox(&mut state.visible[i], label);
        }
    });
    ui.separator();

    if series.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new("No zones to plot").color(colors.text_muted));
        });
        return;
    }

    let log_x = state.log_x;
    let x_label = if log_x { "τ (s, log₁₀)" } else { "τ (s)" };
    let mut plot = Plot::new(format!("zone_plot_{}", state.plot_generation))
        .height(ui.available_height() - 4.0)
        .x_axis_label(x_label)
        .y_axis_label("Block mean")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .legend(Legend::default().position(egui_plot::Corner::RightTop).background_alpha(0.6));
    if log_x {
        plot = plot.x_axis_formatter(|mark, _range| format!("{:.3}", 10f64.powf(mark.value)));
    }

    let show_markers = state.show_markers;
    let visible = state.visible.clone();
    plot.show(ui, |plot_ui: &mut PlotUi| {
        for (i, zone) in series.iter().enumerate() {
            if !visible[i] {
                continue;
            }
            let color = colors.zone_color(i);
            let points = plot_points(zone, log_x);
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(&zone.tag)
                    .color(color)
                    .width(1.2),
            );
            if show_markers {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .color(color)
                        .radius(2.5)
                        .shape(egui_plot::MarkerShape::Circle),
                );
            }
        }
    });
}
