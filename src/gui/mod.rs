pub mod fit_results_window;
pub mod output_view;
pub mod process_panel;
pub mod theme;
pub mod toolbar;
pub mod zone_plot;
