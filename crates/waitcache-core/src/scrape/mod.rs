//! Extraction of wait-time data from thrill-data pages.
//!
//! The park heat-map endpoint embeds its data as the argument of a
//! `Plotly.newPlot(...)` call; the live page is a plain HTML table. Both
//! are scraped with regular expressions, so changes on the source site
//! surface here as `ScrapeError`s.

pub mod plotly;
pub mod table;

use thiserror::Error;

pub use plotly::{build_snapshot, extract_plot_data, js_to_json, parse_heatmap, HeatmapTrace};
pub use table::parse_live_table;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Could not extract Plotly data array")]
    PlotNotFound,

    #[error("Failed to parse Plotly data array: {0}")]
    InvalidPlotData(String),

    #[error("Plotly data array contains no traces")]
    EmptyPlot,
}
