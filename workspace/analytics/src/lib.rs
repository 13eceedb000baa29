//! Admin analytics dashboard logic, independent of the browser.
//!
//! Payload parsing, chart figures, the live-chart registry and the refresh
//! state machine live here so they can be tested natively. The `frontend`
//! crate supplies the Plotly-backed [`ChartBackend`] and the DOM wiring.

pub mod charts;
pub mod date_range;
pub mod error;
pub mod payload;
pub mod phone;
pub mod registry;
pub mod renderer;
pub mod series;
pub mod summary;

#[cfg(test)]
mod testing;

pub use charts::{ChartKind, Figure, format_currency};
pub use date_range::DateRange;
pub use error::{AnalyticsError, Result};
pub use payload::AnalyticsPayload;
pub use phone::mask_phone;
pub use registry::{ChartBackend, ChartInstance, ChartRegistry};
pub use renderer::{
    DEFAULT_ANALYTICS_ENDPOINT, PendingRefresh, RefreshOutcome, RefreshToken, Renderer,
};
pub use series::Series;
pub use summary::{SUMMARY_ELEMENT_IDS, SummaryTile, summary_tiles};
