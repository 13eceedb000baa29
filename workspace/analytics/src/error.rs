use thiserror::Error;

/// Error types for the analytics dashboard.
///
/// None of these are fatal: the renderer and the browser glue log them and skip
/// the affected step.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The page or the server supplied no payload at all
    #[error("No analytics data available")]
    MissingPayload,

    /// A chart's display region is not on the page
    #[error("Display region not found: {0}")]
    MissingRegion(String),

    /// The analytics endpoint answered with a non-2xx status
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Request(String),

    /// The payload text is not JSON or does not match the payload shape
    #[error("Failed to parse analytics data: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The charting library rejected a figure
    #[error("Failed to draw chart: {0}")]
    Plot(String),
}

/// Type alias for Result with AnalyticsError
pub type Result<T> = std::result::Result<T, AnalyticsError>;
