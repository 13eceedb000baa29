use serde::{Deserialize, Serialize};

/// A start/end pair taken verbatim from the two date inputs.
///
/// Neither ordering nor format is checked here; the analytics endpoint decides
/// what a valid range is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Range to refresh for the current values of the two date inputs, or
    /// `None` while either is empty.
    ///
    /// Callers pass both live values on every change; there is no debouncing.
    pub fn from_inputs(start: impl Into<String>, end: impl Into<String>) -> Option<Self> {
        let range = Self::new(start, end);
        range.is_complete().then_some(range)
    }

    /// Both ends must be filled in before a refresh is worth issuing.
    pub fn is_complete(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }

    pub fn query_string(&self) -> String {
        format!("start_date={}&end_date={}", self.start, self.end)
    }

    /// Full request target for the given endpoint path
    pub fn request_url(&self, endpoint: &str) -> String {
        format!("{}?{}", endpoint, self.query_string())
    }
}
