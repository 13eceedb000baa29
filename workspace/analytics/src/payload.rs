use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::series::Series;

/// Analytics payload produced by the admin analytics endpoint.
///
/// Every field is independently optional: the page-embedded block and the
/// refresh endpoint may carry any subset of them. Unknown keys are ignored,
/// but a known key with the wrong shape fails the whole parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPayload {
    /// Date label → referral count, already in chronological order
    #[serde(default)]
    pub daily_referrals: Option<Series<u64>>,
    /// Treatment name → referral count
    #[serde(default)]
    pub treatment_distribution: Option<Series<u64>>,
    /// Status → referral count. Parsed but never drawn.
    #[serde(default)]
    pub status_distribution: Option<Series<u64>>,
    /// Treatment group → commission earned
    #[serde(default)]
    pub commission_distribution: Option<Series<Decimal>>,

    #[serde(default)]
    pub total_referrals: Option<u64>,
    #[serde(default)]
    pub total_commissions: Option<Decimal>,
    #[serde(default)]
    pub avg_commission: Option<Decimal>,
    /// Percentage of referrals that completed
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    /// Percentage change against the preceding 30 days
    #[serde(default)]
    pub monthly_growth_rate: Option<f64>,
    #[serde(default)]
    pub status_counts: Option<Series<u64>>,
}

impl AnalyticsPayload {
    /// Parse payload text. The JSON literal `null` is an absent payload.
    pub fn from_json(text: &str) -> Result<Option<Self>> {
        let payload: Option<Self> = serde_json::from_str(text).inspect_err(|e| {
            warn!(error = %e, "Analytics payload does not match the expected shape");
        })?;
        debug!(present = payload.is_some(), "Parsed analytics payload");
        Ok(payload)
    }
}

/// A series counts as drawable only when present and non-empty.
pub(crate) fn non_empty<V>(series: &Option<Series<V>>) -> Option<&Series<V>> {
    series.as_ref().filter(|s| !s.is_empty())
}
