use crate::payload::AnalyticsPayload;

pub const TOTAL_REFERRALS_ID: &str = "total-referrals";
pub const TOTAL_COMMISSIONS_ID: &str = "total-commissions";
pub const AVG_COMMISSION_ID: &str = "avg-commission";
pub const CONVERSION_RATE_ID: &str = "conversion-rate";
pub const MONTHLY_GROWTH_RATE_ID: &str = "monthly-growth-rate";

/// Every page element a summary metric may be written to.
pub const SUMMARY_ELEMENT_IDS: [&str; 5] = [
    TOTAL_REFERRALS_ID,
    TOTAL_COMMISSIONS_ID,
    AVG_COMMISSION_ID,
    CONVERSION_RATE_ID,
    MONTHLY_GROWTH_RATE_ID,
];

/// Text for one headline metric element on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTile {
    pub element_id: &'static str,
    pub text: String,
}

/// Headline metrics present in `payload`, formatted for display.
pub fn summary_tiles(payload: &AnalyticsPayload) -> Vec<SummaryTile> {
    let mut tiles = Vec::new();
    let mut push = |element_id, text| tiles.push(SummaryTile { element_id, text });

    if let Some(total) = payload.total_referrals {
        push(TOTAL_REFERRALS_ID, total.to_string());
    }
    if let Some(total) = payload.total_commissions {
        push(TOTAL_COMMISSIONS_ID, format!("${:.2}", total));
    }
    if let Some(avg) = payload.avg_commission {
        push(AVG_COMMISSION_ID, format!("${:.2}", avg));
    }
    if let Some(rate) = payload.conversion_rate {
        push(CONVERSION_RATE_ID, format!("{:.2}%", rate));
    }
    if let Some(growth) = payload.monthly_growth_rate {
        push(MONTHLY_GROWTH_RATE_ID, format!("{:+.2}%", growth));
    }
    tiles
}
