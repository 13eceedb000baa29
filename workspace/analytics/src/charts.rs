//! Figure builders for the three analytics charts.
//!
//! Each builder turns one series into the `data`/`layout`/`config` triple that
//! `Plotly.newPlot` consumes. Builders are pure; drawing happens in a
//! [`ChartBackend`](crate::registry::ChartBackend).

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde_json::{Value, json};

use crate::series::Series;

pub const REFERRAL_TRENDS_REGION: &str = "referralTrends";
pub const TREATMENT_DISTRIBUTION_REGION: &str = "treatmentDistribution";
pub const COMMISSION_DISTRIBUTION_REGION: &str = "commissionDistribution";

const TREND_COLOR: &str = "rgb(75, 192, 192)";

/// Segment colors keyed by referral status, applied to segments by position.
pub const STATUS_PALETTE: [(&str, &str); 4] = [
    ("new", "rgb(54, 162, 235)"),
    ("in-progress", "rgb(255, 205, 86)"),
    ("completed", "rgb(75, 192, 192)"),
    ("rejected", "rgb(255, 99, 132)"),
];

/// The three charts the dashboard knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    ReferralTrends,
    TreatmentDistribution,
    CommissionDistribution,
}

impl ChartKind {
    /// Id of the page element the chart attaches to
    pub fn region_id(self) -> &'static str {
        match self {
            ChartKind::ReferralTrends => REFERRAL_TRENDS_REGION,
            ChartKind::TreatmentDistribution => TREATMENT_DISTRIBUTION_REGION,
            ChartKind::CommissionDistribution => COMMISSION_DISTRIBUTION_REGION,
        }
    }
}

/// One Plotly figure, ready to be handed to `Plotly.newPlot`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Value,
    pub layout: Value,
    pub config: Value,
}

fn base_layout() -> Value {
    json!({
        "margin": {"t": 30, "r": 10, "l": 50, "b": 40},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "showlegend": true,
        "legend": {"orientation": "h", "x": 0.5, "xanchor": "center", "y": 1.15}
    })
}

fn base_config() -> Value {
    json!({"responsive": true, "displayModeBar": false})
}

/// Format a currency amount the way axis ticks and tooltips show it: `$120`, `$75.5`.
pub fn format_currency(amount: &Decimal) -> String {
    format!("${}", amount.normalize())
}

/// Daily referral counts as a single line. Labels keep the series order.
pub fn referral_trends(series: &Series<u64>) -> Figure {
    let trace = json!([{
        "x": series.labels(),
        "y": series.values(),
        "type": "scatter",
        "mode": "lines",
        "name": "Daily Referrals",
        "line": {"color": TREND_COLOR, "shape": "spline", "smoothing": 0.1}
    }]);

    let mut layout = base_layout();
    layout["xaxis"] = json!({"showgrid": false, "type": "category"});
    layout["yaxis"] = json!({"showgrid": true, "gridcolor": "#eee", "rangemode": "tozero"});

    Figure {
        data: trace,
        layout,
        config: base_config(),
    }
}

/// Colors for `count` segments. Segments past the palette get none and fall
/// back to the charting library's own colorway.
pub fn segment_colors(count: usize) -> Vec<&'static str> {
    STATUS_PALETTE
        .iter()
        .take(count)
        .map(|(_, color)| *color)
        .collect()
}

/// Treatment shares as a doughnut, one segment per treatment.
pub fn treatment_distribution(series: &Series<u64>) -> Figure {
    let trace = json!([{
        "labels": series.labels(),
        "values": series.values(),
        "type": "pie",
        "hole": 0.5,
        "sort": false,
        "marker": {"colors": segment_colors(series.len())}
    }]);

    Figure {
        data: trace,
        layout: base_layout(),
        config: base_config(),
    }
}

/// Commission earnings per group as bars with `$`-prefixed axis and hover text.
pub fn commission_distribution(series: &Series<Decimal>) -> Figure {
    let amounts: Vec<f64> = series
        .values()
        .into_iter()
        .map(|amount| amount.to_f64().unwrap_or_default())
        .collect();
    let hover: Vec<String> = series.values().into_iter().map(format_currency).collect();

    let trace = json!([{
        "x": series.labels(),
        "y": amounts,
        "type": "bar",
        "name": "Commission Earnings ($)",
        "text": hover,
        "textposition": "none",
        "hovertemplate": "%{x}: %{text}<extra></extra>",
        "marker": {"color": TREND_COLOR, "line": {"color": TREND_COLOR, "width": 1}}
    }]);

    let mut layout = base_layout();
    layout["xaxis"] = json!({"showgrid": false, "type": "category"});
    layout["yaxis"] = json!({
        "showgrid": true,
        "gridcolor": "#eee",
        "rangemode": "tozero",
        "tickprefix": "$"
    });

    Figure {
        data: trace,
        layout,
        config: base_config(),
    }
}
