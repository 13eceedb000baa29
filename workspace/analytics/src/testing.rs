//! Recording chart backend for exercising the renderer without a browser.

use std::collections::{HashMap, HashSet};

use crate::charts::Figure;
use crate::error::{AnalyticsError, Result};
use crate::registry::ChartBackend;

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub regions: HashSet<String>,
    pub failing: HashSet<String>,
    /// Region id → figure currently drawn there
    pub drawn: HashMap<String, Figure>,
    pub plot_calls: Vec<String>,
    pub purged: Vec<String>,
    pub texts: HashMap<String, String>,
}

impl RecordingBackend {
    pub fn with_regions(ids: &[&str]) -> Self {
        Self {
            regions: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn all_regions() -> Self {
        Self::with_regions(&[
            "referralTrends",
            "treatmentDistribution",
            "statusDistribution",
            "commissionDistribution",
            "total-referrals",
            "total-commissions",
            "avg-commission",
            "conversion-rate",
            "monthly-growth-rate",
        ])
    }
}

impl ChartBackend for RecordingBackend {
    type Region = String;

    fn locate(&self, region_id: &str) -> Option<String> {
        self.regions.get(region_id).cloned()
    }

    fn plot(&mut self, region: &String, figure: &Figure) -> Result<()> {
        if self.failing.contains(region) {
            return Err(AnalyticsError::Plot(format!("cannot draw into {}", region)));
        }
        self.plot_calls.push(region.clone());
        self.drawn.insert(region.clone(), figure.clone());
        Ok(())
    }

    fn purge(&mut self, region: &String) {
        self.purged.push(region.clone());
        self.drawn.remove(region);
    }

    fn set_text(&mut self, element_id: &str, text: &str) -> bool {
        if !self.regions.contains(element_id) {
            return false;
        }
        self.texts.insert(element_id.to_string(), text.to_string());
        true
    }
}
