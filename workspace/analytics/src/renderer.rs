//! Chart renderer.
//!
//! Owns the chart backend and the roster of live charts, draws whatever a
//! payload carries, and applies refresh responses. Network I/O is not done
//! here: a refresh is split into [`Renderer::begin_refresh`], which issues a
//! token and the request target, and [`Renderer::complete_refresh`], which
//! applies the response. The caller awaits the request in between without
//! holding a borrow on the renderer.

use tracing::{debug, error, info, trace, warn};

use crate::charts::{self, ChartKind, Figure};
use crate::date_range::DateRange;
use crate::error::{AnalyticsError, Result};
use crate::payload::{AnalyticsPayload, non_empty};
use crate::registry::{ChartBackend, ChartRegistry};
use crate::summary::{SUMMARY_ELEMENT_IDS, summary_tiles};

pub const DEFAULT_ANALYTICS_ENDPOINT: &str = "/admin/analytics";

/// Identifies one refresh request. Tokens only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshToken(u64);

/// A refresh that has been issued but not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRefresh {
    pub token: RefreshToken,
    pub range: DateRange,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Old charts were torn down and this many new ones drawn
    Redrawn(usize),
    /// A newer refresh was issued meanwhile; this response was dropped
    Stale,
    /// The response was unusable; existing charts are untouched
    Failed,
}

pub struct Renderer<B: ChartBackend> {
    backend: B,
    registry: ChartRegistry<B::Region>,
    endpoint: String,
    last_issued: u64,
}

impl<B: ChartBackend> Renderer<B> {
    pub fn new(backend: B) -> Self {
        Self::with_endpoint(backend, DEFAULT_ANALYTICS_ENDPOINT)
    }

    pub fn with_endpoint(backend: B, endpoint: impl Into<String>) -> Self {
        Self {
            backend,
            registry: ChartRegistry::new(),
            endpoint: endpoint.into(),
            last_issued: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn registry(&self) -> &ChartRegistry<B::Region> {
        &self.registry
    }

    /// Draw every chart `payload` has data for. Returns how many were drawn.
    ///
    /// An absent payload, a missing region or a failed draw is logged and
    /// skipped; nothing here fails.
    pub fn render(&mut self, payload: Option<&AnalyticsPayload>) -> usize {
        let Some(payload) = payload else {
            warn!("{}", AnalyticsError::MissingPayload);
            return 0;
        };

        let mut drawn = 0;
        if let Some(series) = non_empty(&payload.daily_referrals) {
            drawn += self.draw(ChartKind::ReferralTrends, || {
                charts::referral_trends(series)
            }) as usize;
        }
        if let Some(series) = non_empty(&payload.treatment_distribution) {
            drawn += self.draw(ChartKind::TreatmentDistribution, || {
                charts::treatment_distribution(series)
            }) as usize;
        }
        if non_empty(&payload.status_distribution).is_some() {
            trace!("Status distribution present, no chart is drawn for it");
        }
        if let Some(series) = non_empty(&payload.commission_distribution) {
            drawn += self.draw(ChartKind::CommissionDistribution, || {
                charts::commission_distribution(series)
            }) as usize;
        }

        for tile in summary_tiles(payload) {
            if !self.backend.set_text(tile.element_id, &tile.text) {
                trace!(element_id = tile.element_id, "Summary element not on page");
            }
        }

        info!(drawn, "Rendered analytics charts");
        drawn
    }

    /// Blank every summary tile so no metric outlives the range it was
    /// computed for.
    fn clear_summary(&mut self) {
        for element_id in SUMMARY_ELEMENT_IDS {
            self.backend.set_text(element_id, "");
        }
    }

    fn draw(&mut self, kind: ChartKind, build: impl FnOnce() -> Figure) -> bool {
        let region_id = kind.region_id();
        let Some(region) = self.backend.locate(region_id) else {
            debug!(?kind, "{}", AnalyticsError::MissingRegion(region_id.to_string()));
            return false;
        };

        let figure = build();
        match self.backend.plot(&region, &figure) {
            Ok(()) => {
                self.registry.track(kind, region);
                true
            }
            Err(e) => {
                error!(?kind, error = %e, "Chart draw failed");
                false
            }
        }
    }

    /// Render the payload embedded in the page at load time.
    ///
    /// An absent or blank block does nothing; unparsable text is logged and
    /// leaves the page without charts.
    pub fn load_initial(&mut self, embedded: Option<&str>) -> usize {
        let Some(text) = embedded.map(str::trim).filter(|text| !text.is_empty()) else {
            debug!("No embedded analytics data on page");
            return 0;
        };

        match AnalyticsPayload::from_json(text) {
            Ok(payload) => self.render(payload.as_ref()),
            Err(e) => {
                warn!(error = %e, "Failed to parse embedded analytics data");
                0
            }
        }
    }

    /// Issue a refresh for `range`, or `None` while either end is empty.
    pub fn begin_refresh(&mut self, range: &DateRange) -> Option<PendingRefresh> {
        if !range.is_complete() {
            trace!(?range, "Date range incomplete, not refreshing");
            return None;
        }

        self.last_issued += 1;
        let pending = PendingRefresh {
            token: RefreshToken(self.last_issued),
            range: range.clone(),
            url: range.request_url(&self.endpoint),
        };
        debug!(token = self.last_issued, url = %pending.url, "Issuing analytics refresh");
        Some(pending)
    }

    /// Apply the answer to a refresh issued by [`Renderer::begin_refresh`].
    ///
    /// Only the most recently issued refresh may redraw. On success every live
    /// chart is destroyed and every summary tile blanked before the new
    /// payload is rendered; on failure the page stays as it is.
    pub fn complete_refresh(
        &mut self,
        pending: PendingRefresh,
        response: Result<Option<AnalyticsPayload>>,
    ) -> RefreshOutcome {
        if pending.token != RefreshToken(self.last_issued) {
            debug!(
                token = pending.token.0,
                latest = self.last_issued,
                "Dropping response to superseded refresh"
            );
            return RefreshOutcome::Stale;
        }

        match response {
            Ok(payload) => {
                self.registry.destroy_all(&mut self.backend);
                self.clear_summary();
                RefreshOutcome::Redrawn(self.render(payload.as_ref()))
            }
            Err(e) => {
                warn!(error = %e, url = %pending.url, "Failed to fetch analytics data");
                RefreshOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingBackend;
    use serde_json::json;

    fn payload(json: &str) -> AnalyticsPayload {
        AnalyticsPayload::from_json(json).unwrap().unwrap()
    }

    fn full_payload() -> AnalyticsPayload {
        payload(
            r#"{
                "daily_referrals": {"2024-01-01": 3, "2024-01-02": 5},
                "treatment_distribution": {"Physio": 7, "Dental": 5},
                "status_distribution": {"new": 2},
                "commission_distribution": {"Physio": 120, "Dental": 75}
            }"#,
        )
    }

    #[test]
    fn test_absent_payload_is_noop() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        assert_eq!(renderer.render(None), 0);
        assert!(renderer.registry().is_empty());
        assert!(renderer.backend().plot_calls.is_empty());
    }

    #[test]
    fn test_renders_all_present_series() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        assert_eq!(renderer.render(Some(&full_payload())), 3);

        assert_eq!(
            renderer.registry().kinds(),
            vec![
                ChartKind::ReferralTrends,
                ChartKind::TreatmentDistribution,
                ChartKind::CommissionDistribution
            ]
        );
        // Status distribution is parsed but never drawn
        assert!(!renderer.backend().drawn.contains_key("statusDistribution"));
    }

    #[test]
    fn test_missing_series_skips_chart() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        let drawn = renderer.render(Some(&payload(
            r#"{"daily_referrals": {"2024-01-01": 3}, "treatment_distribution": {}}"#,
        )));

        assert_eq!(drawn, 1);
        assert_eq!(renderer.backend().plot_calls, vec!["referralTrends"]);
    }

    #[test]
    fn test_missing_region_skips_chart() {
        let backend = RecordingBackend::with_regions(&["commissionDistribution"]);
        let mut renderer = Renderer::new(backend);

        assert_eq!(renderer.render(Some(&full_payload())), 1);
        assert_eq!(renderer.registry().kinds(), vec![ChartKind::CommissionDistribution]);
    }

    #[test]
    fn test_failed_draw_is_not_tracked() {
        let mut backend = RecordingBackend::all_regions();
        backend.failing.insert("treatmentDistribution".to_string());
        let mut renderer = Renderer::new(backend);

        assert_eq!(renderer.render(Some(&full_payload())), 2);
        assert!(!renderer.registry().kinds().contains(&ChartKind::TreatmentDistribution));
    }

    #[test]
    fn test_commission_chart_figure() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&payload(
            r#"{"commission_distribution": {"Physio": 120, "Dental": 75}}"#,
        )));

        let figure = &renderer.backend().drawn["commissionDistribution"];
        assert_eq!(figure.data[0]["y"], json!([120.0, 75.0]));
        assert_eq!(figure.data[0]["text"], json!(["$120", "$75"]));
    }

    #[test]
    fn test_summary_tiles_written() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&payload(r#"{"total_referrals": 12, "conversion_rate": 50}"#)));

        assert_eq!(renderer.backend().texts["total-referrals"], "12");
        assert_eq!(renderer.backend().texts["conversion-rate"], "50.00%");
    }

    #[test]
    fn test_load_initial() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        assert_eq!(renderer.load_initial(None), 0);
        assert_eq!(renderer.load_initial(Some("   ")), 0);
        assert_eq!(renderer.load_initial(Some("{broken")), 0);
        assert_eq!(renderer.load_initial(Some("null")), 0);
        assert_eq!(
            renderer.load_initial(Some(r#"{"daily_referrals": {"2024-01-01": 3}}"#)),
            1
        );
    }

    #[test]
    fn test_unrepresentable_commission_skips_whole_payload() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        let embedded = r#"{
            "daily_referrals": {"2024-01-01": 3},
            "commission_distribution": {"A": 1e30}
        }"#;

        assert_eq!(renderer.load_initial(Some(embedded)), 0);
        assert!(renderer.backend().plot_calls.is_empty());
    }

    #[test]
    fn test_begin_refresh_requires_both_dates() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        assert!(renderer.begin_refresh(&DateRange::new("2024-01-01", "")).is_none());

        let pending = renderer
            .begin_refresh(&DateRange::new("2024-01-01", "2024-01-31"))
            .unwrap();
        assert_eq!(pending.url, "/admin/analytics?start_date=2024-01-01&end_date=2024-01-31");
    }

    #[test]
    fn test_successful_refresh_replaces_all_charts() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&full_payload()));

        let pending = renderer
            .begin_refresh(&DateRange::new("2024-01-01", "2024-01-31"))
            .unwrap();
        let fresh = payload(r#"{"daily_referrals": {"2024-01-05": 9}}"#);
        let outcome = renderer.complete_refresh(pending, Ok(Some(fresh)));

        assert_eq!(outcome, RefreshOutcome::Redrawn(1));
        assert_eq!(renderer.backend().purged.len(), 3);
        assert_eq!(renderer.registry().kinds(), vec![ChartKind::ReferralTrends]);
        assert_eq!(
            renderer.backend().drawn["referralTrends"].data[0]["x"],
            json!(["2024-01-05"])
        );
        assert!(!renderer.backend().drawn.contains_key("commissionDistribution"));
    }

    #[test]
    fn test_failed_refresh_keeps_charts() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&full_payload()));
        let plots_before = renderer.backend().plot_calls.len();

        let pending = renderer
            .begin_refresh(&DateRange::new("2024-01-01", "2024-01-31"))
            .unwrap();
        let outcome = renderer.complete_refresh(pending, Err(AnalyticsError::Http { status: 500 }));

        assert_eq!(outcome, RefreshOutcome::Failed);
        assert!(renderer.backend().purged.is_empty());
        assert_eq!(renderer.backend().plot_calls.len(), plots_before);
        assert_eq!(renderer.registry().len(), 3);
    }

    #[test]
    fn test_malformed_refresh_keeps_charts() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&full_payload()));

        let pending = renderer
            .begin_refresh(&DateRange::new("2024-01-01", "2024-01-31"))
            .unwrap();
        let response = AnalyticsPayload::from_json("<html>login</html>");
        assert_eq!(renderer.complete_refresh(pending, response), RefreshOutcome::Failed);
        assert_eq!(renderer.registry().len(), 3);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        let first = renderer
            .begin_refresh(&DateRange::new("2024-01-01", "2024-01-31"))
            .unwrap();
        let second = renderer
            .begin_refresh(&DateRange::new("2024-02-01", "2024-02-29"))
            .unwrap();
        assert!(first.token < second.token);

        let newer = payload(r#"{"daily_referrals": {"2024-02-01": 1}}"#);
        assert_eq!(
            renderer.complete_refresh(second, Ok(Some(newer))),
            RefreshOutcome::Redrawn(1)
        );

        let older = payload(r#"{"daily_referrals": {"2024-01-01": 8}}"#);
        assert_eq!(renderer.complete_refresh(first, Ok(Some(older))), RefreshOutcome::Stale);
        assert_eq!(
            renderer.backend().drawn["referralTrends"].data[0]["x"],
            json!(["2024-02-01"])
        );
    }

    #[test]
    fn test_refresh_with_null_payload_clears_charts() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&full_payload()));

        let pending = renderer
            .begin_refresh(&DateRange::new("2024-01-01", "2024-01-31"))
            .unwrap();
        assert_eq!(renderer.complete_refresh(pending, Ok(None)), RefreshOutcome::Redrawn(0));
        assert!(renderer.registry().is_empty());
    }

    #[test]
    fn test_refresh_blanks_metrics_missing_from_new_payload() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&payload(
            r#"{"total_referrals": 12, "conversion_rate": 50, "avg_commission": 97.5}"#,
        )));
        assert_eq!(renderer.backend().texts["avg-commission"], "$97.50");

        let pending = renderer
            .begin_refresh(&DateRange::new("2024-02-01", "2024-02-29"))
            .unwrap();
        let fresh = payload(r#"{"total_referrals": 4}"#);
        renderer.complete_refresh(pending, Ok(Some(fresh)));

        let texts = &renderer.backend().texts;
        assert_eq!(texts["total-referrals"], "4");
        assert_eq!(texts["conversion-rate"], "");
        assert_eq!(texts["avg-commission"], "");
    }

    #[test]
    fn test_null_refresh_blanks_all_metrics() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&payload(r#"{"total_referrals": 12}"#)));

        let pending = renderer
            .begin_refresh(&DateRange::new("2024-02-01", "2024-02-29"))
            .unwrap();
        renderer.complete_refresh(pending, Ok(None));

        assert!(renderer.backend().texts.values().all(String::is_empty));
    }

    #[test]
    fn test_failed_refresh_keeps_metrics() {
        let mut renderer = Renderer::new(RecordingBackend::all_regions());
        renderer.render(Some(&payload(r#"{"total_referrals": 12}"#)));

        let pending = renderer
            .begin_refresh(&DateRange::new("2024-02-01", "2024-02-29"))
            .unwrap();
        renderer.complete_refresh(pending, Err(AnalyticsError::Http { status: 502 }));

        assert_eq!(renderer.backend().texts["total-referrals"], "12");
    }

    #[test]
    fn test_custom_endpoint() {
        let mut renderer =
            Renderer::with_endpoint(RecordingBackend::all_regions(), "/partner/analytics");
        let pending = renderer
            .begin_refresh(&DateRange::new("2024-01-01", "2024-01-31"))
            .unwrap();
        assert!(pending.url.starts_with("/partner/analytics?"));
    }
}
