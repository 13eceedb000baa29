use tracing::{debug, trace};

use crate::charts::{ChartKind, Figure};
use crate::error::Result;

/// Seam between the dashboard and the charting library.
///
/// `Region` is whatever the backend needs to address a display region again
/// later, for drawing and for teardown.
pub trait ChartBackend {
    type Region: Clone;

    /// Look up a display region by element id. `None` when the page lacks it.
    fn locate(&self, region_id: &str) -> Option<Self::Region>;

    /// Draw `figure` into `region`, replacing anything already there.
    fn plot(&mut self, region: &Self::Region, figure: &Figure) -> Result<()>;

    /// Tear down the chart bound to `region` and release its resources.
    fn purge(&mut self, region: &Self::Region);

    /// Replace the text content of a page element. Returns false when the
    /// page lacks it.
    fn set_text(&mut self, element_id: &str, text: &str) -> bool;
}

/// A chart currently bound to a display region.
#[derive(Debug, Clone)]
pub struct ChartInstance<R> {
    pub kind: ChartKind,
    pub region: R,
}

/// Roster of live charts.
///
/// Lifecycle is create → tracked → destroy-all: the dashboard never updates a
/// chart in place, it tears down the whole roster and redraws.
#[derive(Debug)]
pub struct ChartRegistry<R> {
    live: Vec<ChartInstance<R>>,
}

impl<R> Default for ChartRegistry<R> {
    fn default() -> Self {
        Self { live: Vec::new() }
    }
}

impl<R: Clone> ChartRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, kind: ChartKind, region: R) {
        trace!(?kind, "Tracking chart instance");
        self.live.push(ChartInstance { kind, region });
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn kinds(&self) -> Vec<ChartKind> {
        self.live.iter().map(|instance| instance.kind).collect()
    }

    /// Purge every tracked chart through `backend` and empty the roster.
    pub fn destroy_all<B>(&mut self, backend: &mut B) -> usize
    where
        B: ChartBackend<Region = R>,
    {
        let destroyed = self.live.len();
        for instance in self.live.drain(..) {
            backend.purge(&instance.region);
        }
        debug!(destroyed, "Destroyed all chart instances");
        destroyed
    }
}
