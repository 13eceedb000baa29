//! Page wiring for the analytics charts: initial render from the embedded
//! block and redraws when the date range changes.

use std::cell::RefCell;
use std::rc::Rc;

use analytics::{DateRange, RefreshOutcome, Renderer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, HtmlInputElement};

use crate::api_client;
use crate::plotly::PlotlyBackend;

pub const ANALYTICS_DATA_ID: &str = "analytics-data";
pub const START_DATE_ID: &str = "start-date";
pub const END_DATE_ID: &str = "end-date";

pub type SharedRenderer = Rc<RefCell<Renderer<PlotlyBackend>>>;

pub fn create_renderer(document: &Document, endpoint: &str) -> SharedRenderer {
    let backend = PlotlyBackend::new(document.clone());
    Rc::new(RefCell::new(Renderer::with_endpoint(backend, endpoint)))
}

/// Draw the charts for the payload embedded in the page, if any. Returns how
/// many were drawn.
pub fn render_embedded(document: &Document, renderer: &SharedRenderer) -> usize {
    let embedded = document
        .get_element_by_id(ANALYTICS_DATA_ID)
        .and_then(|element| element.text_content());
    let drawn = renderer.borrow_mut().load_initial(embedded.as_deref());
    log::debug!("Initial render drew {} chart(s)", drawn);
    drawn
}

/// Fetch analytics for `range` and redraw.
///
/// The renderer is only borrowed before and after the request, never across it.
pub async fn refresh(renderer: SharedRenderer, range: DateRange) {
    let Some(pending) = renderer.borrow_mut().begin_refresh(&range) else {
        return;
    };

    let response = api_client::fetch_analytics(&pending.url).await;
    match renderer.borrow_mut().complete_refresh(pending, response) {
        RefreshOutcome::Redrawn(drawn) => log::info!("Charts refreshed, {} drawn", drawn),
        RefreshOutcome::Stale => log::debug!("Ignored response to a superseded refresh"),
        RefreshOutcome::Failed => log::warn!("Refresh failed, keeping current charts"),
    }
}

fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
}

/// Call `on_range` whenever either date input changes while both hold a
/// value. Both fields are read live at event time, so values set without a
/// `change` event (scripts, pickers, restored forms) are picked up.
pub fn wire_date_filter<F>(document: &Document, on_range: F) -> Result<(), JsValue>
where
    F: Fn(DateRange) + 'static,
{
    let (Some(start), Some(end)) = (
        input_by_id(document, START_DATE_ID),
        input_by_id(document, END_DATE_ID),
    ) else {
        log::debug!("Date range inputs not on page, filter disabled");
        return Ok(());
    };

    let on_range = Rc::new(on_range);

    for input in [&start, &end] {
        let on_range = Rc::clone(&on_range);
        let (start, end) = (start.clone(), end.clone());

        let on_change = Closure::wrap(Box::new(move |_: Event| {
            if let Some(range) = DateRange::from_inputs(start.value(), end.value()) {
                (*on_range)(range);
            }
        }) as Box<dyn FnMut(Event)>);

        input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();
    }

    log::debug!("Date range filter wired");
    Ok(())
}

/// Refresh `renderer` whenever the date range changes.
pub fn wire_refresh(document: &Document, renderer: &SharedRenderer) -> Result<(), JsValue> {
    let renderer = Rc::clone(renderer);
    wire_date_filter(document, move |range| {
        spawn_local(refresh(Rc::clone(&renderer), range));
    })
}
