use analytics::{AnalyticsError, ChartBackend, Figure, Result};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Document;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn new_plot(
        div_id: &str,
        data: JsValue,
        layout: JsValue,
        config: JsValue,
    ) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, js_name = purge, catch)]
    fn plotly_purge(div_id: &str) -> std::result::Result<(), JsValue>;
}

fn to_js(value: &serde_json::Value) -> Result<JsValue> {
    // Plain JS objects, not `Map`s, so Plotly can read the keys
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| AnalyticsError::Plot(e.to_string()))
}

/// Draws figures with the page's global `Plotly` into elements found by id.
pub struct PlotlyBackend {
    document: Document,
}

impl PlotlyBackend {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ChartBackend for PlotlyBackend {
    type Region = String;

    /// Plotly builds its own SVG and canvas layers inside a container
    /// element, so a `<canvas>` with the region id cannot host a chart.
    fn locate(&self, region_id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(region_id)?;
        if element.tag_name().eq_ignore_ascii_case("canvas") {
            log::warn!(
                "Region #{} is a <canvas>; charts need a container element such as <div>",
                region_id
            );
            return None;
        }
        Some(element.id())
    }

    fn plot(&mut self, region: &String, figure: &Figure) -> Result<()> {
        log::trace!("Plotting chart into #{}", region);
        new_plot(
            region,
            to_js(&figure.data)?,
            to_js(&figure.layout)?,
            to_js(&figure.config)?,
        )
        .map_err(|e| AnalyticsError::Plot(format!("{:?}", e)))?;
        Ok(())
    }

    fn purge(&mut self, region: &String) {
        if let Err(e) = plotly_purge(region) {
            log::warn!("Failed to purge chart #{}: {:?}", region, e);
        }
    }

    fn set_text(&mut self, element_id: &str, text: &str) -> bool {
        match self.document.get_element_by_id(element_id) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }
}
