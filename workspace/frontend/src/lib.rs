use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

pub mod api_client;
pub mod dashboard;
pub mod phone_input;
pub mod plotly;
pub mod settings;

fn init_page(document: &Document) {
    let settings = settings::get_settings();

    let renderer = dashboard::create_renderer(document, &settings.analytics_endpoint);
    if let Err(e) = dashboard::wire_refresh(document, &renderer) {
        log::error!("Failed to wire date range filter: {:?}", e);
    }
    dashboard::render_embedded(document, &renderer);

    if let Err(e) = phone_input::wire_phone_input(document) {
        log::error!("Failed to wire phone input mask: {:?}", e);
    }

    log::info!("Analytics dashboard initialized");
}

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Admin Analytics Dashboard Starting ===");
    log::debug!("Application settings: {:?}", settings);

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    if document.ready_state() == "loading" {
        let page = document.clone();
        let on_ready = Closure::once(move |_: Event| init_page(&page));
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        init_page(&document);
    }

    Ok(())
}
