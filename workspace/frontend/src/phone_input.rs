use analytics::mask_phone;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement};

pub const PHONE_INPUT_ID: &str = "phone";

/// Mask the phone field on every keystroke.
pub fn wire_phone_input(document: &Document) -> Result<(), JsValue> {
    let Some(input) = document
        .get_element_by_id(PHONE_INPUT_ID)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(());
    };

    let field = input.clone();
    let on_input = Closure::wrap(Box::new(move |_: Event| {
        let raw = field.value();
        let masked = mask_phone(&raw);
        if masked != raw {
            field.set_value(&masked);
        }
    }) as Box<dyn FnMut(Event)>);

    input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    log::debug!("Phone input mask wired");
    Ok(())
}
