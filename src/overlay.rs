use crate::constants::LOADING_ID;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Hide the loading indicator once the first frame is up.
#[inline]
pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        if let Ok(html) = el.dyn_into::<web::HtmlElement>() {
            _ = html.style().set_property("display", "none");
        }
    }
}

/// Mirror the audio state on the canvas so the page can style it.
pub fn mark_audio_state(canvas: &web::HtmlCanvasElement, enabled: bool, muted: bool) {
    let state = match (enabled, muted) {
        (false, _) => "off",
        (true, true) => "muted",
        (true, false) => "on",
    };
    _ = canvas.set_attribute("data-audio", state);
}
