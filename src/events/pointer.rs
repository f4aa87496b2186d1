use super::{apply_update, ensure_audio, Wiring};
use crate::dom;
use wasm_bindgen_futures::spawn_local;

/// Clicking the board enables audio (first time) and rotates the content one
/// cell to the left.
pub fn wire_canvas_click(w: &Wiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_click_listener(&target, move || {
        let w = w.clone();
        spawn_local(async move {
            ensure_audio(&w).await;
            let values = w.board.borrow().rotated_values();
            apply_update(&w, &values);
        });
    });
}
