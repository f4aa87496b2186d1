use super::{apply_update, reconfigure, sync_audio_overlay, Wiring};
use crate::constants::{COMPACT_GLYPHS, SCRAMBLE_PROBABILITY};
use flapboard_core::{BoardConfig, GlyphSet};
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Rotate,
    Scramble,
    Restore,
    ToggleMute,
    SwitchGlyphs,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Enter" => Some(KeyAction::Rotate),
        "s" | "S" => Some(KeyAction::Scramble),
        "r" | "R" => Some(KeyAction::Restore),
        "m" | "M" => Some(KeyAction::ToggleMute),
        "g" | "G" => Some(KeyAction::SwitchGlyphs),
        _ => None,
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &Wiring) {
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::Rotate => {
            let values = w.board.borrow().rotated_values();
            apply_update(w, &values);
            ev.prevent_default();
        }
        KeyAction::Scramble => {
            let values = w
                .board
                .borrow()
                .scrambled_values(SCRAMBLE_PROBABILITY, &mut rand::thread_rng());
            apply_update(w, &values);
        }
        KeyAction::Restore => {
            let values = w.initial.borrow().clone();
            apply_update(w, &values);
        }
        KeyAction::SwitchGlyphs => {
            let next = {
                let board = w.board.borrow();
                let current = board.config();
                let compact = GlyphSet::new(COMPACT_GLYPHS.chars());
                let glyphs = if current.glyphs.symbols() == compact.symbols() {
                    GlyphSet::default()
                } else {
                    compact
                };
                BoardConfig {
                    glyphs,
                    ..current.clone()
                }
            };
            reconfigure(w, next);
        }
        KeyAction::ToggleMute => {
            {
                let mut session = w.audio.borrow_mut();
                let muted = !session.is_muted();
                session.set_muted(muted);
                log::info!("[keys] muted={}", muted);
            }
            sync_audio_overlay(w);
        }
    }
}

pub fn wire_global_keydown(w: &Wiring) {
    if let Some(window) = web::window() {
        let w = w.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &w);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
