use crate::atlas;
use crate::audio::{self, WebAudioSink};
use crate::frame::{FrameContext, Redraw};
use crate::overlay;
use flapboard_core::{AtlasStyle, AudioConfig, AudioSession, Board, BoardConfig, SessionClock};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

mod keyboard;
mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::wire_canvas_click;

/// Shared handles every input handler needs.
#[derive(Clone)]
pub struct Wiring {
    pub board: Rc<RefCell<Board>>,
    pub audio: Rc<RefCell<AudioSession<WebAudioSink>>>,
    pub audio_config: Rc<AudioConfig>,
    pub clock: SessionClock,
    pub redraw: Redraw,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub frame_ctx: Rc<RefCell<FrameContext<'static>>>,
    pub atlas_style: Rc<AtlasStyle>,
    /// Text shown at startup; re-resolved after the alphabet changes.
    pub text: Rc<String>,
    pub initial: Rc<RefCell<Vec<u32>>>,
    /// Set while a click sample fetch is in flight.
    pub loading: Rc<Cell<bool>>,
}

/// Push new targets to the board, replace the click batch and make sure a
/// frame is coming.
pub fn apply_update(w: &Wiring, values: &[u32]) {
    let now = w.clock.now();
    let (histogram, speed) = {
        let mut board = w.board.borrow_mut();
        board.set_values(values, now);
        (board.histogram(), board.config().speed)
    };
    w.audio.borrow_mut().retrigger(&histogram, speed);
    w.redraw.settle();
}

/// Rebuild board and atlas for a new configuration, then roll the startup
/// text in again.
pub fn reconfigure(w: &Wiring, config: BoardConfig) {
    let image = match atlas::build_atlas(&w.document, &config.glyphs, &w.atlas_style) {
        Ok(image) => image,
        Err(e) => {
            log::error!("atlas rebuild error: {:?}", e);
            return;
        }
    };
    let side = config.glyphs.side();
    w.audio.borrow_mut().stop();
    if let Some(gpu) = &mut w.frame_ctx.borrow_mut().gpu {
        gpu.set_atlas(&image, side);
    }
    let values = {
        let mut board = w.board.borrow_mut();
        board.reconfigure(config);
        board.resolve_text(&w.text)
    };
    *w.initial.borrow_mut() = values.clone();
    apply_update(w, &values);
    w.redraw.invalidate();
}

/// Create the audio context and load the click on first use. Browsers only
/// allow this from inside a user gesture. A failed load is retried on the
/// next call.
pub async fn ensure_audio(w: &Wiring) {
    if w.loading.get() {
        return;
    }
    let ctx = {
        let mut session = w.audio.borrow_mut();
        if session.sink().is_none() {
            match WebAudioSink::new() {
                Ok(sink) => session.attach(sink),
                Err(e) => {
                    log::error!("audio init error: {:?}", e);
                    return;
                }
            }
        }
        let Some(sink) = session.sink() else {
            return;
        };
        _ = sink.context().resume();
        if !session.needs_clip() {
            return;
        }
        sink.context().clone()
    };
    w.loading.set(true);
    match audio::load_clip(&ctx, &w.audio_config.clip_url).await {
        Ok(buffer) => {
            let duration = buffer.duration();
            log::info!(
                "[audio] loaded {} ({:.3}s)",
                w.audio_config.clip_url,
                duration
            );
            w.audio.borrow_mut().load_clip(buffer, duration);
        }
        Err(e) => log::error!("click load error: {:?}", e),
    }
    w.loading.set(false);
    sync_audio_overlay(w);
}

pub fn sync_audio_overlay(w: &Wiring) {
    let session = w.audio.borrow();
    overlay::mark_audio_state(&w.canvas, session.is_available(), session.is_muted());
}
