#![cfg(target_arch = "wasm32")]
use flapboard_core::{
    AtlasStyle, AudioConfig, AudioSession, Board, BoardConfig, RawAttributes, SessionClock,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod atlas;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use constants::{CANVAS_ID, DEFAULT_TEXT};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, redraw: frame::Redraw) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        redraw.invalidate();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Board settings and initial text read from the canvas `data-*` attributes.
fn read_host_config(canvas: &web::HtmlCanvasElement) -> (BoardConfig, String) {
    let rows = dom::data_attribute(canvas, "rows");
    let cols = dom::data_attribute(canvas, "cols");
    let speed = dom::data_attribute(canvas, "speed");
    let glyphs = dom::data_attribute(canvas, "glyphs");
    let config = BoardConfig::from_attributes(&RawAttributes {
        rows: rows.as_deref(),
        cols: cols.as_deref(),
        speed: speed.as_deref(),
        glyphs: glyphs.as_deref(),
    });
    let text = dom::data_attribute(canvas, "text").unwrap_or_else(|| DEFAULT_TEXT.to_string());
    (config, text)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flapboard-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let (config, text) = read_host_config(&canvas);
    let atlas_style = AtlasStyle::default();
    let atlas = atlas::build_atlas(&document, &config.glyphs, &atlas_style)?;
    let atlas_side = config.glyphs.side();
    let cell_count = config.cell_count();

    let board = Rc::new(RefCell::new(Board::new(config)));
    let clock = SessionClock::start();
    let gpu = frame::init_gpu(&canvas, &atlas, atlas_side, cell_count).await;

    let frame_ctx: Rc<RefCell<frame::FrameContext<'static>>> = Rc::new(RefCell::new(frame::FrameContext {
        board: board.clone(),
        clock,
        canvas: canvas.clone(),
        document: document.clone(),
        gpu,
        frames: 0,
    }));
    let redraw = frame::install(frame_ctx.clone());
    wire_canvas_resize(&canvas, redraw.clone());

    let audio_config = AudioConfig::default();
    let audio = Rc::new(RefCell::new(AudioSession::new(audio_config.compression)));
    let initial = board.borrow().resolve_text(&text);

    let wiring = events::Wiring {
        board,
        audio,
        audio_config: Rc::new(audio_config),
        clock,
        redraw: redraw.clone(),
        canvas,
        document,
        frame_ctx,
        atlas_style: Rc::new(atlas_style),
        text: Rc::new(text),
        initial: Rc::new(RefCell::new(initial.clone())),
        loading: Rc::new(Cell::new(false)),
    };
    events::wire_canvas_click(&wiring);
    events::wire_global_keydown(&wiring);
    events::sync_audio_overlay(&wiring);

    // First content rolls in from blanks; audio stays off until a click
    events::apply_update(&wiring, &initial);
    redraw.invalidate();
    Ok(())
}
