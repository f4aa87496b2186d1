use crate::overlay;
use crate::render;
use flapboard_core::{Board, SessionClock};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub board: Rc<RefCell<Board>>,
    pub clock: SessionClock,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,
    pub frames: u64,
}

impl<'a> FrameContext<'a> {
    /// Draw one frame. Returns true when the board wants another one.
    pub fn frame(&mut self) -> bool {
        let now = self.clock.now();
        let (instances, more) = self.board.borrow_mut().frame(now);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&instances) {
                log::error!("render error: {:?}", e);
            }
        }

        if self.frames == 0 {
            overlay::hide_loading(&self.document);
        }
        self.frames += 1;
        more
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    atlas: &crate::atlas::AtlasImage,
    atlas_side: u32,
    cell_count: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, atlas, atlas_side, cell_count).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Handle for asking the browser for one more frame.
///
/// Requests go through the board's redraw scheduler, so any number of
/// `settle`/`invalidate` calls between two frames cost one
/// `requestAnimationFrame`.
#[derive(Clone)]
pub struct Redraw {
    board: Rc<RefCell<Board>>,
    clock: SessionClock,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl Redraw {
    /// Ask for a frame if any reel is still moving.
    pub fn settle(&self) {
        let now = self.clock.now();
        let wanted = self.board.borrow_mut().settle(now);
        if wanted {
            self.request();
        }
    }

    /// Ask for a frame regardless of motion.
    pub fn invalidate(&self) {
        let wanted = self.board.borrow_mut().invalidate();
        if wanted {
            self.request();
        }
    }

    fn request(&self) {
        if let (Some(w), Some(cb)) = (web::window(), self.tick.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}

/// Wire the render callback. Nothing is drawn until the first `settle` or
/// `invalidate`; after that each frame schedules its successor while any flap
/// it drew was still moving.
pub fn install(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> Redraw {
    let (board, clock) = {
        let ctx = frame_ctx.borrow();
        (ctx.board.clone(), ctx.clock)
    };
    let redraw = Redraw {
        board,
        clock,
        tick: Rc::new(RefCell::new(None)),
    };
    let redraw_tick = redraw.clone();
    *redraw.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let more = frame_ctx.borrow_mut().frame();
        if more {
            redraw_tick.request();
        }
    }) as Box<dyn FnMut()>));
    redraw
}
