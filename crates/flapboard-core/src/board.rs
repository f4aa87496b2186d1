//! The board: configuration, cell store and redraw bookkeeping behind one
//! set of update and query operations.

use crate::cells::{Cell, CellStore, UpdateSummary};
use crate::config::BoardConfig;
use crate::flap::{cell_transform, instance, FlapInstance};
use crate::histogram::histogram;
use crate::phase::{cell_phase, max_remaining, Phase};
use crate::redraw::RedrawScheduler;
use rand::Rng;

pub struct Board {
    config: BoardConfig,
    store: CellStore,
    redraw: RedrawScheduler,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        let store = Self::build_store(&config);
        log::info!(
            "[board] {}x{} cells, {} glyphs (atlas side {}), {} steps/s",
            config.rows,
            config.cols,
            config.glyph_count(),
            config.glyphs.side(),
            config.speed
        );
        Self {
            config,
            store,
            redraw: RedrawScheduler::new(),
        }
    }

    fn build_store(config: &BoardConfig) -> CellStore {
        CellStore::new(
            config.cell_count(),
            config.glyph_count(),
            config.glyphs.blank_index(),
        )
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn cells(&self) -> &[Cell] {
        self.store.cells()
    }

    pub fn store(&self) -> &CellStore {
        &self.store
    }

    pub fn redraw(&self) -> &RedrawScheduler {
        &self.redraw
    }

    /// Replace the grid and alphabet. All cells come back at rest on the blank
    /// glyph; the host invalidates to show the rebuilt board.
    pub fn reconfigure(&mut self, config: BoardConfig) {
        self.store = Self::build_store(&config);
        self.config = config;
        log::info!(
            "[board] reconfigured to {}x{}, {} glyphs",
            self.config.rows,
            self.config.cols,
            self.config.glyph_count()
        );
    }

    /// Set new targets for the leading cells, all starting at `now`.
    pub fn set_values(&mut self, values: &[u32], now: f64) -> UpdateSummary {
        let summary = self.store.apply_update(values, now);
        log::debug!(
            "[board] update at {:.3}s: {} cells, {} dropped",
            now,
            summary.applied,
            summary.truncated
        );
        summary
    }

    /// Resolve `text` against the glyph set and apply it row-major.
    pub fn set_text(&mut self, text: &str, now: f64) -> UpdateSummary {
        let values = self.resolve_text(text);
        self.set_values(&values, now)
    }

    pub fn resolve_text(&self, text: &str) -> Vec<u32> {
        layout_text(text, self.config.cols)
            .into_iter()
            .map(|c| self.config.glyphs.resolve(c))
            .collect()
    }

    /// Current targets shifted one cell to the left, the first wrapping to the
    /// end.
    pub fn rotated_values(&self) -> Vec<u32> {
        let mut values = self.store.current_values();
        if !values.is_empty() {
            values.rotate_left(1);
        }
        values
    }

    /// Current targets with each cell replaced by a random glyph with
    /// probability `p`.
    pub fn scrambled_values<R: Rng + ?Sized>(&self, p: f64, rng: &mut R) -> Vec<u32> {
        let n = self.config.glyph_count();
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        self.store
            .cells()
            .iter()
            .map(|c| {
                if n > 0 && rng.gen_bool(p) {
                    rng.gen_range(0..n)
                } else {
                    c.current
                }
            })
            .collect()
    }

    pub fn text(&self) -> String {
        self.store
            .cells()
            .iter()
            .map(|c| self.config.glyphs.symbol(c.current).unwrap_or(' '))
            .collect()
    }

    pub fn phase(&self, index: usize, now: f64) -> Option<Phase> {
        self.store
            .get(index)
            .map(|c| cell_phase(c, now, self.config.speed, self.config.glyph_count()))
    }

    pub fn max_remaining(&self, now: f64) -> f64 {
        max_remaining(
            self.store.cells(),
            now,
            self.config.speed,
            self.config.glyph_count(),
        )
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.max_remaining(now) > 0.0
    }

    pub fn histogram(&self) -> Vec<u32> {
        histogram(self.store.cells(), self.config.glyph_count())
    }

    /// True when the host must request a frame after a mutation or render.
    pub fn settle(&mut self, now: f64) -> bool {
        let remaining = self.max_remaining(now);
        self.redraw.settle(remaining)
    }

    pub fn invalidate(&mut self) -> bool {
        self.redraw.invalidate()
    }

    pub fn begin_frame(&mut self) {
        self.redraw.begin_frame();
    }

    /// GPU records for every cell at `now`.
    pub fn instances(&self, now: f64) -> Vec<FlapInstance> {
        self.render_at(now).0
    }

    /// Render step of the frame loop: clears the pending request, returns the
    /// records drawn at `now` and whether another frame must follow. The
    /// answer comes from the same phases that were drawn, so a frame showing
    /// any flap in motion is always followed by one more.
    pub fn frame(&mut self, now: f64) -> (Vec<FlapInstance>, bool) {
        self.redraw.begin_frame();
        let (instances, moving) = self.render_at(now);
        let more = moving && self.redraw.invalidate();
        (instances, more)
    }

    fn render_at(&self, now: f64) -> (Vec<FlapInstance>, bool) {
        let (rows, cols, speed) = (self.config.rows, self.config.cols, self.config.speed);
        let glyphs = &self.config.glyphs;
        let n = glyphs.len();
        let mut moving = false;
        let instances = self
            .store
            .cells()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let phase = cell_phase(c, now, speed, n);
                moving |= !phase.complete;
                let (translate, scale) = cell_transform(i, rows, cols);
                instance(phase, glyphs, translate, scale)
            })
            .collect();
        (instances, moving)
    }
}

/// Flow `text` into rows of `cols` characters. A newline fills the rest of
/// its row with blanks (an empty line is a whole blank row); nothing is
/// wrapped at word boundaries.
pub fn layout_text(text: &str, cols: usize) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut line_len = 0usize;
    for c in text.chars() {
        match c {
            '\n' => {
                if cols > 0 {
                    let pad = if line_len == 0 {
                        cols
                    } else {
                        (cols - line_len % cols) % cols
                    };
                    out.extend(std::iter::repeat(' ').take(pad));
                }
                line_len = 0;
            }
            '\r' => {}
            _ => {
                out.push(c);
                line_len += 1;
            }
        }
    }
    out
}
