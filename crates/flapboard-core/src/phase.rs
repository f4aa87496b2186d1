//! Reel arithmetic: how far a cell has to travel and where it is now.
//!
//! A reel only turns forward, so the distance from `previous` to `current` is
//! taken modulo the glyph count and always lies in `[0, n)`.

use crate::cells::Cell;

/// Forward distance in steps from `previous` to `current` on an `n`-glyph
/// reel.
#[inline]
pub fn reel_delta(previous: u32, current: u32, n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    let p = (previous % n) as u64;
    let c = (current % n) as u64;
    ((n as u64 + c - p) % n as u64) as u32
}

/// Seconds the reel needs to travel from `previous` to `current`.
#[inline]
pub fn transition_duration(previous: u32, current: u32, n: u32, speed: f64) -> f64 {
    let delta = reel_delta(previous, current, n);
    if delta == 0 || !(speed > 0.0) || !speed.is_finite() {
        return 0.0;
    }
    delta as f64 / speed
}

/// Animation state of one cell at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    /// Continuous glyph position; the integer part is the glyph on the
    /// leaving flap, the fraction is how far the flap has fallen.
    pub index: f64,
    pub complete: bool,
}

/// Evaluate where a reel started at `start` sits at `now`.
pub fn phase(previous: u32, current: u32, start: f64, now: f64, speed: f64, n: u32) -> Phase {
    let delta = reel_delta(previous, current, n);
    if delta == 0 {
        return Phase {
            index: current as f64,
            complete: true,
        };
    }
    if now <= start {
        return Phase {
            index: previous as f64,
            complete: false,
        };
    }
    let complete_at = start + transition_duration(previous, current, n, speed);
    if now >= complete_at {
        return Phase {
            index: current as f64,
            complete: true,
        };
    }
    let elapsed = now - start;
    Phase {
        index: (previous as f64 + elapsed * speed).rem_euclid(n as f64),
        complete: false,
    }
}

pub fn cell_phase(cell: &Cell, now: f64, speed: f64, n: u32) -> Phase {
    phase(cell.previous, cell.current, cell.start, now, speed, n)
}

/// Seconds until the cell comes to rest; zero or negative once it has.
pub fn remaining(cell: &Cell, now: f64, speed: f64, n: u32) -> f64 {
    cell.start + transition_duration(cell.previous, cell.current, n, speed) - now
}

/// Largest [`remaining`] over a set of cells, or `f64::NEG_INFINITY` when
/// there are none.
pub fn max_remaining(cells: &[Cell], now: f64, speed: f64, n: u32) -> f64 {
    cells
        .iter()
        .filter(|c| !c.is_resting())
        .map(|c| remaining(c, now, speed, n))
        .fold(f64::NEG_INFINITY, f64::max)
}
