use crate::cells::Cell;
use crate::phase::reel_delta;

/// Count, for every step `k` of an `n`-glyph reel, how many cells still have
/// to cross step `k` (cells whose travel distance is at least `k + 1`).
///
/// Equivalent to adding one to `hist[0..delta]` per cell, done as a count per
/// distance followed by a suffix sum.
pub fn histogram(cells: &[Cell], n: u32) -> Vec<u32> {
    let len = n as usize;
    let mut hist = vec![0u32; len];
    if len == 0 {
        return hist;
    }
    for cell in cells {
        let delta = reel_delta(cell.previous, cell.current, n) as usize;
        if delta > 0 {
            // cells travelling exactly `delta` steps cover indices 0..delta
            hist[delta - 1] += 1;
        }
    }
    for k in (0..len - 1).rev() {
        hist[k] += hist[k + 1];
    }
    hist
}

/// Total number of steps all cells travel; the histogram's sum.
pub fn total_steps(cells: &[Cell], n: u32) -> u64 {
    cells
        .iter()
        .map(|c| reel_delta(c.previous, c.current, n) as u64)
        .sum()
}
