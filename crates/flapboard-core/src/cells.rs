//! Per-cell transition triples.

/// One grid position: the glyph it shows, the glyph it is leaving, and when
/// the move started (session seconds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub current: u32,
    pub previous: u32,
    pub start: f64,
}

impl Cell {
    pub fn at_rest(value: u32) -> Self {
        Self {
            current: value,
            previous: value,
            start: 0.0,
        }
    }

    pub fn is_resting(&self) -> bool {
        self.previous == self.current
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Cells that received a new target.
    pub applied: usize,
    /// Input values dropped because the grid was full.
    pub truncated: usize,
}

/// Fixed-length, row-major store of cells.
#[derive(Clone, Debug)]
pub struct CellStore {
    cells: Vec<Cell>,
    glyph_count: u32,
    last_modified: f64,
}

impl CellStore {
    /// `len` cells resting on `initial`, stamped at the epoch.
    pub fn new(len: usize, glyph_count: u32, initial: u32) -> Self {
        let initial = wrap(initial, glyph_count);
        Self {
            cells: vec![Cell::at_rest(initial); len],
            glyph_count,
            last_modified: 0.0,
        }
    }

    /// Shift each targeted cell's current glyph into `previous`, store the new
    /// target and stamp the batch time `at`. Cells past the end of `values`
    /// keep their state; values past the end of the grid are dropped.
    pub fn apply_update(&mut self, values: &[u32], at: f64) -> UpdateSummary {
        let applied = values.len().min(self.cells.len());
        let n = self.glyph_count;
        for (cell, &value) in self.cells.iter_mut().zip(values) {
            cell.previous = cell.current;
            cell.current = wrap(value, n);
            cell.start = at;
        }
        self.last_modified = at;
        let truncated = values.len() - applied;
        if truncated > 0 {
            log::debug!(
                "[cells] update of {} values truncated to {} cells",
                values.len(),
                applied
            );
        }
        UpdateSummary { applied, truncated }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    /// Start time shared by the most recent batch.
    pub fn last_modified(&self) -> f64 {
        self.last_modified
    }

    pub fn current_values(&self) -> Vec<u32> {
        self.cells.iter().map(|c| c.current).collect()
    }
}

#[inline]
fn wrap(value: u32, n: u32) -> u32 {
    if n == 0 {
        0
    } else {
        value % n
    }
}
