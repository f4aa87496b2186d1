//! Ordered glyph alphabet and its square atlas addressing.
//!
//! The set is padded with blanks up to `side * side` entries so the glyph
//! index space and the atlas grid share one modulus.

use fnv::FnvHashMap;

/// Symbol used to pad the set and to stand in for unknown characters.
pub const BLANK: char = ' ';

#[derive(Clone, Debug)]
pub struct GlyphSet {
    symbols: Vec<char>,
    lookup: FnvHashMap<char, u32>,
    side: u32,
}

impl GlyphSet {
    /// Build a set from `symbols`, dropping repeats (first occurrence wins).
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Self {
        let mut ordered = Vec::new();
        let mut lookup = FnvHashMap::default();
        for c in symbols {
            if lookup.contains_key(&c) {
                continue;
            }
            lookup.insert(c, ordered.len() as u32);
            ordered.push(c);
        }
        let distinct = ordered.len();
        let side = atlas_side(distinct);
        let padded = (side * side) as usize;
        ordered.resize(padded, BLANK);
        // A padding slot doubles as the blank glyph when the set has none.
        if padded > distinct {
            lookup.entry(BLANK).or_insert(distinct as u32);
        }
        Self {
            symbols: ordered,
            lookup,
            side,
        }
    }

    /// Printable ASCII from space to tilde.
    pub fn printable_ascii() -> Self {
        Self::new(' '..='~')
    }

    /// Number of glyph slots, padding included. This is the reel modulus N.
    pub fn len(&self) -> u32 {
        self.symbols.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Side of the square atlas grid.
    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn symbol(&self, index: u32) -> Option<char> {
        self.symbols.get(index as usize).copied()
    }

    pub fn index_of(&self, c: char) -> Option<u32> {
        self.lookup.get(&c).copied()
    }

    /// Index used for cells at rest before any content arrives, and for
    /// characters the set does not contain.
    pub fn blank_index(&self) -> u32 {
        self.index_of(BLANK).unwrap_or(0)
    }

    /// Resolve a character, falling back to the blank glyph.
    pub fn resolve(&self, c: char) -> u32 {
        self.index_of(c).unwrap_or_else(|| self.blank_index())
    }

    /// Atlas cell `(column, row)` of a glyph index, wrapping modulo the set.
    pub fn atlas_cell(&self, index: u32) -> (u32, u32) {
        if self.side == 0 {
            return (0, 0);
        }
        let wrapped = index % self.len();
        (wrapped % self.side, wrapped / self.side)
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::printable_ascii()
    }
}

/// `ceil(sqrt(count))` computed without floating point drift.
pub fn atlas_side(count: usize) -> u32 {
    let mut side = (count as f64).sqrt() as u32;
    while (side as usize) * (side as usize) < count {
        side += 1;
    }
    while side > 0 && ((side - 1) as usize) * ((side - 1) as usize) >= count {
        side -= 1;
    }
    side
}
