//! Immutable board configuration and attribute normalisation.
//!
//! Raw values come from the host as strings. Anything unparsable or out of
//! range is logged and replaced by the default below; no configuration input
//! is fatal.

use crate::error::{ConfigError, Result};
use crate::glyphs::GlyphSet;
use crate::schedule::Compression;

pub const DEFAULT_ROWS: usize = 12;
pub const DEFAULT_COLS: usize = 24;
pub const DEFAULT_SPEED: f64 = 20.0; // steps per second

pub const MIN_DIMENSION: usize = 1;
pub const MAX_DIMENSION: usize = 256;
pub const MAX_SPEED: f64 = 1000.0;

/// Grid shape, reel speed and alphabet. Changing any of these means building
/// a new board (and a new atlas).
#[derive(Clone, Debug)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub speed: f64,
    pub glyphs: GlyphSet,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            speed: DEFAULT_SPEED,
            glyphs: GlyphSet::default(),
        }
    }
}

/// Unparsed values as read from the host element.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawAttributes<'a> {
    pub rows: Option<&'a str>,
    pub cols: Option<&'a str>,
    pub speed: Option<&'a str>,
    pub glyphs: Option<&'a str>,
}

impl BoardConfig {
    pub fn from_attributes(attrs: &RawAttributes<'_>) -> Self {
        let rows = attrs
            .rows
            .map(|v| parse_dimension("rows", v))
            .map_or(DEFAULT_ROWS, |r| or_default(r, DEFAULT_ROWS));
        let cols = attrs
            .cols
            .map(|v| parse_dimension("cols", v))
            .map_or(DEFAULT_COLS, |r| or_default(r, DEFAULT_COLS));
        let speed = attrs
            .speed
            .map(parse_speed)
            .map_or(DEFAULT_SPEED, |r| or_default(r, DEFAULT_SPEED));
        let glyphs = match attrs.glyphs.map(parse_glyphs) {
            Some(Ok(set)) => set,
            Some(Err(e)) => {
                log::warn!("[config] {e}; using printable ASCII");
                GlyphSet::default()
            }
            None => GlyphSet::default(),
        };
        Self {
            rows,
            cols,
            speed,
            glyphs,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Reel modulus N.
    pub fn glyph_count(&self) -> u32 {
        self.glyphs.len()
    }
}

fn or_default<T: Copy + std::fmt::Debug>(parsed: Result<T>, default: T) -> T {
    parsed.unwrap_or_else(|e| {
        log::warn!("[config] {e}; falling back to {default:?}");
        default
    })
}

pub fn parse_dimension(name: &'static str, raw: &str) -> Result<usize> {
    let v = parse_number(name, raw)?;
    if v.fract() != 0.0 || v < MIN_DIMENSION as f64 || v > MAX_DIMENSION as f64 {
        return Err(ConfigError::OutOfRange {
            name,
            value: v,
            min: MIN_DIMENSION as f64,
            max: MAX_DIMENSION as f64,
        });
    }
    Ok(v as usize)
}

pub fn parse_speed(raw: &str) -> Result<f64> {
    let v = parse_number("speed", raw)?;
    if v <= 0.0 || v > MAX_SPEED {
        return Err(ConfigError::OutOfRange {
            name: "speed",
            value: v,
            min: 0.0,
            max: MAX_SPEED,
        });
    }
    Ok(v)
}

pub fn parse_glyphs(raw: &str) -> Result<GlyphSet> {
    if raw.is_empty() {
        return Err(ConfigError::Empty { name: "glyphs" });
    }
    Ok(GlyphSet::new(raw.chars()))
}

fn parse_number(name: &'static str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { name });
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::NotANumber {
            name,
            value: trimmed.to_string(),
        }),
    }
}

/// Look of the rasterised glyph atlas.
#[derive(Clone, Debug)]
pub struct AtlasStyle {
    pub cell_size: u32,
    pub font: String,
    pub background: String,
    pub foreground: String,
    /// Height of the dark band drawn across each row at the flap hinge, as a
    /// fraction of the cell size.
    pub hinge_band: f64,
}

impl Default for AtlasStyle {
    fn default() -> Self {
        Self {
            cell_size: 128,
            font: "100px sans-serif".to_string(),
            background: "black".to_string(),
            foreground: "white".to_string(),
            hinge_band: 0.05,
        }
    }
}

impl AtlasStyle {
    /// Pixel side of the square atlas for a set with `side` glyphs per row.
    pub fn atlas_pixels(&self, side: u32) -> u32 {
        side * self.cell_size
    }
}

/// Click track settings.
#[derive(Clone, Debug)]
pub struct AudioConfig {
    pub clip_url: String,
    pub compression: Compression,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            clip_url: "click.wav".to_string(),
            compression: Compression::default(),
        }
    }
}
