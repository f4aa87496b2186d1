//! Flap mesh, cell placement and the per-instance record handed to the GPU.
//!
//! The shader never sees reel timing: every frame the phase of each cell is
//! evaluated here and reduced to two atlas cells and a hinge angle.

use glam::Vec2;

use crate::glyphs::GlyphSet;
use crate::phase::Phase;

/// Corner of the flap mesh: `[x, y, hinge, face]`.
///
/// `hinge` is 1 on the moving edge of a falling flap; `face` is +1 for the
/// leaving glyph and -1 for the entering one.
pub type FlapVertex = [f32; 4];

/// Four quads drawn back to front: entering top, leaving bottom, leaving top
/// (the falling flap) and entering bottom (its reverse side).
pub const FLAP_VERTICES: [FlapVertex; 24] = [
    // entering top
    [-1.0, 1.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0, -1.0],
    [1.0, 1.0, 0.0, -1.0],
    [1.0, 1.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0, -1.0],
    [1.0, 0.0, 0.0, -1.0],
    // leaving bottom
    [-1.0, 0.0, 0.0, 1.0],
    [-1.0, -1.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [-1.0, -1.0, 0.0, 1.0],
    [1.0, -1.0, 0.0, 1.0],
    // leaving top
    [-1.0, 0.0, 1.0, 1.0],
    [-1.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [-1.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    // entering bottom
    [-1.0, 0.0, 1.0, -1.0],
    [1.0, 0.0, 1.0, -1.0],
    [-1.0, 0.0, 0.0, -1.0],
    [1.0, 0.0, 1.0, -1.0],
    [1.0, 0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0, -1.0],
];

/// Per-cell GPU record. Atlas addressing is resolved here so the shader only
/// scales a cell coordinate by the atlas side.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlapInstance {
    pub translate: [f32; 2],
    pub scale: [f32; 2],
    /// Atlas `(column, row)` of the glyph on the leaving flap.
    pub leaving: [f32; 2],
    /// Atlas `(column, row)` of the glyph being revealed.
    pub entering: [f32; 2],
    /// Flap fall in half turns: 0 upright, 1 flat down.
    pub angle: f32,
    pub _pad: f32,
}

/// Clip-space centre and half extent of cell `index` in a `rows x cols` grid.
pub fn cell_transform(index: usize, rows: usize, cols: usize) -> (Vec2, Vec2) {
    let cols_f = cols.max(1) as f32;
    let rows_f = rows.max(1) as f32;
    let col = (index % cols.max(1)) as f32;
    let row = (index / cols.max(1)) as f32;
    let translate = Vec2::new(
        ((col + 0.5) / cols_f) * 2.0 - 1.0,
        -(((row + 0.5) / rows_f) * 2.0 - 1.0),
    );
    let scale = Vec2::new(1.0 / cols_f, 1.0 / rows_f);
    (translate, scale)
}

/// x of the cubic Bézier (0,0) (0,·) (0.5,1) (1,1) at `t`.
#[inline]
fn bezier_x(t: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * t * t * 0.5 + t * t * t
}

/// Ease of the falling flap for a fractional position `t` in `[0, 1)`.
/// Starts slow, accelerates through the middle and lands at 1.
pub fn flip_angle(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let sine = (1.0 - (std::f64::consts::PI * t).cos()) * 0.5;
    sine * bezier_x(t)
}

pub fn instance(phase: Phase, glyphs: &GlyphSet, translate: Vec2, scale: Vec2) -> FlapInstance {
    let n = glyphs.len();
    let (leaving, entering, angle) = if n == 0 {
        (0, 0, 0.0)
    } else {
        let whole = phase.index.floor();
        let leaving = whole.rem_euclid(n as f64) as u32;
        (leaving, (leaving + 1) % n, flip_angle(phase.index - whole))
    };
    FlapInstance {
        translate: translate.to_array(),
        scale: scale.to_array(),
        leaving: atlas_coords(glyphs, leaving),
        entering: atlas_coords(glyphs, entering),
        angle: angle as f32,
        _pad: 0.0,
    }
}

#[inline]
fn atlas_coords(glyphs: &GlyphSet, index: u32) -> [f32; 2] {
    let (col, row) = glyphs.atlas_cell(index);
    [col as f32, row as f32]
}
