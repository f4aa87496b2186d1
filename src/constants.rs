// Shared tuning constants for the web frontend.

// DOM ids
pub const CANVAS_ID: &str = "flap-canvas";
pub const LOADING_ID: &str = "loading";

// Text shown until the host element provides `data-text`
pub const DEFAULT_TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. In et condimentum risus. Suspendisse potenti. Donec et aliquet orci, finibus faucibus justo. Cras efficitur nunc vitae ligula fermentum finibus. In at neque eget eros gravida varius. Fusce eget ipsum venenatis, iaculis turpis quis, commodo justo.";

// Compact alphabet the 'g' key switches to
pub const COMPACT_GLYPHS: &str = " ?abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Scramble action: chance for each cell to receive a random glyph
pub const SCRAMBLE_PROBABILITY: f64 = 0.1;

// Master level after the compressor (0..1)
pub const MASTER_GAIN: f32 = 0.8;

// Backdrop behind the cells
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.02, 0.025];
