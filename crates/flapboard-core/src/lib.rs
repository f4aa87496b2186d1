pub mod board;
pub mod cells;
pub mod clock;
pub mod config;
pub mod error;
pub mod flap;
pub mod glyphs;
pub mod histogram;
pub mod phase;
pub mod redraw;
pub mod schedule;

// Shaders bundled as string constants
pub static FLAP_WGSL: &str = include_str!("../shaders/flap.wgsl");

pub use board::*;
pub use cells::*;
pub use clock::*;
pub use config::*;
pub use error::ConfigError;
pub use flap::*;
pub use glyphs::*;
pub use histogram::*;
pub use phase::*;
pub use redraw::*;
pub use schedule::*;
