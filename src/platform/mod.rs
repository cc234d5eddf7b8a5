//! Platform abstraction layer
//!
//! The boundary a presentation layer plugs into:
//! - Input events folded into per-tick commands
//! - Fixed-period tick scheduling
//! - A drawable surface mirrored from game events

pub mod input;
pub mod surface;
pub mod time;

pub use input::{InputEvent, InputState};
pub use surface::{Drawn, HeadlessSurface, PresentError, Presenter, Surface};
pub use time::Ticker;
