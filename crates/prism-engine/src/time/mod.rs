//! Frame timing: frame-rate capping and FPS counting.

mod pacer;

pub use pacer::{pacing_delay, FpsCounter, FramePacer};
