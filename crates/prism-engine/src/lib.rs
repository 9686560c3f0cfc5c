//! Prism engine crate.
//!
//! A small real-time 3D renderer: transform/camera math, a command-recording
//! render backend (wgpu or in-memory), shapes built on it, and the window
//! runtime that drives the demo engine.

pub mod coords;
pub mod core;
pub mod device;
pub mod engine;
pub mod input;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod render;
pub mod shapes;
pub mod time;
pub mod window;
