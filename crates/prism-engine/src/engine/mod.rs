//! The demo engine: startup configuration, input-driven state, the scene
//! and the [`App`](crate::core::App) that ties them to the runtime.

mod app;
mod config;
mod scene;
mod state;

pub use app::PrismApp;
pub use config::EngineConfig;
pub use scene::Scene;
pub use state::{
    EngineState, ObjectParams, CAMERA_STEP, DEFAULT_BACKGROUND, GREY_BACKGROUND, MIN_SCALE, MOVE_STEP,
    OBJECT_COUNT, ROTATE_STEP_DEG, SCALE_STEP,
};
