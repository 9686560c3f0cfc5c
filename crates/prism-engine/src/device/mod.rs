//! GPU device + surface management.
//!
//! - `Gpu` owns Instance/Adapter/Device/Queue and the window surface
//! - `GpuFrame` is one acquired swapchain image plus its encoder
//! - surface helpers pick formats/modes and map per-frame surface errors

mod frame;
mod gpu;
mod init;
mod surface;

pub use frame::{GpuFrame, SurfaceErrorAction};
pub use gpu::Gpu;
pub use init::GpuInit;
