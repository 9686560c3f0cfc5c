use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use prism_engine::device::GpuInit;
use prism_engine::engine::{EngineConfig, PrismApp};
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::math::ProjectionKind;
use prism_engine::window::{Runtime, RuntimeConfig};

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Projection {
    Perspective,
    Ortho,
}

impl From<Projection> for ProjectionKind {
    fn from(p: Projection) -> Self {
        match p {
            Projection::Perspective => ProjectionKind::Perspective,
            Projection::Ortho => ProjectionKind::Orthographic,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "prism", version, about = "Minimal real-time 3D rendering demo")]
struct Opts {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    #[arg(long, default_value = "3D")]
    title: String,

    /// Borderless fullscreen on the primary monitor
    #[arg(long)]
    fullscreen: bool,

    /// Frame-rate cap (0 = uncapped)
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Image for the textured cube and sphere
    #[arg(long)]
    texture: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Projection::Perspective)]
    projection: Projection,

    /// Log filter, e.g. "debug" or "prism_engine=debug,wgpu=warn" (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    init_logging(LoggingConfig {
        env_filter: opts.log.clone(),
        ..LoggingConfig::default()
    });

    let runtime = RuntimeConfig {
        title: opts.title,
        width: opts.width,
        height: opts.height,
        fullscreen: opts.fullscreen,
        target_fps: opts.fps,
    };

    let engine = EngineConfig {
        projection: opts.projection.into(),
        texture_path: opts.texture,
        ..EngineConfig::default()
    };

    log::info!("starting prism ({}x{}, {} fps cap)", runtime.width, runtime.height, runtime.target_fps);

    Runtime::run(runtime, GpuInit::uncapped(), PrismApp::new(engine))
}
