//! Parallax mapping demo: a brick wall rendered with normal mapping, parallax
//! occlusion mapping and self-shadowing, explored with a free-look camera.
//!
//! Controls: mouse to look, W/S/A/D/Q/E to move, Up/Down to change the depth
//! scale, 1-4 to pick the shading mode, Escape to quit.

mod app;
mod config;
mod controls;

use parallax_engine::device::GpuInit;
use parallax_engine::logging::{init_logging, LoggingConfig};
use parallax_engine::window::{Runtime, RuntimeConfig};

use crate::app::ParallaxDemo;
use crate::config::DemoConfig;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = DemoConfig::from_env();
    log::info!("asset directory: {}", config.asset_dir.display());

    let demo = ParallaxDemo::new(config);
    Runtime::run(RuntimeConfig::default(), GpuInit::default(), demo)
}
