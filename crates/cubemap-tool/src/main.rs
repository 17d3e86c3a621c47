//! cubemap-tool - inspect the cube-mapping layout contract
//!
//! # Commands
//!
//! - `cubemap-tool wgsl` - print the WGSL prelude shaders include
//! - `cubemap-tool msl` - print the Metal shader types header
//! - `cubemap-tool layout` - print record layouts and fail on any host/shader mismatch
//! - `cubemap-tool frame` - fill uniform rings for a few frames and report offsets
//!
//! # Usage
//!
//! ```bash
//! cubemap-tool wgsl --out shaders/shader_types.wgsl
//! cubemap-tool --log debug frame --frames 4 --width 1280 --height 720
//! ```

mod codegen;
mod frame;
mod layout;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cubemap_engine::contract::ShaderLanguage;
use cubemap_engine::logging::{init_logging, LoggingConfig};

#[derive(Parser)]
#[command(name = "cubemap-tool")]
#[command(about = "Inspect the cube-mapping host/shader layout contract")]
#[command(version)]
struct Cli {
    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the WGSL prelude
    Wgsl(codegen::CodegenArgs),

    /// Print the Metal shader types header
    Msl(codegen::CodegenArgs),

    /// Print record layouts and verify them
    Layout,

    /// Simulate frames and report uniform ring offsets
    Frame(frame::FrameArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log,
        ..Default::default()
    });

    match cli.command {
        Commands::Wgsl(args) => codegen::execute(ShaderLanguage::Wgsl, args),
        Commands::Msl(args) => codegen::execute(ShaderLanguage::Msl, args),
        Commands::Layout => layout::execute(),
        Commands::Frame(args) => frame::execute(args),
    }
}
