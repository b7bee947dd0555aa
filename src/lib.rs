//! # RotaryMill
//!
//! A G-code generator for rotary (4th axis) milling on small CNC mills.
//!
//! ## Architecture
//!
//! RotaryMill is organized as a workspace with multiple crates:
//!
//! 1. **rotarymill-core** - Positions, feed rate classes, stock and tool geometry
//! 2. **rotarymill-camtools** - Motion writer and toolpath generators
//! 3. **rotarymill-settings** - Job files (TOML/JSON) and validation
//! 4. **rotarymill** - Command line binary that integrates all crates
//!
//! Programs are generated completely in memory; the `.nc` file is only
//! written once generation succeeded.

pub mod output;

pub use rotarymill_camtools::{
    CamToolError, CamToolResult, FixtureTrimGenerator, FixtureTrimParameters, MotionWriter,
    ProgramScript, RotarySurfacingGenerator, RotarySurfacingParameters, ScriptStep,
};
pub use rotarymill_core::{
    Axis, Coordinates, CoreError, EndMill, FeedRate, FeedRates, Fixture, PartialPosition, Stock,
};
pub use rotarymill_settings::{JobConfig, JobKind, MachineSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Generate the complete program for a job
///
/// The writer is created from the job's machine settings and owned by this
/// call; nothing is returned unless every step succeeded.
pub fn generate_job(config: &JobConfig) -> CamToolResult<String> {
    let mut writer = MotionWriter::new(config.machine.feed_rates(), config.machine.safe_location);

    match &config.job {
        JobKind::RotarySurfacing(params) => {
            RotarySurfacingGenerator::new(params.clone()).generate(&mut writer)?
        }
        JobKind::FixtureTrim(params) => {
            FixtureTrimGenerator::new(params.clone()).generate(&mut writer)?
        }
        JobKind::Script(script) => script.run(&mut writer)?,
    }

    tracing::debug!("Generated {} lines", writer.lines().len());
    Ok(writer.generate())
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so programs printed to stdout stay clean
/// - RUST_LOG environment variable support (defaults to `info`, `debug` when verbose)
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
