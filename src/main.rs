//! RotaryMill CLI - G-code generator for rotary milling
//!
//! Builds a job from command line flags or a job file, generates the
//! program in memory and writes it to the output directory.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rotarymill::output::{write_program, DEFAULT_OUTPUT_DIR};
use rotarymill::{
    generate_job, init_logging, Coordinates, EndMill, JobConfig, JobKind, MachineSettings,
    RotarySurfacingParameters, Stock,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "rotarymill")]
#[command(version = rotarymill::LONG_VERSION)]
#[command(about = "G-code generator for rotary (4th axis) milling", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mill round stock in the rotary axis down to a target depth
    Surface {
        #[command(flatten)]
        surface: SurfaceArgs,
        #[command(flatten)]
        machine: MachineArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate the program described by a job file (.toml or .json)
    Run {
        /// Job file
        config: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write a sample job file
    Init {
        /// Destination (.toml or .json)
        path: PathBuf,
    },
}

#[derive(Args)]
struct SurfaceArgs {
    /// Stock diameter (mm)
    #[arg(long)]
    diameter: f64,
    /// Stock length milled along Y (mm)
    #[arg(long)]
    length: f64,
    /// End mill diameter (mm)
    #[arg(long)]
    tool_diameter: f64,
    /// Target depth, negative below the stock surface (mm)
    #[arg(long, allow_negative_numbers = true)]
    depth: f64,
    /// Maximum depth per pass (mm)
    #[arg(long)]
    step: f64,
}

#[derive(Args)]
struct MachineArgs {
    /// Cutting feed rate (units/min)
    #[arg(long, default_value_t = 500.0)]
    standard_feed: f64,
    /// Traverse feed rate (units/min)
    #[arg(long, default_value_t = 800.0)]
    rapid_feed: f64,
    /// Safe X
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    safe_x: f64,
    /// Safe Y
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    safe_y: f64,
    /// Safe Z
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    safe_z: f64,
}

impl From<MachineArgs> for MachineSettings {
    fn from(args: MachineArgs) -> Self {
        Self {
            standard_feed: args.standard_feed,
            rapid_feed: args.rapid_feed,
            safe_location: Coordinates::new(args.safe_x, args.safe_y, args.safe_z),
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Directory the .nc file is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Print the program instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Surface {
            surface,
            machine,
            output,
        } => {
            let params = RotarySurfacingParameters {
                stock: Stock::new(surface.diameter, surface.length),
                tool: EndMill::new(surface.tool_diameter),
                target_depth: surface.depth,
                max_step_down: surface.step,
            };
            let config = JobConfig::new(machine.into(), JobKind::RotarySurfacing(params));
            config.validate()?;
            emit(&config, &output)?;
        }
        Commands::Run { config, output } => {
            let job = JobConfig::load_from_file(&config)
                .with_context(|| format!("Failed to load job {}", config.display()))?;
            emit(&job, &output)?;
        }
        Commands::Init { path } => {
            JobConfig::sample().save_to_file(&path)?;
            info!("Sample job written to {}", path.display());
        }
    }

    Ok(())
}

fn emit(config: &JobConfig, output: &OutputArgs) -> Result<()> {
    let gcode = generate_job(config).context("G-code generation failed")?;

    if output.stdout {
        print!("{}", gcode);
    } else {
        write_program(&output.output_dir, &config.output_file_name(), &gcode)?;
    }
    Ok(())
}
