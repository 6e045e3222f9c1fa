//! Command-line front end for inspecting machina blueprints against world snapshots.
//!
//! Usage:
//!     machina inspect -m materials.toml -b blueprints.toml -n drill --rotation east
//!     machina detect -m materials.toml -b blueprints.toml -n drill -w world.toml --at 0,64,0
//!     machina extract -m materials.toml -b blueprints.toml -n drill -w world.toml --at 0,64,0

mod commands;

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use machina_geom::{BlockLocation, BlockRotation};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[derive(Parser)]
#[command(name = "machina")]
#[command(version)]
#[command(about = "Detect and inspect multi-block machina blueprints", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write the log to this file
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CatalogArgs {
    /// Materials file ([materials] table)
    #[arg(short, long, value_name = "FILE")]
    materials: PathBuf,

    /// Blueprints file ([[blueprints]] entries)
    #[arg(short, long, value_name = "FILE")]
    blueprints: PathBuf,

    /// Blueprint name
    #[arg(short, long)]
    name: String,

    /// Module indices to use (default: all modules, in order)
    #[arg(long = "module", value_name = "INDEX")]
    modules: Vec<usize>,
}

#[derive(Args)]
struct PlacementArgs {
    /// World snapshot file ([[blocks]] entries)
    #[arg(short, long, value_name = "FILE")]
    world: PathBuf,

    /// Anchor position as x,y,z
    #[arg(long, value_parser = parse_location, allow_hyphen_values = true)]
    at: BlockLocation,

    /// Only try this rotation
    #[arg(short, long, value_parser = parse_rotation)]
    rotation: Option<BlockRotation>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the unified block list with rotated offsets
    Inspect {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Rotation to show (default: all four)
        #[arg(short, long, value_parser = parse_rotation)]
        rotation: Option<BlockRotation>,
    },

    /// Report the rotation at which the blueprint stands at the anchor
    Detect {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// Print per-block data bytes and inventory contents of a detected machina
    Extract {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        placement: PlacementArgs,
    },
}

/// Largest accepted anchor coordinate magnitude; the vanilla world border.
const COORD_LIMIT: i32 = 30_000_000;

fn parse_location(s: &str) -> Result<BlockLocation, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z, got '{}'", s));
    }
    let mut xyz = [0i32; 3];
    for (slot, part) in xyz.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("bad coordinate '{}': {}", part, e))?;
        if slot.unsigned_abs() > COORD_LIMIT as u32 {
            return Err(format!("coordinate {} is beyond +/-{}", slot, COORD_LIMIT));
        }
    }
    Ok(BlockLocation::from(xyz))
}

fn parse_rotation(s: &str) -> Result<BlockRotation, String> {
    BlockRotation::from_name(s)
        .ok_or_else(|| format!("expected north, east, south or west, got '{}'", s))
}

fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(
            LevelFilter::Trace,
            Config::default(),
            File::create(path)?,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_ref())?;

    match cli.command {
        Commands::Inspect { catalog, rotation } => commands::inspect(&catalog, rotation),
        Commands::Detect { catalog, placement } => commands::detect(&catalog, &placement),
        Commands::Extract { catalog, placement } => commands::extract(&catalog, &placement),
    }
}
