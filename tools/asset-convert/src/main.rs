//! Asset conversion tool.
//!
//! One subcommand per converter. Every converter takes positional input and
//! output paths, prints `Read <input>.` and `Wrote <output>.` on success and
//! exits with status 1 (message on stderr) on any failure.
//!
//! # Commands
//!
//! - `asset-convert obj-to-off <in.obj> <out.off>`
//! - `asset-convert off-to-obj <in.off> <out.obj>`
//! - `asset-convert txt-to-ply <in.txt> <out.ply>`
//! - `asset-convert write-txt <out.txt>` - random example point cloud
//! - `asset-convert write-binvox <out.binvox>` - example voxel grid
//! - `asset-convert binvox-to-txt <in.binvox> <out.txt>` - voxel centers as points
//! - `asset-convert instance <in.txt|in.binvox> <out.obj|out.off>` - spheres
//!   for points, cubes for voxels, merged into one mesh
//!
//! Logs go to stderr; set `RUST_LOG` or pass `--verbose` for more detail.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mesh_transform::{AxisPermutation, CoordinateTransform, Scale, parse_floats};
use nalgebra::Vector3;
use tracing_subscriber::EnvFilter;

/// Convert meshes, point clouds and voxel grids between formats.
#[derive(Parser)]
#[command(name = "asset-convert")]
#[command(about = "Convert meshes, point clouds and voxel grids", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an OBJ mesh to OFF
    ObjToOff {
        /// OBJ file
        input: PathBuf,
        /// OFF file
        output: PathBuf,
    },

    /// Convert an OFF mesh to OBJ
    OffToObj {
        /// OFF file
        input: PathBuf,
        /// OBJ file
        output: PathBuf,
    },

    /// Convert a TXT point cloud to PLY
    TxtToPly {
        /// TXT file
        input: PathBuf,
        /// PLY file
        output: PathBuf,
    },

    /// Write an example point cloud of random points in [0, 1)^3
    WriteTxt {
        /// TXT file
        output: PathBuf,

        /// Number of points
        #[arg(long, default_value_t = 100)]
        count: usize,

        /// Random seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write an example voxel grid with a solid cube
    WriteBinvox {
        /// BINVOX file
        output: PathBuf,

        /// Edge length of the grid
        #[arg(long, default_value_t = 32)]
        size: usize,

        /// First occupied index on every axis
        #[arg(long, default_value_t = 10)]
        lo: usize,

        /// One past the last occupied index on every axis
        #[arg(long, default_value_t = 22)]
        hi: usize,
    },

    /// Write the occupied voxel centers of a BINVOX file as a TXT point cloud
    BinvoxToTxt {
        /// BINVOX file
        input: PathBuf,
        /// TXT file
        output: PathBuf,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Turn points into spheres or voxels into cubes and write one mesh
    Instance {
        /// TXT point cloud or BINVOX grid
        input: PathBuf,
        /// OBJ or OFF file
        output: PathBuf,

        /// Size of each instance (default 0.0075 for points, 0.0125 for voxels)
        #[arg(long)]
        radius: Option<f64>,

        #[command(flatten)]
        transform: TransformArgs,
    },
}

impl Commands {
    /// The input path, for commands that read one.
    fn input(&self) -> Option<&PathBuf> {
        match self {
            Self::ObjToOff { input, .. }
            | Self::OffToObj { input, .. }
            | Self::TxtToPly { input, .. }
            | Self::BinvoxToTxt { input, .. }
            | Self::Instance { input, .. } => Some(input),
            Self::WriteTxt { .. } | Self::WriteBinvox { .. } => None,
        }
    }
}

/// Target coordinate frame: permute, then scale, then offset.
#[derive(Args, Debug, Clone)]
struct TransformArgs {
    /// Axis string, e.g. `xzy` swaps y and z
    #[arg(long, default_value = "xyz")]
    axes: AxisPermutation,

    /// Uniform (`2`) or per-axis (`1,2,1`) scale
    #[arg(long, default_value = "1")]
    scale: Scale,

    /// Offset added after scaling, e.g. `-0.5,-0.5,-0.5`
    #[arg(long, default_value = "0,0,0", value_parser = parse_offset, allow_hyphen_values = true)]
    offset: Vector3<f64>,
}

impl TransformArgs {
    fn to_transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.axes, self.scale, self.offset)
    }
}

fn parse_offset(s: &str) -> Result<Vector3<f64>, String> {
    let values = parse_floats(s).map_err(|e| e.to_string())?;
    match values.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(format!("expected three comma-separated values, got {}", values.len())),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::ObjToOff { input, output } => commands::obj_to_off(&input, &output),
        Commands::OffToObj { input, output } => commands::off_to_obj(&input, &output),
        Commands::TxtToPly { input, output } => commands::txt_to_ply(&input, &output),
        Commands::WriteTxt {
            output,
            count,
            seed,
        } => commands::write_txt(&output, count, seed),
        Commands::WriteBinvox { output, size, lo, hi } => {
            commands::write_binvox(&output, size, lo, hi)
        }
        Commands::BinvoxToTxt {
            input,
            output,
            transform,
        } => commands::binvox_to_txt(&input, &output, &transform.to_transform()),
        Commands::Instance {
            input,
            output,
            radius,
            transform,
        } => commands::instance(&input, &output, radius, &transform.to_transform()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(input) = cli.command.input() {
        if !input.exists() {
            eprintln!("Input file does not exist: {}", input.display());
            return ExitCode::FAILURE;
        }
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
