use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stampkit")]
#[command(version, about = "Stamp image asset tools", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report whether matching images have transparent corners
    Check(CheckArgs),
    /// Overwrite the alpha channel of matching images with a circular mask
    Mask(MaskArgs),
    /// Slice a horizontal sprite sheet into equal-width named images
    /// (exits with status 1 if any slice cannot be written)
    Split(SplitArgs),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Check(args) => &args.common,
            Command::Mask(args) => &args.common,
            Command::Split(args) => &args.common,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Load settings from a .stampkit config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Directory containing the images [default: img]
    pub dir: Option<PathBuf>,

    /// Only inspect files whose name ends with this suffix [default: _ball.png]
    #[arg(short, long)]
    pub suffix: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct MaskArgs {
    /// Directory containing the images to mask in place [default: img]
    pub dir: Option<PathBuf>,

    /// Only mask files whose name ends with this suffix [default: _ball.png]
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Mask canvas size in pixels (square) [default: 1024]
    #[arg(long, value_name = "PIXELS")]
    pub size: Option<u32>,

    /// Gap between the canvas edge and the ellipse in pixels [default: 10]
    #[arg(long, value_name = "PIXELS")]
    pub inset: Option<u32>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Sprite sheet to slice [default: img/characters.png]
    pub source: Option<PathBuf>,

    /// Output directory for the slices [default: img]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated slice names, left to right
    #[arg(short, long, value_delimiter = ',')]
    pub names: Option<Vec<String>>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}
