use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use stampkit::batch::FileSet;
use stampkit::check::check_files;
use stampkit::cli::{CheckArgs, CliArgs, Command, CommonArgs, CompressionLevel, MaskArgs, SplitArgs};
use stampkit::config::{LoadedConfig, StampConfig};
use stampkit::mask::{MaskSpec, mask_files};
use stampkit::split::{SplitSpec, split_file};

fn main() {
    let cli = CliArgs::parse();

    // Initialise before anything can fail so every diagnostic, including a
    // fatal one, goes to the same stdout stream.
    env_logger::Builder::new()
        .filter_level(if cli.command.common().verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stdout)
        .init();

    if let Err(e) = run(&cli) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &CliArgs) -> Result<()> {
    let loaded = load_config(cli.command.common())?;

    info!("stampkit v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Check(args) => {
            let files = merge_check_args(args, loaded.as_ref());
            check_files(&files)
                .with_context(|| format!("failed to scan {}", files.dir.display()))?;
        }
        Command::Mask(args) => {
            let (files, spec, compress) = merge_mask_args(args, loaded.as_ref())?;
            info!(
                "Building {}x{} mask with {}px inset",
                spec.width, spec.height, spec.inset
            );
            let mask = spec.build().context("invalid mask settings")?;
            mask_files(&files, &mask, compress)
                .with_context(|| format!("failed to scan {}", files.dir.display()))?;
        }
        Command::Split(args) => {
            let (spec, compress) = merge_split_args(args, loaded.as_ref())?;
            let written = split_file(&spec, compress)
                .with_context(|| format!("failed to split {}", spec.source.display()))?;
            info!("Wrote {} slices to {}", written.len(), spec.output_dir.display());
        }
    }

    info!("Done!");

    Ok(())
}

fn load_config(common: &CommonArgs) -> Result<Option<LoadedConfig>> {
    common
        .config
        .as_ref()
        .map(|path| {
            LoadedConfig::load(path)
                .with_context(|| format!("failed to load config: {}", path.display()))
        })
        .transpose()
}

fn defaults() -> StampConfig {
    StampConfig::default()
}

// Each merge_* helper resolves a setting as CLI > config file > default.

fn merge_check_args(args: &CheckArgs, loaded: Option<&LoadedConfig>) -> FileSet {
    merge_file_set(args.dir.as_ref(), args.suffix.as_ref(), loaded)
}

fn merge_mask_args(
    args: &MaskArgs,
    loaded: Option<&LoadedConfig>,
) -> Result<(FileSet, MaskSpec, Option<CompressionLevel>)> {
    let files = merge_file_set(args.dir.as_ref(), args.suffix.as_ref(), loaded);

    let base = loaded.map(|lc| lc.config.mask).unwrap_or_default();
    let inset = args.inset.unwrap_or(base.inset);
    let spec = match args.size {
        Some(size) => MaskSpec::square(size, inset),
        None => MaskSpec { inset, ..base },
    };

    let compress = merge_compress(args.compress, loaded)?;

    Ok((files, spec, compress))
}

fn merge_split_args(
    args: &SplitArgs,
    loaded: Option<&LoadedConfig>,
) -> Result<(SplitSpec, Option<CompressionLevel>)> {
    let source = args.source.clone().unwrap_or_else(|| {
        loaded
            .map(LoadedConfig::resolve_sprite_sheet)
            .unwrap_or_else(|| PathBuf::from(defaults().sprite_sheet))
    });

    let output_dir = args.output.clone().unwrap_or_else(|| {
        loaded
            .map(LoadedConfig::resolve_output_dir)
            .unwrap_or_else(|| PathBuf::from(defaults().output_dir))
    });

    let names = args
        .names
        .clone()
        .or_else(|| loaded.map(|lc| lc.config.names.clone()))
        .unwrap_or_else(|| defaults().names);

    let compress = merge_compress(args.compress, loaded)?;

    Ok((
        SplitSpec {
            source,
            output_dir,
            names,
        },
        compress,
    ))
}

fn merge_file_set(
    dir: Option<&PathBuf>,
    suffix: Option<&String>,
    loaded: Option<&LoadedConfig>,
) -> FileSet {
    let dir = dir.cloned().unwrap_or_else(|| {
        loaded
            .map(LoadedConfig::resolve_image_dir)
            .unwrap_or_else(|| PathBuf::from(defaults().image_dir))
    });

    let suffix = suffix.cloned().unwrap_or_else(|| {
        loaded
            .map(|lc| lc.config.suffix.clone())
            .unwrap_or_else(|| defaults().suffix)
    });

    FileSet::new(dir, suffix)
}

fn merge_compress(
    cli: Option<CompressionLevel>,
    loaded: Option<&LoadedConfig>,
) -> Result<Option<CompressionLevel>> {
    if cli.is_some() {
        return Ok(cli);
    }
    match loaded {
        Some(lc) => lc.compression(),
        None => Ok(None),
    }
}
