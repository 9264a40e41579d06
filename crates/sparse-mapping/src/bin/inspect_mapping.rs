//! Inspect a connectivity matrix described as JSON.
//!
//! Loads the container as the requested file kind and prints the map
//! summary, per-map statistics and optional voxel and slice queries.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cifti_common::PaletteFile;
use sparse_mapping::{FileKind, InMemorySource, MappableDataFile, MappingConfig, VolumeSliceViewPlane};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "inspect-mapping")]
#[command(about = "Inspect a sparse brainordinate connectivity matrix")]
struct Args {
    /// Container description (JSON)
    input: PathBuf,

    /// File kind, e.g. dscalar, dtseries, dlabel, dconn
    #[arg(short, long)]
    kind: String,

    /// Palette file (JSON); the built-in palettes are used when omitted
    #[arg(long, env = "PALETTE_FILE")]
    palettes: Option<PathBuf>,

    /// Print the value of voxel i,j,k in every map
    #[arg(long, value_parser = parse_ijk)]
    ijk: Option<[i64; 3]>,

    /// Color a slice (axial|coronal|parasagittal:N) and count colored voxels
    #[arg(long, value_parser = parse_slice)]
    slice: Option<(VolumeSliceViewPlane, i64)>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_ijk(s: &str) -> std::result::Result<[i64; 3], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<i64>().map_err(|e| format!("{}: {}", p, e)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    <[i64; 3]>::try_from(parts).map_err(|_| format!("expected i,j,k but got '{}'", s))
}

fn parse_slice(s: &str) -> std::result::Result<(VolumeSliceViewPlane, i64), String> {
    let (plane, index) = s
        .split_once(':')
        .ok_or_else(|| format!("expected plane:N but got '{}'", s))?;
    let plane = VolumeSliceViewPlane::from_str(plane)
        .ok_or_else(|| format!("unknown slice plane '{}'", plane))?;
    let index = index
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("{}: {}", index, e))?;
    Ok((plane, index))
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = MappingConfig::from_env();
    config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;

    let kind = FileKind::from_str(&args.kind);
    let palettes = match &args.palettes {
        Some(path) => PaletteFile::from_file(path)
            .with_context(|| format!("loading palettes from {}", path.display()))?,
        None => PaletteFile::builtin(),
    };

    let source = InMemorySource::from_file(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut file = MappableDataFile::with_config(kind, config);
    file.set_file_name(args.input.display().to_string());
    file.load(Box::new(source))?;
    info!(maps = file.number_of_maps(), "Inspecting {}", file.file_name());

    println!("{} ({})", file.file_name(), file.kind());
    println!("  rows: {}  columns: {}", file.number_of_rows(), file.number_of_columns());
    println!(
        "  surface: {}  volume: {}  dimensions: {:?}",
        file.is_surface_mappable(),
        file.is_volume_mappable(),
        file.dimensions()
    );

    for map_index in 0..file.number_of_maps() {
        let name = file.map_name(map_index)?.to_string();
        let stats = file.map_statistics(map_index)?;
        println!(
            "  map {} '{}': count={} mean={:.4} sd={:.4} min={} median={} max={}",
            map_index,
            name,
            stats.count(),
            stats.mean(),
            stats.sample_standard_deviation(),
            stats.min(),
            stats.median(),
            stats.max()
        );
        if file.is_mapped_with_label_table() {
            println!("    label keys: {:?}", file.unique_label_keys_used_in_map(map_index)?);
        }
    }

    if let Some(ijk) = args.ijk {
        for map_index in 0..file.number_of_maps() {
            match file.value(ijk, map_index)? {
                Some(value) => println!("  voxel {:?} map {}: {}", ijk, map_index, value),
                None => println!("  voxel {:?} map {}: no data", ijk, map_index),
            }
        }
    }

    if let Some((plane, slice)) = args.slice {
        let mut rgba = vec![0u8; file.voxel_count_in_slice(plane) * 4];
        for map_index in 0..file.number_of_maps() {
            file.update_scalar_coloring_for_map(map_index, &palettes)?;
            file.voxel_colors_for_slice_in_map(map_index, plane, slice, &mut rgba)?;
            let colored = rgba.chunks_exact(4).filter(|c| c[3] > 0).count();
            println!(
                "  {} slice {} map {}: {} of {} voxels colored",
                plane,
                slice,
                map_index,
                colored,
                rgba.len() / 4
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ijk() {
        assert_eq!(parse_ijk("1, 2,3"), Ok([1, 2, 3]));
        assert!(parse_ijk("1,2").is_err());
        assert!(parse_ijk("a,b,c").is_err());
    }

    #[test]
    fn test_parse_slice() {
        assert_eq!(parse_slice("coronal:4"), Ok((VolumeSliceViewPlane::Coronal, 4)));
        assert!(parse_slice("axial").is_err());
        assert!(parse_slice("oblique:1").is_err());
    }
}
