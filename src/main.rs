use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracelit::shared_structs::PrelightConfig;
use tracelit::Texture;

/// Bakes a cube-map environment into irradiance and prefiltered specular maps.
#[derive(Debug, Parser)]
#[command(name = "tracelit")]
struct Args {
    /// Source cube atlas: six square faces stacked vertically (+X, -X, +Y, -Y, +Z, -Z).
    source: PathBuf,

    /// Monte-Carlo samples per output texel.
    #[arg(long, default_value_t = PrelightConfig::default().sample_count)]
    samples: u32,

    /// Number of specular roughness levels.
    #[arg(long, default_value_t = PrelightConfig::default().specular_levels)]
    levels: u32,
}

fn output_path(source: &Path, suffix: &str) -> PathBuf {
    let name = source.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    source.with_file_name(format!("{name}_Prelight_{suffix}.png"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let source = Texture::load_cube_atlas(&args.source)
        .with_context(|| format!("Failed to load environment {}", args.source.display()))?;
    let config = PrelightConfig {
        sample_count: args.samples,
        specular_levels: args.levels,
        ..Default::default()
    };

    let maps = tracelit::bake(&source, &config)?;

    let diffuse_path = output_path(&args.source, "Diffuse");
    maps.irradiance
        .save_png(&diffuse_path)
        .with_context(|| format!("Failed to write {}", diffuse_path.display()))?;
    log::info!("Wrote {}", diffuse_path.display());

    for (level, map) in maps.specular.iter().enumerate() {
        let path = output_path(&args.source, &format!("Specular_{level}"));
        map.save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {} ({}x{})", path.display(), map.width, map.height);
    }

    Ok(())
}
