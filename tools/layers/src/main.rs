//! Diagnostic stage dump — writes every intermediate raster of one
//! composition as PNG, plus the random draws, to data/debug/.
//! Not part of the main pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chroma_core::encode::write_png;
use chroma_core::generator::master_rng;
use chroma_core::{Dimensions, PaintGenerator, Raster};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "layers", about = "Dump every pipeline stage of one composition")]
struct Args {
    #[arg(long, default_value_t = 600)]
    width: i64,

    #[arg(long, default_value_t = 400)]
    height: i64,

    #[arg(long, default_value_t = 200)]
    scale: i64,

    /// Master seed; omit for a random one (printed on completion).
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value = "data/debug")]
    out_dir: PathBuf,
}

fn save(dir: &Path, name: &str, raster: &Raster) -> Result<()> {
    let path = dir.join(name);
    write_png(raster, &path).with_context(|| format!("failed to save {name}"))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let dims = Dimensions::new(args.width, args.height, args.scale)?;
    let (master_seed, mut rng) = master_rng(args.seed);

    println!(
        "Rendering {}×{} (scale {}) with seed {master_seed}…",
        dims.width(),
        dims.height(),
        dims.scale()
    );
    let (stages, noise_seeds) = PaintGenerator::new().generate_stages(&dims, &mut rng)?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("cannot create {}", args.out_dir.display()))?;

    // ── Per-layer passes ─────────────────────────────────────────────────────
    for (i, passes) in stages.layers.iter().enumerate() {
        let n = i + 1;
        save(&args.out_dir, &format!("layer{n}_direct.png"), &passes.direct)?;
        save(&args.out_dir, &format!("layer{n}_echo.png"), &passes.echo)?;
        save(&args.out_dir, &format!("layer{n}.png"), &passes.composed)?;
    }

    // ── Blends ───────────────────────────────────────────────────────────────
    save(&args.out_dir, "difference.png", &stages.difference)?;
    save(&args.out_dir, "final.png", &stages.image)?;

    // ── Draws ────────────────────────────────────────────────────────────────
    let draws: Vec<_> = stages.layers.iter().map(|p| p.draws).collect();
    let report = serde_json::json!({
        "master_seed": master_seed,
        "noise_seeds": noise_seeds,
        "layers": draws,
        "final_dissolve_seed": stages.final_dissolve_seed,
    });
    let path = args.out_dir.join("draws.json");
    fs::write(&path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());

    println!("Done.");
    Ok(())
}
