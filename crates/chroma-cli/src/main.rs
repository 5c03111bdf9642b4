//! Command-line front end: `chroma genimg` paints one image to a PNG file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chroma_core::encode::write_png;
use chroma_core::{GenerationConfig, PaintGenerator};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "chroma", version, about = "Procedural noise painter")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a randomly painted image.
    Genimg(GenImgArgs),
}

#[derive(Args, Debug)]
struct GenImgArgs {
    /// Width of the image [default: 1800].
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Height of the image [default: 1200].
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// Scale of the noise, higher is smoother [default: 500].
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<i64>,

    /// Master seed; omit for a fresh random image.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with width/height/scale/seed. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(short, long, default_value = "out.png")]
    out: PathBuf,

    /// Also write a JSON manifest of every seed and draw used.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Log debug detail (random draws, seeds).
    #[arg(short, long)]
    verbose: bool,
}

impl GenImgArgs {
    fn resolve_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::load(path)?,
            None => GenerationConfig::default(),
        };
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(s) = self.scale {
            config.scale = s;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        // Fail on bad dimensions before anything is rendered.
        config.dimensions()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn genimg(args: GenImgArgs) -> Result<()> {
    init_tracing(args.verbose);
    let config = args.resolve_config()?;

    let t = Instant::now();
    let (composition, manifest) = PaintGenerator::new()
        .run(&config)
        .context("image generation failed")?;
    info!(
        elapsed_ms = t.elapsed().as_millis() as u64,
        master_seed = manifest.master_seed,
        "composition finished"
    );

    write_png(&composition.image, &args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    info!(path = %args.out.display(), "wrote image");

    if let Some(path) = &args.manifest {
        fs::write(path, manifest.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote manifest");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Genimg(args) => genimg(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> GenImgArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.cmd {
            Command::Genimg(args) => args,
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_original_flags() {
        let args = parse(&["chroma", "genimg"]);
        let cfg = args.resolve_config().unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.scale), (1800, 1200, 500));
        assert_eq!(cfg.seed, None);
        assert_eq!(args.out, PathBuf::from("out.png"));
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["chroma", "genimg", "--width", "64", "--scale", "20", "--seed", "3"]);
        let cfg = args.resolve_config().unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.scale, cfg.seed), (64, 1200, 20, Some(3)));
    }

    #[test]
    fn non_positive_dimensions_are_rejected_before_generation() {
        for argv in [
            &["chroma", "genimg", "--width", "0"][..],
            &["chroma", "genimg", "--height", "-10"][..],
            &["chroma", "genimg", "--scale", "-1"][..],
        ] {
            let err = parse(argv).resolve_config().unwrap_err();
            assert!(err.to_string().contains("must be a positive integer"), "{argv:?}: {err}");
        }
    }

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("chroma-cli-{}.json", std::process::id()));
        fs::write(&path, r#"{ "width": 10, "height": 20, "scale": 30, "seed": 4 }"#).unwrap();
        let p = path.to_string_lossy().into_owned();
        let args = parse(&["chroma", "genimg", "--config", &p, "--height", "99"]);
        let cfg = args.resolve_config();
        let _ = fs::remove_file(&path);
        let cfg = cfg.unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.scale, cfg.seed), (10, 99, 30, Some(4)));
    }
}
