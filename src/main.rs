use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bead_quant::{ColorMatcher, Palette, PaletteSource, PresetPalette, Rgb};
use beadsmith::export;
use beadsmith::models::AppConfig;
use beadsmith::rendering;
use beadsmith::services::GridEditor;

#[derive(Parser)]
#[command(name = "beadsmith")]
#[command(about = "Beadsmith - turn images into bead patterns")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG image into a bead pattern
    Convert(ConvertArgs),
    /// List the built-in palettes
    Palettes,
    /// Find the palette colors closest to a hex color
    Match {
        /// Color to match, e.g. "#C83C3C"
        color: String,

        /// Preset palette id
        #[arg(short, long, default_value = "coco")]
        palette: String,

        /// Number of matches to print
        #[arg(short, default_value_t = 5)]
        k: usize,

        /// Use weighted RGB distance instead of Lab
        #[arg(long)]
        rgb: bool,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Input PNG file
    input: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset palette id (overrides config)
    #[arg(short, long)]
    palette: Option<String>,

    /// Grid width in beads
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in beads
    #[arg(long)]
    height: Option<u32>,

    /// Stretch to exactly width x height instead of keeping the aspect ratio
    #[arg(long)]
    no_aspect: bool,

    /// Enable dithering
    #[arg(long)]
    dither: bool,

    #[arg(long)]
    brightness: Option<f64>,

    #[arg(long)]
    contrast: Option<f64>,

    /// Background for transparent pixels, e.g. "#FFFFFF"
    #[arg(long)]
    background: Option<String>,

    /// Write the full result as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write color statistics as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a PNG preview
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Preview pixels per bead
    #[arg(long)]
    pixel_size: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadsmith=info,bead_quant=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Convert(args) => run_convert_command(args),
        Commands::Palettes => run_palettes_command(),
        Commands::Match {
            color,
            palette,
            k,
            rgb,
        } => run_match_command(&color, &palette, k, rgb),
    }
}

/// Apply command-line overrides on top of the loaded configuration
fn resolve_config(args: &ConvertArgs) -> AppConfig {
    let mut config = args
        .config
        .as_deref()
        .map(AppConfig::load)
        .unwrap_or_default();

    let conversion = &mut config.conversion;
    if let Some(ref palette) = args.palette {
        conversion.palette = PaletteSource::Preset(palette.clone());
    }
    if let Some(width) = args.width {
        conversion.width = width;
    }
    if let Some(height) = args.height {
        conversion.height = height;
    }
    if args.no_aspect {
        conversion.maintain_aspect_ratio = false;
    }
    if args.dither {
        conversion.dither = true;
    }
    if let Some(brightness) = args.brightness {
        conversion.brightness = brightness;
    }
    if let Some(contrast) = args.contrast {
        conversion.contrast = contrast;
    }
    if let Some(ref background) = args.background {
        conversion.background_color = background.clone();
    }
    if let Some(pixel_size) = args.pixel_size {
        config.preview.pixel_size = pixel_size;
    }
    config
}

fn run_convert_command(args: ConvertArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args);

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let pixels = rendering::decode_png(&bytes).context("decoding input image")?;
    let pixels = rendering::resize_nearest(
        &pixels,
        config.conversion.width,
        config.conversion.height,
        config.conversion.maintain_aspect_ratio,
    )
    .context("resizing input image")?;

    let mut editor = GridEditor::from_config(&config).context("loading palette")?;
    editor.convert(&pixels).context("converting pixels")?;
    let result = editor.result().context("no conversion result")?;

    tracing::info!(
        input = %args.input.display(),
        width = result.width(),
        height = result.height(),
        colors = result.color_stats().len(),
        "Converted image"
    );

    if let Some(ref path) = args.json {
        let json = export::export_json(result, &config, editor.palette())?;
        write_output(path, json.as_bytes())?;
    }
    if let Some(ref path) = args.csv {
        write_output(path, export::export_csv(result).as_bytes())?;
    }
    if let Some(ref path) = args.preview {
        let raster = rendering::render_preview(result.grid(), config.preview.pixel_size)
            .context("rendering preview")?;
        let png = rendering::encode_png(&raster).context("encoding preview")?;
        write_output(path, &png).context("writing preview")?;
    }

    let usage = export::estimate_bead_usage(result);
    println!(
        "{}x{} pattern, {} beads, {} colors",
        result.width(),
        result.height(),
        usage.total_beads,
        usage.color_breakdown.len()
    );
    for entry in &usage.color_breakdown {
        println!(
            "  {:<8} {}  {:>6}  {:>6.2}%",
            entry.color.name, entry.color.hex, entry.count, entry.percentage
        );
    }

    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote output");
    Ok(())
}

fn run_palettes_command() -> anyhow::Result<()> {
    for preset in PresetPalette::ALL {
        let palette = Palette::preset(preset)?;
        println!(
            "{:<6} {:>4} colors  brands: {}",
            preset.id(),
            palette.len(),
            palette.brands().join(", ")
        );
    }
    Ok(())
}

/// Name of the metric `ColorMatcher::top_k` ranks by
fn distance_label(rgb_mode: bool) -> &'static str {
    if rgb_mode {
        "weighted RGB"
    } else {
        "delta E"
    }
}

fn run_match_command(color: &str, palette_id: &str, k: usize, rgb_mode: bool) -> anyhow::Result<()> {
    let target: Rgb = color
        .parse()
        .with_context(|| format!("parsing color {color:?}"))?;
    let palette = Palette::from_preset_id(palette_id)?;
    let matcher = ColorMatcher::new(&palette, !rgb_mode)?;

    let metric = distance_label(rgb_mode);
    println!("Closest to {} in {}:", target.to_hex(), palette_id);
    for (bead, distance) in matcher.top_k(target, k) {
        println!(
            "  {:<8} {}  {:<10} {metric} {distance:.2}",
            bead.name, bead.hex, bead.brand
        );
    }
    Ok(())
}
