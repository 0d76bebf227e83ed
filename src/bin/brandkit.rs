use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "brandkit", version)]
struct Cli {
    /// Engine configuration JSON (defaults apply to anything omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Color a QR module bitmap and write it as PNG.
    Qr(QrArgs),
    /// Print the logo label layout plan as JSON.
    Logo(LogoArgs),
    /// Print the export multiplier for a canvas as JSON.
    ExportScale(ExportScaleArgs),
}

#[derive(Parser, Debug)]
struct QrArgs {
    /// Black-on-white module bitmap (any format the `image` crate decodes).
    #[arg(long)]
    modules: PathBuf,

    /// Foreground color, `#RRGGBB`.
    #[arg(long, default_value = "#000000")]
    fg: brandkit::Rgb8,

    /// Background color, `#RRGGBB` or `transparent`.
    #[arg(long, default_value = "transparent")]
    bg: brandkit::QrBackground,

    /// Resample the bitmap to this square size before coloring.
    #[arg(long)]
    size: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct LogoArgs {
    /// Raw label text as typed by the user.
    #[arg(long)]
    label: String,

    /// Logo top in canvas pixels; with `--logo-width`, also prints the label top.
    #[arg(long, requires = "logo_width")]
    logo_top: Option<f64>,

    /// Rendered logo width in canvas pixels.
    #[arg(long, requires = "logo_top")]
    logo_width: Option<f64>,
}

#[derive(Parser, Debug)]
struct ExportScaleArgs {
    #[arg(long)]
    width: f64,

    #[arg(long)]
    height: f64,

    /// Target DPI (defaults to the configured target).
    #[arg(long)]
    dpi: Option<f64>,

    /// Pixel budget (defaults to the configured budget).
    #[arg(long)]
    max_pixels: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Qr(args) => cmd_qr(args, &config),
        Command::Logo(args) => cmd_logo(args, &config),
        Command::ExportScale(args) => cmd_export_scale(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<brandkit::EngineConfig> {
    match path {
        Some(p) => Ok(brandkit::EngineConfig::from_path(p)?),
        None => Ok(brandkit::EngineConfig::default()),
    }
}

fn cmd_qr(args: QrArgs, config: &brandkit::EngineConfig) -> anyhow::Result<()> {
    let luma = image::open(&args.modules)
        .with_context(|| format!("open module bitmap '{}'", args.modules.display()))?
        .to_luma8();
    let mut bitmap = brandkit::ModuleBitmap::from_luma(&luma, 128)?;
    if let Some(size) = args.size {
        bitmap = bitmap.upscale(size, 0)?;
    }

    let spec = brandkit::ColorSpec::new(args.fg, args.bg);
    let img = brandkit::QrCompositor::new(config.qr.clone()).composite(&bitmap, &spec)?;
    let png = brandkit::encode_png(&img)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_logo(args: LogoArgs, config: &brandkit::EngineConfig) -> anyhow::Result<()> {
    let plan = brandkit::LogoLayoutPlanner::new(config.logo.clone()).plan(&args.label);
    let mut out = serde_json::to_value(&plan).context("serialize logo plan")?;
    if let (Some(top), Some(width)) = (args.logo_top, args.logo_width) {
        out["text_top"] = serde_json::json!(plan.text_top(top, width));
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_export_scale(args: ExportScaleArgs, config: &brandkit::EngineConfig) -> anyhow::Result<()> {
    let scaler = brandkit::ExportScaler::from_config(&config.export);
    let scale = scaler.compute(
        args.width,
        args.height,
        args.dpi.unwrap_or(config.export.target_dpi),
        args.max_pixels.unwrap_or(config.export.max_pixels),
    )?;
    let (w, h) = scale.output_size(args.width, args.height);

    let mut out = serde_json::to_value(scale).context("serialize export scale")?;
    out["output_width"] = serde_json::json!(w);
    out["output_height"] = serde_json::json!(h);
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
