use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lineboil", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a single frame as a PNG.
    Frame(FrameArgs),
    /// Run the full pre-roll + producer pipeline, writing presented frames as PNGs.
    Play(PlayArgs),
    /// Bake one animated GIF per printable ASCII glyph.
    ExportGifs(ExportGifsArgs),
    /// Compose frames from baked glyph GIFs, writing them as PNGs.
    PlayGifs(PlayGifsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// TrueType/OpenType font file.
    #[arg(long)]
    font: PathBuf,

    /// Optional config JSON (defaults apply to missing keys).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// TrueType/OpenType font file.
    #[arg(long)]
    font: PathBuf,

    /// Optional config JSON (defaults apply to missing keys).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving `frame_NNNNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Stop after this many playback ticks.
    #[arg(long)]
    ticks: u64,

    /// Run as fast as possible instead of at the configured frame rate.
    #[arg(long, default_value_t = false)]
    unpaced: bool,
}

#[derive(Parser, Debug)]
struct ExportGifsArgs {
    /// TrueType/OpenType font file.
    #[arg(long)]
    font: PathBuf,

    /// Directory receiving `glyph_NNN.gif`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Glyph rasterization pixel height.
    #[arg(long, default_value_t = lineboil::glyph::cache::DEFAULT_FONT_PX)]
    font_px: f32,

    /// Frames per glyph.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Boil strength.
    #[arg(long, default_value_t = 3.0)]
    strength: f32,

    /// Boil frequency.
    #[arg(long, default_value_t = 0.04)]
    freq: f32,

    /// Delay per GIF frame in centiseconds.
    #[arg(long, default_value_t = 8)]
    delay: u32,
}

#[derive(Parser, Debug)]
struct PlayGifsArgs {
    /// Directory holding `glyph_NNN.gif`.
    #[arg(long, default_value = ".")]
    gif_dir: PathBuf,

    /// Optional config JSON (lines, canvas, fps and metrics are used).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving `frame_NNNNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames to write.
    #[arg(long)]
    ticks: u64,

    /// Derive time from the frame count instead of the wall clock.
    #[arg(long, default_value_t = false)]
    unpaced: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
        Command::ExportGifs(args) => cmd_export_gifs(args),
        Command::PlayGifs(args) => cmd_play_gifs(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<lineboil::BoilConfig> {
    match path {
        Some(p) => lineboil::BoilConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(lineboil::BoilConfig::default()),
    }
}

fn load_cache(font: &Path, px: f32) -> anyhow::Result<lineboil::GlyphCache> {
    lineboil::GlyphCache::from_font_path(font, px)
        .with_context(|| format!("load font '{}'", font.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let cache = load_cache(&args.font, cfg.font_px)?;
    let pipeline = lineboil::Pipeline::new(&cfg, cache)?;
    let frame = pipeline
        .context()
        .compose_frame(lineboil::FrameIndex(args.index))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_rgba8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let cache = load_cache(&args.font, cfg.font_px)?;
    let pipeline = lineboil::Pipeline::new(&cfg, cache)?;
    let display = lineboil::PngDirDisplay::new(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let report = pipeline.run(
        display,
        lineboil::PlaybackOpts {
            max_ticks: Some(args.ticks),
            unpaced: args.unpaced,
        },
    )?;

    let stats = report.shutdown.stats;
    eprintln!(
        "wrote {} frames to {} (generated {}, consumed {}, released {})",
        report.display.written(),
        args.out_dir.display(),
        stats.generated,
        stats.consumed,
        stats.released_at_shutdown
    );
    Ok(())
}

fn cmd_export_gifs(args: ExportGifsArgs) -> anyhow::Result<()> {
    let mut cache = load_cache(&args.font, args.font_px)?;
    let opts = lineboil::GifExportOpts {
        frames: args.frames,
        strength: args.strength,
        freq: args.freq,
        delay_centis: args.delay,
        ..lineboil::GifExportOpts::default()
    };
    let written = lineboil::export_glyph_gifs(&mut cache, &opts, &args.out_dir)?;
    eprintln!(
        "wrote {} glyph GIFs to {}",
        written.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_play_gifs(args: PlayGifsArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut set = lineboil::GifGlyphSet::load_dir(&args.gif_dir);
    let mut display = lineboil::PngDirDisplay::new(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let n = lineboil::play_gifs(
        &mut set,
        &cfg.text_lines(),
        cfg.canvas,
        &cfg.metrics,
        &mut display,
        lineboil::GifPlaybackOpts {
            fps: cfg.fps,
            max_ticks: Some(args.ticks),
            unpaced: args.unpaced,
        },
    )?;

    eprintln!("wrote {n} frames to {}", args.out_dir.display());
    Ok(())
}
