use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tweenloop::render::backend::RasterSurface as _;

#[derive(Parser, Debug)]
#[command(name = "tweenloop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a frame range as a PNG sequence (directory) or an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print or write a built-in show config.
    ///
    /// The drill-down presets name no font, so their nodes are unlabelled unless `--font` is
    /// passed when rendering or a `font` path is added to the written config.
    Preset(PresetArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input show config JSON.
    #[arg(long = "in", conflicts_with = "preset", required_unless_present = "preset")]
    in_path: Option<PathBuf>,

    /// Built-in preset instead of a config file.
    #[arg(long)]
    preset: Option<String>,

    /// Directory assets are resolved against (defaults to the config's directory, or `.`).
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Extra scripted click, `FRAME:X,Y`. May be repeated.
    #[arg(long = "click", value_name = "FRAME:X,Y")]
    clicks: Vec<String>,

    /// Override the drill-down seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the frame rate (integer fps).
    #[arg(long)]
    fps: Option<u32>,

    /// Font file for node labels. Drill-down shows draw no labels without one.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory for PNG frames, or a `.mp4` file.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames (defaults to the config's `frames`).
    #[arg(long)]
    frames: Option<u64>,

    /// Flatten PNG frames over the show background instead of keeping alpha.
    #[arg(long)]
    opaque: bool,
}

#[derive(Args, Debug)]
struct PresetArgs {
    /// One of: image-fade, shape-fade, polygon-fade, polygon-zoom, drill-down, drill-down-focus,
    /// network.
    name: String,

    /// Write the config here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn load_show(src: &SourceArgs) -> anyhow::Result<(tweenloop::ShowConfig, PathBuf)> {
    let (mut config, root) = match (&src.in_path, &src.preset) {
        (Some(path), _) => {
            let config = tweenloop::ShowConfig::from_path(path)
                .with_context(|| format!("load show config '{}'", path.display()))?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (config, root)
        }
        (None, Some(name)) => (tweenloop::show::presets::preset(name)?, PathBuf::from(".")),
        (None, None) => anyhow::bail!("either --in or --preset is required"),
    };

    for click in &src.clicks {
        config.clicks.push(tweenloop::PointerEvent::parse(click)?);
    }
    if let Some(seed) = src.seed {
        match &mut config.show {
            tweenloop::ShowSpec::DrillDown(spec) => spec.seed = seed,
            other => tracing::warn!(kind = other.kind_name(), "--seed only affects drill-down shows"),
        }
    }
    if let Some(fps) = src.fps {
        config.fps = tweenloop::Fps::new(fps, 1)?;
    }
    config.validate()?;

    let root = src.assets_dir.clone().unwrap_or(root);
    Ok((config, root))
}

fn prepare(
    config: &tweenloop::ShowConfig,
    root: &Path,
    font: Option<&Path>,
) -> anyhow::Result<(tweenloop::Session, tweenloop::CpuSurface)> {
    let mut assets = tweenloop::AssetStore::prepare(config, root)
        .with_context(|| format!("prepare assets under '{}'", root.display()))?;
    if let Some(path) = font {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        assets.set_font(bytes);
    }
    let surface = tweenloop::CpuSurface::new(config.canvas, config.background, &assets)?;
    let session = tweenloop::Session::new(config, &assets)?;
    Ok((session, surface))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (config, root) = load_show(&args.source)?;
    let (mut session, mut surface) = prepare(&config, &root, args.source.font.as_deref())?;

    session.skip_to(tweenloop::FrameIndex(args.frame), &mut surface)?;
    session.step(&mut surface);
    let frame = surface.readback()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    tweenloop::encode::png::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (config, root) = load_show(&args.source)?;
    let frames = args.frames.unwrap_or(config.frames);
    if frames == 0 {
        anyhow::bail!("nothing to render: frame count is 0");
    }
    let (mut session, mut surface) = prepare(&config, &root, args.source.font.as_deref())?;

    let is_mp4 = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mp4"));
    let mut sink: Box<dyn tweenloop::FrameSink> = if is_mp4 {
        if args.opaque {
            tracing::warn!("--opaque only affects PNG output, MP4 frames are always flattened");
        }
        Box::new(tweenloop::FfmpegSink::new(tweenloop::FfmpegSinkOpts::new(&args.out)))
    } else {
        Box::new(tweenloop::PngSequenceSink::new(&args.out).opaque(args.opaque))
    };

    let stats = session.run(frames, &mut surface, sink.as_mut())?;
    eprintln!(
        "wrote {} ({} frames, {:.2}s, {} ticks, {} flips, {} settles, {} hits)",
        args.out.display(),
        stats.frames,
        config.fps.frames_to_secs(stats.frames),
        stats.ticks,
        stats.flips,
        stats.settles,
        stats.hits
    );
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let config = tweenloop::show::presets::preset(&args.name)?;
    let json = config.to_json_pretty()?;
    match args.out {
        Some(path) => {
            tweenloop::encode::ffmpeg::ensure_parent_dir(&path)?;
            std::fs::write(&path, json + "\n")
                .with_context(|| format!("write preset '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
