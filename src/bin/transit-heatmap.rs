use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use transit_heatmap::{
    CpuCanvases, Dataset, FrameRenderer, FrameTargets, HeatmapConfig, HeatmapResult, HeatmapView,
    RidershipStats, SurfaceProvider, SystemClock, TimeKey, derive_keys,
};

#[derive(Parser, Debug)]
#[command(name = "transit-heatmap", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Session config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override canvas width.
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Override canvas height.
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Also paint a background-only mirror surface.
    #[arg(long, global = true, default_value_t = false)]
    mirror_background: bool,

    /// Log at debug level.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the time keys found in a dataset.
    Keys(KeysArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Play through the time axis in real time, writing one PNG per frame.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct KeysArgs {
    /// Input dataset JSON.
    #[arg(long)]
    data: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input dataset JSON.
    #[arg(long)]
    data: PathBuf,

    /// Time key index (0-based).
    #[arg(long, conflicts_with = "key", required_unless_present = "key")]
    index: Option<i64>,

    /// Time key label, e.g. "Monday 8".
    #[arg(long)]
    key: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output PNG path for the background mirror (implies --mirror-background).
    #[arg(long)]
    background_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input dataset JSON.
    #[arg(long)]
    data: PathBuf,

    /// Directory for `frame_<index>.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Stop after this many rendered frames, the start frame included.
    #[arg(long, default_value_t = 24)]
    frames: u64,

    /// Key index to start playback from.
    #[arg(long, default_value_t = 0)]
    start: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.common.verbose);
    match cli.cmd {
        Command::Keys(args) => cmd_keys(args),
        Command::Frame(args) => cmd_frame(&cli.common, args),
        Command::Play(args) => cmd_play(&cli.common, args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<HeatmapConfig> {
    let mut cfg = match &common.config {
        Some(path) => HeatmapConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => HeatmapConfig::default(),
    };
    if let Some(w) = common.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = common.height {
        cfg.canvas.height = h;
    }
    cfg.mirror_background |= common.mirror_background;
    cfg.validate().context("validate config")?;
    Ok(cfg)
}

fn load_session(
    cfg: &HeatmapConfig,
    data: &Path,
) -> anyhow::Result<(Dataset, RidershipStats, FrameRenderer)> {
    let dataset = Dataset::from_path(data)?;
    let stats = cfg.apply_to_stats(RidershipStats::compute(dataset.records()))?;
    tracing::info!(
        min = stats.min(),
        max = stats.max(),
        midpoint = stats.midpoint(),
        "ridership statistics"
    );
    Ok((dataset, stats, FrameRenderer::new(cfg.frame_style()?)))
}

fn cmd_keys(args: KeysArgs) -> anyhow::Result<()> {
    let dataset = Dataset::from_path(&args.data)?;
    for (i, key) in derive_keys(&dataset).iter().enumerate() {
        println!("{i}\t{key}");
    }
    Ok(())
}

fn cmd_frame(common: &CommonArgs, args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(common)?;
    cfg.mirror_background |= args.background_out.is_some();
    let (dataset, stats, renderer) = load_session(&cfg, &args.data)?;

    let key = match (&args.key, args.index) {
        (Some(label), _) => TimeKey::parse(label)
            .with_context(|| format!("time key '{label}' must look like \"<day> <hour>\""))?,
        (None, Some(index)) => {
            let keys = derive_keys(&dataset);
            usize::try_from(index)
                .ok()
                .and_then(|i| keys.get(i).cloned())
                .ok_or(transit_heatmap::HeatmapError::IndexOutOfRange {
                    index,
                    len: keys.len(),
                })?
        }
        (None, None) => anyhow::bail!("one of --index or --key is required"),
    };

    let mut canvases = CpuCanvases::new(renderer.style().canvas, cfg.mirror_background)?;
    let glyphs = renderer.render_frame(canvases.acquire()?, &key, &dataset, &stats)?;

    canvases.main().frame().save_png(&args.out)?;
    eprintln!("wrote {} ({key}, {glyphs} glyphs)", args.out.display());
    if let (Some(path), Some(bg)) = (&args.background_out, canvases.background()) {
        bg.frame().save_png(path)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

/// CPU canvases that write every presented frame to disk.
struct PngSink {
    canvases: CpuCanvases,
    out_dir: PathBuf,
}

impl SurfaceProvider for PngSink {
    fn acquire(&mut self) -> HeatmapResult<FrameTargets<'_>> {
        self.canvases.acquire()
    }

    fn present(&mut self, key: &TimeKey, index: usize) -> HeatmapResult<()> {
        let path = self.out_dir.join(format!("frame_{index:04}.png"));
        self.canvases.main().frame().save_png(&path)?;
        if let Some(bg) = self.canvases.background() {
            bg.frame()
                .save_png(self.out_dir.join(format!("background_{index:04}.png")))?;
        }
        tracing::info!(key = %key, path = %path.display(), "frame written");
        Ok(())
    }
}

fn cmd_play(common: &CommonArgs, args: PlayArgs) -> anyhow::Result<()> {
    let cfg = load_config(common)?;
    let (dataset, stats, renderer) = load_session(&cfg, &args.data)?;
    let sink = PngSink {
        canvases: CpuCanvases::new(renderer.style().canvas, cfg.mirror_background)?,
        out_dir: args.out_dir.clone(),
    };

    let mut view = HeatmapView::new_at(
        dataset,
        stats,
        renderer,
        sink,
        cfg.tick_period(),
        SystemClock,
        args.start,
    )?;
    if view.slider_max().is_none() {
        anyhow::bail!("dataset '{}' has no time keys", args.data.display());
    }
    view.play()?;

    while view.counters().rendered < args.frames {
        let Some(deadline) = view.next_tick() else {
            break;
        };
        std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
        view.poll()?;
    }

    let counters = view.counters();
    view.teardown();
    eprintln!(
        "played {} frames ({} skipped) into {}",
        counters.rendered,
        counters.skipped,
        args.out_dir.display()
    );
    Ok(())
}
