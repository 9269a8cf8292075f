use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lifelog_garden::{
    Bot, CacheStore, FileCache, GardenConfig, GardenPipeline, GardenSession, LoadStatus,
    MemoryCache, RouteMode, SceneSpec, SvgMount, TransportKind, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "lifelog-garden", version)]
struct Cli {
    /// Debug-level logging (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the export and render it, falling back to the cache or the placeholder.
    Fetch(FetchArgs),
    /// Render a local payload JSON file without touching the network.
    File(FileArgs),
    /// Render the placeholder scene.
    Placeholder(OutputArgs),
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Export endpoint URL (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Bot selector; unknown values fall back to winston.
    #[arg(long)]
    bot: Option<String>,

    /// Row limit; clamped into 1..=500, non-numeric falls back to 40.
    #[arg(long)]
    limit: Option<String>,

    #[arg(long, value_enum)]
    transport: Option<TransportChoice>,

    #[arg(long, value_enum)]
    route: Option<RouteChoice>,

    /// Request deadline in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Directory for the on-disk export cache.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Neither read nor write the cache.
    #[arg(long)]
    no_cache: bool,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Parser, Debug)]
struct FileArgs {
    /// Payload JSON (same shape as the export response).
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output SVG path.
    #[arg(long, default_value = "garden.svg")]
    out: PathBuf,

    /// Also rasterize to this PNG path.
    #[arg(long)]
    png: Option<PathBuf>,

    /// PNG scale factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Mount view box, e.g. "0 0 1600 900" (overrides the config viewport).
    #[arg(long)]
    view_box: Option<String>,

    /// Draw labels under flowers.
    #[arg(long)]
    labels: bool,

    /// Foreground caption.
    #[arg(long)]
    summary: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TransportChoice {
    Direct,
    ScriptInjection,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RouteChoice {
    R,
    Direct,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Fetch(args) => cmd_fetch(args).await,
        Command::File(args) => cmd_file(args),
        Command::Placeholder(args) => cmd_placeholder(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(out: &OutputArgs) -> anyhow::Result<GardenConfig> {
    let mut cfg = match &out.config {
        Some(path) => GardenConfig::from_path(path)?,
        None => GardenConfig::default(),
    };
    if let Some(vb) = &out.view_box {
        cfg.viewport = Viewport::from_view_box(vb)?;
    }
    if out.labels {
        cfg.render.show_labels = true;
    }
    if out.summary.is_some() {
        cfg.render.summary.clone_from(&out.summary);
    }
    cfg.validate()?;
    Ok(cfg)
}

async fn cmd_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.out)?;
    let acq = &mut cfg.acquire;
    if let Some(endpoint) = &args.endpoint {
        acq.set_endpoint(endpoint)?;
    }
    if let Some(bot) = &args.bot {
        acq.set_bot(Bot::parse_lenient(bot));
    }
    if let Some(limit) = &args.limit {
        acq.set_limit_text(limit);
    }
    if let Some(t) = args.transport {
        acq.set_transport(match t {
            TransportChoice::Direct => TransportKind::Direct,
            TransportChoice::ScriptInjection => TransportKind::ScriptInjection,
        });
    }
    if let Some(r) = args.route {
        acq.set_route(match r {
            RouteChoice::R => RouteMode::R,
            RouteChoice::Direct => RouteMode::Direct,
        });
    }
    if let Some(ms) = args.timeout_ms {
        acq.set_timeout_ms(ms);
    }
    if args.no_cache {
        acq.set_cache_enabled(false);
    }

    let cache: Arc<dyn CacheStore> = match &args.cache_dir {
        Some(dir) => Arc::new(FileCache::new(dir)),
        None if acq.cache_enabled() => {
            Arc::new(FileCache::new(std::env::temp_dir().join("lifelog-garden-cache")))
        }
        None => Arc::new(MemoryCache::new()),
    };

    let mut session = GardenSession::new(cfg, cache)?;
    match session.reload().await {
        Ok(LoadStatus::Stale { saved_at, cause }) => {
            eprintln!("fetch failed ({cause}); using cached export saved at {saved_at}");
        }
        Ok(_) => {
            if let Some(acquired) = session.last_acquired() {
                eprintln!("fetched {}", acquired.fetched_from);
            }
        }
        Err(e) => eprintln!("no data available ({e}); rendering placeholder"),
    }

    write_outputs(&session.build_scene(), &args.out)
}

fn cmd_file(args: FileArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.out)?;
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read payload '{}'", args.in_path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse payload '{}'", args.in_path.display()))?;

    // Same acceptance rules as a fetched payload; rejected payloads render the placeholder.
    let pipeline = GardenPipeline::new(cfg.render, cfg.viewport);
    let scene = match lifelog_garden::validate_payload(&raw) {
        Ok(()) => pipeline.build_from_payload(&raw).0,
        Err(e) => {
            eprintln!("payload rejected ({e}); rendering placeholder");
            pipeline.placeholder()
        }
    };
    write_outputs(&scene, &args.out)
}

fn cmd_placeholder(args: OutputArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let scene = GardenPipeline::new(cfg.render, cfg.viewport).placeholder();
    write_outputs(&scene, &args)
}

fn write_outputs(scene: &SceneSpec, out: &OutputArgs) -> anyhow::Result<()> {
    let mut mount = SvgMount::new(scene.viewport);
    lifelog_garden::render(scene, Some(&mut mount));

    mount.write_svg(&out.out)?;
    eprintln!("wrote {}", out.out.display());

    if let Some(png) = &out.png {
        write_png(&mount, png, out.scale)?;
    }
    Ok(())
}

fn write_png(mount: &SvgMount, path: &Path, scale: f32) -> anyhow::Result<()> {
    let img = lifelog_garden::rasterize_mount(mount, scale)?;
    img.save_png(path)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
