use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "funnelgraph", version, about = "Render animated funnel charts")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart as SVG, HTML or PNG (chosen by the output extension).
    Render(RenderArgs),
    /// Render the transition between two charts as numbered frames.
    Animate(AnimateArgs),
    /// Cycle through the demo datasets and write the settled frame of each.
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input chart configuration JSON.
    #[arg(long = "in", conflicts_with = "data_set")]
    in_path: Option<PathBuf>,

    /// Demo dataset number (1-6) instead of a JSON file.
    #[arg(long)]
    data_set: Option<usize>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output path (.svg, .html or .png).
    #[arg(long)]
    out: PathBuf,

    /// Lay the chart out vertically (400x500, vertical gradient).
    #[arg(long)]
    vertical: bool,

    /// Background color for PNG output, e.g. `#FFFFFF`.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Configuration JSON the transition starts from.
    #[arg(long, conflicts_with = "from_set")]
    from: Option<PathBuf>,

    /// Demo dataset the transition starts from.
    #[arg(long, default_value_t = 1)]
    from_set: usize,

    /// Configuration JSON the transition ends on.
    #[arg(long, conflicts_with = "to_set")]
    to: Option<PathBuf>,

    /// Demo dataset the transition ends on.
    #[arg(long, default_value_t = 3)]
    to_set: usize,

    /// Output directory for frames.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Frame file format.
    #[arg(long, value_enum, default_value_t = FrameFormat::Svg)]
    format: FrameFormat,

    /// Background color for PNG frames.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frame file format.
    #[arg(long, value_enum, default_value_t = FrameFormat::Html)]
    format: FrameFormat,

    /// Toggle the chart direction after every dataset.
    #[arg(long)]
    toggle_direction: bool,

    /// Toggle the gradient direction after every dataset.
    #[arg(long)]
    toggle_gradient: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FrameFormat {
    Svg,
    Html,
    Png,
}

impl FrameFormat {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("html" | "htm") => Ok(Self::Html),
            Some("png") => Ok(Self::Png),
            _ => anyhow::bail!(
                "cannot infer output format from '{}' (use .svg, .html or .png)",
                path.display()
            ),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::Png => "png",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_config(path: &Path) -> anyhow::Result<funnelgraph::FunnelConfig> {
    funnelgraph::FunnelConfig::from_path(path)
        .with_context(|| format!("load chart config '{}'", path.display()))
}

fn demo_config(n: usize) -> anyhow::Result<funnelgraph::FunnelConfig> {
    let mut harness = funnelgraph::demo::DemoHarness::new()?;
    Ok(harness
        .use_data_set(n)
        .with_context(|| format!("select demo dataset {n}"))?
        .clone())
}

fn load_source(source: &SourceArgs) -> anyhow::Result<funnelgraph::FunnelConfig> {
    match (&source.in_path, source.data_set) {
        (Some(path), _) => read_config(path),
        (None, Some(n)) => demo_config(n),
        (None, None) => Ok(funnelgraph::demo::DemoHarness::new()?.config().clone()),
    }
}

fn parse_background(raw: Option<&str>) -> anyhow::Result<Option<[u8; 4]>> {
    raw.map(|s| {
        funnelgraph::ColorToken::parse(s)
            .map(|t| t.to_rgba8())
            .with_context(|| format!("parse background color '{s}'"))
    })
    .transpose()
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_frame(
    frame: &funnelgraph::ChartFrame,
    format: FrameFormat,
    out: &Path,
    background: Option<[u8; 4]>,
) -> anyhow::Result<()> {
    ensure_parent(out)?;
    match format {
        FrameFormat::Svg => std::fs::write(out, funnelgraph::render_svg(frame))
            .with_context(|| format!("write svg '{}'", out.display()))?,
        FrameFormat::Html => std::fs::write(out, funnelgraph::render_html(frame))
            .with_context(|| format!("write html '{}'", out.display()))?,
        FrameFormat::Png => {
            funnelgraph::rasterize_png(&funnelgraph::render_svg(frame), out, background)?
        }
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let format = FrameFormat::from_path(&args.out)?;
    let background = parse_background(args.background.as_deref())?;
    let mut config = load_source(&args.source)?;
    if args.vertical {
        config.direction = funnelgraph::Direction::Vertical;
        config.gradient_direction = funnelgraph::Direction::Vertical;
        config.width = 400.0;
        config.height = 500.0;
    }
    config.animated = false;

    let chart = funnelgraph::FunnelChart::mount(config, Duration::ZERO)?;
    write_frame(&chart.frame()?, format, &args.out, background)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let background = parse_background(args.background.as_deref())?;
    let fps = funnelgraph::Fps::new(args.fps, 1)?;

    let mut from = match &args.from {
        Some(path) => read_config(path)?,
        None => demo_config(args.from_set)?,
    };
    let mut to = match &args.to {
        Some(path) => read_config(path)?,
        None => demo_config(args.to_set)?,
    };
    from.animated = false;
    to.animated = true;

    let mut chart = funnelgraph::FunnelChart::mount(from, Duration::ZERO)?;
    let start = Duration::ZERO;
    let span = to.animation.duration();
    chart.update(to, start)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let frames = fps.frames_covering(span);
    for i in 0..=frames {
        let now = if i == frames {
            fps.frame_time(start, i).max(start + span)
        } else {
            fps.frame_time(start, i)
        };
        chart.tick(now);
        let out = args
            .out_dir
            .join(format!("frame_{i:04}.{}", args.format.extension()));
        write_frame(&chart.frame()?, args.format, &out, background)?;
    }

    eprintln!(
        "wrote {} frames to {}",
        frames + 1,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let mut harness = funnelgraph::demo::DemoHarness::new()?;
    let mut now = Duration::ZERO;
    let mut chart = funnelgraph::FunnelChart::mount(harness.config().clone(), now)?;
    let settle = harness.config().animation.duration();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for step in 0..funnelgraph::demo::DATA_SET_COUNT {
        if step > 0 {
            if args.toggle_direction {
                harness.toggle_direction();
            }
            if args.toggle_gradient {
                harness.toggle_gradient();
            }
            let config = harness.next_set()?.clone();
            let changes = chart.update(config, now)?;
            tracing::info!(step, ?changes, "applied demo dataset");
        }
        now += settle;
        chart.tick(now);

        let out = args.out_dir.join(format!(
            "set_{}.{}",
            harness.data_set_num(),
            args.format.extension()
        ));
        write_frame(&chart.frame()?, args.format, &out, None)?;
    }

    eprintln!("wrote demo frames to {}", args.out_dir.display());
    Ok(())
}
