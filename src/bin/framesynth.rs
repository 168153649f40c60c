use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "framesynth", version)]
struct Cli {
    /// Log spawn/retire events and other debug output.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate training/validation/test sequences.
    Dataset(DatasetArgs),
    /// Render one frame of a seeded sequence as a PNG and print its labels.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Directory of sprite images named `<type>_<anything>.png`.
    #[arg(long)]
    sprites: PathBuf,

    /// Scene configuration JSON; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width sprites are scaled to before use (defaults to the frame width).
    #[arg(long)]
    sprite_width: Option<u32>,

    /// Random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct DatasetArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output root; one subdirectory per split.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 1000)]
    training: u64,

    #[arg(long, default_value_t = 200)]
    validation: u64,

    #[arg(long, default_value_t = 200)]
    test: u64,

    /// Encode each split to MP4 (requires `ffmpeg` on PATH).
    #[arg(long)]
    video: bool,

    /// Also write frames with label boxes drawn in.
    #[arg(long)]
    annotated: bool,

    /// Replace an existing output directory.
    #[arg(long)]
    overwrite: bool,

    /// Generate splits one after another instead of concurrently.
    #[arg(long)]
    sequential: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Draw label boxes into the image.
    #[arg(long)]
    annotate: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.cmd {
        Command::Dataset(args) => cmd_dataset(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<framesynth::SceneConfig> {
    let Some(path) = path else {
        return Ok(framesynth::SceneConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg: framesynth::SceneConfig =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse config JSON")?;
    cfg.validate()?;
    Ok(cfg)
}

fn prepare_scene(
    args: &SceneArgs,
) -> anyhow::Result<(framesynth::SceneConfig, Vec<framesynth::SpriteTemplate>)> {
    let cfg = read_config(args.config.as_deref())?;
    let width = args.sprite_width.unwrap_or(cfg.resolution.width);
    let templates = framesynth::load_sprite_dir(&args.sprites, width)?;
    Ok((cfg, templates))
}

fn cmd_dataset(args: DatasetArgs) -> anyhow::Result<()> {
    let (cfg, templates) = prepare_scene(&args.scene)?;

    let mut plan = framesynth::DatasetPlan::standard(
        &args.out,
        args.training,
        args.validation,
        args.test,
        args.scene.seed,
    );
    plan.overwrite = args.overwrite;
    plan.parallel = !args.sequential;
    plan.sequence = framesynth::SequenceOptions {
        write_video: args.video,
        write_annotated: args.annotated,
    };

    tracing::info!(out = %args.out.display(), "saving dataset");
    let results = framesynth::generate_dataset(&templates, &cfg, &plan)?;
    for (name, stats) in results {
        tracing::info!(
            split = %name,
            frames = stats.frames,
            objects = stats.objects,
            peak_population = stats.peak_population,
            secs = stats.elapsed_secs,
            "split done"
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cfg, templates) = prepare_scene(&args.scene)?;
    let mut sim = framesynth::SceneSimulator::new(templates, cfg, args.scene.seed)?;

    let mut out = sim.next_frame();
    while out.index.0 < args.frame {
        out = sim.next_frame();
    }

    let mut frame = out.frame;
    if args.annotate {
        framesynth::annotate_frame(&mut frame, &out.labels);
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .into_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    let labels = framesynth::FrameLabels {
        frame: out.index,
        objects: out.labels,
    };
    println!("{}", serde_json::to_string_pretty(&labels)?);
    tracing::info!(out = %args.out.display(), "frame written");
    Ok(())
}
