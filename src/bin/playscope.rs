use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use playscope::{
    CaptureConfig, FfmpegCapture, FieldPainter, FrameRenderer as _, ImmediateClock, PlayCatalog,
    PlaybackController, PlaybackSession, SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "playscope", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List games and plays in the reconstructed catalog.
    List(ListArgs),
    /// Render a single frame of one play as a PNG.
    Frame(FrameArgs),
    /// Record one full play to MP4 (requires `ffmpeg` on PATH).
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Pre-throw input tracking CSV.
    #[arg(long = "input")]
    input_path: PathBuf,

    /// Post-throw predicted output tracking CSV.
    #[arg(long = "output")]
    output_path: PathBuf,

    /// Per-play supplementary metadata CSV.
    #[arg(long = "supp")]
    supplementary_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ListArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Restrict the listing to one game.
    #[arg(long)]
    game: Option<String>,

    /// Emit the listing as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Game identifier.
    #[arg(long)]
    game: String,

    /// Play identifier.
    #[arg(long)]
    play: String,

    /// Frame index (0-based, by array position).
    #[arg(long)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Game identifier.
    #[arg(long)]
    game: String,

    /// Play identifier.
    #[arg(long)]
    play: String,

    /// Output directory for the MP4 artifact.
    #[arg(long)]
    out: PathBuf,

    /// Encoded frames per second (tracking data is 10 fps).
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Pace the recording in real time instead of encoding flat-out.
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load(sources: &SourceArgs) -> anyhow::Result<PlayCatalog> {
    let catalog = playscope::load_catalog(
        &sources.input_path,
        &sources.output_path,
        &sources.supplementary_path,
    )?;
    anyhow::ensure!(!catalog.is_empty(), "no plays found in the source tables");
    Ok(catalog)
}

#[derive(serde::Serialize)]
struct PlaySummary<'a> {
    game_id: &'a str,
    play_id: &'a str,
    description: &'a str,
    pass_result: &'a str,
    wr_name: &'a str,
    qb_name: &'a str,
    frames: usize,
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let catalog = load(&args.sources)?;

    let plays: Vec<&playscope::Play> = match &args.game {
        Some(game_id) => catalog.plays_for_game(game_id),
        None => catalog.plays().iter().collect(),
    };

    if args.json {
        let summaries: Vec<PlaySummary<'_>> = plays
            .iter()
            .map(|p| PlaySummary {
                game_id: &p.key.game_id,
                play_id: &p.key.play_id,
                description: &p.description,
                pass_result: &p.pass_result,
                wr_name: &p.wr_name,
                qb_name: &p.qb_name,
                frames: p.frame_count(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{} game(s), {} play(s)", catalog.games().len(), plays.len());
    for play in plays {
        println!(
            "game {} play {:>6}  {:<24} result {:<3} frames {:>3}  WR {}",
            play.key.game_id,
            play.key.play_id,
            play.description,
            play.pass_result,
            play.frame_count(),
            play.wr_name,
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let catalog = load(&args.sources)?;
    let key = playscope::PlayKey::new(args.game.clone(), args.play.clone());
    let play = catalog
        .find(&key)
        .with_context(|| format!("no play for game {} play {}", args.game, args.play))?;

    let mut painter = FieldPainter::default();
    let frame = painter
        .render(play, args.frame)
        .with_context(|| {
            format!(
                "frame index {} out of bounds (play has {} frames)",
                args.frame,
                play.frame_count()
            )
        })?;

    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data)
        .context("rendered frame has an inconsistent buffer size")?;
    img.save(&args.out)
        .with_context(|| format!("failed to write '{}'", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let catalog = load(&args.sources)?;

    // select_game succeeds even for an unknown id (it installs an empty play
    // list), so membership is checked against the catalog first.
    anyhow::ensure!(
        catalog.games().iter().any(|g| g.game_id == args.game),
        "no game {} in the catalog",
        args.game
    );
    let mut controller = PlaybackController::new(catalog);
    controller.select_game(&args.game);
    anyhow::ensure!(
        controller.select_play(&args.play),
        "no play {} in game {}",
        args.play,
        args.game
    );

    let painter = FieldPainter::default();
    let sink = FfmpegCapture::new(CaptureConfig::new(
        &args.out,
        painter.width,
        painter.height,
        args.fps,
    ))?;

    let artifact = if args.realtime {
        let mut session = PlaybackSession::new(controller, painter, sink, SystemClock);
        session.record_current_play()?
    } else {
        let mut session = PlaybackSession::new(controller, painter, sink, ImmediateClock);
        session.record_current_play()?
    };

    match artifact {
        Some(path) => println!("wrote {}", path.display()),
        None => println!("capture finalized with no artifact"),
    }
    Ok(())
}
