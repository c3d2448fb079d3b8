mod display;
mod prompt;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bug_crossing::config::GameConfig;
use bug_crossing::engine::{Engine, Phase};
use bug_crossing::entities::{Direction, Sprite};
use bug_crossing::render::{render, AssetProvider};

use display::{GlyphAtlas, TerminalSurface};
use prompt::AvatarChoice;

#[derive(Parser, Debug)]
#[command(name = "bug_crossing", about = "Cross the road to the water without touching a bug")]
struct Cli {
    /// JSON file overriding the default board, speeds and lives.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy speeds, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here.  Without it logs are discarded, since the game owns
    /// the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = 30)]
    fps: u32,
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        _ => None,
    }
}

// ── Frame drawing ─────────────────────────────────────────────────────────────

fn draw_frame<W: Write>(
    surface: &mut TerminalSurface<W>,
    assets: &GlyphAtlas,
    engine: &Engine<StdRng>,
) -> anyhow::Result<()> {
    render(surface, assets, engine.state(), engine.config())?;
    display::draw_hud(surface.out(), engine.state())?;
    if let Some(notice) = engine.notice() {
        display::draw_notice(surface.out(), notice)?;
    }
    surface.out().flush()?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run one frame while the engine is `Running`.  Returns `false` when the
/// player asked to quit.
///
/// Every key press moves once; there is no held-key repeat beyond what the
/// terminal itself sends.
fn play_frame<W: Write>(
    surface: &mut TerminalSurface<W>,
    assets: &GlyphAtlas,
    engine: &mut Engine<StdRng>,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
) -> anyhow::Result<bool> {
    let frame_start = Instant::now();

    // ── Drain all pending input events (non-blocking) ─────────────────────────
    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(false),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(false),
            _ => {
                if let Some(direction) = direction_for(code) {
                    engine.handle_input(direction);
                }
            }
        }
    }

    engine.tick(Instant::now());
    draw_frame(surface, assets, engine)?;

    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        thread::sleep(frame - elapsed);
    }
    Ok(true)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    engine: &mut Engine<StdRng>,
    frame: Duration,
) -> anyhow::Result<()> {
    let mut surface = TerminalSurface::new(out);
    let mut assets = GlyphAtlas::default();
    assets.load(&Sprite::ALL)?;
    if assets.is_ready() {
        engine.assets_ready();
    }

    loop {
        match engine.phase() {
            Phase::AwaitingAssets => bail!("sprites did not finish loading"),
            Phase::AwaitingPlayerSelection => {
                draw_frame(&mut surface, &assets, engine)?;
                let current = engine.state().player.avatar;
                match prompt::choose_avatar(surface.out(), rx, current)? {
                    AvatarChoice::Pick(avatar) => engine.select_avatar(avatar, Instant::now()),
                    AvatarChoice::Quit => engine.quit(),
                }
            }
            Phase::Running => {
                if !play_frame(&mut surface, &assets, engine, rx, frame)? {
                    engine.quit();
                }
            }
            phase @ (Phase::Paused(_) | Phase::GameOver) => {
                draw_frame(&mut surface, &assets, engine)?;
                match prompt::ask(surface.out(), rx, phase)? {
                    Some(choice) => engine.resolve(choice),
                    None => engine.quit(),
                }
            }
            Phase::Terminated => break,
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame = Duration::from_secs_f64(1.0 / f64::from(cli.fps.max(1)));
    info!(seed = ?cli.seed, fps = cli.fps, "bug_crossing starting");

    let mut engine = Engine::new(config, rng);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events let us ignore releases explicitly; terminals
    // without the protocol only ever send presses.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                warn!(%err, "input reader stopped");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &mut engine, frame);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("bug_crossing exiting");
    result
}
