mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::ThreadRng;
use rand::thread_rng;

use dino_runner::compute::{
    fire, init_state, jump, resize, restart, start, tick, toggle_flying, toggle_pause,
};
use dino_runner::config::{self, Config};
use dino_runner::entities::{GameState, GameStatus};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw alternate-screen mode, so log lines go to a file.
fn init_logging() {
    let path = std::env::temp_dir().join("dino_runner.log");
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".dino_runner_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    if let Err(e) = std::fs::write(high_score_path(), score.to_string()) {
        log::warn!("Could not save high score: {}", e);
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Map one key press to a state transition.  `None` means quit.
fn handle_key(
    state: &GameState,
    code: KeyCode,
    modifiers: KeyModifiers,
    rng: &mut ThreadRng,
) -> Option<GameState> {
    let next = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return None,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return None,
        KeyCode::Char(' ') => match state.status {
            GameStatus::Ready => start(state),
            GameStatus::GameOver => restart(state, rng),
            GameStatus::Playing => jump(state),
            GameStatus::Paused => state.clone(),
        },
        KeyCode::Char('p') | KeyCode::Char('P') => toggle_pause(state),
        KeyCode::Char('f') | KeyCode::Char('F') => toggle_flying(state),
        KeyCode::Enter => fire(state),
        _ => state.clone(),
    };
    Some(next)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-timestep loop: drain input, advance one tick, draw, sleep.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let frame = Duration::from_millis(state.config.frame_ms);
    let mut saved_high_score = state.high_score;

    loop {
        let frame_start = Instant::now();

        // Drain queued input without blocking.
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    ..
                }) => match handle_key(state, code, modifiers, &mut rng) {
                    Some(next) => *state = next,
                    None => {
                        if state.high_score > saved_high_score {
                            save_high_score(state.high_score);
                        }
                        return Ok(());
                    }
                },
                Event::Resize(width, height) => {
                    log::info!("Terminal resized to {}x{}", width, height);
                    *state = resize(state, width, height);
                }
                _ => {}
            }
        }

        *state = tick(state, &mut rng);

        if state.status == GameStatus::GameOver && state.high_score > saved_high_score {
            save_high_score(state.high_score);
            saved_high_score = state.high_score;
        }

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();
    let config = config::load_or_default(&config::config_path());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Blocking reads happen off the game loop; keys arrive over the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // game loop is gone
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config);

    // Restore the terminal even when the loop failed.
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: Config) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let mut rng = thread_rng();
    let mut state = init_state(config, width, height, load_high_score(), &mut rng);
    log::info!("Dino Runner starting on a {}x{} field", width, height);
    game_loop(out, &mut state, rx)
}
