//! Terminal runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. Configuration comes from the
//! environment (see [`AppConfig::from_env`]).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use tera_tetris::core::{GameSnapshot, Session};
use tera_tetris::input::{handle_key_event, should_clear_scores, should_quit};
use tera_tetris::scores::{HighScoreRecord, JsonFileStore, ScoreStore};
use tera_tetris::term::{FrameBuffer, GameView, HudInfo, TerminalRenderer, Viewport};
use tera_tetris::types::{SessionEvent, SessionPhase, TICK_MS};
use tera_tetris::{ActivityLog, AppConfig};

/// Longest gameplay step fed to one tick (after a stall, e.g. a suspended terminal)
const MAX_TICK_MS: u32 = 250;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    let mut log = ActivityLog::default();
    if let Some(path) = &config.log_path {
        match ActivityLog::default().with_file(path) {
            Ok(file_log) => log = file_log,
            Err(e) => eprintln!("[tera-tetris] {e:#}"),
        }
    }

    let mut store = JsonFileStore::new(&config.scores_path);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut store, &mut log);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        eprintln!("[tera-tetris] failed to restore terminal: {e:#}");
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    store: &mut impl ScoreStore,
    log: &mut ActivityLog,
) -> Result<()> {
    let mut session = Session::new(config.game.clone());
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut top_scores: Vec<HighScoreRecord> = store.load_top_scores();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = HudInfo {
            player_name: &config.player_name,
            top_scores: &top_scores,
            log_lines: log.lines(),
        };
        view.render_into(&snap, &hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if should_clear_scores(key)
                        && matches!(session.phase(), SessionPhase::Idle | SessionPhase::GameOver)
                    {
                        clear_scores(store, &mut top_scores, log, session.elapsed_ms());
                        continue;
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let since = last_tick.elapsed();
        if since >= tick_duration {
            last_tick = Instant::now();
            let delta = (since.as_millis() as u32).min(MAX_TICK_MS);
            session.tick(delta);
        }

        for event in session.take_events() {
            log.record(session.elapsed_ms(), &event);
            if let SessionEvent::GameOver { final_score } = event {
                match store.submit_score(&config.player_name, final_score) {
                    Ok(list) => top_scores = list,
                    Err(e) => {
                        log.push(session.elapsed_ms(), &format!("Could not save score: {e:#}"))
                    }
                }
            }
        }
    }
}

fn clear_scores(
    store: &mut impl ScoreStore,
    top_scores: &mut Vec<HighScoreRecord>,
    log: &mut ActivityLog,
    at_ms: u64,
) {
    match store.clear() {
        Ok(()) => {
            top_scores.clear();
            log.push(at_ms, "High scores cleared");
        }
        Err(e) => log.push(at_ms, &format!("Could not clear scores: {e:#}")),
    }
}
