use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use cyber_jeopardy::app::App;
use cyber_jeopardy::config::Config;
use cyber_jeopardy::{logging, ui};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env();
    logging::init(config.log_path.as_deref())?;
    let board = config.load_board()?;
    tracing::info!(
        categories = board.categories().len(),
        timer_secs = config.timer_secs,
        "starting session"
    );

    enable_raw_mode().context("failed enabling raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(err).context("failed entering alternate screen");
    }
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(board, &config);
    let res = run_app(&mut terminal, &mut app, config.tick_rate());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let game = &app.session.game;
    tracing::info!(
        score = game.score(),
        high_score = game.high_score(),
        games_played = game.games_played(),
        "session closed"
    );

    if let Err(err) = res {
        eprintln!("error: {err:#}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick_rate: Duration) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Redrawn every tick so a running countdown stays current without blocking input.
        terminal.draw(|f| ui::draw(f, app, Instant::now()))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key, Instant::now());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
