//! Process bootstrap: logging, the startup fetch, and the terminal loop

use coinwatch::app::{Action, App, Msg};
use coinwatch::constants::{DEFAULT_PAGE, DEFAULT_PER_PAGE, LOG_FILE};
use coinwatch::oplog::OpLog;
use coinwatch::provider::MarketDataProvider;
use coinwatch::providers::CoinGeckoProvider;
use coinwatch::ui;
use coinwatch::view::ViewState;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::error::Error;
use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Cadence of the spinner tick while no input is pending
const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing()?;

    let oplog = Arc::new(OpLog::open(LOG_FILE)?);
    let provider = CoinGeckoProvider::new(oplog.clone())?;

    // One synchronous fetch before the interactive loop; a failure here is
    // fatal rather than rendering an empty table.
    let records = match provider.get_records(DEFAULT_PAGE, DEFAULT_PER_PAGE).await {
        Ok(records) => records,
        Err(e) => {
            oplog.failure("startup_fetch", &e);
            tracing::error!(error = %e, "Startup fetch failed");
            eprintln!("Error fetching data: {}", e);
            std::process::exit(1);
        }
    };

    let app = App::new(ViewState::new(records, DEFAULT_PER_PAGE as usize));
    run_terminal(app)
}

/// Ambient tracing to the log file; level via RUST_LOG, default warn
fn init_tracing() -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}

/// Single-threaded cooperative event loop: each key, resize, or tick is
/// handled to completion before the next is read.
fn run_terminal(mut app: App) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, &mut app);

    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let mut status: Option<String> = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, app, status.as_deref()))?;

        let msg = if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => Msg::Key(key),
                Event::Resize(w, h) => Msg::Resize(w, h),
                _ => continue,
            }
        } else {
            Msg::Tick
        };

        match app.update(msg) {
            Action::Quit => return Ok(()),
            Action::Echo(line) => status = Some(line),
            Action::None => {}
        }
    }
}
