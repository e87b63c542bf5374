pub mod app;
pub mod cli;
pub mod config;
pub mod events;
pub mod logging;
pub mod ui;

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flashdeck_core::match_game::TICK_MILLIS;
use flashdeck_core::FlashcardSet;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::App;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::events::{spawn_input_reader, sync_ticker};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(&cli);
    logging::init(&config.log_file)?;
    tracing::info!(file = %config.data_path.display(), "starting flashdeck");

    let set = flashdeck_core::load(&config.data_path)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;

    match cli.command.unwrap_or(Command::Study) {
        Command::Study => study(Arc::new(set), &config).await,
        Command::Export { out } => {
            let path = flashdeck_core::write_csv(&set, &out)?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Show => {
            println!("{}", serde_json::to_string_pretty(&set)?);
            Ok(())
        }
    }
}

async fn study(set: Arc<FlashcardSet>, config: &Config) -> anyhow::Result<()> {
    let mut app = App::new(set, config.mode, config.export_dir.clone(), config.seed)?;

    chain_panic_hook(|| {
        let _ = restore_terminal();
    });
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    tracing::info!("study session ended");
    res
}

/// Leave raw mode and the alternate screen.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )
}

/// Run `restore` on panic, then hand over to the previously installed hook.
fn chain_panic_hook(restore: impl Fn() + Send + Sync + 'static) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _reader = spawn_input_reader(tx.clone());
    let mut ticker = None;
    let period = Duration::from_millis(TICK_MILLIS);

    loop {
        sync_ticker(&mut ticker, app.needs_ticker(), &tx, period);
        terminal.draw(|f| {
            app.resize(f.area());
            ui::draw(f, app);
        })?;

        let Some(event) = rx.recv().await else {
            break;
        };
        app.handle_event(event)?;
        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
