//! TTODO - Terminal Todo
//!
//! A terminal todo list: browse the items, add new ones through a form and
//! delete the ones you are done with. Starts from a small sample set that
//! is loaded in the background while a spinner is shown.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};

use ttodo::application::{Action, App};
use ttodo::domain::IdPolicy;
use ttodo::infrastructure::{logging, Config, LoadStatus, SeedLoader};
use ttodo::presentation::{render_ui, InputHandler, ScreenLayout};

/// Terminal todo list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs here instead of the configured/default location
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Delay before the sample todos appear, in milliseconds
    #[arg(long)]
    load_delay_ms: Option<u64>,

    /// How new identifiers are chosen: follow-last or monotonic
    #[arg(long)]
    id_policy: Option<IdPolicy>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> anyhow::Result<(Config, u8)> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(log_file) = self.log_file {
            config.log_file = Some(log_file);
        }
        if let Some(delay) = self.load_delay_ms {
            config.load_delay_ms = delay;
        }
        if let Some(policy) = self.id_policy {
            config.id_policy = policy;
        }
        config.validate()?;
        Ok((config, self.verbose))
    }
}

fn main() -> anyhow::Result<()> {
    let (config, verbose) = Args::parse().into_config()?;

    let log_file = config.log_file();
    logging::init(&log_file, verbose).context("failed to set up logging")?;
    log::info!("ttodo {} starting", env!("CARGO_PKG_VERSION"));
    log::debug!("Config: {:?}", config);

    let loader = SeedLoader::spawn(config.load_delay()).context("failed to start seed loader")?;
    let mut app = App::new(config.id_policy);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, loader, config.tick_rate());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        log::error!("Event loop failed: {}", err);
    }
    log::info!("ttodo exiting with {} todos", app.todos.len());
    res.context("terminal I/O failed")
}

/// Turns a finished load into the action that makes the app ready.
///
/// A loader that went away without data still yields an empty list, so the
/// spinner never runs forever. Returns `None` while the load is pending.
fn seed_action(status: LoadStatus) -> Option<Action> {
    match status {
        LoadStatus::Pending => None,
        LoadStatus::Loaded(seed) => Some(Action::SeedLoaded(seed)),
        LoadStatus::Disconnected => {
            log::error!("Seed loader stopped without data, starting with an empty list");
            Some(Action::SeedLoaded(Vec::new()))
        }
    }
}

/// Main application event loop.
///
/// Redraws after every event or tick, hands the seed to the app once the
/// loader delivers it, and returns when the app asks to quit.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    loader: SeedLoader,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut input = InputHandler::default();
    let mut loader = Some(loader);
    let mut last_tick = Instant::now();

    loop {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        app.update_viewport_size(ScreenLayout::new(area).visible_rows());
        terminal.draw(|f| render_ui(f, app))?;

        if let Some(status) = loader.as_mut().map(SeedLoader::poll) {
            if let Some(action) = seed_action(status) {
                app.dispatch(action);
                loader = None;
            }
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let event = event::read()?;
            if let Some(action) = input.handle_event(app, &event, area) {
                app.dispatch(action);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.dispatch(Action::Tick);
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
