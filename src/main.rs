use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::info;
use wordrush::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    language::Language,
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    word_source::ThreadedWordSource,
};

/// countdown typing test: type the generated words before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of seconds on the clock (overrides the saved setting)
    #[clap(short = 's', long)]
    secs: Option<u32>,

    /// number of words to generate (overrides the saved setting)
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// seed the word generator for reproducible word lists
    #[clap(long)]
    seed: Option<u64>,

    /// write logs here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        logging::init(&path)?;
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(secs) = cli.secs {
        config.duration_secs = secs;
    }
    if let Some(words) = cli.words {
        config.word_count = words;
    }
    if let Err(err) = config.session_config() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, err.to_string()).exit();
    }

    let events = CrosstermEventSource::new();
    let mut word_source = ThreadedWordSource::new(Language::english()?, events.sender());
    if let Some(seed) = cli.seed {
        word_source = word_source.with_seed(seed);
    }
    let mut app = App::new(config, Box::new(store), Box::new(word_source))?;
    let runner = Runner::new(events, FixedTicker::default());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("wordrush started");
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let mut drawn_revision = None;

    loop {
        if drawn_revision != Some(app.engine.revision()) {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            drawn_revision = Some(app.engine.revision());
        }

        let event = runner.step();
        let force_redraw = matches!(event, wordrush::runtime::AppEvent::Resize);
        if app.handle_event(event) == Control::Quit {
            break;
        }
        if force_redraw {
            drawn_revision = None;
        }
    }

    info!("wordrush exiting");
    Ok(())
}
