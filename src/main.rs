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
    time::{Duration, Instant},
};
use tubequiz::{
    app::{App, Command},
    app_dirs::AppDirs,
    backend::BackendClient,
    config::{Config, ConfigStore, FileConfigStore},
    dispatch::Dispatcher,
    input::Difficulty,
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
};

const TICK_RATE_MS: u64 = 100;

/// quizzes, notes and audio summaries for a video, in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal client for a video summary backend: generate a timed multiple-choice quiz, download lecture notes or fetch an audio summary for a YouTube link."
)]
pub struct Cli {
    /// backend base url
    #[clap(short = 'b', long)]
    backend: Option<String>,

    /// YouTube link to prefill
    #[clap(short = 'l', long)]
    link: Option<String>,

    /// default number of questions (5-20)
    #[clap(short = 'n', long)]
    questions: Option<u32>,

    /// default difficulty
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// folder for downloaded notes and audio
    #[clap(long)]
    download_dir: Option<PathBuf>,

    /// do not open the audio summary once it is saved
    #[clap(long)]
    no_auto_play: bool,

    /// save the effective settings to the config file and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    /// Overlay command line flags on the loaded config
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.backend {
            config.backend_url = url.clone();
        }
        if let Some(n) = self.questions {
            config.question_count = n;
        }
        if let Some(diff) = self.difficulty {
            config.difficulty = diff;
        }
        if let Some(dir) = &self.download_dir {
            config.download_dir = Some(dir.clone());
        }
        if self.no_auto_play {
            config.auto_play = false;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply(&mut config);

    if cli.write_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = match AppDirs::log_dir() {
        Some(dir) => match logging::init(&dir, &config.log_level) {
            Ok(guard) => Some(guard),
            Err(err) => {
                eprintln!("logging disabled: {err}");
                None
            }
        },
        None => None,
    };
    tracing::info!(backend = %config.backend_url, "starting");

    let rt = tokio::runtime::Runtime::new()?;
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let dispatcher = Dispatcher::new(
        rt.handle().clone(),
        BackendClient::new(config.backend_url.clone()),
        config.download_dir(),
        runner.sender(),
    );

    let mut app = App::new(config);
    if let Some(link) = cli.link {
        app.form.link = link;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner, &dispatcher);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<CrosstermEventSource, FixedTicker>,
    dispatcher: &Dispatcher,
) -> Result<(), Box<dyn Error>> {
    let mut last_tick = Instant::now();
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let command = match runner.step() {
            AppEvent::Tick => {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick);
                last_tick = now;
                if app.on_tick(elapsed) {
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
                None
            }
            AppEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                None
            }
            AppEvent::Key(key) => {
                let command = app.handle_key(key);
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                command
            }
            AppEvent::Backend(event) => {
                let command = app.handle_backend(event);
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                command
            }
        };

        match command {
            Some(Command::Quit) => break,
            Some(command) => dispatcher.dispatch(command),
            None => {}
        }
    }

    Ok(())
}
