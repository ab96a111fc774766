mod audio;
mod play_state;
mod ui;

use audio::TerminalBell;
use codetrail::build_info;
use codetrail::core::{APP_DIR_NAME, INPUT_POLL_MS};
use codetrail::{
    load_catalog, save_score_card, ActionError, Catalog, CatalogError, GameSession, QuizConfig,
    ScoreCard, SessionEvent,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use play_state::{apply_session_events, PlayState};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::splash_scene::{CatalogStatus, SplashScreen};

enum Screen {
    Splash,
    Quiz,
    Final,
}

/// What a key press asked the loop to do next.
enum Flow {
    Continue,
    Quit,
}

type CatalogLoad = JoinHandle<Result<Catalog, CatalogError>>;

struct App {
    config: QuizConfig,
    screen: Screen,
    splash: SplashScreen,
    catalog_status: CatalogStatus,
    catalog: Option<Arc<Catalog>>,
    loader: Option<CatalogLoad>,
    game: Option<GameSession>,
    play: PlayState,
    audio: TerminalBell,
    clock: Instant,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = QuizConfig::from_env();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("CodeTrail - Timed Terminal Quiz\n");
                println!("Usage: codetrail [LEVELS_PATH]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message\n");
                println!("Environment:");
                println!("  CODETRAIL_LEVELS            Levels file (default: levels.json)");
                println!("  CODETRAIL_TIME_LIMIT_SECS   Seconds per level (default: 120)");
                println!("  CODETRAIL_SCORE_DIR         Where score cards are saved");
                println!("  CODETRAIL_LOG_DIR           Where the log file is written");
                println!("  CODETRAIL_BELL              Ring the terminal bell on feedback");
                println!("  RUST_LOG                    Log filter (default: info)");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option: {}", flag);
                eprintln!("Run 'codetrail --help' for usage.");
                std::process::exit(1);
            }
            path => config.levels_path = PathBuf::from(path),
        }
    }

    if let Err(e) = setup_logging(&config) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    // Load levels in background so the splash screen is responsive
    let levels_path = config.levels_path.clone();
    let loader = std::thread::spawn(move || load_catalog(&levels_path));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App {
        audio: TerminalBell::new(config.bell),
        config,
        screen: Screen::Splash,
        splash: SplashScreen::new(),
        catalog_status: CatalogStatus::Loading,
        catalog: None,
        loader: Some(loader),
        game: None,
        play: PlayState::new(),
        clock: Instant::now(),
    };

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        poll_loader(app);

        let now = app.now_ms();
        if let Some(game) = app.game.as_mut() {
            let events = game.advance_clock(now);
            app.apply(&events);
        }
        app.play.toasts.tick(now);

        terminal.draw(|f| {
            let area = f.size();
            match app.screen {
                Screen::Splash => app.splash.draw(f, area, &app.catalog_status),
                Screen::Quiz => {
                    ui::quiz_scene::draw_quiz(f, area, &app.play, app.audio.music_playing())
                }
                Screen::Final => {
                    ui::final_scene::draw_final(f, area, &app.play, app.play.notice(now))
                }
            }
        })?;

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let flow = match app.screen {
                    Screen::Splash => handle_splash_key(app, key),
                    Screen::Quiz => handle_quiz_key(app, key),
                    Screen::Final => handle_final_key(app, key),
                };
                if let Flow::Quit = flow {
                    tracing::info!("player quit");
                    return Ok(());
                }
            }
        }
    }
}

/// Pick up the background catalog load once it has finished.
fn poll_loader(app: &mut App) {
    if !app.loader.as_ref().is_some_and(|h| h.is_finished()) {
        return;
    }
    let Some(handle) = app.loader.take() else {
        return;
    };
    match handle.join() {
        Ok(Ok(catalog)) => {
            app.catalog_status = CatalogStatus::Ready(catalog.len());
            app.catalog = Some(catalog.into_shared());
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "catalog load failed");
            app.catalog_status = CatalogStatus::Failed(e.to_string());
        }
        Err(_) => {
            tracing::error!("catalog loader thread panicked");
            app.catalog_status = CatalogStatus::Failed("loader crashed".to_string());
        }
    }
}

fn handle_splash_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Char(c) => app.splash.handle_char_input(c),
        KeyCode::Backspace => app.splash.handle_backspace(),
        KeyCode::Enter => {
            let name = app.splash.name().to_string();
            if let Err(e) = app.start_session(&name) {
                app.splash.validation_error = Some(e.to_string());
            }
        }
        KeyCode::Esc => return Flow::Quit,
        _ => {}
    }
    Flow::Continue
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) -> Flow {
    let now = app.now_ms();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let Some(game) = app.game.as_mut() else {
        return Flow::Continue;
    };

    let result = match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::F(2) => {
            app.audio.toggle_music();
            return Flow::Continue;
        }
        KeyCode::Char('s') | KeyCode::Char('S') if ctrl => game.skip(now),
        KeyCode::Tab => game.request_hint(now),
        KeyCode::Enter => {
            if app.play.is_multiple_choice() {
                game.submit_choice(app.play.selected_choice, now)
            } else {
                game.submit_answer(&app.play.answer_input, now)
            }
        }
        KeyCode::Up => {
            app.play.select_prev();
            return Flow::Continue;
        }
        KeyCode::Down => {
            app.play.select_next();
            return Flow::Continue;
        }
        KeyCode::Backspace => {
            app.play.answer_input.pop();
            return Flow::Continue;
        }
        KeyCode::Char(c) if !ctrl && !app.play.is_multiple_choice() => {
            if game.phase().accepts_input() {
                app.play.answer_input.push(c);
            }
            return Flow::Continue;
        }
        _ => return Flow::Continue,
    };

    match result {
        Ok(events) => app.apply(&events),
        Err(ActionError::NotAwaitingAnswer { phase }) => {
            tracing::debug!(%phase, "key ignored during feedback");
        }
        Err(e) => tracing::debug!(error = %e, "action rejected"),
    }
    Flow::Continue
}

fn handle_final_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') => app.export_score_card(),
        KeyCode::Char('p') | KeyCode::Char('P') => {
            let name = app
                .game
                .as_ref()
                .map(|g| g.session().player_name.clone())
                .unwrap_or_default();
            if let Err(e) = app.start_session(&name) {
                // Name or catalog went missing; fall back to the splash
                app.splash = SplashScreen::with_name(&name);
                app.splash.validation_error = Some(e.to_string());
                app.screen = Screen::Splash;
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
        _ => {}
    }
    Flow::Continue
}

impl App {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.clock.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn start_session(&mut self, name: &str) -> Result<(), codetrail::StartError> {
        let now = self.now_ms();
        let (game, events) =
            GameSession::start(name, self.catalog.clone(), self.config.clone(), now)?;
        self.play = PlayState::new();
        self.game = Some(game);
        self.screen = Screen::Quiz;
        self.apply(&events);
        Ok(())
    }

    fn apply(&mut self, events: &[SessionEvent]) {
        if events.is_empty() {
            return;
        }
        if apply_session_events(&mut self.play, events, &mut self.audio) {
            self.screen = Screen::Final;
        }
    }

    fn export_score_card(&mut self) {
        let now = self.now_ms();
        let Some(summary) = self.play.summary.as_ref() else {
            return;
        };
        let card = ScoreCard::from_summary(summary);
        let notice = match save_score_card(&card, self.config.score_card_dir.as_deref()) {
            Ok(path) => format!("Score card saved to {}", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "score card export failed");
                format!("Could not save score card: {}", e)
            }
        };
        self.play.set_notice(notice, now);
    }
}

/// Log to a file only; the alternate screen owns stdout.
fn setup_logging(config: &QuizConfig) -> io::Result<()> {
    let log_dir = config
        .log_dir
        .clone()
        .or_else(|| dirs::data_local_dir().map(|d| d.join(APP_DIR_NAME).join("logs")))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME).join("logs"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "codetrail.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process
    std::mem::forget(guard);

    tracing::info!(version = %build_info::version_line(), "logging initialized");
    tracing::info!("Log file: {}/codetrail.log", log_dir.display());
    Ok(())
}
