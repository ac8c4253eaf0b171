use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use skytype::{
    config::{Config, ConfigStore, FileConfigStore},
    content::WordBank,
    difficulty::Difficulty,
    game::Game,
    highscore::ScoreFile,
    match_policy,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    ui, TICK_RATE_MS,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// terminal balloon-pop typing game
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Balloons rise through the terminal carrying letters or words. Type them before they float away; five misses and the round is over."
)]
pub struct Cli {
    /// difficulty to start playing immediately, skipping the menu
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Difficulty>,

    /// remove all stored high scores and exit
    #[clap(long)]
    clear_scores: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Home,
    Playing,
    GameOver,
}

pub struct App {
    pub state: AppState,
    pub selected: Difficulty,
    pub game: Option<Game>,
    /// Cached per-mode bests for the menu; re-read when a session ends.
    pub bests: Vec<(Difficulty, u32)>,
    scores: Option<ScoreFile>,
    config_store: FileConfigStore,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let config_store = FileConfigStore::new();
        let scores = ScoreFile::new();
        let selected = cli.mode.unwrap_or_else(|| config_store.load().last_mode);

        let mut app = Self {
            state: AppState::Home,
            selected,
            game: None,
            bests: Vec::new(),
            scores,
            config_store,
        };
        app.refresh_bests();
        if cli.mode.is_some() {
            app.start_game();
        }
        app
    }

    fn refresh_bests(&mut self) {
        self.bests = Difficulty::ALL
            .iter()
            .map(|mode| {
                let best = self
                    .scores
                    .as_ref()
                    .map(|store| store.best_for(*mode))
                    .unwrap_or(0);
                (*mode, best)
            })
            .collect();
    }

    pub fn start_game(&mut self) {
        let _ = self.config_store.save(&Config {
            last_mode: self.selected,
        });
        self.game = Some(Game::new(
            self.selected,
            Box::new(WordBank::new()),
            self.scores.clone(),
        ));
        self.state = AppState::Playing;
    }

    /// Drop the session and return to the menu. Dropping the game takes its
    /// cadences and pending pops with it.
    pub fn go_home(&mut self) {
        self.game = None;
        self.refresh_bests();
        self.state = AppState::Home;
    }

    fn select_previous(&mut self) {
        let idx = Difficulty::ALL
            .iter()
            .position(|m| *m == self.selected)
            .unwrap_or(0);
        self.selected = Difficulty::ALL[idx.saturating_sub(1)];
    }

    fn select_next(&mut self) {
        let idx = Difficulty::ALL
            .iter()
            .position(|m| *m == self.selected)
            .unwrap_or(0);
        self.selected = Difficulty::ALL[(idx + 1).min(Difficulty::ALL.len() - 1)];
    }

    fn best_for(&self, mode: Difficulty) -> u32 {
        self.bests
            .iter()
            .find(|(m, _)| *m == mode)
            .map(|(_, s)| *s)
            .unwrap_or(0)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.clear_scores {
        if let Some(store) = ScoreFile::new() {
            store.clear();
        }
        println!("high scores cleared");
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            GameEvent::Tick => {
                if app.state == AppState::Playing {
                    if let Some(game) = app.game.as_mut() {
                        game.on_tick();
                        if !game.is_active() {
                            app.state = AppState::GameOver;
                            app.refresh_bests();
                        }
                    }
                }
            }
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Route one key press for the current screen. Returns true to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.state {
        AppState::Home => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => app.select_previous(),
            KeyCode::Down => app.select_next(),
            KeyCode::Enter => app.start_game(),
            KeyCode::Char('1') => {
                app.selected = Difficulty::Easy;
                app.start_game();
            }
            KeyCode::Char('2') => {
                app.selected = Difficulty::Medium;
                app.start_game();
            }
            KeyCode::Char('3') => {
                app.selected = Difficulty::Hard;
                app.start_game();
            }
            _ => {}
        },
        AppState::Playing => match key.code {
            KeyCode::Esc => app.go_home(),
            KeyCode::Char(c) => {
                if let Some(game) = app.game.as_mut() {
                    match_policy::on_key(game, c);
                }
            }
            _ => {}
        },
        AppState::GameOver => match key.code {
            KeyCode::Char('r') => {
                if let Some(game) = app.game.as_mut() {
                    game.restart();
                    app.state = AppState::Playing;
                }
            }
            KeyCode::Char('h') | KeyCode::Enter => app.go_home(),
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        },
    }

    false
}

fn ui(app: &App, f: &mut Frame) {
    match app.state {
        AppState::Home => ui::render_home(f, app.selected, &app.bests),
        AppState::Playing => {
            if let Some(game) = &app.game {
                f.render_widget(game, f.area());
            }
        }
        AppState::GameOver => {
            if let Some(game) = &app.game {
                let best = app.best_for(game.mode);
                ui::render_game_over(f, game, best);
            }
        }
    }
}
