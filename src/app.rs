use std::{
    io::{self, stdout},
    panic, thread,
    time::Instant,
};

use clabirint::{algorithms::GenError, ConfigError, Session, SessionError};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use thiserror::Error;

use crate::{
    logging, render,
    settings::{ColorScheme, SettingsError},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Crossterm error: {0}")]
    CrosstermError(#[from] io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Cannot create maze: {0}")]
    Session(#[from] SessionError),
    #[error("Cannot generate maze: {0}")]
    Generation(#[from] GenError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NewMaze,
    Start,
    ToggleDebug,
    Quit,
}

impl Action {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('n') => Some(Action::NewMaze),
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::Start),
            KeyCode::Char('d') => Some(Action::ToggleDebug),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Raw mode and alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        Self::register_panic_hook();

        terminal::enable_raw_mode()?;
        execute!(stdout(), cursor::Hide, terminal::EnterAlternateScreen)?;

        Ok(TerminalGuard)
    }

    fn register_panic_hook() {
        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
            let _ = terminal::disable_raw_mode();

            prev(info)
        }));
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !thread::panicking() {
            let _ = panic::take_hook();
        }

        let _ = execute!(stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Terminal front-end: owns the timer and feeds key presses to the session.
pub struct App {
    session: Session,
    scheme: ColorScheme,
}

impl App {
    pub fn new(session: Session, scheme: ColorScheme) -> Self {
        Self { session, scheme }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies an action, returns `false` once the app should quit.
    pub fn handle(&mut self, action: Action) -> Result<bool, AppError> {
        match action {
            Action::NewMaze => self.session.new_maze()?,
            Action::Start => {
                if !self.session.start_search() {
                    log::debug!("search already started, press n for a new maze");
                }
            }
            Action::ToggleDebug => logging::get_logger().switch_debug(),
            Action::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        let _terminal = TerminalGuard::enter()?;
        let mut tty = stdout();
        let mut last_tick = Instant::now();

        loop {
            render::draw(&mut tty, &self.session, &self.scheme, logging::get_logger())?;

            let timeout = self.session.delay().saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(action) = Action::from_key(&key) {
                        if !self.handle(action)? {
                            break;
                        }
                        if action == Action::Start {
                            last_tick = Instant::now();
                        }
                    }
                }
            }

            if last_tick.elapsed() >= self.session.delay() {
                self.session.tick();
                last_tick = Instant::now();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clabirint::{search::SearchPhase, MazeConfig};
    use crossterm::event::KeyEventState;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn key_bindings() {
        assert_eq!(Action::from_key(&key(KeyCode::Char('n'))), Some(Action::NewMaze));
        assert_eq!(Action::from_key(&key(KeyCode::Enter)), Some(Action::Start));
        assert_eq!(Action::from_key(&key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(Action::from_key(&key(KeyCode::Char('x'))), None);
        assert_eq!(
            Action::from_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );

        let release = KeyEvent {
            code: KeyCode::Char('n'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Action::from_key(&release), None);
    }

    #[test]
    fn actions_drive_session() {
        let session = Session::new(MazeConfig::new().size(9).seed(Some(1))).unwrap();
        let mut app = App::new(session, ColorScheme::default());

        assert!(app.handle(Action::Start).unwrap());
        assert_eq!(app.session().phase(), SearchPhase::Running);

        assert!(app.handle(Action::NewMaze).unwrap());
        assert_eq!(app.session().phase(), SearchPhase::Idle);

        assert!(!app.handle(Action::Quit).unwrap());
    }
}
