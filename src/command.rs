use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// A player action, decoded from terminal input
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    /// Pause a running game or resume a paused one
    Pause,
    /// Pause a running game, but never resume
    Blur,
    /// Toggle whether the grid edges are deadly
    Walls,
}

impl Command {
    pub(crate) fn from_event(event: &Event) -> Option<Command> {
        match event {
            Event::FocusLost => Some(Command::Blur),
            _ => Command::from_key_event(event.as_key_press_event()?),
        }
    }

    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Char('p')) => Some(Command::Pause),
            (KeyModifiers::NONE, KeyCode::Char('w')) => Some(Command::Walls),
            _ => None,
        }
    }
}
