use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    TogglePause,
    Quit,
    /// Left click at a terminal cell, for the restart control.
    Click { column: u16, row: u16 },
}

/// Maps a terminal event to a game command. Anything unrecognized is `None`.
pub fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => command_for_key(key),
        Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
            Some(Command::Click { column: *column, row: *row })
        }
        _ => None,
    }
}

pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(key) {
        return Some(Command::Quit);
    }

    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Turn(Right),
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };

    Some(cmd)
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
