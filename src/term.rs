use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal, Result};

use crate::render::{Scene, SpriteKind};
use crate::snake::{Direction::*, Position};
use crate::Coords;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

// Terminal characters are about twice as tall as they are wide.
const COLUMNS_PER_CELL: u16 = 2;

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
    action_row: Option<u16>,
}

/// Where the board sits on screen. The score line goes right above the frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    frame_top_left: Coords,
    grid_size: u16,
}

impl BoardLayout {
    /// Centres a board in a `width` x `height` terminal, `None` if it does not fit.
    pub fn fit(grid_size: u16, width: u16, height: u16) -> Option<Self> {
        let frame_w = grid_size.checked_mul(COLUMNS_PER_CELL)?.checked_add(2)?;
        // Frame plus the score line.
        let needed_h = grid_size.checked_add(3)?;
        if frame_w > width || needed_h > height {
            return None;
        }

        let left = (width - frame_w) / 2;
        let top = (height - needed_h) / 2 + 1;
        Some(BoardLayout { frame_top_left: (left, top), grid_size })
    }

    pub fn frame_size(&self) -> Coords {
        (self.grid_size * COLUMNS_PER_CELL + 2, self.grid_size + 2)
    }

    pub fn score_pos(&self) -> Coords {
        (self.frame_top_left.0, self.frame_top_left.1 - 1)
    }

    /// Screen position of the left column of a board cell.
    pub fn cell_pos(&self, cell: Position) -> Coords {
        let (left, top) = self.frame_top_left;
        (left + 1 + cell.x as u16 * COLUMNS_PER_CELL, top + 1 + cell.y as u16)
    }
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Show,
            cursor::EnableBlinking,
            DisableMouseCapture,
            LeaveAlternateScreen
        )
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Waits up to `timeout` for the first event, then drains whatever else is queued.
    pub fn read_events(&self, timeout: Duration) -> Result<Vec<Event>> {
        let mut events = vec![];

        if poll(timeout)? {
            events.push(read()?);
            while poll(Duration::from_millis(0))? {
                events.push(read()?);
            }
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self, layout: &BoardLayout) -> Result<()> {
        let (left, top) = layout.frame_top_left;
        let (width, height) = layout.frame_size();
        let (end_x, end_y) = (left + width - 1, top + height - 1);

        for x in left..=end_x {
            let ch = if x == left || x == end_x { '+' } else { '-' };
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    /// Repaints the score line and every board cell. Overlays are shown separately.
    pub fn draw_scene(&mut self, layout: &BoardLayout, scene: &Scene) -> Result<()> {
        let (width, _) = layout.frame_size();
        let score = format!("{:<width$}", scene.score, width = width as usize);
        self.print_str(layout.score_pos(), &score)?;

        for y in 0..layout.grid_size as i32 {
            for x in 0..layout.grid_size as i32 {
                self.print_cell(layout, Position::new(x, y), ' ')?;
            }
        }

        for sprite in &scene.sprites {
            let ch = match sprite.kind {
                SpriteKind::Head(Up) => '^',
                SpriteKind::Head(Down) => 'v',
                SpriteKind::Head(Left) => '<',
                SpriteKind::Head(Right) => '>',
                SpriteKind::Body => SNAKE_BODY_CHAR,
                SpriteKind::Food => FOOD_CHAR,
                SpriteKind::Dead => DEAD_SNAKE_CHAR,
            };
            self.print_cell(layout, sprite.cell, ch)?;
        }

        self.flush()
    }

    /// Shows a centred box. `action_line` marks the line a click should act on.
    pub fn show_message(&mut self, lines: &[&str], action_line: Option<usize>) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Top and bottom padding rows
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{: ^width$}", line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        let action_row = action_line.map(|i| top_left.1 + i as u16 + 1);
        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height, action_row });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back what the box covered
        let (left, top) = msg.top_left;
        for y in top..top + msg.height {
            for x in left..left + msg.width {
                if let Some(&ch) = self.screen.get(self.index((x, y))) {
                    self.print_at_no_save((x, y), ch)?;
                }
            }
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    /// Whether a click at `pos` lands on the action line of the current message.
    pub fn hits_message_action(&self, pos: Coords) -> bool {
        match &self.current_msg {
            Some(msg) => {
                let (left, _) = msg.top_left;
                msg.action_row == Some(pos.1) && (left..left + msg.width).contains(&pos.0)
            }
            None => false,
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_cell(&mut self, layout: &BoardLayout, cell: Position, ch: char) -> Result<()> {
        let (x, y) = layout.cell_pos(cell);
        for dx in 0..COLUMNS_PER_CELL {
            self.print_at((x + dx, y), ch)?;
        }
        Ok(())
    }

    fn print_str(&mut self, pos: Coords, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as u16, pos.1), ch)?;
        }
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        let idx = self.index(pos);
        if let Some(cell) = self.screen.get_mut(idx) {
            *cell = ch;
        }
        Ok(())
    }

    // Used for message boxes, so the screen buffer keeps what is underneath.
    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn index(&self, pos: Coords) -> usize {
        self.width as usize * pos.1 as usize + pos.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_fits_and_is_centred() {
        let layout = BoardLayout::fit(20, 80, 24).unwrap();

        assert_eq!(layout.frame_size(), (42, 22));
        assert_eq!(layout.frame_top_left, (19, 1));
        assert_eq!(layout.score_pos(), (19, 0));
    }

    #[test]
    fn test_board_too_large() {
        assert_eq!(BoardLayout::fit(20, 41, 24), None);
        assert_eq!(BoardLayout::fit(20, 80, 22), None);
        assert!(BoardLayout::fit(20, 42, 23).is_some());
    }

    #[test]
    fn test_cell_positions() {
        let layout = BoardLayout::fit(20, 42, 23).unwrap();

        assert_eq!(layout.cell_pos(Position::new(0, 0)), (1, 2));
        assert_eq!(layout.cell_pos(Position::new(19, 19)), (39, 21));
    }
}
