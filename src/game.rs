use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};

use crate::config::GameConfig;
use crate::input::{command_for, command_for_key, Command};
use crate::render::render;
use crate::session::{Session, Update};
use crate::term::{BoardLayout, TermManager};

// How long to block on input while no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One run of the game in the terminal. The rules and the tick timer live in `Session`.
pub struct SnakeGame {
    config: GameConfig,
    term: TermManager,
    layout: BoardLayout,
    session: Session,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let term = TermManager::new().context("failed to read terminal size")?;
        let (w, h) = term.get_terminal_size();
        let layout = u16::try_from(config.grid_size)
            .ok()
            .and_then(|grid| BoardLayout::fit(grid, w, h))
            .ok_or_else(|| {
                anyhow!("terminal is {0}x{1}, too small for a {2}x{2} board", w, h, config.grid_size)
            })?;

        Ok(SnakeGame { session: Session::new(&config), config, term, layout })
    }

    /// Runs until the player quits. The terminal is restored on every way out.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("failed to set up terminal")?;

        let result = self.play();
        let restored = self.term.restore().context("failed to restore terminal");

        result.and(restored)
    }

    fn play(&mut self) -> Result<()> {
        if self.show_intro()? == Flow::Quit {
            return Ok(());
        }

        self.term.clear()?;
        self.term.draw_borders(&self.layout)?;
        self.redraw()?;
        self.session.start(Instant::now());

        loop {
            let wait = self.session.timeout(Instant::now()).unwrap_or(IDLE_POLL);

            for event in self.term.read_events(wait)? {
                let cmd = match command_for(&event) {
                    Some(Command::Click { column, row }) => {
                        if !self.term.hits_message_action((column, row)) {
                            continue;
                        }
                        Command::Restart
                    }
                    Some(cmd) => cmd,
                    None => continue,
                };

                let update = self.session.apply(cmd, Instant::now());
                if self.show(update)? == Flow::Quit {
                    return Ok(());
                }
            }

            let update = self.session.poll_tick(Instant::now());
            self.show(update)?;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc or P to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ];

        self.term.show_message(lines, None)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        match command_for_key(&key) {
            Some(Command::Quit) => Ok(Flow::Quit),
            _ => Ok(Flow::Continue),
        }
    }

    fn show(&mut self, update: Update) -> Result<Flow> {
        match update {
            Update::Nothing => {}
            Update::Redraw => self.redraw()?,
            Update::Restarted => {
                self.term.hide_message()?;
                self.redraw()?;
            }
            Update::Paused => {
                self.term.show_message(&["Paused", "Press Esc to resume", "or Q to quit"], None)?
            }
            Update::Resumed => self.term.hide_message()?,
            Update::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn redraw(&mut self) -> Result<()> {
        let scene = render(self.session.state(), self.config.cell_size);
        self.term.draw_scene(&self.layout, &scene)?;

        if let Some(overlay) = &scene.overlay {
            let lines = overlay.lines();
            self.term.show_message(&lines, Some(overlay.restart_line()))?;
        }
        Ok(())
    }
}
