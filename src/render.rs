//! Pure projection of a `GameState` into something drawable.
//!
//! Geometry is in pixels (`cell * cell_size`), the way a fixed-size board
//! would be laid out on a canvas. Sprites also keep their grid cell so a
//! character-based back end can place them without dividing back.

use crate::snake::{Direction, Position};
use crate::state::GameState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpriteKind {
    Head(Direction),
    Body,
    Food,
    /// A segment of a snake that crashed.
    Dead,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub cell: Position,
    pub rect: Rect,
}

/// Shown on top of the board once the game is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub final_score: String,
    pub restart_label: &'static str,
}

impl Overlay {
    const HINT: &'static str = "Enter or click to restart, q to quit";

    pub fn lines(&self) -> Vec<&str> {
        vec![self.title, self.final_score.as_str(), "", self.restart_label, Self::HINT]
    }

    /// Index in `lines()` of the restart control.
    pub fn restart_line(&self) -> usize {
        3
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub board: Rect,
    /// Snake segments head first, then the food.
    pub sprites: Vec<Sprite>,
    pub score: String,
    pub overlay: Option<Overlay>,
}

pub fn render<R>(state: &GameState<R>, cell_size: u32) -> Scene {
    let side = state.grid_size() as u32 * cell_size;
    let crashed = state.is_game_over() && !state.is_won();

    let mut sprites: Vec<Sprite> = state
        .snake()
        .segments()
        .enumerate()
        .map(|(i, cell)| {
            let kind = match (crashed, i) {
                (true, _) => SpriteKind::Dead,
                (false, 0) => SpriteKind::Head(state.heading()),
                (false, _) => SpriteKind::Body,
            };
            sprite(kind, cell, cell_size)
        })
        .collect();

    if let Some(food) = state.food() {
        sprites.push(sprite(SpriteKind::Food, food, cell_size));
    }

    let overlay = state.is_game_over().then(|| Overlay {
        title: if state.is_won() { "You won!" } else { "Game Over!" },
        final_score: format!("Final Score: {}", state.score()),
        restart_label: "[ Play Again ]",
    });

    Scene {
        board: Rect { left: 0, top: 0, width: side, height: side },
        sprites,
        score: format!("Score: {}", state.score()),
        overlay,
    }
}

fn sprite(kind: SpriteKind, cell: Position, cell_size: u32) -> Sprite {
    let rect = Rect {
        left: cell.x as u32 * cell_size,
        top: cell.y as u32 * cell_size,
        width: cell_size,
        height: cell_size,
    };
    Sprite { kind, cell, rect }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Collision;
    use crate::state::TickOutcome;
    use rand::{rngs::StdRng, SeedableRng};

    fn new_state() -> GameState<StdRng> {
        GameState::with_rng(20, StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_opening_scene() {
        let scene = render(&new_state(), 20);

        assert_eq!(scene.board, Rect { left: 0, top: 0, width: 400, height: 400 });
        assert_eq!(scene.score, "Score: 0");
        assert!(scene.overlay.is_none());

        let kinds: Vec<SpriteKind> = scene.sprites.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SpriteKind::Head(Direction::Right),
                SpriteKind::Body,
                SpriteKind::Body,
                SpriteKind::Food,
            ]
        );
    }

    #[test]
    fn test_sprite_geometry() {
        let scene = render(&new_state(), 20);

        let head = scene.sprites[0];
        assert_eq!(head.cell, Position::new(10, 10));
        assert_eq!(head.rect, Rect { left: 200, top: 200, width: 20, height: 20 });

        let food = scene.sprites[3];
        assert_eq!(food.rect, Rect { left: 300, top: 300, width: 20, height: 20 });
    }

    #[test]
    fn test_head_turns_only_after_a_step() {
        let mut state = new_state();
        state.turn(Direction::Up);

        let scene = render(&state, 20);
        assert_eq!(scene.sprites[0].kind, SpriteKind::Head(Direction::Right));
        assert_eq!(scene.sprites[0].cell, Position::new(10, 10));

        state.tick();
        let scene = render(&state, 20);
        assert_eq!(scene.sprites[0].kind, SpriteKind::Head(Direction::Up));
        assert_eq!(scene.sprites[0].cell, Position::new(10, 9));
    }

    #[test]
    fn test_cell_size_scales_everything() {
        let scene = render(&new_state(), 8);

        assert_eq!(scene.board.width, 160);
        assert_eq!(scene.sprites[1].rect, Rect { left: 72, top: 80, width: 8, height: 8 });
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = new_state();
        state.turn(Direction::Up);
        while state.tick() != TickOutcome::Crashed(Collision::Wall) {}

        let scene = render(&state, 20);

        assert!(scene.sprites[..3].iter().all(|s| s.kind == SpriteKind::Dead));
        let overlay = scene.overlay.expect("overlay once the game is over");
        assert_eq!(overlay.title, "Game Over!");
        assert_eq!(overlay.final_score, "Final Score: 0");
        assert_eq!(overlay.lines()[overlay.restart_line()], "[ Play Again ]");
    }
}
