use rand::{rngs::ThreadRng, Rng};

use crate::config::{INITIAL_FOOD, INITIAL_SNAKE};
use crate::snake::{Collision, Direction, MoveResult, Position, Snake};

/// What a single tick did to the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was already over, nothing changed.
    Idle,
    Moved,
    Ate,
    Crashed(Collision),
    /// The snake ate the last free cell.
    BoardFilled,
}

/// The whole mutable game. Owns its random source so food placement can be seeded.
#[derive(Debug, Clone)]
pub struct GameState<R = ThreadRng> {
    rng: R,
    grid_size: i32,
    snake: Snake,
    // Used by the next tick.
    direction: Direction,
    // Used by the last tick.
    heading: Direction,
    food: Option<Position>,
    score: u32,
    game_over: bool,
}

impl GameState<ThreadRng> {
    pub fn new(grid_size: i32) -> Self {
        GameState::with_rng(grid_size, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    /// Opens with the fixed snake and the fixed first food.
    pub fn with_rng(grid_size: i32, rng: R) -> Self {
        GameState {
            rng,
            grid_size,
            snake: Snake::new(INITIAL_SNAKE.iter().copied()),
            direction: Direction::Right,
            heading: Direction::Right,
            food: Some(INITIAL_FOOD),
            score: 0,
            game_over: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        grid_size: i32,
        cells: &[(i32, i32)],
        direction: Direction,
        heading: Direction,
        food: Position,
        rng: R,
    ) -> Self {
        GameState {
            rng,
            grid_size,
            snake: Snake::new(cells.iter().copied().map(Position::from)),
            direction,
            heading,
            food: Some(food),
            score: 0,
            game_over: false,
        }
    }

    /// Back to the opening snake, with food placed at random this time.
    pub fn reset(&mut self) {
        self.snake = Snake::new(INITIAL_SNAKE.iter().copied());
        self.direction = Direction::Right;
        self.heading = Direction::Right;
        self.score = 0;
        self.game_over = false;
        self.food = self.spawn_food();
    }

    /// Queues a turn for the next tick. Reversals are refused, both against the
    /// queued direction and the one the snake last moved in.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.game_over
            || direction.is_opposite(self.direction)
            || direction.is_opposite(self.heading)
        {
            return false;
        }

        self.direction = direction;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Idle;
        }

        match self.snake.move_step(self.direction, self.grid_size) {
            MoveResult::Crashed(collision) => {
                self.game_over = true;
                TickOutcome::Crashed(collision)
            }
            MoveResult::Moved(new_head) => {
                self.heading = self.direction;
                if self.food != Some(new_head) {
                    self.snake.drop_tail();
                    return TickOutcome::Moved;
                }

                self.score += 1;
                self.food = self.spawn_food();
                if self.food.is_none() {
                    self.game_over = true;
                    return TickOutcome::BoardFilled;
                }
                TickOutcome::Ate
            }
        }
    }

    // Retries until a free cell comes up. Only a completely filled board has none.
    fn spawn_food(&mut self) -> Option<Position> {
        let cells = self.grid_size as usize * self.grid_size as usize;
        if self.snake.len() >= cells {
            return None;
        }

        loop {
            let pos = Position::new(
                self.rng.gen_range(0..self.grid_size),
                self.rng.gen_range(0..self.grid_size),
            );
            if !self.snake.contains(pos) {
                return Some(pos);
            }
        }
    }
}

impl<R> GameState<R> {
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The direction of the last step taken, which lags `direction` until the next tick.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.game_over && self.food.is_none()
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }
}
