use std::collections::VecDeque;

use Direction::*;
use MoveResult::*;

/// A cell on the board. Signed so a head that just left the board is still representable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn is_within(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Moved(Position),
    Crashed(Collision),
}

/// Body segments, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new<I: IntoIterator<Item = Position>>(segments: I) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Pushes a new head one cell ahead. The whole current body, tail included,
    /// counts as an obstacle. The tail stays until `drop_tail`.
    pub fn move_step(&mut self, direction: Direction, grid_size: i32) -> MoveResult {
        let new_head = self.head().step(direction);

        if !new_head.is_within(grid_size) {
            return Crashed(Collision::Wall);
        }
        if self.contains(new_head) {
            return Crashed(Collision::SelfCollision);
        }

        self.body.push_front(new_head);
        Moved(new_head)
    }

    pub fn drop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(cells: &[(i32, i32)]) -> Snake {
        Snake::new(cells.iter().copied().map(Position::from))
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Up.delta(), (0, -1));
        assert_eq!(Down.delta(), (0, 1));
        assert_eq!(Left.delta(), (-1, 0));
        assert_eq!(Right.delta(), (1, 0));
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn test_move_then_drop_tail() {
        let mut snake = snake_at(&[(10, 10), (9, 10), (8, 10)]);

        assert_eq!(snake.move_step(Right, 20), Moved(Position::new(11, 10)));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.drop_tail(), Some(Position::new(8, 10)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_single_segment_keeps_its_head() {
        let mut snake = snake_at(&[(3, 3)]);

        assert_eq!(snake.drop_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_wall_collision_leaves_body_untouched() {
        let mut snake = snake_at(&[(19, 5), (18, 5)]);
        let before = snake.clone();

        assert_eq!(snake.move_step(Right, 20), Crashed(Collision::Wall));
        assert_eq!(snake, before);

        let mut snake = snake_at(&[(0, 0), (1, 0)]);
        assert_eq!(snake.move_step(Up, 20), Crashed(Collision::Wall));
        assert_eq!(snake.move_step(Left, 20), Crashed(Collision::Wall));
    }

    #[test]
    fn test_tail_counts_as_obstacle() {
        // A 2x2 loop: moving into the tail cell is still a crash.
        let mut snake = snake_at(&[(5, 5), (5, 6), (6, 6), (6, 5)]);

        assert_eq!(snake.move_step(Right, 20), Crashed(Collision::SelfCollision));
    }
}
