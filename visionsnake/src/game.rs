//! Snake rules, independent of any rendering
//!
//! A `GameSession` is advanced one cell per [`GameSession::tick`]. The board
//! is a torus: leaving one edge re-enters at the opposite one. Randomness
//! (food placement) is injected so games can be replayed from a seed.

use rand::Rng;
use std::collections::VecDeque;

/// Board side length, in cells.
pub const GRID_SIZE: i32 = 20;
/// Score at which the game is won.
pub const WIN_SCORE: u32 = 10;
/// Milliseconds between two moves.
pub const TICK_MS: u64 = 120;

const START_CELL: Cell = Cell { x: 5, y: 5 };
const START_FOOD: Cell = Cell { x: 10, y: 10 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self {
            x: (self.x + dx).rem_euclid(GRID_SIZE),
            y: (self.y + dy).rem_euclid(GRID_SIZE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Heading::Left | Heading::Right)
    }

    pub fn from_key(key: egui::Key) -> Option<Self> {
        match key {
            egui::Key::ArrowUp => Some(Heading::Up),
            egui::Key::ArrowDown => Some(Heading::Down),
            egui::Key::ArrowLeft => Some(Heading::Left),
            egui::Key::ArrowRight => Some(Heading::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    Won,
    Lost,
}

impl Status {
    pub fn is_over(self) -> bool {
        matches!(self, Status::Won | Status::Lost)
    }
}

/// What a tick produced, for the host to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened (paused or finished).
    Idle,
    Moved,
    Ate,
    /// The winning bite. Reported once per game.
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    /// Head first.
    body: VecDeque<Cell>,
    heading: Heading,
    food: Cell,
    score: u32,
    status: Status,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            body: VecDeque::from([START_CELL]),
            heading: Heading::Right,
            food: START_FOOD,
            score: 0,
            status: Status::Running,
        }
    }

    /// Build a session from an arbitrary position (head first).
    pub fn with_body(body: impl IntoIterator<Item = Cell>, heading: Heading, food: Cell) -> Self {
        let body: VecDeque<Cell> = body.into_iter().collect();
        Self {
            body: if body.is_empty() { VecDeque::from([START_CELL]) } else { body },
            heading,
            food,
            score: 0,
            status: Status::Running,
        }
    }

    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or(START_CELL)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Turn onto the other axis. Reversing or repeating the current axis is
    /// ignored. Returns whether the heading changed.
    pub fn set_heading(&mut self, heading: Heading) -> bool {
        if heading.is_horizontal() == self.heading.is_horizontal() {
            return false;
        }
        self.heading = heading;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            other => other,
        };
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Back to the opening position, food included.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Advance one cell.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if self.status != Status::Running {
            return TickOutcome::Idle;
        }

        let new_head = self.head().step(self.heading);

        // The tail is not checked: moving into the cell it is about to vacate is allowed
        let tail_free = self.body.len().saturating_sub(1);
        if self.body.iter().take(tail_free).any(|&c| c == new_head) {
            self.status = Status::Lost;
            return TickOutcome::Lost;
        }

        self.body.push_front(new_head);
        if new_head != self.food {
            self.body.pop_back();
            return TickOutcome::Moved;
        }

        self.score += 1;
        if self.score >= WIN_SCORE {
            self.status = Status::Won;
            return TickOutcome::Won;
        }
        self.food = self.random_free_cell(rng);
        TickOutcome::Ate
    }

    fn random_free_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let capacity = (GRID_SIZE * GRID_SIZE) as usize;
        if self.body.len() >= capacity {
            return self.head();
        }
        loop {
            let cell = Cell::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));
            if !self.body.contains(&cell) {
                return cell;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_initial_state() {
        let game = GameSession::new();
        assert_eq!(game.body().collect::<Vec<_>>(), vec![Cell::new(5, 5)]);
        assert_eq!(game.heading(), Heading::Right);
        assert_eq!(game.food(), Cell::new(10, 10));
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn test_heading_only_turns_onto_other_axis() {
        let mut game = GameSession::new();
        assert!(!game.set_heading(Heading::Left));
        assert!(!game.set_heading(Heading::Right));
        assert_eq!(game.heading(), Heading::Right);
        assert!(game.set_heading(Heading::Up));
        assert!(!game.set_heading(Heading::Down));
        assert_eq!(game.heading(), Heading::Up);
        assert!(game.set_heading(Heading::Left));
    }

    #[test]
    fn test_wraps_around_walls() {
        let mut game = GameSession::with_body([Cell::new(19, 0)], Heading::Right, Cell::new(10, 10));
        assert_eq!(game.tick(&mut rng()), TickOutcome::Moved);
        assert_eq!(game.head(), Cell::new(0, 0));

        let mut game = GameSession::with_body([Cell::new(3, 0)], Heading::Up, Cell::new(10, 10));
        game.tick(&mut rng());
        assert_eq!(game.head(), Cell::new(3, 19));
    }

    #[test]
    fn test_eating_grows_and_respawns_food_off_body() {
        let mut rng = rng();
        let mut game = GameSession::with_body([Cell::new(9, 10)], Heading::Right, Cell::new(10, 10));
        assert_eq!(game.tick(&mut rng), TickOutcome::Ate);
        assert_eq!(game.score(), 1);
        assert_eq!(game.len(), 2);
        assert!(!game.body().any(|c| c == game.food()));
        let food = game.food();
        assert!((0..GRID_SIZE).contains(&food.x) && (0..GRID_SIZE).contains(&food.y));
    }

    #[test]
    fn test_moving_into_tail_is_allowed() {
        // A 2x2 loop: the head steps into the cell the tail leaves
        let body = [Cell::new(5, 5), Cell::new(5, 6), Cell::new(6, 6), Cell::new(6, 5)];
        let mut game = GameSession::with_body(body, Heading::Right, Cell::new(0, 0));
        assert_eq!(game.tick(&mut rng()), TickOutcome::Moved);
        assert_eq!(game.head(), Cell::new(6, 5));
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn test_biting_body_loses() {
        let body = [
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
            Cell::new(7, 5),
        ];
        let mut game = GameSession::with_body(body, Heading::Right, Cell::new(0, 0));
        assert_eq!(game.tick(&mut rng()), TickOutcome::Lost);
        assert_eq!(game.status(), Status::Lost);
        assert_eq!(game.tick(&mut rng()), TickOutcome::Idle);
    }

    #[test]
    fn test_win_at_score_ten() {
        let mut rng = rng();
        let mut game = GameSession::with_body([Cell::new(0, 0)], Heading::Right, Cell::new(1, 0));
        game.set_score(WIN_SCORE - 1);
        assert_eq!(game.tick(&mut rng), TickOutcome::Won);
        assert_eq!(game.status(), Status::Won);
        assert_eq!(game.tick(&mut rng), TickOutcome::Idle);
        assert_eq!(game.score(), WIN_SCORE);
    }

    #[test]
    fn test_restart_after_loss() {
        let body = [
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
            Cell::new(7, 5),
        ];
        let mut game = GameSession::with_body(body, Heading::Right, Cell::new(3, 3));
        game.tick(&mut rng());
        assert_eq!(game.status(), Status::Lost);
        game.restart();
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.body().collect::<Vec<_>>(), vec![Cell::new(5, 5)]);
        assert_eq!(game.heading(), Heading::Right);
        assert_eq!(game.food(), Cell::new(10, 10));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_pause_freezes_ticks() {
        let mut game = GameSession::new();
        game.toggle_pause();
        assert_eq!(game.tick(&mut rng()), TickOutcome::Idle);
        assert_eq!(game.head(), Cell::new(5, 5));
        game.toggle_pause();
        assert_eq!(game.tick(&mut rng()), TickOutcome::Moved);
        assert_eq!(game.head(), Cell::new(6, 5));
    }
}
