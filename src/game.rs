use std::cmp::max;

use crate::point::Point;
use crate::snake::{Direction, Snake};

use log::{debug, info};
use rand::{rngs::StdRng, Rng};

/// Fixed geometry of the board, in logical units. Spawning and boundary
/// collision both read their margins from here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
    pub step: i32,
    pub left: i32,
    pub top: i32,
    pub right_margin: i32,
    pub bottom_margin: i32,
}

pub const PLAYFIELD: Playfield = Playfield {
    width: 760,
    height: 520,
    step: 10,
    left: 20,
    top: 40,
    right_margin: 10,
    bottom_margin: 30,
};

impl Playfield {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    pub fn columns(&self) -> i32 {
        self.width / self.step
    }

    pub fn rows(&self) -> i32 {
        self.height / self.step
    }

    /// Whether a head at `p` is strictly inside the border.
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.left
            && p.x < self.width + self.right_margin
            && p.y > self.top
            && p.y < self.height + self.bottom_margin
    }

    fn random_cell<R: Rng>(&self, rng: &mut R) -> Point {
        Point::new(
            rng.gen_range(0..self.columns()) * self.step + self.left,
            rng.gen_range(0..self.rows()) * self.step + self.top,
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Everything the host may ask of the game. Raw keys are classified into
/// this set before they get here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    StartOrResume,
    TogglePause,
    Restart,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

pub struct Game {
    playfield: Playfield,
    snake: Snake,
    food: Option<Point>,
    score: u32,
    best: u32,
    status: Status,
    collision: Option<Collision>,
    rng: StdRng,
}

impl Game {
    pub fn new(rng: StdRng) -> Self {
        let playfield = PLAYFIELD;
        let center = playfield.center();

        Game {
            playfield,
            snake: Snake::new(center.x, center.y),
            food: None,
            score: 0,
            best: 0,
            status: Status::NotStarted,
            collision: None,
            rng,
        }
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Why the last game ended, if it did.
    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub fn handle(&mut self, command: Command) {
        if self.status == Status::NotStarted {
            self.set_status(Status::Running);
            return;
        }

        match command {
            Command::Turn(direction) => {
                if self.status == Status::Running && self.snake.turn(direction) {
                    debug!("Turned {:?}", direction);
                }
            }
            Command::StartOrResume => {
                if self.status == Status::Paused {
                    self.set_status(Status::Running);
                }
            }
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => {
                if self.status == Status::GameOver {
                    self.reset();
                }
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            Status::Running => self.set_status(Status::Paused),
            Status::Paused => self.set_status(Status::Running),
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        let center = self.playfield.center();

        self.score = 0;
        self.food = None;
        self.collision = None;
        self.snake = Snake::new(center.x, center.y);
        self.set_status(Status::Running);
    }

    /// Advances the game by one step. Does nothing unless running.
    pub fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }

        let step = self.playfield.step;
        self.snake.advance(step);

        if let Some(food) = self.food {
            if self.snake.head().near(&food, step) {
                self.snake.grow();
                self.food = None;
                self.score += 1;
                debug!("Ate food at {:?}, score {}", food, self.score);
            }
        }

        if self.food.is_none() {
            let food = self.playfield.random_cell(&mut self.rng);
            debug!("Spawned food at {:?}", food);
            self.food = Some(food);
        }

        if let Some(collision) = self.check_collision() {
            info!("Game over ({:?}) at {:?} with score {}", collision, self.snake.head(), self.score);
            self.collision = Some(collision);
            self.set_status(Status::GameOver);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn check_collision(&self) -> Option<Collision> {
        let head = self.snake.head();

        if !self.playfield.contains(head) {
            Some(Collision::Wall)
        } else if self.snake.tail().contains(&head) {
            Some(Collision::Body)
        } else {
            None
        }
    }

    fn set_status(&mut self, status: Status) {
        if matches!(status, Status::Paused | Status::GameOver) {
            self.best = max(self.best, self.score);
        }

        info!("{:?} -> {:?}", self.status, status);
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::SeedableRng;

    fn running_game() -> Game {
        let mut game = Game::new(StdRng::seed_from_u64(7));
        game.handle(Command::StartOrResume);
        game
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(StdRng::seed_from_u64(1));
        assert_eq!(game.status(), Status::NotStarted);
        assert_eq!(game.score(), 0);
        assert_eq!(game.best(), 0);
        assert_eq!(game.food(), None);
        assert_eq!(game.snake().head(), Point::new(380, 260));
    }

    #[test]
    fn test_any_command_starts() {
        let mut game = Game::new(StdRng::seed_from_u64(1));
        game.handle(Command::Turn(Up));
        assert_eq!(game.status(), Status::Running);
        // The starting key is not also applied as a turn
        assert_eq!(game.snake().direction(), Right);
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut game = Game::new(StdRng::seed_from_u64(1));
        game.tick();
        assert_eq!(game.snake().head(), Point::new(380, 260));
        assert_eq!(game.food(), None);

        game.handle(Command::StartOrResume);
        game.toggle_pause();
        game.tick();
        assert_eq!(game.snake().head(), Point::new(380, 260));
    }

    #[test]
    fn test_tick_moves_and_spawns_food() {
        let mut game = running_game();
        game.tick();

        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.snake().head(), Point::new(390, 260));
        let food = game.food().unwrap();
        assert_eq!((food.x - 20) % 10, 0);
        assert_eq!((food.y - 40) % 10, 0);
        assert!(food.x >= 20 && food.x < 780);
        assert!(food.y >= 40 && food.y < 560);
    }

    #[test]
    fn test_food_pickup() {
        let mut game = running_game();
        game.food = Some(Point::new(395, 265));
        let before = game.snake().tail().len();

        game.tick();

        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().tail().len(), before + 1);
        // Eaten and respawned within the same tick
        assert!(game.food().is_some());
        assert_ne!(game.food(), Some(Point::new(395, 265)));
    }

    #[test]
    fn test_food_out_of_reach_stays() {
        let mut game = running_game();
        game.food = Some(Point::new(420, 260));

        game.tick();

        assert_eq!(game.score(), 0);
        assert_eq!(game.food(), Some(Point::new(420, 260)));
        assert_eq!(game.snake().tail().len(), 3);
    }

    #[test]
    fn test_self_collision() {
        let mut game = running_game();
        game.snake = Snake::with_tail(
            Point::new(100, 100),
            Up,
            vec![
                Point::new(110, 100),
                Point::new(110, 90),
                Point::new(100, 90),
                Point::new(90, 90),
            ],
        );
        game.food = Some(Point::new(500, 500));

        game.tick();

        assert_eq!(game.snake().head(), Point::new(100, 90));
        assert_eq!(game.status(), Status::GameOver);
        assert_eq!(game.collision(), Some(Collision::Body));
    }

    #[test]
    fn test_near_tail_is_not_a_collision() {
        let mut game = running_game();
        game.snake = Snake::with_tail(
            Point::new(100, 100),
            Up,
            vec![Point::new(110, 100), Point::new(110, 90)],
        );
        game.food = Some(Point::new(500, 500));

        game.tick();

        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn test_wall_collision_each_side() {
        let cases = [
            (Point::new(30, 100), Left),
            (Point::new(760, 100), Right),
            (Point::new(100, 50), Up),
            (Point::new(100, 540), Down),
        ];

        for &(head, direction) in cases.iter() {
            let mut game = running_game();
            game.snake = Snake::with_tail(head, direction, vec![]);
            game.food = Some(Point::new(400, 300));

            game.tick();

            assert_eq!(game.status(), Status::GameOver, "{:?} {:?}", head, direction);
            assert_eq!(game.collision(), Some(Collision::Wall));
        }
    }

    #[test]
    fn test_inside_border_is_safe() {
        let field = PLAYFIELD;
        assert!(field.contains(Point::new(30, 50)));
        assert!(field.contains(Point::new(760, 540)));
        assert!(!field.contains(Point::new(20, 100)));
        assert!(!field.contains(Point::new(770, 100)));
        assert!(!field.contains(Point::new(100, 40)));
        assert!(!field.contains(Point::new(100, 550)));
    }

    #[test]
    fn test_turn_only_while_running() {
        let mut game = running_game();
        game.toggle_pause();
        game.handle(Command::Turn(Up));
        assert_eq!(game.snake().direction(), Right);

        game.handle(Command::TogglePause);
        game.handle(Command::Turn(Up));
        assert_eq!(game.snake().direction(), Up);
    }

    #[test]
    fn test_pause_records_best() {
        let mut game = running_game();
        game.score = 4;

        game.handle(Command::TogglePause);
        assert_eq!(game.status(), Status::Paused);
        assert_eq!(game.best(), 4);

        game.handle(Command::StartOrResume);
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn test_toggle_pause_ignored_when_over() {
        let mut game = running_game();
        game.snake = Snake::with_tail(Point::new(30, 100), Left, vec![]);
        game.tick();
        assert_eq!(game.status(), Status::GameOver);

        game.handle(Command::TogglePause);
        assert_eq!(game.status(), Status::GameOver);
        game.handle(Command::StartOrResume);
        assert_eq!(game.status(), Status::GameOver);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut game = running_game();
        game.score = 2;
        game.handle(Command::Restart);
        assert_eq!(game.score(), 2);

        game.snake = Snake::with_tail(Point::new(30, 100), Left, vec![]);
        game.tick();
        assert_eq!(game.status(), Status::GameOver);

        game.handle(Command::Restart);
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.food(), None);
        assert_eq!(game.collision(), None);
        assert_eq!(game.snake().head(), Point::new(380, 260));
        assert_eq!(game.snake().direction(), Right);
        assert_eq!(game.snake().tail().len(), 3);
    }

    #[test]
    fn test_best_never_decreases() {
        let mut game = running_game();
        game.score = 5;
        game.snake = Snake::with_tail(Point::new(30, 100), Left, vec![]);
        game.tick();
        assert_eq!(game.best(), 5);

        game.reset();
        game.score = 2;
        game.toggle_pause();
        assert_eq!(game.best(), 5);

        game.toggle_pause();
        game.score = 9;
        game.toggle_pause();
        assert_eq!(game.best(), 9);

        game.toggle_pause();
        game.reset();
        assert_eq!(game.best(), 9);
    }

    #[test]
    fn test_seeded_food_is_reproducible() {
        let mut a = running_game();
        let mut b = running_game();
        a.tick();
        b.tick();
        assert_eq!(a.food(), b.food());
    }
}
