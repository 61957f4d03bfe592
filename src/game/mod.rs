mod direction;
mod food;
mod grid;
mod hazard;
mod snake;
mod view;
use self::direction::Direction;
use self::food::FoodCell;
pub(crate) use self::food::Hazard;
pub(crate) use self::grid::Bounds;
use self::hazard::HazardTimer;
use self::snake::Snake;
pub(crate) use self::view::GameView;
use crate::command::Command;
use crate::consts;
use rand::Rng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Slack allowed when deciding whether the snake has travelled a whole cell,
/// so that ten steps of 0.1 count as one cell
const PROGRESS_TOLERANCE: f64 = 1e-9;

/// Parameters for a new game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    pub(crate) bounds: Bounds,

    /// Whether running into the edge of the grid is fatal at the start of
    /// the game.  The player can toggle this during play.
    pub(crate) walls: bool,

    /// How long hazardous food stays hazardous
    pub(crate) hazard_delay: Duration,
}

impl Settings {
    pub(crate) fn new(bounds: Bounds, walls: bool) -> Settings {
        Settings {
            bounds,
            walls,
            hazard_delay: consts::HAZARD_DELAY,
        }
    }
}

/// The state of a single game: the snake, the food, and the score.
///
/// The game advances one frame at a time via [`Game::update()`]; pacing
/// those frames is up to the caller.
#[derive(Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    score: i32,
    snake: Snake,
    food: FoodCell,
    state: GameState,
    bounds: Bounds,
    walls: bool,
    timer: HazardTimer,

    /// Distance the snake has travelled since it last entered a new cell
    progress: f64,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(settings: Settings) -> Self {
        Game::new_with_rng(settings, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(settings: Settings, rng: R) -> Game<R> {
        let Settings {
            bounds,
            walls,
            hazard_delay,
        } = settings;
        let snake = Snake::new(bounds.center(), Direction::North, bounds);
        let mut game = Game {
            rng,
            score: 0,
            snake,
            food: FoodCell::new(),
            state: GameState::Running,
            bounds,
            walls,
            timer: HazardTimer::new(hazard_delay),
            progress: 0.0,
        };
        game.place_food();
        game
    }

    /// Advance the game by one frame.  If the snake ate something, the
    /// hazard classification of what it ate is returned.
    pub(crate) fn update(&mut self) -> Option<Hazard> {
        if !self.running() {
            return None;
        }
        self.progress += self.snake.speed();
        if self.progress < 1.0 - PROGRESS_TOLERANCE {
            return None;
        }
        self.progress = (self.progress - 1.0).max(0.0);
        if !self.snake.advance(self.bounds, self.walls) {
            info!(
                score = self.score,
                size = self.snake.size(),
                head = ?self.snake.head(),
                "Snake died"
            );
            self.state = GameState::Dead;
            return None;
        }
        let food = self.food.get();
        (self.snake.head() == food.pos).then(|| self.eat(food.hazard))
    }

    fn eat(&mut self, hazard: Hazard) -> Hazard {
        match hazard {
            Hazard::Hazardous => {
                self.score -= 1;
                self.place_food();
                self.snake.shrink();
                self.adjust_speed(-consts::SPEED_STEP);
            }
            Hazard::Safe => {
                self.score += 1;
                self.place_food();
                self.snake.grow();
                self.adjust_speed(consts::SPEED_STEP);
            }
        }
        debug!(
            ?hazard,
            score = self.score,
            size = self.snake.size(),
            speed = self.snake.speed(),
            "Snake ate food"
        );
        hazard
    }

    /// Put a new food item somewhere the snake isn't, arming a hazard timer
    /// if it's hazardous.  If there's nowhere left, the game is over.
    fn place_food(&mut self) {
        match food::place_food(&mut self.rng, self.bounds, &self.snake) {
            Some((pos, hazard)) => {
                let generation = self.food.replace(pos, hazard);
                if hazard.is_hazardous() {
                    self.timer.arm(&self.food, generation);
                }
                debug!(?pos, ?hazard, generation, "Placed food");
            }
            None => {
                info!(
                    score = self.score,
                    size = self.snake.size(),
                    "No room left for food"
                );
                self.state = GameState::Exhausted;
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn handle_command(&mut self, cmd: Command) {
        match (self.state, cmd) {
            (_, Command::Quit) => {
                info!("Quit requested");
                self.state = GameState::Quit;
            }
            (GameState::Running, Command::Pause | Command::Blur) => {
                debug!("Game paused");
                self.state = GameState::Paused;
            }
            (GameState::Paused, Command::Pause) => {
                debug!("Game resumed");
                self.state = GameState::Running;
            }
            (GameState::Running, Command::Up) => self.snake.turn(Direction::North),
            (GameState::Running, Command::Down) => self.snake.turn(Direction::South),
            (GameState::Running, Command::Left) => self.snake.turn(Direction::West),
            (GameState::Running, Command::Right) => self.snake.turn(Direction::East),
            (GameState::Running, Command::Walls) => {
                self.walls = !self.walls;
                debug!(walls = self.walls, "Toggled walls");
            }
            _ => (),
        }
    }

    fn adjust_speed(&mut self, delta: f64) {
        let speed = (self.snake.speed() + delta).clamp(consts::MIN_SPEED, consts::MAX_SPEED);
        self.snake.set_speed(speed);
    }

    pub(crate) fn score(&self) -> i32 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Return a snapshot of the current food item
    #[cfg(test)]
    pub(crate) fn food(&self) -> food::Food {
        self.food.get()
    }

    #[cfg(test)]
    pub(crate) fn walls(&self) -> bool {
        self.walls
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn running(&self) -> bool {
        self.state == GameState::Running
    }

    pub(crate) fn paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub(crate) fn is_over(&self) -> bool {
        matches!(
            self.state,
            GameState::Dead | GameState::Exhausted | GameState::Quit
        )
    }

    pub(crate) fn view(&self) -> GameView<'_> {
        GameView {
            bounds: self.bounds,
            snake: &self.snake,
            food: self.food.get(),
            score: self.score,
            walls: self.walls,
            state: self.state,
        }
    }

    pub(crate) fn summary(&self) -> Summary {
        Summary {
            state: self.state,
            score: self.score,
            size: self.snake.len(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    Paused,
    Dead,
    /// The snake has filled the grid and there is nowhere left to place food.
    Exhausted,
    /// The player asked to leave mid-game.
    Quit,
}

/// Final results of a game, displayed once the terminal has been restored
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Summary {
    pub(crate) state: GameState,
    pub(crate) score: i32,

    /// Number of cells the snake occupies.  Growth from a meal that the
    /// snake hasn't yet moved since eating is not counted.
    pub(crate) size: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            GameState::Dead => writeln!(f, "You died!")?,
            GameState::Exhausted => writeln!(f, "You filled the board!")?,
            GameState::Running | GameState::Paused | GameState::Quit => (),
        }
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "Size: {}", self.size)
    }
}
