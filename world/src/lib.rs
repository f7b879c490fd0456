#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Color Realm.

mod platform;
mod player;
mod puzzle;
mod sequence;

use std::time::Duration;

use color_realm_core::{
    ColorStep, Command, Event, Rect, Stage, DEFAULT_PUZZLE_COUNT, TICK_DURATION,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub use platform::{Platform, PLATFORM_HEIGHT, PLATFORM_WIDTH};
pub use player::{Player, PLAYER_SIZE};
pub use puzzle::{ColorPuzzle, Puzzle, TimePuzzle, COMPLETION_HEIGHT};
pub use sequence::PuzzleSequence;

const MAX_STEPS_PER_TICK: u32 = 5;

/// Simulated object advanced once per fixed step.
pub trait Body {
    /// Advances the object by a single fixed step.
    fn update(&mut self);

    /// Current bounding box in world units.
    fn bounds(&self) -> Rect;
}

/// Configuration parameters required to construct the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    puzzle_count: usize,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided sequence length and seed.
    #[must_use]
    pub const fn new(puzzle_count: usize, rng_seed: u64) -> Self {
        Self {
            puzzle_count,
            rng_seed,
        }
    }

    /// Number of puzzles generated per sequence.
    #[must_use]
    pub const fn puzzle_count(&self) -> usize {
        self.puzzle_count
    }

    /// Seed feeding the puzzle generator.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_PUZZLE_COUNT, 0)
    }
}

/// Reasons a world cannot be constructed from a [`Config`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A sequence must contain at least one puzzle.
    #[error("a puzzle sequence needs at least one puzzle")]
    EmptySequence,
}

/// Represents the authoritative Color Realm world state.
#[derive(Debug)]
pub struct World {
    puzzle_count: usize,
    rng: ChaCha8Rng,
    stage: Stage,
    player: Player,
    sequence: PuzzleSequence,
    accumulator: Duration,
    tick_index: u64,
}

impl World {
    /// Creates a world showing the instruction screen with a freshly generated sequence.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        if config.puzzle_count == 0 {
            return Err(ConfigError::EmptySequence);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let sequence = PuzzleSequence::generate(config.puzzle_count, &mut rng);
        Ok(Self {
            puzzle_count: config.puzzle_count,
            rng,
            stage: Stage::Instructions,
            player: Player::new(),
            sequence,
            accumulator: Duration::ZERO,
            tick_index: 0,
        })
    }

    fn set_stage(&mut self, stage: Stage, out_events: &mut Vec<Event>) {
        if self.stage != stage {
            self.stage = stage;
            out_events.push(Event::StageChanged { stage });
        }
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.accumulator = self.accumulator.saturating_add(dt);

        let mut steps = 0;
        while self.accumulator >= TICK_DURATION {
            if steps == MAX_STEPS_PER_TICK {
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= TICK_DURATION;
            steps += 1;
            self.step(out_events);
        }
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt: TICK_DURATION });

        self.player.update();
        if self.stage != Stage::Playing {
            return;
        }

        self.sequence.step(&mut self.player, out_events);
        if self.sequence.is_complete() {
            self.set_stage(Stage::AllComplete, out_events);
        }
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.sequence = PuzzleSequence::generate(self.puzzle_count, &mut self.rng);
        self.player = Player::new();
        self.accumulator = Duration::ZERO;
        out_events.push(Event::SequenceRestarted {
            puzzles: self.sequence.len(),
        });
        self.set_stage(Stage::Instructions, out_events);
    }

    fn cycle_color(&mut self, step: ColorStep, out_events: &mut Vec<Event>) {
        match step {
            ColorStep::Next => self.player.next_color(),
            ColorStep::Previous => self.player.prev_color(),
        }
        let color = self.player.color();
        out_events.push(Event::PlayerColorChanged { color });

        if self.stage != Stage::Playing {
            return;
        }
        if let Some(Puzzle::Color(puzzle)) = self.sequence.current() {
            if puzzle.target() != color {
                out_events.push(Event::ColorRejected {
                    color,
                    target: puzzle.target(),
                });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.stage == Stage::Instructions {
        if command == Command::Begin {
            world.accumulator = Duration::ZERO;
            world.set_stage(Stage::Playing, out_events);
        }
        return;
    }

    match command {
        Command::Begin => {}
        Command::Tick { dt } => world.advance_clock(dt, out_events),
        Command::MovePlayer { direction } => world.player.start_moving(direction),
        Command::ReleaseMove { direction } => world.player.release(direction),
        Command::Jump => {
            if world.player.jump() {
                out_events.push(Event::PlayerJumped);
            }
        }
        Command::CycleColor { step } => world.cycle_color(step, out_events),
        Command::Restart => {
            if world.stage == Stage::AllComplete {
                world.restart(out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use color_realm_core::Stage;

    use super::{Player, Puzzle, PuzzleSequence, World};

    /// Stage the session is currently in.
    #[must_use]
    pub fn stage(world: &World) -> Stage {
        world.stage
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Provides read-only access to the puzzle sequence.
    #[must_use]
    pub fn sequence(world: &World) -> &PuzzleSequence {
        &world.sequence
    }

    /// Puzzle the player is currently solving, if any remain.
    #[must_use]
    pub fn current_puzzle(world: &World) -> Option<&Puzzle> {
        world.sequence.current()
    }

    /// Opacity of the progress shroud drawn over the playfield.
    #[must_use]
    pub fn overlay_alpha(world: &World) -> u8 {
        world.sequence.overlay_alpha()
    }

    /// Number of fixed steps simulated since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
