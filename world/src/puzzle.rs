use color_realm_core::{PaletteColor, PuzzleKind, SCREEN_HEIGHT, SCREEN_WIDTH, TARGET_PALETTE};
use rand::Rng;

use crate::{
    platform::{Platform, PLATFORM_WIDTH},
    player::Player,
    Body,
};

const PLATFORM_COUNT: usize = 7;
const PLATFORM_MARGIN: i32 = 60;
const PLATFORM_BASE_OFFSET: f32 = 120.0;
const PLATFORM_VERTICAL_GAP: f32 = 80.0;
const MOVE_RANGE_MIN: i32 = 80;
const MOVE_RANGE_MAX: i32 = 200;
const LANDING_TOLERANCE: f32 = 25.0;

/// Player top coordinate above which a time puzzle counts as cleared.
pub const COMPLETION_HEIGHT: f32 = 100.0;

/// Puzzle solved by switching the player to a target color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorPuzzle {
    target: PaletteColor,
    solved: bool,
}

impl ColorPuzzle {
    /// Creates an unsolved puzzle asking for the provided color.
    #[must_use]
    pub const fn new(target: PaletteColor) -> Self {
        Self {
            target,
            solved: false,
        }
    }

    /// Creates a puzzle with a target drawn uniformly from the target palette.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self::new(TARGET_PALETTE[rng.gen_range(0..TARGET_PALETTE.len())])
    }

    /// Color the player must display.
    #[must_use]
    pub const fn target(&self) -> PaletteColor {
        self.target
    }

    /// Marks the puzzle solved when the provided color matches the target.
    pub fn check_solution(&mut self, color: PaletteColor) -> bool {
        if color != self.target {
            return false;
        }
        self.solved = true;
        true
    }

    /// Whether the target has been matched.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }
}

/// Puzzle solved by climbing a stack of moving platforms.
#[derive(Clone, Debug, PartialEq)]
pub struct TimePuzzle {
    platforms: Vec<Platform>,
    solved: bool,
}

impl TimePuzzle {
    /// Creates an unsolved puzzle from explicit platforms.
    #[must_use]
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self {
            platforms,
            solved: false,
        }
    }

    /// Stacks randomly placed platforms from the floor toward the top of the screen.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let max_x = SCREEN_WIDTH as i32 - PLATFORM_WIDTH as i32 - PLATFORM_MARGIN;
        let platforms = (0..PLATFORM_COUNT)
            .map(|level| {
                let x = rng.gen_range(PLATFORM_MARGIN..=max_x) as f32;
                let y = SCREEN_HEIGHT - PLATFORM_BASE_OFFSET - level as f32 * PLATFORM_VERTICAL_GAP;
                let move_range = rng.gen_range(MOVE_RANGE_MIN..=MOVE_RANGE_MAX) as f32;
                let speed = if rng.gen_bool(0.5) { 1.0 } else { 2.0 };
                Platform::new(x, y, move_range, speed)
            })
            .collect();
        Self::new(platforms)
    }

    /// Platforms composing the puzzle, bottom first.
    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Advances every platform by one tick.
    pub fn advance_platforms(&mut self) {
        for platform in &mut self.platforms {
            platform.update();
        }
    }

    /// Rests a descending player on any platform it has just sunk into.
    ///
    /// Returns the index of the last platform the player landed on.
    pub fn resolve_collisions(&self, player: &mut Player) -> Option<usize> {
        let mut landed = None;
        for (index, platform) in self.platforms.iter().enumerate() {
            let body = player.bounds();
            let surface = platform.bounds();
            if !body.overlaps(&surface) {
                continue;
            }

            let descending = player.velocity().1 >= 0.0;
            let sunk_in = body.bottom() - surface.top() < LANDING_TOLERANCE;
            let from_above = body.top() < surface.top();
            if descending && sunk_in && from_above {
                player.land_on(surface.top(), platform.displacement());
                landed = Some(index);
            }
        }
        landed
    }

    /// Marks the puzzle solved once the player's top edge rises above the finish line.
    pub fn check_completion(&mut self, player_y: f32) -> bool {
        if player_y >= COMPLETION_HEIGHT {
            return false;
        }
        self.solved = true;
        true
    }

    /// Whether the player reached the top.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }
}

/// Puzzle variants that may appear in a sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Puzzle {
    /// Match a target color.
    Color(ColorPuzzle),
    /// Climb moving platforms.
    Time(TimePuzzle),
}

impl Puzzle {
    /// Picks either variant with equal probability and generates it.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Color(ColorPuzzle::generate(rng))
        } else {
            Self::Time(TimePuzzle::generate(rng))
        }
    }

    /// Variant tag of the puzzle.
    #[must_use]
    pub const fn kind(&self) -> PuzzleKind {
        match self {
            Self::Color(_) => PuzzleKind::Color,
            Self::Time(_) => PuzzleKind::Time,
        }
    }

    /// Whether the puzzle has been solved.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        match self {
            Self::Color(puzzle) => puzzle.is_solved(),
            Self::Time(puzzle) => puzzle.is_solved(),
        }
    }
}
