#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Color Realm engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams and respond with
//! their own outputs, such as audio [`Cue`] requests.

use std::time::Duration;

/// Title shown in the window decoration.
pub const WINDOW_TITLE: &str = "Color Realm";

/// Width of the playfield measured in world units.
pub const SCREEN_WIDTH: f32 = 1000.0;

/// Height of the playfield measured in world units.
pub const SCREEN_HEIGHT: f32 = 700.0;

/// Number of fixed simulation steps executed per simulated second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Duration of a single fixed simulation step.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Number of puzzles generated when no explicit count is requested.
pub const DEFAULT_PUZZLE_COUNT: usize = 5;

/// Distinct colors the player may cycle through, in cycling order.
pub const PLAYER_PALETTE: [PaletteColor; 8] = [
    PaletteColor::White,
    PaletteColor::Red,
    PaletteColor::Green,
    PaletteColor::Blue,
    PaletteColor::Yellow,
    PaletteColor::Purple,
    PaletteColor::Orange,
    PaletteColor::Cyan,
];

/// Colors a color puzzle may ask for. White is the neutral starting color
/// and is never a target.
pub const TARGET_PALETTE: [PaletteColor; 7] = [
    PaletteColor::Red,
    PaletteColor::Green,
    PaletteColor::Blue,
    PaletteColor::Yellow,
    PaletteColor::Purple,
    PaletteColor::Orange,
    PaletteColor::Cyan,
];

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Leaves the instruction screen and starts playing.
    Begin,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Starts moving the player horizontally.
    MovePlayer {
        /// Direction of travel.
        direction: HorizontalDirection,
    },
    /// Reports that a horizontal movement key was released.
    ReleaseMove {
        /// Direction whose key was released.
        direction: HorizontalDirection,
    },
    /// Requests that the player jump.
    Jump,
    /// Cycles the player's color through the palette.
    CycleColor {
        /// Whether to advance or retreat through the palette.
        step: ColorStep,
    },
    /// Rebuilds the puzzle sequence once every puzzle has been solved.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Announces that the game entered a new stage.
    StageChanged {
        /// Stage that became active.
        stage: Stage,
    },
    /// Indicates that one fixed simulation step was executed.
    TimeAdvanced {
        /// Duration of simulated time covered by the step.
        dt: Duration,
    },
    /// Confirms that the player left the ground.
    PlayerJumped,
    /// Confirms that the player came to rest on a platform.
    PlayerLanded {
        /// Index of the platform within the active time puzzle.
        platform: usize,
    },
    /// Reports the color the player switched to.
    PlayerColorChanged {
        /// Color now displayed by the player.
        color: PaletteColor,
    },
    /// Reports that a color change did not match the active target.
    ColorRejected {
        /// Color the player switched to.
        color: PaletteColor,
        /// Color the active puzzle asks for.
        target: PaletteColor,
    },
    /// Confirms that the current puzzle was solved.
    PuzzleSolved {
        /// Position of the puzzle within the sequence.
        index: usize,
        /// Variant of the solved puzzle.
        kind: PuzzleKind,
    },
    /// Announces that every puzzle in the sequence has been solved.
    SequenceCompleted {
        /// Number of puzzles that were solved.
        solved: usize,
    },
    /// Confirms that a fresh sequence was generated.
    SequenceRestarted {
        /// Number of puzzles in the new sequence.
        puzzles: usize,
    },
}

/// High-level phase of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Instruction screen awaiting any key.
    Instructions,
    /// A puzzle is active.
    Playing,
    /// Every puzzle in the sequence has been solved.
    AllComplete,
}

/// Variant of a puzzle within the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PuzzleKind {
    /// Match the player's color with a target color.
    Color,
    /// Climb a tower of moving platforms before reaching the top.
    Time,
}

/// Horizontal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalDirection {
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl HorizontalDirection {
    /// Unit sign of the direction along the x axis.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Direction of travel through the player palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorStep {
    /// Advance to the following palette entry.
    Next,
    /// Retreat to the preceding palette entry.
    Previous,
}

/// Named audio effects triggered by game events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A color puzzle was matched.
    Correct,
    /// A color change missed the target.
    Incorrect,
    /// A time puzzle was completed.
    Complete,
}

/// Fixed palette of saturated colors used by the player and puzzles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    /// Neutral starting color.
    White,
    /// Pure red.
    Red,
    /// Pure green.
    Green,
    /// Pure blue.
    Blue,
    /// Pure yellow.
    Yellow,
    /// Dark purple.
    Purple,
    /// Orange.
    Orange,
    /// Cyan.
    Cyan,
}

impl PaletteColor {
    /// Byte RGB components of the color.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::White => (255, 255, 255),
            Self::Red => (255, 0, 0),
            Self::Green => (0, 255, 0),
            Self::Blue => (0, 0, 255),
            Self::Yellow => (255, 255, 0),
            Self::Purple => (128, 0, 128),
            Self::Orange => (255, 165, 0),
            Self::Cyan => (0, 255, 255),
        }
    }
}

/// Axis-aligned rectangle expressed in world units with a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and dimensions.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Horizontal coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Vertical coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Width of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether the interiors of two rectangles intersect.
    ///
    /// Rectangles that merely share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
