#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Color Realm texts.

use color_realm_core::Stage;
use color_realm_world::{query, World};

const INSTRUCTIONS_TITLE: &str = "Instructions";
const INSTRUCTION_LINES: [&str; 10] = [
    "Welcome to the Color Realm!",
    "Your goal is to bring color back to the world.",
    "Solve two types of puzzles to clear the shadows.",
    "",
    "Color Puzzle: Match the target color with the player.",
    "Movement: Use Arrow Keys (Left/Right) to move.",
    "Jump: Use Space Bar to jump.",
    "Time Puzzle: Navigate moving platforms to the top.",
    "",
    "Press any key to begin...",
];
const COMPLETION_BANNER: &str = "The World is Full of Natural Colors!";
const RESTART_HINT: &str = "Press 'R' to Restart";
const TARGET_CAPTION: &str = "Target Color";
const TARGET_HINT: &str = "Match the player color with this!";

/// Headline and supporting lines shown on a full-screen text card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextCard {
    /// Large headline.
    pub title: &'static str,
    /// Lines displayed beneath the headline.
    pub lines: &'static [&'static str],
}

/// Produces the text required to guide the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the full-screen card for the current stage, if the stage has one.
    #[must_use]
    pub fn card(&self, world: &World) -> Option<TextCard> {
        match query::stage(world) {
            Stage::Instructions => Some(TextCard {
                title: INSTRUCTIONS_TITLE,
                lines: &INSTRUCTION_LINES,
            }),
            Stage::AllComplete => Some(TextCard {
                title: COMPLETION_BANNER,
                lines: &[RESTART_HINT],
            }),
            Stage::Playing => None,
        }
    }

    /// Captions drawn around the target swatch of a color puzzle.
    #[must_use]
    pub fn target_captions(&self) -> (&'static str, &'static str) {
        (TARGET_CAPTION, TARGET_HINT)
    }
}
