use color_realm_core::Event;
use rand::Rng;

use crate::{player::Player, puzzle::Puzzle, Body};

const OVERLAY_BASE_ALPHA: u32 = 120;
const OVERLAY_SPAN: u32 = 100;

/// Ordered list of puzzles the player clears one after another.
#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleSequence {
    puzzles: Vec<Puzzle>,
    current: usize,
}

impl PuzzleSequence {
    /// Wraps explicit puzzles into a sequence starting at the first entry.
    #[must_use]
    pub fn new(puzzles: Vec<Puzzle>) -> Self {
        Self {
            puzzles,
            current: 0,
        }
    }

    /// Generates `count` puzzles whose variants are picked independently.
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        Self::new((0..count).map(|_| Puzzle::generate(rng)).collect())
    }

    /// Puzzles in play order.
    #[must_use]
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// Number of puzzles in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Whether the sequence holds no puzzles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// Index of the active puzzle; equals [`Self::len`] once every puzzle is solved.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Active puzzle, if any remain.
    #[must_use]
    pub fn current(&self) -> Option<&Puzzle> {
        self.puzzles.get(self.current)
    }

    /// Whether every puzzle has been solved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.puzzles.len()
    }

    /// Opacity of the progress shroud, fading as puzzles are solved.
    #[must_use]
    pub fn overlay_alpha(&self) -> u8 {
        if self.puzzles.is_empty() {
            return 0;
        }
        let step = OVERLAY_SPAN / self.puzzles.len() as u32;
        let faded = step.saturating_mul(self.current as u32);
        OVERLAY_BASE_ALPHA.saturating_sub(faded) as u8
    }

    /// Drives the active puzzle for one tick and advances past it once solved.
    pub fn step(&mut self, player: &mut Player, out_events: &mut Vec<Event>) {
        let index = self.current;
        let Some(puzzle) = self.puzzles.get_mut(index) else {
            return;
        };

        let solved = match puzzle {
            Puzzle::Color(color_puzzle) => {
                !color_puzzle.is_solved() && color_puzzle.check_solution(player.color())
            }
            Puzzle::Time(time_puzzle) => {
                let was_on_platform = player.on_platform();
                time_puzzle.advance_platforms();
                player.begin_platform_step();
                if let Some(platform) = time_puzzle.resolve_collisions(player) {
                    if !was_on_platform {
                        out_events.push(Event::PlayerLanded { platform });
                    }
                }
                time_puzzle.check_completion(player.bounds().top())
            }
        };

        if !solved {
            return;
        }

        out_events.push(Event::PuzzleSolved {
            index,
            kind: puzzle.kind(),
        });
        self.current += 1;
        player.respawn();

        if self.is_complete() {
            out_events.push(Event::SequenceCompleted {
                solved: self.puzzles.len(),
            });
        }
    }
}
