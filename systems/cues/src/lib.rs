#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating world events into audio cue requests.

use color_realm_core::{Cue, Event, PuzzleKind};

/// Pure system that emits cue requests in reaction to puzzle outcomes.
#[derive(Debug)]
pub struct Cues {
    enabled: bool,
}

impl Cues {
    /// Creates a cue system that emits requests.
    #[must_use]
    pub const fn new() -> Self {
        Self { enabled: true }
    }

    /// Creates a cue system that never emits requests.
    #[must_use]
    pub const fn muted() -> Self {
        Self { enabled: false }
    }

    /// Consumes world events and appends the cues they trigger, in event order.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Cue>) {
        if !self.enabled {
            return;
        }

        out.extend(events.iter().filter_map(cue_for));
    }
}

impl Default for Cues {
    fn default() -> Self {
        Self::new()
    }
}

fn cue_for(event: &Event) -> Option<Cue> {
    match event {
        Event::PuzzleSolved {
            kind: PuzzleKind::Color,
            ..
        } => Some(Cue::Correct),
        Event::PuzzleSolved {
            kind: PuzzleKind::Time,
            ..
        } => Some(Cue::Complete),
        Event::ColorRejected { .. } => Some(Cue::Incorrect),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_system_emits_nothing() {
        let mut cues = Cues::muted();
        let mut out = Vec::new();
        cues.handle(
            &[Event::PuzzleSolved {
                index: 0,
                kind: PuzzleKind::Color,
            }],
            &mut out,
        );

        assert!(out.is_empty());
    }
}
