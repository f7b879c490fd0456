use std::time::Duration;

use color_realm_core::{ColorStep, Command, Event, HorizontalDirection, Stage, TICK_DURATION};
use color_realm_world::{self as world, query, Config, Player, PuzzleSequence, World};

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(7, scripted_commands());
    let second = replay(7, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.stage, Stage::Playing);
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::PlayerJumped)));
}

#[test]
fn different_seeds_generate_different_sequences() {
    let first = replay(1, vec![Command::Begin]);
    let second = replay(2, vec![Command::Begin]);

    assert_ne!(first.sequence, second.sequence);
}

#[test]
fn uneven_frame_times_match_fixed_steps() {
    let mut frames = vec![Command::Begin];
    frames.extend(
        [7, 25, 3, 16, 31, 18]
            .into_iter()
            .map(|millis| Command::Tick {
                dt: Duration::from_millis(millis),
            }),
    );
    let uneven = replay(11, frames);

    let mut steps = vec![Command::Begin];
    steps.extend((0..6).map(|_| Command::Tick { dt: TICK_DURATION }));
    let fixed = replay(11, steps);

    assert_eq!(uneven.tick_index, fixed.tick_index);
    assert_eq!(uneven.player, fixed.player);
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    stage: Stage,
    tick_index: u64,
    player: Player,
    sequence: PuzzleSequence,
    events: Vec<Event>,
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new(Config::new(5, seed)).expect("valid config");
    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    ReplayOutcome {
        stage: query::stage(&world),
        tick_index: query::tick_index(&world),
        player: query::player(&world).clone(),
        sequence: query::sequence(&world).clone(),
        events,
    }
}

fn scripted_commands() -> Vec<Command> {
    let tick = Command::Tick { dt: TICK_DURATION };
    let mut commands = vec![Command::Begin];
    commands.extend([
        Command::MovePlayer {
            direction: HorizontalDirection::Right,
        },
        tick,
        tick,
        Command::Jump,
        tick,
        Command::CycleColor {
            step: ColorStep::Next,
        },
        tick,
        Command::ReleaseMove {
            direction: HorizontalDirection::Right,
        },
        Command::MovePlayer {
            direction: HorizontalDirection::Left,
        },
    ]);
    commands.extend(std::iter::repeat(tick).take(40));
    commands.push(Command::CycleColor {
        step: ColorStep::Previous,
    });
    commands.extend(std::iter::repeat(tick).take(20));
    commands
}
