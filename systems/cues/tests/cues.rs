use color_realm_core::{ColorStep, Command, Cue, Event, PaletteColor, PuzzleKind, TICK_DURATION};
use color_realm_system_cues::Cues;
use color_realm_world::{self as world, query, Config, Puzzle, World};

#[test]
fn maps_puzzle_outcomes_to_cues_in_order() {
    let events = [
        Event::PlayerJumped,
        Event::ColorRejected {
            color: PaletteColor::Red,
            target: PaletteColor::Blue,
        },
        Event::PuzzleSolved {
            index: 0,
            kind: PuzzleKind::Color,
        },
        Event::TimeAdvanced { dt: TICK_DURATION },
        Event::PuzzleSolved {
            index: 1,
            kind: PuzzleKind::Time,
        },
        Event::SequenceCompleted { solved: 2 },
    ];

    let mut cues = Cues::default();
    let mut out = Vec::new();
    cues.handle(&events, &mut out);

    assert_eq!(out, vec![Cue::Incorrect, Cue::Correct, Cue::Complete]);
}

#[test]
fn matching_a_color_puzzle_in_the_world_requests_the_correct_cue() {
    let (mut world, target) = world_starting_with_color_puzzle();
    let mut cues = Cues::new();
    let mut heard = Vec::new();

    while query::player(&world).color() != target {
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::CycleColor {
                step: ColorStep::Next,
            },
            &mut events,
        );
        cues.handle(&events, &mut heard);
    }

    let mut events = Vec::new();
    world::apply(&mut world, Command::Tick { dt: TICK_DURATION }, &mut events);
    cues.handle(&events, &mut heard);

    assert_eq!(heard.last(), Some(&Cue::Correct));
    assert!(heard[..heard.len() - 1]
        .iter()
        .all(|cue| *cue == Cue::Incorrect));
}

fn world_starting_with_color_puzzle() -> (World, PaletteColor) {
    for seed in 0..64 {
        let mut world = World::new(Config::new(3, seed)).expect("valid config");
        let target = match query::current_puzzle(&world) {
            Some(Puzzle::Color(puzzle)) => puzzle.target(),
            _ => continue,
        };
        world::apply(&mut world, Command::Begin, &mut Vec::new());
        return (world, target);
    }
    panic!("no seed below 64 starts with a color puzzle");
}
