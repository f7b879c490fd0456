use std::time::Duration;

use color_realm_core::{ColorStep, Command, Event, HorizontalDirection, Stage};
use color_realm_rendering::{
    Backdrop, CardPresentation, Color, FrameInput, PlatformPresentation, PlayerPresentation,
    Scene, TargetPresentation,
};
use color_realm_system_bootstrap::Bootstrap;
use color_realm_system_cues::Cues;
use color_realm_world::{self as world, query, Body, Puzzle, World};
use glam::Vec2;
use tracing::{debug, info, trace};

/// Owns the world and the pure systems driven once per rendered frame.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    cues: Cues,
    bootstrap: Bootstrap,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(world: World, cues: Cues) -> Self {
        Self {
            world,
            cues,
            bootstrap: Bootstrap,
            events: Vec::new(),
        }
    }

    /// Applies one frame of input, advances the clock and rewrites the scene.
    pub(crate) fn advance(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        self.events.clear();
        let stage = query::stage(&self.world);
        for command in commands_for(stage, input) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);

        self.cues.handle(&self.events, &mut scene.cues);
        self.log_events();
        self.populate(scene);
    }

    /// Rewrites every scene field derived from the world, leaving queued cues untouched.
    pub(crate) fn populate(&self, scene: &mut Scene) {
        let world = &self.world;
        let stage = query::stage(world);
        scene.stage = stage;
        scene.platforms.clear();
        scene.target = None;
        scene.player = None;
        scene.overlay = Color::BLACK.with_alpha_u8(0);
        scene.card = self.bootstrap.card(world).map(|card| CardPresentation {
            title: card.title.to_owned(),
            lines: card.lines.iter().map(|line| (*line).to_owned()).collect(),
        });

        match stage {
            Stage::Instructions => scene.backdrop = Backdrop::Solid(Color::BLACK),
            Stage::AllComplete => {
                scene.backdrop = Backdrop::WorldImage {
                    fallback: Color::SKY_BLUE,
                }
            }
            Stage::Playing => {
                scene.backdrop = Backdrop::Solid(Color::SKY_BLUE);
                match query::current_puzzle(world) {
                    Some(Puzzle::Color(puzzle)) => {
                        let (caption, hint) = self.bootstrap.target_captions();
                        scene.target = Some(TargetPresentation {
                            color: Color::from_palette(puzzle.target()),
                            caption: caption.to_owned(),
                            hint: hint.to_owned(),
                        });
                    }
                    Some(Puzzle::Time(puzzle)) => {
                        scene
                            .platforms
                            .extend(puzzle.platforms().iter().map(|platform| {
                                let bounds = platform.bounds();
                                PlatformPresentation::new(
                                    Vec2::new(bounds.left(), bounds.top()),
                                    Vec2::new(bounds.width(), bounds.height()),
                                )
                            }));
                    }
                    None => {}
                }

                let player = query::player(world);
                let bounds = player.bounds();
                scene.player = Some(PlayerPresentation::new(
                    Vec2::new(bounds.left(), bounds.top()),
                    bounds.width(),
                    Color::from_palette(player.color()),
                ));
                scene.overlay = Color::BLACK.with_alpha_u8(query::overlay_alpha(world));
            }
        }
    }

    fn log_events(&self) {
        for event in &self.events {
            match event {
                Event::StageChanged { stage } => info!(?stage, "stage changed"),
                Event::PuzzleSolved { index, kind } => {
                    let total = query::sequence(&self.world).len();
                    info!(?kind, "puzzle {} of {} solved", index + 1, total);
                }
                Event::SequenceCompleted { solved } => {
                    info!(solved, "all puzzles solved; the world is full of color");
                }
                Event::SequenceRestarted { puzzles } => info!(puzzles, "sequence restarted"),
                Event::ColorRejected { color, target } => {
                    debug!(?color, ?target, "color does not match the target");
                }
                Event::PlayerJumped | Event::PlayerLanded { .. } => trace!(?event, "player"),
                Event::PlayerColorChanged { .. } | Event::TimeAdvanced { .. } => {}
            }
        }
    }
}

/// Translates a frame of input into world commands for the given stage.
///
/// Any key press on the instruction screen only begins play.
fn commands_for(stage: Stage, input: FrameInput) -> Vec<Command> {
    let mut commands = Vec::new();
    if stage == Stage::Instructions {
        if input.any_key {
            commands.push(Command::Begin);
        }
        return commands;
    }

    let directional = [
        (input.left_pressed, input.left_released, HorizontalDirection::Left),
        (input.right_pressed, input.right_released, HorizontalDirection::Right),
    ];
    for (pressed, _, direction) in directional {
        if pressed {
            commands.push(Command::MovePlayer { direction });
        }
    }
    for (_, released, direction) in directional {
        if released {
            commands.push(Command::ReleaseMove { direction });
        }
    }
    if input.jump {
        commands.push(Command::Jump);
    }
    if input.previous_color {
        commands.push(Command::CycleColor {
            step: ColorStep::Previous,
        });
    }
    if input.next_color {
        commands.push(Command::CycleColor {
            step: ColorStep::Next,
        });
    }
    if input.restart {
        commands.push(Command::Restart);
    }
    commands
}
