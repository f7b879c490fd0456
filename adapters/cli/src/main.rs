#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Color Realm experience.

mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use color_realm_core::{Stage, DEFAULT_PUZZLE_COUNT, WINDOW_TITLE};
use color_realm_rendering::{Backdrop, Color, Presentation, RenderingBackend, Scene};
use color_realm_rendering_macroquad::{AssetBundle, MacroquadBackend};
use color_realm_system_cues::Cues;
use color_realm_world::{Config, World};
use tracing::{info, Level};

use crate::session::Session;

/// Command-line arguments accepted by the Color Realm binary.
#[derive(Debug, Parser)]
#[command(name = "color-realm", about = "Bring color back to the world one puzzle at a time.")]
struct CliArgs {
    /// Seed for puzzle generation; a random seed is chosen and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of puzzles in the sequence.
    #[arg(long, default_value_t = DEFAULT_PUZZLE_COUNT)]
    puzzles: usize,

    /// Asset manifest listing the background image and cue sounds.
    #[arg(long, value_name = "PATH")]
    assets: Option<PathBuf>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,

    /// Log frame timing metrics once per second.
    #[arg(long, default_value_t = false)]
    show_fps: bool,

    /// Suppress audio cue requests.
    #[arg(long, default_value_t = false)]
    mute: bool,

    /// Most verbose log level emitted.
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

/// Entry point for the Color Realm command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, puzzles = args.puzzles, "starting Color Realm");

    let assets = args
        .assets
        .as_deref()
        .map(|path| {
            AssetBundle::from_manifest_path(path)
                .with_context(|| format!("failed to load assets from {}", path.display()))
        })
        .transpose()?;
    if assets.is_none() {
        info!("no asset manifest provided; running without background image or sound");
    }

    let world = World::new(Config::new(args.puzzles, seed)).context("invalid world configuration")?;
    let cues = if args.mute { Cues::muted() } else { Cues::new() };
    let mut session = Session::new(world, cues);

    let mut scene = Scene::new(Stage::Instructions, Backdrop::Solid(Color::BLACK));
    session.populate(&mut scene);

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_assets(assets)
        .run(Presentation::new(WINDOW_TITLE, scene), move |dt, input, scene| {
            session.advance(dt, input, scene);
        })
}
