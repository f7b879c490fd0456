#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Color Realm adapters.

use anyhow::Result as AnyResult;
use color_realm_core::{Cue, PaletteColor, Stage, SCREEN_HEIGHT, SCREEN_WIDTH};
use glam::Vec2;
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Sky blue drawn behind active puzzles.
    pub const SKY_BLUE: Self = Self::from_rgb_u8(135, 206, 235);
    /// Light grey used for platforms.
    pub const LIGHT_GREY: Self = Self::from_rgb_u8(150, 150, 150);
    /// Yellow used for headlines.
    pub const YELLOW: Self = Self::from_rgb_u8(255, 255, 0);
    /// Cyan used for supporting text.
    pub const CYAN: Self = Self::from_rgb_u8(0, 255, 255);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color matching a palette entry.
    #[must_use]
    pub const fn from_palette(color: PaletteColor) -> Self {
        let (red, green, blue) = color.rgb();
        Self::from_rgb_u8(red, green, blue)
    }

    /// Returns the same color with a byte alpha channel.
    #[must_use]
    pub fn with_alpha_u8(self, alpha: u8) -> Self {
        Self {
            alpha: f32::from(alpha) / 255.0,
            ..self
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether any key went down on this frame.
    pub any_key: bool,
    /// Whether the jump key went down on this frame.
    pub jump: bool,
    /// Whether the left movement key went down on this frame.
    pub left_pressed: bool,
    /// Whether the left movement key went up on this frame.
    pub left_released: bool,
    /// Whether the right movement key went down on this frame.
    pub right_pressed: bool,
    /// Whether the right movement key went up on this frame.
    pub right_released: bool,
    /// Whether the previous-color key went down on this frame.
    pub previous_color: bool,
    /// Whether the next-color key went down on this frame.
    pub next_color: bool,
    /// Whether the restart key went down on this frame.
    pub restart: bool,
}

/// Player square drawn at a world position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Top-left corner in world units.
    pub position: Vec2,
    /// Side length in world units.
    pub size: f32,
    /// Fill color.
    pub color: Color,
}

impl PlayerPresentation {
    /// Creates a new player descriptor.
    #[must_use]
    pub const fn new(position: Vec2, size: f32, color: Color) -> Self {
        Self {
            position,
            size,
            color,
        }
    }
}

/// Moving platform drawn as a filled rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformPresentation {
    /// Top-left corner in world units.
    pub position: Vec2,
    /// Width and height in world units.
    pub size: Vec2,
}

impl PlatformPresentation {
    /// Creates a new platform descriptor.
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }
}

/// Target swatch shown while a color puzzle is active.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetPresentation {
    /// Color the player must match.
    pub color: Color,
    /// Caption drawn above the swatch.
    pub caption: String,
    /// Hint drawn below the swatch.
    pub hint: String,
}

/// Full-screen text card such as the instructions or the victory banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardPresentation {
    /// Headline drawn near the top of the screen.
    pub title: String,
    /// Lines drawn beneath the headline.
    pub lines: Vec<String>,
}

/// What fills the screen before anything else is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Backdrop {
    /// A solid color.
    Solid(Color),
    /// The world image, or the fallback color when no image was loaded.
    WorldImage {
        /// Color used when the image is unavailable.
        fallback: Color,
    },
}

/// Scene description combining the player, the active puzzle and overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Stage the session is in.
    pub stage: Stage,
    /// Backdrop filling the screen.
    pub backdrop: Backdrop,
    /// Player square, hidden while a text card is shown.
    pub player: Option<PlayerPresentation>,
    /// Platforms of the active time puzzle.
    pub platforms: Vec<PlatformPresentation>,
    /// Target of the active color puzzle.
    pub target: Option<TargetPresentation>,
    /// Progress shroud drawn over the playfield; transparent when finished.
    pub overlay: Color,
    /// Full-screen text card.
    pub card: Option<CardPresentation>,
    /// Audio cues requested during the last update, drained by the backend.
    pub cues: Vec<Cue>,
}

impl Scene {
    /// Creates an empty scene for the provided stage.
    #[must_use]
    pub fn new(stage: Stage, backdrop: Backdrop) -> Self {
        Self {
            stage,
            backdrop,
            player: None,
            platforms: Vec::new(),
            target: None,
            overlay: Color::BLACK.with_alpha_u8(0),
            card: None,
            cues: Vec::new(),
        }
    }

    /// Size of the world drawn by the scene.
    #[must_use]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Color Realm scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and rewrites the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Sink for named audio cues.
///
/// Implementations must treat unavailable sounds as silent no-ops.
pub trait AudioOutput {
    /// Plays the cue once.
    fn play_cue(&mut self, cue: Cue);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_convert_to_opaque_channels() {
        let orange = Color::from_palette(PaletteColor::Orange);

        assert_eq!(orange.red, 1.0);
        assert_eq!(orange.green, 165.0 / 255.0);
        assert_eq!(orange.blue, 0.0);
        assert_eq!(orange.alpha, 1.0);
    }

    #[test]
    fn alpha_override_keeps_color_channels() {
        let shroud = Color::BLACK.with_alpha_u8(255);
        assert_eq!(shroud, Color::BLACK);

        let faded = Color::SKY_BLUE.with_alpha_u8(0);
        assert_eq!(faded.alpha, 0.0);
        assert_eq!(faded.blue, Color::SKY_BLUE.blue);
    }

    #[test]
    fn new_scene_starts_without_content() {
        let scene = Scene::new(Stage::Instructions, Backdrop::Solid(Color::BLACK));

        assert!(scene.player.is_none());
        assert!(scene.platforms.is_empty());
        assert!(scene.target.is_none());
        assert!(scene.card.is_none());
        assert!(scene.cues.is_empty());
        assert_eq!(scene.overlay.alpha, 0.0);
        assert_eq!(scene.world_size(), Vec2::new(1000.0, 700.0));
    }
}
