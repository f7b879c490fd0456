#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Color Realm.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Builds that want sound playback enable this
//! crate's `audio` feature, which switches `macroquad/audio` back on.

mod assets;
mod audio;

pub use assets::{AssetBundle, AssetKey, BackgroundImage};

use anyhow::Result;
use color_realm_core::Stage;
use color_realm_rendering::{
    Backdrop, CardPresentation, Color, FrameInput, Presentation, RenderingBackend, Scene,
    TargetPresentation,
};
use glam::Vec2;
use macroquad::{
    color::BLACK,
    input::{get_last_key_pressed, is_key_pressed, is_key_released, KeyCode},
    texture::{DrawTextureParams, Texture2D},
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};
use tracing::info;

const TARGET_CENTER: Vec2 = Vec2::new(500.0, 250.0);
const TARGET_RADIUS: f32 = 50.0;
const TARGET_CAPTION_Y: f32 = 180.0;
const TARGET_HINT_Y: f32 = 350.0;
const TITLE_FONT_SIZE: f32 = 74.0;
const LINE_FONT_SIZE: f32 = 48.0;
const CAPTION_FONT_SIZE: f32 = 32.0;
const LINE_SPACING: f32 = 50.0;

/// Raw key transitions observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyObservations {
    /// Any key went down.
    pub any_pressed: bool,
    /// `Escape` went down.
    pub escape_pressed: bool,
    /// `Q` went down.
    pub q_pressed: bool,
    /// Left arrow went down.
    pub left_pressed: bool,
    /// Left arrow went up.
    pub left_released: bool,
    /// Right arrow went down.
    pub right_pressed: bool,
    /// Right arrow went up.
    pub right_released: bool,
    /// Space went down.
    pub space_pressed: bool,
    /// `A` went down.
    pub a_pressed: bool,
    /// `D` went down.
    pub d_pressed: bool,
    /// `R` went down.
    pub r_pressed: bool,
}

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    pub quit_requested: bool,
    /// Gameplay input forwarded to the scene update.
    pub input: FrameInput,
}

impl KeyboardShortcuts {
    /// Maps raw key transitions onto gameplay input.
    #[must_use]
    pub fn from_observations(keys: KeyObservations) -> Self {
        Self {
            quit_requested: keys.escape_pressed || keys.q_pressed,
            input: FrameInput {
                any_key: keys.any_pressed,
                jump: keys.space_pressed,
                left_pressed: keys.left_pressed,
                left_released: keys.left_released,
                right_pressed: keys.right_pressed,
                right_released: keys.right_released,
                previous_color: keys.a_pressed,
                next_color: keys.d_pressed,
                restart: keys.r_pressed,
            },
        }
    }

    fn poll() -> Self {
        Self::from_observations(KeyObservations {
            any_pressed: get_last_key_pressed().is_some(),
            escape_pressed: is_key_pressed(KeyCode::Escape),
            q_pressed: is_key_pressed(KeyCode::Q),
            left_pressed: is_key_pressed(KeyCode::Left),
            left_released: is_key_released(KeyCode::Left),
            right_pressed: is_key_pressed(KeyCode::Right),
            right_released: is_key_released(KeyCode::Right),
            space_pressed: is_key_pressed(KeyCode::Space),
            a_pressed: is_key_pressed(KeyCode::A),
            d_pressed: is_key_pressed(KeyCode::D),
            r_pressed: is_key_pressed(KeyCode::R),
        })
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    assets: Option<AssetBundle>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Supplies the background image and cue sounds loaded before start-up.
    #[must_use]
    pub fn with_assets(mut self, assets: Option<AssetBundle>) -> Self {
        self.assets = assets;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_update: self.update_accum / frames.max(1),
            avg_render: self.render_accum / frames.max(1),
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.update_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            assets,
        } = self;

        let Presentation {
            window_title,
            scene,
        } = presentation;

        let world_size = scene.world_size();
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: world_size.x as i32,
            window_height: world_size.y as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = assets
                .as_ref()
                .map(AssetBundle::background)
                .map(|image| Texture2D::from_rgba8(image.width(), image.height(), image.rgba()));
            let mut audio = audio::open(assets.as_ref().and_then(AssetBundle::cues)).await;
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    info!("quit requested");
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let update_start = Instant::now();
                update_scene(frame_dt, keyboard.input, &mut scene);
                let update_duration = update_start.elapsed();

                for cue in scene.cues.drain(..) {
                    audio.play_cue(cue);
                }

                let render_start = Instant::now();
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                macroquad::window::clear_background(BLACK);
                draw_backdrop(scene.backdrop, background, &metrics);
                if let Some(target) = &scene.target {
                    draw_target(target, &metrics);
                }
                for platform in &scene.platforms {
                    draw_rect(platform.position, platform.size, Color::LIGHT_GREY, &metrics);
                }
                if let Some(player) = scene.player {
                    draw_rect(
                        player.position,
                        Vec2::splat(player.size),
                        player.color,
                        &metrics,
                    );
                }
                if scene.overlay.alpha > 0.0 {
                    draw_rect(Vec2::ZERO, scene.world_size(), scene.overlay, &metrics);
                }
                if let Some(card) = &scene.card {
                    draw_card(card, scene.stage, &metrics);
                }
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    update: update_duration,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_update,
                        avg_render,
                    }) = fps_metrics
                    {
                        info!(
                            "FPS: {:.2} (10s avg: {:.2}) | update: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_update.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Letterboxes the fixed-size world inside the current window.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world = scene.world_size();
        let scale = if world.x <= f32::EPSILON || world.y <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world.x).min(screen_height / world.y)
        };
        let offset_x = ((screen_width - world.x * scale) * 0.5).max(0.0);
        let offset_y = ((screen_height - world.y * scale) * 0.5).max(0.0);

        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + world.x * self.scale,
            self.offset_y + world.y * self.scale,
        )
    }
}

fn card_layout(stage: Stage) -> (f32, f32) {
    match stage {
        Stage::AllComplete => (100.0, 180.0),
        Stage::Instructions | Stage::Playing => (50.0, 150.0),
    }
}

fn draw_backdrop(backdrop: Backdrop, image: Option<Texture2D>, metrics: &SceneMetrics) {
    let world = Vec2::new(color_realm_core::SCREEN_WIDTH, color_realm_core::SCREEN_HEIGHT);
    match (backdrop, image) {
        (Backdrop::WorldImage { .. }, Some(texture)) => {
            let origin = metrics.to_screen(Vec2::ZERO);
            let size = world * metrics.scale;
            macroquad::texture::draw_texture_ex(
                texture,
                origin.x,
                origin.y,
                macroquad::color::WHITE,
                DrawTextureParams {
                    dest_size: Some(macroquad::math::Vec2::new(size.x, size.y)),
                    ..DrawTextureParams::default()
                },
            );
        }
        (Backdrop::WorldImage { fallback }, None) | (Backdrop::Solid(fallback), _) => {
            draw_rect(Vec2::ZERO, world, fallback, metrics);
        }
    }
}

fn draw_rect(position: Vec2, size: Vec2, color: Color, metrics: &SceneMetrics) {
    let origin = metrics.to_screen(position);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        size.x * metrics.scale,
        size.y * metrics.scale,
        to_macroquad_color(color),
    );
}

fn draw_target(target: &TargetPresentation, metrics: &SceneMetrics) {
    let center = metrics.to_screen(TARGET_CENTER);
    macroquad::shapes::draw_circle(
        center.x,
        center.y,
        TARGET_RADIUS * metrics.scale,
        to_macroquad_color(target.color),
    );
    draw_centered_text(
        &target.caption,
        TARGET_CAPTION_Y,
        CAPTION_FONT_SIZE,
        Color::YELLOW,
        metrics,
    );
    draw_centered_text(
        &target.hint,
        TARGET_HINT_Y,
        CAPTION_FONT_SIZE,
        Color::CYAN,
        metrics,
    );
}

fn draw_card(card: &CardPresentation, stage: Stage, metrics: &SceneMetrics) {
    let (title_y, first_line_y) = card_layout(stage);
    draw_centered_text(&card.title, title_y, TITLE_FONT_SIZE, Color::YELLOW, metrics);
    for (index, line) in card.lines.iter().enumerate() {
        let y = first_line_y + LINE_SPACING * index as f32;
        draw_centered_text(line, y, LINE_FONT_SIZE, Color::CYAN, metrics);
    }
}

/// Draws text whose bounding box is centred on `(SCREEN_WIDTH / 2, center_y)` in world space.
fn draw_centered_text(
    text: &str,
    center_y: f32,
    font_size: f32,
    color: Color,
    metrics: &SceneMetrics,
) {
    if text.is_empty() {
        return;
    }
    let size = (font_size * metrics.scale).max(1.0);
    let dimensions = macroquad::text::measure_text(text, None, size as u16, 1.0);
    let center = metrics.to_screen(Vec2::new(color_realm_core::SCREEN_WIDTH * 0.5, center_y));
    let x = center.x - dimensions.width * 0.5;
    let baseline = center.y - dimensions.height * 0.5 + dimensions.offset_y;
    macroquad::text::draw_text(text, x, baseline, size, to_macroquad_color(color));
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(Stage::Playing, Backdrop::Solid(Color::SKY_BLUE))
    }

    #[test]
    fn scene_metrics_fill_a_window_matching_the_world() {
        let metrics = SceneMetrics::from_scene(&scene(), 1000.0, 700.0);

        assert_eq!(
            metrics,
            SceneMetrics {
                scale: 1.0,
                offset_x: 0.0,
                offset_y: 0.0,
            }
        );
        assert_eq!(metrics.to_screen(Vec2::new(500.0, 650.0)), Vec2::new(500.0, 650.0));
    }

    #[test]
    fn scene_metrics_letterbox_wide_windows() {
        let metrics = SceneMetrics::from_scene(&scene(), 2400.0, 700.0);

        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.offset_x, 700.0);
        assert_eq!(metrics.offset_y, 0.0);
        assert_eq!(metrics.to_screen(Vec2::ZERO), Vec2::new(700.0, 0.0));
    }

    #[test]
    fn scene_metrics_shrink_to_fit_tall_windows() {
        let metrics = SceneMetrics::from_scene(&scene(), 500.0, 1000.0);

        assert_eq!(metrics.scale, 0.5);
        assert_eq!(metrics.offset_x, 0.0);
        assert_eq!(metrics.offset_y, 325.0);
        assert_eq!(
            metrics.to_screen(Vec2::new(1000.0, 700.0)),
            Vec2::new(500.0, 675.0)
        );
    }

    #[test]
    fn completion_card_sits_lower_than_instructions() {
        assert_eq!(card_layout(Stage::Instructions), (50.0, 150.0));
        assert_eq!(card_layout(Stage::AllComplete), (100.0, 180.0));
    }

    #[test]
    fn macroquad_color_keeps_channels() {
        let converted = to_macroquad_color(Color::SKY_BLUE.with_alpha_u8(51));

        assert_eq!(converted.r, Color::SKY_BLUE.red);
        assert_eq!(converted.g, Color::SKY_BLUE.green);
        assert_eq!(converted.b, Color::SKY_BLUE.blue);
        assert!((converted.a - 0.2).abs() <= 1e-6);
    }

    #[test]
    fn fps_counter_reports_average_frames_per_second() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            update: Duration::from_millis(2),
            render: Duration::from_millis(4),
        };
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());

        let metrics = counter
            .record_frame(frame(250))
            .expect("should report FPS after one second of samples");
        assert!((metrics.per_second - 4.0).abs() <= 1e-3);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() <= 1e-3);
        assert_eq!(metrics.avg_update, Duration::from_millis(2));
        assert_eq!(metrics.avg_render, Duration::from_millis(4));
        assert!(counter.record_frame(frame(250)).is_none());
    }

    #[test]
    fn fps_counter_tracks_trailing_ten_second_average() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            ..FrameBreakdown::default()
        };

        for _ in 0..10 {
            for sample in 0..5 {
                let metrics = counter.record_frame(frame(200));
                if sample == 4 {
                    let metrics = metrics.expect("should report every second");
                    assert!((metrics.per_second - 5.0).abs() <= 1e-3);
                    assert!((metrics.trailing_ten_seconds - 5.0).abs() <= 1e-3);
                } else {
                    assert!(metrics.is_none());
                }
            }
        }

        for sample in 0..10 {
            let metrics = counter.record_frame(frame(100));
            if sample == 9 {
                let metrics = metrics.expect("should report every second");
                assert!((metrics.per_second - 10.0).abs() <= 1e-3);
                assert!((metrics.trailing_ten_seconds - 5.5).abs() <= 1e-3);
            } else {
                assert!(metrics.is_none());
            }
        }
    }
}
