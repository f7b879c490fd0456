use color_realm_core::{
    HorizontalDirection, PaletteColor, Rect, PLAYER_PALETTE, SCREEN_HEIGHT, SCREEN_WIDTH,
};

use crate::Body;

/// Side length of the player's square sprite.
pub const PLAYER_SIZE: f32 = 30.0;

const GRAVITY: f32 = 0.5;
const JUMP_POWER: f32 = -18.0;
const MOVE_SPEED: f32 = 5.0;
const SPAWN_FLOOR_OFFSET: f32 = 50.0;

/// Player-controlled square that runs, jumps and changes color.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    x: f32,
    y: f32,
    velocity_x: f32,
    velocity_y: f32,
    size: f32,
    color_index: usize,
    is_jumping: bool,
    on_platform: bool,
    can_move_left: bool,
    can_move_right: bool,
}

impl Player {
    /// Creates a white player resting at the spawn position.
    #[must_use]
    pub fn new() -> Self {
        let (x, y) = Self::spawn_origin(PLAYER_SIZE);
        Self {
            x,
            y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            size: PLAYER_SIZE,
            color_index: 0,
            is_jumping: false,
            on_platform: false,
            can_move_left: true,
            can_move_right: true,
        }
    }

    /// Top-left corner of a player of the given size centred on the spawn point.
    #[must_use]
    pub fn spawn_origin(size: f32) -> (f32, f32) {
        (
            SCREEN_WIDTH / 2.0 - size / 2.0,
            SCREEN_HEIGHT - SPAWN_FLOOR_OFFSET - size / 2.0,
        )
    }

    /// Moves the player back to the spawn point, keeping velocity and color.
    pub fn respawn(&mut self) {
        let (x, y) = Self::spawn_origin(self.size);
        self.x = x;
        self.y = y;
    }

    /// Places the player's top-left corner at the provided coordinates.
    pub fn place_at(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Launches the player upward unless already airborne off a platform.
    ///
    /// Returns `true` when the jump took effect.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping && !self.on_platform {
            return false;
        }
        self.velocity_y = JUMP_POWER;
        self.is_jumping = true;
        self.on_platform = false;
        true
    }

    /// Marks the player as standing on a platform.
    pub fn set_on_platform(&mut self) {
        self.is_jumping = false;
        self.on_platform = true;
        self.velocity_y = 0.0;
    }

    /// Starts moving left when permitted.
    pub fn move_left(&mut self) {
        if self.can_move_left {
            self.velocity_x = -MOVE_SPEED;
        }
    }

    /// Starts moving right when permitted.
    pub fn move_right(&mut self) {
        if self.can_move_right {
            self.velocity_x = MOVE_SPEED;
        }
    }

    /// Starts moving in the provided direction.
    pub fn start_moving(&mut self, direction: HorizontalDirection) {
        match direction {
            HorizontalDirection::Left => self.move_left(),
            HorizontalDirection::Right => self.move_right(),
        }
    }

    /// Halts horizontal movement.
    pub fn stop_moving(&mut self) {
        self.velocity_x = 0.0;
    }

    /// Halts horizontal movement only if the player travels in the released direction.
    pub fn release(&mut self, direction: HorizontalDirection) {
        let travelling = match direction {
            HorizontalDirection::Left => self.velocity_x < 0.0,
            HorizontalDirection::Right => self.velocity_x > 0.0,
        };
        if travelling {
            self.stop_moving();
        }
    }

    /// Advances to the next palette color, wrapping around.
    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PLAYER_PALETTE.len();
    }

    /// Retreats to the previous palette color, wrapping around.
    pub fn prev_color(&mut self) {
        self.color_index = (self.color_index + PLAYER_PALETTE.len() - 1) % PLAYER_PALETTE.len();
    }

    /// Color currently displayed by the player.
    #[must_use]
    pub fn color(&self) -> PaletteColor {
        PLAYER_PALETTE[self.color_index]
    }

    /// Index of the displayed color within the player palette.
    #[must_use]
    pub const fn color_index(&self) -> usize {
        self.color_index
    }

    /// Current velocity as `(horizontal, vertical)` units per tick.
    #[must_use]
    pub const fn velocity(&self) -> (f32, f32) {
        (self.velocity_x, self.velocity_y)
    }

    /// Overrides the current velocity.
    pub fn set_velocity(&mut self, horizontal: f32, vertical: f32) {
        self.velocity_x = horizontal;
        self.velocity_y = vertical;
    }

    /// Whether the player is airborne after a jump.
    #[must_use]
    pub const fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// Whether the player currently stands on a platform.
    #[must_use]
    pub const fn on_platform(&self) -> bool {
        self.on_platform
    }

    /// Whether leftward movement is permitted.
    #[must_use]
    pub const fn can_move_left(&self) -> bool {
        self.can_move_left
    }

    /// Whether rightward movement is permitted.
    #[must_use]
    pub const fn can_move_right(&self) -> bool {
        self.can_move_right
    }

    /// Clears platform contact and lifts movement restrictions before collisions are resolved.
    pub(crate) fn begin_platform_step(&mut self) {
        self.on_platform = false;
        self.can_move_left = true;
        self.can_move_right = true;
    }

    /// Rests the player on a surface and carries it by the surface's displacement.
    pub(crate) fn land_on(&mut self, surface_top: f32, carry: f32) {
        self.y = surface_top - self.size;
        self.set_on_platform();
        self.x = (self.x + carry).clamp(0.0, SCREEN_WIDTH - self.size);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Body for Player {
    fn update(&mut self) {
        self.velocity_y += GRAVITY;
        self.x += self.velocity_x;
        self.y += self.velocity_y;

        self.x = self.x.clamp(0.0, SCREEN_WIDTH - self.size);
        if self.y + self.size > SCREEN_HEIGHT {
            self.y = SCREEN_HEIGHT - self.size;
            self.is_jumping = false;
            self.on_platform = false;
            self.velocity_y = 0.0;
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_player() -> Player {
        let mut player = Player::new();
        for _ in 0..120 {
            player.update();
        }
        player
    }

    #[test]
    fn spawn_is_centred_above_the_floor() {
        let player = Player::new();
        let bounds = player.bounds();

        assert_eq!(bounds.left() + PLAYER_SIZE / 2.0, SCREEN_WIDTH / 2.0);
        assert_eq!(bounds.top() + PLAYER_SIZE / 2.0, SCREEN_HEIGHT - 50.0);
        assert_eq!(player.color(), PaletteColor::White);
    }

    #[test]
    fn falling_player_comes_to_rest_on_the_floor() {
        let player = grounded_player();

        assert_eq!(player.bounds().bottom(), SCREEN_HEIGHT);
        assert_eq!(player.velocity(), (0.0, 0.0));
        assert!(!player.is_jumping());
        assert!(!player.on_platform());
    }

    #[test]
    fn grounded_player_keeps_zero_vertical_velocity() {
        let mut player = grounded_player();
        for _ in 0..500 {
            player.update();
            assert_eq!(player.velocity().1, 0.0);
        }
    }

    #[test]
    fn second_jump_in_the_air_is_ignored() {
        let mut player = grounded_player();
        assert!(player.jump());
        player.update();
        let velocity = player.velocity();

        assert!(!player.jump());
        assert_eq!(player.velocity(), velocity);
    }

    #[test]
    fn jump_from_platform_is_allowed_while_marked_jumping() {
        let mut player = grounded_player();
        assert!(player.jump());
        player.set_on_platform();
        player.is_jumping = true;

        assert!(player.jump());
        assert_eq!(player.velocity().1, JUMP_POWER);
        assert!(!player.on_platform());
    }

    #[test]
    fn horizontal_position_is_clamped_to_screen() {
        let mut player = grounded_player();
        player.move_left();
        for _ in 0..400 {
            player.update();
        }
        assert_eq!(player.bounds().left(), 0.0);

        player.move_right();
        for _ in 0..400 {
            player.update();
        }
        assert_eq!(player.bounds().right(), SCREEN_WIDTH);
    }

    #[test]
    fn releasing_opposite_key_keeps_moving() {
        let mut player = Player::new();
        player.move_right();
        player.release(HorizontalDirection::Left);
        assert_eq!(player.velocity().0, MOVE_SPEED);

        player.release(HorizontalDirection::Right);
        assert_eq!(player.velocity().0, 0.0);
    }

    #[test]
    fn color_cycles_return_to_start_after_full_palette() {
        let mut player = Player::new();
        player.next_color();
        player.next_color();
        let start = player.color_index();

        for _ in 0..PLAYER_PALETTE.len() {
            player.next_color();
        }
        assert_eq!(player.color_index(), start);

        for _ in 0..PLAYER_PALETTE.len() {
            player.prev_color();
        }
        assert_eq!(player.color_index(), start);
    }

    #[test]
    fn previous_color_wraps_to_last_entry() {
        let mut player = Player::new();
        player.prev_color();
        assert_eq!(player.color(), PaletteColor::Cyan);
    }

    #[test]
    fn respawn_keeps_velocity_and_color() {
        let mut player = Player::new();
        player.next_color();
        player.place_at(10.0, 20.0);
        player.set_velocity(5.0, 3.0);

        player.respawn();

        assert_eq!(player.bounds(), Player::new().bounds());
        assert_eq!(player.velocity(), (5.0, 3.0));
        assert_eq!(player.color(), PaletteColor::Red);
    }
}
