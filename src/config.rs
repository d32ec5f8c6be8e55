use serde::{Deserialize, Serialize};

use crate::coords::WorldPos;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub w: f32,
    pub h: f32,
}

impl SpriteSize {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Every tunable of a session. Missing JSON fields fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for powerup placement and kick destinations.
    pub seed: u64,
    /// Play-field size in world units.
    pub field_width: f32,
    pub field_height: f32,
    /// Edge length of one lawn cell in world units.
    pub tile_size: f32,
    /// Target simulation rate; a frame of `1 / tick_rate` seconds has scale 1.0.
    pub tick_rate: f32,
    pub stencil_radius: u32,
    pub corner_threshold: f32,

    /// `None` starts the mower in the middle of the field.
    pub player_start: Option<WorldPos>,
    pub player_start_angle: f32,
    pub player_speed: f32,
    /// Degrees per tick at scale 1.0.
    pub turn_rate: f32,
    pub player_sprite: SpriteSize,
    /// Local-space points ahead of the mower that sense uncut grass.
    pub probe_offsets: Vec<WorldPos>,
    pub speed_boost_factor: f32,

    pub enemy_start: WorldPos,
    pub enemy_speed: f32,
    pub enemy_sprite: SpriteSize,
    /// Point relative to the enemy center that it steers onto the mower.
    pub hunt_offset: WorldPos,
    pub kick_distance: f32,
    pub kick_buffer: f32,
    /// Seconds of wind-up before a kick lands.
    pub charge_duration: f32,
    pub kick_steps: u32,
    /// Degrees the mower spins per kick step.
    pub kick_spin: f32,
    /// Kick destinations stay this far inside the field.
    pub kick_margin: f32,

    pub money_limit: f64,
    pub normal_cost: f64,
    pub rebate_cost: f64,
    pub normal_power: u32,
    pub slowed_power: u32,

    /// Seconds between powerup spawns.
    pub powerup_interval: f32,
    pub powerup_margin_cells: i32,
    pub pickup_radius: f32,
    pub speed_duration: f32,
    pub rebate_duration: f32,
    pub stun_duration: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field_width: 560.0,
            field_height: 560.0,
            tile_size: 8.0,
            tick_rate: 60.0,
            stencil_radius: 2,
            corner_threshold: 1.5,
            player_start: None,
            player_start_angle: 0.0,
            player_speed: 2.0,
            turn_rate: 3.0,
            player_sprite: SpriteSize::new(24.0, 16.0),
            probe_offsets: vec![
                WorldPos::new(14.0, -6.0),
                WorldPos::new(14.0, 0.0),
                WorldPos::new(14.0, 6.0),
            ],
            speed_boost_factor: 2.0,
            enemy_start: WorldPos::new(40.0, 40.0),
            enemy_speed: 1.2,
            enemy_sprite: SpriteSize::new(20.0, 28.0),
            hunt_offset: WorldPos::new(0.0, 12.0),
            kick_distance: 20.0,
            kick_buffer: 2.0,
            charge_duration: 0.5,
            kick_steps: 50,
            kick_spin: 14.4,
            kick_margin: 32.0,
            money_limit: 5000.0,
            normal_cost: 0.001,
            rebate_cost: -0.0005,
            normal_power: 800,
            slowed_power: 1200,
            powerup_interval: 15.0,
            powerup_margin_cells: 6,
            pickup_radius: 32.0,
            speed_duration: 5.0,
            rebate_duration: 8.0,
            stun_duration: 4.0,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn player_start_pos(&self) -> WorldPos {
        self.player_start
            .unwrap_or_else(|| WorldPos::new(self.field_width * 0.5, self.field_height * 0.5))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, v) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("tile_size", self.tile_size),
            ("tick_rate", self.tick_rate),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(field, format!("must be positive, got {v}")));
            }
        }
        if self.field_width < self.tile_size || self.field_height < self.tile_size {
            return Err(invalid("tile_size", "field must hold at least one tile"));
        }
        if self.stencil_radius == 0 {
            return Err(invalid("stencil_radius", "must be at least 1"));
        }
        if self.corner_threshold < 1.0 {
            return Err(invalid("corner_threshold", "must be at least 1.0"));
        }
        if self.money_limit <= 0.0 {
            return Err(invalid("money_limit", "must be positive"));
        }
        if self.kick_steps == 0 {
            return Err(invalid("kick_steps", "must be at least 1"));
        }
        if self.powerup_interval <= 0.0 {
            return Err(invalid("powerup_interval", "must be positive"));
        }
        Ok(())
    }
}
