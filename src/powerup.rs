use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Body, SpriteId};
use crate::config::SpriteSize;
use crate::coords::{TileCoord, WorldPos};
use crate::error::GameError;
use crate::grid::TileGrid;

pub const POWERUP_SIZE: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Faster mower for a while.
    Speed = 0,
    /// Electricity pays the player back while active.
    Rebate = 1,
    /// Freezes the enemy.
    Stun = 2,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [PowerupKind::Speed, PowerupKind::Rebate, PowerupKind::Stun];

    pub fn label(self) -> &'static str {
        match self {
            PowerupKind::Speed => "Speed",
            PowerupKind::Rebate => "Rebate",
            PowerupKind::Stun => "Stun",
        }
    }
}

impl TryFrom<u8> for PowerupKind {
    type Error = GameError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(PowerupKind::Speed),
            1 => Ok(PowerupKind::Rebate),
            2 => Ok(PowerupKind::Stun),
            _ => Err(GameError::InvalidPowerupKind(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Powerup {
    body: Body,
    pub kind: PowerupKind,
    pub active: bool,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: WorldPos) -> Self {
        Self {
            body: Body::new(pos, 0.0, SpriteSize::new(POWERUP_SIZE, POWERUP_SIZE)),
            kind,
            active: true,
        }
    }

    /// Builds a powerup from a raw kind id, rejecting unknown ids.
    pub fn from_id(id: u8, pos: WorldPos) -> Result<Self, GameError> {
        Ok(Self::new(PowerupKind::try_from(id)?, pos))
    }

    pub fn touches(&self, p: WorldPos, radius: f32) -> bool {
        self.active && self.body.pos.distance_squared(p) < radius * radius
    }
}

impl Actor for Powerup {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn sprite(&self) -> SpriteId {
        SpriteId::Powerup(self.kind)
    }
}

/// Drops one random powerup every `interval` seconds.
#[derive(Debug, Clone)]
pub struct PowerupSpawner {
    interval: f32,
    elapsed: f32,
    margin_cells: i32,
}

impl PowerupSpawner {
    pub fn new(interval: f32, margin_cells: i32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            margin_cells,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn tick<R: Rng>(&mut self, dt: f32, grid: &TileGrid, tile_size: f32, rng: &mut R) -> Option<Powerup> {
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed -= self.interval;
        let kind = PowerupKind::ALL[rng.gen_range(0..PowerupKind::ALL.len())];
        let max_col = (grid.columns() - self.margin_cells).max(1);
        let max_row = (grid.rows() - self.margin_cells).max(1);
        let cell = TileCoord::new(rng.gen_range(0..max_col), rng.gen_range(0..max_row));
        Some(Powerup::new(kind, cell.center(tile_size)))
    }
}
