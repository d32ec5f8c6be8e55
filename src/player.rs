use std::collections::BTreeMap;

use crate::actor::{Actor, Body, SpriteId};
use crate::config::GameConfig;
use crate::coords::{TileCoord, WorldPos};
use crate::economy::{EconomyState, PowerLevel};
use crate::grid::TileGrid;
use crate::input::InputState;
use crate::powerup::PowerupKind;

/// Timer for one running powerup effect, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
	pub elapsed: f32,
	pub duration: f32,
}

impl ActiveEffect {
	pub fn remaining(&self) -> f32 {
		(self.duration - self.elapsed).max(0.0)
	}
}

/// Everything one player update reads or bills.
#[derive(Debug)]
pub struct PlayerTick<'a> {
	pub input: &'a InputState,
	pub grid: &'a TileGrid,
	pub economy: &'a mut EconomyState,
	pub field_width: f32,
	pub field_height: f32,
	pub tile_size: f32,
	pub frame_scale: f32,
	pub tick_rate: f32,
}

#[derive(Debug, Clone)]
pub struct Player {
	body: Body,
	base_speed: f32,
	speed: f32,
	turn_rate: f32,
	probes: Vec<WorldPos>,
	slowed: bool,
	effects: BTreeMap<PowerupKind, ActiveEffect>,
}

impl Player {
	pub fn new(config: &GameConfig) -> Self {
		Self {
			body: Body::new(config.player_start_pos(), config.player_start_angle, config.player_sprite),
			base_speed: config.player_speed,
			speed: config.player_speed,
			turn_rate: config.turn_rate,
			probes: config.probe_offsets.clone(),
			slowed: false,
			effects: BTreeMap::new(),
		}
	}

	pub fn speed(&self) -> f32 {
		self.speed
	}

	pub fn is_slowed(&self) -> bool {
		self.slowed
	}

	pub fn effects(&self) -> &BTreeMap<PowerupKind, ActiveEffect> {
		&self.effects
	}

	pub fn set_position(&mut self, pos: WorldPos) {
		self.body.pos = pos;
	}

	pub fn set_angle(&mut self, angle: f32) {
		self.body.angle = angle;
	}

	pub fn boost_speed(&mut self, factor: f32) {
		self.speed = self.base_speed * factor;
	}

	pub fn restore_speed(&mut self) {
		self.speed = self.base_speed;
	}

	/// Cells under the forward probes, in world order. Off-grid cells are included;
	/// callers look them up through [`TileGrid::get`].
	pub fn probe_cells(&self, tile_size: f32) -> impl Iterator<Item = TileCoord> + '_ {
		self.probes.iter().map(move |offset| {
			TileCoord::from_world(self.body.pos + offset.rotated(self.body.angle), tile_size)
		})
	}

	fn senses_grass(&self, grid: &TileGrid, tile_size: f32) -> bool {
		self.probe_cells(tile_size)
			.any(|c| grid.get(c).is_some_and(|t| t.is_unmown()))
	}

	/// Turns, senses grass, moves and bills one tick of power.
	pub fn update(&mut self, tick: PlayerTick<'_>) {
		self.body.angle += tick.input.turn_axis() * self.turn_rate * tick.frame_scale;

		self.slowed = self.senses_grass(tick.grid, tick.tile_size);
		let level = if self.slowed { PowerLevel::Slowed } else { PowerLevel::Normal };
		tick.economy.set_level(level);

		let effective = if self.slowed { self.speed * 0.5 } else { self.speed };
		let step = WorldPos::heading(self.body.angle) * (effective * tick.frame_scale);
		let before = self.body.pos;
		// An axis that would leave the field is dropped for this tick.
		let nx = self.body.pos.x + step.x;
		if nx > 0.0 && nx < tick.field_width {
			self.body.pos.x = nx;
		}
		let ny = self.body.pos.y + step.y;
		if ny > 0.0 && ny < tick.field_height {
			self.body.pos.y = ny;
		}
		self.body.velocity = self.body.pos - before;

		tick.economy.charge(tick.frame_scale, tick.tick_rate);
	}

	/// Starts an effect timer, replacing any running timer of the same kind.
	/// Returns whether one was replaced.
	pub fn apply_effect(&mut self, kind: PowerupKind, duration: f32) -> bool {
		self.effects
			.insert(kind, ActiveEffect { elapsed: 0.0, duration })
			.is_some()
	}

	/// Advances effect timers and removes the finished ones, returning them
	/// so the caller can undo their effect.
	pub fn tick_effects(&mut self, dt: f32) -> Vec<PowerupKind> {
		let mut expired = Vec::new();
		for (kind, effect) in self.effects.iter_mut() {
			effect.elapsed += dt;
			if effect.elapsed >= effect.duration {
				expired.push(*kind);
			}
		}
		for kind in &expired {
			self.effects.remove(kind);
		}
		expired
	}
}

impl Actor for Player {
	fn body(&self) -> &Body {
		&self.body
	}
	fn body_mut(&mut self) -> &mut Body {
		&mut self.body
	}
	fn sprite(&self) -> SpriteId {
		SpriteId::Player
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tile::TileState;

	fn config() -> GameConfig {
		GameConfig::default()
	}

	fn economy(c: &GameConfig) -> EconomyState {
		EconomyState::new(c.money_limit, c.normal_cost, c.normal_power, c.slowed_power)
	}

	fn mown_grid(c: &GameConfig) -> TileGrid {
		let mut g = TileGrid::for_field(c.field_width, c.field_height, c.tile_size).unwrap();
		for row in 0..g.rows() {
			for col in 0..g.columns() {
				g.upgrade(TileCoord::new(col, row), TileState::Mown);
			}
		}
		g
	}

	fn step(p: &mut Player, input: &InputState, grid: &TileGrid, e: &mut EconomyState, c: &GameConfig) {
		p.update(PlayerTick {
			input,
			grid,
			economy: e,
			field_width: c.field_width,
			field_height: c.field_height,
			tile_size: c.tile_size,
			frame_scale: 1.0,
			tick_rate: c.tick_rate,
		});
	}

	#[test]
	fn grass_ahead_halves_speed_and_raises_draw() {
		let c = config();
		let grid = TileGrid::for_field(c.field_width, c.field_height, c.tile_size).unwrap();
		let mut e = economy(&c);
		let mut p = Player::new(&c);
		step(&mut p, &InputState::default(), &grid, &mut e, &c);
		assert!(p.is_slowed());
		assert_eq!(e.level(), PowerLevel::Slowed);
		assert!((p.position().x - 281.0).abs() < 1e-4);
	}

	#[test]
	fn cut_lawn_runs_at_full_speed() {
		let c = config();
		let grid = mown_grid(&c);
		let mut e = economy(&c);
		let mut p = Player::new(&c);
		step(&mut p, &InputState::default(), &grid, &mut e, &c);
		assert!(!p.is_slowed());
		assert_eq!(e.level(), PowerLevel::Normal);
		assert!((p.position().x - 282.0).abs() < 1e-4);
		assert!((e.money() - 0.8).abs() < 1e-9);
	}

	#[test]
	fn probes_rotate_with_facing() {
		let c = config();
		let mut p = Player::new(&c);
		p.set_angle(90.0);
		// Facing up: the middle probe sits 14 units above the center.
		let cells: Vec<_> = p.probe_cells(c.tile_size).collect();
		assert_eq!(cells[1], TileCoord::from_world(WorldPos::new(280.0, 266.0), c.tile_size));
	}

	#[test]
	fn off_grid_sensor_cells_are_reported_but_never_slow() {
		let c = GameConfig { player_start: Some(WorldPos::new(556.0, 280.0)), ..config() };
		let grid = mown_grid(&c);
		let mut p = Player::new(&c);
		let cells: Vec<_> = p.probe_cells(c.tile_size).collect();
		assert_eq!(cells.len(), 3);
		assert!(cells.iter().all(|cell| !grid.contains(*cell)));
		let mut e = economy(&c);
		step(&mut p, &InputState::default(), &grid, &mut e, &c);
		assert!(!p.is_slowed());
	}

	#[test]
	fn turning_follows_input() {
		let c = config();
		let grid = mown_grid(&c);
		let mut e = economy(&c);
		let mut p = Player::new(&c);
		let left = InputState { turn_left: true, ..Default::default() };
		step(&mut p, &left, &grid, &mut e, &c);
		assert!((p.angle() - c.turn_rate).abs() < 1e-4);
	}

	#[test]
	fn blocked_axis_sticks_other_axis_moves() {
		let c = GameConfig { player_start: Some(WorldPos::new(559.5, 100.0)), ..config() };
		let grid = mown_grid(&c);
		let mut e = economy(&c);
		let mut p = Player::new(&c);
		p.set_angle(-45.0);
		step(&mut p, &InputState::default(), &grid, &mut e, &c);
		assert_eq!(p.position().x, 559.5);
		assert!(p.position().y > 100.0);
		assert_eq!(p.body().velocity.x, 0.0);
	}

	#[test]
	fn same_effect_replaces_instead_of_stacking() {
		let c = config();
		let mut p = Player::new(&c);
		assert!(!p.apply_effect(PowerupKind::Speed, 5.0));
		assert!(p.tick_effects(3.0).is_empty());
		assert!(p.apply_effect(PowerupKind::Speed, 5.0));
		let effect = p.effects()[&PowerupKind::Speed];
		assert_eq!(effect.elapsed, 0.0);
		assert_eq!(effect.duration, 5.0);
		assert!(p.tick_effects(4.0).is_empty());
		assert_eq!(p.tick_effects(1.0), vec![PowerupKind::Speed]);
		assert!(p.effects().is_empty());
	}

	#[test]
	fn boost_and_restore_speed() {
		let c = config();
		let mut p = Player::new(&c);
		p.boost_speed(c.speed_boost_factor);
		assert_eq!(p.speed(), 4.0);
		p.restore_speed();
		assert_eq!(p.speed(), 2.0);
	}
}
