//! The groundskeeper: chases the mower and kicks it across the lawn.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Body, SpriteId};
use crate::config::GameConfig;
use crate::coords::WorldPos;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyState {
	Pursuing,
	/// Standing still winding up; `elapsed` is in seconds.
	ChargingKick { elapsed: f32 },
	/// A kick has landed and the kick sequence is playing.
	Kicking,
	Stunned,
}

/// What the session has to do after an enemy update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
	None,
	Kick,
}

#[derive(Debug, Clone)]
pub struct Enemy {
	body: Body,
	speed: f32,
	hunt_offset: WorldPos,
	kick_distance: f32,
	kick_buffer: f32,
	charge_duration: f32,
	state: EnemyState,
}

impl Enemy {
	pub fn new(config: &GameConfig) -> Self {
		Self {
			body: Body::new(config.enemy_start, 0.0, config.enemy_sprite),
			speed: config.enemy_speed,
			hunt_offset: config.hunt_offset,
			kick_distance: config.kick_distance,
			kick_buffer: config.kick_buffer,
			charge_duration: config.charge_duration,
			state: EnemyState::Pursuing,
		}
	}

	pub fn state(&self) -> EnemyState {
		self.state
	}

	pub fn is_stunned(&self) -> bool {
		self.state == EnemyState::Stunned
	}

	/// The point the enemy steers onto its target.
	pub fn hunt_point(&self) -> WorldPos {
		self.body.pos + self.hunt_offset
	}

	pub fn set_position(&mut self, pos: WorldPos) {
		self.body.pos = pos;
	}

	/// Painter's-order hint: true when the enemy should be drawn before the target.
	pub fn draws_behind(&self, target: WorldPos) -> bool {
		self.hunt_point().y < target.y
	}

	pub fn stun(&mut self) {
		if self.state != EnemyState::Stunned {
			tracing::debug!(from = ?self.state, "enemy stunned");
		}
		self.state = EnemyState::Stunned;
	}

	pub fn unstun(&mut self) {
		if self.state == EnemyState::Stunned {
			tracing::debug!("enemy recovered");
			self.state = EnemyState::Pursuing;
		}
	}

	pub fn finish_kick(&mut self) {
		if self.state == EnemyState::Kicking {
			self.state = EnemyState::Pursuing;
		}
	}

	/// Moves the hunt point towards `target`. The larger axis advances by
	/// exactly `speed * frame_scale`; within one step it snaps onto the target.
	fn step_toward(&mut self, target: WorldPos, frame_scale: f32) {
		let before = self.body.pos;
		let d = target - self.hunt_point();
		let max_axis = d.x.abs().max(d.y.abs());
		let step = self.speed * frame_scale;
		if max_axis <= step {
			self.body.pos = target - self.hunt_offset;
		} else {
			self.body.pos = self.body.pos + d * (step / max_axis);
		}
		self.body.velocity = self.body.pos - before;
	}

	pub fn update(&mut self, target: WorldPos, dt: f32, frame_scale: f32) -> EnemyAction {
		match self.state {
			EnemyState::Stunned | EnemyState::Kicking => {
				self.body.velocity = WorldPos::ZERO;
				EnemyAction::None
			}
			EnemyState::Pursuing => {
				self.step_toward(target, frame_scale);
				if self.hunt_point().distance(target) <= self.kick_distance - self.kick_buffer {
					tracing::debug!("enemy charging kick");
					self.state = EnemyState::ChargingKick { elapsed: 0.0 };
				}
				EnemyAction::None
			}
			EnemyState::ChargingKick { elapsed } => {
				self.body.velocity = WorldPos::ZERO;
				let elapsed = elapsed + dt;
				if elapsed < self.charge_duration {
					self.state = EnemyState::ChargingKick { elapsed };
					return EnemyAction::None;
				}
				if self.hunt_point().distance(target) <= self.kick_distance * 2.0 {
					self.state = EnemyState::Kicking;
					EnemyAction::Kick
				} else {
					self.state = EnemyState::Pursuing;
					EnemyAction::None
				}
			}
		}
	}
}

impl Actor for Enemy {
	fn body(&self) -> &Body {
		&self.body
	}
	fn body_mut(&mut self) -> &mut Body {
		&mut self.body
	}
	fn sprite(&self) -> SpriteId {
		SpriteId::Enemy
	}
}

/// One frame of the kick animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickFrame {
	pub step: u32,
	pub steps: u32,
	pub pos: WorldPos,
	pub angle: f32,
}

/// The mower's flight after a kick: a fixed number of steps along a slerp
/// from where it was to a random spot, spinning as it goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickSequence {
	pub start: WorldPos,
	pub end: WorldPos,
	pub steps: u32,
	pub spin: f32,
}

impl KickSequence {
	pub fn random<R: Rng>(
		start: WorldPos,
		field_width: f32,
		field_height: f32,
		margin: f32,
		steps: u32,
		spin: f32,
		rng: &mut R,
	) -> Self {
		let pick = |rng: &mut R, extent: f32| {
			let lo = margin.min(extent * 0.5);
			let hi = (extent - margin).max(lo);
			if hi > lo { rng.gen_range(lo..hi) } else { lo }
		};
		let end = WorldPos::new(pick(rng, field_width), pick(rng, field_height));
		Self { start, end, steps, spin }
	}

	/// Plays every step against `player`, handing each frame to `on_frame`.
	/// Always runs to completion and leaves the player exactly on `end`.
	pub fn run(&self, player: &mut Player, on_frame: &mut dyn FnMut(&KickFrame)) -> u32 {
		let steps = self.steps.max(1);
		let mut angle = player.angle();
		for step in 1..=steps {
			let pos = if step == steps {
				self.end
			} else {
				self.start.slerp(self.end, step as f32 / steps as f32)
			};
			angle += self.spin;
			player.set_position(pos);
			player.set_angle(angle);
			on_frame(&KickFrame { step, steps, pos, angle });
		}
		steps
	}
}
