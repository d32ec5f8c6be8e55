use rand::{SeedableRng, rngs::StdRng};

use crate::actor::{Actor, Renderer};
use crate::config::GameConfig;
use crate::coords::WorldPos;
use crate::economy::EconomyState;
use crate::enemy::{Enemy, EnemyAction, KickFrame, KickSequence};
use crate::error::GameError;
use crate::grid::TileGrid;
use crate::input::InputState;
use crate::painter::paint_path;
use crate::player::{Player, PlayerTick};
use crate::powerup::{Powerup, PowerupKind, PowerupSpawner};
use crate::stencil::{StencilTemplate, bake};

/// Longest frame the simulation will integrate in one tick, in seconds.
pub const MAX_FRAME_SECONDS: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
	OverBudget,
	LawnMown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
	Playing,
	GameOver(GameOverReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
	PowerupSpawned { kind: PowerupKind, pos: WorldPos },
	PowerupCollected { kind: PowerupKind, replaced: bool },
	EffectExpired(PowerupKind),
	KickDelivered { from: WorldPos, to: WorldPos },
	GameOver(GameOverReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
	pub game_over: bool,
	pub reason: Option<GameOverReason>,
	pub coverage_percent: f32,
	pub money_spent: f64,
	pub events: Vec<GameEvent>,
}

/// One game from first tick to game over. Owns every piece of state; the
/// driver feeds it input and time and reads it back for drawing.
#[derive(Debug)]
pub struct Session {
	config: GameConfig,
	template: StencilTemplate,
	grid: TileGrid,
	player: Player,
	enemy: Enemy,
	powerups: Vec<Powerup>,
	spawner: PowerupSpawner,
	economy: EconomyState,
	status: GameStatus,
	rng: StdRng,
	ticks: u64,
}

impl Session {
	pub fn new(config: GameConfig) -> Result<Self, GameError> {
		config.validate()?;
		let grid = TileGrid::for_field(config.field_width, config.field_height, config.tile_size)?;
		let template = bake(config.stencil_radius, config.corner_threshold);
		tracing::info!(
			columns = grid.columns(),
			rows = grid.rows(),
			seed = config.seed,
			"session started"
		);
		Ok(Self {
			template,
			grid,
			player: Player::new(&config),
			enemy: Enemy::new(&config),
			powerups: Vec::new(),
			spawner: PowerupSpawner::new(config.powerup_interval, config.powerup_margin_cells),
			economy: economy_for(&config),
			status: GameStatus::Playing,
			rng: StdRng::seed_from_u64(config.seed),
			ticks: 0,
			config,
		})
	}

	pub fn config(&self) -> &GameConfig {
		&self.config
	}
	pub fn template(&self) -> &StencilTemplate {
		&self.template
	}
	pub fn grid(&self) -> &TileGrid {
		&self.grid
	}
	pub fn player(&self) -> &Player {
		&self.player
	}
	pub fn enemy(&self) -> &Enemy {
		&self.enemy
	}
	pub fn powerups(&self) -> &[Powerup] {
		&self.powerups
	}
	pub fn economy(&self) -> &EconomyState {
		&self.economy
	}
	pub fn status(&self) -> GameStatus {
		self.status
	}
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// Drops a powerup onto the lawn outside the spawn timer.
	pub fn place_powerup(&mut self, powerup: Powerup) {
		self.powerups.push(powerup);
	}

	/// Starts over with the same config and seed.
	pub fn restart(&mut self) {
		self.grid.reset();
		self.player = Player::new(&self.config);
		self.enemy = Enemy::new(&self.config);
		self.powerups.clear();
		self.spawner.reset();
		self.economy = economy_for(&self.config);
		self.status = GameStatus::Playing;
		self.rng = StdRng::seed_from_u64(self.config.seed);
		self.ticks = 0;
		tracing::info!("session restarted");
	}

	pub fn summary(&self) -> TickResult {
		let reason = match self.status {
			GameStatus::Playing => None,
			GameStatus::GameOver(r) => Some(r),
		};
		TickResult {
			game_over: reason.is_some(),
			reason,
			coverage_percent: self.grid.coverage_percent(),
			money_spent: self.economy.money(),
			events: Vec::new(),
		}
	}

	pub fn tick(&mut self, dt: f32, input: InputState) -> TickResult {
		self.tick_with(dt, input, |_| {})
	}

	/// Like [`Session::tick`], but hands every frame of a kick to `on_kick_frame`
	/// so the driver can draw it before the tick returns.
	pub fn tick_with<F>(&mut self, dt: f32, input: InputState, mut on_kick_frame: F) -> TickResult
	where
		F: FnMut(&KickFrame),
	{
		if input.restart {
			self.restart();
			return self.summary();
		}
		if input.paused || self.status != GameStatus::Playing {
			return self.summary();
		}

		// A non-finite delta would poison every actor; treat it as a stalled frame of zero length.
		let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_SECONDS) } else { 0.0 };
		let frame_scale = dt * self.config.tick_rate;
		let mut events = Vec::new();
		self.ticks += 1;

		self.player.update(PlayerTick {
			input: &input,
			grid: &self.grid,
			economy: &mut self.economy,
			field_width: self.config.field_width,
			field_height: self.config.field_height,
			tile_size: self.config.tile_size,
			frame_scale,
			tick_rate: self.config.tick_rate,
		});
		if self.economy.is_over_budget() {
			self.end(GameOverReason::OverBudget, &mut events);
		}

		paint_path(&mut self.grid, &self.template, self.player.position(), self.config.tile_size);
		if self.status == GameStatus::Playing && self.grid.is_fully_cut() {
			self.end(GameOverReason::LawnMown, &mut events);
		}

		for kind in self.player.tick_effects(dt) {
			self.expire(kind);
			events.push(GameEvent::EffectExpired(kind));
		}

		if self.status == GameStatus::Playing {
			self.update_enemy(dt, frame_scale, &mut on_kick_frame, &mut events);
			self.update_powerups(dt, &mut events);
		}

		TickResult { events, ..self.summary() }
	}

	fn end(&mut self, reason: GameOverReason, events: &mut Vec<GameEvent>) {
		self.status = GameStatus::GameOver(reason);
		tracing::info!(
			?reason,
			coverage = self.grid.coverage_percent(),
			money = self.economy.money(),
			ticks = self.ticks,
			"game over"
		);
		events.push(GameEvent::GameOver(reason));
	}

	fn update_enemy(
		&mut self,
		dt: f32,
		frame_scale: f32,
		on_kick_frame: &mut dyn FnMut(&KickFrame),
		events: &mut Vec<GameEvent>,
	) {
		let target = self.player.position();
		if self.enemy.update(target, dt, frame_scale) != EnemyAction::Kick {
			return;
		}
		let kick = KickSequence::random(
			target,
			self.config.field_width,
			self.config.field_height,
			self.config.kick_margin,
			self.config.kick_steps,
			self.config.kick_spin,
			&mut self.rng,
		);
		kick.run(&mut self.player, on_kick_frame);
		self.enemy.finish_kick();
		tracing::debug!(from = ?kick.start, to = ?kick.end, "mower kicked");
		events.push(GameEvent::KickDelivered { from: kick.start, to: kick.end });
	}

	fn update_powerups(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
		if let Some(p) = self.spawner.tick(dt, &self.grid, self.config.tile_size, &mut self.rng) {
			tracing::debug!(kind = p.kind.label(), pos = ?p.position(), "powerup spawned");
			events.push(GameEvent::PowerupSpawned { kind: p.kind, pos: p.position() });
			self.powerups.push(p);
		}

		let mower = self.player.position();
		let radius = self.config.pickup_radius;
		let mut collected = Vec::new();
		for p in self.powerups.iter_mut().filter(|p| p.touches(mower, radius)) {
			p.active = false;
			collected.push(p.kind);
		}
		for kind in collected {
			let replaced = self.activate(kind);
			tracing::debug!(kind = kind.label(), replaced, "powerup collected");
			events.push(GameEvent::PowerupCollected { kind, replaced });
		}
		self.powerups.retain(|p| p.active);
	}

	fn activate(&mut self, kind: PowerupKind) -> bool {
		let duration = match kind {
			PowerupKind::Speed => {
				self.player.boost_speed(self.config.speed_boost_factor);
				self.config.speed_duration
			}
			PowerupKind::Rebate => {
				self.economy.set_cost(self.config.rebate_cost);
				self.config.rebate_duration
			}
			PowerupKind::Stun => {
				self.enemy.stun();
				self.config.stun_duration
			}
		};
		self.player.apply_effect(kind, duration)
	}

	fn expire(&mut self, kind: PowerupKind) {
		tracing::debug!(kind = kind.label(), "effect expired");
		match kind {
			PowerupKind::Speed => self.player.restore_speed(),
			PowerupKind::Rebate => self.economy.restore_cost(),
			PowerupKind::Stun => self.enemy.unstun(),
		}
	}

	/// Renders powerups, then the enemy and mower in y order.
	pub fn draw(&mut self, renderer: &mut dyn Renderer) {
		for p in &mut self.powerups {
			p.draw(renderer);
		}
		if self.enemy.draws_behind(self.player.position()) {
			self.enemy.draw(renderer);
			self.player.draw(renderer);
		} else {
			self.player.draw(renderer);
			self.enemy.draw(renderer);
		}
	}
}

fn economy_for(config: &GameConfig) -> EconomyState {
	EconomyState::new(config.money_limit, config.normal_cost, config.normal_power, config.slowed_power)
}
