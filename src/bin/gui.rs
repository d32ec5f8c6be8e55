use std::collections::VecDeque;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use mowdown::hud::{CONTROLS_HINT, RESTART_LABEL};
use mowdown::*;
use mowdown::Rect;

// ---------- Constants ----------
const ACTOR_Z_BASE: f32 = 10.0;
const TOAST_SECONDS: f32 = 2.0;

// ---------- Components ----------
#[derive(Component)]
struct TilePos {
	col: i32,
	row: i32,
}

#[derive(Component)]
struct ActorSprite; // Marker, respawned every frame from the session's draw list

// ---------- Resources ----------
#[derive(Resource)]
struct UiState {
	paused: bool,
	restart_requested: bool,
	toast: Option<(String, f32)>, // (message, remaining_seconds)
	event_log: Vec<String>,
	last_result: Option<TickResult>,
	/// Frames of a kick still being shown; the simulation waits until empty.
	kick_replay: VecDeque<KickFrame>,
}

impl Default for UiState {
	fn default() -> Self {
		Self {
			paused: false,
			restart_requested: false,
			toast: None,
			event_log: vec!["Mow the lawn before the money runs out".to_string()],
			last_result: None,
			kick_replay: VecDeque::new(),
		}
	}
}

#[derive(Resource)]
struct GameSession {
	session: Session,
}

// ---------- Entry ----------
fn main() {
	let config = match load_config() {
		Ok(c) => c,
		Err(e) => {
			eprintln!("mowdown: {e}");
			std::process::exit(1);
		}
	};
	let session = match Session::new(config) {
		Ok(s) => s,
		Err(e) => {
			eprintln!("mowdown: {e}");
			std::process::exit(1);
		}
	};

	App::new()
		.add_plugins(
			DefaultPlugins
				.set(WindowPlugin {
					primary_window: Some(Window {
						title: "Mowdown".to_string(),
						resolution: (1280, 800).into(),
						..Default::default()
					}),
					..Default::default()
				})
				.set(LogPlugin {
					filter: "info,mowdown=debug".to_string(),
					..Default::default()
				}),
		)
		.add_plugins(EguiPlugin::default())
		// Resources
		.insert_resource(UiState::default())
		.insert_resource(GameSession { session })
		// Setup
		.add_systems(Startup, (setup_camera, build_tiles))
		// Frame systems
		.add_systems(
			Update,
			(tick_session, sync_tile_colors, redraw_actors, update_toast_timer).chain(),
		)
		.add_systems(EguiPrimaryContextPass, draw_ui)
		.run();
}

/// Optional first argument: path to a JSON config file.
fn load_config() -> Result<GameConfig, GameError> {
	let Some(path) = std::env::args().nth(1) else {
		return Ok(GameConfig::default());
	};
	let text = std::fs::read_to_string(&path).map_err(|e| {
		ConfigError::Invalid { field: "path", reason: format!("{path}: {e}") }
	})?;
	Ok(GameConfig::from_json_str(&text)?)
}

// ---------- Setup ----------
fn setup_camera(mut commands: Commands, game: Res<GameSession>) {
	let config = game.session.config();
	let center_x = config.field_width * 0.5;
	let center_y = config.field_height * 0.5;
	commands.spawn((Camera2d, Transform::from_xyz(center_x, center_y, 1000.0)));
}

// ---------- Utilities ----------
fn tile_color_for_state(t: TileState) -> Color {
	match t {
		TileState::Full => Color::srgb(0.16, 0.52, 0.18),
		TileState::HalfMown => Color::srgb(0.36, 0.68, 0.30),
		TileState::Mown => Color::srgb(0.58, 0.80, 0.44),
	}
}

fn sprite_color(sprite: SpriteId) -> Color {
	match sprite {
		SpriteId::Player => Color::srgb(0.85, 0.15, 0.12),
		SpriteId::Enemy => Color::srgb(0.45, 0.30, 0.16),
		SpriteId::Powerup(PowerupKind::Speed) => Color::srgb(1.0, 0.85, 0.1),
		SpriteId::Powerup(PowerupKind::Rebate) => Color::srgb(0.2, 0.85, 0.9),
		SpriteId::Powerup(PowerupKind::Stun) => Color::srgb(0.65, 0.3, 0.9),
	}
}

/// Game space has y growing down; bevy has y growing up.
fn to_screen(p: WorldPos, field_height: f32) -> Vec2 {
	Vec2::new(p.x, field_height - p.y)
}

fn set_toast(ui: &mut UiState, msg: impl Into<String>) {
	ui.toast = Some((msg.into(), TOAST_SECONDS));
}

fn describe_event(e: &GameEvent) -> String {
	match e {
		GameEvent::PowerupSpawned { kind, .. } => format!("{} powerup appeared", kind.label()),
		GameEvent::PowerupCollected { kind, replaced: true } => format!("{} refreshed", kind.label()),
		GameEvent::PowerupCollected { kind, replaced: false } => format!("{} active", kind.label()),
		GameEvent::EffectExpired(kind) => format!("{} wore off", kind.label()),
		GameEvent::KickDelivered { .. } => "Kicked!".to_string(),
		GameEvent::GameOver(reason) => game_over_banner(*reason).to_string(),
	}
}

/// Spawns one sprite entity per draw call.
struct SceneRenderer<'a, 'w, 's> {
	commands: &'a mut Commands<'w, 's>,
	field_height: f32,
	z: f32,
	player_override: Option<KickFrame>,
}

impl Renderer for SceneRenderer<'_, '_, '_> {
	fn draw_sprite(&mut self, sprite: SpriteId, pos: WorldPos, angle: f32, size: SpriteSize) -> Rect {
		let (pos, angle) = match (sprite, self.player_override) {
			(SpriteId::Player, Some(frame)) => (frame.pos, frame.angle),
			_ => (pos, angle),
		};
		let screen = to_screen(pos, self.field_height);
		self.commands.spawn((
			Sprite::from_color(sprite_color(sprite), Vec2::new(size.w, size.h)),
			Transform::from_xyz(screen.x, screen.y, self.z).with_rotation(Quat::from_rotation_z(angle.to_radians())),
			ActorSprite,
		));
		self.z += 1.0;
		bounding_rect(pos, angle, size)
	}
}

// ---------- Systems: Lawn Rendering ----------
fn build_tiles(mut commands: Commands, game: Res<GameSession>) {
	let grid = game.session.grid();
	let tile = game.session.config().tile_size;
	let field_height = game.session.config().field_height;
	for (row, cells) in grid.iter_rows().enumerate() {
		for (col, state) in cells.iter().enumerate() {
			let center = TileCoord::new(col as i32, row as i32).center(tile);
			let screen = to_screen(center, field_height);
			commands.spawn((
				Sprite::from_color(tile_color_for_state(*state), Vec2::new(tile, tile)),
				Transform::from_xyz(screen.x, screen.y, 0.0),
				Visibility::Visible,
				TilePos { col: col as i32, row: row as i32 },
			));
		}
	}
}

fn sync_tile_colors(game: Res<GameSession>, mut q: Query<(&TilePos, &mut Sprite)>) {
	if !game.is_changed() {
		return;
	}
	let grid = game.session.grid();
	for (pos, mut sprite) in &mut q {
		if let Some(t) = grid.get(TileCoord::new(pos.col, pos.row)) {
			sprite.color = tile_color_for_state(t);
		}
	}
}

// ---------- Systems: Simulation ----------
fn tick_session(
	time: Res<Time>,
	keys: Res<ButtonInput<KeyCode>>,
	mut game: ResMut<GameSession>,
	mut ui: ResMut<UiState>,
) {
	if keys.just_pressed(KeyCode::KeyP) {
		ui.paused = !ui.paused;
	}
	if keys.just_pressed(KeyCode::KeyR) {
		ui.restart_requested = true;
	}
	// The kick plays out before anything else moves.
	if !ui.kick_replay.is_empty() {
		return;
	}

	let input = InputState {
		turn_left: keys.pressed(KeyCode::ArrowLeft),
		turn_right: keys.pressed(KeyCode::ArrowRight),
		paused: ui.paused,
		restart: std::mem::take(&mut ui.restart_requested),
	};
	if input.paused && !input.restart {
		return;
	}

	let mut frames = Vec::new();
	let result = game.session.tick_with(time.delta_secs(), input, |f| frames.push(*f));
	ui.kick_replay.extend(frames);
	for e in &result.events {
		let line = describe_event(e);
		if matches!(e, GameEvent::KickDelivered { .. } | GameEvent::GameOver(_)) {
			set_toast(&mut ui, line.clone());
		}
		ui.event_log.push(line);
	}
	ui.last_result = Some(result);
}

fn redraw_actors(
	mut commands: Commands,
	mut game: ResMut<GameSession>,
	mut ui: ResMut<UiState>,
	existing: Query<Entity, With<ActorSprite>>,
) {
	for e in &existing {
		commands.entity(e).despawn();
	}
	let field_height = game.session.config().field_height;
	let mut renderer = SceneRenderer {
		commands: &mut commands,
		field_height,
		z: ACTOR_Z_BASE,
		player_override: ui.kick_replay.pop_front(),
	};
	// Drawing only writes actor rects back; keep the tile recolour guard meaningful.
	game.bypass_change_detection().session.draw(&mut renderer);
}

// ---------- Systems: Toast ----------
fn update_toast_timer(time: Res<Time>, mut ui: ResMut<UiState>) {
	if let Some((_, ref mut remaining)) = ui.toast {
		*remaining -= time.delta_secs();
		if *remaining <= 0.0 {
			ui.toast = None;
		}
	}
}

// ---------- Systems: UI ----------
fn draw_ui(mut egui_ctx: EguiContexts, mut ui: ResMut<UiState>, game: Res<GameSession>) {
	if let Ok(ctx) = egui_ctx.ctx_mut() {

	let session = &game.session;
	let coverage = ui.last_result.as_ref().map_or(0.0, |r| r.coverage_percent);

	// Top HUD
	egui::TopBottomPanel::top("top_hud").show(&*ctx, |ui_top| {
		ui_top.horizontal(|ui_row| {
			ui_row.label(format_hud(session.economy(), coverage));
			ui_row.separator();
			if ui_row.button(pause_button_label(ui.paused)).clicked() {
				ui.paused = !ui.paused;
			}
			if ui_row.button(RESTART_LABEL).clicked() {
				ui.restart_requested = true;
			}
			if let GameStatus::GameOver(reason) = session.status() {
				ui_row.separator();
				ui_row.colored_label(egui::Color32::LIGHT_RED, game_over_banner(reason));
			}
			if let Some((ref msg, _)) = ui.toast {
				ui_row.separator();
				ui_row.colored_label(egui::Color32::YELLOW, msg);
			}
		});
	});

	// Right panel (effects / enemy / log)
	egui::SidePanel::right("right_panel")
		.resizable(true)
		.default_width(260.0)
		.show(&*ctx, |ui_right| {
			ui_right.heading("Status");
			for line in format_side_panel(session.player(), session.enemy()) {
				ui_right.label(line);
			}
			ui_right.separator();
			egui::ScrollArea::vertical().stick_to_bottom(true).show(ui_right, |ui_logs| {
				for line in &ui.event_log {
					ui_logs.label(line);
				}
			});
		});

	egui::TopBottomPanel::bottom("controls").show(&*ctx, |ui_bottom| {
		ui_bottom.label(CONTROLS_HINT);
	});

	} // end if Ok(ctx)
}

#[cfg(test)]
mod tests {
	use super::*;
	use bevy::prelude::{MinimalPlugins, TransformPlugin};

	fn tiny_session() -> Session {
		let config = GameConfig {
			field_width: 40.0,
			field_height: 24.0,
			player_start: Some(WorldPos::new(4.0, 12.0)),
			..GameConfig::default()
		};
		Session::new(config).expect("valid config")
	}

	#[test]
	fn lawn_spawns_one_tile_per_cell() {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, TransformPlugin));
		app.insert_resource(GameSession { session: tiny_session() });
		app.add_systems(Startup, (setup_camera, build_tiles));
		app.update();

		let world = app.world_mut();
		let mut q = world.query::<&TilePos>();
		assert_eq!(q.iter(world).count(), 15);
		let max_col = q.iter(world).map(|p| p.col).max();
		assert_eq!(max_col, Some(4));
	}

	#[test]
	fn mown_cells_recolor_after_a_tick() {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, TransformPlugin));
		app.insert_resource(GameSession { session: tiny_session() });
		app.add_systems(Startup, build_tiles);
		app.add_systems(Update, sync_tile_colors);
		app.update();

		app.world_mut()
			.resource_mut::<GameSession>()
			.session
			.tick(1.0 / 60.0, InputState::default());
		app.update();

		let world = app.world_mut();
		let mut q = world.query::<(&TilePos, &Sprite)>();
		let origin = q
			.iter(world)
			.find(|(p, _)| p.col == 0 && p.row == 1)
			.map(|(_, s)| s.color);
		assert_eq!(origin, Some(tile_color_for_state(TileState::Mown)));
		let far = q
			.iter(world)
			.find(|(p, _)| p.col == 4 && p.row == 1)
			.map(|(_, s)| s.color);
		assert_eq!(far, Some(tile_color_for_state(TileState::Full)));
	}

	#[test]
	fn redrawing_actors_leaves_tiles_alone() {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, TransformPlugin));
		app.insert_resource(GameSession { session: tiny_session() });
		app.insert_resource(UiState::default());
		app.add_systems(Startup, build_tiles);
		app.add_systems(Update, (sync_tile_colors, redraw_actors).chain());
		app.update();

		let marker = Color::srgb(1.0, 0.0, 1.0);
		{
			let world = app.world_mut();
			let mut q = world.query::<&mut Sprite>();
			for mut sprite in q.iter_mut(world).filter(|s| s.color != marker) {
				sprite.color = marker;
			}
		}
		app.update();

		let world = app.world_mut();
		let mut tiles = world.query::<(&TilePos, &Sprite)>();
		assert!(tiles.iter(world).all(|(_, s)| s.color == marker));
		let mut actors = world.query::<&ActorSprite>();
		assert_eq!(actors.iter(world).count(), 2);
	}

	#[test]
	fn scene_renderer_flips_y() {
		assert_eq!(to_screen(WorldPos::new(3.0, 4.0), 24.0), Vec2::new(3.0, 20.0));
	}
}
