use crate::economy::{EconomyState, PowerLevel};
use crate::enemy::{Enemy, EnemyState};
use crate::player::Player;
use crate::session::GameOverReason;

pub const EFFECTS_PANEL_HEADING: &str = "Powerups";
pub const ENEMY_PANEL_HEADING: &str = "Groundskeeper";
pub const PAUSE_LABEL: &str = "Pause";
pub const RESUME_LABEL: &str = "Resume";
pub const RESTART_LABEL: &str = "Restart";
pub const CONTROLS_HINT: &str = "Left/Right steer | P pause | R restart";

pub fn format_hud(economy: &EconomyState, coverage_percent: f32) -> String {
	let draw = match economy.level() {
		PowerLevel::Normal => "",
		PowerLevel::Slowed => " (cutting)",
	};
	format!(
		"Money: ${:.2} / ${:.2} | Power: {} W{} | Used: {} | Mown: {:.1}%",
		economy.money(),
		economy.money_limit(),
		economy.current_power_consumption(),
		draw,
		economy.power_used,
		coverage_percent
	)
}

pub fn pause_button_label(paused: bool) -> &'static str {
	if paused { RESUME_LABEL } else { PAUSE_LABEL }
}

pub fn game_over_banner(reason: GameOverReason) -> &'static str {
	match reason {
		GameOverReason::OverBudget => "Out of money!",
		GameOverReason::LawnMown => "Lawn finished!",
	}
}

pub fn format_side_panel(player: &Player, enemy: &Enemy) -> Vec<String> {
	let mut out = Vec::new();
	out.push(format!("[{}]", EFFECTS_PANEL_HEADING));
	if player.effects().is_empty() {
		out.push("None".to_string());
	}
	for (kind, effect) in player.effects() {
		out.push(format!("{} – {:.1}s left", kind.label(), effect.remaining()));
	}
	out.push(format!("[{}]", ENEMY_PANEL_HEADING));
	let state = match enemy.state() {
		EnemyState::Pursuing => "Chasing",
		EnemyState::ChargingKick { .. } => "Winding up...",
		EnemyState::Kicking => "Kicking",
		EnemyState::Stunned => "Stunned",
	};
	out.push(state.to_string());
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::GameConfig;
	use crate::powerup::PowerupKind;

	#[test]
	fn hud_format() {
		let mut e = EconomyState::new(5000.0, 0.001, 800, 1200);
		e.charge(1.0, 60.0);
		let s = format_hud(&e, 12.345);
		assert!(s.contains("Money: $0.80 / $5000.00"));
		assert!(s.contains("Power: 800 W"));
		assert!(s.contains("Mown: 12.3%"));
		e.set_level(PowerLevel::Slowed);
		assert!(format_hud(&e, 0.0).contains("1200 W (cutting)"));
	}

	#[test]
	fn side_panel_lists_effects_and_enemy() {
		let c = GameConfig::default();
		let mut p = Player::new(&c);
		let mut e = Enemy::new(&c);
		let lines = format_side_panel(&p, &e);
		assert!(lines.iter().any(|l| l == "None"));
		p.apply_effect(PowerupKind::Stun, 4.0);
		e.stun();
		let lines = format_side_panel(&p, &e);
		assert!(lines.iter().any(|l| l.starts_with("Stun – 4.0s")));
		assert!(lines.iter().any(|l| l == "Stunned"));
	}
}
