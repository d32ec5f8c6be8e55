use serde::{Deserialize, Serialize};

const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Which of the two discrete power draws the mower is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerLevel {
    #[default]
    Normal,
    Slowed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyState {
    /// Money spent, in millionths. Fixed point keeps long runs exact.
    money_micros: i64,
    limit_micros: i64,
    pub power_used: u64,
    level: PowerLevel,
    normal_power: u32,
    slowed_power: u32,
    current_cost: f64,
    normal_cost: f64,
}

impl EconomyState {
    pub fn new(money_limit: f64, normal_cost: f64, normal_power: u32, slowed_power: u32) -> Self {
        Self {
            money_micros: 0,
            limit_micros: to_micros(money_limit),
            power_used: 0,
            level: PowerLevel::Normal,
            normal_power,
            slowed_power,
            current_cost: normal_cost,
            normal_cost,
        }
    }

    pub fn money(&self) -> f64 {
        self.money_micros as f64 / MICROS_PER_UNIT
    }

    pub fn money_limit(&self) -> f64 {
        self.limit_micros as f64 / MICROS_PER_UNIT
    }

    pub fn level(&self) -> PowerLevel {
        self.level
    }

    pub fn current_power_consumption(&self) -> u32 {
        match self.level {
            PowerLevel::Normal => self.normal_power,
            PowerLevel::Slowed => self.slowed_power,
        }
    }

    pub fn current_cost(&self) -> f64 {
        self.current_cost
    }

    /// Switches power draw. Returns whether the level actually changed.
    pub fn set_level(&mut self, level: PowerLevel) -> bool {
        if self.level == level {
            return false;
        }
        self.level = level;
        true
    }

    pub fn set_cost(&mut self, cost: f64) {
        self.current_cost = cost;
    }

    pub fn restore_cost(&mut self) {
        self.current_cost = self.normal_cost;
    }

    /// Bills one tick of running at the current draw and cost. A rebate can
    /// pay money back, but never below zero.
    pub fn charge(&mut self, frame_scale: f32, tick_rate: f32) {
        let watts = self.current_power_consumption();
        let used = (watts as f32 / tick_rate * frame_scale).round().max(0.0) as u64;
        self.power_used = self.power_used.saturating_add(used);
        let delta = to_micros(self.current_cost * f64::from(watts));
        let next = self.money_micros.saturating_add(delta);
        if next < 0 {
            tracing::trace!(rebate_micros = -next, "rebate clamped at zero money");
        }
        self.money_micros = next.max(0);
    }

    pub fn is_over_budget(&self) -> bool {
        self.money_micros >= self.limit_micros
    }
}

fn to_micros(v: f64) -> i64 {
    (v * MICROS_PER_UNIT).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_economy() -> EconomyState {
        EconomyState::new(5000.0, 0.001, 800, 1200)
    }

    #[test]
    fn budget_runs_out_after_exact_tick_count() {
        let mut e = default_economy();
        for _ in 0..6249 {
            e.charge(1.0, 60.0);
            assert!(!e.is_over_budget());
        }
        e.charge(1.0, 60.0);
        assert!(e.is_over_budget());
        assert!((e.money() - 5000.0).abs() < 1e-9);
    }

    #[test]
    fn power_used_rounds_per_tick() {
        let mut e = default_economy();
        e.charge(1.0, 60.0);
        assert_eq!(e.power_used, 13);
        e.set_level(PowerLevel::Slowed);
        e.charge(1.0, 60.0);
        assert_eq!(e.power_used, 33);
    }

    #[test]
    fn level_change_reports_only_real_transitions() {
        let mut e = default_economy();
        assert!(!e.set_level(PowerLevel::Normal));
        assert!(e.set_level(PowerLevel::Slowed));
        assert!(!e.set_level(PowerLevel::Slowed));
        assert_eq!(e.current_power_consumption(), 1200);
    }

    #[test]
    fn rebate_refunds_money() {
        let mut e = default_economy();
        e.charge(1.0, 60.0);
        e.charge(1.0, 60.0);
        e.set_cost(-0.0005);
        e.charge(1.0, 60.0);
        assert!((e.money() - 1.2).abs() < 1e-9);
        e.restore_cost();
        assert!((e.current_cost() - 0.001).abs() < f64::EPSILON);
    }

    #[test]
    fn rebate_does_not_go_below_zero() {
        let mut e = default_economy();
        e.set_cost(-0.0005);
        e.charge(1.0, 60.0);
        assert_eq!(e.money(), 0.0);
    }
}
