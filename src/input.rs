/// Controls sampled once per tick by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
	pub turn_left: bool,
	pub turn_right: bool,
	/// Held while the driver is paused; the tick becomes a no-op.
	pub paused: bool,
	/// One-shot request to start a fresh session.
	pub restart: bool,
}

impl InputState {
	/// -1 for right, +1 for left, 0 when both or neither are held.
	pub fn turn_axis(&self) -> f32 {
		match (self.turn_left, self.turn_right) {
			(true, false) => 1.0,
			(false, true) => -1.0,
			_ => 0.0,
		}
	}
}
