//! Motion and render capabilities shared by everything drawn on the lawn.

use crate::config::SpriteSize;
use crate::coords::{Rect, WorldPos};
use crate::powerup::PowerupKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
	Player,
	Enemy,
	Powerup(PowerupKind),
}

/// The driver's sprite primitive: draws `sprite` centered on `pos`, rotated
/// by `angle` degrees, and reports the screen rectangle it covered.
pub trait Renderer {
	fn draw_sprite(&mut self, sprite: SpriteId, pos: WorldPos, angle: f32, size: SpriteSize) -> Rect;
}

/// Axis-aligned box around a sprite rotated about its center.
pub fn bounding_rect(pos: WorldPos, angle: f32, size: SpriteSize) -> Rect {
	let (sin, cos) = angle.to_radians().sin_cos();
	let w = (size.w * cos).abs() + (size.h * sin).abs();
	let h = (size.w * sin).abs() + (size.h * cos).abs();
	Rect::centered(pos, w, h)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
	/// Sprite center in world space.
	pub pos: WorldPos,
	/// Facing in degrees, counter-clockwise on screen.
	pub angle: f32,
	/// Displacement applied during the last update.
	pub velocity: WorldPos,
	pub size: SpriteSize,
	/// Rectangle from the most recent draw.
	pub rect: Rect,
}

impl Body {
	pub fn new(pos: WorldPos, angle: f32, size: SpriteSize) -> Self {
		Self {
			pos,
			angle,
			velocity: WorldPos::ZERO,
			size,
			rect: bounding_rect(pos, angle, size),
		}
	}
}

pub trait Actor {
	fn body(&self) -> &Body;
	fn body_mut(&mut self) -> &mut Body;
	fn sprite(&self) -> SpriteId;

	fn position(&self) -> WorldPos {
		self.body().pos
	}

	fn angle(&self) -> f32 {
		self.body().angle
	}

	fn draw(&mut self, renderer: &mut dyn Renderer) {
		let b = *self.body();
		let rect = renderer.draw_sprite(self.sprite(), b.pos, b.angle, b.size);
		self.body_mut().rect = rect;
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
	pub sprite: SpriteId,
	pub pos: WorldPos,
	pub angle: f32,
	pub size: SpriteSize,
}

/// Renderer that records calls in order. Used headless and by drivers that
/// rebuild their scene from a list each frame.
#[derive(Debug, Default)]
pub struct DrawList {
	pub calls: Vec<DrawCall>,
}

impl DrawList {
	pub fn new() -> Self {
		Self { calls: Vec::new() }
	}

	pub fn clear(&mut self) {
		self.calls.clear();
	}
}

impl Renderer for DrawList {
	fn draw_sprite(&mut self, sprite: SpriteId, pos: WorldPos, angle: f32, size: SpriteSize) -> Rect {
		self.calls.push(DrawCall { sprite, pos, angle, size });
		bounding_rect(pos, angle, size)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Dummy(Body);

	impl Actor for Dummy {
		fn body(&self) -> &Body {
			&self.0
		}
		fn body_mut(&mut self) -> &mut Body {
			&mut self.0
		}
		fn sprite(&self) -> SpriteId {
			SpriteId::Player
		}
	}

	#[test]
	fn quarter_turn_swaps_extent() {
		let r = bounding_rect(WorldPos::new(50.0, 50.0), 90.0, SpriteSize::new(20.0, 10.0));
		assert!((r.w - 10.0).abs() < 1e-3);
		assert!((r.h - 20.0).abs() < 1e-3);
		assert_eq!(r.center(), WorldPos::new(50.0, 50.0));
	}

	#[test]
	fn diagonal_box_grows() {
		let r = bounding_rect(WorldPos::ZERO, 45.0, SpriteSize::new(10.0, 10.0));
		assert!((r.w - 10.0 * std::f32::consts::SQRT_2).abs() < 1e-3);
	}

	#[test]
	fn draw_records_call_and_updates_rect() {
		let mut d = Dummy(Body::new(WorldPos::new(5.0, 5.0), 0.0, SpriteSize::new(4.0, 2.0)));
		d.body_mut().angle = 90.0;
		let mut list = DrawList::new();
		d.draw(&mut list);
		assert_eq!(list.calls.len(), 1);
		assert_eq!(list.calls[0].sprite, SpriteId::Player);
		assert!((d.body().rect.w - 2.0).abs() < 1e-3);
	}
}
