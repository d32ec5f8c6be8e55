//! Quarter-circle brush used by the path painter.
//!
//! Only one quadrant is stored; the painter mirrors it into the other three.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StencilCell {
	Empty = 0,
	Full = 1,
	Half = 2,
}

impl StencilCell {
	fn glyph(self) -> char {
		match self {
			StencilCell::Empty => '.',
			StencilCell::Full => '#',
			StencilCell::Half => '+',
		}
	}
}

/// Immutable `(radius + 1) x (radius + 1)` quadrant, indexed `[row][col]`
/// from the brush origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StencilTemplate {
	radius: u32,
	cells: Vec<Vec<StencilCell>>,
}

impl StencilTemplate {
	pub fn radius(&self) -> u32 {
		self.radius
	}

	pub fn get(&self, col: u32, row: u32) -> StencilCell {
		self.cells
			.get(row as usize)
			.and_then(|r| r.get(col as usize))
			.copied()
			.unwrap_or(StencilCell::Empty)
	}

	/// Non-empty cells as `(col, row, value)`.
	pub fn iter_painted(&self) -> impl Iterator<Item = (i32, i32, StencilCell)> + '_ {
		self.cells.iter().enumerate().flat_map(|(row, cells)| {
			cells
				.iter()
				.enumerate()
				.filter(|(_, c)| **c != StencilCell::Empty)
				.map(move |(col, c)| (col as i32, row as i32, *c))
		})
	}

	/// One line of glyphs per row: `#` full, `+` half, `.` empty.
	pub fn render_debug(&self) -> Vec<String> {
		self.cells
			.iter()
			.map(|row| row.iter().map(|c| c.glyph()).collect())
			.collect()
	}
}

fn classify(ci: u32, ri: u32, radius: u32, corner_threshold: f32) -> StencilCell {
	let (dx, dy) = (ci, ri);
	if dx > radius || dy > radius {
		return StencilCell::Empty;
	}
	let dist_sq = (dx * dx + dy * dy) as f32;
	let radius_sq = (radius * radius) as f32;
	let rounded = dist_sq.round();
	if rounded < radius_sq {
		StencilCell::Full
	} else if rounded < radius_sq * corner_threshold && dx < radius {
		StencilCell::Half
	} else {
		StencilCell::Empty
	}
}

/// Bakes the quadrant template. Pure in `(radius, corner_threshold)`.
pub fn bake(radius: u32, corner_threshold: f32) -> StencilTemplate {
	let cells: Vec<Vec<StencilCell>> = (0..=radius)
		.map(|ri| (0..=radius).map(|ci| classify(ci, ri, radius, corner_threshold)).collect())
		.collect();
	let template = StencilTemplate { radius, cells };
	for line in template.render_debug() {
		tracing::trace!(target: "mowdown::stencil", "{line}");
	}
	template
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_brush_shape() {
		let t = bake(2, 1.5);
		assert_eq!(t.render_debug(), vec!["##.", "##.", "++."]);
		assert_eq!(t.get(0, 0), StencilCell::Full);
		assert_eq!(t.get(1, 2), StencilCell::Half);
		assert_eq!(t.get(2, 0), StencilCell::Empty);
		assert_eq!(t.get(9, 9), StencilCell::Empty);
	}

	#[test]
	fn rebake_is_identical() {
		assert_eq!(bake(2, 1.5), bake(2, 1.5));
		assert_eq!(bake(4, 1.3), bake(4, 1.3));
	}

	#[test]
	fn threshold_of_one_has_no_halves() {
		let t = bake(3, 1.0);
		assert!(t.iter_painted().all(|(_, _, c)| c == StencilCell::Full));
	}

	#[test]
	fn radius_one_is_a_plus_with_half_caps() {
		let t = bake(1, 1.5);
		let painted: Vec<_> = t.iter_painted().collect();
		assert_eq!(painted, vec![(0, 0, StencilCell::Full), (0, 1, StencilCell::Half)]);
	}

	#[test]
	fn radius_zero_paints_nothing() {
		assert_eq!(bake(0, 1.5).iter_painted().count(), 0);
	}
}
