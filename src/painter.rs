use crate::coords::{TileCoord, WorldPos};
use crate::grid::TileGrid;
use crate::stencil::{StencilCell, StencilTemplate};
use crate::tile::TileState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintReport {
	/// Cell under the brush origin.
	pub origin: TileCoord,
	/// Cells whose state actually changed.
	pub changed: u32,
}

/// Stamps the brush, mirrored into all four quadrants, around the cell under `pos`.
///
/// Half cells are only laid on rows level with or above the brush origin and
/// never over mown grass. Cells outside the grid are skipped.
pub fn paint_path(grid: &mut TileGrid, template: &StencilTemplate, pos: WorldPos, tile_size: f32) -> PaintReport {
	let origin = TileCoord::from_world(pos, tile_size);
	let mut changed = 0u32;
	for (qx, qy, value) in template.iter_painted() {
		let targets = [
			origin.offset(qx, qy),
			origin.offset(-qx, qy),
			origin.offset(-qx, -qy),
			origin.offset(qx, -qy),
		];
		for target in targets {
			let Some(existing) = grid.get(target) else {
				continue;
			};
			let state = match value {
				StencilCell::Full => TileState::Mown,
				StencilCell::Half => {
					if existing == TileState::Mown || target.row > origin.row {
						continue;
					}
					TileState::HalfMown
				}
				StencilCell::Empty => continue,
			};
			if grid.upgrade(target, state) {
				changed = changed.saturating_add(1);
			}
		}
	}
	PaintReport { origin, changed }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::stencil::bake;

	const TILE: f32 = 8.0;

	fn center_of(col: i32, row: i32) -> WorldPos {
		TileCoord::new(col, row).center(TILE)
	}

	#[test]
	fn stamp_mirrors_full_and_fades_halves_behind() {
		let mut grid = TileGrid::new(21, 21).unwrap();
		let template = bake(2, 1.5);
		let report = paint_path(&mut grid, &template, center_of(10, 10), TILE);
		assert_eq!(report.origin, TileCoord::new(10, 10));

		for row in 9..=11 {
			for col in 9..=11 {
				assert_eq!(grid.get(TileCoord::new(col, row)), Some(TileState::Mown), "({col},{row})");
			}
		}
		// Half caps: above the origin they are painted, below they are not.
		for col in 9..=11 {
			assert_eq!(grid.get(TileCoord::new(col, 8)), Some(TileState::HalfMown));
			assert_eq!(grid.get(TileCoord::new(col, 12)), Some(TileState::Full));
		}
		assert_eq!(report.changed, 12);
		assert_eq!(grid.cut_count(), 12);
	}

	#[test]
	fn half_never_overwrites_mown() {
		let mut grid = TileGrid::new(21, 21).unwrap();
		let template = bake(2, 1.5);
		paint_path(&mut grid, &template, center_of(10, 7), TILE);
		// Row 8 is now mown (full part of the brush centered on row 7).
		assert_eq!(grid.get(TileCoord::new(10, 8)), Some(TileState::Mown));
		paint_path(&mut grid, &template, center_of(10, 10), TILE);
		assert_eq!(grid.get(TileCoord::new(10, 8)), Some(TileState::Mown));
	}

	#[test]
	fn full_upgrades_half() {
		let mut grid = TileGrid::new(21, 21).unwrap();
		let template = bake(2, 1.5);
		paint_path(&mut grid, &template, center_of(10, 10), TILE);
		assert_eq!(grid.get(TileCoord::new(10, 8)), Some(TileState::HalfMown));
		paint_path(&mut grid, &template, center_of(10, 9), TILE);
		assert_eq!(grid.get(TileCoord::new(10, 8)), Some(TileState::Mown));
	}

	#[test]
	fn stamping_at_the_corner_skips_outside_cells() {
		let mut grid = TileGrid::new(4, 4).unwrap();
		let template = bake(2, 1.5);
		let report = paint_path(&mut grid, &template, WorldPos::new(1.0, 1.0), TILE);
		assert_eq!(report.origin, TileCoord::new(0, 0));
		assert_eq!(grid.get(TileCoord::new(0, 0)), Some(TileState::Mown));
		assert_eq!(grid.get(TileCoord::new(1, 1)), Some(TileState::Mown));
		assert_eq!(grid.get(TileCoord::new(0, 2)), Some(TileState::Full));
		assert_eq!(grid.cut_count(), 4);
	}

	#[test]
	fn restamping_same_spot_changes_nothing() {
		let mut grid = TileGrid::new(21, 21).unwrap();
		let template = bake(2, 1.5);
		paint_path(&mut grid, &template, center_of(5, 5), TILE);
		let again = paint_path(&mut grid, &template, center_of(5, 5), TILE);
		assert_eq!(again.changed, 0);
	}
}
