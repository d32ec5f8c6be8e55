use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum TileState {
	#[default]
	Full = 0,
	Mown = 1,
	HalfMown = 2,
}

impl TileState {
	/// Grass that still slows the mower down.
	pub fn is_unmown(self) -> bool {
		matches!(self, TileState::Full)
	}

	/// How far along the mowing order a state is. Full < HalfMown < Mown.
	pub fn rank(self) -> u8 {
		match self {
			TileState::Full => 0,
			TileState::HalfMown => 1,
			TileState::Mown => 2,
		}
	}

	pub fn id(self) -> u8 {
		self as u8
	}
}

impl TryFrom<u8> for TileState {
	type Error = GameError;

	fn try_from(v: u8) -> Result<Self, Self::Error> {
		match v {
			0 => Ok(TileState::Full),
			1 => Ok(TileState::Mown),
			2 => Ok(TileState::HalfMown),
			_ => Err(GameError::InvalidTileState(v)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unmown_flags() {
		assert!(TileState::Full.is_unmown());
		assert!(!TileState::HalfMown.is_unmown());
		assert!(!TileState::Mown.is_unmown());
	}

	#[test]
	fn rank_orders_mowing_progress() {
		assert!(TileState::Full.rank() < TileState::HalfMown.rank());
		assert!(TileState::HalfMown.rank() < TileState::Mown.rank());
	}

	#[test]
	fn ids_match_cell_values() {
		assert_eq!(TileState::Full.id(), 0);
		assert_eq!(TileState::Mown.id(), 1);
		assert_eq!(TileState::HalfMown.id(), 2);
		assert_eq!(TileState::try_from(2).unwrap(), TileState::HalfMown);
		assert!(matches!(TileState::try_from(7), Err(GameError::InvalidTileState(7))));
	}
}
