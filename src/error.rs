use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Config parse error: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("Invalid config field `{field}`: {reason}")]
	Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum GameError {
	#[error("Invalid powerup kind id: {0}")]
	InvalidPowerupKind(u8),
	#[error("Invalid grid dimensions {columns}x{rows}")]
	InvalidGridDimensions { columns: i32, rows: i32 },
	#[error("Invalid tile state id: {0}")]
	InvalidTileState(u8),
	#[error(transparent)]
	Config(#[from] ConfigError),
}
