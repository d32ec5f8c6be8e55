pub mod actor;
pub mod config;
pub mod coords;
pub mod economy;
pub mod enemy;
pub mod error;
pub mod grid;
pub mod hud;
pub mod input;
pub mod painter;
pub mod player;
pub mod powerup;
pub mod session;
pub mod stencil;
pub mod tile;

// Re-exports for convenience in tests and integration users.
pub use actor::{Actor, DrawCall, DrawList, Renderer, SpriteId, bounding_rect};
pub use config::{GameConfig, SpriteSize};
pub use coords::{Rect, TileCoord, WorldPos};
pub use economy::{EconomyState, PowerLevel};
pub use enemy::{Enemy, EnemyState, KickFrame, KickSequence};
pub use error::{ConfigError, GameError};
pub use grid::TileGrid;
pub use hud::{format_hud, format_side_panel, game_over_banner, pause_button_label};
pub use input::InputState;
pub use painter::{PaintReport, paint_path};
pub use player::Player;
pub use powerup::{Powerup, PowerupKind, PowerupSpawner};
pub use session::{GameEvent, GameOverReason, GameStatus, Session, TickResult};
pub use stencil::{StencilCell, StencilTemplate, bake};
pub use tile::TileState;
