use crate::coords::TileCoord;
use crate::error::GameError;
use crate::tile::TileState;

/// The lawn. Dimensions are fixed at construction; cells only ever move
/// forward through `Full -> HalfMown -> Mown`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    columns: i32,
    rows: i32,
    tiles: Vec<TileState>,
}

impl TileGrid {
    pub fn new(columns: i32, rows: i32) -> Result<Self, GameError> {
        if columns <= 0 || rows <= 0 {
            return Err(GameError::InvalidGridDimensions { columns, rows });
        }
        let size = (columns as usize) * (rows as usize);
        Ok(Self {
            columns,
            rows,
            tiles: vec![TileState::Full; size],
        })
    }

    /// Grid covering a play field, `floor(field / tile_size)` cells per axis.
    pub fn for_field(field_width: f32, field_height: f32, tile_size: f32) -> Result<Self, GameError> {
        let columns = (field_width / tile_size).floor() as i32;
        let rows = (field_height / tile_size).floor() as i32;
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }
    pub fn rows(&self) -> i32 {
        self.rows
    }
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, c: TileCoord) -> bool {
        c.col >= 0 && c.row >= 0 && c.col < self.columns && c.row < self.rows
    }

    fn index(&self, c: TileCoord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row * self.columns + c.col) as usize)
    }

    pub fn get(&self, c: TileCoord) -> Option<TileState> {
        self.index(c).map(|i| self.tiles[i])
    }

    /// Writes `state` unless it would move the cell backwards. Returns whether
    /// the cell changed. Out-of-bounds writes are ignored.
    pub fn upgrade(&mut self, c: TileCoord, state: TileState) -> bool {
        let Some(i) = self.index(c) else {
            return false;
        };
        let current = self.tiles[i];
        if state.rank() < current.rank() || state == current {
            return false;
        }
        self.tiles[i] = state;
        true
    }

    /// Row slices in top-to-bottom order, for renderers.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[TileState]> {
        self.tiles.chunks(self.columns as usize)
    }

    pub fn count(&self, state: TileState) -> usize {
        self.tiles.iter().filter(|t| **t == state).count()
    }

    /// Cells that are no longer full grass.
    pub fn cut_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_unmown()).count()
    }

    pub fn coverage_percent(&self) -> f32 {
        self.cut_count() as f32 / self.cell_count() as f32 * 100.0
    }

    pub fn is_fully_cut(&self) -> bool {
        self.cut_count() == self.cell_count()
    }

    pub fn reset(&mut self) {
        self.tiles.fill(TileState::Full);
    }
}
