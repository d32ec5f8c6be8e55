use serde::{Deserialize, Serialize};

/// Grid cell address. `row` grows downwards, like screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Cell containing a world-space point. No bounds checking.
    pub fn from_world(p: WorldPos, tile_size: f32) -> Self {
        Self {
            col: (p.x / tile_size).floor() as i32,
            row: (p.y / tile_size).floor() as i32,
        }
    }

    pub fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// World-space center of this cell.
    pub fn center(self, tile_size: f32) -> WorldPos {
        WorldPos::new(
            (self.col as f32 + 0.5) * tile_size,
            (self.row as f32 + 0.5) * tile_size,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const ZERO: WorldPos = WorldPos { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance_squared(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: WorldPos) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Rotates a local-space offset by `degrees`, counter-clockwise on screen
    /// (y grows downwards).
    pub fn rotated(self, degrees: f32) -> WorldPos {
        let (sin, cos) = (-degrees).to_radians().sin_cos();
        WorldPos::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Unit heading for a facing angle in degrees.
    pub fn heading(degrees: f32) -> WorldPos {
        let (sin, cos) = (-degrees).to_radians().sin_cos();
        WorldPos::new(cos, sin)
    }

    pub fn lerp(self, end: WorldPos, t: f32) -> WorldPos {
        WorldPos::new(self.x + (end.x - self.x) * t, self.y + (end.y - self.y) * t)
    }

    /// Spherical interpolation about the origin: angle and length are
    /// interpolated independently, taking the shorter way round.
    pub fn slerp(self, end: WorldPos, t: f32) -> WorldPos {
        let (from_len, to_len) = (self.length(), end.length());
        if from_len <= f32::EPSILON || to_len <= f32::EPSILON {
            return self.lerp(end, t);
        }
        let from_angle = self.y.atan2(self.x);
        let mut delta = end.y.atan2(end.x) - from_angle;
        if delta > std::f32::consts::PI {
            delta -= std::f32::consts::TAU;
        } else if delta < -std::f32::consts::PI {
            delta += std::f32::consts::TAU;
        }
        let angle = from_angle + delta * t;
        let len = from_len + (to_len - from_len) * t;
        WorldPos::new(angle.cos() * len, angle.sin() * len)
    }
}

impl std::ops::Add for WorldPos {
    type Output = WorldPos;
    fn add(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for WorldPos {
    type Output = WorldPos;
    fn sub(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for WorldPos {
    type Output = WorldPos;
    fn mul(self, rhs: f32) -> WorldPos {
        WorldPos::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered(center: WorldPos, w: f32, h: f32) -> Self {
        Self::new(center.x - w * 0.5, center.y - h * 0.5, w, h)
    }

    pub fn center(&self) -> WorldPos {
        WorldPos::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn contains(&self, p: WorldPos) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}
