use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned bounding box with inclusive bounds.
///
/// The all-zero box doubles as the "nothing measured" sentinel for scripts
/// containing no absolute coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub max_z: i32,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        min_x: 0,
        min_y: 0,
        min_z: 0,
        max_x: 0,
        max_y: 0,
        max_z: 0,
    };

    pub fn new(min_x: i32, min_y: i32, min_z: i32, max_x: i32, max_y: i32, max_z: i32) -> Self {
        BoundingBox {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == BoundingBox::EMPTY
    }

    /// Extent in X (inclusive).
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    /// Extent in Y (inclusive).
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    /// Extent in Z (inclusive).
    pub fn depth(&self) -> i32 {
        self.max_z - self.min_z + 1
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bounds: ({},{},{}) to ({},{},{})",
            self.min_x, self.min_y, self.min_z, self.max_x, self.max_y, self.max_z
        )?;
        write!(
            f,
            "Size: {}×{}×{} (width×height×depth)",
            self.width(),
            self.height(),
            self.depth()
        )
    }
}
