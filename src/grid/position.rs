//! Grid coordinates and the Manhattan metric.
//!
//! Every range, row and column query in the engine goes through
//! [`GridPos::manhattan`]; there is no other distance metric.

use serde::{Deserialize, Serialize};

/// Integer grid coordinate. `y` grows downwards (row index).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Create a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance: `|dx| + |dy|`.
    ///
    /// ```
    /// use relic_engine::grid::GridPos;
    ///
    /// assert_eq!(GridPos::new(0, 0).manhattan(GridPos::new(2, -3)), 5);
    /// ```
    #[must_use]
    pub const fn manhattan(self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Unit-step direction from `self` towards `other`.
    ///
    /// Each component is the sign of the delta, so diagonal offsets give a
    /// diagonal step. Returns `(0, 0)` when both positions coincide.
    #[must_use]
    pub const fn direction_to(self, other: GridPos) -> (i32, i32) {
        ((other.x - self.x).signum(), (other.y - self.y).signum())
    }

    /// Offset by a direction scaled by `tiles`.
    #[must_use]
    pub const fn offset(self, direction: (i32, i32), tiles: i32) -> GridPos {
        GridPos::new(self.x + direction.0 * tiles, self.y + direction.1 * tiles)
    }

    /// Orthogonal neighbours in a fixed order: up, right, down, left.
    #[must_use]
    pub const fn neighbors(self) -> [GridPos; 4] {
        [
            GridPos::new(self.x, self.y - 1),
            GridPos::new(self.x + 1, self.y),
            GridPos::new(self.x, self.y + 1),
            GridPos::new(self.x - 1, self.y),
        ]
    }

    /// Same row (compares `y` only).
    #[must_use]
    pub const fn same_row(self, other: GridPos) -> bool {
        self.y == other.y
    }

    /// Same column (compares `x` only).
    #[must_use]
    pub const fn same_column(self, other: GridPos) -> bool {
        self.x == other.x
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_is_symmetric() {
        let a = GridPos::new(1, 4);
        let b = GridPos::new(-2, 0);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_direction_components_are_signs() {
        let origin = GridPos::new(2, 2);
        assert_eq!(origin.direction_to(GridPos::new(7, 2)), (1, 0));
        assert_eq!(origin.direction_to(GridPos::new(0, 5)), (-1, 1));
        assert_eq!(origin.direction_to(origin), (0, 0));
    }

    #[test]
    fn test_offset_scales_direction() {
        assert_eq!(GridPos::new(1, 1).offset((1, -1), 3), GridPos::new(4, -2));
    }

    #[test]
    fn test_row_and_column_use_orthogonal_coordinate() {
        let a = GridPos::new(0, 3);
        assert!(a.same_row(GridPos::new(9, 3)));
        assert!(!a.same_row(GridPos::new(0, 2)));
        assert!(a.same_column(GridPos::new(0, -8)));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", GridPos::new(3, -1)), "(3, -1)");
    }
}
