//! Geometry primitives: [`Point`] and the pixel → cell mapping.
//!
//! Coordinates are `(row, col)`, both 0-indexed. Rows grow downward and
//! columns grow to the right.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A grid coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a point shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in expansion order: down, up, right,
    /// left. Search tie-breaking depends on this order staying fixed.
    #[inline]
    pub const fn neighbors_4(self) -> [Point; 4] {
        [
            self.shift(1, 0),
            self.shift(-1, 0),
            self.shift(0, 1),
            self.shift(0, -1),
        ]
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Point {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Pixel mapping
// ---------------------------------------------------------------------------

/// Map a pixel position on a square `width × width` canvas divided into
/// `rows × rows` cells to the cell under it.
///
/// The horizontal pixel axis selects the row and the vertical one the
/// column, the same orientation used when the grid is drawn. Returns `None`
/// when the canvas is too small to hold one pixel per cell or the position
/// falls outside the grid.
pub fn cell_at_pixel(x: i32, y: i32, rows: i32, width: i32) -> Option<Point> {
    if rows <= 0 || width < rows {
        return None;
    }
    let gap = width / rows;
    if x < 0 || y < 0 {
        return None;
    }
    let p = Point::new(x / gap, y / gap);
    (p.row < rows && p.col < rows).then_some(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a.shift(-1, 1), Point::new(0, 3));
    }

    #[test]
    fn neighbors_order_is_down_up_right_left() {
        let p = Point::new(2, 2);
        assert_eq!(
            p.neighbors_4(),
            [
                Point::new(3, 2),
                Point::new(1, 2),
                Point::new(2, 3),
                Point::new(2, 1),
            ]
        );
    }

    #[test]
    fn adjacency() {
        let p = Point::new(1, 1);
        assert!(p.is_adjacent(Point::new(0, 1)));
        assert!(p.is_adjacent(Point::new(1, 2)));
        assert!(!p.is_adjacent(Point::new(2, 2)));
        assert!(!p.is_adjacent(p));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut pts = vec![Point::new(1, 0), Point::new(0, 3), Point::new(0, 1)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(0, 1), Point::new(0, 3), Point::new(1, 0)]);
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(4, 7).to_string(), "(4, 7)");
    }

    #[test]
    fn pixel_mapping() {
        // 800px canvas, 50 rows -> 16px cells.
        assert_eq!(cell_at_pixel(0, 0, 50, 800), Some(Point::new(0, 0)));
        assert_eq!(cell_at_pixel(17, 33, 50, 800), Some(Point::new(1, 2)));
        assert_eq!(cell_at_pixel(799, 799, 50, 800), Some(Point::new(49, 49)));
        assert_eq!(cell_at_pixel(800, 0, 50, 800), None);
        assert_eq!(cell_at_pixel(-1, 0, 50, 800), None);
    }

    #[test]
    fn pixel_mapping_rejects_degenerate_canvas() {
        assert_eq!(cell_at_pixel(0, 0, 0, 800), None);
        assert_eq!(cell_at_pixel(0, 0, 10, 5), None);
    }
}
