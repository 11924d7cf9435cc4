use gridpath_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent for 4-way movement with unit step cost.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(0, 0);
        let b = Point::new(4, 3);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(manhattan(b, a), 7);
        assert_eq!(manhattan(a, a), 0);
        assert_eq!(manhattan(Point::new(-2, 5), Point::new(1, 1)), 7);
    }
}
