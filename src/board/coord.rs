//! Mapping between linear field indices and board coordinates
//!
//! Coordinates are 1-based: `x` is the column, `y` the row.
//! Callers guarantee the domain; out-of-range input trips a debug assertion.

/// Convert a field index `1..=n²` to `(x, y)`.
///
/// ```
/// use gomoku::board::index_to_coord;
///
/// assert_eq!(index_to_coord(1, 15), (1, 1));
/// assert_eq!(index_to_coord(16, 15), (1, 2));
/// assert_eq!(index_to_coord(225, 15), (15, 15));
/// ```
#[inline]
pub fn index_to_coord(index: usize, size: usize) -> (usize, usize) {
    debug_assert!(index >= 1 && index <= size * size);
    ((index - 1) % size + 1, index.div_ceil(size))
}

/// Convert `(x, y)` back to a field index.
#[inline]
pub fn coord_to_index(x: usize, y: usize, size: usize) -> usize {
    debug_assert!((1..=size).contains(&x) && (1..=size).contains(&y));
    size * y - (size - x)
}

/// Check signed coordinates against a board of the given size
#[inline]
pub fn in_bounds(x: i32, y: i32, size: usize) -> bool {
    x >= 1 && y >= 1 && x <= size as i32 && y <= size as i32
}

/// Central field (upper-left of the centre block on even boards)
#[inline]
pub fn center_field(size: usize) -> usize {
    let c = size.div_ceil(2);
    coord_to_index(c, c, size)
}
