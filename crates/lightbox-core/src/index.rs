//! Logical-to-resolved index arithmetic.

/// Reduces an unbounded logical index into `[0, count)`.
///
/// Negative indices wrap from the end: `-1` with a count of 5 resolves to 4.
/// Returns `None` when there is nothing to index into.
#[inline]
pub fn resolve_index(index: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let count = count as i64;
    Some((((index % count) + count) % count) as usize)
}

/// Clamps a requested starting index into `[0, count)`, `0` for an empty source.
#[inline]
pub fn clamp_index(index: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    index.clamp(0, count as i64 - 1) as usize
}
