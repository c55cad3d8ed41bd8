//! Index arithmetic
//!
//! Pure functions that turn a navigation request into a new index, or refuse
//! it. A single move never spans the whole collection, so wrapping needs at
//! most one correction.

use crate::error::{NavigationError, Result};

/// Resolve a relative move from `current` by `delta`
///
/// Refuses a move whose magnitude is at least `length` (which also covers an
/// empty collection) and, when `looping` is off, any move that would leave
/// `[0, length)`. With looping on, the result wraps once in either direction.
pub fn resolve_move(current: usize, delta: i64, length: usize, looping: bool) -> Result<usize> {
    let len = length as i64;
    if delta.unsigned_abs() >= length as u64 {
        return Err(NavigationError::DegenerateMove { delta, length });
    }

    let target = current as i64 + delta;
    if !looping && !(0..len).contains(&target) {
        return Err(NavigationError::InvalidIndex {
            index: target,
            length,
        });
    }

    let wrapped = if target >= len {
        target - len
    } else if target < 0 {
        len + target
    } else {
        target
    };
    Ok(wrapped as usize)
}

/// Resolve an absolute jump to `index`
pub fn resolve_go_to(index: i64, length: usize) -> Result<usize> {
    if index < 0 || index >= length as i64 {
        return Err(NavigationError::InvalidIndex { index, length });
    }
    Ok(index as usize)
}
