//! The data pointer.
//!
//! The pointer ranges over `-1..=len`: one sentinel before the first bowl,
//! every bowl, and one sentinel after the last. Moving past either end
//! wraps to the opposite sentinel, so repeated moves walk a cycle of
//! `len + 2` positions. On an empty tape the only position is `0`.

use std::fmt;

/// Position of the data pointer, including the two off-tape sentinels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DataPointer(isize);

impl DataPointer {
    /// The before-first sentinel.
    pub const BEFORE_FIRST: DataPointer = DataPointer(-1);

    pub fn new(position: isize) -> Self {
        Self(position)
    }

    /// Raw signed position.
    #[inline]
    pub fn position(self) -> isize {
        self.0
    }

    /// Index of the addressed bowl, if the pointer is on a tape of `len` bowls.
    #[inline]
    pub fn on_tape(self, len: usize) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|&i| i < len)
    }

    /// Step right over a tape of `len` bowls.
    pub fn move_right(&mut self, len: usize) {
        if len == 0 {
            self.0 = 0;
            return;
        }
        self.0 += 1;
        if self.0 > len as isize {
            self.0 = -1;
        }
    }

    /// Step left over a tape of `len` bowls.
    pub fn move_left(&mut self, len: usize) {
        if len == 0 {
            self.0 = 0;
            return;
        }
        self.0 -= 1;
        if self.0 < -1 {
            self.0 = len as isize;
        }
    }

    /// Re-settle after the addressed bowl was deleted from a tape that now
    /// holds `len` bowls.
    ///
    /// A pointer left past the end of a non-empty tape moves to the last
    /// bowl; an emptied tape puts it back at `0`.
    pub fn settle_after_delete(&mut self, len: usize) {
        if len == 0 {
            self.0 = 0;
        } else if self.0 >= len as isize {
            self.0 = len as isize - 1;
        }
    }

    /// Whether the position is inside the legal `-1..=len` range.
    pub fn is_within(self, len: usize) -> bool {
        if len == 0 {
            return self.0 == 0;
        }
        (-1..=len as isize).contains(&self.0)
    }
}

impl fmt::Display for DataPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
