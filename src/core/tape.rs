//! The tape: an ordered, resizable row of bowls.
//!
//! Each bowl holds a non-negative integer. A subset of bowls can be marked
//! read-only. Read-only marks are stored by index, so every structural edit
//! (insert or delete) renumbers them to keep protecting the same bowls.
//!
//! Positions are signed because the data pointer can sit on the sentinel
//! before the first bowl (`-1`) or after the last one (`len`). Any position
//! outside `0..len` reads as zero and ignores writes.

use std::collections::BTreeSet;
use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Value held by a single bowl. Bowls have no upper bound.
pub type Cell = BigUint;

/// The cell store.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Cell>,
    readonly: BTreeSet<usize>,
}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tape[")?;
        for (i, val) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if self.readonly.contains(&i) {
                write!(f, "{}%", val)?;
            } else {
                write!(f, "{}", val)?;
            }
        }
        write!(f, "]")
    }
}

impl Tape {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tape holding the given values, none of them read-only.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            readonly: BTreeSet::new(),
        }
    }

    /// Create a tape from machine integers.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        Self::from_cells(values.into_iter().map(Into::into).collect())
    }

    /// Number of bowls on the tape.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All bowl values in tape order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Indices currently marked read-only, ascending.
    pub fn readonly(&self) -> impl Iterator<Item = usize> + '_ {
        self.readonly.iter().copied()
    }

    /// Map a signed position to an index if it is on the tape.
    #[inline]
    pub fn index(&self, pos: isize) -> Option<usize> {
        usize::try_from(pos).ok().filter(|&i| i < self.cells.len())
    }

    /// Whether `pos` addresses a bowl.
    #[inline]
    pub fn is_on_tape(&self, pos: isize) -> bool {
        self.index(pos).is_some()
    }

    pub fn is_readonly(&self, pos: isize) -> bool {
        self.index(pos).is_some_and(|i| self.readonly.contains(&i))
    }

    /// Whether `pos` addresses a bowl that is not read-only.
    pub fn is_mutable(&self, pos: isize) -> bool {
        self.mutable_index(pos).is_some()
    }

    /// Index of a bowl that may be mutated, if `pos` names one.
    #[inline]
    fn mutable_index(&self, pos: isize) -> Option<usize> {
        self.index(pos).filter(|i| !self.readonly.contains(i))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Value Operations
    // ═══════════════════════════════════════════════════════════════════

    /// Borrow a bowl's value, if `pos` is on the tape.
    pub fn value(&self, pos: isize) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Read a bowl. Off-tape positions read as zero.
    pub fn get(&self, pos: isize) -> Cell {
        self.value(pos).cloned().unwrap_or_default()
    }

    /// Overwrite a bowl.
    ///
    /// No-op when `pos` is off the tape or read-only.
    pub fn set(&mut self, pos: isize, value: Cell) {
        if let Some(i) = self.mutable_index(pos) {
            self.cells[i] = value;
        }
    }

    /// Add one to a bowl.
    pub fn increment(&mut self, pos: isize) {
        if let Some(i) = self.mutable_index(pos) {
            self.cells[i] += 1u32;
        }
    }

    /// Subtract one from a bowl, never going below zero.
    pub fn decrement(&mut self, pos: isize) {
        if let Some(i) = self.mutable_index(pos) {
            if !self.cells[i].is_zero() {
                self.cells[i] -= 1u32;
            }
        }
    }

    /// Logical not: zero becomes one, anything else becomes zero.
    pub fn logical_not(&mut self, pos: isize) {
        if let Some(i) = self.mutable_index(pos) {
            self.cells[i] = if self.cells[i].is_zero() {
                Cell::one()
            } else {
                Cell::zero()
            };
        }
    }

    /// Empty a bowl into every other mutable bowl.
    ///
    /// The source bowl becomes zero and each other non-read-only bowl gains
    /// its former value.
    pub fn distribute(&mut self, pos: isize) {
        let Some(source) = self.mutable_index(pos) else {
            return;
        };
        let value = std::mem::take(&mut self.cells[source]);
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if i != source && !self.readonly.contains(&i) {
                *cell += &value;
            }
        }
    }

    /// Flip the read-only mark of a bowl. No-op off the tape.
    pub fn toggle_readonly(&mut self, pos: isize) {
        if let Some(i) = self.index(pos) {
            if !self.readonly.remove(&i) {
                self.readonly.insert(i);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Structural Operations
    // ═══════════════════════════════════════════════════════════════════

    /// Insert a zero bowl relative to the pointer position `pos`.
    ///
    /// Returns the pointer position afterwards, which always addresses the
    /// new bowl:
    /// - empty tape: the single new bowl, position 0;
    /// - before-first sentinel: inserted at the front, position 0;
    /// - after-last sentinel: appended, position `len - 1`;
    /// - on the tape: inserted at `pos`, pushing that bowl and its
    ///   successors one step right.
    pub fn insert_at(&mut self, pos: isize) -> isize {
        if self.cells.is_empty() {
            self.cells.push(Cell::zero());
            return 0;
        }
        if pos < 0 {
            self.insert_cell(0);
            return 0;
        }
        match self.index(pos) {
            Some(i) => {
                self.insert_cell(i);
                pos
            }
            None => {
                self.cells.push(Cell::zero());
                self.cells.len() as isize - 1
            }
        }
    }

    fn insert_cell(&mut self, index: usize) {
        self.cells.insert(index, Cell::zero());
        self.readonly = self
            .readonly
            .iter()
            .map(|&i| if i >= index { i + 1 } else { i })
            .collect();
    }

    /// Remove the bowl at `pos`.
    ///
    /// Returns `false` (and changes nothing) when `pos` is off the tape or
    /// read-only. The removed index leaves the read-only set and every
    /// later mark shifts down by one.
    pub fn delete_at(&mut self, pos: isize) -> bool {
        let Some(index) = self.mutable_index(pos) else {
            return false;
        };
        self.cells.remove(index);
        self.readonly = self
            .readonly
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
        true
    }
}
