//! Program text.
//!
//! OATMEAL is never compiled: the engine re-reads the source text one
//! character at a time on every run. A [`Program`] is that text as a
//! random-access character array plus the scope matches found when it was
//! loaded. The text never changes while it is executing, so caching the
//! `/ … \` pairs is equivalent to re-scanning on every visit.
//!
//! # Modules
//!
//! - `opcode`: single-character instruction decoding
//! - `construct`: multi-character constructs (comments, definitions, directives)
//! - `scope`: scope stack, bracket matching and goto resolution

pub mod construct;
pub mod opcode;
pub mod scope;

use std::collections::HashMap;

pub use construct::Construct;
pub use opcode::OpCode;
pub use scope::{Scope, ScopeStack};

/// Executable program text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    chars: Vec<char>,
    scope_ends: HashMap<usize, usize>,
}

impl Program {
    /// Load source text.
    pub fn new(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let scope_ends = scope::match_scopes(&chars);
        Self { chars, scope_ends }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    #[inline]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Offset of the `\` balancing the `/` at `open`.
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        self.scope_ends.get(&open).copied()
    }

    /// The goto points directly inside `scope`.
    pub fn goto_targets(&self, scope: Scope) -> Vec<usize> {
        scope::goto_targets(&self.chars, scope)
    }

    /// First occurrence of `c` at or after `from`.
    pub fn find_from(&self, c: char, from: usize) -> Option<usize> {
        self.chars
            .get(from..)?
            .iter()
            .position(|&x| x == c)
            .map(|i| from + i)
    }

    /// Text of `start..end` as a string.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }
}

impl From<&str> for Program {
    fn from(source: &str) -> Self {
        Program::new(source)
    }
}
