//! Scope tracking and bracket matching.
//!
//! A scope is a balanced `/ … \` region of the active text. Opening a scope
//! pushes its `(start, end)` offsets; any `\` pops the innermost entry,
//! whether or not it is the `\` that matched. Misnested brackets can
//! therefore desynchronise the stack; that is part of the language.
//!
//! Bracket matching counts raw characters. Slashes inside comments, function
//! bodies or shell commands still take part in the count.

use std::collections::HashMap;

use num_traits::{ToPrimitive, Zero};

use super::Program;
use crate::core::Cell;

pub const SCOPE_OPEN: char = '/';
pub const SCOPE_CLOSE: char = '\\';
pub const GOTO: char = '\'';
pub const COMMENT_OPEN: char = '[';
pub const COMMENT_CLOSE: char = ']';

/// An open scope: offsets of its `/` and matching `\`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub start: usize,
    pub end: usize,
}

/// LIFO stack of open scopes for one frame of execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Pop the innermost scope; no-op on an empty stack.
    pub fn pop(&mut self) -> Option<Scope> {
        self.scopes.pop()
    }

    pub fn innermost(&self) -> Option<Scope> {
        self.scopes.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
    }
}

/// Scan forward from the `/` at `open` for the `\` that balances it.
pub fn find_matching_close(text: &[char], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (pos, &c) in text.iter().enumerate().skip(open + 1) {
        match c {
            SCOPE_OPEN => depth += 1,
            SCOPE_CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
    }
    None
}

/// Match every `/` in the text against its balancing `\` in a single pass.
///
/// Produces the same pairs as calling [`find_matching_close`] on each `/`:
/// a `\` with nothing open is skipped, and a `/` left open at the end of
/// the text has no entry.
pub fn match_scopes(text: &[char]) -> HashMap<usize, usize> {
    let mut open = Vec::new();
    let mut matches = HashMap::new();
    for (pos, &c) in text.iter().enumerate() {
        match c {
            SCOPE_OPEN => open.push(pos),
            SCOPE_CLOSE => {
                if let Some(start) = open.pop() {
                    matches.insert(start, pos);
                }
            }
            _ => {}
        }
    }
    matches
}

/// Offset just past the `]` that closes the comment opened at `open`, or the
/// text length when the comment never closes.
pub fn skip_comment(text: &[char], open: usize) -> usize {
    let mut depth = 1usize;
    for (pos, &c) in text.iter().enumerate().skip(open + 1) {
        match c {
            COMMENT_OPEN => depth += 1,
            COMMENT_CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return pos + 1;
                }
            }
            _ => {}
        }
    }
    text.len()
}

/// Offsets of every `'` directly inside `scope`, left to right.
///
/// Goto points inside a further-nested scope are not counted.
pub fn goto_targets(text: &[char], scope: Scope) -> Vec<usize> {
    let mut targets = Vec::new();
    let mut depth = 0usize;
    for (pos, &c) in text.iter().enumerate().take(scope.end).skip(scope.start + 1) {
        match c {
            SCOPE_OPEN => depth += 1,
            SCOPE_CLOSE => depth = depth.saturating_sub(1),
            GOTO if depth == 0 => targets.push(pos),
            _ => {}
        }
    }
    targets
}

/// Where the goto at `ip` sends the instruction pointer.
///
/// `value` is the current bowl's value. In priority order:
/// 1. directly after a `/`, the goto is an escape and just advances;
/// 2. with no open scope it advances;
/// 3. a zero value leaves the innermost scope (one past its `\`);
/// 4. a value `v` in `1..=n` lands on the v-th goto point of the scope;
/// 5. anything else advances.
pub fn resolve_goto(program: &Program, ip: usize, value: &Cell, scopes: &ScopeStack) -> usize {
    if ip > 0 && program.char_at(ip - 1) == Some(SCOPE_OPEN) {
        return ip + 1;
    }
    let Some(scope) = scopes.innermost() else {
        return ip + 1;
    };
    if value.is_zero() {
        return scope.end + 1;
    }
    let targets = program.goto_targets(scope);
    value
        .to_usize()
        .and_then(|v| targets.get(v - 1))
        .copied()
        .unwrap_or(ip + 1)
}
