//! Shell directive placeholders.
//!
//! Before a `=$$command=` directive reaches the host, two kinds of
//! placeholder are replaced with tape contents:
//!
//! - `\cell(N)\` becomes the decimal value of bowl `N`
//! - `\ccell(N)\` becomes the character whose code point is bowl `N`
//!
//! `N` is an absolute tape index, independent of the data pointer. Bowls
//! that do not exist read as zero. A value that is not a Unicode scalar
//! value becomes `?`.

use std::sync::OnceLock;

use num_traits::ToPrimitive;
use regex::{Captures, Regex};

use crate::core::{Cell, Tape};

/// Substituted for values with no character.
pub const FALLBACK_GLYPH: char = '?';

fn number_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\\cell\((\d+)\)\\").unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
    })
}

fn char_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\\ccell\((\d+)\)\\").unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
    })
}

/// Value of the bowl named by the first capture group.
fn referenced_cell(caps: &Captures<'_>, tape: &Tape) -> Cell {
    caps.get(1)
        .and_then(|m| m.as_str().parse::<isize>().ok())
        .map(|index| tape.get(index))
        .unwrap_or_default()
}

/// Character for a bowl value, or [`FALLBACK_GLYPH`].
pub fn glyph(value: &Cell) -> char {
    value
        .to_u32()
        .and_then(char::from_u32)
        .unwrap_or(FALLBACK_GLYPH)
}

/// Replace every placeholder in `command` with tape contents.
pub fn substitute_placeholders(command: &str, tape: &Tape) -> String {
    let numbers = number_placeholder().replace_all(command, |caps: &Captures<'_>| {
        referenced_cell(caps, tape).to_string()
    });
    char_placeholder()
        .replace_all(&numbers, |caps: &Captures<'_>| {
            glyph(&referenced_cell(caps, tape)).to_string()
        })
        .into_owned()
}
