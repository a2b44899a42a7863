//! Multi-character constructs.
//!
//! | Form              | Construct |
//! |-------------------|-----------|
//! | `[ … ]`           | comment (nested brackets counted) |
//! | `{@name@body@}`   | inline function definition |
//! | `=@name=`         | function call |
//! | `=$resource=`     | function import |
//! | `=$$command=`     | shell command |
//!
//! Names, bodies, resources and commands are delimited, not escaped: a
//! name or body can never contain `@`, and a directive argument can never
//! contain `=`. When the closing delimiter is missing the construct is
//! unterminated and only its lead character is consumed.

use super::scope::skip_comment;
use super::Program;

const DEFINE_LEAD: char = '{';
const DIRECTIVE_LEAD: char = '=';
const NAME_DELIMITER: char = '@';
const RESOURCE_MARK: char = '$';

/// A recognised multi-character construct and where execution resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    /// Comment; nothing inside is dispatched.
    Comment { resume: usize },
    /// Inline function definition.
    Define {
        name: String,
        body: String,
        resume: usize,
    },
    /// Call of a named function.
    Call { name: String, resume: usize },
    /// Import of function definitions from an external resource.
    Import { resource: String, resume: usize },
    /// Host shell command, before placeholder substitution.
    Shell { command: String, resume: usize },
}

impl Construct {
    /// Recognise the construct whose lead character is at `ip`.
    ///
    /// Returns `None` when `ip` does not start a complete construct; the
    /// caller then treats the lead character as a no-op.
    pub fn parse(program: &Program, ip: usize) -> Option<Construct> {
        match program.char_at(ip)? {
            '[' => Some(Construct::Comment {
                resume: skip_comment(program.chars(), ip),
            }),
            DEFINE_LEAD => Self::parse_define(program, ip),
            DIRECTIVE_LEAD => Self::parse_directive(program, ip),
            _ => None,
        }
    }

    /// Offset at which execution continues after the construct.
    pub fn resume(&self) -> usize {
        match self {
            Construct::Comment { resume }
            | Construct::Define { resume, .. }
            | Construct::Call { resume, .. }
            | Construct::Import { resume, .. }
            | Construct::Shell { resume, .. } => *resume,
        }
    }

    fn parse_define(program: &Program, ip: usize) -> Option<Construct> {
        if program.char_at(ip + 1)? != NAME_DELIMITER {
            return None;
        }
        let name_start = ip + 2;
        let name_end = program.find_from(NAME_DELIMITER, name_start)?;
        let body_end = program.find_from(NAME_DELIMITER, name_end + 1)?;
        Some(Construct::Define {
            name: program.slice(name_start, name_end),
            body: program.slice(name_end + 1, body_end),
            // Skips the closing '@' and the '}' assumed to follow it.
            resume: body_end + 2,
        })
    }

    fn parse_directive(program: &Program, ip: usize) -> Option<Construct> {
        match program.char_at(ip + 1)? {
            NAME_DELIMITER => {
                let (name, resume) = Self::delimited(program, ip + 2)?;
                Some(Construct::Call { name, resume })
            }
            RESOURCE_MARK if program.char_at(ip + 2) == Some(RESOURCE_MARK) => {
                let (command, resume) = Self::delimited(program, ip + 3)?;
                Some(Construct::Shell { command, resume })
            }
            RESOURCE_MARK => {
                let (resource, resume) = Self::delimited(program, ip + 2)?;
                Some(Construct::Import { resource, resume })
            }
            _ => None,
        }
    }

    /// Text from `start` up to the next `=`, and the offset after that `=`.
    fn delimited(program: &Program, start: usize) -> Option<(String, usize)> {
        let end = program.find_from(DIRECTIVE_LEAD, start)?;
        Some((program.slice(start, end), end + 1))
    }
}
