//! Function table for OATMEAL.
//!
//! Functions are named bodies of instruction text. A body is stored exactly
//! as it was defined and only ever re-read, never rewritten, so calling a
//! function can not change what it will do next time.
//!
//! # Syntax
//!
//! ```text
//! {@double@>"^^@}     define `double` inline
//! =@double=           call it
//! =$lib.oat=          import every definition found in lib.oat
//! ```
//!
//! Names and bodies are delimited by `@` and can never contain it.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;

use crate::program::Program;

/// Pattern for definitions inside an imported resource.
///
/// Unlike inline definitions, imported names must be non-empty and the
/// closing `}` must be present.
fn definition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{@([^@]+)@([^@]*)@\}").unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
    })
}

/// A named body of instruction text.
#[derive(Debug, Clone)]
pub struct Function {
    /// Name the function is called by.
    pub name: String,
    body: String,
    program: Rc<Program>,
}

impl Function {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let program = Rc::new(Program::new(&body));
        Self {
            name: name.into(),
            body,
            program,
        }
    }

    /// The body exactly as it was defined.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The body loaded for execution.
    pub fn program(&self) -> Rc<Program> {
        Rc::clone(&self.program)
    }
}

/// Every `(name, body)` definition in `text`, in order of appearance.
pub fn scan_definitions(text: &str) -> impl Iterator<Item = (&str, &str)> {
    definition_pattern().captures_iter(text).filter_map(|caps| {
        let name = caps.get(1)?.as_str();
        let body = caps.get(2)?.as_str();
        Some((name, body))
    })
}

/// Mapping from name to function.
///
/// The table outlives individual runs: definitions made by one program are
/// still callable by the next program run on the same interpreter.
#[derive(Debug, Default, Clone)]
pub struct FunctionTable {
    functions: HashMap<String, Function>,
}

impl FunctionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a function. Returns `true` if a previous
    /// definition was replaced.
    pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) -> bool {
        let function = Function::new(name, body);
        self.functions
            .insert(function.name.clone(), function)
            .is_some()
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Body of a function, if defined.
    pub fn body(&self, name: &str) -> Option<&str> {
        self.get(name).map(Function::body)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Register every definition found in `text`, overwriting same-named
    /// functions. Returns the number of definitions registered.
    pub fn import(&mut self, text: &str) -> usize {
        let mut count = 0;
        for (name, body) in scan_definitions(text) {
            self.define(name, body);
            count += 1;
        }
        count
    }

    /// Remove a single function.
    pub fn remove(&mut self, name: &str) -> Option<Function> {
        self.functions.remove(name)
    }

    /// Defined names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Forget every definition.
    pub fn clear(&mut self) {
        self.functions.clear();
    }
}
