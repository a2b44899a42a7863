//! Single-character instruction set.
//!
//! Every character of program text decodes to exactly one [`OpCode`].
//! Characters with no meaning decode to [`OpCode::Nop`], so layout and
//! whitespace never change what a program does.

/// One decoded instruction character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // ═══════════════════════════════════════════════════════════════════
    // Pointer
    // ═══════════════════════════════════════════════════════════════════

    /// `>` Move the data pointer right.
    MoveRight,
    /// `<` Move the data pointer left.
    MoveLeft,

    // ═══════════════════════════════════════════════════════════════════
    // Bowl Mutation
    // ═══════════════════════════════════════════════════════════════════

    /// `^` Add one to the current bowl.
    Increment,
    /// `v` Subtract one from the current bowl (floors at zero).
    Decrement,
    /// `"` Insert a bowl; only valid directly after `>`.
    Insert,
    /// `:` Delete the current bowl.
    Delete,
    /// `!` Logical not of the current bowl.
    Not,
    /// `&` Empty the current bowl into every other bowl.
    Distribute,
    /// `%` Toggle the read-only mark of the current bowl.
    ToggleReadOnly,

    // ═══════════════════════════════════════════════════════════════════
    // Control Flow
    // ═══════════════════════════════════════════════════════════════════

    /// `'` Value-directed jump within the innermost scope.
    Goto,
    /// `/` Open a scope.
    ScopeOpen,
    /// `\` Close the innermost scope.
    ScopeClose,

    // ═══════════════════════════════════════════════════════════════════
    // I/O
    // ═══════════════════════════════════════════════════════════════════

    /// `~` Read a decimal number line into the current bowl.
    InputNumber,
    /// `` ` `` Read one character's code point into the current bowl.
    InputChar,
    /// `_` Write the current bowl as a decimal number.
    OutputNumber,
    /// `-` Write the current bowl as a character.
    OutputChar,

    // ═══════════════════════════════════════════════════════════════════
    // Construct Leads
    // ═══════════════════════════════════════════════════════════════════

    /// `[` Start of a comment.
    Comment,
    /// `{` Start of an inline function definition.
    Define,
    /// `=` Start of a call, import or shell directive.
    Directive,

    // ═══════════════════════════════════════════════════════════════════
    // No-ops
    // ═══════════════════════════════════════════════════════════════════

    /// `;` or `?` Marker for human readers.
    Annotation,
    /// `.` Reserved.
    Reserved,
    /// Any other character.
    Nop,
}

impl OpCode {
    /// Decode a character of program text.
    pub fn decode(c: char) -> OpCode {
        match c {
            '>' => OpCode::MoveRight,
            '<' => OpCode::MoveLeft,
            '^' => OpCode::Increment,
            'v' => OpCode::Decrement,
            '"' => OpCode::Insert,
            ':' => OpCode::Delete,
            '!' => OpCode::Not,
            '&' => OpCode::Distribute,
            '%' => OpCode::ToggleReadOnly,
            '\'' => OpCode::Goto,
            '/' => OpCode::ScopeOpen,
            '\\' => OpCode::ScopeClose,
            '~' => OpCode::InputNumber,
            '`' => OpCode::InputChar,
            '_' => OpCode::OutputNumber,
            '-' => OpCode::OutputChar,
            '[' => OpCode::Comment,
            '{' => OpCode::Define,
            '=' => OpCode::Directive,
            ';' | '?' => OpCode::Annotation,
            '.' => OpCode::Reserved,
            _ => OpCode::Nop,
        }
    }

    /// Human-readable name, used in traces.
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::MoveRight => "RIGHT",
            OpCode::MoveLeft => "LEFT",
            OpCode::Increment => "INC",
            OpCode::Decrement => "DEC",
            OpCode::Insert => "INSERT",
            OpCode::Delete => "DELETE",
            OpCode::Not => "NOT",
            OpCode::Distribute => "DISTRIBUTE",
            OpCode::ToggleReadOnly => "READONLY",
            OpCode::Goto => "GOTO",
            OpCode::ScopeOpen => "OPEN",
            OpCode::ScopeClose => "CLOSE",
            OpCode::InputNumber => "INPUT_NUM",
            OpCode::InputChar => "INPUT_CHAR",
            OpCode::OutputNumber => "OUTPUT_NUM",
            OpCode::OutputChar => "OUTPUT_CHAR",
            OpCode::Comment => "COMMENT",
            OpCode::Define => "DEFINE",
            OpCode::Directive => "DIRECTIVE",
            OpCode::Annotation => "ANNOTATION",
            OpCode::Reserved => "RESERVED",
            OpCode::Nop => "NOP",
        }
    }

    /// Whether this instruction changes bowl values or the tape layout.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            OpCode::Increment
                | OpCode::Decrement
                | OpCode::Insert
                | OpCode::Delete
                | OpCode::Not
                | OpCode::Distribute
                | OpCode::InputNumber
                | OpCode::InputChar
        )
    }
}
