//! The unit produced by the lexer.

use std::fmt;

/// One lexed argument of a command line.
///
/// `name` is empty for positional arguments. `raw` is the exact slice of the
/// line that produced this argument, quotes, escapes and `name=` prefix
/// included, so re-lexing `raw` on its own yields the same argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Argument {
    pub raw: String,
    pub name: String,
    pub value: String,
}

impl Argument {
    pub fn new(raw: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// Unnamed argument whose raw text is also its value.
    pub fn positional(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            raw: value.clone(),
            name: String::new(),
            value,
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Whether the value came from a quoted unit (`"..."` or `'...'`).
    pub fn is_quoted(&self) -> bool {
        !self.is_named() && self.raw.starts_with(['"', '\''])
    }

    /// Unnamed, unquoted and non-empty: the only shape that can select a
    /// command or sub-command.
    pub fn is_name_shaped(&self) -> bool {
        !self.is_named() && !self.is_quoted() && !self.value.is_empty()
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
