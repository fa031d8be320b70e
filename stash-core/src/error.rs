//! Error types for the stash command language.
//!
//! Errors fall into three disjoint classes. Syntax errors come from the lexer
//! and make the rest of the line unusable. Input errors come from the binder
//! and resolver and are meant to be shown to the user, who can fix the line.
//! Configuration errors describe mistakes in the calling code (a malformed
//! binding tag, two fields claiming the same name) and should be logged
//! loudly rather than rendered as if the user had typed something wrong.

use std::fmt;

use thiserror::Error;

use crate::bind::Kind;

/// Boxed cause carried by coercion failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Malformed input detected while lexing a line.
///
/// Every position is a byte offset into the line at the point where the scan
/// stopped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected character at pos {pos}: '{ch}'")]
    UnexpectedCharacter { pos: usize, ch: char },

    #[error("unterminated quote as position {0}")]
    UnterminatedQuote(usize),

    #[error("argument contains multiple name separators = as position {0}")]
    MultipleSeparators(usize),

    #[error("arguments may not start with the name separator = at position {0}")]
    LeadingSeparator(usize),
}

impl SyntaxError {
    /// Byte offset the error refers to.
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { pos, .. } => *pos,
            Self::UnterminatedQuote(pos)
            | Self::MultipleSeparators(pos)
            | Self::LeadingSeparator(pos) => *pos,
        }
    }
}

/// A well-formed line that does not fit the command tree or the destination.
#[derive(Debug, Error)]
pub enum InputError {
    /// Named argument with no matching field, or a positional argument with
    /// no positional field left to receive it.
    #[error("unrecognised argument: '{0}'")]
    Unrecognised(String),

    #[error("invalid value: failed to parse '{value}' as {kind}: {source}")]
    InvalidValue {
        value: String,
        kind: Kind,
        #[source]
        source: BoxError,
    },

    #[error("no arguments returned")]
    NoArguments,

    #[error("expected command, got '{0}'")]
    ExpectedCommand(String),

    #[error("no matched command: '{0}'")]
    NoMatchedCommand(String),

    #[error("no resolver configured: '{0}'")]
    NoResolver(String),
}

/// A defect in how a destination record was declared.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed binding tag '{tag}' on field {field}: {reason}")]
    MalformedTag {
        field: &'static str,
        tag: &'static str,
        reason: &'static str,
    },

    #[error("duplicate binding name '{name}' on field {field}")]
    DuplicateBinding { field: &'static str, name: String },
}

/// Any error produced while lexing, binding or resolving a line.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Which of the three error classes an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Syntax,
    Input,
    Config,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "syntax",
            Self::Input => "input",
            Self::Config => "configuration",
        };
        f.write_str(name)
    }
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax(_) => ErrorCategory::Syntax,
            Self::Input(_) => ErrorCategory::Input,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Whether the user can fix this by changing what they typed.
    pub fn is_user_facing(&self) -> bool {
        self.category() != ErrorCategory::Config
    }
}

/// Result type alias for command language operations.
pub type Result<T> = std::result::Result<T, Error>;
