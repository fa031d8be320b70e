//! Lexer for command lines.
//!
//! A line is split lazily into [`Argument`]s, one per call to
//! [`Iterator::next`]. Arguments are separated by runs of Unicode whitespace
//! and take one of these forms:
//!
//! - `value`: a bare word, anything up to whitespace or `=`
//! - `"value"` / `'value'`: a quoted word, `\"` (or `\'`) escapes the quote
//! - `name=value`: a bare name followed by a bare or quoted value
//!
//! Syntax errors end the sequence. The iterator yields the error once and then
//! reports end-of-input.

use std::iter::FusedIterator;

use tracing::trace;

use crate::argument::Argument;
use crate::error::SyntaxError;

/// Separates an argument name from its value.
pub const NAME_SEPARATOR: char = '=';

const ESCAPE: char = '\\';

/// Lex a line into a stream of arguments.
pub fn parse(line: &str) -> Arguments<'_> {
    Arguments::new(line)
}

/// Pull-based cursor over the arguments of one line.
#[derive(Debug, Clone)]
pub struct Arguments<'a> {
    input: &'a str,
    pos: usize,
    done: bool,
}

/// A scanned value unit and whether the scan stopped on a name separator.
enum Unit {
    Complete(String),
    Separated(String),
}

impl<'a> Arguments<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            done: false,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the line.
    pub fn remainder(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remainder();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn lex(&mut self) -> Result<Option<Argument>, SyntaxError> {
        self.skip_whitespace();
        let start = self.pos;

        match self.peek_char() {
            None => return Ok(None),
            Some(NAME_SEPARATOR) => return Err(SyntaxError::LeadingSeparator(self.pos)),
            Some(_) => {}
        }

        let (name, value) = match self.value_unit()? {
            Unit::Complete(value) => (String::new(), value),
            Unit::Separated(name) => {
                self.pos += NAME_SEPARATOR.len_utf8();
                match self.value_unit()? {
                    Unit::Complete(value) => (name, value),
                    Unit::Separated(_) => return Err(SyntaxError::MultipleSeparators(self.pos)),
                }
            }
        };

        Ok(Some(Argument {
            raw: self.input[start..self.pos].to_string(),
            name,
            value,
        }))
    }

    fn value_unit(&mut self) -> Result<Unit, SyntaxError> {
        match self.peek_char() {
            Some(quote @ ('"' | '\'')) => self.quoted(quote).map(Unit::Complete),
            _ => Ok(self.bare()),
        }
    }

    fn bare(&mut self) -> Unit {
        let rest = self.remainder();
        let end = rest
            .find(|c: char| c.is_whitespace() || c == NAME_SEPARATOR)
            .unwrap_or(rest.len());
        let text = rest[..end].to_string();
        self.pos += end;

        if rest[end..].starts_with(NAME_SEPARATOR) {
            Unit::Separated(text)
        } else {
            Unit::Complete(text)
        }
    }

    /// Scan a quoted unit starting at the opening quote, collapsing escaped
    /// quotes. The closing quote must be followed by whitespace or the end of
    /// the line.
    fn quoted(&mut self, quote: char) -> Result<String, SyntaxError> {
        let body_start = self.pos + quote.len_utf8();
        let mut value = String::new();
        let mut chars = self.input[body_start..].char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c == ESCAPE {
                match chars.peek() {
                    Some(&(_, next)) if next == quote => {
                        value.push(quote);
                        chars.next();
                    }
                    // `\\` is one unit and passes through unchanged.
                    Some(&(_, ESCAPE)) => {
                        value.push_str(r"\\");
                        chars.next();
                    }
                    _ => value.push(c),
                }
                continue;
            }

            if c == quote {
                self.pos = body_start + offset + quote.len_utf8();
                return match self.peek_char() {
                    Some(next) if !next.is_whitespace() => Err(SyntaxError::UnexpectedCharacter {
                        pos: self.pos,
                        ch: next,
                    }),
                    _ => Ok(value),
                };
            }

            value.push(c);
        }

        self.pos = self.input.len();
        Err(SyntaxError::UnterminatedQuote(self.pos))
    }
}

impl Iterator for Arguments<'_> {
    type Item = Result<Argument, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.lex() {
            Ok(Some(argument)) => {
                trace!(raw = %argument.raw, name = %argument.name, "lexed argument");
                Some(Ok(argument))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                trace!(%err, "lexing stopped");
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Arguments<'_> {}
