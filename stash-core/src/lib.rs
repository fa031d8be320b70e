//! Command argument language for the stash client.
//!
//! A line of user input goes through three stages:
//!
//! 1. [`parse`] lexes it into a lazy stream of [`Argument`]s, resolving
//!    quotes, escapes and `name=value` pairs.
//! 2. [`CommandTree::resolve`] matches the leading words against a static
//!    tree of commands and hands the rest of the stream to a handler.
//! 3. The handler usually calls [`bind`] to fill a typed record, declared
//!    through [`Bind`], and turns it into a message.
//!
//! Everything here is synchronous and free of I/O. Streams and cursors belong
//! to the line they were created for; command trees are immutable and can be
//! shared.

mod argument;
mod cursor;
mod error;
mod parser;
mod resolver;

pub mod bind;

pub use argument::Argument;
pub use bind::{Bind, Fields, Kind, Value, bind, bind_line, describe};
pub use cursor::Cursor;
pub use error::{
    BoxError, ConfigError, Error, ErrorCategory, InputError, Result, SyntaxError,
};
pub use parser::{Arguments, NAME_SEPARATOR, parse};
pub use resolver::{ArgumentResult, Args, CommandTree, Handler, Node};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
