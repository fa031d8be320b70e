//! Binding argument streams onto typed records.
//!
//! A destination type describes its fields once through [`Bind::fields`].
//! [`bind`] then walks an argument stream and writes each argument into the
//! field it belongs to:
//!
//! - `name=value` goes to the field whose binding name is `name`
//! - a bare word equal to the name of a boolean field sets that field to true
//! - any other unnamed argument goes to the next positional field; a
//!   positional collection takes every positional argument that follows
//!
//! Binding is best effort: when an argument fails, fields written before it
//! keep their new values.

mod fields;
mod value;

use tracing::debug;

use crate::argument::Argument;
use crate::error::{InputError, Result, SyntaxError};
use crate::parser;

pub use fields::{Field, Fields, POSITIONAL, Shape};
pub use value::{DATE_FORMAT, DateFormatError, Kind, ParseBoolError, Value};

/// A record that arguments can be bound onto.
///
/// ```
/// use stash_core::{Bind, Fields};
///
/// #[derive(Default)]
/// struct Open {
///     id: String,
///     external: bool,
/// }
///
/// impl Bind for Open {
///     fn fields(fields: &mut Fields<Self>) {
///         fields
///             .field("Id", ",positional", |d| &mut d.id)
///             .field("External", "", |d| &mut d.external);
///     }
/// }
///
/// let open: Open = stash_core::bind_line("42 external").unwrap();
/// assert_eq!(open.id, "42");
/// assert!(open.external);
/// ```
pub trait Bind: Sized + 'static {
    /// Register the bindable fields, in declaration order.
    fn fields(fields: &mut Fields<Self>);

    /// Build a default record and bind `args` onto it.
    fn from_arguments<I>(args: I) -> Result<Self>
    where
        Self: Default,
        I: IntoIterator<Item = std::result::Result<Argument, SyntaxError>>,
    {
        let mut dest = Self::default();
        bind(args, &mut dest)?;
        Ok(dest)
    }
}

/// Build the field table of `D`.
pub fn describe<D: Bind>() -> Result<Fields<D>> {
    let mut fields = Fields::new();
    D::fields(&mut fields);
    Ok(fields.finish()?)
}

/// Bind every argument of `args` onto `dest`.
///
/// Stops at the first syntax or input error. Succeeds once the stream ends.
pub fn bind<D, I>(args: I, dest: &mut D) -> Result<()>
where
    D: Bind,
    I: IntoIterator<Item = std::result::Result<Argument, SyntaxError>>,
{
    let fields = describe::<D>()?;
    let positional = fields.positional();
    let mut next_positional = 0;

    for arg in args {
        let arg = arg?;

        let field = if arg.is_named() {
            fields
                .get(&arg.name)
                .ok_or_else(|| InputError::Unrecognised(arg.raw.clone()))?
        } else if let Some(flag) = flag_for(&fields, &arg) {
            debug!(field = flag.ident(), "boolean shorthand");
            flag.assign(dest, "true")?;
            continue;
        } else {
            let field = *positional
                .get(next_positional)
                .ok_or_else(|| InputError::Unrecognised(arg.raw.clone()))?;
            if field.shape() != Shape::Collection {
                next_positional += 1;
            }
            field
        };

        debug!(field = field.ident(), value = %arg.value, "binding argument");
        field.assign(dest, &arg.value)?;
    }

    Ok(())
}

/// Lex `line` and bind it onto a fresh `D`.
pub fn bind_line<D: Bind + Default>(line: &str) -> Result<D> {
    D::from_arguments(parser::parse(line))
}

fn flag_for<'f, D>(fields: &'f Fields<D>, arg: &Argument) -> Option<&'f Field<D>> {
    if !arg.is_name_shaped() {
        return None;
    }
    fields.get(&arg.value).filter(|field| field.is_flag())
}
