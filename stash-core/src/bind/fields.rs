//! Field descriptor tables for bind destinations.

use std::collections::HashMap;
use std::fmt;

use crate::error::{BoxError, ConfigError, InputError};
use crate::parser::NAME_SEPARATOR;

use super::value::{Kind, Value};

/// Option that marks a field as eligible for positional arguments.
pub const POSITIONAL: &str = "positional";

type Setter<D> = Box<dyn Fn(&mut D, &str) -> Result<(), BoxError>>;

/// How a field stores what it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Each write replaces the value.
    Scalar,
    /// Allocated on first write, then replaced like a scalar.
    Optional,
    /// Each write appends one element.
    Collection,
}

/// One bindable field of a destination record.
pub struct Field<D> {
    ident: &'static str,
    name: String,
    positional: bool,
    kind: Kind,
    shape: Shape,
    setter: Setter<D>,
}

impl<D> Field<D> {
    /// Identifier the field was registered under.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Name matched against named arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Boolean fields can be switched on by writing their name alone.
    pub fn is_flag(&self) -> bool {
        self.kind == Kind::Bool && self.shape != Shape::Collection
    }

    /// Coerce `value` and write it into `dest`.
    pub(crate) fn assign(&self, dest: &mut D, value: &str) -> Result<(), InputError> {
        (self.setter)(dest, value).map_err(|source| InputError::InvalidValue {
            value: value.to_string(),
            kind: self.kind,
            source,
        })
    }
}

impl<D> fmt::Debug for Field<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("ident", &self.ident)
            .field("name", &self.name)
            .field("positional", &self.positional)
            .field("kind", &self.kind)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Ordered table of the fields of a destination `D`.
///
/// Filled in by [`Bind::fields`](super::Bind::fields). Each registration takes
/// the field identifier, a binding tag and an accessor. The tag has the form
/// `name[,positional]`; an empty name falls back to the lower-cased
/// identifier. Registration order is the order positional arguments are
/// handed out in.
pub struct Fields<D> {
    fields: Vec<Field<D>>,
    by_name: HashMap<String, usize>,
    error: Option<ConfigError>,
}

impl<D: 'static> Fields<D> {
    pub(crate) fn new() -> Self {
        Self {
            fields: Vec::new(),
            by_name: HashMap::new(),
            error: None,
        }
    }

    /// Register a field whose value is replaced on every write.
    pub fn field<T: Value + 'static>(
        &mut self,
        ident: &'static str,
        tag: &'static str,
        access: fn(&mut D) -> &mut T,
    ) -> &mut Self {
        let setter: Setter<D> = Box::new(move |dest, value| {
            *access(dest) = T::parse(value)?;
            Ok(())
        });
        self.push(ident, tag, T::KIND, Shape::Scalar, setter)
    }

    /// Register an optional field, set to `Some` on first write.
    pub fn optional<T: Value + 'static>(
        &mut self,
        ident: &'static str,
        tag: &'static str,
        access: fn(&mut D) -> &mut Option<T>,
    ) -> &mut Self {
        let setter: Setter<D> = Box::new(move |dest, value| {
            *access(dest) = Some(T::parse(value)?);
            Ok(())
        });
        self.push(ident, tag, T::KIND, Shape::Optional, setter)
    }

    /// Register a collection field; every write appends one element.
    ///
    /// As a positional field it swallows every remaining positional argument.
    pub fn list<T: Value + 'static>(
        &mut self,
        ident: &'static str,
        tag: &'static str,
        access: fn(&mut D) -> &mut Vec<T>,
    ) -> &mut Self {
        let setter: Setter<D> = Box::new(move |dest, value| {
            access(dest).push(T::parse(value)?);
            Ok(())
        });
        self.push(ident, tag, T::KIND, Shape::Collection, setter)
    }

    fn push(
        &mut self,
        ident: &'static str,
        tag: &'static str,
        kind: Kind,
        shape: Shape,
        setter: Setter<D>,
    ) -> &mut Self {
        if self.error.is_some() {
            return self;
        }

        let (name, positional) = match parse_tag(ident, tag) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.error = Some(err);
                return self;
            }
        };

        if self.by_name.contains_key(&name) {
            self.error = Some(ConfigError::DuplicateBinding { field: ident, name });
            return self;
        }

        self.by_name.insert(name.clone(), self.fields.len());
        self.fields.push(Field {
            ident,
            name,
            positional,
            kind,
            shape,
            setter,
        });
        self
    }

    /// Finish registration, reporting the first declaration mistake.
    pub(crate) fn finish(self) -> Result<Self, ConfigError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

impl<D> Fields<D> {
    pub fn iter(&self) -> impl Iterator<Item = &Field<D>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Field<D>> {
        self.by_name.get(name).map(|&index| &self.fields[index])
    }

    /// Positional fields in declaration order.
    pub fn positional(&self) -> Vec<&Field<D>> {
        self.fields.iter().filter(|field| field.positional).collect()
    }
}

impl<D> fmt::Debug for Fields<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// Split a `name[,positional]` tag into a binding name and positional flag.
fn parse_tag(ident: &'static str, tag: &'static str) -> Result<(String, bool), ConfigError> {
    let malformed = |reason| ConfigError::MalformedTag {
        field: ident,
        tag,
        reason,
    };

    let (name, positional) = match tag.split_once(',') {
        None => (tag, false),
        Some((name, POSITIONAL)) => (name, true),
        Some((_, options)) if options.contains(',') => {
            return Err(malformed("too many options"));
        }
        Some(_) => return Err(malformed("unknown option")),
    };

    if name
        .chars()
        .any(|c| c.is_whitespace() || c == NAME_SEPARATOR || c == '"' || c == '\'')
    {
        return Err(malformed("binding name must be a bare word"));
    }

    let name = if name.is_empty() {
        ident.to_lowercase()
    } else {
        name.to_string()
    };

    if name.is_empty() {
        return Err(malformed("binding name is empty"));
    }

    Ok((name, positional))
}
