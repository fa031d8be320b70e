//! The stash command set and the messages it produces.
//!
//! Each command binds its arguments onto a query record and wraps it in a
//! [`Message`]. Messages are plain data: the session decides what to do with
//! them and the renderer decides how to show them.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use stash_core::bind::Shape;
use stash_core::{
    Args, Bind, BoxError, CommandTree, Fields, InputError, Kind, Node, Value, bind, describe,
};

use crate::config::Config;

/// A resolved command, ready to be handed to the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "message", content = "args", rename_all = "snake_case")]
pub enum Message {
    ListScenes(SceneQuery),
    ShowScene(Show),
    ListGalleries(GalleryQuery),
    ListPerformers(PerformerQuery),
    ShowPerformer(Show),
    Page(PageMove),
    Help,
    Quit,
}

/// Filters for listing scenes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneQuery {
    pub terms: Vec<String>,
    pub page: u32,
    pub per_page: u32,
    pub performers: Vec<String>,
    pub tags: Vec<String>,
    pub organized: Option<bool>,
    pub after: Option<NaiveDate>,
    pub sort: Option<SortOrder>,
    pub favourite: bool,
}

impl Bind for SceneQuery {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .list("Terms", ",positional", |q| &mut q.terms)
            .field("Page", "", |q| &mut q.page)
            .field("PerPage", "per_page", |q| &mut q.per_page)
            .list("Performers", "performer", |q| &mut q.performers)
            .list("Tags", "tag", |q| &mut q.tags)
            .optional("Organized", "", |q| &mut q.organized)
            .optional("After", "", |q| &mut q.after)
            .optional("Sort", "", |q| &mut q.sort)
            .field("Favourite", "", |q| &mut q.favourite);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryQuery {
    pub terms: Vec<String>,
    pub page: u32,
    pub per_page: u32,
    pub performers: Vec<String>,
}

impl Bind for GalleryQuery {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .list("Terms", ",positional", |q| &mut q.terms)
            .field("Page", "", |q| &mut q.page)
            .field("PerPage", "per_page", |q| &mut q.per_page)
            .list("Performers", "performer", |q| &mut q.performers);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformerQuery {
    pub terms: Vec<String>,
    pub page: u32,
    pub per_page: u32,
    pub favourite: bool,
}

impl Bind for PerformerQuery {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .list("Terms", ",positional", |q| &mut q.terms)
            .field("Page", "", |q| &mut q.page)
            .field("PerPage", "per_page", |q| &mut q.per_page)
            .field("Favourite", "", |q| &mut q.favourite);
    }
}

/// Paging shared by every listing query.
pub trait Paged {
    fn page(&self) -> u32;
    fn per_page(&self) -> u32;
    fn set_page(&mut self, page: u32);
    fn with_page_size(per_page: u32) -> Self;
}

macro_rules! impl_paged {
    ($($query:ident { $($field:ident: $default:expr),* }),+ $(,)?) => {
        $(
            impl Paged for $query {
                fn page(&self) -> u32 {
                    self.page
                }

                fn per_page(&self) -> u32 {
                    self.per_page
                }

                fn set_page(&mut self, page: u32) {
                    self.page = page;
                }

                fn with_page_size(per_page: u32) -> Self {
                    Self {
                        page: 1,
                        per_page,
                        terms: Vec::new(),
                        $($field: $default),*
                    }
                }
            }
        )+
    };
}

impl_paged!(
    SceneQuery {
        performers: Vec::new(),
        tags: Vec::new(),
        organized: None,
        after: None,
        sort: None,
        favourite: false
    },
    GalleryQuery { performers: Vec::new() },
    PerformerQuery { favourite: false },
);

/// A single entity selected by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Show {
    pub id: String,
}

impl Bind for Show {
    fn fields(fields: &mut Fields<Self>) {
        fields.field("Id", ",positional", |s| &mut s.id);
    }
}

/// Takes no arguments at all; anything given is unrecognised.
#[derive(Debug, Default)]
pub struct NoArguments;

impl Bind for NoArguments {
    fn fields(_: &mut Fields<Self>) {}
}

#[derive(Debug, Default)]
struct Goto {
    page: u32,
}

impl Bind for Goto {
    fn fields(fields: &mut Fields<Self>) {
        fields.field("Page", ",positional", |g| &mut g.page);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMove {
    Next,
    Prev,
    Goto(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Date,
    Rating,
    Random,
}

/// `sort=<field>`, with a leading `-` for descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub field: SortField,
    pub descending: bool,
}

impl Value for SortOrder {
    const KIND: Kind = Kind::Custom("sort order");

    fn parse(input: &str) -> Result<Self, BoxError> {
        let (descending, name) = match input.strip_prefix('-') {
            Some(name) => (true, name),
            None => (false, input),
        };
        let field = match name {
            "title" => SortField::Title,
            "date" => SortField::Date,
            "rating" => SortField::Rating,
            "random" => SortField::Random,
            _ => return Err(format!("expected one of title, date, rating, random, got '{name}'").into()),
        };
        Ok(Self { field, descending })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        let name = match self.field {
            SortField::Title => "title",
            SortField::Date => "date",
            SortField::Rating => "rating",
            SortField::Random => "random",
        };
        f.write_str(name)
    }
}

/// A listing handler whose query starts from the configured page size.
fn listing<Q, F>(page_size: u32, into_message: F) -> Node<Message>
where
    Q: Bind + Paged,
    F: Fn(Q) -> Message + Send + Sync + 'static,
{
    Node::handler(move |args: &mut Args<'_>| {
        let mut query = Q::with_page_size(page_size);
        bind(args, &mut query)?;
        at_least_one("page", query.page())?;
        at_least_one("per_page", query.per_page())?;
        Ok(into_message(query))
    })
}

fn at_least_one(name: &str, value: u32) -> Result<(), InputError> {
    if value > 0 {
        return Ok(());
    }
    Err(InputError::InvalidValue {
        value: value.to_string(),
        kind: Kind::Uint,
        source: format!("{name} must be at least 1").into(),
    })
}

fn fixed(message: Message) -> Node<Message> {
    Node::bind(move |_: NoArguments| message.clone())
}

/// One-line argument summary of a bind record, e.g. `[terms...] page=<uint>`.
pub fn usage<D: Bind>() -> stash_core::Result<String> {
    let fields = describe::<D>()?;
    let parts: Vec<String> = fields
        .iter()
        .map(|field| match (field.is_positional(), field.shape()) {
            (true, Shape::Collection) => format!("[{}...]", field.name()),
            (true, _) => format!("<{}>", field.name()),
            (false, _) if field.is_flag() => format!("[{}]", field.name()),
            (false, Shape::Collection) => format!("{}=<{}>...", field.name(), field.kind()),
            (false, _) => format!("{}=<{}>", field.name(), field.kind()),
        })
        .collect();
    Ok(parts.join(" "))
}

/// Argument summaries for the commands that take arguments, keyed by path.
pub fn command_usage() -> stash_core::Result<Vec<(&'static str, String)>> {
    Ok(vec![
        ("scenes", usage::<SceneQuery>()?),
        ("scenes show", usage::<Show>()?),
        ("galleries", usage::<GalleryQuery>()?),
        ("performers", usage::<PerformerQuery>()?),
        ("performers show", usage::<Show>()?),
        ("page goto", usage::<Goto>()?),
    ])
}

/// Build the command tree. Called once at startup.
pub fn command_tree(config: &Config) -> CommandTree<Message> {
    let page_size = config.page_size;

    CommandTree::new()
        .command(
            "scenes",
            listing(page_size, Message::ListScenes).child("show", Node::bind(Message::ShowScene)),
        )
        .command("galleries", listing(page_size, Message::ListGalleries))
        .command(
            "performers",
            listing(page_size, Message::ListPerformers)
                .child("show", Node::bind(Message::ShowPerformer)),
        )
        .command(
            "page",
            Node::new()
                .child("next", fixed(Message::Page(PageMove::Next)))
                .child("prev", fixed(Message::Page(PageMove::Prev)))
                .child("goto", Node::bind(|goto: Goto| Message::Page(PageMove::Goto(goto.page)))),
        )
        .command("help", fixed(Message::Help))
        .command("quit", fixed(Message::Quit))
        .command("exit", fixed(Message::Quit))
}
