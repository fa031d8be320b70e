//! Interactive session state.
//!
//! The session receives every resolved [`Message`] through [`Session::update`]
//! and keeps track of what the user is looking at, so that paging commands can
//! re-issue the current listing with a different page.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::commands::{GalleryQuery, Message, PageMove, Paged, PerformerQuery, SceneQuery};

/// What the session is currently showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Home,
    Scenes(SceneQuery),
    Galleries(GalleryQuery),
    Performers(PerformerQuery),
    Scene(String),
    Performer(String),
}

impl View {
    fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Scenes(_) => "scenes",
            Self::Galleries(_) => "galleries",
            Self::Performers(_) => "performers",
            Self::Scene(_) => "scene",
            Self::Performer(_) => "performer",
        }
    }
}

/// What the caller should do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Hand this message on to be rendered or fetched.
    Show(Message),
    /// List the available commands.
    Help,
    /// Leave the interactive loop.
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("nothing to page through in the {0} view")]
    NotPaged(&'static str),

    #[error("pages start at 1")]
    InvalidPage,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    view: View,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Apply a message to the session.
    pub fn update(&mut self, message: Message) -> Result<Outcome, SessionError> {
        debug!(view = self.view.name(), ?message, "session update");

        let outcome = match message {
            Message::ListScenes(query) => {
                self.view = View::Scenes(query.clone());
                Outcome::Show(Message::ListScenes(query))
            }
            Message::ListGalleries(query) => {
                self.view = View::Galleries(query.clone());
                Outcome::Show(Message::ListGalleries(query))
            }
            Message::ListPerformers(query) => {
                self.view = View::Performers(query.clone());
                Outcome::Show(Message::ListPerformers(query))
            }
            Message::ShowScene(show) => {
                self.view = View::Scene(show.id.clone());
                Outcome::Show(Message::ShowScene(show))
            }
            Message::ShowPerformer(show) => {
                self.view = View::Performer(show.id.clone());
                Outcome::Show(Message::ShowPerformer(show))
            }
            Message::Page(movement) => Outcome::Show(self.turn_page(movement)?),
            Message::Help => Outcome::Help,
            Message::Quit => Outcome::Quit,
        };

        Ok(outcome)
    }

    /// Move the current listing to another page and return the listing to
    /// re-issue.
    fn turn_page(&mut self, movement: PageMove) -> Result<Message, SessionError> {
        match &mut self.view {
            View::Scenes(query) => {
                move_page(query, movement)?;
                Ok(Message::ListScenes(query.clone()))
            }
            View::Galleries(query) => {
                move_page(query, movement)?;
                Ok(Message::ListGalleries(query.clone()))
            }
            View::Performers(query) => {
                move_page(query, movement)?;
                Ok(Message::ListPerformers(query.clone()))
            }
            other => Err(SessionError::NotPaged(other.name())),
        }
    }
}

fn move_page<Q: Paged>(query: &mut Q, movement: PageMove) -> Result<(), SessionError> {
    let page = match movement {
        PageMove::Next => query.page().saturating_add(1),
        PageMove::Prev => query.page().saturating_sub(1).max(1),
        PageMove::Goto(0) => return Err(SessionError::InvalidPage),
        PageMove::Goto(page) => page,
    };
    query.set_page(page);
    Ok(())
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.view() {
            View::Scenes(q) => write!(f, "scenes p{}", q.page),
            View::Galleries(q) => write!(f, "galleries p{}", q.page),
            View::Performers(q) => write!(f, "performers p{}", q.page),
            View::Scene(id) | View::Performer(id) => write!(f, "{} {}", self.view().name(), id),
            View::Home => f.write_str(self.view.name()),
        }
    }
}
