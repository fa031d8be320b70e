//! Rendering of resolved messages.
//!
//! Messages are shown either as a one-line summary or, in raw mode, as the
//! JSON a data layer would receive.

use colored::Colorize;

use crate::commands::{GalleryQuery, Message, PageMove, PerformerQuery, SceneQuery};

pub fn render_message(message: &Message, raw: bool) -> serde_json::Result<()> {
    if raw {
        println!("{}", serde_json::to_string_pretty(message)?);
    } else {
        println!("{} {}", "→".bright_cyan(), summarize(message));
    }
    Ok(())
}

/// One-line description of a message.
pub fn summarize(message: &Message) -> String {
    match message {
        Message::ListScenes(query) => scenes_summary(query),
        Message::ListGalleries(query) => galleries_summary(query),
        Message::ListPerformers(query) => performers_summary(query),
        Message::ShowScene(show) => format!("scene {}", show.id),
        Message::ShowPerformer(show) => format!("performer {}", show.id),
        Message::Page(PageMove::Next) => "next page".to_string(),
        Message::Page(PageMove::Prev) => "previous page".to_string(),
        Message::Page(PageMove::Goto(page)) => format!("page {page}"),
        Message::Help => "help".to_string(),
        Message::Quit => "quit".to_string(),
    }
}

fn scenes_summary(query: &SceneQuery) -> String {
    let mut parts = listing("scenes", &query.terms, query.page, query.per_page);
    push_list(&mut parts, "performer", &query.performers);
    push_list(&mut parts, "tag", &query.tags);
    if let Some(organized) = query.organized {
        parts.push(format!("organized={organized}"));
    }
    if let Some(after) = query.after {
        parts.push(format!("after={after}"));
    }
    if let Some(sort) = query.sort {
        parts.push(format!("sort={sort}"));
    }
    if query.favourite {
        parts.push("favourite".to_string());
    }
    parts.join(" ")
}

fn galleries_summary(query: &GalleryQuery) -> String {
    let mut parts = listing("galleries", &query.terms, query.page, query.per_page);
    push_list(&mut parts, "performer", &query.performers);
    parts.join(" ")
}

fn performers_summary(query: &PerformerQuery) -> String {
    let mut parts = listing("performers", &query.terms, query.page, query.per_page);
    if query.favourite {
        parts.push("favourite".to_string());
    }
    parts.join(" ")
}

fn listing(kind: &str, terms: &[String], page: u32, per_page: u32) -> Vec<String> {
    let mut parts = vec![format!("{kind} page {page} ({per_page} per page)")];
    if !terms.is_empty() {
        parts.push(format!("matching {:?}", terms.join(" ")));
    }
    parts
}

fn push_list(parts: &mut Vec<String>, name: &str, values: &[String]) {
    if !values.is_empty() {
        parts.push(format!("{name}={}", values.join(",")));
    }
}
