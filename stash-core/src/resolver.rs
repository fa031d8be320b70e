//! Command resolution over a static command tree.
//!
//! The first argument of a line selects a top-level command. While the
//! selected node has sub-commands, the next argument is peeked: if it is a
//! plain word naming a sub-command the resolver descends into it, otherwise
//! the argument is left in place for the handler. Descent is greedy and never
//! backtracks. The handler of the final node receives the rest of the stream
//! and produces the message.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::argument::Argument;
use crate::bind::Bind;
use crate::cursor::Cursor;
use crate::error::{InputError, Result, SyntaxError};
use crate::parser;

/// One item of an argument stream.
pub type ArgumentResult = std::result::Result<Argument, SyntaxError>;

/// The argument stream handed to a command handler.
pub type Args<'a> = dyn Iterator<Item = ArgumentResult> + 'a;

/// Turns the remaining arguments of a line into a message.
pub type Handler<M> = Box<dyn Fn(&mut Args<'_>) -> Result<M> + Send + Sync>;

/// A command, its handler and its sub-commands.
pub struct Node<M> {
    handler: Option<Handler<M>>,
    children: BTreeMap<String, Node<M>>,
}

impl<M> Node<M> {
    /// A node with neither handler nor children.
    pub fn new() -> Self {
        Self {
            handler: None,
            children: BTreeMap::new(),
        }
    }

    pub fn handler<F>(handler: F) -> Self
    where
        F: Fn(&mut Args<'_>) -> Result<M> + Send + Sync + 'static,
    {
        Self::new().with_handler(handler)
    }

    /// A handler that binds the remaining arguments onto a fresh `D` and maps
    /// the record into a message.
    pub fn bind<D, F>(into_message: F) -> Self
    where
        D: Bind + Default,
        F: Fn(D) -> M + Send + Sync + 'static,
    {
        Self::handler(move |args: &mut Args<'_>| Ok(into_message(D::from_arguments(args)?)))
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Args<'_>) -> Result<M> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Add a sub-command, replacing any existing one of the same name.
    pub fn child(mut self, name: impl Into<String>, node: Node<M>) -> Self {
        self.children.insert(name.into(), node);
        self
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Node<M>)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }
}

impl<M> Default for Node<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for Node<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("handler", &self.has_handler())
            .field("children", &self.children)
            .finish()
    }
}

/// The top-level command table.
///
/// Built once at startup and never mutated afterwards, so a tree can be
/// shared across threads and used for any number of lines.
pub struct CommandTree<M> {
    commands: BTreeMap<String, Node<M>>,
}

impl<M> CommandTree<M> {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Add a top-level command, replacing any existing one of the same name.
    pub fn command(mut self, name: impl Into<String>, node: Node<M>) -> Self {
        self.commands.insert(name.into(), node);
        self
    }

    /// Look up a node by its command path.
    pub fn get(&self, path: &[&str]) -> Option<&Node<M>> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.commands.get(*first)?, |node, name| node.children.get(*name))
    }

    /// Every command path that has a handler, space-joined, in sorted order.
    pub fn commands(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for (name, node) in &self.commands {
            collect_paths(name.clone(), node, &mut paths);
        }
        paths
    }

    /// Resolve `args` to a handler and run it.
    pub fn resolve<I>(&self, args: I) -> Result<M>
    where
        I: IntoIterator<Item = ArgumentResult>,
    {
        let mut cursor = Cursor::new(args.into_iter());

        let first = cursor.next().ok_or(InputError::NoArguments)??;
        if !first.is_name_shaped() {
            return Err(InputError::ExpectedCommand(first.raw).into());
        }

        let mut node = self
            .commands
            .get(&first.value)
            .ok_or_else(|| InputError::NoMatchedCommand(first.value.clone()))?;
        let mut path = vec![first.value];

        while !node.children.is_empty() {
            let matched = match cursor.peek() {
                Some(Ok(arg)) if arg.is_name_shaped() => node
                    .children
                    .get(&arg.value)
                    .map(|child| (arg.value.clone(), child)),
                _ => None,
            };

            let Some((name, child)) = matched else {
                debug!(command = %path.join(" "), "stopped descending");
                break;
            };

            cursor.commit();
            path.push(name);
            node = child;
        }

        let command = path.join(" ");
        let handler = node
            .handler
            .as_ref()
            .ok_or_else(|| InputError::NoResolver(command.clone()))?;

        debug!(%command, "resolved command");
        let args: &mut Args<'_> = &mut cursor;
        handler(args)
    }

    /// Lex `line` and resolve it.
    pub fn resolve_line(&self, line: &str) -> Result<M> {
        self.resolve(parser::parse(line))
    }
}

fn collect_paths<M>(path: String, node: &Node<M>, paths: &mut Vec<String>) {
    if node.has_handler() {
        paths.push(path.clone());
    }
    for (name, child) in node.children() {
        collect_paths(format!("{path} {name}"), child, paths);
    }
}

impl<M> Default for CommandTree<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for CommandTree<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(&self.commands).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Records which handler ran and what it was left with.
    fn echo(label: &'static str) -> Node<(String, Vec<String>)> {
        Node::handler(move |args: &mut Args<'_>| {
            let rest = args
                .map(|arg| arg.map(|arg| arg.raw))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok((label.to_string(), rest))
        })
    }

    fn tree() -> CommandTree<(String, Vec<String>)> {
        CommandTree::new()
            .command("foo", echo("foo").child("bar", echo("bar")))
            .command("branch", Node::new().child("leaf", echo("leaf")))
    }

    fn resolved(line: &str) -> (String, Vec<String>) {
        tree().resolve_line(line).unwrap()
    }

    #[test]
    fn unmatched_peek_stays_with_handler() {
        assert_eq!(resolved("foo baz"), ("foo".into(), vec!["baz".into()]));
    }

    #[test]
    fn descends_into_matching_child() {
        assert_eq!(resolved("foo bar baz"), ("bar".into(), vec!["baz".into()]));
        assert_eq!(resolved("foo bar"), ("bar".into(), vec![]));
    }

    #[test]
    fn only_plain_words_select_children() {
        assert_eq!(resolved(r#"foo "bar""#), ("foo".into(), vec![r#""bar""#.into()]));
        assert_eq!(resolved("foo bar=1"), ("foo".into(), vec!["bar=1".into()]));
    }

    #[test]
    fn descent_stops_at_first_mismatch() {
        assert_eq!(
            resolved("foo baz bar"),
            ("foo".into(), vec!["baz".into(), "bar".into()])
        );
    }

    #[test]
    fn syntax_error_while_peeking_reaches_handler() {
        let err = tree().resolve_line(r#"foo "bar"#).unwrap_err();
        assert!(matches!(err, Error::Syntax(SyntaxError::UnterminatedQuote(8))));
    }

    #[test]
    fn resolution_errors() {
        let tree = tree();
        let message = |line: &str| tree.resolve_line(line).unwrap_err().to_string();

        assert_eq!(message(""), "no arguments returned");
        assert_eq!(message("   "), "no arguments returned");
        assert_eq!(message("x=1"), "expected command, got 'x=1'");
        assert_eq!(message("'foo'"), "expected command, got ''foo''");
        assert_eq!(message("nope"), "no matched command: 'nope'");
        assert_eq!(message("branch"), "no resolver configured: 'branch'");
        assert_eq!(message("branch other"), "no resolver configured: 'branch'");
        assert_eq!(message("=foo"), "arguments may not start with the name separator = at position 0");
    }

    #[test]
    fn lists_resolvable_commands() {
        assert_eq!(tree().commands(), ["branch leaf", "foo", "foo bar"]);
    }

    #[test]
    fn looks_up_nodes_by_path() {
        let tree = tree();
        assert!(tree.get(&["foo", "bar"]).is_some_and(Node::has_handler));
        assert!(tree.get(&["branch"]).is_some_and(|node| !node.has_handler()));
        assert!(tree.get(&["foo", "baz"]).is_none());
        assert!(tree.get(&[]).is_none());
    }

    #[test]
    fn tree_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CommandTree<(String, Vec<String>)>>();
    }
}
