//! One-item lookahead over an argument stream.

use std::iter::{Fuse, FusedIterator};

/// Wraps an iterator with a single buffered lookahead slot.
///
/// [`Cursor::peek`] pulls the next item into the slot without consuming it.
/// The item is consumed either by [`Cursor::commit`] or by the next call to
/// [`Iterator::next`]. End-of-input is sticky: once the underlying iterator
/// has returned `None`, the cursor keeps returning `None`.
#[derive(Debug, Clone)]
pub struct Cursor<I: Iterator> {
    inner: Fuse<I>,
    peeked: Option<Option<I::Item>>,
}

impl<I: Iterator> Cursor<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner: inner.fuse(),
            peeked: None,
        }
    }

    /// Look at the next item without consuming it.
    pub fn peek(&mut self) -> Option<&I::Item> {
        let inner = &mut self.inner;
        self.peeked.get_or_insert_with(|| inner.next()).as_ref()
    }

    /// Consume the item buffered by the last [`Cursor::peek`].
    ///
    /// Returns `None` without advancing when nothing is buffered.
    pub fn commit(&mut self) -> Option<I::Item> {
        self.peeked.take().flatten()
    }

    /// Whether the underlying stream has no items left.
    pub fn is_exhausted(&mut self) -> bool {
        self.peek().is_none()
    }
}

impl<I: Iterator> Iterator for Cursor<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match self.peeked.take() {
            Some(item) => item,
            None => self.inner.next(),
        }
    }
}

impl<I: Iterator> FusedIterator for Cursor<I> {}
