use crate::Position;

/// A position within a sequential input that parsers advance and roll back.
///
/// Parsers only ever borrow a cursor mutably; the caller creates it and owns it for
/// the duration of one parse attempt.
pub trait Cursor {
    /// The type of elements this cursor iterates over.
    type Element: Copy;

    /// A restorable record of the cursor's position.
    type Snapshot: Clone;

    /// Returns the current element without consuming it, or `None` at the end of input.
    fn peek(&self) -> Option<Self::Element>;

    /// Moves past the current element.
    ///
    /// Callers must check [`Cursor::is_eos`] (or [`Cursor::peek`]) first.
    /// Advancing at the end of input is a contract violation.
    fn advance(&mut self);

    /// Captures the current position.
    fn snapshot(&self) -> Self::Snapshot;

    /// Moves back (or forward) to a previously captured position.
    fn restore(&mut self, snapshot: Self::Snapshot);

    /// Number of native units consumed since the start of the input.
    fn offset(&self) -> usize;

    /// Returns `true` if there are no more elements.
    fn is_eos(&self) -> bool {
        self.peek().is_none()
    }

    /// Consumes and returns the current element.
    fn read(&mut self) -> Option<Self::Element> {
        let element = self.peek()?;
        self.advance();
        Some(element)
    }
}

/// Cursor over a text, yielding `char`s and measuring offsets in bytes.
#[derive(Debug, Clone)]
pub struct TextCursor<'a> {
    text: &'a str,
    position: Position,
}

impl<'a> TextCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: Position::default(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn current_position(&self) -> Position {
        self.position
    }

    pub fn remaining_text(&self) -> &'a str {
        &self.text[self.position.get()..]
    }
}

impl Cursor for TextCursor<'_> {
    type Element = char;
    type Snapshot = Position;

    fn peek(&self) -> Option<char> {
        self.remaining_text().chars().next()
    }

    fn advance(&mut self) {
        debug_assert!(!self.is_eos(), "advance past the end of input");
        if let Some(c) = self.peek() {
            self.position = Position::new(self.position.get() + c.len_utf8());
        }
    }

    fn snapshot(&self) -> Position {
        self.position
    }

    /// Positions past the end are clamped, and positions inside a multi-byte `char`
    /// are moved back to the start of that `char`.
    fn restore(&mut self, snapshot: Position) {
        let mut offset = std::cmp::min(self.text.len(), snapshot.get());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.position = Position::new(offset);
    }

    fn offset(&self) -> usize {
        self.position.get()
    }

    fn is_eos(&self) -> bool {
        self.text.len() == self.position.get()
    }
}

/// Cursor over a slice of elements such as bytes or tokens.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a, T> {
    data: &'a [T],
    position: Position,
}

impl<'a, T> SliceCursor<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data,
            position: Position::default(),
        }
    }

    pub fn source(&self) -> &'a [T] {
        self.data
    }

    pub fn remaining(&self) -> &'a [T] {
        &self.data[self.position.get()..]
    }
}

impl<T: Copy> Cursor for SliceCursor<'_, T> {
    type Element = T;
    type Snapshot = Position;

    fn peek(&self) -> Option<T> {
        self.data.get(self.position.get()).copied()
    }

    fn advance(&mut self) {
        debug_assert!(!self.is_eos(), "advance past the end of input");
        self.position = Position::new(std::cmp::min(self.data.len(), self.position.get() + 1));
    }

    fn snapshot(&self) -> Position {
        self.position
    }

    fn restore(&mut self, snapshot: Position) {
        self.position = Position::new(std::cmp::min(self.data.len(), snapshot.get()));
    }

    fn offset(&self) -> usize {
        self.position.get()
    }

    fn is_eos(&self) -> bool {
        self.data.len() == self.position.get()
    }
}

/// Cursor over any cloneable forward iterator.
///
/// Snapshots clone the iterator, so the input is re-read from the saved point after a
/// restore. This suits inputs that are cheap to clone but not indexable.
#[derive(Debug, Clone)]
pub struct IterCursor<I: Iterator> {
    rest: I,
    current: Option<I::Item>,
    offset: usize,
}

/// Saved state of an [`IterCursor`].
#[derive(Debug, Clone)]
pub struct IterSnapshot<I: Iterator> {
    rest: I,
    current: Option<I::Item>,
    offset: usize,
}

impl<I> IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Copy,
{
    pub fn new(input: impl IntoIterator<IntoIter = I>) -> Self {
        let mut rest = input.into_iter();
        let current = rest.next();
        Self {
            rest,
            current,
            offset: 0,
        }
    }
}

impl<I> Cursor for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Copy,
{
    type Element = I::Item;
    type Snapshot = IterSnapshot<I>;

    fn peek(&self) -> Option<I::Item> {
        self.current
    }

    fn advance(&mut self) {
        debug_assert!(!self.is_eos(), "advance past the end of input");
        if self.current.is_some() {
            self.current = self.rest.next();
            self.offset += 1;
        }
    }

    fn snapshot(&self) -> IterSnapshot<I> {
        IterSnapshot {
            rest: self.rest.clone(),
            current: self.current,
            offset: self.offset,
        }
    }

    fn restore(&mut self, snapshot: IterSnapshot<I>) {
        self.rest = snapshot.rest;
        self.current = snapshot.current;
        self.offset = snapshot.offset;
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
