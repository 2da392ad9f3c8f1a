//! Combinators that compose parsers into new parsers.
use crate::{Cursor, Parse};

/// Positive lookahead. See [`test_and`].
#[derive(Debug, Clone, Copy)]
pub struct TestAnd<P> {
    parser: P,
}

impl<C: Cursor, P: Parse<C>> Parse<C> for TestAnd<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        let start = cursor.snapshot();
        let matched = self.parser.parse(cursor);
        cursor.restore(start);
        matched
    }
}

/// Succeeds iff `parser` would match here. Never consumes input.
pub const fn test_and<P>(parser: P) -> TestAnd<P> {
    TestAnd { parser }
}

/// Negative lookahead. See [`test_not`].
#[derive(Debug, Clone, Copy)]
pub struct TestNot<P> {
    parser: P,
}

impl<C: Cursor, P: Parse<C>> Parse<C> for TestNot<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        let start = cursor.snapshot();
        let matched = self.parser.parse(cursor);
        cursor.restore(start);
        !matched
    }
}

/// Succeeds iff `parser` would not match here. Never consumes input.
pub const fn test_not<P>(parser: P) -> TestNot<P> {
    TestNot { parser }
}

// Keeps matching after a first successful attempt that started at `before`.
// An attempt that consumes nothing would match forever, so it ends the loop.
fn repeat_from<C: Cursor, P: Parse<C>>(parser: &P, cursor: &mut C, mut before: usize) {
    while cursor.offset() != before {
        before = cursor.offset();
        if !parser.parse(cursor) {
            break;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Repeat0<P> {
    parser: P,
}

impl<C: Cursor, P: Parse<C>> Parse<C> for Repeat0<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        let before = cursor.offset();
        if self.parser.parse(cursor) {
            repeat_from(&self.parser, cursor, before);
        }
        true
    }
}

/// Matches `parser` zero or more times, greedily. Always succeeds.
pub const fn repeat0<P>(parser: P) -> Repeat0<P> {
    Repeat0 { parser }
}

#[derive(Debug, Clone, Copy)]
pub struct Repeat1<P> {
    parser: P,
}

impl<C: Cursor, P: Parse<C>> Parse<C> for Repeat1<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        let before = cursor.offset();
        if !self.parser.parse(cursor) {
            return false;
        }
        repeat_from(&self.parser, cursor, before);
        true
    }
}

/// Matches `parser` one or more times, greedily.
pub const fn repeat1<P>(parser: P) -> Repeat1<P> {
    Repeat1 { parser }
}

#[derive(Debug, Clone, Copy)]
pub struct Optional<P> {
    parser: P,
}

impl<C: Cursor, P: Parse<C>> Parse<C> for Optional<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        self.parser.parse(cursor);
        true
    }
}

/// Matches `parser` if possible. Always succeeds.
pub const fn optional<P>(parser: P) -> Optional<P> {
    Optional { parser }
}

#[derive(Debug, Clone, Copy)]
pub struct NonEmpty<P> {
    parser: P,
}

impl<C: Cursor, P: Parse<C>> Parse<C> for NonEmpty<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        let start = cursor.snapshot();
        let before = cursor.offset();
        if self.parser.parse(cursor) && cursor.offset() != before {
            true
        } else {
            cursor.restore(start);
            false
        }
    }
}

/// Matches `parser` only when it consumes at least one element.
pub const fn non_empty<P>(parser: P) -> NonEmpty<P> {
    NonEmpty { parser }
}

#[derive(Debug, Clone, Copy)]
pub struct Separated<P, D> {
    item: P,
    delimiter: D,
}

impl<C: Cursor, P: Parse<C>, D: Parse<C>> Parse<C> for Separated<P, D> {
    fn parse(&self, cursor: &mut C) -> bool {
        if !self.item.parse(cursor) {
            return false;
        }
        loop {
            let start = cursor.snapshot();
            let before = cursor.offset();
            if !(self.delimiter.parse(cursor) && self.item.parse(cursor)) {
                cursor.restore(start);
                break;
            }
            if cursor.offset() == before {
                break;
            }
        }
        true
    }
}

/// Matches one or more `item`s separated by `delimiter`.
///
/// A trailing delimiter that is not followed by an item is left unconsumed.
pub const fn separated<P, D>(item: P, delimiter: D) -> Separated<P, D> {
    Separated { item, delimiter }
}

/// A fixed list of parsers: a tuple, an array, a slice or a `Vec`.
pub trait Parsers<C: Cursor> {
    /// Runs every parser in order, stopping at the first failure. Does not roll back.
    fn parse_each(&self, cursor: &mut C) -> bool;

    /// Runs the parsers in order until one matches.
    fn parse_first(&self, cursor: &mut C) -> bool;
}

macro_rules! impl_parsers_for_tuple {
    ($($p:ident),*) => {
        impl<C: Cursor, $($p: Parse<C>),*> Parsers<C> for ($($p,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn parse_each(&self, cursor: &mut C) -> bool {
                let ($($p,)*) = self;
                true $(&& $p.parse(cursor))*
            }

            #[allow(non_snake_case, unused_variables)]
            fn parse_first(&self, cursor: &mut C) -> bool {
                let ($($p,)*) = self;
                false $(|| $p.parse(cursor))*
            }
        }
    };
}

impl_parsers_for_tuple!();
impl_parsers_for_tuple!(P0);
impl_parsers_for_tuple!(P0, P1);
impl_parsers_for_tuple!(P0, P1, P2);
impl_parsers_for_tuple!(P0, P1, P2, P3);
impl_parsers_for_tuple!(P0, P1, P2, P3, P4);
impl_parsers_for_tuple!(P0, P1, P2, P3, P4, P5);
impl_parsers_for_tuple!(P0, P1, P2, P3, P4, P5, P6);
impl_parsers_for_tuple!(P0, P1, P2, P3, P4, P5, P6, P7);

impl<C: Cursor, P: Parse<C>> Parsers<C> for [P] {
    fn parse_each(&self, cursor: &mut C) -> bool {
        self.iter().all(|p| p.parse(cursor))
    }

    fn parse_first(&self, cursor: &mut C) -> bool {
        self.iter().any(|p| p.parse(cursor))
    }
}

impl<C: Cursor, P: Parse<C>, const N: usize> Parsers<C> for [P; N] {
    fn parse_each(&self, cursor: &mut C) -> bool {
        self[..].parse_each(cursor)
    }

    fn parse_first(&self, cursor: &mut C) -> bool {
        self[..].parse_first(cursor)
    }
}

impl<C: Cursor, P: Parse<C>> Parsers<C> for Vec<P> {
    fn parse_each(&self, cursor: &mut C) -> bool {
        self[..].parse_each(cursor)
    }

    fn parse_first(&self, cursor: &mut C) -> bool {
        self[..].parse_first(cursor)
    }
}

impl<C: Cursor, L: Parsers<C> + ?Sized> Parsers<C> for &L {
    fn parse_each(&self, cursor: &mut C) -> bool {
        (**self).parse_each(cursor)
    }

    fn parse_first(&self, cursor: &mut C) -> bool {
        (**self).parse_first(cursor)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sequence<L> {
    parsers: L,
}

impl<C: Cursor, L: Parsers<C>> Parse<C> for Sequence<L> {
    fn parse(&self, cursor: &mut C) -> bool {
        let start = cursor.snapshot();
        if self.parsers.parse_each(cursor) {
            true
        } else {
            cursor.restore(start);
            false
        }
    }
}

/// Matches every parser in `parsers` in order, or nothing at all.
///
/// ```
/// use pegmatch::{combinators::sequence, components::element, Cursor, Parse, TextCursor};
///
/// let mut cursor = TextCursor::new("te");
/// assert!(!sequence((element('t'), element('s'))).parse(&mut cursor));
/// assert_eq!(cursor.offset(), 0);
/// ```
pub const fn sequence<L>(parsers: L) -> Sequence<L> {
    Sequence { parsers }
}

#[derive(Debug, Clone, Copy)]
pub struct Choice<L> {
    parsers: L,
}

impl<C: Cursor, L: Parsers<C>> Parse<C> for Choice<L> {
    fn parse(&self, cursor: &mut C) -> bool {
        self.parsers.parse_first(cursor)
    }
}

/// Ordered choice: the first parser in `parsers` that matches wins.
pub const fn choice<L>(parsers: L) -> Choice<L> {
    Choice { parsers }
}
