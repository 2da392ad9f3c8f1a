//! Primitive matchers that operate directly on a [`Cursor`].
//!
//! Each of them checks its condition first and only advances on success, so a failing
//! matcher never moves the cursor.
use crate::{Cursor, Parse};

/// Collection of elements used as a literal or a membership set.
pub trait Elements<E> {
    type Iter<'a>: Iterator<Item = E>
    where
        Self: 'a;

    fn elements(&self) -> Self::Iter<'_>;
}

impl Elements<char> for str {
    type Iter<'a> = std::str::Chars<'a>;

    fn elements(&self) -> Self::Iter<'_> {
        self.chars()
    }
}

impl Elements<char> for String {
    type Iter<'a> = std::str::Chars<'a>;

    fn elements(&self) -> Self::Iter<'_> {
        self.chars()
    }
}

impl<T: Copy> Elements<T> for [T] {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, T>> where T: 'a;

    fn elements(&self) -> Self::Iter<'_> {
        self.iter().copied()
    }
}

impl<T: Copy, const N: usize> Elements<T> for [T; N] {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, T>> where T: 'a;

    fn elements(&self) -> Self::Iter<'_> {
        self.iter().copied()
    }
}

impl<T: Copy> Elements<T> for Vec<T> {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, T>> where T: 'a;

    fn elements(&self) -> Self::Iter<'_> {
        self.iter().copied()
    }
}

impl<E, T: Elements<E> + ?Sized> Elements<E> for &T {
    type Iter<'a> = T::Iter<'a> where Self: 'a;

    fn elements(&self) -> Self::Iter<'_> {
        (**self).elements()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AnyElement;

impl<C: Cursor> Parse<C> for AnyElement {
    fn parse(&self, cursor: &mut C) -> bool {
        if cursor.is_eos() {
            false
        } else {
            cursor.advance();
            true
        }
    }
}

/// Matches any single element.
pub const fn any() -> AnyElement {
    AnyElement
}

#[derive(Debug, Clone, Copy)]
pub struct Element<T> {
    expected: T,
}

impl<C, T> Parse<C> for Element<T>
where
    C: Cursor<Element = T>,
    T: Copy + PartialEq,
{
    fn parse(&self, cursor: &mut C) -> bool {
        if cursor.peek() == Some(self.expected) {
            cursor.advance();
            true
        } else {
            false
        }
    }
}

/// Matches one element equal to `expected`.
pub const fn element<T>(expected: T) -> Element<T> {
    Element { expected }
}

#[derive(Debug, Clone, Copy)]
pub struct Literal<L> {
    literal: L,
}

impl<C, L> Parse<C> for Literal<L>
where
    C: Cursor,
    C::Element: PartialEq,
    L: Elements<C::Element>,
{
    fn parse(&self, cursor: &mut C) -> bool {
        let start = cursor.snapshot();
        for expected in self.literal.elements() {
            if cursor.peek() != Some(expected) {
                cursor.restore(start);
                return false;
            }
            cursor.advance();
        }
        true
    }
}

/// Matches the elements of `literal` in order.
///
/// ```
/// use pegmatch::{components::literal, Parse, TextCursor};
///
/// let mut cursor = TextCursor::new("abcd");
/// assert!(literal("ab").parse(&mut cursor));
/// assert!(!literal("ab").parse(&mut cursor));
/// assert_eq!(cursor.remaining_text(), "cd");
/// ```
pub const fn literal<L>(literal: L) -> Literal<L> {
    Literal { literal }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Eos;

impl<C: Cursor> Parse<C> for Eos {
    fn parse(&self, cursor: &mut C) -> bool {
        cursor.is_eos()
    }
}

/// Matches the end of input without consuming anything.
pub const fn eos() -> Eos {
    Eos
}

#[derive(Debug, Clone, Copy)]
pub struct InRange<T> {
    lo: T,
    hi: T,
}

impl<C, T> Parse<C> for InRange<T>
where
    C: Cursor<Element = T>,
    T: Copy + PartialOrd,
{
    fn parse(&self, cursor: &mut C) -> bool {
        match cursor.peek() {
            Some(e) if self.lo <= e && e <= self.hi => {
                cursor.advance();
                true
            }
            _ => false,
        }
    }
}

/// Matches one element within `lo..=hi`.
pub const fn range<T>(lo: T, hi: T) -> InRange<T> {
    InRange { lo, hi }
}

#[derive(Debug, Clone, Copy)]
pub struct OneOf<S> {
    members: S,
}

impl<C, S> Parse<C> for OneOf<S>
where
    C: Cursor,
    C::Element: PartialEq,
    S: Elements<C::Element>,
{
    fn parse(&self, cursor: &mut C) -> bool {
        match cursor.peek() {
            Some(e) if self.members.elements().any(|m| m == e) => {
                cursor.advance();
                true
            }
            _ => false,
        }
    }
}

/// Matches one element equal to any of `members`.
pub const fn one_of<S>(members: S) -> OneOf<S> {
    OneOf { members }
}

#[derive(Clone, Copy)]
pub struct Satisfy<F> {
    predicate: F,
}

impl<F> std::fmt::Debug for Satisfy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Satisfy").finish_non_exhaustive()
    }
}

impl<C, F> Parse<C> for Satisfy<F>
where
    C: Cursor,
    F: Fn(C::Element) -> bool,
{
    fn parse(&self, cursor: &mut C) -> bool {
        match cursor.peek() {
            Some(e) if (self.predicate)(e) => {
                cursor.advance();
                true
            }
            _ => false,
        }
    }
}

/// Matches one element for which `predicate` holds.
pub const fn satisfy<F>(predicate: F) -> Satisfy<F> {
    Satisfy { predicate }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Empty;

impl<C: Cursor> Parse<C> for Empty {
    fn parse(&self, _cursor: &mut C) -> bool {
        true
    }
}

/// Always matches, consuming nothing.
pub const fn empty() -> Empty {
    Empty
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Whitespace;

impl<C: Cursor<Element = char>> Parse<C> for Whitespace {
    fn parse(&self, cursor: &mut C) -> bool {
        if cursor.peek().map_or(false, |c| c.is_ascii_whitespace()) {
            cursor.advance();
            true
        } else {
            false
        }
    }
}

/// Matches one ASCII whitespace character.
pub const fn whitespace() -> Whitespace {
    Whitespace
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Digit<const RADIX: u32 = 10>;

impl<const RADIX: u32> Digit<RADIX> {
    pub const fn new() -> Self {
        Self
    }
}

impl<C: Cursor<Element = char>, const RADIX: u32> Parse<C> for Digit<RADIX> {
    fn parse(&self, cursor: &mut C) -> bool {
        // `char::is_digit` panics outside 2..=36.
        if (2..=36).contains(&RADIX) && cursor.peek().map_or(false, |c| c.is_digit(RADIX)) {
            cursor.advance();
            true
        } else {
            false
        }
    }
}

/// Matches one decimal digit.
pub const fn digit() -> Digit {
    Digit
}
