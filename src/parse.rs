use crate::{Cursor, Position};
use std::rc::Rc;

pub use pegmatch_derive::Parse;

/// A pattern that can be matched against a [`Cursor`].
///
/// `parse` returns `true` and leaves the cursor past the matched input on success.
/// On failure it returns `false` and leaves the cursor exactly where it was when
/// `parse` was called. Combinators rely on every parser upholding that contract.
pub trait Parse<C> {
    fn parse(&self, cursor: &mut C) -> bool;
}

impl<C: Cursor, P: Parse<C> + ?Sized> Parse<C> for &P {
    fn parse(&self, cursor: &mut C) -> bool {
        (**self).parse(cursor)
    }
}

impl<C: Cursor, P: Parse<C> + ?Sized> Parse<C> for Box<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        (**self).parse(cursor)
    }
}

impl<C: Cursor, P: Parse<C> + ?Sized> Parse<C> for Rc<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        (**self).parse(cursor)
    }
}

/// Parser backed by a closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

impl<C: Cursor, F: Fn(&mut C) -> bool> Parse<C> for FromFn<F> {
    fn parse(&self, cursor: &mut C) -> bool {
        (self.0)(cursor)
    }
}

/// Turns a closure into a parser.
///
/// The closure must follow the same contract as [`Parse::parse`]: when it returns
/// `false` the cursor must be back where it started.
pub fn from_fn<C: Cursor, F: Fn(&mut C) -> bool>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// Error of [`match_complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseError {
    #[error("input does not match at offset {position}")]
    NoMatch { position: Position },

    #[error("unexpected trailing input at offset {position}")]
    TrailingInput { position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            Self::NoMatch { position } | Self::TrailingInput { position } => *position,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Matches `parser` against the rest of the input and requires it to consume everything.
///
/// Returns the end position on success. If the parser matched but input remains,
/// the cursor is left after the match.
pub fn match_complete<C, P>(parser: &P, cursor: &mut C) -> ParseResult<Position>
where
    C: Cursor,
    P: Parse<C> + ?Sized,
{
    let start = Position::new(cursor.offset());
    if !parser.parse(cursor) {
        return Err(ParseError::NoMatch { position: start });
    }
    let end = Position::new(cursor.offset());
    if !cursor.is_eos() {
        return Err(ParseError::TrailingInput { position: end });
    }
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{element, literal};
    use crate::TextCursor;

    #[test]
    fn closures_become_parsers() {
        let ab = from_fn(|cursor: &mut TextCursor| {
            let start = cursor.snapshot();
            if cursor.read() == Some('a') && cursor.read() == Some('b') {
                true
            } else {
                cursor.restore(start);
                false
            }
        });

        let mut cursor = TextCursor::new("abc");
        assert!(ab.parse(&mut cursor));
        assert_eq!(cursor.remaining_text(), "c");
        assert!(!ab.parse(&mut cursor));
        assert_eq!(cursor.remaining_text(), "c");
    }

    #[test]
    fn pointers_and_trait_objects_are_parsers() {
        let boxed: Box<dyn Parse<TextCursor>> = Box::new(element('x'));
        let shared: Rc<dyn Parse<TextCursor>> = Rc::new(literal("yz"));

        let mut cursor = TextCursor::new("xyz");
        assert!((&boxed).parse(&mut cursor));
        assert!(shared.parse(&mut cursor));
        assert!(cursor.is_eos());
    }

    #[test]
    fn match_complete_reports_outcome() {
        let parser = literal("ab");

        let mut cursor = TextCursor::new("ab");
        assert_eq!(match_complete(&parser, &mut cursor), Ok(Position::new(2)));

        let mut cursor = TextCursor::new("abc");
        let error = match_complete(&parser, &mut cursor).unwrap_err();
        assert_eq!(error, ParseError::TrailingInput { position: Position::new(2) });
        assert_eq!(error.to_string(), "unexpected trailing input at offset 2");
        assert_eq!(cursor.remaining_text(), "c");

        let mut cursor = TextCursor::new("xb");
        let error = match_complete(&parser, &mut cursor).unwrap_err();
        assert_eq!(error.position(), Position::new(0));
        assert!(matches!(error, ParseError::NoMatch { .. }));
    }
}
