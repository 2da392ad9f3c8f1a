//! Instrumentation wrappers that observe parsers without changing their results.
use crate::{Cursor, Parse, Position};
use std::{borrow::Cow, cell::Cell, rc::Rc};

/// See [`label`].
#[derive(Debug, Clone)]
pub struct Label<P> {
    name: Cow<'static, str>,
    parser: P,
}

impl<P> Label<P> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<C: Cursor, P: Parse<C>> Parse<C> for Label<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        let start = cursor.offset();
        log::trace!("enter {} at {}", self.name, start);
        let matched = self.parser.parse(cursor);
        if matched {
            log::trace!("match {} at {}..{}", self.name, start, cursor.offset());
        } else {
            log::trace!("fail {} at {}", self.name, start);
        }
        matched
    }
}

/// Names `parser` in trace-level log records emitted on every attempt.
pub fn label<P>(name: impl Into<Cow<'static, str>>, parser: P) -> Label<P> {
    Label {
        name: name.into(),
        parser,
    }
}

/// Shared record of the furthest offset at which a watched parser failed.
///
/// Clones share the same record.
#[derive(Debug, Default, Clone)]
pub struct Furthest(Rc<Cell<Option<usize>>>);

impl Furthest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Option<Position> {
        self.0.get().map(Position::new)
    }

    pub fn record(&self, offset: usize) {
        if self.0.get().map_or(true, |furthest| furthest < offset) {
            self.0.set(Some(offset));
        }
    }

    pub fn reset(&self) {
        self.0.set(None);
    }
}

/// See [`record_failures`].
#[derive(Debug, Clone)]
pub struct RecordFailures<P> {
    parser: P,
    furthest: Furthest,
}

impl<C: Cursor, P: Parse<C>> Parse<C> for RecordFailures<P> {
    fn parse(&self, cursor: &mut C) -> bool {
        let matched = self.parser.parse(cursor);
        if !matched {
            self.furthest.record(cursor.offset());
        }
        matched
    }
}

/// Records in `furthest` the offset of every failure of `parser`.
///
/// A failing parser does not move the cursor, so the recorded offset is where the
/// attempt started. Wrapping the leaves of a grammar therefore tracks how far the
/// input was understood.
pub fn record_failures<P>(parser: P, furthest: &Furthest) -> RecordFailures<P> {
    RecordFailures {
        parser,
        furthest: furthest.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{choice, repeat0, sequence};
    use crate::components::{element, literal};
    use crate::TextCursor;

    #[test]
    fn label_keeps_result() {
        let keyword = label("keyword", literal("let"));
        assert_eq!(keyword.name(), "keyword");

        let mut cursor = TextCursor::new("let");
        assert!(keyword.parse(&mut cursor));
        assert!(cursor.is_eos());
        assert!(!keyword.parse(&mut cursor));

        let owned = label(format!("rule{}", 1), element('x'));
        assert_eq!(owned.name(), "rule1");
    }

    #[test]
    fn furthest_failure_is_tracked() {
        let furthest = Furthest::new();
        let a = record_failures(element('a'), &furthest);
        let b = record_failures(element('b'), &furthest);
        let parser = choice((sequence((repeat0(&a), &b)), &b));

        let mut cursor = TextCursor::new("aaac");
        assert!(!parser.parse(&mut cursor));
        assert_eq!(cursor.offset(), 0);
        assert_eq!(furthest.position(), Some(Position::new(3)));

        furthest.reset();
        assert_eq!(furthest.position(), None);
        furthest.record(2);
        furthest.record(1);
        assert_eq!(furthest.position(), Some(Position::new(2)));
    }
}
