//! PEG matchers and combinators over a single backtracking cursor.
//!
//! A parser is any value implementing [`Parse`]: given a mutable [`Cursor`] it returns
//! whether the pattern matched. On success the cursor has moved past the match; on
//! failure it is exactly where it was. Every combinator in this crate preserves that
//! contract, so sequences, ordered choices, repetitions and lookaheads nest freely.
//!
//! ```
//! use pegmatch::{
//!     combinators::{choice, repeat1, sequence, test_not},
//!     components::{any, element, range},
//!     Cursor, Parse, TextCursor,
//! };
//!
//! // identifier := [a-z] ([a-z] / [0-9])* !'('
//! let identifier = sequence((
//!     range('a', 'z'),
//!     repeat1(choice((range('a', 'z'), range('0', '9')))),
//!     test_not(element('(')),
//! ));
//!
//! let mut cursor = TextCursor::new("x86 = 1");
//! assert!(identifier.parse(&mut cursor));
//! assert_eq!(cursor.remaining_text(), " = 1");
//!
//! let mut cursor = TextCursor::new("f1(x)");
//! assert!(!identifier.parse(&mut cursor));
//! assert_eq!(cursor.offset(), 0);
//! assert!(any().parse(&mut cursor));
//! ```
extern crate self as pegmatch;

pub mod combinators;
pub mod components;
mod cursor;
pub mod grammar;
mod parse;
mod position;
pub mod trace;

pub use cursor::{Cursor, IterCursor, IterSnapshot, SliceCursor, TextCursor};
pub use grammar::{recursive, Grammar, GrammarError, Recursive, RuleRef};
pub use parse::{from_fn, match_complete, FromFn, Parse, ParseError, ParseResult};
pub use position::Position;
