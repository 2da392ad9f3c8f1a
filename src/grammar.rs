//! Named rules for self-referential and mutually recursive grammars.
//!
//! Parser values are built bottom-up, so a rule cannot contain itself directly.
//! A [`Grammar`] hands out [`RuleRef`]s by name before the rules are defined and
//! resolves them when they are invoked.
//!
//! ```
//! use pegmatch::{
//!     combinators::{choice, sequence},
//!     components::{element, eos},
//!     Grammar, Parse, TextCursor,
//! };
//!
//! let grammar = Grammar::new();
//! let ts = grammar.rule("ts");
//! grammar.define("ts", choice((sequence((element('t'), ts.clone())), eos()))).unwrap();
//!
//! assert!(ts.parse(&mut TextCursor::new("tttt")));
//! assert!(!ts.parse(&mut TextCursor::new("ttte")));
//! ```
use crate::{Cursor, Parse};
use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule `{name}` is already defined")]
    Redefined { name: String },

    #[error("rule `{name}` is referenced but never defined")]
    Undefined { name: String },
}

struct RuleSlot<'g, C> {
    name: String,
    body: Option<Rc<dyn Parse<C> + 'g>>,
}

struct RuleTable<'g, C> {
    ids: RefCell<HashMap<String, usize>>,
    slots: RefCell<Vec<RuleSlot<'g, C>>>,
}

impl<'g, C> RuleTable<'g, C> {
    fn id(&self, name: &str) -> usize {
        if let Some(&id) = self.ids.borrow().get(name) {
            return id;
        }
        let mut slots = self.slots.borrow_mut();
        let id = slots.len();
        slots.push(RuleSlot {
            name: name.to_owned(),
            body: None,
        });
        self.ids.borrow_mut().insert(name.to_owned(), id);
        id
    }

    fn name(&self, id: usize) -> String {
        self.slots.borrow()[id].name.clone()
    }

    fn body(&self, id: usize) -> Option<Rc<dyn Parse<C> + 'g>> {
        self.slots.borrow()[id].body.clone()
    }
}

/// A table of named rules.
///
/// The grammar owns the rule bodies. [`RuleRef`]s only hold weak references to the
/// table, so rules that refer to themselves do not keep it alive.
pub struct Grammar<'g, C> {
    rules: Rc<RuleTable<'g, C>>,
}

impl<'g, C: Cursor> Grammar<'g, C> {
    pub fn new() -> Self {
        Self {
            rules: Rc::new(RuleTable {
                ids: RefCell::default(),
                slots: RefCell::default(),
            }),
        }
    }

    /// Returns a handle to the rule `name`, declaring it if needed.
    pub fn rule(&self, name: &str) -> RuleRef<'g, C> {
        RuleRef {
            rules: Rc::downgrade(&self.rules),
            id: self.rules.id(name),
        }
    }

    /// Returns a handle to the rule `name` if it has been declared or defined.
    pub fn get(&self, name: &str) -> Option<RuleRef<'g, C>> {
        let id = *self.rules.ids.borrow().get(name)?;
        Some(RuleRef {
            rules: Rc::downgrade(&self.rules),
            id,
        })
    }

    /// Sets the body of the rule `name`.
    pub fn define<P>(&self, name: &str, parser: P) -> Result<RuleRef<'g, C>, GrammarError>
    where
        P: Parse<C> + 'g,
    {
        let rule = self.rule(name);
        let mut slots = self.rules.slots.borrow_mut();
        let slot = &mut slots[rule.id];
        if slot.body.is_some() {
            return Err(GrammarError::Redefined {
                name: name.to_owned(),
            });
        }
        slot.body = Some(Rc::new(parser));
        Ok(rule)
    }

    /// Checks that every declared rule has a body.
    pub fn validate(&self) -> Result<(), GrammarError> {
        match self.rules.slots.borrow().iter().find(|s| s.body.is_none()) {
            Some(slot) => Err(GrammarError::Undefined {
                name: slot.name.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Cursor> Default for Grammar<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for Grammar<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.rules.slots.borrow();
        f.debug_map()
            .entries(slots.iter().map(|s| (&s.name, s.body.is_some())))
            .finish()
    }
}

/// Handle to a rule of a [`Grammar`].
///
/// Invoking a rule that has no body yet, or whose grammar has been dropped, fails to
/// match.
pub struct RuleRef<'g, C> {
    rules: Weak<RuleTable<'g, C>>,
    id: usize,
}

impl<'g, C> RuleRef<'g, C> {
    pub fn name(&self) -> Option<String> {
        self.rules.upgrade().map(|rules| rules.name(self.id))
    }
}

impl<C> Clone for RuleRef<'_, C> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            id: self.id,
        }
    }
}

impl<C> std::fmt::Debug for RuleRef<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

impl<C: Cursor> Parse<C> for RuleRef<'_, C> {
    fn parse(&self, cursor: &mut C) -> bool {
        let Some(rules) = self.rules.upgrade() else {
            log::error!("rule #{} invoked after its grammar was dropped", self.id);
            return false;
        };
        let Some(body) = rules.body(self.id) else {
            log::error!("rule `{}` invoked before being defined", rules.name(self.id));
            return false;
        };
        body.parse(cursor)
    }
}

/// A single self-referential rule. See [`recursive`].
pub struct Recursive<'g, C> {
    _grammar: Grammar<'g, C>,
    rule: RuleRef<'g, C>,
}

impl<C: Cursor> Parse<C> for Recursive<'_, C> {
    fn parse(&self, cursor: &mut C) -> bool {
        self.rule.parse(cursor)
    }
}

impl<C> std::fmt::Debug for Recursive<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Recursive").field(&self.rule).finish()
    }
}

/// Builds a parser that can refer to itself through the handle passed to `build`.
pub fn recursive<'g, C, P, F>(build: F) -> Recursive<'g, C>
where
    C: Cursor,
    P: Parse<C> + 'g,
    F: FnOnce(RuleRef<'g, C>) -> P,
{
    let grammar = Grammar::new();
    let rule = grammar.rule("recursive");
    let body = build(rule.clone());
    grammar.rules.slots.borrow_mut()[rule.id].body = Some(Rc::new(body));
    Recursive {
        _grammar: grammar,
        rule,
    }
}
