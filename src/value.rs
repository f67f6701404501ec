use std::{borrow::Cow, collections::HashMap, fmt, rc::Rc};

use num_bigint::BigInt;

use crate::{
    Error,
    cons::{self, Cons},
    token::{Token, TokenKind},
};

/// The universal value: every program and every piece of data is a `Symbol`.
///
/// An atom is a classified piece of text (a number, a string, an identifier,
/// a keyword, ...).  A pair holds two further symbols; lists are pairs chained
/// through their tails and terminated by [`NIL`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Atom {
        kind: TokenKind,
        text: Cow<'static, str>,
    },
    Pair(Rc<Cons>),
}

/// The empty list, and the false value.
pub const NIL: Symbol = Symbol::Atom {
    kind: TokenKind::Nil,
    text: Cow::Borrowed("NIL"),
};

/// The canonical true value.
pub const TRUE: Symbol = Symbol::Atom {
    kind: TokenKind::True,
    text: Cow::Borrowed("TRUE"),
};

impl Symbol {
    pub fn cons(car: Symbol, cdr: Symbol) -> Symbol {
        Symbol::Pair(cons::pair(car, cdr))
    }

    /// An atom of a keyword kind, spelled canonically.
    pub fn keyword(kind: TokenKind) -> Symbol {
        Symbol::Atom {
            kind,
            text: Cow::Borrowed(kind.canonical()),
        }
    }

    pub fn id(name: impl Into<String>) -> Symbol {
        Symbol::Atom {
            kind: TokenKind::Id,
            text: Cow::Owned(name.into()),
        }
    }

    pub fn string(text: impl Into<String>) -> Symbol {
        Symbol::Atom {
            kind: TokenKind::String,
            text: Cow::Owned(text.into()),
        }
    }

    pub fn number(value: &BigInt) -> Symbol {
        Symbol::Atom {
            kind: TokenKind::Number,
            text: Cow::Owned(value.to_string()),
        }
    }

    pub fn invalid(text: impl Into<String>) -> Symbol {
        Symbol::Atom {
            kind: TokenKind::Invalid,
            text: Cow::Owned(text.into()),
        }
    }

    pub fn bool(value: bool) -> Symbol {
        if value { TRUE } else { NIL }
    }

    /// The kind of an atom, `None` for pairs.
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Symbol::Atom { kind, .. } => Some(*kind),
            Symbol::Pair(_) => None,
        }
    }

    /// The text of an atom, `None` for pairs.
    pub fn text(&self) -> Option<&str> {
        match self {
            Symbol::Atom { text, .. } => Some(text),
            Symbol::Pair(_) => None,
        }
    }

    fn is_kind(&self, expected: TokenKind) -> bool {
        self.kind() == Some(expected)
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Symbol::Atom { .. })
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Symbol::Pair(_))
    }

    pub fn is_nil(&self) -> bool {
        self.is_kind(TokenKind::Nil)
    }

    /// NIL counts as a list as well as an atom.
    pub fn is_list(&self) -> bool {
        self.is_nil() || self.is_pair()
    }

    pub fn is_id(&self) -> bool {
        self.is_kind(TokenKind::Id)
    }

    pub fn is_string(&self) -> bool {
        self.is_kind(TokenKind::String)
    }

    pub fn is_number(&self) -> bool {
        self.is_kind(TokenKind::Number)
    }

    pub fn is_list_of_ids(&self) -> bool {
        self.is_list() && self.iter().all(Symbol::is_id)
    }

    /// Head of a pair.  NIL is its own head.
    pub fn car(&self) -> Result<Symbol, Error> {
        match self {
            Symbol::Pair(cons) => Ok(cons.car.clone()),
            nil if nil.is_nil() => Ok(NIL),
            other => Err(Error::evaluation_failure(format!("{} is not a list", other))),
        }
    }

    /// Tail of a pair.  NIL is its own tail.
    pub fn cdr(&self) -> Result<Symbol, Error> {
        match self {
            Symbol::Pair(cons) => Ok(cons.cdr.clone()),
            nil if nil.is_nil() => Ok(NIL),
            other => Err(Error::evaluation_failure(format!("{} is not a list", other))),
        }
    }

    /// Borrowing version of [`car`](Self::car) for pairs.
    pub(crate) fn head(&self) -> Option<&Symbol> {
        match self {
            Symbol::Pair(cons) => Some(&cons.car),
            Symbol::Atom { .. } => None,
        }
    }

    /// If this is a `(QUOTE x)` form, returns `x`.
    pub fn quoted(&self) -> Option<&Symbol> {
        let Symbol::Pair(cons) = self else {
            return None;
        };
        if !cons.car.is_kind(TokenKind::Quote) {
            return None;
        }
        cons.cdr.head()
    }

    pub fn iter(&self) -> cons::Iter<'_> {
        cons::Iter::new(self)
    }

    /// Rewrites every identifier atom that has an entry in `bindings`, all the
    /// way down the tree.  Everything else, NIL included, is kept as is.
    pub fn substitute(&self, bindings: &HashMap<String, Symbol>) -> Symbol {
        match self {
            Symbol::Atom {
                kind: TokenKind::Id,
                text,
            } => match bindings.get(text.as_ref()) {
                Some(replacement) => {
                    log::debug!("substitute {} -> {}", text, replacement);
                    replacement.clone()
                }
                None => self.clone(),
            },
            Symbol::Atom { .. } => self.clone(),
            Symbol::Pair(cons) => {
                Symbol::cons(cons.car.substitute(bindings), cons.cdr.substitute(bindings))
            }
        }
    }
}

impl From<Token> for Symbol {
    fn from(token: Token) -> Self {
        match token.kind {
            TokenKind::Nil => NIL,
            TokenKind::True => TRUE,
            TokenKind::End => Symbol::keyword(TokenKind::End),
            kind => Symbol::Atom {
                kind,
                text: Cow::Owned(token.text),
            },
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Atom { text, .. } => f.write_str(text),
            Symbol::Pair(cons) => {
                write!(f, "({}", cons.car)?;
                let mut rest = &cons.cdr;
                loop {
                    match rest {
                        Symbol::Pair(next) => {
                            match next.car.quoted() {
                                Some(inner) => write!(f, "'{}", inner)?,
                                None => write!(f, " {}", next.car)?,
                            }
                            rest = &next.cdr;
                        }
                        nil if nil.is_nil() => break,
                        other => {
                            write!(f, " . {}", other)?;
                            break;
                        }
                    }
                }
                f.write_str(")")
            }
        }
    }
}
