use std::rc::Rc;

use crate::{Symbol, value::NIL};

/// A pair of values.  Lists are chains of these, terminated by NIL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cons {
    pub(crate) car: Symbol,
    pub(crate) cdr: Symbol,
}

impl Cons {
    pub fn new(car: Symbol, cdr: Symbol) -> Self {
        Cons { car, cdr }
    }

    pub fn car(&self) -> &Symbol {
        &self.car
    }

    pub fn cdr(&self) -> &Symbol {
        &self.cdr
    }
}

// Unlinks the tail one cell at a time, so a long list does not drop
// recursively.  Stops at the first cell that is still shared.
impl Drop for Cons {
    fn drop(&mut self) {
        let mut next = std::mem::replace(&mut self.cdr, NIL);
        while let Symbol::Pair(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut cons) => next = std::mem::replace(&mut cons.cdr, NIL),
                Err(_) => break,
            }
        }
    }
}

/// Iterates over the elements of a list.  Stops at the first tail that is not
/// a pair, so atoms and NIL both produce an empty iteration.
pub struct Iter<'a> {
    next: &'a Symbol,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(list: &'a Symbol) -> Self {
        Iter { next: list }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next {
            Symbol::Pair(cons) => {
                self.next = &cons.cdr;
                Some(&cons.car)
            }
            Symbol::Atom { .. } => None,
        }
    }
}

impl FromIterator<Symbol> for Symbol {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let items: Vec<Symbol> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(NIL, |tail, item| Symbol::cons(item, tail))
    }
}

/// Number of elements in `list`.
pub fn length(list: &Symbol) -> usize {
    list.iter().count()
}

/// A new list with the elements of `list` in reverse order.
pub fn reverse(list: &Symbol) -> Symbol {
    list.iter()
        .fold(NIL, |reversed, item| Symbol::cons(item.clone(), reversed))
}

/// A new list with the elements of `left` followed by `right`.  `right` is
/// shared, not copied.
pub fn append(left: &Symbol, right: &Symbol) -> Symbol {
    reverse(left)
        .iter()
        .fold(right.clone(), |tail, item| Symbol::cons(item.clone(), tail))
}

/// Whether `item` is structurally equal to an element of `list`.
pub fn member(item: &Symbol, list: &Symbol) -> bool {
    list.iter().any(|element| element == item)
}

pub(crate) fn pair(car: Symbol, cdr: Symbol) -> Rc<Cons> {
    Rc::new(Cons::new(car, cdr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;

    fn id(name: &str) -> Symbol {
        Symbol::id(name)
    }

    #[test]
    fn test_append_preserves_order() {
        let left = list!(id("a"), id("b"));
        let right = list!(id("c"));
        let joined = append(&left, &right);
        assert_eq!(joined, list!(id("a"), id("b"), id("c")));
        assert_eq!(length(&joined), length(&left) + length(&right));
        assert_eq!(append(&NIL, &right), right);
        assert_eq!(append(&left, &NIL), left);
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let items = list!(id("x"), list!(id("y"), id("z")), Symbol::string("s"));
        assert_eq!(reverse(&reverse(&items)), items);
        assert_eq!(reverse(&NIL), NIL);
    }

    #[test]
    fn test_member() {
        let items = list!(id("x"), list!(id("y")));
        assert!(member(&list!(id("y")), &items));
        assert!(!member(&id("y"), &items));
        assert!(!member(&id("x"), &NIL));
    }

    #[test]
    fn test_drop_long_list() {
        let long: Symbol = (0..200_000).map(|_| NIL).collect();
        assert_eq!(length(&long), 200_000);
        drop(long);

        let shared: Symbol = (0..200_000).map(|_| id("x")).collect();
        let tail = shared.cdr().unwrap();
        drop(shared);
        assert_eq!(length(&tail), 199_999);
    }
}
