use num_bigint::BigInt;

use crate::{Error, Symbol, token::TokenKind};

/// Long-form help for an operator, where one has been written.
pub(crate) fn help(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Append => Some(concat!(
            "(APPEND <list1> <list2>) merges the lists <list1> and <list2> into a single ",
            "list: (APPEND '(a b c) '(c d e)) results in the list (a b c c d e). ",
            "Unquoted arguments are evaluated first. So (APPEND (a b c) '(c d e)) calls a ",
            "function named \"a\" with the arguments b and c before doing the APPEND.",
        )),
        TokenKind::And => Some(concat!(
            "(AND <arg1> <arg2> ...) returns NIL at the first argument that evaluates to ",
            "NIL, from left to right.  (and nil (a b c d)) is NIL even if there is no ",
            "function named \"a\", because the second argument is never evaluated. (AND) ",
            "is TRUE. Unquoted arguments are evaluated first.",
        )),
        _ => None,
    }
}

/// The raw operands of a call, as fetched by [`get_args`].
pub(crate) struct Args {
    op: Symbol,
    items: Vec<Symbol>,
}

impl Args {
    /// The `index`th operand, counting from zero.
    pub(crate) fn get(&self, index: usize) -> Result<&Symbol, Error> {
        self.items.get(index).ok_or_else(|| {
            Error::evaluation_failure(format!("{}: missing argument {}", self.op, index + 1))
        })
    }
}

/// Strips the operator off `expr` and returns its operands.
///
/// A count other than `arity` is only reported for operators that have a
/// [`help`] entry.  Everywhere else the caller gets what is there; surplus
/// operands are never read and a missing one fails in [`Args::get`].
pub(crate) fn get_args(expr: &Symbol, arity: usize) -> Result<Args, Error> {
    let op = expr.car()?;
    let items: Vec<Symbol> = expr.cdr()?.iter().cloned().collect();
    if items.len() != arity {
        if op.kind().and_then(help).is_some() {
            return Err(Error::evaluation_failure(format!(
                "There is no help about {} at this moment",
                op
            )));
        }
        log::debug!("{} expects {} arguments, got {}", op, arity, items.len());
    }
    Ok(Args { op, items })
}

pub(crate) fn check_list(value: &Symbol) -> Result<(), Error> {
    if value.is_list() {
        Ok(())
    } else {
        Err(Error::evaluation_failure(format!("{} is not a list", value)))
    }
}

pub(crate) fn check_id(value: &Symbol) -> Result<(), Error> {
    if value.is_id() {
        Ok(())
    } else {
        Err(Error::evaluation_failure(format!(
            "{} is not a valid identifier",
            value
        )))
    }
}

/// Reads the integer in an atom's text.  `expr` names the failing call.
pub(crate) fn to_integer(value: &Symbol, expr: &Symbol) -> Result<BigInt, Error> {
    value
        .text()
        .and_then(|text| text.parse::<BigInt>().ok())
        .ok_or_else(|| Error::evaluation_failure(format!("Invalid expression {}", expr)))
}
