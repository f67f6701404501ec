use std::cmp::Ordering;

use super::common::{get_args, to_integer};
use crate::{Error, Interpreter, Symbol, token::TokenKind};

/// Shared body of `< > <= >=`.  Both operands must be numbers, or both
/// strings; `oper` decides the outcome from their ordering.
pub(crate) fn compare(
    interp: &mut Interpreter,
    expr: &Symbol,
    oper: impl Fn(Ordering) -> bool,
) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let first = interp.evaluate(args.get(0)?)?;
    let second = interp.evaluate(args.get(1)?)?;

    let ordering = match (first.kind(), second.kind()) {
        (Some(TokenKind::Number), Some(TokenKind::Number)) => {
            to_integer(&first, expr)?.cmp(&to_integer(&second, expr)?)
        }
        (Some(TokenKind::String), Some(TokenKind::String)) => first.text().cmp(&second.text()),
        _ => {
            return Err(Error::evaluation_failure(
                "Comparators expect two numbers or two strings as arguments",
            ));
        }
    };
    Ok(Symbol::bool(oper(ordering)))
}

/// Structural equality over any two values.
pub(crate) fn equal(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let first = interp.evaluate(args.get(0)?)?;
    let second = interp.evaluate(args.get(1)?)?;
    Ok(Symbol::bool(first == second))
}
