use num_bigint::BigInt;

use super::common::{check_list, get_args};
use crate::{Error, Interpreter, Symbol, cons};

/// Evaluates the single operand of `expr` and checks that it is a list.
fn list_operand(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    let value = interp.evaluate(args.get(0)?)?;
    check_list(&value)?;
    Ok(value)
}

fn predicate(
    interp: &mut Interpreter,
    expr: &Symbol,
    test: impl Fn(&Symbol) -> bool,
) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    let value = interp.evaluate(args.get(0)?)?;
    Ok(Symbol::bool(test(&value)))
}

pub(crate) fn car(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    list_operand(interp, expr)?.car()
}

pub(crate) fn cdr(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    list_operand(interp, expr)?.cdr()
}

pub(crate) fn atomp(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    predicate(interp, expr, Symbol::is_atom)
}

pub(crate) fn listp(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    predicate(interp, expr, Symbol::is_list)
}

pub(crate) fn numberp(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    predicate(interp, expr, Symbol::is_number)
}

pub(crate) fn stringp(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    predicate(interp, expr, Symbol::is_string)
}

pub(crate) fn count(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let list = list_operand(interp, expr)?;
    Ok(Symbol::number(&BigInt::from(cons::length(&list))))
}

pub(crate) fn reverse(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let list = list_operand(interp, expr)?;
    Ok(cons::reverse(&list))
}

pub(crate) fn append(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let first = interp.evaluate(args.get(0)?)?;
    check_list(&first)?;
    let second = interp.evaluate(args.get(1)?)?;
    check_list(&second)?;
    Ok(cons::append(&first, &second))
}

/// `(push x list)`, also spelled `cons`.
pub(crate) fn push(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let item = interp.evaluate(args.get(0)?)?;
    let list = interp.evaluate(args.get(1)?)?;
    check_list(&list)?;
    Ok(Symbol::cons(item, list))
}

pub(crate) fn memberp(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let item = interp.evaluate(args.get(0)?)?;
    let list = interp.evaluate(args.get(1)?)?;
    check_list(&list)?;
    Ok(Symbol::bool(cons::member(&item, &list)))
}

/// `(list a b ...)`: the list of the operands' values.
pub(crate) fn list(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    expr.iter().skip(1).map(|item| interp.evaluate(item)).collect()
}

/// A list headed by a number or a string evaluates to the list of the values
/// of all its elements, the head included.
pub(crate) fn literal_list(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    expr.iter().map(|item| interp.evaluate(item)).collect()
}
