use super::common::{check_list, get_args};
use crate::{Error, Interpreter, NIL, Symbol, cons, list};

/// Evaluates every expression in `body` and returns the last value.
fn run_body(interp: &mut Interpreter, body: &Symbol, last: Symbol) -> Result<Symbol, Error> {
    let mut value = last;
    for expr in body.iter() {
        value = interp.evaluate(expr)?;
    }
    Ok(value)
}

/// `(while condition (body ...))`
pub(crate) fn while_(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let condition = args.get(0)?;
    let body = args.get(1)?;
    check_list(body)?;
    let mut value = NIL;
    while !interp.evaluate(condition)?.is_nil() {
        value = run_body(interp, body, value)?;
    }
    Ok(value)
}

/// `(do (body ...) condition)`: like `while`, but tests after each pass.
pub(crate) fn do_(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let body = args.get(0)?;
    check_list(body)?;
    let condition = args.get(1)?;
    let mut value = NIL;
    loop {
        value = run_body(interp, body, value)?;
        if interp.evaluate(condition)?.is_nil() {
            return Ok(value);
        }
    }
}

/// `(for (setup condition update) (body ...))`
pub(crate) fn for_(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let header = args.get(0)?;
    let parts: Vec<&Symbol> = header.iter().collect();
    let [setup, condition, update] = parts[..] else {
        return Err(Error::evaluation_failure(
            "for expects a list of three elements as its first argument",
        ));
    };
    let body = args.get(1)?;
    check_list(body)?;

    interp.evaluate(setup)?;
    let mut value = NIL;
    while !interp.evaluate(condition)?.is_nil() {
        value = run_body(interp, body, value)?;
        interp.evaluate(update)?;
    }
    Ok(value)
}

/// `(for-list list op)`: the list of `(op element)` for every element, in
/// order.
pub(crate) fn for_list(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let items = interp.evaluate(args.get(0)?)?;
    check_list(&items)?;
    let op = args.get(1)?;
    let mut results = NIL;
    for item in items.iter() {
        let value = interp.evaluate(&list!(op.clone(), item.clone()))?;
        results = Symbol::cons(value, results);
    }
    Ok(cons::reverse(&results))
}

pub(crate) fn block(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let body = expr.cdr()?;
    run_body(interp, &body, NIL)
}
