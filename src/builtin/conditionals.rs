use super::common::{check_list, get_args};
use crate::{Error, Interpreter, NIL, Symbol, TRUE};

pub(crate) fn if_(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 3)?;
    if interp.evaluate(args.get(0)?)?.is_nil() {
        interp.evaluate(args.get(2)?)
    } else {
        interp.evaluate(args.get(1)?)
    }
}

/// `(cond ((test result) ...))`: evaluates the result of the first case whose
/// test is not NIL.
pub(crate) fn cond(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    let cases = args.get(0)?;
    check_list(cases)?;
    for case in cases.iter() {
        check_list(case)?;
        let parts: Vec<&Symbol> = case.iter().collect();
        let [test, result] = parts[..] else {
            return Err(Error::evaluation_failure(format!(
                "Bad case in conditional: {}",
                case
            )));
        };
        if !interp.evaluate(test)?.is_nil() {
            return interp.evaluate(result);
        }
    }
    Ok(NIL)
}

/// Evaluates operands left to right and stops at the first NIL, which is
/// returned.
pub(crate) fn and(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    for operand in expr.iter().skip(1) {
        let value = interp.evaluate(operand)?;
        if value.is_nil() {
            return Ok(value);
        }
    }
    Ok(TRUE)
}

pub(crate) fn or(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    for operand in expr.iter().skip(1) {
        if !interp.evaluate(operand)?.is_nil() {
            return Ok(TRUE);
        }
    }
    Ok(NIL)
}

pub(crate) fn not(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    Ok(Symbol::bool(interp.evaluate(args.get(0)?)?.is_nil()))
}
