use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::common::{get_args, to_integer};
use crate::{Error, Interpreter, Symbol};

fn fold_operands(
    interp: &mut Interpreter,
    expr: &Symbol,
    init: BigInt,
    oper: impl Fn(BigInt, BigInt) -> BigInt,
) -> Result<Symbol, Error> {
    let mut acc = init;
    for operand in expr.iter().skip(1) {
        let value = interp.evaluate(operand)?;
        acc = oper(acc, to_integer(&value, expr)?);
    }
    Ok(Symbol::number(&acc))
}

pub(crate) fn plus(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    fold_operands(interp, expr, BigInt::zero(), |a, b| a + b)
}

pub(crate) fn times(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    fold_operands(interp, expr, BigInt::one(), |a, b| a * b)
}

pub(crate) fn minus(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let operands: Vec<&Symbol> = expr.iter().skip(1).collect();
    match operands.as_slice() {
        [only] => {
            let value = interp.evaluate(only)?;
            Ok(Symbol::number(&-to_integer(&value, expr)?))
        }
        [first, second] => {
            let first = interp.evaluate(first)?;
            let first = to_integer(&first, expr)?;
            let second = interp.evaluate(second)?;
            Ok(Symbol::number(&(first - to_integer(&second, expr)?)))
        }
        _ => Err(Error::evaluation_failure("Minus expects one or two arguments")),
    }
}

fn two_integers(interp: &mut Interpreter, expr: &Symbol) -> Result<(BigInt, BigInt), Error> {
    let args = get_args(expr, 2)?;
    let first = interp.evaluate(args.get(0)?)?;
    let first = to_integer(&first, expr)?;
    let second = interp.evaluate(args.get(1)?)?;
    Ok((first, to_integer(&second, expr)?))
}

/// Truncating division.
pub(crate) fn div(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let (dividend, divisor) = two_integers(interp, expr)?;
    if divisor.is_zero() {
        return Err(Error::evaluation_failure(format!("Division by zero in {}", expr)));
    }
    Ok(Symbol::number(&(dividend / divisor)))
}

/// Mathematical modulus: the result is never negative.
pub(crate) fn modulo(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let (value, modulus) = two_integers(interp, expr)?;
    if !modulus.is_positive() {
        return Err(Error::evaluation_failure(format!(
            "Modulus must be positive in {}",
            expr
        )));
    }
    let rem = value % &modulus;
    let rem = if rem.is_negative() { rem + modulus } else { rem };
    Ok(Symbol::number(&rem))
}
