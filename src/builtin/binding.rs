use std::collections::HashMap;

use super::common::{check_id, check_list, get_args};
use crate::{Error, Interpreter, Lambda, NIL, Symbol, TRUE, token::TokenKind};

/// `(setq id value)`: `id` is taken as written.
pub(crate) fn setq(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let id = args.get(0)?;
    check_id(id)?;
    let value = interp.evaluate(args.get(1)?)?;
    interp.bind(id, value.clone());
    Ok(value)
}

/// `(set id value)`: `id` is evaluated and must produce an identifier.
pub(crate) fn set(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let id = interp.evaluate(args.get(0)?)?;
    check_id(&id)?;
    let value = interp.evaluate(args.get(1)?)?;
    interp.bind(&id, value.clone());
    Ok(value)
}

pub(crate) fn unset(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    let raw = args.get(0)?;
    let value = interp.evaluate(raw)?;
    // An unbound name evaluates to TRUE, so fall back to the name itself.
    let id = if value.is_id() {
        &value
    } else if raw.is_id() {
        raw
    } else {
        return Err(Error::evaluation_failure(format!("{} is not a valid id", value)));
    };
    if let Some(name) = id.text() {
        interp.variables.remove(name);
    }
    Ok(TRUE)
}

/// `(defun name (params ...) body)`: returns `name`.
pub(crate) fn defun(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 3)?;
    let id = args.get(0)?;
    check_id(id)?;
    let params = args.get(1)?;
    if !params.is_list_of_ids() {
        return Err(Error::evaluation_failure(format!(
            "{} is not a list of ids",
            params
        )));
    }
    let body = args.get(2)?;
    if let Some(name) = id.text() {
        log::debug!("defun {} {}", name, params);
        interp.functions.insert(
            name.to_owned(),
            Lambda::new(body.clone(), params.iter().cloned().collect()),
        );
    }
    Ok(id.clone())
}

/// `((lambda (params ...) body) args ...)`: registers the lambda under a fresh
/// name and calls it.
pub(crate) fn apply_lambda(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let name = interp.gensym();
    let definition = expr.car()?.cdr()?;
    defun(
        interp,
        &Symbol::cons(
            Symbol::keyword(TokenKind::Defun),
            Symbol::cons(name.clone(), definition),
        ),
    )?;
    interp.evaluate(&Symbol::cons(name, expr.cdr()?))
}

/// `(let ((id value) ...) (body ...))`
///
/// Each value is bound to a fresh identifier and the body is rewritten to use
/// those identifiers before its expressions are evaluated in order.
pub(crate) fn let_(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 2)?;
    let bindings = args.get(0)?;
    check_list(bindings)?;
    let body = args.get(1)?;
    check_list(body)?;
    if bindings.is_nil() {
        return interp.evaluate(body);
    }

    let mut renames = HashMap::new();
    for binding in bindings.iter() {
        check_list(binding)?;
        let parts: Vec<&Symbol> = binding.iter().collect();
        let (id, value) = match parts[..] {
            [id, value] if id.is_id() => (id, value),
            _ => {
                return Err(Error::evaluation_failure(
                    "The first argument to let must be a list of pairs (id value)",
                ));
            }
        };
        let fresh = interp.gensym();
        let value = interp.evaluate(value)?;
        interp.bind(&fresh, value);
        if let Some(name) = id.text() {
            renames.insert(name.to_owned(), fresh);
        }
    }

    let mut value = NIL;
    for expr in body.substitute(&renames).iter() {
        value = interp.evaluate(expr)?;
    }
    Ok(value)
}

pub(crate) fn eval(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    interp.evaluate(args.get(0)?)
}

pub(crate) fn quote(_interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    args.get(0).cloned()
}
