use crate::{Error, Interpreter, Symbol};

/// `(. fact)` asserts a fact; `(. a b ...)` asserts the rule `(a b ...)`.
/// Operands are stored and returned unevaluated.
pub(crate) fn dot(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let mut operands: Vec<Symbol> = expr.iter().skip(1).cloned().collect();
    match operands.len() {
        0 => Err(Error::evaluation_failure("dot expects at least one argument")),
        1 => {
            let fact = operands.remove(0);
            log::debug!("fact: {}", fact);
            interp.facts.insert(fact.clone());
            Ok(fact)
        }
        _ => {
            let rule: Symbol = operands.into_iter().collect();
            log::debug!("rule: {}", rule);
            interp.rules.insert(rule.clone());
            Ok(rule)
        }
    }
}
