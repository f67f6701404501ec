use std::collections::HashMap;

use crate::{
    Error, Interpreter, NIL, Symbol, TRUE,
    builtin::{
        arithmetic_operations, binding, comparison, conditionals, control_flow, facts, io,
        list_elements,
    },
    list,
    token::TokenKind,
};

impl Interpreter {
    /// Evaluates `expr` and returns its value.
    pub fn evaluate(&mut self, expr: &Symbol) -> Result<Symbol, Error> {
        log::trace!("eval: {}", expr);
        match expr {
            Symbol::Atom { .. } => self.eval_atom(expr),
            Symbol::Pair(_) => self.eval_form(expr),
        }
    }

    fn eval_atom(&mut self, atom: &Symbol) -> Result<Symbol, Error> {
        if self.trace {
            self.print(&format!("atom: {}", atom))?;
        }
        let value = match atom.kind() {
            Some(TokenKind::False) => NIL,
            Some(TokenKind::Exit | TokenKind::Quit) => {
                return Err(Error::exit(atom.to_string()));
            }
            Some(TokenKind::Id) => self.lookup(atom)?,
            _ => atom.clone(),
        };
        if self.trace {
            self.println(&format!(", value: {}", value))?;
        }
        Ok(value)
    }

    /// Unbound identifiers are TRUE.  A bound list is evaluated on every
    /// lookup.
    fn lookup(&mut self, id: &Symbol) -> Result<Symbol, Error> {
        let bound = id.text().and_then(|name| self.variables.get(name)).cloned();
        match bound {
            None => Ok(TRUE),
            Some(value) if value.is_atom() => Ok(value),
            Some(value) => self.evaluate(&value),
        }
    }

    fn eval_form(&mut self, expr: &Symbol) -> Result<Symbol, Error> {
        let head = expr.car()?;
        if self.trace {
            self.println(&format!("function: {}, expression: {}", head, expr))?;
        }
        let value = self
            .dispatch(&head, expr)
            .map_err(|err| err.with_trace(expr))?;
        if self.trace {
            self.println(&format!("function: {}, value: {}", head, value))?;
        }
        Ok(value)
    }

    fn dispatch(&mut self, head: &Symbol, expr: &Symbol) -> Result<Symbol, Error> {
        use TokenKind::*;

        let kind = match head {
            Symbol::Atom { kind, .. } => *kind,
            Symbol::Pair(_) if head.car()?.kind() == Some(Lambda) => {
                return binding::apply_lambda(self, expr);
            }
            Symbol::Pair(_) => {
                return Err(Error::evaluation_failure(format!("Undefined: {}", head)));
            }
        };
        match kind {
            End | Nil | Quit => Err(Error::evaluation_failure(format!(
                "{} is not a valid function",
                head
            ))),
            Invalid => Err(Error::evaluation_failure(format!(
                "{} is not a valid symbol",
                head
            ))),
            Left | Right | True | False | Exit => {
                Err(Error::evaluation_failure(format!("Undefined: {}", head)))
            }
            Id => self.call_function(head, expr),
            Number | String => list_elements::literal_list(self, expr),

            Plus => arithmetic_operations::plus(self, expr),
            Minus => arithmetic_operations::minus(self, expr),
            Times => arithmetic_operations::times(self, expr),
            Div => arithmetic_operations::div(self, expr),
            Mod => arithmetic_operations::modulo(self, expr),

            Lt => comparison::compare(self, expr, |ord| ord.is_lt()),
            Gt => comparison::compare(self, expr, |ord| ord.is_gt()),
            Le => comparison::compare(self, expr, |ord| ord.is_le()),
            Ge => comparison::compare(self, expr, |ord| ord.is_ge()),
            Equal => comparison::equal(self, expr),

            And => conditionals::and(self, expr),
            Or => conditionals::or(self, expr),
            Not => conditionals::not(self, expr),
            Nand => Ok(Symbol::bool(conditionals::and(self, expr)?.is_nil())),
            Nor => Ok(Symbol::bool(conditionals::or(self, expr)?.is_nil())),
            If => conditionals::if_(self, expr),
            Cond => conditionals::cond(self, expr),

            Car => list_elements::car(self, expr),
            Cdr | Cadr | Caddr => list_elements::cdr(self, expr),
            Atomp => list_elements::atomp(self, expr),
            Listp => list_elements::listp(self, expr),
            Numberp => list_elements::numberp(self, expr),
            Stringp => list_elements::stringp(self, expr),
            Count => list_elements::count(self, expr),
            Append => list_elements::append(self, expr),
            Push | Cons => list_elements::push(self, expr),
            List => list_elements::list(self, expr),
            Reverse => list_elements::reverse(self, expr),
            Memberp => list_elements::memberp(self, expr),

            While => control_flow::while_(self, expr),
            Do => control_flow::do_(self, expr),
            For => control_flow::for_(self, expr),
            ForList => control_flow::for_list(self, expr),
            Block => control_flow::block(self, expr),

            Setq => binding::setq(self, expr),
            Set => binding::set(self, expr),
            Let => binding::let_(self, expr),
            Unset => binding::unset(self, expr),
            Defun => binding::defun(self, expr),
            Lambda => Err(Error::evaluation_failure(
                "LAMBDA must be applied to its arguments",
            )),
            Eval => binding::eval(self, expr),
            Quote => binding::quote(self, expr),

            Read => io::read(self, expr),
            Write => io::write(self, expr),
            Load => io::load(self, expr),
            Trace => io::trace(self, expr),
            Clear => io::clear(self, expr),

            Dot => facts::dot(self, expr),
        }
    }

    /// Applies the user function named by `name` to the operands of `expr`.
    ///
    /// Every parameter gets a fresh `@n` identifier bound to its argument, and
    /// the body is rewritten to refer to those identifiers before it is
    /// evaluated.  The bindings live until the end of the top-level
    /// expression.
    fn call_function(&mut self, name: &Symbol, expr: &Symbol) -> Result<Symbol, Error> {
        let lambda = name
            .text()
            .and_then(|key| self.functions.get(key))
            .cloned()
            .ok_or_else(|| Error::evaluation_failure(format!("{} is not defined", name)))?;

        let mut values = Vec::new();
        for arg in expr.iter().skip(1) {
            let arg = list!(Symbol::keyword(TokenKind::Eval), arg.clone());
            values.push(self.evaluate(&arg)?);
        }
        if values.len() != lambda.params().len() {
            return Err(Error::evaluation_failure(format!(
                "{} requires {} arguments",
                name,
                lambda.params().len()
            )));
        }

        let body = lambda.body();
        if body.is_nil() {
            return Ok(NIL);
        }
        let mut renames = HashMap::new();
        for (param, value) in lambda.params().iter().zip(values) {
            let fresh = self.gensym();
            self.bind(&fresh, value);
            if let Some(param) = param.text() {
                renames.insert(param.to_owned(), fresh);
            }
        }
        self.evaluate(&body.substitute(&renames))
    }
}
