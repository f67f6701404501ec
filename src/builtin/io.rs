use std::{fs::File, io::BufReader};

use super::common::get_args;
use crate::{
    Error, Interpreter, Symbol, TRUE, parse::Parser, scanner::LineReader, token::TokenKind,
};

/// Prints the value of every operand followed by a space, then a newline.
pub(crate) fn write(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    for operand in expr.iter().skip(1) {
        let value = interp.evaluate(operand)?;
        interp.print(&format!("{} ", value))?;
    }
    interp.println("")?;
    Ok(TRUE)
}

/// `(read)` evaluates the next expression from the input.  `(read prompt)`
/// prints the value of `prompt` first.
pub(crate) fn read(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let operands: Vec<&Symbol> = expr.iter().skip(1).collect();
    match operands.as_slice() {
        [prompt] => {
            let prompt = interp.evaluate(prompt)?;
            interp.println(&prompt.to_string())?;
        }
        [] => {}
        _ => {
            return Err(Error::evaluation_failure(format!(
                "READ expects at most one argument: {}",
                expr
            )));
        }
    }
    let next = interp.read_expression();
    interp.evaluate(&next)
}

/// `(load "file")` evaluates every expression in the file, with tracing
/// turned on.  A missing file is not an error.
pub(crate) fn load(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    let path = match args.get(0)? {
        Symbol::Atom {
            kind: TokenKind::String,
            text,
        } => text.to_string(),
        _ => {
            return Err(Error::evaluation_failure(
                "Load expects the name of a file as an argument",
            ));
        }
    };
    load_path(interp, &path)
}

/// Evaluates every expression in the file at `path`, with tracing turned on.
pub(crate) fn load_path(interp: &mut Interpreter, path: &str) -> Result<Symbol, Error> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("load: {}: {}", path, err);
            return Ok(TRUE);
        }
        Err(err) => return Err(err.into()),
    };
    log::debug!("loading {}", path);

    let mut parser = Parser::new(LineReader::new(BufReader::new(file)));
    let trace = interp.trace;
    interp.trace = true;
    let result = eval_file(interp, &mut parser);
    interp.trace = trace;
    result
}

fn eval_file(interp: &mut Interpreter, parser: &mut Parser) -> Result<Symbol, Error> {
    loop {
        let expr = parser.get_expression();
        interp.print_diagnostics(parser.take_diagnostics())?;
        if expr.kind() == Some(TokenKind::End) {
            return Ok(TRUE);
        }
        interp.evaluate(&expr)?;
    }
}

/// `(trace flag)` turns tracing on unless `flag` evaluates to NIL.
pub(crate) fn trace(interp: &mut Interpreter, expr: &Symbol) -> Result<Symbol, Error> {
    let args = get_args(expr, 1)?;
    interp.trace = !interp.evaluate(args.get(0)?)?.is_nil();
    Ok(TRUE)
}

pub(crate) fn clear(interp: &mut Interpreter, _expr: &Symbol) -> Result<Symbol, Error> {
    interp.clear();
    Ok(TRUE)
}
