use std::{
    collections::{HashMap, HashSet},
    io::Write,
};

use crate::{
    Error, NIL, Symbol,
    parse::Parser,
    scanner::{LineReader, LineSource},
    token::TokenKind,
};

/// A user-defined function: a body template and its formal parameters.
#[derive(Debug, Clone)]
pub struct Lambda {
    body: Symbol,
    params: Vec<Symbol>,
}

impl Lambda {
    pub fn new(body: Symbol, params: Vec<Symbol>) -> Self {
        Lambda { body, params }
    }

    /// A copy of the body, ready to be rewritten for one call.
    pub fn body(&self) -> Symbol {
        self.body.clone()
    }

    pub fn params(&self) -> &[Symbol] {
        &self.params
    }
}

/// What the host should do after [`Interpreter::evaluate_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Ask for the next expression.
    Continue,
    /// The input is exhausted.
    End,
    /// The program evaluated `EXIT` or `QUIT`.
    Exit,
}

/// Prefix of the names minted for parameter and `let` bindings.
const SYNTHETIC_PREFIX: char = '@';

/// Tracks the state of a session: variable and function tables, asserted
/// facts and rules, and the input and output streams.
pub struct Interpreter {
    parser: Parser,
    out: Box<dyn Write>,
    pub(crate) variables: HashMap<String, Symbol>,
    pub(crate) functions: HashMap<String, Lambda>,
    pub(crate) facts: HashSet<Symbol>,
    pub(crate) rules: HashSet<Symbol>,
    pub(crate) trace: bool,
    next_id: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter reading from stdin and writing to stdout.
    pub fn new() -> Self {
        Self::with_io(LineReader::new(std::io::stdin().lock()), std::io::stdout())
    }

    /// An interpreter that reads expressions from `source`, for
    /// [`evaluate_one`](Self::evaluate_one) and the `read` built-in, and
    /// prints to `out`.
    pub fn with_io(source: impl LineSource + 'static, out: impl Write + 'static) -> Self {
        Interpreter {
            parser: Parser::new(source),
            out: Box::new(out),
            variables: HashMap::new(),
            functions: HashMap::new(),
            facts: HashSet::new(),
            rules: HashSet::new(),
            trace: false,
            next_id: 0,
        }
    }

    /// Reads one expression from the input, evaluates it and prints the
    /// result, or the error message if evaluation failed.
    pub fn evaluate_one(&mut self) -> Flow {
        let expr = self.read_expression();
        if expr.kind() == Some(TokenKind::End) {
            self.clean_up();
            return Flow::End;
        }
        let result = self.evaluate(&expr);
        self.clean_up();
        let line = match result {
            Ok(value) => format_result(&value),
            Err(err) if err.is_exit() => return Flow::Exit,
            Err(err) => {
                log::debug!("{}", err.format());
                err.desc()
            }
        };
        if let Err(err) = self.println(&line) {
            log::error!("failed to print result: {}", err);
        }
        Flow::Continue
    }

    /// Evaluates every expression in `program`, each one as a separate
    /// top-level expression, and returns the value of the last one.
    pub fn eval_string(&mut self, program: &str) -> Result<Symbol, Error> {
        let mut parser = Parser::new(LineReader::from_string(program));
        self.eval_all(&mut parser)
    }

    /// Evaluates the file at `path` the way `(load "path")` does.
    pub fn load_file(&mut self, path: &str) -> Result<Symbol, Error> {
        let result = crate::builtin::io::load_path(self, path);
        self.clean_up();
        result
    }

    fn eval_all(&mut self, parser: &mut Parser) -> Result<Symbol, Error> {
        let mut value = NIL;
        loop {
            let expr = parser.get_expression();
            self.print_diagnostics(parser.take_diagnostics())?;
            if expr.kind() == Some(TokenKind::End) {
                return Ok(value);
            }
            let result = self.evaluate(&expr);
            self.clean_up();
            value = result?;
        }
    }

    /// Reads the next expression from the interactive input.
    pub(crate) fn read_expression(&mut self) -> Symbol {
        let expr = self.parser.get_expression();
        let diagnostics = self.parser.take_diagnostics();
        if let Err(err) = self.print_diagnostics(diagnostics) {
            log::error!("failed to print diagnostics: {}", err);
        }
        expr
    }

    pub(crate) fn print_diagnostics(&mut self, diagnostics: Vec<String>) -> Result<(), Error> {
        for diagnostic in diagnostics {
            self.println(&diagnostic)?;
        }
        Ok(())
    }

    pub(crate) fn print(&mut self, text: &str) -> Result<(), Error> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    pub(crate) fn println(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Mints a fresh identifier, `@0`, `@1`, ...
    pub(crate) fn gensym(&mut self) -> Symbol {
        let name = format!("{}{}", SYNTHETIC_PREFIX, self.next_id);
        self.next_id += 1;
        Symbol::id(name)
    }

    /// Binds the identifier `id` to `value` in the variable table.
    pub(crate) fn bind(&mut self, id: &Symbol, value: Symbol) {
        if let Some(name) = id.text() {
            self.variables.insert(name.to_owned(), value);
        }
    }

    /// Drops every synthetic binding and resets the counter.  Runs after each
    /// top-level expression, whether it succeeded or not.
    fn clean_up(&mut self) {
        let before = self.variables.len() + self.functions.len();
        self.variables
            .retain(|name, _| !name.starts_with(SYNTHETIC_PREFIX));
        self.functions
            .retain(|name, _| !name.starts_with(SYNTHETIC_PREFIX));
        let purged = before - self.variables.len() - self.functions.len();
        if purged > 0 || self.next_id > 0 {
            log::debug!("purged {} synthetic bindings, {} ids minted", purged, self.next_id);
        }
        self.next_id = 0;
    }

    /// Empties the variable and function tables.
    pub(crate) fn clear(&mut self) {
        self.variables.clear();
        self.functions.clear();
    }

    /// Whether `name` has a value in the variable table.
    pub fn is_bound(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// The value bound to `name`, without evaluating it.
    pub fn value_of(&self, name: &str) -> Option<&Symbol> {
        self.variables.get(name)
    }

    /// Whether `name` is a user-defined function.
    pub fn is_defined(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Names currently in the variable table.
    pub fn bound_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn facts(&self) -> &HashSet<Symbol> {
        &self.facts
    }

    pub fn rules(&self) -> &HashSet<Symbol> {
        &self.rules
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace
    }
}

/// How a top-level result is shown: a quoted form shows what it quotes, and a
/// string is shown in double quotes.
pub fn format_result(value: &Symbol) -> String {
    if let Some(inner) = value.quoted() {
        inner.to_string()
    } else if value.is_string() {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}
