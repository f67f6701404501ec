use crate::{
    NIL, Symbol,
    scanner::{LineSource, Scanner},
    token::{Token, TokenKind},
};

/// Result of reading one item: either a complete expression, or the marker
/// for a `)` that closed the innermost open list.
enum Item {
    Expr(Symbol),
    Close,
}

/// Builds [`Symbol`] trees from the token stream of a [`Scanner`].
///
/// Malformed input never fails the parse.  Problems are recorded as
/// diagnostics, to be printed by whoever drives the parser, and the parser
/// returns a placeholder so the session can carry on.
pub struct Parser {
    scanner: Scanner,
    stack: Vec<Token>,
    diagnostics: Vec<String>,
}

impl Parser {
    pub fn new(source: impl LineSource + 'static) -> Parser {
        Parser {
            scanner: Scanner::new(source),
            stack: vec![],
            diagnostics: vec![],
        }
    }

    fn diagnostic(&mut self, message: &str) {
        log::warn!("{}", message);
        self.diagnostics.push(message.to_owned());
    }

    /// Takes the diagnostics recorded since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Reads the next complete expression.  Returns an END atom once the
    /// input is exhausted.
    pub fn get_expression(&mut self) -> Symbol {
        match self.read_item() {
            Item::Expr(expr) => expr,
            // Only reachable when the stack was non-empty, which cannot
            // happen at the top level.
            Item::Close => Symbol::invalid(")"),
        }
    }

    fn read_item(&mut self) -> Item {
        let token = self.scanner.next_token();
        match token.kind {
            TokenKind::Nil | TokenKind::True => Item::Expr(Symbol::from(token)),
            TokenKind::Quote => match self.read_item() {
                Item::Expr(expr) if expr.kind() == Some(TokenKind::End) => {
                    self.diagnostic("PARSER ERROR: nothing to quote");
                    Item::Expr(expr)
                }
                Item::Expr(expr) => {
                    Item::Expr(crate::list!(Symbol::keyword(TokenKind::Quote), expr))
                }
                Item::Close => {
                    self.diagnostic("PARSER ERROR: nothing to quote");
                    Item::Close
                }
            },
            TokenKind::Left => {
                self.stack.push(token);
                let mut items = NIL;
                loop {
                    match self.read_item() {
                        Item::Close => break,
                        Item::Expr(expr) if expr.kind() == Some(TokenKind::End) => {
                            if !self.stack.is_empty() {
                                self.stack.clear();
                                self.diagnostic("PARSER ERROR: unexpected end of input");
                            }
                            return Item::Expr(expr);
                        }
                        Item::Expr(expr) => items = Symbol::cons(expr, items),
                    }
                }
                Item::Expr(crate::cons::reverse(&items))
            }
            TokenKind::Right => {
                if self.stack.pop().is_some() {
                    Item::Close
                } else {
                    self.diagnostic("PARSER ERROR: unmatched right parenthesis");
                    Item::Expr(Symbol::keyword(TokenKind::Invalid))
                }
            }
            _ => Item::Expr(Symbol::from(token)),
        }
    }
}
