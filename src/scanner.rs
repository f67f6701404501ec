use std::io::BufRead;

use crate::token::{Token, TokenKind};

/// Marker character the interpreter uses in its trace output.  The scanner
/// skips it like whitespace, which is also what keeps the `@n` names of
/// synthetic bindings out of reach of user programs.
pub const TRACE_MARKER: char = '@';

/// A line-oriented character source for the [`Scanner`].
pub trait LineSource {
    /// Returns the next line without its terminator, or `None` at the end of
    /// input.
    fn next_line(&mut self) -> Option<String>;

    /// Releases the underlying input.  Called once the scanner has produced
    /// its END token.
    fn close(&mut self) {}
}

/// [`LineSource`] over anything that implements [`BufRead`].
pub struct LineReader<R> {
    reader: Option<R>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader {
            reader: Some(reader),
        }
    }
}

impl LineReader<std::io::Cursor<String>> {
    /// A source that reads from an in-memory program.
    pub fn from_string(program: impl Into<String>) -> Self {
        LineReader::new(std::io::Cursor::new(program.into()))
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> Option<String> {
        let reader = self.reader.as_mut()?;
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
            Err(err) => {
                log::error!("failed to read input: {}", err);
                None
            }
        }
    }

    fn close(&mut self) {
        self.reader = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Start,
    Minus,
    Ident,
    Number,
    Str,
    Comment,
    Invalid,
}

/// Pull-based tokenizer.  Each call to [`Scanner::next_token`] consumes just
/// enough characters from the source to produce one token.
pub struct Scanner {
    source: Box<dyn LineSource>,
    buffer: Vec<char>,
    pos: usize,
    pending: Option<Option<char>>,
    closed: bool,
}

fn is_id_char(ch: char) -> bool {
    matches!(ch, '-' | '_' | ':' | '*' | '?') || ch.is_alphanumeric()
}

impl Scanner {
    pub fn new(source: impl LineSource + 'static) -> Scanner {
        Scanner {
            source: Box::new(source),
            buffer: vec![],
            pos: 0,
            pending: None,
            closed: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.pending.take() {
            return ch;
        }
        while self.pos == self.buffer.len() {
            if self.closed {
                return None;
            }
            let line = self.source.next_line()?;
            self.buffer = line.chars().chain(std::iter::once('\n')).collect();
            self.pos = 0;
        }
        let ch = self.buffer[self.pos];
        self.pos += 1;
        Some(ch)
    }

    fn unget_char(&mut self, ch: Option<char>) {
        self.pending = Some(ch);
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.next_char() {
                Some(ch) if ch.is_whitespace() || ch == TRACE_MARKER => continue,
                other => {
                    self.unget_char(other);
                    return;
                }
            }
        }
    }

    fn look_ahead(
        &mut self,
        short: TokenKind,
        long: TokenKind,
        expected: char,
        mut text: String,
    ) -> Token {
        let next = self.next_char();
        if next == Some(expected) {
            text.push(expected);
            return Token::new(long, text);
        }
        self.unget_char(next);
        Token::new(short, text)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.buffer.clear();
            self.pos = 0;
            self.source.close();
        }
    }

    /// Reads the next token.  At the end of input this closes the source and
    /// keeps returning END.
    pub fn next_token(&mut self) -> Token {
        let mut text = String::new();
        let mut state = State::Start;
        self.skip_whitespace();
        loop {
            let ch = self.next_char();
            match state {
                State::Start => {
                    let Some(c) = ch else {
                        self.close();
                        return Token::new(TokenKind::End, text);
                    };
                    match c {
                        '(' => {
                            self.skip_whitespace();
                            text.push(c);
                            return self.look_ahead(TokenKind::Left, TokenKind::Nil, ')', text);
                        }
                        ')' => return Token::new(TokenKind::Right, ")"),
                        '=' => return Token::new(TokenKind::Equal, "="),
                        '+' => return Token::new(TokenKind::Plus, "+"),
                        '*' => return Token::new(TokenKind::Times, "*"),
                        '/' => return Token::new(TokenKind::Div, "/"),
                        '%' => return Token::new(TokenKind::Mod, "%"),
                        '\'' => return Token::new(TokenKind::Quote, "'"),
                        '.' => return Token::new(TokenKind::Dot, "."),
                        '<' => {
                            text.push(c);
                            return self.look_ahead(TokenKind::Lt, TokenKind::Le, '=', text);
                        }
                        '>' => {
                            text.push(c);
                            return self.look_ahead(TokenKind::Gt, TokenKind::Ge, '=', text);
                        }
                        '-' => {
                            text.push(c);
                            state = State::Minus;
                        }
                        '"' => state = State::Str,
                        ';' => state = State::Comment,
                        c => {
                            text.push(c);
                            state = if c.is_ascii_digit() {
                                State::Number
                            } else if is_id_char(c) {
                                State::Ident
                            } else {
                                State::Invalid
                            };
                        }
                    }
                }
                State::Minus => match ch {
                    Some(c) if !c.is_whitespace() => {
                        text.push(c);
                        state = if c.is_ascii_digit() {
                            State::Number
                        } else {
                            State::Invalid
                        };
                    }
                    other => {
                        self.unget_char(other);
                        return Token::new(TokenKind::Minus, "-");
                    }
                },
                State::Ident => match ch {
                    Some(c) if is_id_char(c) => text.push(c),
                    other => {
                        self.unget_char(other);
                        return Token::new(TokenKind::Id, text);
                    }
                },
                State::Number => match ch {
                    Some(c) if c.is_ascii_digit() => text.push(c),
                    other => {
                        self.unget_char(other);
                        return Token::new(TokenKind::Number, text);
                    }
                },
                State::Str => match ch {
                    None | Some('\n') => {
                        self.unget_char(ch);
                        state = State::Invalid;
                    }
                    Some('"') => return Token::new(TokenKind::String, text),
                    Some(c) => text.push(c),
                },
                State::Comment => match ch {
                    None => {
                        self.unget_char(ch);
                        state = State::Invalid;
                    }
                    Some(';') => {
                        let mut c = self.next_char();
                        while !matches!(c, None | Some('\n')) {
                            c = self.next_char();
                        }
                        self.unget_char(c);
                        state = State::Start;
                        self.skip_whitespace();
                    }
                    Some(c) => {
                        text.push(';');
                        text.push(c);
                        state = State::Invalid;
                    }
                },
                State::Invalid => match ch {
                    Some(c) if !c.is_whitespace() => text.push(c),
                    other => {
                        self.unget_char(other);
                        return Token::new(TokenKind::Invalid, text);
                    }
                },
            }
        }
    }
}

impl Iterator for Scanner {
    type Item = Token;

    /// Yields tokens up to, but not including, END.
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::End {
            None
        } else {
            Some(token)
        }
    }
}
