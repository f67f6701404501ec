/// Every kind of token the scanner produces, and therefore every kind of atom
/// a [`Symbol`](crate::Symbol) can carry.
///
/// Operator kinds double as the dispatch key of the evaluator, so adding a
/// variant here forces a decision in `eval::dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation and literals.
    Left,
    Right,
    Number,
    String,
    Id,
    Nil,
    True,
    False,
    End,
    Invalid,
    Quote,
    Dot,
    Exit,
    Quit,

    // Arithmetic.
    Plus,
    Minus,
    Times,
    Div,
    Mod,

    // Comparison.
    Lt,
    Gt,
    Le,
    Ge,
    Equal,

    // Logic.
    And,
    Or,
    Not,
    Nand,
    Nor,

    // Lists.
    Car,
    Cdr,
    Cadr,
    Caddr,
    Atomp,
    Listp,
    Numberp,
    Stringp,
    Count,
    Append,
    Push,
    Cons,
    List,
    Reverse,
    Memberp,

    // Control flow.
    If,
    Cond,
    While,
    Do,
    For,
    ForList,
    Block,

    // Binding.
    Setq,
    Set,
    Let,
    Unset,
    Defun,
    Lambda,
    Eval,

    // I/O and meta.
    Read,
    Write,
    Load,
    Trace,
    Clear,
}

impl TokenKind {
    /// Looks `word` up in the reserved keyword table.  The lookup is
    /// case-insensitive; `word` must already be uppercase.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        use TokenKind::*;
        let kind = match word {
            "NIL" => Nil,
            "TRUE" => True,
            "FALSE" => False,
            "EXIT" => Exit,
            "QUIT" => Quit,
            "QUOTE" => Quote,
            "DOT" => Dot,

            "PLUS" => Plus,
            "MINUS" => Minus,
            "TIMES" => Times,
            "DIV" => Div,
            "MOD" => Mod,

            "LT" => Lt,
            "GT" => Gt,
            "LE" => Le,
            "GE" => Ge,
            "EQUAL" => Equal,

            "AND" => And,
            "OR" => Or,
            "NOT" => Not,
            "NAND" => Nand,
            "NOR" => Nor,

            "CAR" => Car,
            "CDR" => Cdr,
            "CADR" => Cadr,
            "CADDR" => Caddr,
            "ATOMP" | "ATOM?" => Atomp,
            "LISTP" | "LIST?" => Listp,
            "NUMBERP" | "NUMBER?" => Numberp,
            "STRINGP" | "STRING?" => Stringp,
            "COUNT" => Count,
            "APPEND" => Append,
            "PUSH" => Push,
            "CONS" => Cons,
            "LIST" => List,
            "REVERSE" => Reverse,
            "MEMBERP" | "MEMBER?" => Memberp,

            "IF" => If,
            "COND" => Cond,
            "WHILE" => While,
            "DO" => Do,
            "FOR" => For,
            "FOR_LIST" | "FOR-LIST" => ForList,
            "BLOCK" => Block,

            "SETQ" => Setq,
            "SET" => Set,
            "LET" => Let,
            "UNSET" => Unset,
            "DEFUN" => Defun,
            "LAMBDA" => Lambda,
            "EVAL" => Eval,

            "READ" => Read,
            "WRITE" => Write,
            "LOAD" => Load,
            "TRACE" => Trace,
            "CLEAR" => Clear,
            _ => return None,
        };
        Some(kind)
    }

    /// The canonical spelling used when an atom of this kind is made up by
    /// the interpreter instead of read from source.
    pub fn canonical(self) -> &'static str {
        use TokenKind::*;
        match self {
            Left => "(",
            Right => ")",
            Number => "NUMBER",
            String => "STRING",
            Id => "ID",
            Nil => "NIL",
            True => "TRUE",
            False => "FALSE",
            End => "END",
            Invalid => "INVALID",
            Quote => "QUOTE",
            Dot => ".",
            Exit => "EXIT",
            Quit => "QUIT",
            Plus => "+",
            Minus => "-",
            Times => "*",
            Div => "/",
            Mod => "%",
            Lt => "<",
            Gt => ">",
            Le => "<=",
            Ge => ">=",
            Equal => "=",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Nand => "NAND",
            Nor => "NOR",
            Car => "CAR",
            Cdr => "CDR",
            Cadr => "CADR",
            Caddr => "CADDR",
            Atomp => "ATOMP",
            Listp => "LISTP",
            Numberp => "NUMBERP",
            Stringp => "STRINGP",
            Count => "COUNT",
            Append => "APPEND",
            Push => "PUSH",
            Cons => "CONS",
            List => "LIST",
            Reverse => "REVERSE",
            Memberp => "MEMBERP",
            If => "IF",
            Cond => "COND",
            While => "WHILE",
            Do => "DO",
            For => "FOR",
            ForList => "FOR_LIST",
            Block => "BLOCK",
            Setq => "SETQ",
            Set => "SET",
            Let => "LET",
            Unset => "UNSET",
            Defun => "DEFUN",
            Lambda => "LAMBDA",
            Eval => "EVAL",
            Read => "READ",
            Write => "WRITE",
            Load => "LOAD",
            Trace => "TRACE",
            Clear => "CLEAR",
        }
    }
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// Builds a token, reclassifying identifiers that spell a reserved
    /// keyword.  Keywords take their uppercase spelling; every other
    /// identifier keeps the case it was typed in.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Token {
        let text = text.into();
        if kind == TokenKind::Id {
            let upper = text.to_uppercase();
            if let Some(keyword) = TokenKind::keyword(&upper) {
                return Token {
                    kind: keyword,
                    text: upper,
                };
            }
        }
        Token { kind, text }
    }
}
