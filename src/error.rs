use crate::Symbol;

/// Defines `ErrorKind`, its `Display` implementation, and one `Error`
/// constructor per kind.
macro_rules! ErrorKind {
    ($(($kind:ident, $vis:vis $ctor:ident)),* $(,)?) => {
        /// The kind of error that occurred.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum ErrorKind {
            $($kind,)*
        }

        impl std::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$kind => f.write_str(stringify!($kind)),)*
                }
            }
        }

        impl Error {
            $(
                #[doc = concat!("An [`Error`] of the `", stringify!($kind), "` kind.")]
                $vis fn $ctor(desc: impl Into<String>) -> Error {
                    Error {
                        kind: ErrorKind::$kind,
                        desc: desc.into(),
                        backtrace: vec![],
                    }
                }
            )*
        }
    };
}

ErrorKind!(
    (EvaluationFailure, pub evaluation_failure),
    (Exit,              pub(crate) exit),
);

/// Represents an error that occurred while evaluating an expression.
///
/// `EvaluationFailure` is the only kind a program can observe: it is printed
/// by [`Interpreter::evaluate_one`](crate::Interpreter::evaluate_one) and the
/// session moves on.  `Exit` travels up the same path when `EXIT` or `QUIT` is
/// evaluated, and is turned into [`Flow::Exit`](crate::Flow::Exit) at the top.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    desc: String,
    backtrace: Vec<Symbol>,
}

impl Error {
    /// Formats the error into a human-readable string, including the
    /// expressions that were being evaluated when it was raised.
    pub fn format(&self) -> String {
        let mut out = format!("ERR {}: {}", self.kind, self.desc);
        for expr in &self.backtrace {
            if expr.is_atom() {
                continue;
            }
            let string = expr.to_string().replace('\n', "\\n");
            if string.len() > 80 {
                out.push_str(&format!("\n  at {:.80}...", string));
            } else {
                out.push_str(&format!("\n  at {}", string));
            }
        }
        out + "\n"
    }

    /// Adds an expression to the error's backtrace.
    pub fn with_trace(mut self, expr: &Symbol) -> Self {
        if self.kind == ErrorKind::Exit {
            return self;
        }
        if self.backtrace.last().is_some_and(|last| last == expr) {
            return self;
        }
        self.backtrace.push(expr.clone());
        self
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the description of the error.
    pub fn desc(&self) -> String {
        self.desc.to_owned()
    }

    /// Whether this error is the request to end the session.
    pub fn is_exit(&self) -> bool {
        self.kind == ErrorKind::Exit
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.desc)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::evaluation_failure(format!("I/O Error: {}", err))
    }
}
