/*!
Symlisp is a small Lisp interpreter with arbitrary-precision integers,
user-defined functions and a store for facts and rules.

Functions do not close over an environment.  When a function is called, each
parameter is bound to a fresh global identifier (`@0`, `@1`, ...) and the body
is rewritten to use those identifiers.  The fresh bindings are dropped once the
top-level expression that created them is done.

## Getting started

```rust
use symlisp::{Error, Interpreter, LineReader};

fn main() -> Result<(), Error> {
    // An interpreter with no interactive input, printing to a buffer.
    let mut interp = Interpreter::with_io(LineReader::from_string(""), Vec::new());

    let program = "
        (defun fact (n) (if (= n 0) 1 (* n (fact (- n 1)))))
        (fact 25)
    ";
    let value = interp.eval_string(program)?;

    assert_eq!(value.to_string(), "15511210043330985984000000");
    assert!(interp.is_defined("fact"));
    Ok(())
}
```
*/

/*!
## Next steps

1. Every value is a [`Symbol`]: an atom or a pair of symbols.

1. [`Interpreter`] tracks the state of a session and provides
   [`evaluate_one`](Interpreter::evaluate_one) for a host loop and
   [`eval_string`](Interpreter::eval_string) for programs held in memory.

1. The [`builtin`] module lists the built-in operators.
*/

mod eval;
mod macros;

pub mod builtin;

mod cons;
pub use cons::{Cons, Iter};

mod error;
pub use error::{Error, ErrorKind};

mod interpreter;
pub use interpreter::{Flow, Interpreter, Lambda, format_result};

mod parse;
pub use parse::Parser;

mod scanner;
pub use scanner::{LineReader, LineSource, Scanner};

mod token;
pub use token::{Token, TokenKind};

mod value;
pub use value::{NIL, Symbol, TRUE};
