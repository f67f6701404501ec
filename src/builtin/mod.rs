/*!
The built-in operators.  Operator names are case-insensitive; the word
spellings in the second column are equivalent to the symbols in the first.

Unless noted otherwise, operands are evaluated before use.

## Arithmetic Operations

All arithmetic is on arbitrary-precision integers.

| Name | Also  | Details                                        |
|------|-------|------------------------------------------------|
| `+`  | PLUS  | `(+)` is 0                                     |
| `-`  | MINUS | one operand negates, two subtract              |
| `*`  | TIMES | `(*)` is 1                                     |
| `/`  | DIV   | truncates toward zero                          |
| `%`  | MOD   | result in `[0, m)`, `m` must be positive       |

## Comparison

| Name | Also  | Details                                        |
|------|-------|------------------------------------------------|
| `<`  | LT    | two numbers or two strings                     |
| `>`  | GT    |                                                |
| `<=` | LE    |                                                |
| `>=` | GE    |                                                |
| `=`  | EQUAL | structural equality of any two values          |

## Conditionals

| Name   | Details                                                |
|--------|--------------------------------------------------------|
| `if`   | `(if test then else)`                                  |
| `cond` | `(cond ((test result) ...))`                           |
| `and`  | raw operands, stops at the first NIL                   |
| `or`   | raw operands, stops at the first non-NIL               |
| `not`  |                                                        |
| `nand` | `(not (and ...))`                                      |
| `nor`  | `(not (or ...))`                                       |

## Accessing Elements of Lists

| Name                  | Details                                    |
|-----------------------|--------------------------------------------|
| `car`                 |                                            |
| `cdr`, `cadr`, `caddr`| all three return the tail                  |
| `atom?` / `atomp`     |                                            |
| `list?` / `listp`     |                                            |
| `number?` / `numberp` |                                            |
| `string?` / `stringp` |                                            |
| `count`               | length of a list                           |
| `append`              | `(append list1 list2)`                     |
| `push`, `cons`        | `(push item list)`                         |
| `list`                | list of the operands' values               |
| `reverse`             |                                            |
| `member?` / `memberp` | structural equality scan                   |

## Control Flow

| Name                    | Details                                           |
|-------------------------|---------------------------------------------------|
| `while`                 | `(while test (body ...))`                         |
| `do`                    | `(do (body ...) test)`, test after each pass      |
| `for`                   | `(for (setup test update) (body ...))`            |
| `for-list` / `for_list` | `(for-list list op)`, list of `(op item)`         |
| `block`                 | value of the last operand                         |

## Binding

| Name     | Details                                                       |
|----------|---------------------------------------------------------------|
| `setq`   | `(setq id value)`, `id` raw                                   |
| `set`    | `(set expr value)`, `expr` must evaluate to an identifier     |
| `let`    | `(let ((id value) ...) (body ...))`                           |
| `unset`  |                                                               |
| `defun`  | `(defun name (params ...) body)`, all raw                     |
| `lambda` | `((lambda (params ...) body) args ...)`                       |
| `eval`   |                                                               |
| `quote`  | `'x`, raw                                                     |

## Input and Output

| Name    | Details                                                        |
|---------|----------------------------------------------------------------|
| `write` | prints each value followed by a space, then a newline          |
| `read`  | evaluates the next expression from the input                   |
| `load`  | `(load "file")`, evaluates a file with tracing on              |
| `trace` | `(trace flag)`                                                 |
| `clear` | forgets every variable and function                            |

## Facts

| Name | Also | Details                                                     |
|------|------|-------------------------------------------------------------|
| `.`  | DOT  | one raw operand is a fact, more are a rule                  |
*/

pub(crate) mod arithmetic_operations;
pub(crate) mod binding;
mod common;
pub(crate) mod comparison;
pub(crate) mod conditionals;
pub(crate) mod control_flow;
pub(crate) mod facts;
pub(crate) mod io;
pub(crate) mod list_elements;
