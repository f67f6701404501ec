use std::{cell::RefCell, io::Write, rc::Rc};

use symlisp::{Error, ErrorKind, Flow, Interpreter, LineReader, Symbol, format_result};

/// In-memory sink shared between a test and the interpreter it drives.
#[derive(Clone, Default)]
struct Output(Rc<RefCell<Vec<u8>>>);

impl Output {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// An interpreter whose interactive input is `input`, and its output.
fn session(input: &str) -> (Interpreter, Output) {
    let out = Output::default();
    (
        Interpreter::with_io(LineReader::from_string(input), out.clone()),
        out,
    )
}

macro_rules! symlisp_assert {
    (@impl $interp: expr, program:$input:expr, result:$result:expr $(,)?) => {
        let output = $interp.eval_string($input).map_err(|err| {
            println!("{}:{}: execution failed: {}", file!(), line!(), err.format());
            err
        })?;
        assert_eq!(
            format_result(&output),
            $result,
            "\n{}:{}: program: {}\n",
            file!(),
            line!(),
            $input,
        );
    };
    (@impl $interp: expr, program:$input:expr, error:$desc:expr $(,)?) => {
        let output = $interp.eval_string($input);
        assert!(output.is_err(), "\n{}:{}: program: {}\n  expected an error\n", file!(), line!(), $input);
        assert_eq!(output.unwrap_err().to_string(), $desc);
    };
    (program:$input:expr, output:$expected:expr $(,)?) => {
        let (mut interp, out) = session("");
        interp.eval_string($input)?;
        assert_eq!(out.text(), $expected, "\n{}:{}: program: {}\n", file!(), line!(), $input);
    };
    (interp: $interp: expr, program: $($tail:tt)+) => {
        symlisp_assert!(@impl $interp, program: $($tail)+)
    };
    (program: $($tail:tt)+) => {
        let (mut interp, _) = session("");
        symlisp_assert!(interp: interp, program: $($tail)+)
    };
}

#[test]
fn test_arithmetic() -> Result<(), Error> {
    symlisp_assert! { program: "(+ 2 3 4)", result: "9" }
    symlisp_assert! { program: "(- 5)", result: "-5" }
    symlisp_assert! { program: "(- 10 3)", result: "7" }
    symlisp_assert! { program: "(*)", result: "1" }
    symlisp_assert! { program: "(* )", result: "1" }
    symlisp_assert! { program: "(+)", result: "0" }
    symlisp_assert! { program: "(/ 7 2)", result: "3" }
    symlisp_assert! { program: "(/ -7 2)", result: "-3" }
    symlisp_assert! { program: "(% 7 3)", result: "1" }
    symlisp_assert! { program: "(% -7 3)", result: "2" }
    symlisp_assert! { program: "(plus 1 (times 2 3) (minus 4 1))", result: "10" }
    symlisp_assert! {
        program: "(* 123456789012345678901234567890 1000000000000)",
        result: "123456789012345678901234567890000000000000",
    }

    symlisp_assert! { program: "(- 1 2 3)", error: "Minus expects one or two arguments" }
    symlisp_assert! { program: "(/ 1 0)", error: "Division by zero in (/ 1 0)" }
    symlisp_assert! { program: "(mod 5 0)", error: "Modulus must be positive in (MOD 5 0)" }
    symlisp_assert! { program: r#"(+ 1 "a")"#, error: "Invalid expression (+ 1 a)" }
    Ok(())
}

#[test]
fn test_comparison() -> Result<(), Error> {
    symlisp_assert! { program: "(< 1 2)", result: "TRUE" }
    symlisp_assert! { program: "(> 1 2)", result: "NIL" }
    symlisp_assert! { program: "(<= 2 2)", result: "TRUE" }
    symlisp_assert! { program: "(>= 1 2)", result: "NIL" }
    symlisp_assert! { program: "(lt -3 2)", result: "TRUE" }
    symlisp_assert! { program: r#"(< "abc" "abd")"#, result: "TRUE" }
    symlisp_assert! { program: r#"(> "abc" "abd")"#, result: "NIL" }
    symlisp_assert! { program: "(= '(a (b)) '(a (b)))", result: "TRUE" }
    symlisp_assert! { program: "(= 1 2)", result: "NIL" }
    symlisp_assert! { program: r#"(= "1" 1)"#, result: "NIL" }

    symlisp_assert! {
        program: r#"(< 1 "a")"#,
        error: "Comparators expect two numbers or two strings as arguments",
    }
    symlisp_assert! {
        program: "(< 'a 'b)",
        error: "Comparators expect two numbers or two strings as arguments",
    }
    Ok(())
}

#[test]
fn test_logic() -> Result<(), Error> {
    symlisp_assert! { program: "(and)", result: "TRUE" }
    symlisp_assert! { program: "(or)", result: "NIL" }
    symlisp_assert! { program: "(and 1 2)", result: "TRUE" }
    symlisp_assert! { program: "(and nil (undefinedfn 1 2))", result: "NIL" }
    symlisp_assert! { program: "(or 5 (undefinedfn 1 2))", result: "TRUE" }
    symlisp_assert! { program: "(or nil false)", result: "NIL" }
    symlisp_assert! { program: "(not nil)", result: "TRUE" }
    symlisp_assert! { program: "(not 0)", result: "NIL" }
    symlisp_assert! { program: "(nand TRUE TRUE)", result: "NIL" }
    symlisp_assert! { program: "(nand TRUE nil)", result: "TRUE" }
    symlisp_assert! { program: "(nor nil nil)", result: "TRUE" }
    symlisp_assert! { program: "(nor nil 1)", result: "NIL" }
    Ok(())
}

#[test]
fn test_variables() -> Result<(), Error> {
    let (mut interp, _) = session("");
    symlisp_assert! { program: "foo", result: "TRUE" }
    symlisp_assert! { interp: interp, program: "(setq x 5) x", result: "5" }
    symlisp_assert! { interp: interp, program: "(unset x)", result: "TRUE" }
    assert!(!interp.is_bound("x"));
    symlisp_assert! { interp: interp, program: "x", result: "TRUE" }

    symlisp_assert! { interp: interp, program: "(setq name 'y) (set name 7) y", result: "7" }
    symlisp_assert! { interp: interp, program: "(setq l '(1 2 3)) (car l)", result: "1" }
    symlisp_assert! { interp: interp, program: "l", result: "(1 2 3)" }

    symlisp_assert! { program: "(setq 5 1)", error: "5 is not a valid identifier" }
    symlisp_assert! { program: "(set \"s\" 1)", error: "s is not a valid identifier" }
    symlisp_assert! { program: "(unset 5)", error: "5 is not a valid id" }
    Ok(())
}

#[test]
fn test_functions() -> Result<(), Error> {
    let (mut interp, _) = session("");
    symlisp_assert! { interp: interp, program: "(defun sq (n) (* n n))", result: "sq" }
    assert!(interp.is_defined("sq"));
    symlisp_assert! { interp: interp, program: "(sq 7)", result: "49" }
    symlisp_assert! { interp: interp, program: "(sq 1 2)", error: "sq requires 1 arguments" }
    symlisp_assert! { interp: interp, program: "(defun g () nil) (g)", result: "NIL" }

    symlisp_assert! { program: "(undefined 1)", error: "undefined is not defined" }
    symlisp_assert! { program: "(defun 5 (x) x)", error: "5 is not a valid identifier" }
    symlisp_assert! { program: "(defun f (x 1) x)", error: "(x 1) is not a list of ids" }

    // Arguments are evaluated exactly once.
    symlisp_assert! {
        interp: interp,
        program: "(setq c 0) (defun same (x) x) (same (setq c (+ c 1))) c",
        result: "1",
    }
    Ok(())
}

#[test]
fn test_recursion_purges_synthetic_bindings() -> Result<(), Error> {
    let (mut interp, _) = session("");
    symlisp_assert! {
        interp: interp,
        program: "(defun fact (n) (if (= n 0) 1 (* n (fact (- n 1))))) (fact 5)",
        result: "120",
    }
    assert!(interp.bound_names().all(|name| !name.starts_with('@')));
    symlisp_assert! { interp: interp, program: "(fact 30)", result: "265252859812191058636308480000000" }
    assert!(!interp.is_bound("@0"));
    symlisp_assert! { interp: interp, program: "(+ 1 1)", result: "2" }
    Ok(())
}

#[test]
fn test_failed_call_purges_synthetic_bindings() -> Result<(), Error> {
    let (mut interp, _) = session("");
    symlisp_assert! { interp: interp, program: "(defun f (n) (car n))", result: "f" }
    symlisp_assert! { interp: interp, program: "(f 5)", error: "5 is not a list" }
    assert!(interp.bound_names().all(|name| !name.starts_with('@')));
    symlisp_assert! { interp: interp, program: "((lambda (x) x))", error: "@0 requires 1 arguments" }
    Ok(())
}

#[test]
fn test_lambda() -> Result<(), Error> {
    let (mut interp, _) = session("");
    symlisp_assert! { interp: interp, program: "((lambda (x y) (+ x y)) 3 4)", result: "7" }
    assert!(!interp.is_defined("@0"));
    symlisp_assert! { program: "(lambda (x) x)", error: "LAMBDA must be applied to its arguments" }
    symlisp_assert! { program: "((lambda (x) x))", error: "@0 requires 1 arguments" }
    Ok(())
}

#[test]
fn test_let() -> Result<(), Error> {
    let (mut interp, _) = session("");
    symlisp_assert! { interp: interp, program: "(let ((a 2) (b 3)) ((* a b)))", result: "6" }
    assert!(!interp.is_bound("a"));
    symlisp_assert! {
        interp: interp,
        program: "(let ((a 1)) ((setq r (+ a 1)) (* r 10)))",
        result: "20",
    }
    symlisp_assert! { program: "(let () (+ 1 2))", result: "3" }
    symlisp_assert! {
        program: "(let ((1 2)) (a))",
        error: "The first argument to let must be a list of pairs (id value)",
    }
    symlisp_assert! { program: "(let 5 (a))", error: "5 is not a list" }
    Ok(())
}

#[test]
fn test_quote() -> Result<(), Error> {
    symlisp_assert! { program: "(quote (a b c))", result: "(a b c)" }
    symlisp_assert! { program: "'(a b c)", result: "(a b c)" }
    symlisp_assert! { program: "''x", result: "x" }
    symlisp_assert! { program: "'(a 'b c)", result: "(a'b c)" }
    symlisp_assert! { program: "(eval (+ 1 2))", result: "3" }
    // EVAL evaluates its operand once, so a quoted form comes back as data.
    symlisp_assert! { program: "(eval '(+ 1 2))", result: "(+ 1 2)" }
    symlisp_assert! { program: r#""hello""#, result: r#""hello""# }
    Ok(())
}

#[test]
fn test_lists() -> Result<(), Error> {
    symlisp_assert! { program: "(car '(a b c))", result: "a" }
    symlisp_assert! { program: "(cdr '(a b c))", result: "(b c)" }
    symlisp_assert! { program: "(cadr '(a b c))", result: "(b c)" }
    symlisp_assert! { program: "(caddr '(a b c))", result: "(b c)" }
    symlisp_assert! { program: "(car nil)", result: "NIL" }
    symlisp_assert! { program: "(cdr ())", result: "NIL" }
    symlisp_assert! { program: "(count '(a b c))", result: "3" }
    symlisp_assert! { program: "(count nil)", result: "0" }
    symlisp_assert! { program: "(append '(a b) '(c d))", result: "(a b c d)" }
    symlisp_assert! { program: "(append nil '(c))", result: "(c)" }
    symlisp_assert! { program: "(push 'x '(a b))", result: "(x a b)" }
    symlisp_assert! { program: "(car (push 'x '(a b)))", result: "x" }
    symlisp_assert! { program: "(cdr (push 'x '(a b)))", result: "(a b)" }
    symlisp_assert! { program: "(cons 1 nil)", result: "(1)" }
    symlisp_assert! { program: "(reverse '(1 2 3))", result: "(3 2 1)" }
    symlisp_assert! { program: "(reverse (reverse '(1 (2 3) 4)))", result: "(1 (2 3) 4)" }
    symlisp_assert! { program: "(member? 'b '(a b c))", result: "TRUE" }
    symlisp_assert! { program: "(memberp 'z '(a b c))", result: "NIL" }
    symlisp_assert! { program: "(list 1 (+ 1 1) \"x\")", result: "(1 2 x)" }
    symlisp_assert! { program: "(1 2 (+ 1 2))", result: "(1 2 3)" }
    symlisp_assert! { program: r#"("a" (+ 1 2))"#, result: "(a 3)" }

    symlisp_assert! { program: "(atom? 'a)", result: "TRUE" }
    symlisp_assert! { program: "(atom? '(a))", result: "NIL" }
    symlisp_assert! { program: "(atom? nil)", result: "TRUE" }
    symlisp_assert! { program: "(list? nil)", result: "TRUE" }
    symlisp_assert! { program: "(listp '(1))", result: "TRUE" }
    symlisp_assert! { program: "(list? 5)", result: "NIL" }
    symlisp_assert! { program: "(number? 5)", result: "TRUE" }
    symlisp_assert! { program: r#"(string? "s")"#, result: "TRUE" }
    symlisp_assert! { program: "(string? 's)", result: "NIL" }

    symlisp_assert! { program: "(car 5)", error: "5 is not a list" }
    symlisp_assert! { program: "(append '(a) 5)", error: "5 is not a list" }
    symlisp_assert! { program: "(push 1 2)", error: "2 is not a list" }
    symlisp_assert! { program: "(append '(a))", error: "There is no help about APPEND at this moment" }
    symlisp_assert! { program: "(car)", error: "CAR: missing argument 1" }
    Ok(())
}

#[test]
fn test_control_flow() -> Result<(), Error> {
    symlisp_assert! { program: "(if nil 1 2)", result: "2" }
    symlisp_assert! { program: "(if 0 1 2)", result: "1" }
    symlisp_assert! { program: "(if (> 1 2) (undefinedfn) 3)", result: "3" }
    symlisp_assert! { program: "(cond ((nil 1) (TRUE 2)))", result: "2" }
    symlisp_assert! { program: "(cond ((nil 1)))", result: "NIL" }
    symlisp_assert! { program: "(cond 5)", error: "5 is not a list" }
    symlisp_assert! { program: "(cond ((TRUE 1 2)))", error: "Bad case in conditional: (TRUE 1 2)" }

    symlisp_assert! {
        program: "(setq i 0) (setq s 0) (while (< i 5) ((setq s (+ s i)) (setq i (+ i 1)))) s",
        result: "10",
    }
    symlisp_assert! { program: "(while nil ((undefinedfn)))", result: "NIL" }
    symlisp_assert! { program: "(setq i 0) (do ((setq i (+ i 1))) (< i 3)) i", result: "3" }
    symlisp_assert! { program: "(setq i 10) (do ((setq i (+ i 1))) nil)", result: "11" }
    symlisp_assert! {
        program: "(setq s 0) (for ((setq i 0) (< i 4) (setq i (+ i 1))) ((setq s (+ s i)))) s",
        result: "6",
    }
    symlisp_assert! {
        program: "(for (a b) (c))",
        error: "for expects a list of three elements as its first argument",
    }
    symlisp_assert! {
        program: "(defun double (x) (* 2 x)) (for-list '(1 2 3) double)",
        result: "(2 4 6)",
    }
    symlisp_assert! { program: "(for_list (1 2 3) number?)", result: "(TRUE TRUE TRUE)" }
    symlisp_assert! { program: "(block (setq a 1) (+ a 1))", result: "2" }
    symlisp_assert! { program: "(block)", result: "NIL" }
    Ok(())
}

#[test]
fn test_dispatch_errors() -> Result<(), Error> {
    symlisp_assert! { program: "(nil 1)", error: "NIL is not a valid function" }
    symlisp_assert! { program: "(quit 1)", error: "QUIT is not a valid function" }
    symlisp_assert! { program: "(#x 1)", error: "#x is not a valid symbol" }
    symlisp_assert! { program: "(TRUE 1)", error: "Undefined: TRUE" }
    symlisp_assert! { program: "(false)", error: "Undefined: FALSE" }
    symlisp_assert! { program: "((a) 1)", error: "Undefined: (a)" }
    Ok(())
}

#[test]
fn test_error_backtrace() {
    let (mut interp, _) = session("");
    let err = interp.eval_string("(+ 1 (car 5))").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EvaluationFailure);
    let formatted = err.format();
    assert!(formatted.starts_with("ERR EvaluationFailure: 5 is not a list"));
    assert!(formatted.contains("at (CAR 5)"));
    assert!(formatted.contains("at (+ 1 (CAR 5))"));
}

#[test]
fn test_facts_and_rules() -> Result<(), Error> {
    let (mut interp, _) = session("");
    symlisp_assert! { interp: interp, program: "(. socrates)", result: "socrates" }
    assert!(interp.facts().contains(&Symbol::id("socrates")));
    symlisp_assert! { interp: interp, program: "(dot mortal (man X))", result: "(mortal (man X))" }
    assert_eq!(interp.rules().len(), 1);
    assert!(interp.rules().iter().any(|rule| rule.to_string() == "(mortal (man X))"));
    symlisp_assert! { interp: interp, program: "(.)", error: "dot expects at least one argument" }
    Ok(())
}

#[test]
fn test_clear() -> Result<(), Error> {
    let (mut interp, _) = session("");
    symlisp_assert! { interp: interp, program: "(setq a 1) (defun f () 1) (clear)", result: "TRUE" }
    assert!(!interp.is_bound("a"));
    assert!(!interp.is_defined("f"));
    Ok(())
}

#[test]
fn test_exit() {
    let (mut interp, _) = session("");
    let err = interp.eval_string("(+ 1 exit)").unwrap_err();
    assert!(err.is_exit());

    let (mut interp, out) = session("(+ 1 2)\nquit\n(+ 3 4)\n");
    assert_eq!(interp.evaluate_one(), Flow::Continue);
    assert_eq!(interp.evaluate_one(), Flow::Exit);
    assert_eq!(out.text(), "3\n");
}

#[test]
fn test_evaluate_one_output() {
    let (mut interp, out) = session("(+ 1 2)\n\"hi\"\n'(a 'b)\n(car 5)\n)\n");
    for _ in 0..5 {
        assert_eq!(interp.evaluate_one(), Flow::Continue);
    }
    assert_eq!(interp.evaluate_one(), Flow::End);
    assert_eq!(
        out.text(),
        "3\n\"hi\"\n(a'b)\n5 is not a list\n\
         PARSER ERROR: unmatched right parenthesis\nINVALID\n"
    );
}

#[test]
fn test_unterminated_input() {
    let (mut interp, out) = session("(+ 1\n");
    assert_eq!(interp.evaluate_one(), Flow::End);
    assert_eq!(out.text(), "PARSER ERROR: unexpected end of input\n");
}

#[test]
fn test_trailing_quote() {
    let (mut interp, out) = session("'");
    assert_eq!(interp.evaluate_one(), Flow::End);
    assert_eq!(out.text(), "PARSER ERROR: nothing to quote\n");
}

#[test]
fn test_write() -> Result<(), Error> {
    let (mut interp, out) = session("");
    symlisp_assert! { interp: interp, program: r#"(write 1 "a" (+ 1 1) '(x y))"#, result: "TRUE" }
    assert_eq!(out.text(), "1 a 2 (x y) \n");

    symlisp_assert! { program: "(write)", output: "\n" }
    symlisp_assert! { program: "(block (write 1) (write 2))", output: "1 \n2 \n" }
    symlisp_assert! { program: "(for-list '(1 2) write)", output: "1 \n2 \n" }
    Ok(())
}

#[test]
fn test_read() {
    let (mut interp, out) = session("(read)\n(+ 40 2)\n(read \"number?\")\n7\n");
    assert_eq!(interp.evaluate_one(), Flow::Continue);
    assert_eq!(interp.evaluate_one(), Flow::Continue);
    assert_eq!(interp.evaluate_one(), Flow::End);
    assert_eq!(out.text(), "42\nnumber?\n7\n");
}

#[test]
fn test_trace() -> Result<(), Error> {
    let (mut interp, out) = session("");
    symlisp_assert! { interp: interp, program: "(trace TRUE)", result: "TRUE" }
    assert!(interp.trace_enabled());
    symlisp_assert! { interp: interp, program: "(+ 1 2)", result: "3" }
    let text = out.text();
    assert!(text.contains("function: +, expression: (+ 1 2)\n"));
    assert!(text.contains("atom: 1, value: 1\n"));
    assert!(text.contains("function: +, value: 3\n"));
    symlisp_assert! { interp: interp, program: "(trace nil)", result: "TRUE" }
    assert!(!interp.trace_enabled());
    Ok(())
}

#[test]
fn test_load() -> Result<(), Error> {
    let path = std::env::temp_dir().join(format!("symlisp-load-{}.lisp", std::process::id()));
    std::fs::write(
        &path,
        ";; definitions\n(setq loaded 42)\n(defun inc (x)\n  (+ x 1))\n",
    )
    .unwrap();
    let path = path.to_string_lossy().into_owned();

    let (mut interp, out) = session("");
    symlisp_assert! { interp: interp, program: &format!(r#"(load "{}")"#, path), result: "TRUE" }
    assert!(interp.is_bound("loaded"));
    assert!(!interp.trace_enabled());
    assert!(out.text().contains("function: SETQ"));
    symlisp_assert! { interp: interp, program: "(inc loaded)", result: "43" }
    std::fs::remove_file(&path).unwrap();

    symlisp_assert! { interp: interp, program: r#"(load "/nonexistent/symlisp.lisp")"#, result: "TRUE" }
    symlisp_assert! {
        interp: interp,
        program: "(load foo)",
        error: "Load expects the name of a file as an argument",
    }
    Ok(())
}
