use std::env;
use std::io;
use std::process;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use symlisp::{Flow, Interpreter, LineSource};

const PROMPT: &str = ":: ";

/// Reads the interactive input one edited line at a time.
struct Editor {
    editor: DefaultEditor,
}

impl LineSource for Editor {
    fn next_line(&mut self) -> Option<String> {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
            Err(err) => {
                log::error!("failed to read input: {}", err);
                None
            }
        }
    }
}

fn main() {
    env_logger::init();

    let editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Could not initialize the line editor: {}", err);
            process::exit(1);
        }
    };
    let mut interp = Interpreter::with_io(Editor { editor }, io::stdout());

    for path in env::args().skip(1) {
        if let Err(err) = interp.load_file(&path) {
            if err.is_exit() {
                return;
            }
            println!("{}", err.format());
        }
    }

    loop {
        match interp.evaluate_one() {
            Flow::Continue => {}
            Flow::End => break,
            Flow::Exit => process::exit(0),
        }
    }
}
