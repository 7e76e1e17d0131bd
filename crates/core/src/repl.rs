use opal_parser::parse;
use opal_vm::evaluate_at;

use std::io::{stdin, stdout, BufRead, Write};

/// State carried between REPL lines.
#[derive(Debug, Default)]
pub struct Session {
    pub x: f64,
}

impl Session {
    /// Handles one line of input, returning what to print. `:x <value>` sets
    /// the positional parameter; anything else is evaluated.
    pub fn execute(&mut self, input: &str) -> Option<String> {
        let input = input.trim();

        if input.is_empty() {
            return None;
        }

        if let Some(value) = input.strip_prefix(":x") {
            let value = value.trim();

            return Some(match value.parse::<f64>() {
                Ok(x) => {
                    self.x = x;
                    format!("x = {}", x)
                }
                Err(_) => format!("invalid value for x: '{}'", value),
            });
        }

        Some(
            match parse(input).and_then(|operation| evaluate_at(&operation, self.x)) {
                Ok(value) => value.to_string(),
                Err(err) => format!("<stdin>:{}", err),
            },
        )
    }
}

pub fn start() -> std::io::Result<()> {
    run(stdin().lock(), stdout())
}

pub fn run(mut reader: impl BufRead, mut writer: impl Write) -> std::io::Result<()> {
    let mut session = Session::default();

    loop {
        let mut input = String::new();

        write!(writer, ">> ")?;
        writer.flush()?;

        if reader.read_line(&mut input)? == 0 {
            break;
        }

        handle_multi_line(&mut reader, &mut writer, &mut input)?;

        if let Some(output) = session.execute(&input) {
            writeln!(writer, "{}", output)?;
        }
    }

    Ok(())
}

/// Keeps reading while parentheses are left open.
fn handle_multi_line(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    input: &mut String,
) -> std::io::Result<()> {
    let mut open = input.chars().filter(|&c| c == '(').count();

    let mut close = input.chars().filter(|&c| c == ')').count();

    while open > close {
        write!(writer, ".. ")?;
        writer.flush()?;

        let mut input_nest = String::new();

        if reader.read_line(&mut input_nest)? == 0 {
            break;
        }

        *input += input_nest.as_str();

        open += input_nest.chars().filter(|&c| c == '(').count();

        close += input_nest.chars().filter(|&c| c == ')').count();
    }

    Ok(())
}
