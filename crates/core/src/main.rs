use opal_core::cli::{Command, CLI};
use opal_core::{repl, runner};

use clap::Parser;
use rustc_hash::FxHashMap;

use std::io;

use std::process::exit;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = CLI::parse();

    match cli.command {
        Command::Eval {
            expression,
            x,
            variables,
        } => {
            let variables: FxHashMap<String, String> = variables.into_iter().collect();

            match runner::eval(&expression, x, &variables) {
                Ok(value) => println!("{}", value),
                Err(err) => {
                    eprintln!("<expression>:{}", err);
                    exit(1)
                }
            }
        }

        Command::Compile { expression, output } => {
            runner::compile_file(&expression, &output).unwrap_or_else(|err| {
                eprintln!("{}", err);
                exit(1)
            })
        }

        Command::Disassemble { file_path } => match runner::disassemble_file(&file_path) {
            Ok(listing) => print!("{}", listing),
            Err(err) => {
                eprintln!("{}: {}", file_path.display(), err);
                exit(1)
            }
        },

        Command::Render {
            expression,
            language,
        } => match runner::render_expression(&expression, language.profile()) {
            Ok(source) => println!("{}", source),
            Err(err) => {
                eprintln!("<expression>:{}", err);
                exit(1)
            }
        },

        Command::Declare {
            file_path,
            language,
        } => match runner::declare_file(&file_path, language.profile()) {
            Ok(report) => println!("{}", report),
            Err(err) => {
                eprintln!("{}", err);
                exit(1)
            }
        },

        Command::Repl => repl::start()?,
    }

    Ok(())
}
