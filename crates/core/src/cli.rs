use opal_codegen::LanguageProfile;

use clap::{Parser, Subcommand, ValueEnum};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opal", version)]
pub struct CLI {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Evaluate an expression and print the result")]
    Eval {
        expression: String,

        /// Value of the positional parameter.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,

        /// Legacy variable binding, may be repeated.
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
        variables: Vec<(String, String)>,
    },

    #[command(about = "Compile an expression to a bytecode file")]
    Compile {
        expression: String,

        #[arg(long, short)]
        output: PathBuf,
    },

    #[command(about = "Disassemble the given bytecode file")]
    Disassemble { file_path: PathBuf },

    #[command(about = "Render an expression as source text")]
    Render {
        expression: String,

        #[arg(long, value_enum, default_value_t = Language::Generic)]
        language: Language,
    },

    #[command(about = "Run a sprite declaration file against a fresh sprite")]
    Declare {
        file_path: PathBuf,

        #[arg(long, value_enum, default_value_t = Language::Generic)]
        language: Language,
    },

    #[command(about = "Run in interactive mode")]
    Repl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Language {
    Generic,
    C,
    Swift,
    Javascript,
}

impl Language {
    pub fn profile(self) -> &'static LanguageProfile {
        match self {
            Language::Generic => LanguageProfile::generic(),
            Language::C => LanguageProfile::c(),
            Language::Swift => LanguageProfile::swift(),
            Language::Javascript => LanguageProfile::javascript(),
        }
    }
}

fn parse_binding(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_eval_flags() {
        let cli = CLI::parse_from([
            "opal", "eval", "2 * x", "--x", "-1.5", "--var", "hp=3", "--var", "name=",
        ]);

        let Command::Eval {
            expression,
            x,
            variables,
        } = cli.command
        else {
            panic!("not an eval command");
        };

        assert_eq!(expression, "2 * x");
        assert_eq!(x, -1.5);
        assert_eq!(
            variables,
            vec![
                ("hp".to_owned(), "3".to_owned()),
                ("name".to_owned(), String::new())
            ]
        );
    }

    #[test]
    fn rejects_bindings_without_a_name() {
        assert!(parse_binding("=3").is_err());
        assert!(parse_binding("hp").is_err());
    }

    #[test]
    fn languages_select_profiles() {
        let cli = CLI::parse_from(["opal", "render", "x", "--language", "javascript"]);

        let Command::Render { language, .. } = cli.command else {
            panic!("not a render command");
        };

        assert_eq!(language.profile().name, "JavaScript");
    }
}
