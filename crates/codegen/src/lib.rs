//! Renders operations back to source text for a target language.

mod profile;

pub use profile::LanguageProfile;

use opal_errors::OpalError;
use opal_ir::{Directive, Instruction, InstructionKind, Operation, Priority};

/// A partially rendered expression.
struct Fragment {
    text: String,
    /// Display priority of the outermost construct; `None` for atoms.
    priority: Option<Priority>,
    /// Set for fragments that are a single literal.
    value: Option<f64>,
}

impl Fragment {
    fn atom(text: String) -> Fragment {
        Fragment {
            text,
            priority: None,
            value: None,
        }
    }

    fn binds_looser(&self, than: Priority, or_equal: bool) -> bool {
        match self.priority {
            None => false,
            Some(priority) => priority < than || (or_equal && priority == than),
        }
    }

    fn wrapped(self, parenthesize: bool) -> String {
        if parenthesize {
            format!("({})", self.text)
        } else {
            self.text
        }
    }
}

/// Renders `operation` as source text in `profile`'s syntax. Directives become
/// one `sprite.<target> = <value>` line each; a trailing expression, if any,
/// follows on the last line without a statement terminator.
///
/// Only the parentheses needed to re-parse into the same operation are
/// emitted.
pub fn render(operation: &Operation, profile: &LanguageProfile) -> Result<String, OpalError> {
    let mut stack: Vec<Fragment> = Vec::with_capacity(operation.len());
    let mut lines = Vec::new();

    for (position, instruction) in operation.iter().enumerate() {
        let mut pop = || {
            stack
                .pop()
                .ok_or_else(|| OpalError::underflow(position, instruction))
        };

        match instruction {
            Instruction::Constant(value) => {
                let fragment = literal(instruction.kind(), *value, profile)?;
                stack.push(fragment);
            }

            Instruction::Variable(name) => stack.push(Fragment::atom(name.clone())),

            Instruction::Directive(directive) => {
                let value = pop()?;
                lines.push(statement(directive, value, profile));
            }

            _ => {
                let mut arguments = Vec::with_capacity(instruction.arity());

                for _ in 0..instruction.arity() {
                    arguments.push(pop()?);
                }

                arguments.reverse();

                let fragment = combine(instruction, arguments, profile);
                stack.push(fragment);
            }
        }
    }

    if stack.len() > 1 {
        return Err(OpalError::Unbalanced {
            remaining: stack.len(),
        });
    }

    if let Some(fragment) = stack.pop() {
        lines.push(fragment.text);
    }

    Ok(lines.join("\n"))
}

fn literal(
    kind: InstructionKind,
    value: f64,
    profile: &LanguageProfile,
) -> Result<Fragment, OpalError> {
    if let Some(spelling) = profile.spelling(kind) {
        return Ok(Fragment {
            value: Some(value),
            ..Fragment::atom(spelling.to_owned())
        });
    }

    if !value.is_finite() {
        return Err(OpalError::Encode {
            content: format!("constant {} as {} source", value, profile.name),
        });
    }

    let mut text = value.to_string();

    if value.fract() != 0.0 {
        if let Some(suffix) = profile.float_suffix {
            text.push_str(suffix);
        }
    }

    Ok(Fragment {
        text,
        priority: value.is_sign_negative().then_some(Priority::Unary),
        value: Some(value),
    })
}

fn combine(
    instruction: &Instruction,
    mut arguments: Vec<Fragment>,
    profile: &LanguageProfile,
) -> Fragment {
    let name = profile.spelling(instruction.kind()).unwrap_or_default();
    let priority = profile.priority(instruction).unwrap_or(Priority::Function);

    let text = match (priority, arguments.len()) {
        (Priority::Function, _) => {
            let arguments: Vec<_> = arguments.into_iter().map(|a| a.text).collect();

            format!("{}({})", name, arguments.join(", "))
        }

        (_, 1) => {
            let operand = arguments.remove(0);
            let parenthesize = operand.binds_looser(Priority::Function, false)
                || operand.text.starts_with('-');

            format!("{}{}", name, operand.wrapped(parenthesize))
        }

        _ => {
            let right = arguments.remove(1);
            let left = arguments.remove(0);

            let parenthesize_left = left.binds_looser(priority, false);
            let parenthesize_right = right.binds_looser(priority, true);

            format!(
                "{} {} {}",
                left.wrapped(parenthesize_left),
                name,
                right.wrapped(parenthesize_right)
            )
        }
    };

    Fragment {
        text,
        priority: Some(priority),
        value: None,
    }
}

fn statement(directive: &Directive, value: Fragment, profile: &LanguageProfile) -> String {
    let target = match directive {
        Directive::Variable(name) => format!("sprite.Variables[{:?}]", name),
        _ => {
            let kind = Instruction::Directive(directive.clone()).kind();

            profile.spelling(kind).unwrap_or_default().to_owned()
        }
    };

    let value = match (directive, value.value.and_then(Directive::direction_name)) {
        (Directive::Direction, Some(keyword)) => keyword.to_owned(),
        _ => value.text,
    };

    format!("{} = {}{}", target, value, profile.statement_end)
}
