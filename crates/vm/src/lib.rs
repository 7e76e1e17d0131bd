mod context;
mod sprite;
mod stack;

pub use context::{ExecutionContext, Warning};
pub use sprite::{Direction, SpriteInstance};

use stack::Stack;

use opal_errors::OpalError;
use opal_ir::{Function, Instruction, Operation, Operator};

use log::{trace, warn};

/// A stack slot. `None` is an absent value, produced by a legacy variable
/// that is missing or not numeric.
type Value = Option<f64>;

const STACK_SIZE: usize = 32;

/// Evaluates `operation` against `context`. An absent result, or a program
/// that leaves nothing on the stack, evaluates to `0.0`.
pub fn evaluate(operation: &Operation, context: &mut ExecutionContext) -> Result<f64, OpalError> {
    VirtualMachine::new()
        .run(operation, context)
        .map(|value| value.unwrap_or(0.0))
}

/// Evaluates `operation` with only the positional parameter set.
pub fn evaluate_at(operation: &Operation, x: f64) -> Result<f64, OpalError> {
    evaluate(operation, &mut ExecutionContext::new(x))
}

/// Stack machine executing operations. The stack allocation is reused across
/// runs, so batch callers should keep one machine per thread.
#[derive(Default)]
pub struct VirtualMachine {
    stack: Stack<Value, STACK_SIZE>,
}

impl VirtualMachine {
    pub fn new() -> VirtualMachine {
        VirtualMachine {
            stack: Stack::new(),
        }
    }

    /// Runs `operation` and returns the value left on top of the stack, if any.
    /// Every pop is checked, so decoded programs that would underflow fail
    /// with [`OpalError::StackUnderflow`].
    pub fn run(
        &mut self,
        operation: &Operation,
        context: &mut ExecutionContext,
    ) -> Result<Value, OpalError> {
        self.stack.clear();

        for (position, instruction) in operation.iter().enumerate() {
            trace!("{:>4} {}", position, instruction);

            match instruction {
                Instruction::Constant(value) => self.stack.push(Some(*value)),

                Instruction::Variable(name) => self.stack.push(context.lookup(name)),

                Instruction::Operator(operator) => {
                    self.binary_operation(*operator, position, instruction, context)?
                }

                Instruction::Negative => {
                    let value = self.pop(position, instruction)?;

                    self.stack.push(value.map(|value| -value));
                }

                Instruction::Function(function) => {
                    self.call_function(*function, position, instruction)?
                }

                Instruction::Directive(directive) => {
                    let value = self.pop(position, instruction)?;

                    context.apply(directive, value);
                }
            }
        }

        if self.stack.len() > 1 {
            warn!(
                "operation left {} values on the stack, using the top one",
                self.stack.len()
            );
        }

        Ok(self.stack.pop().flatten())
    }

    #[inline]
    fn pop(&mut self, position: usize, instruction: &Instruction) -> Result<Value, OpalError> {
        self.stack
            .pop()
            .ok_or_else(|| OpalError::underflow(position, instruction))
    }

    fn binary_operation(
        &mut self,
        operator: Operator,
        position: usize,
        instruction: &Instruction,
        context: &mut ExecutionContext,
    ) -> Result<(), OpalError> {
        let right = self.pop(position, instruction)?;

        let left = self.pop(position, instruction)?;

        self.stack.push(match (left, right) {
            (Some(_), Some(right)) if operator == Operator::Divide && right == 0.0 => {
                context.warn(Warning::DivisionByZero { position });

                Some(0.0)
            }

            (Some(left), Some(right)) => Some(operator.apply(left, right)),

            _ => None,
        });

        Ok(())
    }

    fn call_function(
        &mut self,
        function: Function,
        position: usize,
        instruction: &Instruction,
    ) -> Result<(), OpalError> {
        let value = match function {
            Function::Min | Function::Max => {
                let right = self.pop(position, instruction)?;

                let left = self.pop(position, instruction)?;

                match (left, right) {
                    (Some(left), Some(right)) if function == Function::Min => Some(left.min(right)),
                    (Some(left), Some(right)) => Some(left.max(right)),
                    (present, None) | (None, present) => present,
                }
            }

            Function::Cos => self.pop(position, instruction)?.map(f64::cos),
            Function::Sin => self.pop(position, instruction)?.map(f64::sin),
            Function::Sqrt => self.pop(position, instruction)?.map(f64::sqrt),
            Function::Zoom => self.pop(position, instruction)?,
        };

        self.stack.push(value);

        Ok(())
    }
}
