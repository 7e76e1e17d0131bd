use crate::instruction::Instruction;

use opal_errors::OpalError;

use thin_vec::ThinVec;

/// An immutable instruction sequence in postfix order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    instructions: ThinVec<Instruction>,
}

impl Operation {
    pub fn new(instructions: ThinVec<Instruction>) -> Operation {
        Operation { instructions }
    }

    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// True when the program ends in a sprite directive, so it produces no
    /// numeric result.
    pub fn is_declaration(&self) -> bool {
        self.instructions.last().is_some_and(|i| !i.pushes())
    }

    /// Walks the stack depth through the sequence. Returns the final depth,
    /// which is 0 or 1 for a well-formed operation.
    pub fn validate(&self) -> Result<usize, OpalError> {
        let mut depth = 0usize;

        for (position, instruction) in self.instructions.iter().enumerate() {
            depth = depth
                .checked_sub(instruction.arity())
                .ok_or_else(|| OpalError::underflow(position, instruction))?;

            if instruction.pushes() {
                depth += 1;
            }
        }

        if depth > 1 {
            return Err(OpalError::Unbalanced { remaining: depth });
        }

        Ok(depth)
    }
}

impl FromIterator<Instruction> for Operation {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Operation::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Operation {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{Directive, Function, Operator};

    #[test]
    fn balanced_expression_leaves_one_value() {
        let op: Operation = [
            Instruction::Constant(2.0),
            Instruction::positional(),
            Instruction::Operator(Operator::Multiply),
            Instruction::Function(Function::Cos),
        ]
        .into_iter()
        .collect();

        assert_eq!(op.validate(), Ok(1));
        assert!(!op.is_declaration());
    }

    #[test]
    fn declarations_leave_nothing() {
        let op: Operation = [
            Instruction::Constant(4.0),
            Instruction::Directive(Directive::HitboxTop),
        ]
        .into_iter()
        .collect();

        assert_eq!(op.validate(), Ok(0));
        assert!(op.is_declaration());
    }

    #[test]
    fn reports_underflow_position() {
        let op: Operation = [
            Instruction::Constant(1.0),
            Instruction::Operator(Operator::Add),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            op.validate(),
            Err(OpalError::StackUnderflow {
                position: 1,
                instruction: "Add".to_owned(),
            })
        );
    }

    #[test]
    fn reports_leftover_values() {
        let op: Operation = [Instruction::Constant(1.0), Instruction::Constant(2.0)]
            .into_iter()
            .collect();

        assert_eq!(op.validate(), Err(OpalError::Unbalanced { remaining: 2 }));
    }

    #[test]
    fn operations_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Operation>();
    }
}
