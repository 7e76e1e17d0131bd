pub mod instruction;
pub mod operation;
pub mod priority;

pub use instruction::{Directive, Function, Instruction, InstructionKind, Operator, POSITIONAL};
pub use operation::Operation;
pub use priority::Priority;
