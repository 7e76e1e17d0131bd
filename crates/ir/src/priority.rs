/// Precedence tiers shared by the parser and the pretty-printer, weakest
/// binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Logical,
    Compare,
    AddSubtract,
    MultiplyDivide,
    Function,
    Unary,
}
