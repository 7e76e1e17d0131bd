use crate::priority::Priority;

use derive_more::Display;

use std::f64::consts::{E, PI};

/// Name of the positional parameter.
pub const POSITIONAL: &str = "x";

#[derive(Debug, Display, Clone, PartialEq)]
pub enum Instruction {
    #[display(fmt = "Constant {}", _0)]
    Constant(f64),

    #[display(fmt = "Variable {}", _0)]
    Variable(String),

    #[display(fmt = "{}", _0)]
    Operator(Operator),

    Negative,

    #[display(fmt = "{}", _0)]
    Function(Function),

    #[display(fmt = "{}", _0)]
    Directive(Directive),
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Cos,
    Sin,
    Sqrt,
    Min,
    Max,
    /// Reserved for a caller-side scaling convention; evaluates as identity.
    Zoom,
}

/// Sprite-scripting directives. Each pops one value and writes it into the
/// sprite being evaluated instead of pushing a result.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Directive {
    #[display(fmt = "SpriteDirection")]
    Direction,

    #[display(fmt = "SpriteVariable {:?}", _0)]
    Variable(String),

    #[display(fmt = "SpriteHitboxTop")]
    HitboxTop,

    #[display(fmt = "SpriteAnimation")]
    Animation,
}

/// Payload-free mirror of [`Instruction`], used to key lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Constant,
    Pi,
    E,
    Variable,
    NamedVariable,

    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,

    Negative,

    Cos,
    Sin,
    Sqrt,
    Min,
    Max,
    Zoom,

    SpriteVariable,
    SpriteDirection,
    SpriteAnimation,
    SpriteHitboxTop,
}

impl InstructionKind {
    pub const ALL: [InstructionKind; 21] = [
        InstructionKind::Constant,
        InstructionKind::Pi,
        InstructionKind::E,
        InstructionKind::Variable,
        InstructionKind::NamedVariable,
        InstructionKind::Add,
        InstructionKind::Subtract,
        InstructionKind::Multiply,
        InstructionKind::Divide,
        InstructionKind::Pow,
        InstructionKind::Negative,
        InstructionKind::Cos,
        InstructionKind::Sin,
        InstructionKind::Sqrt,
        InstructionKind::Min,
        InstructionKind::Max,
        InstructionKind::Zoom,
        InstructionKind::SpriteVariable,
        InstructionKind::SpriteDirection,
        InstructionKind::SpriteAnimation,
        InstructionKind::SpriteHitboxTop,
    ];

    /// Generic source spelling. Kinds spelled by their payload (literal
    /// constants and variable names) have none.
    pub fn symbol(&self) -> Option<&'static str> {
        Some(match self {
            InstructionKind::Constant
            | InstructionKind::Variable
            | InstructionKind::NamedVariable
            | InstructionKind::SpriteVariable => return None,

            InstructionKind::Pi => "pi",
            InstructionKind::E => "e",

            InstructionKind::Add => "+",
            InstructionKind::Subtract => "-",
            InstructionKind::Multiply => "*",
            InstructionKind::Divide => "/",
            InstructionKind::Pow => "^",

            InstructionKind::Negative => "-",

            InstructionKind::Cos => "cos",
            InstructionKind::Sin => "sin",
            InstructionKind::Sqrt => "sqrt",
            InstructionKind::Min => "min",
            InstructionKind::Max => "max",
            InstructionKind::Zoom => "zoom",

            InstructionKind::SpriteDirection => "sprite.Direction",
            InstructionKind::SpriteAnimation => "sprite.Animation",
            InstructionKind::SpriteHitboxTop => "sprite.Hitbox.Top",
        })
    }
}

impl Operator {
    pub fn priority(&self) -> Priority {
        match self {
            Operator::Add | Operator::Subtract => Priority::AddSubtract,
            Operator::Multiply | Operator::Divide | Operator::Pow => Priority::MultiplyDivide,
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Pow => left.powf(right),
        }
    }
}

impl Function {
    pub fn from_name(name: &str) -> Option<Function> {
        Some(match name {
            "cos" => Function::Cos,
            "sin" => Function::Sin,
            "sqrt" => Function::Sqrt,
            "min" => Function::Min,
            "max" => Function::Max,
            "zoom" => Function::Zoom,
            _ => return None,
        })
    }

    pub fn arity(&self) -> usize {
        match self {
            Function::Min | Function::Max => 2,
            Function::Cos | Function::Sin | Function::Sqrt | Function::Zoom => 1,
        }
    }
}

impl Directive {
    pub const LEFT_DIRECTION: f64 = 0.0;
    pub const RIGHT_DIRECTION: f64 = 1.0;

    /// Value of a direction keyword accepted on the right of `sprite.Direction`.
    pub fn direction_keyword(name: &str) -> Option<f64> {
        match name {
            "LeftDirection" => Some(Directive::LEFT_DIRECTION),
            "RightDirection" => Some(Directive::RIGHT_DIRECTION),
            _ => None,
        }
    }

    /// Inverse of [`Directive::direction_keyword`] for exact keyword values.
    pub fn direction_name(value: f64) -> Option<&'static str> {
        if value == Directive::LEFT_DIRECTION {
            Some("LeftDirection")
        } else if value == Directive::RIGHT_DIRECTION {
            Some("RightDirection")
        } else {
            None
        }
    }
}

impl Instruction {
    pub fn variable(name: &str) -> Instruction {
        Instruction::Variable(name.to_owned())
    }

    pub fn positional() -> Instruction {
        Instruction::variable(POSITIONAL)
    }

    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Constant(value) if value.to_bits() == PI.to_bits() => InstructionKind::Pi,
            Instruction::Constant(value) if value.to_bits() == E.to_bits() => InstructionKind::E,
            Instruction::Constant(_) => InstructionKind::Constant,

            Instruction::Variable(name) if name == POSITIONAL => InstructionKind::Variable,
            Instruction::Variable(_) => InstructionKind::NamedVariable,

            Instruction::Operator(Operator::Add) => InstructionKind::Add,
            Instruction::Operator(Operator::Subtract) => InstructionKind::Subtract,
            Instruction::Operator(Operator::Multiply) => InstructionKind::Multiply,
            Instruction::Operator(Operator::Divide) => InstructionKind::Divide,
            Instruction::Operator(Operator::Pow) => InstructionKind::Pow,

            Instruction::Negative => InstructionKind::Negative,

            Instruction::Function(Function::Cos) => InstructionKind::Cos,
            Instruction::Function(Function::Sin) => InstructionKind::Sin,
            Instruction::Function(Function::Sqrt) => InstructionKind::Sqrt,
            Instruction::Function(Function::Min) => InstructionKind::Min,
            Instruction::Function(Function::Max) => InstructionKind::Max,
            Instruction::Function(Function::Zoom) => InstructionKind::Zoom,

            Instruction::Directive(Directive::Direction) => InstructionKind::SpriteDirection,
            Instruction::Directive(Directive::Variable(_)) => InstructionKind::SpriteVariable,
            Instruction::Directive(Directive::HitboxTop) => InstructionKind::SpriteHitboxTop,
            Instruction::Directive(Directive::Animation) => InstructionKind::SpriteAnimation,
        }
    }

    /// Generic spelling, see [`InstructionKind::symbol`].
    pub fn symbol(&self) -> Option<&'static str> {
        self.kind().symbol()
    }

    /// Evaluation priority class. Operands (constants and variables) have none.
    pub fn priority(&self) -> Option<Priority> {
        match self {
            Instruction::Constant(_) | Instruction::Variable(_) => None,
            Instruction::Operator(operator) => Some(operator.priority()),
            Instruction::Negative => Some(Priority::Unary),
            Instruction::Function(_) => Some(Priority::Function),
            Instruction::Directive(_) => Some(Priority::Logical),
        }
    }

    /// Number of values popped.
    pub fn arity(&self) -> usize {
        match self {
            Instruction::Constant(_) | Instruction::Variable(_) => 0,
            Instruction::Operator(_) => 2,
            Instruction::Negative => 1,
            Instruction::Function(function) => function.arity(),
            Instruction::Directive(_) => 1,
        }
    }

    pub fn pushes(&self) -> bool {
        !matches!(self, Instruction::Directive(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn symbolic_constants_need_exact_values() {
        assert_eq!(Instruction::Constant(PI).kind(), InstructionKind::Pi);
        assert_eq!(Instruction::Constant(E).kind(), InstructionKind::E);
        assert_eq!(
            Instruction::Constant(3.14159).kind(),
            InstructionKind::Constant
        );
        assert_eq!(Instruction::Constant(PI).symbol(), Some("pi"));
        assert_eq!(Instruction::Constant(2.0).symbol(), None);
    }

    #[test]
    fn variables_split_positional_and_named() {
        assert_eq!(Instruction::positional().kind(), InstructionKind::Variable);
        assert_eq!(
            Instruction::variable("speed").kind(),
            InstructionKind::NamedVariable
        );
    }

    #[test]
    fn all_lists_every_kind_once() {
        let kinds: HashSet<_> = InstructionKind::ALL.iter().collect();

        assert_eq!(kinds.len(), InstructionKind::ALL.len());
    }

    #[test]
    fn arities_match_declared_functions() {
        assert_eq!(Instruction::Function(Function::Min).arity(), 2);
        assert_eq!(Instruction::Function(Function::Zoom).arity(), 1);
        assert_eq!(Instruction::Directive(Directive::HitboxTop).arity(), 1);
        assert!(!Instruction::Directive(Directive::Animation).pushes());
    }

    #[test]
    fn pow_evaluates_with_product_priority() {
        assert_eq!(Operator::Pow.priority(), Priority::MultiplyDivide);
        assert_eq!(
            Instruction::Negative.priority(),
            Some(Priority::Unary)
        );
    }

    #[test]
    fn displays_for_listings() {
        assert_eq!(Instruction::Constant(1.5).to_string(), "Constant 1.5");
        assert_eq!(Instruction::Operator(Operator::Pow).to_string(), "Pow");
        assert_eq!(
            Instruction::Directive(Directive::Variable("Angle".to_owned())).to_string(),
            "SpriteVariable \"Angle\""
        );
    }
}
