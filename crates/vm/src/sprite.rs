use rustc_hash::FxHashMap;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// `LeftDirection` is 0 and `RightDirection` is 1; anything below one
    /// half faces left.
    pub fn from_value(value: f64) -> Direction {
        if value < 0.5 {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Runtime state of a sprite that declaration programs write into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpriteInstance {
    pub direction: Direction,
    pub variables: FxHashMap<String, f64>,
    pub hitbox_top: f64,
    /// Index of the active animation.
    pub animation: Option<usize>,
}

impl SpriteInstance {
    pub fn new() -> SpriteInstance {
        SpriteInstance::default()
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }
}

impl fmt::Display for SpriteInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "direction: {:?}", self.direction)?;
        writeln!(f, "hitbox top: {}", self.hitbox_top)?;

        match self.animation {
            Some(index) => writeln!(f, "animation: {}", index)?,
            None => writeln!(f, "animation: none")?,
        }

        let mut names: Vec<_> = self.variables.keys().collect();
        names.sort();

        for name in names {
            writeln!(f, "variables[{:?}]: {}", name, self.variables[name])?;
        }

        Ok(())
    }
}
