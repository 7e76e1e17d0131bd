use crate::sprite::{Direction, SpriteInstance};

use opal_ir::{Directive, POSITIONAL};

use derive_more::Display;
use log::{debug, warn};
use rustc_hash::FxHashMap;

/// A recoverable problem noticed while evaluating.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum Warning {
    #[display(fmt = "division by zero at instruction {position}, substituted 0")]
    DivisionByZero { position: usize },

    #[display(fmt = "ignored {directive} value {value}")]
    IgnoredValue { directive: String, value: f64 },
}

/// Inputs an operation is evaluated against. Supply a fresh context per
/// evaluation; operations themselves hold no state.
#[derive(Debug, Default)]
pub struct ExecutionContext<'a> {
    /// The positional parameter.
    pub x: f64,

    /// Legacy string-keyed variables, parsed as floats on lookup.
    pub variables: Option<&'a FxHashMap<String, String>>,

    /// Target of sprite-scripting directives.
    pub sprite: Option<&'a mut SpriteInstance>,

    pub warnings: Vec<Warning>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(x: f64) -> ExecutionContext<'a> {
        ExecutionContext {
            x,
            ..Default::default()
        }
    }

    pub fn with_variables(mut self, variables: &'a FxHashMap<String, String>) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_sprite(mut self, sprite: &'a mut SpriteInstance) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Value of a variable, or `None` when it is absent or not a number.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        if name == POSITIONAL {
            return Some(self.x);
        }

        let raw = self.variables?.get(name)?;

        match raw.trim().parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                debug!("variable '{}' holds non-numeric value {:?}", name, raw);

                None
            }
        }
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        warn!("{}", warning);

        self.warnings.push(warning);
    }

    pub(crate) fn apply(&mut self, directive: &Directive, value: Option<f64>) {
        let Some(value) = value else {
            debug!("no value for {}, nothing written", directive);
            return;
        };

        let Some(sprite) = self.sprite.as_deref_mut() else {
            debug!("no sprite attached, discarding {} = {}", directive, value);
            return;
        };

        match directive {
            Directive::Direction if value.is_nan() => {}
            Directive::Direction => {
                sprite.direction = Direction::from_value(value);
                return;
            }

            Directive::Variable(name) => {
                sprite.variables.insert(name.clone(), value);
                return;
            }

            Directive::HitboxTop => {
                sprite.hitbox_top = value;
                return;
            }

            Directive::Animation if value.is_finite() && value >= 0.0 => {
                sprite.animation = Some(value.round() as usize);
                return;
            }
            Directive::Animation => {}
        }

        self.warn(Warning::IgnoredValue {
            directive: directive.to_string(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_parameter_wins_over_the_table() {
        let mut variables = FxHashMap::default();
        variables.insert("x".to_owned(), "9".to_owned());
        variables.insert("speed".to_owned(), " 2.5 ".to_owned());
        variables.insert("name".to_owned(), "slime".to_owned());

        let context = ExecutionContext::new(3.0).with_variables(&variables);

        assert_eq!(context.lookup("x"), Some(3.0));
        assert_eq!(context.lookup("speed"), Some(2.5));
        assert_eq!(context.lookup("name"), None);
        assert_eq!(context.lookup("missing"), None);
    }

    #[test]
    fn named_variables_are_absent_without_a_table() {
        assert_eq!(ExecutionContext::new(0.0).lookup("speed"), None);
    }

    #[test]
    fn invalid_animation_indices_are_ignored() {
        let mut sprite = SpriteInstance::new();
        let mut context = ExecutionContext::new(0.0).with_sprite(&mut sprite);

        context.apply(&Directive::Animation, Some(-1.0));
        context.apply(&Directive::Animation, Some(f64::NAN));
        context.apply(&Directive::Animation, Some(2.4));

        assert_eq!(context.warnings.len(), 2);
        assert_eq!(sprite.animation, Some(2));
    }
}
