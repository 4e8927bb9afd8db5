use std::fmt;

use super::expression::{Effect, Formula};
use super::language::Variable;
use super::utils::{build_var_string, join};

/// An action schema as it appears in a domain file.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: String,
    pub parameters: Vec<Variable>,
    pub precondition: Formula,
    pub effects: Vec<Effect>,
}

impl Action {
    pub fn add_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().filter(|e| matches!(e, Effect::Add(_)))
    }

    pub fn delete_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().filter(|e| matches!(e, Effect::Del(_)))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  (:action {}", self.name)?;
        writeln!(f, "    :parameters ({})", build_var_string(&self.parameters))?;
        writeln!(f, "    :precondition {}", self.precondition)?;
        if self.effects.is_empty() {
            write!(f, "    :effect (and))")
        } else {
            write!(f, "    :effect (and {}))", join(&self.effects))
        }
    }
}
