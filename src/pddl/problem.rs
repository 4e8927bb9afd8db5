use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use super::action::Action;
use super::domain::Domain;
use super::expression::{Atom, Effect, Formula};
use super::language::{Language, Variable};
use super::utils::join;

/// A STRIPS planning task: the domain vocabulary and actions together with
/// an initial state and a goal.
#[derive(Debug, Clone)]
pub struct Problem {
    pub domain_name: String,
    pub name: String,
    pub language: Language,
    pub actions: Vec<Action>,
    pub init: Vec<Atom>,
    pub goal: Formula,
}

impl Problem {
    /// Starts a task with an empty initial state and a trivially true goal.
    pub fn new(domain_name: &str, name: &str, language: Language) -> Self {
        Self {
            domain_name: domain_name.to_owned(),
            name: name.to_owned(),
            language,
            actions: Vec::new(),
            init: Vec::new(),
            goal: Formula::Top,
        }
    }

    pub fn action(&mut self, name: &str, parameters: Vec<Variable>, precondition: Formula, effects: Vec<Effect>) -> Result<()> {
        if self.actions.iter().any(|a| a.name == name) {
            return Err(Error::Language(format!("Duplicate definition of action '{}'", name)));
        }
        debug!("Registering action {} with {} parameters and {} effects", name, parameters.len(), effects.len());
        self.actions.push(Action { name: name.to_owned(), parameters, precondition, effects });
        Ok(())
    }

    pub fn get_action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn domain(&self) -> Domain<'_> {
        Domain { problem: self }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "(define (problem {})", self.name)?;
        writeln!(f, "  (:domain {})", self.domain_name)?;
        writeln!(f, "  (:objects)")?;
        if self.init.is_empty() {
            writeln!(f, "  (:init)")?;
        } else {
            writeln!(f, "  (:init {})", join(&self.init))?;
        }
        writeln!(f, "  (:goal {})", self.goal)?;
        write!(f, ")")
    }
}
