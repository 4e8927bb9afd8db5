use std::fmt;

use log::trace;

use crate::error::{Error, Result};
use super::expression::Atom;
use super::predicate::Predicate;

/// Sort every other sort descends from.
pub const ROOT_SORT: &str = "object";

#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub name: String,
    pub parent: String,
}

/// A typed action parameter, written `?name - sort`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub sort: String,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "?{} - {}", self.name, self.sort)
    }
}

/// The vocabulary of a PDDL domain: sorts and predicate symbols.
///
/// Sorts must be declared after their parent.
#[derive(Debug, Clone)]
pub struct Language {
    pub name: String,
    sorts: Vec<Sort>,
    predicates: Vec<Predicate>,
}

impl Language {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_owned(), sorts: Vec::new(), predicates: Vec::new() }
    }

    pub fn has_sort(&self, name: &str) -> bool {
        name == ROOT_SORT || self.sorts.iter().any(|s| s.name == name)
    }

    /// Declares a sort. A missing parent means the root sort.
    pub fn sort(&mut self, name: &str, parent: Option<&str>) -> Result<()> {
        let parent = parent.unwrap_or(ROOT_SORT);
        if self.has_sort(name) {
            return Err(Error::Language(format!("Duplicate definition of sort '{}'", name)));
        }
        if !self.has_sort(parent) {
            return Err(Error::Language(format!("Parent sort '{}' of '{}' is not declared", parent, name)));
        }
        trace!("Declaring sort {} - {}", name, parent);
        self.sorts.push(Sort { name: name.to_owned(), parent: parent.to_owned() });
        Ok(())
    }

    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    pub fn predicate(&mut self, name: &str, sorts: Vec<String>) -> Result<()> {
        if self.predicates.iter().any(|p| p.name == name) {
            return Err(Error::Language(format!("Duplicate definition of predicate '{}'", name)));
        }
        if let Some(sort) = sorts.iter().find(|s| !self.has_sort(s)) {
            return Err(Error::Language(format!("Sort '{}' of predicate '{}' is not declared", sort, name)));
        }
        trace!("Declaring predicate {}/{}", name, sorts.len());
        self.predicates.push(Predicate::new(name, sorts));
        Ok(())
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn get_predicate(&self, name: &str) -> Result<&Predicate> {
        self.predicates.iter().find(|p| p.name == name)
            .ok_or_else(|| Error::Language(format!("Undefined predicate '{}'", name)))
    }

    pub fn variable(&self, name: &str, sort: &str) -> Result<Variable> {
        if !self.has_sort(sort) {
            return Err(Error::Language(format!("Sort '{}' of variable '{}' is not declared", sort, name)));
        }
        Ok(Variable { name: name.to_owned(), sort: sort.to_owned() })
    }

    /// Applies a declared predicate to variables, checking the arity.
    pub fn atom(&self, predicate: &str, arguments: &[&Variable]) -> Result<Atom> {
        let symbol = self.get_predicate(predicate)?;
        if symbol.arity() != arguments.len() {
            return Err(Error::Language(format!(
                "Predicate '{}' expects {} arguments, got {}", predicate, symbol.arity(), arguments.len()
            )));
        }
        Ok(Atom {
            predicate: predicate.to_owned(),
            arguments: arguments.iter().map(|v| v.name.clone()).collect(),
        })
    }
}
