use std::fmt;

use enumset::{EnumSet, EnumSetType};

use super::problem::Problem;

#[derive(EnumSetType, Debug)]
pub enum Requirements {
    Strips,
    Typing,
    NegativePreconditions,
}

impl fmt::Display for Requirements {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Requirements::Strips => write!(f, ":strips"),
            Requirements::Typing => write!(f, ":typing"),
            Requirements::NegativePreconditions => write!(f, ":negative-preconditions"),
        }
    }
}

/// The domain half of a [`Problem`], rendered as a PDDL domain file.
pub struct Domain<'a> {
    pub problem: &'a Problem,
}

impl Domain<'_> {
    /// Parameters and predicate arguments are always written as typed
    /// lists, `object` included, so `:typing` is always required.
    pub fn requirements(&self) -> EnumSet<Requirements> {
        let mut requirements = Requirements::Strips | Requirements::Typing;
        if self.problem.actions.iter().any(|a| a.precondition.has_negation()) {
            requirements.insert(Requirements::NegativePreconditions);
        }
        requirements
    }
}

impl fmt::Display for Domain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let language = &self.problem.language;
        writeln!(f, "(define (domain {})", self.problem.domain_name)?;
        let requirements = self.requirements().iter().map(|r| r.to_string()).collect::<Vec<_>>();
        writeln!(f, "  (:requirements {})", requirements.join(" "))?;
        if !language.sorts().is_empty() {
            let types = language.sorts().iter().map(|s| format!("{} - {}", s.name, s.parent)).collect::<Vec<_>>();
            writeln!(f, "  (:types {})", types.join(" "))?;
        }
        let predicates = language.predicates().iter().fold(String::new(), |acc, p| acc + " " + &p.to_string());
        writeln!(f, "  (:predicates{})", predicates)?;
        for action in &self.problem.actions {
            writeln!(f, "{}", action)?;
        }
        write!(f, ")")
    }
}
