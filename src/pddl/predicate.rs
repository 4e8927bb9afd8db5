use std::fmt;

use super::language::Variable;
use super::utils::build_var_string;

/// A declared predicate symbol with the sorts of its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub name: String,
    pub sorts: Vec<String>,
}

impl Predicate {
    pub fn new(name: &str, sorts: Vec<String>) -> Predicate {
        Predicate {
            name: name.to_string(),
            sorts,
        }
    }

    pub fn arity(&self) -> usize {
        self.sorts.len()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let vars: Vec<Variable> = self.sorts.iter().enumerate()
            .map(|(i, sort)| Variable { name: format!("x{}", i), sort: sort.clone() })
            .collect();
        if vars.is_empty() {
            write!(f, "({})", self.name)
        } else {
            write!(f, "({} {})", self.name, build_var_string(&vars))
        }
    }
}
