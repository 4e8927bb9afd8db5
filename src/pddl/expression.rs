use std::fmt;
use std::collections::BTreeSet;

/// A predicate applied to variable names, e.g. `(on ?x0 ?x1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub predicate: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// The trivially true formula, written `(and)`.
    Top,
    Atom(Atom),
    Not(Box<Formula>),
    And(Vec<Formula>),
}

#[macro_export]
macro_rules! exp_not {
    ( $e: expr ) => {
        $crate::pddl::expression::Formula::Not(Box::new($e.clone()))
    };
}

#[macro_export]
macro_rules! exp_and {
    ( $($e: expr), * ) => {
        {
            let mut temp_vec = Vec::new();
            $(
                temp_vec.push($e.clone());
            )*
            $crate::pddl::expression::Formula::And(temp_vec)
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Add(Atom),
    Del(Atom),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}", self.predicate)?;
        self.arguments.iter().try_for_each(|a| write!(f, " ?{}", a))?;
        write!(f, ")")
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Formula::Top => write!(f, "(and)"),
            Formula::And(v) => {
                write!(f, "(and")?;
                v.iter().try_for_each(|item| write!(f, " {}", item))?;
                write!(f, ")")
            },
            Formula::Not(item) => write!(f, "(not {})", item),
            Formula::Atom(atom) => write!(f, "{}", atom),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Effect::Add(atom) => write!(f, "{}", atom),
            Effect::Del(atom) => write!(f, "(not {})", atom),
        }
    }
}

impl Formula {
    /// Conjoins terms, collapsing the empty and singleton cases.
    pub fn conjoin(mut terms: Vec<Formula>) -> Formula {
        match terms.len() {
            0 => Formula::Top,
            1 => terms.remove(0),
            _ => Formula::And(terms),
        }
    }

    pub fn variables(&self) -> BTreeSet<&str> {
        let mut variable_set = BTreeSet::new();
        fn rec_count<'a>(e: &'a Formula, set: &mut BTreeSet<&'a str>) {
            match e {
                Formula::Top => (),
                Formula::And(v) => v.iter().for_each(|e| rec_count(e, set)),
                Formula::Not(e) => rec_count(e, set),
                Formula::Atom(atom) => set.extend(atom.arguments.iter().map(String::as_str)),
            }
        }
        rec_count(self, &mut variable_set);
        variable_set
    }

    pub fn has_negation(&self) -> bool {
        match self {
            Formula::Top | Formula::Atom(_) => false,
            Formula::Not(_) => true,
            Formula::And(v) => v.iter().any(Formula::has_negation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str, args: &[&str]) -> Formula {
        Formula::Atom(Atom { predicate: name.to_string(), arguments: args.iter().map(|a| a.to_string()).collect() })
    }

    #[test]
    fn test_conjoin() {
        assert_eq!(Formula::conjoin(vec![]), Formula::Top);
        assert_eq!(Formula::conjoin(vec![atom("on", &["x0", "x1"])]), atom("on", &["x0", "x1"]));
        assert!(matches!(Formula::conjoin(vec![atom("a", &[]), atom("b", &[])]), Formula::And(v) if v.len() == 2));
    }

    #[test]
    fn test_display() {
        let on = atom("on", &["x0", "x1"]);
        let clear = atom("clear", &["x1"]);
        assert_eq!(exp_and!(on, exp_not!(clear)).to_string(), "(and (on ?x0 ?x1) (not (clear ?x1)))");
        assert_eq!(Formula::Top.to_string(), "(and)");
        assert_eq!(atom("handempty", &[]).to_string(), "(handempty)");
    }

    #[test]
    fn test_variables() {
        let f = exp_and!(atom("on", &["x0", "x1"]), exp_not!(atom("clear", &["x2"])));
        assert_eq!(f.variables().into_iter().collect::<Vec<_>>(), vec!["x0", "x1", "x2"]);
        assert!(f.has_negation());
        assert!(!Formula::Top.has_negation());
    }
}
