use super::language::Variable;

/// Renders a typed variable list: `?x0 - block ?x1 - block`.
pub fn build_var_string(vars: &[Variable]) -> String {
    let first = vars.iter().take(1).fold(String::new(), |acc, item| acc + &item.to_string());
    vars.iter().skip(1).fold(first, |acc, item| acc + " " + &item.to_string())
}

/// Joins displayable items with single spaces.
pub fn join<T: std::fmt::Display>(items: &[T]) -> String {
    let first = items.iter().take(1).fold(String::new(), |acc, item| acc + &format!("{}", item));
    items.iter().skip(1).fold(first, |acc, item| acc + " " + &format!("{}", item))
}
