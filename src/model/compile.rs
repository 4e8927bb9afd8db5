use std::path::PathBuf;

use log::debug;

use crate::error::Result;
use crate::exp_not;
use crate::pddl::{
    expression::{Atom, Effect, Formula},
    Language, Problem, Variable,
};
use super::{
    action::LiftedAction,
    fluent::ParameterBoundFluent,
    aggregate::Model,
    object_type::ObjectType,
};

/// Names and output paths for a PDDL export. Unset or empty fields fall back
/// to names derived from `domain_name`.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub domain_name: String,
    pub problem_name: Option<String>,
    pub domain_file: Option<PathBuf>,
    pub problem_file: Option<PathBuf>,
}

impl ExportOptions {
    pub fn new(domain_name: &str) -> Self {
        Self { domain_name: domain_name.to_owned(), ..Default::default() }
    }

    pub fn with_problem_name(mut self, problem_name: &str) -> Self {
        self.problem_name = Some(problem_name.to_owned());
        self
    }

    pub fn with_domain_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.domain_file = Some(path.into());
        self
    }

    pub fn with_problem_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.problem_file = Some(path.into());
        self
    }

    pub fn problem_name(&self) -> String {
        match &self.problem_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{}_problem", self.domain_name),
        }
    }

    pub fn domain_file(&self) -> PathBuf {
        match &self.domain_file {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => PathBuf::from(format!("{}.pddl", self.domain_name)),
        }
    }

    pub fn problem_file(&self) -> PathBuf {
        match &self.problem_file {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => PathBuf::from(format!("{}.pddl", self.problem_name())),
        }
    }
}

/// Declares `object_type` and, before it, any undeclared ancestor.
fn declare_sort(lang: &mut Language, object_type: &ObjectType) -> Result<()> {
    if lang.has_sort(object_type.name()) {
        return Ok(());
    }
    if let Some(parent) = object_type.parent() {
        declare_sort(lang, parent)?;
    }
    lang.sort(object_type.name(), object_type.parent().map(|p| p.name()))
}

fn bound_atom(lang: &Language, action: &LiftedAction, vars: &[Variable], fluent: &ParameterBoundFluent) -> Result<Atom> {
    let arguments = fluent.positions(&action.parameters)?.into_iter().map(|i| &vars[i]).collect::<Vec<_>>();
    lang.atom(&fluent.name, &arguments)
}

/// Translates a lifted model into a PDDL task with an empty initial state
/// and a trivially true goal.
pub fn compile_lifted(model: &Model, domain_name: &str, problem_name: &str) -> Result<Problem> {
    let mut problem = Problem::new(domain_name, problem_name, Language::new(domain_name));
    let lang = &mut problem.language;

    // Parents must be declared before their children.
    if let Some(sorts) = &model.learned_sorts {
        for sort in sorts.iter().filter(|s| s.parent().is_none()) {
            declare_sort(lang, sort)?;
        }
        for sort in sorts.iter().filter(|s| s.parent().is_some()) {
            declare_sort(lang, sort)?;
        }
    }

    for fluent in model.fluents.iter().filter_map(|f| f.as_lifted()) {
        for parameter in &fluent.parameters {
            declare_sort(lang, &parameter.object_type)?;
        }
        let sorts: Vec<String> = fluent.parameters.iter().map(|p| p.object_type.name().to_owned()).collect();
        // Fluents that differ only in parameter names share one predicate.
        let declared = lang.get_predicate(&fluent.name).ok().map(|p| p.sorts.clone());
        match declared {
            Some(existing) if existing == sorts => (),
            _ => lang.predicate(&fluent.name, sorts)?,
        }
    }

    for action in model.actions.iter().filter_map(|a| a.as_lifted()) {
        for parameter in &action.parameters {
            declare_sort(&mut problem.language, &parameter.object_type)?;
        }
        let lang = &problem.language;
        let vars = action.parameters.iter().enumerate()
            .map(|(i, p)| lang.variable(&format!("x{}", i), p.object_type.name()))
            .collect::<Result<Vec<_>>>()?;

        let mut terms = Vec::new();
        for fluent in &action.positive_preconditions {
            terms.push(Formula::Atom(bound_atom(lang, action, &vars, fluent)?));
        }
        for fluent in &action.negative_preconditions {
            terms.push(exp_not!(Formula::Atom(bound_atom(lang, action, &vars, fluent)?)));
        }
        let precondition = Formula::conjoin(terms);

        let mut effects = Vec::new();
        for fluent in &action.add_effects {
            effects.push(Effect::Add(bound_atom(lang, action, &vars, fluent)?));
        }
        for fluent in &action.delete_effects {
            effects.push(Effect::Del(bound_atom(lang, action, &vars, fluent)?));
        }
        problem.action(&action.name, vars, precondition, effects)?;
    }

    debug!("Compiled domain {} with {} sorts, {} predicates and {} actions",
        domain_name, problem.language.sorts().len(), problem.language.predicates().len(), problem.actions.len());
    Ok(problem)
}
