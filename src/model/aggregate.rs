use std::{cell::OnceCell, collections::BTreeSet, fmt, fs::File, io::Write, path::Path, rc::Rc};

use log::{debug, info};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::pddl::{self, Writer};
use super::{
    action::Action,
    compile::{self, ExportOptions},
    fluent::Fluent,
    object_type::ObjectType,
    validate::{self, ModelKind},
};

/// A learned action model: one fluent collection paired with one action
/// collection of the same kind.
///
/// Types are shared through `Rc`, so a model stays on the thread that built
/// it.
#[derive(Debug, Clone)]
pub struct Model {
    pub fluents: BTreeSet<Fluent>,
    pub actions: BTreeSet<Action>,
    pub learned_sorts: Option<Vec<Rc<ObjectType>>>,
    kind: OnceCell<ModelKind>,
}

#[derive(Serialize)]
struct SerializedModel<'a> {
    fluents: &'a BTreeSet<Fluent>,
    actions: &'a BTreeSet<Action>,
    learned_sorts: &'a Option<Vec<Rc<ObjectType>>>,
    model_type: ModelKind,
}

impl Model {
    /// Validates that fluents and actions agree on their kind, and that the
    /// `declared` kind, if any, matches what was detected.
    pub fn new(
        fluents: BTreeSet<Fluent>,
        actions: BTreeSet<Action>,
        learned_sorts: Option<Vec<Rc<ObjectType>>>,
        declared: Option<ModelKind>,
    ) -> Result<Self> {
        let detected = validate::validate_consistency(actions.iter(), fluents.iter())?;
        if let Some(declared) = declared {
            if declared != detected {
                return Err(Error::ModelValidation(format!(
                    "Specified model type {} doesn't match detected type {}", declared, detected
                )));
            }
        }
        Ok(Self::new_unchecked(fluents, actions, learned_sorts, Some(detected)))
    }

    /// Builds a model without validation. A missing `kind` is detected on
    /// first access.
    ///
    /// Actions and fluents that disagree on their kind are reported as
    /// [`ModelKind::Mixed`] there; the `InconsistentModelKind` error that
    /// [`Model::new`] would return is not surfaced.
    pub fn new_unchecked(
        fluents: BTreeSet<Fluent>,
        actions: BTreeSet<Action>,
        learned_sorts: Option<Vec<Rc<ObjectType>>>,
        kind: Option<ModelKind>,
    ) -> Self {
        let cell = OnceCell::new();
        if let Some(kind) = kind {
            let _ = cell.set(kind);
        }
        Self { fluents, actions, learned_sorts, kind: cell }
    }

    /// The resolved kind. Collections that fail the consistency check count
    /// as `Mixed`.
    pub fn kind(&self) -> ModelKind {
        *self.kind.get_or_init(|| {
            validate::validate_consistency(self.actions.iter(), self.fluents.iter()).unwrap_or(ModelKind::Mixed)
        })
    }

    pub fn is_lifted(&self) -> bool {
        self.kind() == ModelKind::Lifted
    }

    pub fn is_grounded(&self) -> bool {
        self.kind() == ModelKind::Grounded
    }

    pub fn details(&self) -> String {
        self.to_string()
    }

    /// Encodes the model as JSON, writing it to `path` when one is given.
    pub fn serialize(&self, path: Option<&Path>) -> Result<String> {
        let serial = serde_json::to_string(&SerializedModel {
            fluents: &self.fluents,
            actions: &self.actions,
            learned_sorts: &self.learned_sorts,
            model_type: self.kind(),
        })?;
        if let Some(path) = path {
            let mut file = File::create(path)?;
            file.write_all(serial.as_bytes())?;
            debug!("Serialized model to {}", path.display());
        }
        Ok(serial)
    }

    pub fn deserialize(_serial: &str) -> Result<Model> {
        Err(Error::Unsupported("deserializing a model from JSON"))
    }

    /// Compiles a lifted model into a PDDL task without writing it.
    pub fn compile_lifted(&self, domain_name: &str, problem_name: &str) -> Result<pddl::Problem> {
        compile::compile_lifted(self, domain_name, problem_name)
    }

    /// Writes the model as a PDDL domain/problem pair.
    pub fn to_pddl(&self, options: &ExportOptions) -> Result<()> {
        let problem_name = options.problem_name();
        match self.kind() {
            ModelKind::Lifted => {
                let problem = self.compile_lifted(&options.domain_name, &problem_name)?;
                Writer::new(&problem).write(options.domain_file(), options.problem_file())
            },
            ModelKind::Grounded => self.to_pddl_grounded(options),
            kind => Err(Error::ModelValidation(format!("Cannot export {} model to PDDL", kind))),
        }
    }

    pub fn to_pddl_grounded(&self, _options: &ExportOptions) -> Result<()> {
        Err(Error::Unsupported("exporting a grounded model to PDDL"))
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.fluents == other.fluents
            && self.actions == other.actions
            && self.learned_sorts == other.learned_sorts
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let indent = "  ";
        writeln!(f, "Model ({}):", self.kind())?;
        let fluents = self.fluents.iter().map(|f| f.to_string()).collect::<Vec<_>>();
        writeln!(f, "{}Fluents: {}", indent, fluents.join(", "))?;
        writeln!(f, "{}Actions:", indent)?;
        for action in &self.actions {
            writeln!(f, "{}{}{}", indent, indent, action)?;
        }
        Ok(())
    }
}

fn check_family<'a, T, I>(items: I, expected: validate::Family, what: &str) -> Result<()>
where
    T: validate::Categorized + fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for item in items {
        match item.family() {
            Some(family) if family == expected => (),
            Some(family) => return Err(Error::ModelValidation(format!(
                "Expected {} {}, got {} {} {}", expected, what, family, what, item
            ))),
            None => return Err(Error::ModelValidation(format!(
                "Expected {} {}, got unclassified {} {}", expected, what, what, item
            ))),
        }
    }
    Ok(())
}

/// Builds a lifted model, rejecting any grounded element.
pub fn create_lifted(
    fluents: BTreeSet<Fluent>,
    actions: BTreeSet<Action>,
    learned_sorts: Option<Vec<Rc<ObjectType>>>,
) -> Result<Model> {
    check_family(fluents.iter(), validate::Family::Lifted, "fluent")?;
    check_family(actions.iter(), validate::Family::Lifted, "action")?;
    Ok(Model::new_unchecked(fluents, actions, learned_sorts, Some(ModelKind::Lifted)))
}

/// Builds a grounded model, rejecting any lifted element.
pub fn create_grounded(
    fluents: BTreeSet<Fluent>,
    actions: BTreeSet<Action>,
    learned_sorts: Option<Vec<Rc<ObjectType>>>,
) -> Result<Model> {
    check_family(fluents.iter(), validate::Family::Grounded, "fluent")?;
    check_family(actions.iter(), validate::Family::Grounded, "action")?;
    Ok(Model::new_unchecked(fluents, actions, learned_sorts, Some(ModelKind::Grounded)))
}

/// Builds a model of whatever kind the components agree on.
pub fn create_from_components(
    fluents: BTreeSet<Fluent>,
    actions: BTreeSet<Action>,
    learned_sorts: Option<Vec<Rc<ObjectType>>>,
) -> Result<Model> {
    match validate::validate_consistency(actions.iter(), fluents.iter())? {
        ModelKind::Unknown => Err(Error::ModelValidation("Cannot determine model type from provided components".to_owned())),
        ModelKind::Mixed => Err(Error::ModelValidation("Cannot build a model from mixed components".to_owned())),
        kind => Ok(Model::new_unchecked(fluents, actions, learned_sorts, Some(kind))),
    }
}

/// Unions two models of the same kind.
pub fn merge(first: &Model, second: &Model) -> Result<Model> {
    if first.kind() != second.kind() {
        return Err(Error::ModelValidation(format!(
            "Cannot merge models of different types: {} and {}", first.kind(), second.kind()
        )));
    }
    let fluents = first.fluents.union(&second.fluents).cloned().collect();
    let actions = first.actions.union(&second.actions).cloned().collect();
    let learned_sorts = match (&first.learned_sorts, &second.learned_sorts) {
        (Some(a), Some(b)) => {
            let mut sorts = a.clone();
            for sort in b {
                if !sorts.contains(sort) {
                    sorts.push(sort.clone());
                }
            }
            Some(sorts)
        },
        (Some(sorts), None) | (None, Some(sorts)) => Some(sorts.clone()),
        (None, None) => None,
    };
    info!("Merging {} models", first.kind());
    create_from_components(fluents, actions, learned_sorts)
}
