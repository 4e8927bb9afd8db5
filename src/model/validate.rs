use std::fmt;

use log::trace;
use serde::Serialize;

use crate::error::{Error, Result};

/// The kind of a fluent or action collection, and so of a whole model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Lifted,
    Grounded,
    Mixed,
    Unknown,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Lifted => write!(f, "lifted"),
            Self::Grounded => write!(f, "grounded"),
            Self::Mixed => write!(f, "mixed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Representation family an individual fluent or action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Lifted,
    Grounded,
}

impl From<Family> for ModelKind {
    fn from(family: Family) -> Self {
        match family {
            Family::Lifted => ModelKind::Lifted,
            Family::Grounded => ModelKind::Grounded,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        ModelKind::from(*self).fmt(f)
    }
}

/// Anything that can sit in a model collection carries its family as data.
/// `None` marks elements that belong to neither family.
pub trait Categorized {
    fn family(&self) -> Option<Family>;
}

impl<T: Categorized + ?Sized> Categorized for &T {
    fn family(&self) -> Option<Family> {
        (**self).family()
    }
}

/// Classifies a collection by its first element and checks every other
/// element against it.
pub fn detect_kind<I>(collection: I) -> ModelKind
where
    I: IntoIterator,
    I::Item: Categorized,
{
    let mut items = collection.into_iter();
    let family = match items.next() {
        None => return ModelKind::Unknown,
        Some(first) => match first.family() {
            Some(family) => family,
            None => return ModelKind::Unknown,
        },
    };
    if items.all(|item| item.family() == Some(family)) {
        family.into()
    } else {
        ModelKind::Mixed
    }
}

/// Checks that actions and fluents agree on their kind. Indeterminate
/// collections (e.g. empty ones) are tolerated and yield `Unknown`.
pub fn validate_consistency<A, F>(actions: A, fluents: F) -> Result<ModelKind>
where
    A: IntoIterator,
    A::Item: Categorized,
    F: IntoIterator,
    F::Item: Categorized,
{
    let action_kind = detect_kind(actions);
    let fluent_kind = detect_kind(fluents);
    trace!("Detected actions as {} and fluents as {}", action_kind, fluent_kind);
    if action_kind == ModelKind::Unknown || fluent_kind == ModelKind::Unknown {
        Ok(ModelKind::Unknown)
    } else if action_kind == fluent_kind {
        Ok(action_kind)
    } else {
        Err(Error::InconsistentModelKind { actions: action_kind, fluents: fluent_kind })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::model::{
        action::{Action, GroundedAction, LiftedAction},
        fluent::{Fluent, GroundedFluent, LiftedFluent, ParameterBoundFluent},
        object_type::ObjectType,
        symbol::{Parameter, PlanningObject},
    };

    fn lifted_action() -> Action {
        LiftedAction::new("move", vec![Parameter::new("x", None)]).into()
    }

    fn grounded_action() -> Action {
        GroundedAction::new("move", vec![PlanningObject::new("a", ObjectType::root())], true, None).into()
    }

    fn lifted_fluent() -> Fluent {
        LiftedFluent::new("clear", vec![Parameter::new("x", None)]).into()
    }

    fn grounded_fluent(object_type: Rc<ObjectType>) -> Fluent {
        GroundedFluent::new("clear", vec![PlanningObject::new("a", object_type)]).into()
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(detect_kind(Vec::<Action>::new().iter()), ModelKind::Unknown);
        assert_eq!(detect_kind(vec![lifted_action()].iter()), ModelKind::Lifted);
        assert_eq!(detect_kind(vec![grounded_action()].iter()), ModelKind::Grounded);
        assert_eq!(detect_kind(vec![lifted_action(), grounded_action()].iter()), ModelKind::Mixed);
        assert_eq!(detect_kind(vec![grounded_action(), lifted_action()].iter()), ModelKind::Mixed);
    }

    #[test]
    fn test_detect_kind_unclassified() {
        let bound = vec![ParameterBoundFluent::positional("on", vec![0, 1])];
        assert_eq!(detect_kind(bound.iter()), ModelKind::Unknown);
    }

    #[test]
    fn test_validate_consistency() {
        let block = ObjectType::new("block", None).unwrap();
        let err = validate_consistency(vec![lifted_action()].iter(), vec![grounded_fluent(block.clone())].iter()).unwrap_err();
        assert!(matches!(err, Error::InconsistentModelKind { actions: ModelKind::Lifted, fluents: ModelKind::Grounded }));
        assert_eq!(err.to_string(), "Inconsistent model types: actions are lifted but fluents are grounded");

        let empty_actions: Vec<Action> = Vec::new();
        let empty_fluents: Vec<Fluent> = Vec::new();
        assert_eq!(validate_consistency(empty_actions.iter(), empty_fluents.iter()).unwrap(), ModelKind::Unknown);
        assert_eq!(validate_consistency(empty_actions.iter(), vec![lifted_fluent()].iter()).unwrap(), ModelKind::Unknown);

        assert_eq!(validate_consistency(vec![lifted_action()].iter(), vec![lifted_fluent()].iter()).unwrap(), ModelKind::Lifted);
        assert_eq!(validate_consistency(vec![grounded_action()].iter(), vec![grounded_fluent(block)].iter()).unwrap(), ModelKind::Grounded);
    }

    #[test]
    fn test_mixed_is_not_unknown() {
        let err = validate_consistency(vec![lifted_action(), grounded_action()].iter(), vec![lifted_fluent()].iter()).unwrap_err();
        assert!(matches!(err, Error::InconsistentModelKind { actions: ModelKind::Mixed, fluents: ModelKind::Lifted }));
    }
}
