use std::{cmp::Ordering, collections::BTreeSet, fmt, hash::{Hash, Hasher}};

use serde::Serialize;

use super::{
    fluent::{GroundedFluent, ParameterBoundFluent},
    symbol::{Parameter, PlanningObject},
    validate::{Categorized, Family},
};

/// An action schema. Preconditions and effects refer to the schema's own
/// parameters through parameter-bound fluents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LiftedAction {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub positive_preconditions: BTreeSet<ParameterBoundFluent>,
    pub negative_preconditions: BTreeSet<ParameterBoundFluent>,
    pub add_effects: BTreeSet<ParameterBoundFluent>,
    pub delete_effects: BTreeSet<ParameterBoundFluent>,
}

impl LiftedAction {
    pub fn new(name: &str, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.to_owned(),
            parameters,
            positive_preconditions: BTreeSet::new(),
            negative_preconditions: BTreeSet::new(),
            add_effects: BTreeSet::new(),
            delete_effects: BTreeSet::new(),
        }
    }

    pub fn with_positive_precondition(mut self, fluent: ParameterBoundFluent) -> Self {
        self.positive_preconditions.insert(fluent);
        self
    }

    pub fn with_negative_precondition(mut self, fluent: ParameterBoundFluent) -> Self {
        self.negative_preconditions.insert(fluent);
        self
    }

    pub fn with_add_effect(mut self, fluent: ParameterBoundFluent) -> Self {
        self.add_effects.insert(fluent);
        self
    }

    pub fn with_delete_effect(mut self, fluent: ParameterBoundFluent) -> Self {
        self.delete_effects.insert(fluent);
        self
    }

    pub fn details(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LiftedAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}", self.name)?;
        self.parameters.iter().try_for_each(|p| write!(f, " {}", p.object_type))?;
        write!(f, ")")
    }
}

/// A fully instantiated action.
///
/// Identity is the name and object list, the same information its
/// `details()` string carries.
#[derive(Debug, Clone, Serialize)]
pub struct GroundedAction {
    pub name: String,
    pub objects: Vec<PlanningObject>,
    pub is_strips: bool,
    pub cost: Option<u32>,
    pub positive_preconditions: BTreeSet<GroundedFluent>,
    pub negative_preconditions: BTreeSet<GroundedFluent>,
    pub add_effects: BTreeSet<GroundedFluent>,
    pub delete_effects: BTreeSet<GroundedFluent>,
}

impl GroundedAction {
    pub fn new(name: &str, objects: Vec<PlanningObject>, is_strips: bool, cost: Option<u32>) -> Self {
        Self {
            name: name.to_owned(),
            objects,
            is_strips,
            cost,
            positive_preconditions: BTreeSet::new(),
            negative_preconditions: BTreeSet::new(),
            add_effects: BTreeSet::new(),
            delete_effects: BTreeSet::new(),
        }
    }

    /// Copies the signature (name, objects, flags and cost) with empty
    /// precondition and effect sets.
    pub fn shallow_clone(&self) -> Self {
        Self::new(&self.name, self.objects.clone(), self.is_strips, self.cost)
    }

    /// Copies the action with its objects reduced to plain labels.
    pub fn atomic(&self) -> AtomicAction {
        AtomicAction {
            name: self.name.clone(),
            objects: self.objects.iter().map(|o| o.name.clone()).collect(),
            cost: self.cost,
        }
    }

    pub fn details(&self) -> String {
        let mut details = self.name.clone();
        for object in &self.objects {
            details.push(' ');
            details.push_str(&object.details());
        }
        details
    }
}

impl PartialEq for GroundedAction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.objects == other.objects
    }
}

impl Eq for GroundedAction {}

impl Hash for GroundedAction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.objects.hash(state);
    }
}

impl Ord for GroundedAction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name).then_with(|| self.objects.cmp(&other.objects))
    }
}

impl PartialOrd for GroundedAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GroundedAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details())
    }
}

/// A grounded action whose objects are bare names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AtomicAction {
    pub name: String,
    pub objects: Vec<String>,
    pub cost: Option<u32>,
}

impl fmt::Display for AtomicAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        self.objects.iter().try_for_each(|o| write!(f, " {}", o))
    }
}

/// A model-level action of either family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Action {
    Lifted(LiftedAction),
    Grounded(GroundedAction),
}

impl Action {
    pub fn name(&self) -> &str {
        match self {
            Self::Lifted(a) => &a.name,
            Self::Grounded(a) => &a.name,
        }
    }

    pub fn as_lifted(&self) -> Option<&LiftedAction> {
        match self {
            Self::Lifted(a) => Some(a),
            Self::Grounded(_) => None,
        }
    }

    pub fn as_grounded(&self) -> Option<&GroundedAction> {
        match self {
            Self::Grounded(a) => Some(a),
            Self::Lifted(_) => None,
        }
    }
}

impl Categorized for Action {
    fn family(&self) -> Option<Family> {
        match self {
            Self::Lifted(_) => Some(Family::Lifted),
            Self::Grounded(_) => Some(Family::Grounded),
        }
    }
}

impl From<LiftedAction> for Action {
    fn from(a: LiftedAction) -> Self {
        Self::Lifted(a)
    }
}

impl From<GroundedAction> for Action {
    fn from(a: GroundedAction) -> Self {
        Self::Grounded(a)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Lifted(a) => a.fmt(f),
            Self::Grounded(a) => a.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{hash_map::DefaultHasher, HashSet};

    use super::*;
    use crate::model::object_type::ObjectType;

    fn hash_of<T: Hash>(t: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        t.hash(&mut hasher);
        hasher.finish()
    }

    fn move_action() -> LiftedAction {
        let block = ObjectType::new("block", None).unwrap();
        LiftedAction::new("move", vec![Parameter::new("a", Some(block.clone())), Parameter::new("b", Some(block))])
    }

    #[test]
    fn test_lifted_details() {
        assert_eq!(move_action().details(), "(move block block)");
        assert_eq!(LiftedAction::new("noop", vec![]).details(), "(noop)");
    }

    #[test]
    fn test_lifted_sets_are_unordered() {
        let first = move_action()
            .with_positive_precondition(ParameterBoundFluent::positional("clear", vec![0]))
            .with_positive_precondition(ParameterBoundFluent::positional("clear", vec![1]));
        let second = move_action()
            .with_positive_precondition(ParameterBoundFluent::positional("clear", vec![1]))
            .with_positive_precondition(ParameterBoundFluent::positional("clear", vec![0]));
        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));
    }

    #[test]
    fn test_lifted_negative_preconditions_hashable() {
        let action = move_action();
        assert!(action.negative_preconditions.is_empty());
        let negated = action.clone().with_negative_precondition(ParameterBoundFluent::positional("on", vec![0, 1]));
        assert_ne!(action, negated);
        let set: HashSet<_> = vec![action.clone(), negated, action].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_grounded_clone() {
        let block = ObjectType::new("block", None).unwrap();
        let a = PlanningObject::new("a", block.clone());
        let b = PlanningObject::new("b", block);
        let mut action = GroundedAction::new("stack", vec![a.clone(), b.clone()], true, Some(3));
        action.add_effects.insert(GroundedFluent::new("on", vec![a, b]));
        assert_eq!(action.details(), "stack block a block b");

        let shallow = action.shallow_clone();
        assert_eq!(shallow, action);
        assert!(shallow.is_strips);
        assert_eq!(shallow.cost, Some(3));
        assert!(shallow.add_effects.is_empty());

        let atomic = action.atomic();
        assert_eq!(atomic.objects, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(atomic.cost, Some(3));
        assert_eq!(atomic.to_string(), "stack a b");
    }

    #[test]
    fn test_action_family() {
        let lifted: Action = move_action().into();
        let grounded: Action = GroundedAction::new("noop", vec![], false, None).into();
        assert_eq!(lifted.family(), Some(Family::Lifted));
        assert_eq!(grounded.family(), Some(Family::Grounded));
        assert!(lifted.as_lifted().is_some());
        assert!(grounded.as_lifted().is_none());
    }
}
