use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use super::{
    symbol::{Parameter, PlanningObject},
    validate::{Categorized, Family},
};

/// A predicate schema over typed parameters, e.g. `on ?x - block ?y - block`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LiftedFluent {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

impl LiftedFluent {
    pub fn new(name: &str, parameters: Vec<Parameter>) -> Self {
        Self { name: name.to_owned(), parameters }
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn details(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LiftedFluent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        self.parameters.iter().try_for_each(|p| write!(f, " {}", p))
    }
}

/// How a parameter-bound fluent refers to the parameters of its action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Binding {
    /// Indices into the owning action's parameter list.
    Positions(Vec<usize>),
    /// Names of the owning action's parameters.
    Names(Vec<String>),
}

/// A fluent whose arguments are filled by the parameters of the action it
/// appears in. Used for lifted preconditions and effects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ParameterBoundFluent {
    pub name: String,
    pub binding: Binding,
}

impl ParameterBoundFluent {
    pub fn positional(name: &str, positions: Vec<usize>) -> Self {
        Self { name: name.to_owned(), binding: Binding::Positions(positions) }
    }

    pub fn named(name: &str, names: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            binding: Binding::Names(names.iter().map(|n| n.to_string()).collect()),
        }
    }

    pub fn arity(&self) -> usize {
        match &self.binding {
            Binding::Positions(v) => v.len(),
            Binding::Names(v) => v.len(),
        }
    }

    /// Resolves the bound references into positions within `params`.
    pub fn positions(&self, params: &[Parameter]) -> Result<Vec<usize>> {
        match &self.binding {
            Binding::Positions(positions) => positions.iter().map(|&idx| {
                if idx < params.len() {
                    Ok(idx)
                } else {
                    Err(self.unbound(idx.to_string()))
                }
            }).collect(),
            Binding::Names(names) => names.iter().map(|name| {
                params.iter().position(|p| &p.name == name).ok_or_else(|| self.unbound(name.clone()))
            }).collect(),
        }
    }

    /// Instantiates this fluent for an action signature `params` bound to
    /// `objects` (one object per parameter, in order).
    pub fn ground(&self, params: &[Parameter], objects: &[PlanningObject]) -> Result<GroundedFluent> {
        let objects = self.positions(params)?.into_iter().map(|idx| {
            objects.get(idx).cloned().ok_or_else(|| self.unbound(idx.to_string()))
        }).collect::<Result<Vec<_>>>()?;
        Ok(GroundedFluent { name: self.name.clone(), objects })
    }

    fn unbound(&self, reference: String) -> Error {
        Error::UnboundParameter { fluent: self.name.clone(), reference }
    }
}

impl fmt::Display for ParameterBoundFluent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}", self.name)?;
        match &self.binding {
            Binding::Positions(v) => v.iter().try_for_each(|i| write!(f, " {}", i))?,
            Binding::Names(v) => v.iter().try_for_each(|n| write!(f, " {}", n))?,
        }
        write!(f, ")")
    }
}

// Bound fluents live inside actions and are not model-level features.
impl Categorized for ParameterBoundFluent {
    fn family(&self) -> Option<Family> {
        None
    }
}

/// A fully instantiated fluent, e.g. `(on a b)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroundedFluent {
    pub name: String,
    pub objects: Vec<PlanningObject>,
}

impl GroundedFluent {
    pub fn new(name: &str, objects: Vec<PlanningObject>) -> Self {
        Self { name: name.to_owned(), objects }
    }

    /// Position of each of this fluent's objects within `action_objects`,
    /// in the fluent's own argument order.
    pub fn get_binding(&self, action_objects: &[PlanningObject]) -> Result<Vec<usize>> {
        self.objects.iter().map(|object| {
            action_objects.iter().position(|o| o == object).ok_or_else(|| Error::UnboundObject {
                fluent: self.to_string(),
                object: object.details(),
            })
        }).collect()
    }

    pub fn details(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GroundedFluent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}", self.name)?;
        self.objects.iter().try_for_each(|o| write!(f, " {}", o))?;
        write!(f, ")")
    }
}

/// A model-level fluent of either family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Fluent {
    Lifted(LiftedFluent),
    Grounded(GroundedFluent),
}

impl Fluent {
    pub fn name(&self) -> &str {
        match self {
            Self::Lifted(f) => &f.name,
            Self::Grounded(f) => &f.name,
        }
    }

    pub fn as_lifted(&self) -> Option<&LiftedFluent> {
        match self {
            Self::Lifted(f) => Some(f),
            Self::Grounded(_) => None,
        }
    }

    pub fn as_grounded(&self) -> Option<&GroundedFluent> {
        match self {
            Self::Grounded(f) => Some(f),
            Self::Lifted(_) => None,
        }
    }
}

impl Categorized for Fluent {
    fn family(&self) -> Option<Family> {
        match self {
            Self::Lifted(_) => Some(Family::Lifted),
            Self::Grounded(_) => Some(Family::Grounded),
        }
    }
}

impl From<LiftedFluent> for Fluent {
    fn from(f: LiftedFluent) -> Self {
        Self::Lifted(f)
    }
}

impl From<GroundedFluent> for Fluent {
    fn from(f: GroundedFluent) -> Self {
        Self::Grounded(f)
    }
}

impl fmt::Display for Fluent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Lifted(fluent) => fluent.fmt(f),
            Self::Grounded(fluent) => fluent.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::model::object_type::ObjectType;

    fn objects(block: &Rc<ObjectType>, names: &[&str]) -> Vec<PlanningObject> {
        names.iter().map(|n| PlanningObject::new(n, block.clone())).collect()
    }

    #[test]
    fn test_get_binding() {
        let block = ObjectType::new("block", None).unwrap();
        let abc = objects(&block, &["a", "b", "c"]);
        let fluent = GroundedFluent::new("on", abc[..2].to_vec());
        assert_eq!(fluent.get_binding(&abc).unwrap(), vec![0, 1]);
        let reversed = GroundedFluent::new("on", vec![abc[1].clone(), abc[0].clone()]);
        assert_eq!(reversed.get_binding(&abc).unwrap(), vec![1, 0]);
        match fluent.get_binding(&abc[1..]) {
            Err(Error::UnboundObject { fluent, object }) => {
                assert_eq!(fluent, "(on a b)");
                assert_eq!(object, "block a");
            }
            r => panic!("Unexpected {:?}", r),
        }
    }

    #[test]
    fn test_grounded_display() {
        let block = ObjectType::new("block", None).unwrap();
        assert_eq!(GroundedFluent::new("on", objects(&block, &["a", "b"])).to_string(), "(on a b)");
        assert_eq!(GroundedFluent::new("handempty", vec![]).to_string(), "(handempty)");
    }

    #[test]
    fn test_grounded_identity_includes_objects() {
        let block = ObjectType::new("block", None).unwrap();
        let ab = GroundedFluent::new("on", objects(&block, &["a", "b"]));
        let ba = GroundedFluent::new("on", objects(&block, &["b", "a"]));
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_lifted_display() {
        let fluent = LiftedFluent::new("on", vec![Parameter::new("x", None), Parameter::new("y", None)]);
        assert_eq!(fluent.to_string(), "on x y");
        assert_eq!(fluent.arity(), 2);
        assert_eq!(LiftedFluent::new("handempty", vec![]).to_string(), "handempty");
    }

    #[test]
    fn test_bound_positions() {
        let params = vec![Parameter::new("a", None), Parameter::new("b", None)];
        assert_eq!(ParameterBoundFluent::positional("on", vec![1, 0]).positions(&params).unwrap(), vec![1, 0]);
        assert_eq!(ParameterBoundFluent::named("on", &["b", "a"]).positions(&params).unwrap(), vec![1, 0]);
        assert!(matches!(
            ParameterBoundFluent::positional("on", vec![2]).positions(&params),
            Err(Error::UnboundParameter { .. })
        ));
        assert!(matches!(
            ParameterBoundFluent::named("on", &["c"]).positions(&params),
            Err(Error::UnboundParameter { .. })
        ));
    }

    #[test]
    fn test_ground() {
        let block = ObjectType::new("block", None).unwrap();
        let params = vec![Parameter::new("a", Some(block.clone())), Parameter::new("b", Some(block.clone()))];
        let objs = objects(&block, &["x", "y"]);
        let grounded = ParameterBoundFluent::positional("on", vec![1, 0]).ground(&params, &objs).unwrap();
        assert_eq!(grounded.to_string(), "(on y x)");
        let grounded = ParameterBoundFluent::named("clear", &["a"]).ground(&params, &objs).unwrap();
        assert_eq!(grounded.to_string(), "(clear x)");
        assert!(ParameterBoundFluent::positional("on", vec![1]).ground(&params, &objs[..1]).is_err());
    }

    #[test]
    fn test_bound_display() {
        assert_eq!(ParameterBoundFluent::positional("on", vec![0, 1]).to_string(), "(on 0 1)");
        assert_eq!(ParameterBoundFluent::named("on", &["x", "y"]).to_string(), "(on x y)");
    }
}
