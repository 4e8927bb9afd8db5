use std::{cmp::Ordering, fmt, hash::{Hash, Hasher}, rc::Rc};

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::{Error, Result};

/// Name of the implicit root sort every type descends from.
pub const ROOT_TYPE: &str = "object";

/// A named domain sort, optionally refining a parent sort.
///
/// Types are immutable once built and shared through `Rc` by parameters,
/// objects and learned sort lists. Identity is the name alone: two nodes with
/// the same name but different parents compare equal.
#[derive(Debug, Clone)]
pub struct ObjectType {
    name: String,
    parent: Option<Rc<ObjectType>>,
}

/// Walks the parent chain of a type, nearest ancestor first.
pub struct Ancestors<'a> {
    next: Option<&'a ObjectType>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ObjectType;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

/// True if `parent` or any of its ancestors is already called `child_name`.
pub fn is_circular(child_name: &str, parent: &ObjectType) -> bool {
    std::iter::once(parent).chain(parent.ancestors()).any(|t| t.name == child_name)
}

impl ObjectType {
    pub fn new(name: &str, parent: Option<Rc<ObjectType>>) -> Result<Rc<Self>> {
        if let Some(parent) = &parent {
            if is_circular(name, parent) {
                return Err(Error::CircularHierarchy { name: name.to_owned(), parent: parent.name.clone() });
            }
        }
        Ok(Rc::new(Self { name: name.to_owned(), parent }))
    }

    pub fn root() -> Rc<Self> {
        Rc::new(Self { name: ROOT_TYPE.to_owned(), parent: None })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<ObjectType>> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none() && self.name == ROOT_TYPE
    }

    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: self.parent.as_deref() }
    }

    /// True if `other` is reachable from `self`'s parent chain.
    pub fn is_descendant_of(&self, other: &ObjectType) -> bool {
        self.ancestors().any(|ancestor| ancestor == other)
    }

    /// Whether an object of type `self` may fill a slot of type `other`.
    pub fn is_subtype_of(&self, other: &ObjectType) -> bool {
        self == other || other.name == ROOT_TYPE || self.is_descendant_of(other)
    }

    pub fn details(&self) -> String {
        match &self.parent {
            Some(parent) => format!("name: {} parent: {}", self.name, parent.name),
            None => format!("name: {}", self.name),
        }
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ObjectType {}

impl Hash for ObjectType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Subtype ordering: `a < b` when `b` is an ancestor of `a`. Unrelated types
/// are incomparable.
impl PartialOrd for ObjectType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_descendant_of(other) {
            Some(Ordering::Less)
        } else if other.is_descendant_of(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Serialize for ObjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ObjectType", 2)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("parent", &self.parent.as_ref().map(|p| p.name.as_str()))?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_hierarchy() {
        let a = ObjectType::new("a", None).unwrap();
        let b = ObjectType::new("b", Some(a.clone())).unwrap();
        let c = ObjectType::new("c", Some(b.clone())).unwrap();
        assert!(matches!(ObjectType::new("a", Some(c.clone())), Err(Error::CircularHierarchy { .. })));
        assert!(matches!(ObjectType::new("b", Some(b.clone())), Err(Error::CircularHierarchy { .. })));
        assert!(ObjectType::new("d", Some(c)).is_ok());
        assert!(ObjectType::new("a", None).is_ok());
    }

    #[test]
    fn test_circular_message() {
        let a = ObjectType::new("a", None).unwrap();
        let err = ObjectType::new("a", Some(a)).unwrap_err();
        assert_eq!(err.to_string(), "Circular type hierarchy: type 'a' would create a cycle with parent 'a'");
    }

    #[test]
    fn test_subtype_order() {
        let a = ObjectType::new("A", None).unwrap();
        let b = ObjectType::new("B", Some(a.clone())).unwrap();
        assert!(*b < *a);
        assert!(!(*a < *b));
        assert!(*a > *b);
        assert!(!(*b > *a));
        let unrelated = ObjectType::new("C", None).unwrap();
        assert_eq!(a.partial_cmp(&unrelated), None);
        assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));
    }

    #[test]
    fn test_transitive_ancestors() {
        let vehicle = ObjectType::new("vehicle", None).unwrap();
        let truck = ObjectType::new("truck", Some(vehicle.clone())).unwrap();
        let tanker = ObjectType::new("tanker", Some(truck.clone())).unwrap();
        let names: Vec<&str> = tanker.ancestors().map(|t| t.name()).collect();
        assert_eq!(names, vec!["truck", "vehicle"]);
        assert!(tanker.is_descendant_of(&vehicle));
        assert!(tanker.is_subtype_of(&tanker));
        assert!(tanker.is_subtype_of(&ObjectType::root()));
        assert!(!vehicle.is_subtype_of(&truck));
    }

    #[test]
    fn test_name_identity() {
        let a = ObjectType::new("A", None).unwrap();
        let x = ObjectType::new("x", None).unwrap();
        let x_under_a = ObjectType::new("x", Some(a)).unwrap();
        assert_eq!(x, x_under_a);
        assert_eq!(x_under_a.details(), "name: x parent: A");
        assert_eq!(x.details(), "name: x");
    }
}
