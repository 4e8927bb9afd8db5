use std::{cmp::Ordering, fmt, hash::{Hash, Hasher}, rc::Rc};

use serde::ser::{Serialize, Serializer};

use super::object_type::ObjectType;

/// A formal argument slot of a fluent or action schema.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub object_type: Rc<ObjectType>,
}

impl Parameter {
    pub fn new(name: &str, object_type: Option<Rc<ObjectType>>) -> Self {
        Self {
            name: name.to_owned(),
            object_type: object_type.unwrap_or_else(ObjectType::root),
        }
    }

    pub fn details(&self) -> String {
        format!("{} {}", self.name, self.object_type)
    }
}

// Hash on the name only; equal parameters always share a name.
impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.object_type == other.object_type
    }
}

impl Eq for Parameter {}

impl Ord for Parameter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
            .then_with(|| self.object_type.name().cmp(other.object_type.name()))
    }
}

impl PartialOrd for Parameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.details())
    }
}

/// A concrete individual of the planning domain.
///
/// Identity is the `(name, type)` pair, so a `block a` and a `robot a` are
/// different objects.
#[derive(Debug, Clone)]
pub struct PlanningObject {
    pub name: String,
    pub object_type: Rc<ObjectType>,
}

impl PlanningObject {
    pub fn new(name: &str, object_type: Rc<ObjectType>) -> Self {
        Self { name: name.to_owned(), object_type }
    }

    pub fn details(&self) -> String {
        format!("{} {}", self.object_type, self.name)
    }
}

impl PartialEq for PlanningObject {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.object_type == other.object_type
    }
}

impl Eq for PlanningObject {}

impl Hash for PlanningObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.object_type.hash(state);
    }
}

impl Ord for PlanningObject {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
            .then_with(|| self.object_type.name().cmp(other.object_type.name()))
    }
}

impl PartialOrd for PlanningObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PlanningObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Serialize for PlanningObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.details())
    }
}
