pub mod action;
pub mod compile;
pub mod fluent;
pub mod grounding;
pub mod aggregate;
pub mod object_type;
pub mod symbol;
pub mod validate;

pub use action::{Action, AtomicAction, GroundedAction, LiftedAction};
pub use compile::ExportOptions;
pub use fluent::{Binding, Fluent, GroundedFluent, LiftedFluent, ParameterBoundFluent};
pub use grounding::ground_model;
pub use aggregate::{create_from_components, create_grounded, create_lifted, merge, Model};
pub use object_type::ObjectType;
pub use symbol::{Parameter, PlanningObject};
pub use validate::{detect_kind, validate_consistency, Categorized, Family, ModelKind};
