//! Lifted and grounded STRIPS action models.
//!
//! Models are not thread-shared: types are reference counted with `Rc`, so a
//! model and everything it refers to stays on the thread that built it.
pub mod model;
pub mod error;
pub mod pddl;

pub use crate::model::*;
pub use error::{Error, Result};
