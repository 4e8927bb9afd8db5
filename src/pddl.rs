pub mod action;
pub mod domain;
pub mod expression;
pub mod language;
pub mod predicate;
pub mod problem;
pub mod writer;

mod utils;

pub use language::{Language, Variable};
pub use problem::Problem;
pub use writer::Writer;
