//! Finding candidate stacks and deciding which are deployable

pub mod candidates;
pub mod validator;

pub use candidates::{from_changed_files, from_glob_filters};
pub use validator::StackValidator;
