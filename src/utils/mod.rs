//! Utility functions

pub mod validation;

pub use validation::{non_blank, optional_text, required_text, validate_capacity};
