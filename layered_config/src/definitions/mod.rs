//! Definition registry: every recognised key with its default, validator,
//! deprecation status and allowed layers.

mod builtin;
mod definition;
mod registry;
mod validator;

pub use builtin::SUPPORTED_HASH_ALGORITHMS;
pub use definition::Definition;
pub use registry::Registry;
pub use validator::{CustomCheck, Validator, ValueType};

#[cfg(test)]
mod tests;
