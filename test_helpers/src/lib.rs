//! Test helpers shared across crates in the workspace.
//!
//! The helpers cover three recurring chores: building raw JSON mappings,
//! running code inside a [`figment::Jail`], and laying out configuration
//! files in throwaway directories.

mod dirs;
mod jail;
mod json;

pub use dirs::ConfigDir;
pub use jail::{figment_error, with_jail};
pub use json::object;
