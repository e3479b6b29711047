//! Ref and directory mapping algebra for the subdir remote helper.
//!
//! The helper exposes a subdirectory of a remote repository as if it were a
//! repository root. This crate holds the two value types that describe that
//! relabelling:
//!
//! - **Refspecs** map ref names between two namespaces with a glob pair such
//!   as `+refs/heads/*:refs/remotes/origin/*`. They are parsed once and then
//!   only derived from, never mutated.
//! - **Dirspecs** map tree content between a subdirectory and a root with a
//!   pair such as `lib:` (only the `:` root mapping can be applied today).
//!
//! # Modules
//!
//! - [`error`]: Error types for spec operations
//! - [`refspec`]: [`RefSpec`] parsing and mapping
//! - [`dirspec`]: [`DirSpec`] parsing and tree mapping
//! - [`names`]: Remote name validation

pub mod dirspec;
pub mod error;
pub mod names;
pub mod refspec;

pub use dirspec::DirSpec;
pub use error::{Result, SpecError};
pub use names::validate_remote_name;
pub use refspec::RefSpec;
