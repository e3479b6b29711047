//! Git access for the subdir remote helper.
//!
//! The helper needs four things from git: config values, `fetch`,
//! `ls-remote`, and `for-each-ref`. They sit behind the [`ConfigStore`] and
//! [`GitRunner`] traits so the helper can be driven by the real binary
//! ([`GitCommand`]) or by an in-memory fake ([`InMemoryGit`]).

pub mod command;
pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use command::{GitCommand, LineStream};
pub use error::{GitError, GitResult};
pub use memory::InMemoryGit;
pub use traits::{ConfigStore, GitRunner};
pub use types::{FetchCall, RefEntry, RefStream};
