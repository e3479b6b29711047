//! Remote-helper protocol for exposing a remote subdirectory as a repository.
//!
//! git runs the helper for remotes configured with `vcs = subdir` and talks
//! to it over stdin/stdout. The helper fetches the real remote into a private
//! ref namespace and reports those refs back under the names the client's
//! refspecs expect.

pub mod command;
pub mod config;
pub mod error;
pub mod helper;
pub mod session;

pub use command::HelperCommand;
pub use config::{RemoteConfig, HELPER_SCHEME};
pub use error::{HelperError, HelperResult};
pub use helper::{
    mapped_ref_prefix, split_refspec, unmapped_ref_prefix, RemoteSubdirHelper, SpecPair,
    CAPABILITIES,
};
pub use session::{Session, SessionState};
