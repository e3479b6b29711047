//! Interfaces to the local repository and its remotes.
//!
//! The helper never touches the object or ref database directly. Config
//! reads go through [`ConfigStore`] and everything that moves or lists refs
//! goes through [`GitRunner`]. [`GitCommand`](crate::GitCommand) backs both
//! with the `git` binary; [`InMemoryGit`](crate::InMemoryGit) backs both
//! with plain maps for tests.

use subdir_refs::RefSpec;

use crate::error::GitResult;
use crate::types::RefStream;

/// Read-only access to repository configuration.
pub trait ConfigStore {
    /// Read a single-valued key.
    ///
    /// Returns `Ok(None)` if the key is not configured.
    fn config_get_one(&self, key: &str) -> GitResult<Option<String>>;

    /// Read every value of a multi-valued key, in configuration order.
    ///
    /// Returns an empty list if the key is not configured.
    fn config_get_all(&self, key: &str) -> GitResult<Vec<String>>;
}

/// Runs ref-level operations against the local repository and its remotes.
pub trait GitRunner {
    /// Fetch from `url` using the given refspecs, updating local refs.
    fn fetch(&self, url: &str, refspecs: &[RefSpec]) -> GitResult<()>;

    /// List the refs advertised by `url`.
    fn ls_remote(&self, url: &str) -> GitResult<RefStream<'_>>;

    /// List local refs whose name starts with `prefix`, sorted by name.
    fn refs(&self, prefix: &str) -> GitResult<RefStream<'_>>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn config_get_one(&self, key: &str) -> GitResult<Option<String>> {
        (**self).config_get_one(key)
    }

    fn config_get_all(&self, key: &str) -> GitResult<Vec<String>> {
        (**self).config_get_all(key)
    }
}

impl<T: GitRunner + ?Sized> GitRunner for &T {
    fn fetch(&self, url: &str, refspecs: &[RefSpec]) -> GitResult<()> {
        (**self).fetch(url, refspecs)
    }

    fn ls_remote(&self, url: &str) -> GitResult<RefStream<'_>> {
        (**self).ls_remote(url)
    }

    fn refs(&self, prefix: &str) -> GitResult<RefStream<'_>> {
        (**self).refs(prefix)
    }
}
