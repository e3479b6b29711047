//! In-memory git for testing.
//!
//! [`InMemoryGit`] keeps configuration, the refs each remote url advertises,
//! and the local ref store in plain maps. `fetch` applies every refspec's
//! left-to-right mapping to the advertised refs, like `git fetch` does for
//! glob refspecs, and records the call.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use subdir_refs::RefSpec;

use crate::error::{GitError, GitResult};
use crate::traits::{ConfigStore, GitRunner};
use crate::types::{FetchCall, RefEntry, RefStream};

/// An in-memory implementation of [`ConfigStore`] and [`GitRunner`].
#[derive(Debug, Default)]
pub struct InMemoryGit {
    config: HashMap<String, Vec<String>>,
    remotes: HashMap<String, Vec<RefEntry>>,
    refs: RefCell<BTreeMap<String, String>>,
    fetches: RefCell<Vec<FetchCall>>,
}

impl InMemoryGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to a config key.
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Make `url` advertise `name` at `oid`.
    pub fn with_remote_ref(
        mut self,
        url: impl Into<String>,
        oid: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.remotes
            .entry(url.into())
            .or_default()
            .push(RefEntry::new(oid, name));
        self
    }

    /// Seed a local ref.
    pub fn with_local_ref(self, name: impl Into<String>, oid: impl Into<String>) -> Self {
        self.refs.borrow_mut().insert(name.into(), oid.into());
        self
    }

    /// Every fetch performed so far, oldest first.
    pub fn fetch_calls(&self) -> Vec<FetchCall> {
        self.fetches.borrow().clone()
    }

    /// Snapshot of the local ref store.
    pub fn local_refs(&self) -> BTreeMap<String, String> {
        self.refs.borrow().clone()
    }

    fn advertised(&self, command: &str, url: &str) -> GitResult<&[RefEntry]> {
        self.remotes
            .get(url)
            .map(Vec::as_slice)
            .ok_or_else(|| GitError::CommandFailed {
                command: format!("{command} {url}"),
                status: "exit status: 128".into(),
                stderr: format!("fatal: '{url}' does not appear to be a git repository"),
            })
    }
}

impl ConfigStore for InMemoryGit {
    fn config_get_one(&self, key: &str) -> GitResult<Option<String>> {
        Ok(self.config.get(key).and_then(|values| values.last().cloned()))
    }

    fn config_get_all(&self, key: &str) -> GitResult<Vec<String>> {
        Ok(self.config.get(key).cloned().unwrap_or_default())
    }
}

impl GitRunner for InMemoryGit {
    fn fetch(&self, url: &str, refspecs: &[RefSpec]) -> GitResult<()> {
        let advertised = self.advertised("git fetch", url)?;
        let mut refs = self.refs.borrow_mut();
        for spec in refspecs {
            for entry in advertised {
                if let Some(local) = spec.map_left_to_right(&entry.name) {
                    refs.insert(local, entry.oid.clone());
                }
            }
        }
        self.fetches.borrow_mut().push(FetchCall {
            url: url.to_string(),
            refspecs: refspecs.iter().map(ToString::to_string).collect(),
        });
        Ok(())
    }

    fn ls_remote(&self, url: &str) -> GitResult<RefStream<'_>> {
        let advertised = self.advertised("git ls-remote", url)?;
        Ok(Box::new(advertised.iter().cloned().map(Ok::<_, GitError>)))
    }

    fn refs(&self, prefix: &str) -> GitResult<RefStream<'_>> {
        let matching: Vec<RefEntry> = self
            .refs
            .borrow()
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, oid)| RefEntry::new(oid.clone(), name.clone()))
            .collect();
        Ok(Box::new(matching.into_iter().map(Ok::<_, GitError>)))
    }
}
