//! The subdir remote: refspec splitting and the protocol command handlers.
//!
//! Each configured refspec `remote*:refs/remotes/<name>/<suffix>*` is split
//! in two:
//!
//! - a *fetchspec* `+remote*:refs/remote-subdir/<name>/<suffix>*` that
//!   stores fetched refs, unmapped, in a private namespace;
//! - a *mapspec* `refs/remote-subdir/<name>/<suffix>*:refs/remotes/<name>/<suffix>*`
//!   that relates those unmapped refs to the names the client tracks.
//!
//! Applying the fetchspec and then the mapspec gives the same result as the
//! configured refspec.

use std::io::Write;

use subdir_git::GitRunner;
use subdir_refs::{DirSpec, RefSpec};
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::error::{HelperError, HelperResult};

/// Capabilities advertised in response to `capabilities`.
pub const CAPABILITIES: &[&str] = &["fetch"];

/// Where fetched refs are stored before dirspec mapping.
pub fn unmapped_ref_prefix(remote: &str) -> String {
    format!("refs/remote-subdir/{remote}/")
}

/// Where the client expects remote-tracking refs after dirspec mapping.
pub fn mapped_ref_prefix(remote: &str) -> String {
    format!("refs/remotes/{remote}/")
}

/// The two phases derived from one configured refspec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecPair {
    /// remote refs → unmapped refs, always forced.
    pub fetchspec: RefSpec,
    /// unmapped refs → mapped refs.
    pub mapspec: RefSpec,
}

/// Split `refspec` (remote → mapped) into a fetch phase and a map phase.
pub fn split_refspec(refspec: &RefSpec, unmapped: &str, mapped: &str) -> HelperResult<SpecPair> {
    let suffix = refspec
        .right_prefix()
        .strip_prefix(mapped)
        .ok_or_else(|| HelperError::RefSpecNamespaceMismatch {
            refspec: refspec.to_string(),
            expected: mapped.to_string(),
        })?;
    let updated = format!("{unmapped}{suffix}");
    Ok(SpecPair {
        fetchspec: refspec.with_right(updated.clone(), Some(true)),
        mapspec: refspec.with_left(updated, None),
    })
}

/// Serves one subdir remote over the remote-helper protocol.
pub struct RemoteSubdirHelper<G> {
    config: RemoteConfig,
    git: G,
    unmapped_prefix: String,
    mapped_prefix: String,
    pairs: Vec<SpecPair>,
}

impl<G: GitRunner> RemoteSubdirHelper<G> {
    pub fn new(config: RemoteConfig, git: G) -> HelperResult<Self> {
        let unmapped_prefix = unmapped_ref_prefix(config.remote());
        let mapped_prefix = mapped_ref_prefix(config.remote());
        let pairs = config
            .refspecs()
            .iter()
            .map(|spec| split_refspec(spec, &unmapped_prefix, &mapped_prefix))
            .collect::<HelperResult<Vec<_>>>()?;

        debug!(url = config.url(), "will fetch from url");
        for pair in &pairs {
            debug!(fetch = %pair.fetchspec, map = %pair.mapspec, "will fetch refs");
        }
        debug!(dirspec = %config.dirspec(), "will map dirs");

        Ok(Self {
            config,
            git,
            unmapped_prefix,
            mapped_prefix,
            pairs,
        })
    }

    pub fn url(&self) -> &str {
        self.config.url()
    }

    pub fn dirspec(&self) -> &DirSpec {
        self.config.dirspec()
    }

    pub fn unmapped_prefix(&self) -> &str {
        &self.unmapped_prefix
    }

    pub fn mapped_prefix(&self) -> &str {
        &self.mapped_prefix
    }

    pub fn pairs(&self) -> &[SpecPair] {
        &self.pairs
    }

    pub fn fetchspecs(&self) -> Vec<RefSpec> {
        self.pairs.iter().map(|p| p.fetchspec.clone()).collect()
    }

    pub fn mapspecs(&self) -> Vec<RefSpec> {
        self.pairs.iter().map(|p| p.mapspec.clone()).collect()
    }

    /// Handle `capabilities`.
    pub fn capabilities<W: Write + ?Sized>(&self, out: &mut W) -> HelperResult<()> {
        for capability in CAPABILITIES {
            writeln!(out, "{capability}")?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Handle `list`.
    ///
    /// The protocol cannot report a ref whose value is not yet known: git
    /// answers a `?` value with a fetch of the null object id and then fails
    /// validating it. So the fetch happens here, and every ref is listed with
    /// its real object id.
    pub fn list<W: Write + ?Sized>(&self, out: &mut W) -> HelperResult<()> {
        self.dirspec().check_supported()?;
        self.git.fetch(self.url(), &self.fetchspecs())?;

        // RemoteConfig guarantees at least one pair. Only the first translates names.
        let names = &self.pairs[0].fetchspec;
        for entry in self.git.refs(&self.unmapped_prefix)? {
            let entry = entry?;
            let Some(name) = names.map_right_to_left(&entry.name) else {
                warn!(
                    unmapped = %entry.name,
                    spec = %names,
                    "skipping ref outside first fetchspec"
                );
                continue;
            };
            let value = self.dirspec().map_left_to_right(&entry.oid)?;
            writeln!(out, "{value} {name}")?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Handle `fetch <oid> <name>`.
    ///
    /// `list` has already fetched every ref, so a well-behaved client never
    /// sends this.
    pub fn fetch<W: Write + ?Sized>(
        &self,
        _out: &mut W,
        oid: &str,
        name: &str,
    ) -> HelperResult<()> {
        Err(HelperError::UnexpectedFetchCall {
            oid: oid.to_string(),
            name: name.to_string(),
        })
    }
}
