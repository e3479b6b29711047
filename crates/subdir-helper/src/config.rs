//! Per-remote configuration, assembled once at startup.

use subdir_git::ConfigStore;
use subdir_refs::{validate_remote_name, DirSpec, RefSpec};
use tracing::debug;

use crate::error::{HelperError, HelperResult};

/// The url scheme this helper is invoked for.
pub const HELPER_SCHEME: &str = "subdir:";

/// Validated settings of one subdir remote.
///
/// Read from `remote.<name>.url`, `remote.<name>.dirspec` and the
/// multi-valued `remote.<name>.fetch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    remote: String,
    url: String,
    dirspec: DirSpec,
    refspecs: Vec<RefSpec>,
}

impl RemoteConfig {
    /// Validate raw settings. Missing values are `None` or empty.
    ///
    /// Every missing key is reported at once; a nested `subdir:` url is
    /// rejected before the specs are parsed.
    pub fn new(
        remote: &str,
        url: Option<String>,
        dirspec: Option<String>,
        refspecs: Vec<String>,
    ) -> HelperResult<Self> {
        validate_remote_name(remote)?;

        let url = url.filter(|u| !u.is_empty());
        let dirspec = dirspec.filter(|d| !d.is_empty());

        let mut missing = Vec::new();
        if url.is_none() {
            missing.push(format!("remote.{remote}.url"));
        }
        if dirspec.is_none() {
            missing.push(format!("remote.{remote}.dirspec"));
        }
        if refspecs.is_empty() {
            missing.push(format!("remote.{remote}.fetch"));
        }
        let (Some(url), Some(dirspec), true) = (url, dirspec, missing.is_empty()) else {
            return Err(HelperError::MissingConfiguration {
                remote: remote.to_string(),
                keys: missing,
            });
        };

        // TODO: support nested subdir remotes by resolving the inner remote's config.
        if url.starts_with(HELPER_SCHEME) {
            return Err(HelperError::NestedSubdirRemote {
                remote: remote.to_string(),
                url,
            });
        }

        let dirspec = DirSpec::parse(&dirspec)?;
        let refspecs = refspecs
            .iter()
            .map(|s| RefSpec::parse(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            remote: remote.to_string(),
            url,
            dirspec,
            refspecs,
        })
    }

    /// Read and validate the settings of `remote` from `store`.
    pub fn load<S: ConfigStore + ?Sized>(store: &S, remote: &str) -> HelperResult<Self> {
        validate_remote_name(remote)?;
        let url = store.config_get_one(&format!("remote.{remote}.url"))?;
        let dirspec = store.config_get_one(&format!("remote.{remote}.dirspec"))?;
        let refspecs = store.config_get_all(&format!("remote.{remote}.fetch"))?;
        debug!(remote, ?url, ?dirspec, ?refspecs, "loaded remote config");
        Self::new(remote, url, dirspec, refspecs)
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn dirspec(&self) -> &DirSpec {
        &self.dirspec
    }

    /// Configured refspecs, in configuration order. Never empty.
    pub fn refspecs(&self) -> &[RefSpec] {
        &self.refspecs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subdir_git::InMemoryGit;
    use subdir_refs::SpecError;

    const URL: &str = "https://example/repo.git";

    fn store() -> InMemoryGit {
        InMemoryGit::new()
            .with_config("remote.origin.url", URL)
            .with_config("remote.origin.dirspec", ":")
            .with_config("remote.origin.fetch", "+refs/heads/*:refs/remotes/origin/*")
    }

    #[test]
    fn load_complete_config() {
        let config = RemoteConfig::load(&store(), "origin").unwrap();
        assert_eq!(config.remote(), "origin");
        assert_eq!(config.url(), URL);
        assert!(config.dirspec().is_identity());
        assert_eq!(config.refspecs().len(), 1);
        assert_eq!(
            config.refspecs()[0].to_string(),
            "+refs/heads/*:refs/remotes/origin/*"
        );
    }

    #[test]
    fn load_multiple_refspecs_in_order() {
        let store =
            store().with_config("remote.origin.fetch", "+refs/tags/*:refs/remotes/origin/tags/*");
        let config = RemoteConfig::load(&store, "origin").unwrap();
        let specs: Vec<String> = config.refspecs().iter().map(ToString::to_string).collect();
        assert_eq!(
            specs,
            vec![
                "+refs/heads/*:refs/remotes/origin/*",
                "+refs/tags/*:refs/remotes/origin/tags/*",
            ]
        );
    }

    #[test]
    fn missing_url() {
        let store = InMemoryGit::new()
            .with_config("remote.origin.dirspec", ":")
            .with_config("remote.origin.fetch", "+refs/heads/*:refs/remotes/origin/*");
        let err = RemoteConfig::load(&store, "origin").unwrap_err();
        match err {
            HelperError::MissingConfiguration { keys, .. } => {
                assert_eq!(keys, vec!["remote.origin.url"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_dirspec() {
        let store = InMemoryGit::new()
            .with_config("remote.origin.url", URL)
            .with_config("remote.origin.fetch", "+refs/heads/*:refs/remotes/origin/*");
        let err = RemoteConfig::load(&store, "origin").unwrap_err();
        assert!(matches!(err, HelperError::MissingConfiguration { .. }));
    }

    #[test]
    fn missing_refspecs() {
        let store = InMemoryGit::new()
            .with_config("remote.origin.url", URL)
            .with_config("remote.origin.dirspec", ":");
        let err = RemoteConfig::load(&store, "origin").unwrap_err();
        match err {
            HelperError::MissingConfiguration { keys, .. } => {
                assert_eq!(keys, vec!["remote.origin.fetch"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unconfigured_remote_reports_every_key() {
        let err = RemoteConfig::load(&store(), "upstream").unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing remote.upstream.url, remote.upstream.dirspec, remote.upstream.fetch \
             for remote upstream"
        );
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = RemoteConfig::new("origin", Some(String::new()), Some(":".into()), vec![
            "+refs/heads/*:refs/remotes/origin/*".into(),
        ])
        .unwrap_err();
        assert!(matches!(err, HelperError::MissingConfiguration { .. }));
    }

    #[test]
    fn nested_subdir_url() {
        let err = RemoteConfig::new(
            "origin",
            Some("subdir:https://example/repo.git".into()),
            Some(":".into()),
            vec!["+refs/heads/*:refs/remotes/origin/*".into()],
        )
        .unwrap_err();
        assert!(matches!(err, HelperError::NestedSubdirRemote { .. }));
        assert!(err.to_string().contains("remote.origin.vcs = subdir"));
    }

    #[test]
    fn invalid_refspec() {
        let err = RemoteConfig::new(
            "origin",
            Some(URL.into()),
            Some(":".into()),
            vec!["refs/heads/main:refs/remotes/origin/main".into()],
        )
        .unwrap_err();
        assert!(matches!(err, HelperError::Spec(SpecError::InvalidRefSpec { .. })));
    }

    #[test]
    fn invalid_dirspec() {
        let err = RemoteConfig::new(
            "origin",
            Some(URL.into()),
            Some("/abs:".into()),
            vec!["+refs/heads/*:refs/remotes/origin/*".into()],
        )
        .unwrap_err();
        assert!(matches!(err, HelperError::Spec(SpecError::InvalidDirSpec { .. })));
    }

    #[test]
    fn invalid_remote_name() {
        for name in ["a//b", "/origin", "-origin"] {
            let err = RemoteConfig::load(&store(), name).unwrap_err();
            assert!(matches!(err, HelperError::Spec(SpecError::InvalidRemoteName { .. })));
        }
    }

    #[test]
    fn load_hierarchical_remote_name() {
        let store = InMemoryGit::new()
            .with_config("remote.team/origin.url", URL)
            .with_config("remote.team/origin.dirspec", ":")
            .with_config("remote.team/origin.fetch", "+refs/heads/*:refs/remotes/team/origin/*");
        let config = RemoteConfig::load(&store, "team/origin").unwrap();
        assert_eq!(config.remote(), "team/origin");
        assert_eq!(
            config.refspecs()[0].to_string(),
            "+refs/heads/*:refs/remotes/team/origin/*"
        );
    }
}
