//! Directory mappings of the form `left:right`.
//!
//! A [`DirSpec`] names the subdirectory on the remote side (`left`) and the
//! directory it should appear under locally (`right`). Empty sides mean the
//! repository root. Only the root-to-root mapping can be applied to trees;
//! any other mapping is rejected with [`SpecError::UnsupportedDirSpec`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpecError};

/// A pair of relative directories, normalized without trailing `/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DirSpec {
    left_dir: String,
    right_dir: String,
}

impl DirSpec {
    /// Parse "foo/bar:blarg".
    ///
    /// # Examples
    ///
    /// ```
    /// use subdir_refs::DirSpec;
    ///
    /// let spec = DirSpec::parse("app/:lib").unwrap();
    /// assert_eq!(spec.left_dir(), "app");
    /// assert_eq!(spec.to_string(), "app:lib");
    /// assert!(DirSpec::parse("/abs:lib").is_err());
    /// ```
    pub fn parse(dirspec: &str) -> Result<Self> {
        let invalid = |reason: &str| SpecError::InvalidDirSpec {
            dirspec: dirspec.to_string(),
            reason: reason.to_string(),
        };
        let (left, right) = dirspec
            .split_once(':')
            .ok_or_else(|| invalid("missing ':' separator"))?;
        if right.contains(':') {
            return Err(invalid("more than one ':' separator"));
        }
        if left.starts_with('/') || right.starts_with('/') {
            return Err(invalid("directories must be relative"));
        }
        Ok(Self {
            left_dir: left.trim_end_matches('/').to_string(),
            right_dir: right.trim_end_matches('/').to_string(),
        })
    }

    pub fn left_dir(&self) -> &str {
        &self.left_dir
    }

    pub fn right_dir(&self) -> &str {
        &self.right_dir
    }

    /// Whether both sides name the repository root.
    pub fn is_identity(&self) -> bool {
        self.left_dir.is_empty() && self.right_dir.is_empty()
    }

    /// Fail with [`SpecError::UnsupportedDirSpec`] unless trees can be mapped
    /// through this dirspec. Only the identity mapping can be applied.
    pub fn check_supported(&self) -> Result<()> {
        let unsupported = |reason: &str| SpecError::UnsupportedDirSpec {
            dirspec: self.to_string(),
            reason: reason.to_string(),
        };
        if !self.left_dir.is_empty() {
            return Err(unsupported("cannot extract left directory from tree"));
        }
        if !self.right_dir.is_empty() {
            return Err(unsupported("cannot insert right directory into tree"));
        }
        Ok(())
    }

    /// Map a tree from the left to the right side of this dirspec, returning
    /// the id of the resulting tree.
    ///
    /// Only the identity mapping is supported; it returns `tree` unchanged.
    pub fn map_left_to_right(&self, tree: &str) -> Result<String> {
        self.check_supported()?;
        Ok(tree.to_string())
    }
}

impl fmt::Display for DirSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.left_dir, self.right_dir)
    }
}

impl FromStr for DirSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DirSpec {
    type Error = SpecError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<DirSpec> for String {
    fn from(spec: DirSpec) -> Self {
        spec.to_string()
    }
}
