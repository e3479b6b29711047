//! Glob refspecs of the form `[+]left*:right*`.
//!
//! A [`RefSpec`] stores both sides with the trailing `*` stripped, so mapping
//! a ref is a prefix swap. Values are immutable; [`RefSpec::with_left`] and
//! [`RefSpec::with_right`] derive new specs with one side replaced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpecError};

/// A glob refspec mapping `left_prefix*` to `right_prefix*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RefSpec {
    left_prefix: String,
    right_prefix: String,
    force: bool,
}

fn invalid(spec: &str, reason: &str) -> SpecError {
    SpecError::InvalidRefSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}

/// Strip the single trailing `*` of one refspec side.
fn glob_prefix<'a>(spec: &str, side: &'a str) -> Result<&'a str> {
    let prefix = side
        .strip_suffix('*')
        .ok_or_else(|| invalid(spec, "both sides must end with '*'"))?;
    if prefix.contains('*') {
        return Err(invalid(spec, "'*' is only allowed at the end of each side"));
    }
    Ok(prefix)
}

impl RefSpec {
    /// Build a refspec from literal prefixes (without the trailing `*`).
    pub fn new(
        left_prefix: impl Into<String>,
        right_prefix: impl Into<String>,
        force: bool,
    ) -> Self {
        Self {
            left_prefix: left_prefix.into(),
            right_prefix: right_prefix.into(),
            force,
        }
    }

    /// Parse "+refs/heads/*:refs/remotes/origin/*".
    ///
    /// # Examples
    ///
    /// ```
    /// use subdir_refs::RefSpec;
    ///
    /// let spec = RefSpec::parse("+refs/heads/*:refs/remotes/origin/*").unwrap();
    /// assert!(spec.force());
    /// assert_eq!(spec.left_prefix(), "refs/heads/");
    /// assert_eq!(spec.right_prefix(), "refs/remotes/origin/");
    /// assert!(RefSpec::parse("refs/heads/main:refs/remotes/origin/main").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        let (force, rest) = match spec.strip_prefix('+') {
            Some(stripped) => (true, stripped),
            None => (false, spec),
        };
        let (left, right) = rest
            .split_once(':')
            .ok_or_else(|| invalid(spec, "missing ':' separator"))?;
        if right.contains(':') {
            return Err(invalid(spec, "more than one ':' separator"));
        }
        let left_prefix = glob_prefix(spec, left)?;
        let right_prefix = glob_prefix(spec, right)?;
        Ok(Self::new(left_prefix, right_prefix, force))
    }

    pub fn left_prefix(&self) -> &str {
        &self.left_prefix
    }

    pub fn right_prefix(&self) -> &str {
        &self.right_prefix
    }

    /// Whether non-fast-forward updates are allowed.
    pub fn force(&self) -> bool {
        self.force
    }

    /// Map a ref from the left side to the right side.
    ///
    /// Returns `None` iff `left_ref` does not match the left side.
    pub fn map_left_to_right(&self, left_ref: &str) -> Option<String> {
        left_ref
            .strip_prefix(self.left_prefix.as_str())
            .map(|rest| format!("{}{rest}", self.right_prefix))
    }

    /// Map a ref from the right side to the left side.
    ///
    /// Returns `None` iff `right_ref` does not match the right side.
    pub fn map_right_to_left(&self, right_ref: &str) -> Option<String> {
        right_ref
            .strip_prefix(self.right_prefix.as_str())
            .map(|rest| format!("{}{rest}", self.left_prefix))
    }

    /// Return a new refspec with the given left prefix.
    ///
    /// `force` defaults to this spec's flag when `None`.
    pub fn with_left(&self, left_prefix: impl Into<String>, force: Option<bool>) -> Self {
        Self::new(left_prefix, self.right_prefix.clone(), force.unwrap_or(self.force))
    }

    /// Return a new refspec with the given right prefix.
    ///
    /// `force` defaults to this spec's flag when `None`.
    pub fn with_right(&self, right_prefix: impl Into<String>, force: Option<bool>) -> Self {
        Self::new(self.left_prefix.clone(), right_prefix, force.unwrap_or(self.force))
    }
}

impl fmt::Display for RefSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.force {
            f.write_str("+")?;
        }
        write!(f, "{}*:{}*", self.left_prefix, self.right_prefix)
    }
}

impl FromStr for RefSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RefSpec {
    type Error = SpecError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<RefSpec> for String {
    fn from(spec: RefSpec) -> Self {
        spec.to_string()
    }
}
