//! Remote name validation.
//!
//! A remote name is interpolated into the tracking prefixes
//! (`refs/remote-subdir/<name>/`, `refs/remotes/<name>/`) and into config
//! keys (`remote.<name>.url`), so it follows the ref path rules:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..` or `@{`
//! - Must not start with `-`
//! - May contain `/` between components, but no component may be empty,
//!   start with `.`, or end with `.lock`

use crate::error::{Result, SpecError};

/// Characters that are forbidden anywhere in a remote name.
const FORBIDDEN_CHARS: &[char] = &[
    ' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\',
];

fn invalid(name: &str, reason: impl Into<String>) -> SpecError {
    SpecError::InvalidRemoteName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a remote name, returning `Ok(())` if it can be used to derive
/// tracking prefixes.
///
/// # Examples
///
/// ```
/// use subdir_refs::names::validate_remote_name;
///
/// assert!(validate_remote_name("origin").is_ok());
/// assert!(validate_remote_name("lib-upstream").is_ok());
/// assert!(validate_remote_name("").is_err());
/// assert!(validate_remote_name("team/origin").is_ok());
/// assert!(validate_remote_name("team//origin").is_err());
/// ```
pub fn validate_remote_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "remote name must not be empty"));
    }

    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
    }

    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'"));
    }

    if name.contains("@{") {
        return Err(invalid(name, "must not contain '@{'"));
    }

    // A leading '-' would be read as an option by git subcommands.
    if name.starts_with('-') {
        return Err(invalid(name, "must not start with '-'"));
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid(name, "must not start or end with '/'"));
    }

    if name.contains("//") {
        return Err(invalid(name, "must not contain consecutive slashes"));
    }

    for component in name.split('/') {
        if component.starts_with('.') {
            return Err(invalid(name, format!("component {component:?} starts with '.'")));
        }
        if component.ends_with(".lock") {
            return Err(invalid(name, format!("component {component:?} ends with '.lock'")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_simple_names() {
        assert!(validate_remote_name("origin").is_ok());
        assert!(validate_remote_name("upstream").is_ok());
        assert!(validate_remote_name("lib_v1.0").is_ok());
    }

    #[test]
    fn reject_empty_name() {
        assert!(validate_remote_name("").is_err());
    }

    #[test]
    fn valid_hierarchical_names() {
        assert!(validate_remote_name("team/origin").is_ok());
        assert!(validate_remote_name("a/b/c").is_ok());
    }

    #[test]
    fn reject_bad_slashes() {
        for name in ["/origin", "origin/", "team//origin"] {
            let err = validate_remote_name(name).unwrap_err();
            assert!(matches!(err, SpecError::InvalidRemoteName { .. }), "{name}");
        }
    }

    #[test]
    fn reject_bad_components() {
        assert!(validate_remote_name("team/.hidden").is_err());
        assert!(validate_remote_name("team.lock/origin").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(validate_remote_name("has space").is_err());
        assert!(validate_remote_name("has\ttab").is_err());
        assert!(validate_remote_name("has\nnewline").is_err());
    }

    #[test]
    fn reject_glob_and_refspec_chars() {
        assert!(validate_remote_name("a*b").is_err());
        assert!(validate_remote_name("a:b").is_err());
        assert!(validate_remote_name("a?b").is_err());
        assert!(validate_remote_name("a[b").is_err());
        assert!(validate_remote_name("a~b").is_err());
        assert!(validate_remote_name("a^b").is_err());
        assert!(validate_remote_name("a\\b").is_err());
    }

    #[test]
    fn reject_double_dot_and_reflog_syntax() {
        assert!(validate_remote_name("a..b").is_err());
        assert!(validate_remote_name("a@{0}").is_err());
    }

    #[test]
    fn reject_leading_dot_or_dash() {
        assert!(validate_remote_name(".hidden").is_err());
        assert!(validate_remote_name("-origin").is_err());
    }

    #[test]
    fn reject_lock_suffix() {
        assert!(validate_remote_name("origin.lock").is_err());
    }
}
