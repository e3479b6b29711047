use subdir_git::GitError;
use subdir_refs::SpecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelperError {
    #[error("missing {} for remote {remote}", .keys.join(", "))]
    MissingConfiguration { remote: String, keys: Vec<String> },

    #[error(
        "remote.{remote}.url cannot start with \"subdir:\" ({url}); \
         configure remote.{remote}.vcs = subdir instead"
    )]
    NestedSubdirRemote { remote: String, url: String },

    #[error("cannot work with refspec {refspec}: the right side does not start with {expected}")]
    RefSpecNamespaceMismatch { refspec: String, expected: String },

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("malformed command {line:?}: {reason}")]
    MalformedCommand { line: String, reason: String },

    #[error("unexpected fetch {oid} {name}: refs were already fetched by list")]
    UnexpectedFetchCall { oid: String, name: String },

    #[error("spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("git error: {0}")]
    Git(#[from] GitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HelperResult<T> = Result<T, HelperError>;
