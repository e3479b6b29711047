use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// A streamed command failed; its stderr went straight to ours.
    #[error("`{command}` exited with {status}")]
    Exited { command: String, status: String },

    #[error("unexpected output from `{command}`: {line:?}")]
    MalformedOutput { command: String, line: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GitResult<T> = Result<T, GitError>;
