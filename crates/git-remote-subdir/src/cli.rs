use std::path::PathBuf;

use clap::Parser;

/// Invoked by git as `git-remote-subdir <remote> [<url>]` for remotes
/// configured with `remote.<remote>.vcs = subdir`.
#[derive(Debug, Parser)]
#[command(
    name = "git-remote-subdir",
    about = "git remote helper exposing a subdirectory of a remote repository",
    version,
)]
pub struct Cli {
    /// Name of the configured remote
    pub remote: String,

    /// Url git resolved for the remote (configuration is read from the remote name)
    pub url: Option<String>,

    /// Repository metadata directory
    #[arg(long, env = "GIT_DIR")]
    pub git_dir: PathBuf,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long)]
    pub verbose: bool,
}
