use std::io;

use anyhow::Context;
use subdir_git::GitCommand;
use subdir_helper::{RemoteConfig, RemoteSubdirHelper, Session};
use tracing::debug;

use crate::cli::Cli;

pub fn run_helper(cli: Cli) -> anyhow::Result<()> {
    debug!(
        remote = %cli.remote,
        url = ?cli.url,
        git_dir = %cli.git_dir.display(),
        cwd = ?std::env::current_dir().ok(),
        "starting remote helper"
    );

    // Only a configured remote name is accepted: the dirspec and refspecs
    // cannot be passed on the command line.
    let git = GitCommand::new(&cli.git_dir);
    let config = RemoteConfig::load(&git, &cli.remote)
        .with_context(|| format!("invalid configuration for remote {}", cli.remote))?;
    if let Some(url) = cli.url.as_deref().filter(|url| *url != config.url()) {
        debug!(given = url, configured = config.url(), "using configured url");
    }

    let helper = RemoteSubdirHelper::new(config, git)
        .with_context(|| format!("invalid refspecs for remote {}", cli.remote))?;
    let mut session = Session::new(helper);
    session
        .run(io::stdin().lock(), io::stdout().lock())
        .context("remote helper session failed")?;
    debug!(state = ?session.state(), "session ended");
    Ok(())
}
