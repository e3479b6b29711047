//! [`GitRunner`] and [`ConfigStore`] backed by the `git` binary.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Output, Stdio};

use subdir_refs::RefSpec;
use tracing::debug;

use crate::error::{GitError, GitResult};
use crate::traits::{ConfigStore, GitRunner};
use crate::types::{RefEntry, RefStream};

/// `git config --get` exits with this status when the key is not set.
const CONFIG_KEY_MISSING: i32 = 1;

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lazily yields the stdout lines of a running command.
///
/// When stdout is exhausted the child is reaped; a non-zero exit status is
/// reported as a final [`GitError::Exited`] item. The child's stderr is
/// inherited. Dropping the stream before that point kills the child.
pub struct LineStream {
    command: String,
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    done: bool,
}

impl LineStream {
    /// Spawn `command` with its stdout piped into the stream.
    pub fn spawn(mut command: Command) -> GitResult<Self> {
        let description = describe(&command);
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn {
                command: description.clone(),
                source,
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("child stdout was not captured"))?;
        Ok(Self {
            command: description,
            child,
            lines: BufReader::new(stdout).lines(),
            done: false,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn finish(&mut self) -> Option<GitResult<String>> {
        self.done = true;
        match self.child.wait() {
            Ok(status) if status.success() => None,
            Ok(status) => Some(Err(GitError::Exited {
                command: self.command.clone(),
                status: status.to_string(),
            })),
            Err(e) => Some(Err(e.into())),
        }
    }
}

impl Iterator for LineStream {
    type Item = GitResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lines.next() {
            Some(Ok(line)) => Some(Ok(line)),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e.into()))
            }
            None => self.finish(),
        }
    }
}

impl Drop for LineStream {
    fn drop(&mut self) {
        if !self.done {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Parse one `git ls-remote` line: `<oid>\t<refname>`.
pub fn parse_ls_remote_line(command: &str, line: &str) -> GitResult<RefEntry> {
    line.split_once('\t')
        .map(|(oid, name)| RefEntry::new(oid, name))
        .ok_or_else(|| GitError::MalformedOutput {
            command: command.to_string(),
            line: line.to_string(),
        })
}

/// Parse one `git for-each-ref --format=%(objectname)%00%(refname)` line.
pub fn parse_for_each_ref_line(command: &str, line: &str) -> GitResult<RefEntry> {
    line.split_once('\0')
        .map(|(oid, name)| RefEntry::new(oid, name))
        .ok_or_else(|| GitError::MalformedOutput {
            command: command.to_string(),
            line: line.to_string(),
        })
}

fn ref_stream(
    stream: LineStream,
    parse: fn(&str, &str) -> GitResult<RefEntry>,
) -> RefStream<'static> {
    let command = stream.command().to_string();
    Box::new(stream.map(move |line| {
        let line = line?;
        debug!(command = %command, line = ?line, "ref line");
        parse(&command, &line)
    }))
}

/// Runs `git --git-dir=<dir> ...` against one local repository.
#[derive(Clone, Debug)]
pub struct GitCommand {
    git_dir: PathBuf,
}

impl GitCommand {
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self { git_dir: git_dir.into() }
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut git_dir = OsString::from("--git-dir=");
        git_dir.push(&self.git_dir);
        let mut command = Command::new("git");
        command.arg(git_dir);
        command.args(args.into_iter().map(Into::into));
        command
    }

    fn output(&self, mut command: Command) -> GitResult<(String, Output)> {
        let description = describe(&command);
        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                command: description.clone(),
                source,
            })?;
        Ok((description, output))
    }

    fn config_values(&self, flag: &str, key: &str) -> GitResult<Option<Vec<String>>> {
        let (description, output) = self.output(self.command(["config", flag, key]))?;
        if output.status.code() == Some(CONFIG_KEY_MISSING) {
            return Ok(None);
        }
        if !output.status.success() {
            return Err(failed(description, &output));
        }
        let stdout = String::from_utf8(output.stdout).map_err(|e| GitError::MalformedOutput {
            command: description,
            line: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })?;
        Ok(Some(stdout.lines().map(|l| l.trim_end().to_string()).collect()))
    }
}

fn failed(command: String, output: &Output) -> GitError {
    GitError::CommandFailed {
        command,
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

impl ConfigStore for GitCommand {
    fn config_get_one(&self, key: &str) -> GitResult<Option<String>> {
        debug!(key, "config_get_one");
        let values = self.config_values("--get", key)?;
        Ok(values.and_then(|v| v.into_iter().next()))
    }

    fn config_get_all(&self, key: &str) -> GitResult<Vec<String>> {
        debug!(key, "config_get_all");
        Ok(self.config_values("--get-all", key)?.unwrap_or_default())
    }
}

impl GitRunner for GitCommand {
    fn fetch(&self, url: &str, refspecs: &[RefSpec]) -> GitResult<()> {
        let specs: Vec<String> = refspecs.iter().map(ToString::to_string).collect();
        debug!(url, refspecs = ?specs, "fetch");
        let mut args = vec!["fetch".to_string(), url.to_string()];
        args.extend(specs);
        let (description, output) = self.output(self.command(args))?;
        if !output.status.success() {
            return Err(failed(description, &output));
        }
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            debug!(line, "fetch progress");
        }
        Ok(())
    }

    fn ls_remote(&self, url: &str) -> GitResult<RefStream<'_>> {
        debug!(url, "ls_remote");
        let stream = LineStream::spawn(self.command(["ls-remote", url]))?;
        Ok(ref_stream(stream, parse_ls_remote_line))
    }

    fn refs(&self, prefix: &str) -> GitResult<RefStream<'_>> {
        debug!(prefix, "refs");
        let stream = LineStream::spawn(self.command([
            "for-each-ref",
            "--format=%(objectname)%00%(refname)",
            prefix,
        ]))?;
        Ok(ref_stream(stream, parse_for_each_ref_line))
    }
}
