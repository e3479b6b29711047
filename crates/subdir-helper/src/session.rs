//! The request/response loop between git and the helper.
//!
//! Commands arrive one per line. Each response is flushed before the next
//! line is read. An empty line or end of input ends the session.

use std::io::{BufRead, Write};

use subdir_git::GitRunner;
use tracing::debug;

use crate::command::HelperCommand;
use crate::error::HelperResult;
use crate::helper::RemoteSubdirHelper;

/// Lifecycle of one helper session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Constructed,
    CapabilitiesAdvertised,
    Listed,
    Terminated,
}

pub struct Session<G> {
    helper: RemoteSubdirHelper<G>,
    state: SessionState,
}

impl<G: GitRunner> Session<G> {
    pub fn new(helper: RemoteSubdirHelper<G>) -> Self {
        Self {
            helper,
            state: SessionState::Constructed,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn helper(&self) -> &RemoteSubdirHelper<G> {
        &self.helper
    }

    /// Serve commands from `input` until an empty line or end of input.
    ///
    /// Any error ends the session; nothing is swallowed.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> HelperResult<()> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = input.read_line(&mut line)?;
            let command_line = line.trim_end_matches(['\n', '\r']);
            debug!(line = command_line, "command line");
            if read == 0 || command_line.is_empty() {
                break;
            }
            let command = HelperCommand::parse(command_line)?;
            self.dispatch(&command, &mut output)?;
            output.flush()?;
        }
        self.transition(SessionState::Terminated);
        Ok(())
    }

    /// Run a single command's handler.
    pub fn dispatch<W: Write + ?Sized>(
        &mut self,
        command: &HelperCommand,
        out: &mut W,
    ) -> HelperResult<()> {
        match command {
            HelperCommand::Capabilities => {
                self.helper.capabilities(out)?;
                if self.state == SessionState::Constructed {
                    self.transition(SessionState::CapabilitiesAdvertised);
                }
            }
            HelperCommand::List => {
                self.helper.list(out)?;
                self.transition(SessionState::Listed);
            }
            HelperCommand::Fetch { oid, name } => {
                debug!(state = ?self.state, "fetch requested");
                self.helper.fetch(out, oid, name)?;
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        }
    }
}
