use std::fmt;

use crate::error::{HelperError, HelperResult};

/// One command line of the remote-helper protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HelperCommand {
    Capabilities,
    List,
    Fetch { oid: String, name: String },
}

impl HelperCommand {
    /// Parse a command line (without its terminating newline).
    pub fn parse(line: &str) -> HelperResult<Self> {
        let malformed = |reason: &str| HelperError::MalformedCommand {
            line: line.to_string(),
            reason: reason.to_string(),
        };
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| malformed("empty command"))?;
        let args: Vec<&str> = words.collect();

        match (name, args.as_slice()) {
            ("capabilities", []) => Ok(Self::Capabilities),
            ("list", []) => Ok(Self::List),
            ("fetch", [oid, refname]) => Ok(Self::Fetch {
                oid: oid.to_string(),
                name: refname.to_string(),
            }),
            ("capabilities" | "list", _) => Err(malformed("takes no arguments")),
            ("fetch", _) => Err(malformed("expected <oid> <name>")),
            (other, _) => Err(HelperError::UnknownCommand(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Capabilities => "capabilities",
            Self::List => "list",
            Self::Fetch { .. } => "fetch",
        }
    }
}

impl fmt::Display for HelperCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch { oid, name } => write!(f, "fetch {oid} {name}"),
            other => f.write_str(other.name()),
        }
    }
}
