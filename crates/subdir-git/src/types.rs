use crate::error::GitResult;

/// A ref name paired with the object id it points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefEntry {
    pub oid: String,
    pub name: String,
}

impl RefEntry {
    pub fn new(oid: impl Into<String>, name: impl Into<String>) -> Self {
        Self { oid: oid.into(), name: name.into() }
    }
}

/// Pull-based sequence of refs produced by a listing command.
///
/// Entries are produced as the underlying command emits them; the listing is
/// never required to be buffered in full.
pub type RefStream<'a> = Box<dyn Iterator<Item = GitResult<RefEntry>> + 'a>;

/// One recorded fetch invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchCall {
    pub url: String,
    pub refspecs: Vec<String>,
}
