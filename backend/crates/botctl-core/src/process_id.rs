use std::fmt;

use serde::Serialize;

/// Operating-system identifier of the managed process.
///
/// Always in `1..=i32::MAX`: zero and negative values address process
/// groups (or every process) when passed to `kill`, so they are never
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    pub const MAX: u32 = i32::MAX as u32;

    pub fn new(raw: u32) -> Option<Self> {
        (1..=Self::MAX).contains(&raw).then_some(Self(raw))
    }

    /// Parse the textual form kept in the PID file.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<u32>().ok().and_then(Self::new)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    #[cfg(unix)]
    pub(crate) fn as_nix(self) -> nix::unistd::Pid {
        // In range by construction.
        nix::unistd::Pid::from_raw(self.0 as i32)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
