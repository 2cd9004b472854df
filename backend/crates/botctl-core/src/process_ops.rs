use crate::ProcessId;

use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;

use botctl_config::BotConfig;

/// Result of a termination request that reached the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalDelivery {
    Delivered,
    /// No such process; it exited before the signal was sent.
    AlreadyGone,
}

/// How to launch the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl LaunchSpec {
    /// `<interpreter> <path>` when an interpreter is configured, else `<path>`.
    pub fn for_bot(bot: &BotConfig) -> Self {
        let path: PathBuf = bot.path.clone();
        match &bot.interpreter {
            Some(interpreter) => Self {
                program: OsString::from(interpreter),
                args: vec![path.into_os_string()],
            },
            None => Self {
                program: path.into_os_string(),
                args: Vec::new(),
            },
        }
    }

    /// Program name for log lines and error messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// OS process primitives used by the lifecycle controller.
pub trait ProcessOps: Send + Sync {
    /// True iff a process with this PID currently exists.
    fn is_alive(&self, pid: ProcessId) -> bool;

    /// Ask the process to terminate gracefully (SIGTERM). Never blocks.
    fn terminate(&self, pid: ProcessId) -> std::io::Result<SignalDelivery>;

    /// Start `launch` detached from the controller, with stdout and stderr
    /// appended to `log`. Returns without waiting for the child.
    fn spawn(&self, launch: &LaunchSpec, log: File) -> std::io::Result<ProcessId>;
}
