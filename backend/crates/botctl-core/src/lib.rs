mod error;
mod identity_store;
mod lifecycle;
mod log_tail;
mod process_id;
mod process_ops;
mod report;
mod supervisor;
mod system_processes;

#[cfg(test)]
mod tests;

pub use error::{Result as SupervisorResult, SupervisorError};
pub use identity_store::IdentityStore;
pub use log_tail::{LOG_MISSING_PLACEHOLDER, LogTail, LogTailReport, MAX_TAIL_BYTES};
pub use process_id::ProcessId;
pub use process_ops::{LaunchSpec, ProcessOps, SignalDelivery};
pub use report::{ControlAction, ControlReport, Outcome};
pub use supervisor::Supervisor;
pub use system_processes::SystemProcesses;

pub(crate) use lifecycle::LifecycleController;
