//! Real OS implementation of [`ProcessOps`].

use crate::{LaunchSpec, ProcessId, ProcessOps, SignalDelivery};

use std::fs::File;
use std::io;
use std::process::{Child, Command, Stdio};
use std::thread;

use log::{info, warn};

/// Spawns, signals and probes processes through the operating system.
///
/// Every spawned child is handed to a reaper thread that waits on it, so a
/// bot that exits while the controller is running does not linger as a
/// zombie that `is_alive` would still report.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcesses;

impl SystemProcesses {
    pub fn new() -> Self {
        Self
    }

    fn reap_in_background(mut child: Child, pid: ProcessId) {
        let spawned = thread::Builder::new()
            .name(format!("bot-reaper-{pid}"))
            .spawn(move || match child.wait() {
                Ok(status) => info!("Bot process {pid} exited: {status}"),
                Err(e) => warn!("Failed to wait on bot process {pid}: {e}"),
            });

        if let Err(e) = spawned {
            warn!("Could not start reaper thread for PID {pid}: {e}");
        }
    }
}

#[cfg(unix)]
impl ProcessOps for SystemProcesses {
    fn is_alive(&self, pid: ProcessId) -> bool {
        use nix::errno::Errno;
        use nix::sys::signal::kill;

        // Signal 0 only checks existence. EPERM means it exists but belongs
        // to someone else.
        match kill(pid.as_nix(), None) {
            Ok(()) => true,
            Err(Errno::EPERM) => true,
            Err(_) => false,
        }
    }

    fn terminate(&self, pid: ProcessId) -> io::Result<SignalDelivery> {
        use nix::errno::Errno;
        use nix::sys::signal::{Signal, kill};

        info!("Sending SIGTERM to pid {pid}");
        match kill(pid.as_nix(), Signal::SIGTERM) {
            Ok(()) => Ok(SignalDelivery::Delivered),
            Err(Errno::ESRCH) => Ok(SignalDelivery::AlreadyGone),
            Err(errno) => Err(io::Error::from(errno)),
        }
    }

    fn spawn(&self, launch: &LaunchSpec, log: File) -> io::Result<ProcessId> {
        use std::os::unix::process::CommandExt;

        let stderr = log.try_clone()?;

        let mut cmd = Command::new(&launch.program);
        cmd.args(&launch.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(stderr));

        // New session: the bot survives the controller and never receives
        // the controller's terminal signals.
        // SAFETY: setsid is async-signal-safe and the closure allocates nothing.
        unsafe {
            cmd.pre_exec(|| {
                nix::unistd::setsid()
                    .map(drop)
                    .map_err(io::Error::from)
            });
        }

        let child = cmd.spawn()?;
        let pid = ProcessId::new(child.id())
            .ok_or_else(|| io::Error::other(format!("unusable child PID {}", child.id())))?;

        Self::reap_in_background(child, pid);

        Ok(pid)
    }
}

#[cfg(windows)]
impl ProcessOps for SystemProcesses {
    fn is_alive(&self, pid: ProcessId) -> bool {
        use windows_sys::Win32::Foundation::{CloseHandle, STILL_ACTIVE};
        use windows_sys::Win32::System::Threading::{
            GetExitCodeProcess, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION,
        };

        // SAFETY: the handle is checked for null and always closed.
        unsafe {
            let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid.get());
            if handle.is_null() {
                return false;
            }

            let mut exit_code: u32 = 0;
            let result = GetExitCodeProcess(handle, &mut exit_code);
            CloseHandle(handle);

            result != 0 && exit_code == STILL_ACTIVE as u32
        }
    }

    fn terminate(&self, pid: ProcessId) -> io::Result<SignalDelivery> {
        use windows_sys::Win32::Foundation::CloseHandle;
        use windows_sys::Win32::System::Threading::{
            OpenProcess, PROCESS_TERMINATE, TerminateProcess,
        };

        info!("Terminating pid {pid}");
        // SAFETY: the handle is checked for null and always closed.
        unsafe {
            let handle = OpenProcess(PROCESS_TERMINATE, 0, pid.get());
            if handle.is_null() {
                return Ok(SignalDelivery::AlreadyGone);
            }

            let result = TerminateProcess(handle, 1);
            let error = io::Error::last_os_error();
            CloseHandle(handle);

            if result == 0 {
                return Err(error);
            }
        }

        Ok(SignalDelivery::Delivered)
    }

    fn spawn(&self, launch: &LaunchSpec, log: File) -> io::Result<ProcessId> {
        use std::os::windows::process::CommandExt;

        const DETACHED_PROCESS: u32 = 0x0000_0008;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

        let stderr = log.try_clone()?;

        let mut cmd = Command::new(&launch.program);
        cmd.args(&launch.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(stderr))
            .creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);

        let child = cmd.spawn()?;
        let pid = ProcessId::new(child.id())
            .ok_or_else(|| io::Error::other(format!("unusable child PID {}", child.id())))?;

        Self::reap_in_background(child, pid);

        Ok(pid)
    }
}
