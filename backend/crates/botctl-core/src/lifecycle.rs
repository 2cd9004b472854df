//! Start/stop/restart/status of the single managed bot.

use crate::{
    ControlAction, ControlReport, IdentityStore, LaunchSpec, Outcome, ProcessId, ProcessOps,
    SignalDelivery, SupervisorError, SupervisorResult,
};

use std::fs::{File, OpenOptions};
use std::sync::{Mutex, MutexGuard, PoisonError};

use botctl_config::BotConfig;
use log::{error, info, warn};

/// Drives the bot through `Absent -> Running -> Absent`, reconciling stale
/// records left by crashes or external kills.
///
/// The PID file is the only state; nothing about the bot is cached between
/// calls. Mutating operations hold `gate` for their whole duration, so two
/// racing starts cannot both spawn. `status` takes no lock.
pub struct LifecycleController<P> {
    bot: BotConfig,
    launch: LaunchSpec,
    store: IdentityStore,
    processes: P,
    gate: Mutex<()>,
}

impl<P: ProcessOps> LifecycleController<P> {
    pub fn new(bot: BotConfig, processes: P) -> Self {
        Self {
            launch: LaunchSpec::for_bot(&bot),
            store: IdentityStore::new(bot.pid_file.clone()),
            bot,
            processes,
            gate: Mutex::new(()),
        }
    }

    pub fn bot(&self) -> &BotConfig {
        &self.bot
    }

    #[cfg(test)]
    pub fn store(&self) -> &IdentityStore {
        &self.store
    }

    #[cfg(test)]
    pub fn processes(&self) -> &P {
        &self.processes
    }

    pub fn is_alive(&self, pid: ProcessId) -> bool {
        self.processes.is_alive(pid)
    }

    pub fn start(&self) -> ControlReport {
        let _gate = self.lock_gate();
        self.start_locked()
            .unwrap_or_else(|e| self.failure(ControlAction::Start, e))
    }

    pub fn stop(&self) -> ControlReport {
        let _gate = self.lock_gate();
        self.stop_locked()
            .unwrap_or_else(|e| self.failure(ControlAction::Stop, e))
    }

    /// Stop then start under one hold of the gate. A stop that ends in
    /// anything but a free slot is returned as-is and nothing is started.
    pub fn restart(&self) -> ControlReport {
        let _gate = self.lock_gate();

        let stopped = match self.stop_locked() {
            Ok(report) => report,
            Err(e) => return self.failure(ControlAction::Restart, e),
        };

        if !stopped.outcome.allows_start() {
            return stopped.with_action(ControlAction::Restart);
        }

        match self.start_locked() {
            Ok(report) => report.with_action(ControlAction::Restart),
            Err(e) => self.failure(ControlAction::Restart, e),
        }
    }

    /// Read-only: a dead PID is reported, not cleared. The next start
    /// overwrites it and the next stop removes it.
    pub fn status(&self) -> ControlReport {
        let action = ControlAction::Status;

        match self.store.load() {
            Ok(None) => self.success(action, Outcome::NotRunning, None),
            Ok(Some(pid)) if self.processes.is_alive(pid) => {
                self.success(action, Outcome::Running, Some(pid))
            }
            Ok(Some(pid)) => self.success(action, Outcome::Dead, Some(pid)),
            Err(e) => self.failure(action, e),
        }
    }

    fn start_locked(&self) -> SupervisorResult<ControlReport> {
        let action = ControlAction::Start;

        if !self.bot.path.is_file() {
            return Err(SupervisorError::executable_missing(&self.bot.path));
        }

        if let Some(pid) = self.store.load()? {
            if self.processes.is_alive(pid) {
                info!("{} already running with PID {pid}", self.bot.name);
                return Ok(self.success(action, Outcome::AlreadyRunning, Some(pid)));
            }
            warn!(
                "PID file names dead process {pid}; starting {} again",
                self.bot.name
            );
        }

        let log = self.open_log()?;

        info!(
            "Spawning {} ({} {:?})",
            self.bot.name,
            self.launch.program_name(),
            self.launch.args
        );
        let pid = self
            .processes
            .spawn(&self.launch, log)
            .map_err(|e| SupervisorError::spawn_failure(&self.launch.program_name(), e))?;

        if let Err(e) = self.store.save(pid) {
            // Without a record nothing could ever stop this child.
            error!("Could not record PID {pid}, terminating the new process: {e}");
            if let Err(kill_err) = self.processes.terminate(pid) {
                error!("Failed to terminate unrecorded PID {pid}: {kill_err}");
            }
            return Err(e);
        }

        info!("{} started with PID {pid}", self.bot.name);
        Ok(self.success(action, Outcome::Started, Some(pid)))
    }

    fn stop_locked(&self) -> SupervisorResult<ControlReport> {
        let action = ControlAction::Stop;

        let pid = match self.store.load() {
            Ok(Some(pid)) => pid,
            Ok(None) => return Ok(self.success(action, Outcome::NotRunning, None)),
            Err(SupervisorError::CorruptRecord { path, content, .. }) => {
                warn!(
                    "Discarding corrupt PID file {} (content: {content:?})",
                    path.display()
                );
                self.store.clear()?;
                return Ok(self.success(action, Outcome::StaleRecordCleared, None));
            }
            Err(e) => return Err(e),
        };

        let delivery = self.processes.terminate(pid);

        // The record goes away whatever the signal did.
        self.store.clear()?;

        match delivery {
            Ok(SignalDelivery::Delivered) => {
                info!("{} stopped (PID {pid})", self.bot.name);
            }
            Ok(SignalDelivery::AlreadyGone) => {
                info!("PID {pid} had already exited; record cleared");
            }
            Err(e) => return Err(SupervisorError::signal_failure(pid, e)),
        }

        Ok(self.success(action, Outcome::Stopped, Some(pid)))
    }

    /// The controller only ever appends; the log is never truncated here.
    fn open_log(&self) -> SupervisorResult<File> {
        let path = &self.bot.log_file;

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir).map_err(|e| SupervisorError::io(dir, e))?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SupervisorError::io(path, e))
    }

    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned gate carries no broken state.
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn success(
        &self,
        action: ControlAction,
        outcome: Outcome,
        pid: Option<ProcessId>,
    ) -> ControlReport {
        ControlReport::success(action, outcome, pid, &self.bot.name)
    }

    fn failure(&self, action: ControlAction, e: SupervisorError) -> ControlReport {
        error!("{:?} failed: {e}", action);
        ControlReport::failure(action, &e, &self.bot.name)
    }
}
