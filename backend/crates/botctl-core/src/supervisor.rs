use crate::{
    ControlAction, ControlReport, LifecycleController, LogTail, LogTailReport, ProcessId,
    ProcessOps, SystemProcesses,
};

use botctl_auth::Grant;
use botctl_config::BotConfig;

/// Entry point for the web layer: every operation requires a [`Grant`].
pub struct Supervisor<P = SystemProcesses> {
    controller: LifecycleController<P>,
    logs: LogTail,
}

impl Supervisor<SystemProcesses> {
    pub fn new(bot: BotConfig) -> Self {
        Self::with_processes(bot, SystemProcesses::new())
    }
}

impl<P: ProcessOps> Supervisor<P> {
    pub fn with_processes(bot: BotConfig, processes: P) -> Self {
        let logs = LogTail::new(bot.log_file.clone());
        Self {
            controller: LifecycleController::new(bot, processes),
            logs,
        }
    }

    pub fn bot_name(&self) -> &str {
        &self.controller.bot().name
    }

    /// Liveness probe; says nothing about whether `pid` is the bot.
    pub fn is_alive(&self, _grant: &Grant, pid: ProcessId) -> bool {
        self.controller.is_alive(pid)
    }

    pub fn start(&self, _grant: &Grant) -> ControlReport {
        self.controller.start()
    }

    pub fn stop(&self, _grant: &Grant) -> ControlReport {
        self.controller.stop()
    }

    pub fn restart(&self, _grant: &Grant) -> ControlReport {
        self.controller.restart()
    }

    pub fn status(&self, _grant: &Grant) -> ControlReport {
        self.controller.status()
    }

    /// Dispatch one of the closed set of control actions.
    pub fn run(&self, grant: &Grant, action: ControlAction) -> ControlReport {
        match action {
            ControlAction::Start => self.start(grant),
            ControlAction::Stop => self.stop(grant),
            ControlAction::Restart => self.restart(grant),
            ControlAction::Status => self.status(grant),
        }
    }

    pub fn read_log_tail(&self, _grant: &Grant, max_lines: usize) -> LogTailReport {
        self.logs.report(max_lines)
    }
}
