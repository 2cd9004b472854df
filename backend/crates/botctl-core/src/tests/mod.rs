
use crate::{LaunchSpec, ProcessId, ProcessOps, SignalDelivery};

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use botctl_auth::{Grant, TokenValidator};
use botctl_config::BotConfig;
use tempfile::TempDir;

pub(crate) const BOT_NAME: &str = "Test Bot";
const FIRST_FAKE_PID: u32 = 4000;

/// In-memory stand-in for the OS: records every call, spawns nothing.
pub(crate) struct FakeProcesses {
    state: Mutex<FakeState>,
}

#[derive(Default)]
pub(crate) struct FakeState {
    pub alive: HashSet<u32>,
    pub spawned: Vec<LaunchSpec>,
    pub terminated: Vec<u32>,
    pub next_pid: u32,
    pub spawn_error: Option<io::ErrorKind>,
    pub terminate_error: Option<io::ErrorKind>,
    pub spawn_delay: Duration,
}

impl FakeProcesses {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_pid: FIRST_FAKE_PID,
                ..FakeState::default()
            }),
        }
    }

    pub(crate) fn configure(self, f: impl FnOnce(&mut FakeState)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub(crate) fn mark_alive(&self, pid: u32) {
        self.state.lock().unwrap().alive.insert(pid);
    }

    pub(crate) fn kill_externally(&self, pid: u32) {
        self.state.lock().unwrap().alive.remove(&pid);
    }

    pub(crate) fn spawn_count(&self) -> usize {
        self.state.lock().unwrap().spawned.len()
    }

    pub(crate) fn last_launch(&self) -> Option<LaunchSpec> {
        self.state.lock().unwrap().spawned.last().cloned()
    }

    pub(crate) fn terminated(&self) -> Vec<u32> {
        self.state.lock().unwrap().terminated.clone()
    }

    pub(crate) fn alive_count(&self) -> usize {
        self.state.lock().unwrap().alive.len()
    }
}

impl ProcessOps for FakeProcesses {
    fn is_alive(&self, pid: ProcessId) -> bool {
        self.state.lock().unwrap().alive.contains(&pid.get())
    }

    fn terminate(&self, pid: ProcessId) -> io::Result<SignalDelivery> {
        let mut state = self.state.lock().unwrap();
        state.terminated.push(pid.get());

        if let Some(kind) = state.terminate_error {
            return Err(io::Error::from(kind));
        }

        if state.alive.remove(&pid.get()) {
            Ok(SignalDelivery::Delivered)
        } else {
            Ok(SignalDelivery::AlreadyGone)
        }
    }

    fn spawn(&self, launch: &LaunchSpec, _log: File) -> io::Result<ProcessId> {
        let delay = self.state.lock().unwrap().spawn_delay;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let mut state = self.state.lock().unwrap();
        if let Some(kind) = state.spawn_error {
            return Err(io::Error::from(kind));
        }

        let pid = state.next_pid;
        state.next_pid += 1;
        state.alive.insert(pid);
        state.spawned.push(launch.clone());

        Ok(ProcessId::new(pid).unwrap())
    }
}

/// Bot config rooted in `dir`, with an existing bot file.
pub(crate) fn bot_in(dir: &Path) -> BotConfig {
    let path = dir.join("bot.py");
    std::fs::write(&path, "print('hello')\n").unwrap();

    BotConfig {
        name: BOT_NAME.to_string(),
        path,
        interpreter: Some("python3".to_string()),
        pid_file: dir.join("bot.pid"),
        log_file: dir.join("bot.log"),
    }
}

pub(crate) fn temp_bot() -> (TempDir, BotConfig) {
    let temp = TempDir::new().unwrap();
    let bot = bot_in(temp.path());
    (temp, bot)
}

pub(crate) fn grant() -> Grant {
    TokenValidator::new("test-token")
        .authorize(Some("test-token"))
        .unwrap()
}

pub(crate) fn write_pid_file(bot: &BotConfig, content: &str) {
    std::fs::write(&bot.pid_file, content).unwrap();
}

pub(crate) fn read_pid_file(bot: &BotConfig) -> Option<String> {
    std::fs::read_to_string(&bot.pid_file).ok()
}

/// Poll `condition` until it holds or `timeout` elapses.
pub(crate) fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    condition()
}
