//! Durable record of the managed bot's PID.
//!
//! The record is a single text file holding one positive integer. Its
//! presence means the controller started a bot; it says nothing about
//! whether that bot is still alive.

use crate::{ProcessId, SupervisorError, SupervisorResult};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored PID.
    ///
    /// Returns `Ok(None)` when no record exists and `CorruptRecord` when the
    /// file holds anything but a positive PID.
    pub fn load(&self) -> SupervisorResult<Option<ProcessId>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SupervisorError::io(&self.path, e)),
        };

        let content = String::from_utf8_lossy(&bytes);
        ProcessId::parse(&content)
            .map(Some)
            .ok_or_else(|| SupervisorError::corrupt_record(&self.path, &content))
    }

    /// Replace the record with `pid`.
    ///
    /// Writes a sibling temp file, syncs it and renames it over the record so
    /// a concurrent `load` sees either the old or the new PID, never a torn
    /// write.
    pub fn save(&self, pid: ProcessId) -> SupervisorResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir).map_err(|e| SupervisorError::io(dir, e))?;
        }

        let temp_path = self.temp_path();

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| SupervisorError::io(&temp_path, e))?;

            file.write_all(pid.to_string().as_bytes())
                .map_err(|e| SupervisorError::io(&temp_path, e))?;

            file.sync_all()
                .map_err(|e| SupervisorError::io(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            SupervisorError::io(&self.path, e)
        })?;

        Ok(())
    }

    /// Delete the record. Succeeds when it is already gone.
    pub fn clear(&self) -> SupervisorResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SupervisorError::io(&self.path, e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("pid"));

        self.path
            .with_file_name(format!("{file_name}.tmp.{}", std::process::id()))
    }
}
