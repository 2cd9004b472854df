//! Bounded reads of the bot's log file.
//!
//! Only the end of the file is read, block by block, until enough line
//! breaks have been seen or [`MAX_TAIL_BYTES`] have been read, so request
//! latency does not grow with the log.

use crate::{SupervisorError, SupervisorResult};

use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde::Serialize;

pub const LOG_MISSING_PLACEHOLDER: &str = "No log file yet.";

/// Most bytes one tail read pulls from the end of the log. A line longer
/// than this comes back cut to its last `MAX_TAIL_BYTES` bytes.
pub const MAX_TAIL_BYTES: u64 = 4 * 1024 * 1024;

const BLOCK_SIZE: u64 = 8 * 1024;

/// Last lines of the log, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct LogTailReport {
    pub code: &'static str,
    pub lines: Vec<String>,
    /// Lines joined with `\n`, the placeholder, or an error message
    pub text: String,
}

pub struct LogTail {
    path: PathBuf,
}

impl LogTail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last `max_lines` lines in file order, or `None` if the log does not
    /// exist yet.
    pub fn read(&self, max_lines: usize) -> SupervisorResult<Option<Vec<String>>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SupervisorError::io(&self.path, e)),
        };

        if max_lines == 0 {
            return Ok(Some(Vec::new()));
        }

        let bytes =
            Self::tail_bytes(&mut file, max_lines).map_err(|e| SupervisorError::io(&self.path, e))?;

        let text = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = text.lines().collect();
        let skip = lines.len().saturating_sub(max_lines);

        Ok(Some(lines[skip..].iter().map(|l| l.to_string()).collect()))
    }

    /// Never fails: a missing log yields the placeholder, an unreadable one
    /// an error message.
    pub fn report(&self, max_lines: usize) -> LogTailReport {
        match self.read(max_lines) {
            Ok(Some(lines)) => LogTailReport {
                code: "OK",
                text: lines.join("\n"),
                lines,
            },
            Ok(None) => LogTailReport {
                code: "LOG_MISSING",
                lines: Vec::new(),
                text: LOG_MISSING_PLACEHOLDER.to_string(),
            },
            Err(e) => {
                log::error!("{e}");
                LogTailReport {
                    code: e.code(),
                    lines: Vec::new(),
                    text: format!("Cannot read log: {}", e.user_message("")),
                }
            }
        }
    }

    /// Read backwards from EOF until more than `max_lines` line breaks have
    /// been seen (a trailing break at EOF does not count), the start of the
    /// file is reached, or `MAX_TAIL_BYTES` have been read.
    ///
    /// Each block is scanned once and the blocks are joined once at the end.
    fn tail_bytes(file: &mut File, max_lines: usize) -> io::Result<Vec<u8>> {
        let mut pos = file.metadata()?.len();
        let mut read: u64 = 0;
        let mut newlines: usize = 0;
        let mut ends_with_newline = false;
        let mut blocks: Vec<Vec<u8>> = Vec::new();

        while pos > 0 && read < MAX_TAIL_BYTES {
            let chunk = BLOCK_SIZE.min(pos).min(MAX_TAIL_BYTES - read);
            pos -= chunk;
            read += chunk;

            file.seek(SeekFrom::Start(pos))?;
            let mut block = vec![0u8; chunk as usize];
            file.read_exact(&mut block)?;

            if blocks.is_empty() {
                ends_with_newline = block.last() == Some(&b'\n');
            }
            newlines += block.iter().filter(|&&b| b == b'\n').count();
            blocks.push(block);

            if newlines - usize::from(ends_with_newline) >= max_lines {
                break;
            }
        }

        blocks.reverse();
        Ok(blocks.concat())
    }
}
