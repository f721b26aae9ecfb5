//! Startup check for the external audio decoder.

use std::process::{Command, ExitStatus, Stdio};

/// Environment variable overriding the ffmpeg command.
pub const FFMPEG_ENV: &str = "FFMPEG_PATH";

const DEFAULT_FFMPEG: &str = "ffmpeg";

/// The ffmpeg command to use: `FFMPEG_PATH` if set, else `ffmpeg`.
pub fn ffmpeg_command() -> String {
    std::env::var(FFMPEG_ENV).unwrap_or_else(|_| DEFAULT_FFMPEG.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("{command} not found ({source}); install ffmpeg or set {FFMPEG_ENV}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("{command} -version exited with {status}; install ffmpeg or set {FFMPEG_ENV}")]
    Failed { command: String, status: ExitStatus },
}

/// Probe the decoder with `-version`, discarding its output.
///
/// A failure here is fatal for the caller: nothing can be decoded without a
/// working ffmpeg, so the check runs before any model is loaded.
pub fn check_ffmpeg(command: &str) -> Result<(), PreflightError> {
    let status = Command::new(command)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| PreflightError::Spawn {
            command: command.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(PreflightError::Failed {
            command: command.to_string(),
            status,
        })
    }
}
