// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de;

use crate::error::ScheduleError;

/// Default bound on the phase-2 session-save transaction.
pub const DEFAULT_SESSION_SAVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the scheduling engine.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for the scheduling database.
    /// `None` opens an in-memory database, useful for tests and previews.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Upper bound on the session-save transaction, so a stalled storage
    /// layer cannot hold the write lock indefinitely.
    #[serde(default)]
    pub session_save_timeout: Option<ConfigTimeout>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), ScheduleError> {
        if let Some(dir) = &self.state_dir {
            self.state_dir = Some(
                expand_path(dir)
                    .map_err(|e| ScheduleError::Config(format!("invalid state directory: {e}")))?,
            );
        }
        Ok(())
    }

    /// The bound applied to the phase-2 transaction.
    pub fn session_save_limit(&self) -> Duration {
        self.session_save_timeout
            .map_or(DEFAULT_SESSION_SAVE_TIMEOUT, |t| t.duration())
    }
}

/// A duration string like `"30s"`, `"5m"`, `"2h"`, `"1d"`, or `"HH:MM"`.
#[derive(Debug, Clone, Copy)]
pub struct ConfigTimeout(Duration);

impl ConfigTimeout {
    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for ConfigTimeout {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl<'de> serde::Deserialize<'de> for ConfigTimeout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeoutVisitor;

        impl de::Visitor<'_> for TimeoutVisitor {
            type Value = ConfigTimeout;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str(r#"a duration string like "HH:MM", "1d", "24h", "60m", or "1800s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ConfigTimeout)
                    .map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(TimeoutVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path encoding")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, String> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".to_string())
}

fn get_state_dir() -> Result<PathBuf, String> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".to_string())
}

/// Parse a duration string in the format "HH:MM" / "1d" / "24h" / "60m" / "1800s".
fn parse_duration(s: &str) -> Result<Duration, String> {
    fn parse_u64(s: &str) -> Result<u64, String> {
        s.trim()
            .parse()
            .map_err(|e| format!("Invalid duration number: {e}"))
    }

    // Try to parse "HH:MM" format
    if let Some((h, m)) = s.split_once(':') {
        let hours = parse_u64(h)?;
        let minutes = parse_u64(m)?;
        Ok(Duration::from_secs((hours * 60 + minutes) * 60))
    }
    // Match suffix-based formats
    else if let Some(rest) = s.strip_suffix("d") {
        Ok(Duration::from_secs(parse_u64(rest)? * 86_400))
    } else if let Some(rest) = s.strip_suffix("h") {
        Ok(Duration::from_secs(parse_u64(rest)? * 3_600))
    } else if let Some(rest) = s.strip_suffix("m") {
        Ok(Duration::from_secs(parse_u64(rest)? * 60))
    } else if let Some(rest) = s.strip_suffix("s") {
        Ok(Duration::from_secs(parse_u64(rest)?))
    } else {
        Err(format!("Invalid duration format: {s}"))
    }
}
