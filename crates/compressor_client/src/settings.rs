use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use client_logging::{client_info, LogDestination};
use log::LevelFilter;
use serde::Deserialize;

use crate::ClientError;

/// Client configuration, usually read from a RON file next to the host binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Deadline for pause/resume/stop/select/submit requests.
    pub command_timeout_ms: u64,
    /// Deadline for resolving one raw path.
    pub resolve_timeout_ms: u64,
    /// Deadline for the bootstrap listing.
    pub list_timeout_ms: u64,
    pub log_level: LevelFilter,
    pub log_destination: LogDestination,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            command_timeout_ms: 5_000,
            resolve_timeout_ms: 10_000,
            list_timeout_ms: 10_000,
            log_level: LevelFilter::Info,
            log_destination: LogDestination::Terminal,
        }
    }
}

impl ClientSettings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                client_info!("No settings at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ClientError::Settings {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                })
            }
        };

        ron::from_str(&content).map_err(|err| ClientError::Settings {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Install the global logger described by these settings.
    pub fn init_logging(&self) {
        client_logging::initialize(self.log_destination.clone(), self.log_level);
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_millis(self.list_timeout_ms)
    }
}
