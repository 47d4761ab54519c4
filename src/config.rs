//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend address
pub const BASE_URL_ENV: &str = "PROVINCE_ADMIN_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Backend base URL
    pub base_url: Option<String>,
    /// Request timeout in seconds (transport default when unset)
    pub request_timeout_secs: Option<u64>,
    /// Route path overrides keyed by route name
    #[serde(default)]
    pub routes: HashMap<String, String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Get the log file path
    pub fn log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_local_dir().join("province-tui.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Resolve the backend base URL: env var, then config file, then default
    pub fn resolved_base_url(&self) -> String {
        let env = std::env::var(BASE_URL_ENV).ok();
        self.base_url_with_env(env.as_deref())
    }

    fn base_url_with_env(&self, env: Option<&str>) -> String {
        env.filter(|s| !s.trim().is_empty())
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "province-admin", "province-tui")
}
