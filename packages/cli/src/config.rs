use imebridge_input::{EngineOptions, Permission, Platform, TargetId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "imebridge.config.json";

/// imebridge configuration file format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Host platform, selects the quirk set
    #[serde(default)]
    pub platform: Platform,

    /// Surface the frames are addressed to (0 = document)
    #[serde(default)]
    pub target_id: u32,

    /// Edit permission of the simulated user
    #[serde(default)]
    pub permission: Permission,

    /// Simulate a surface that fires change notifications on program writes
    #[serde(default)]
    pub echo_writes: bool,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, platform: Option<Platform>, target: Option<u32>) -> Self {
        if let Some(platform) = platform {
            self.platform = platform;
        }
        if let Some(target) = target {
            self.target_id = target;
        }
        self
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            target: TargetId(self.target_id),
            quirks: self.platform.quirks(),
            permission: self.permission,
        }
    }
}
