use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wiredit_editor::GuardConfig;
use wiredit_preview::{PipelineConfig, RenderFormat};

pub const DEFAULT_CONFIG_NAME: &str = "wiredit.config.json";
pub const SERVER_URL_ENV: &str = "WIREDIT_SERVER_URL";

/// wiredit configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the diagram and assistant server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Quiet period before a render is requested
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    #[serde(default = "default_assistant_timeout_secs")]
    pub assistant_timeout_secs: u64,

    /// Undo levels kept, including the current document
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    #[serde(default = "default_replay_cooldown_ms")]
    pub replay_cooldown_ms: u64,

    #[serde(default)]
    pub default_format: RenderFormat,

    /// Directory the live preview is written to
    #[serde(default = "default_preview_dir")]
    pub preview_dir: String,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_render_timeout_secs() -> u64 {
    30
}

fn default_assistant_timeout_secs() -> u64 {
    60
}

fn default_history_capacity() -> usize {
    10
}

fn default_replay_cooldown_ms() -> u64 {
    150
}

fn default_preview_dir() -> String {
    "preview".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Apply the server URL from the environment, then from the command line
    pub fn with_server_override(mut self, env: Option<String>, flag: Option<String>) -> Self {
        if let Some(url) = flag.or(env).filter(|url| !url.trim().is_empty()) {
            self.server_url = url.trim().to_string();
        }
        self
    }

    pub fn guard_config(&self) -> GuardConfig {
        GuardConfig {
            history_capacity: self.history_capacity,
            replay_cooldown: Duration::from_millis(self.replay_cooldown_ms),
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            timeout: self.render_timeout(),
        }
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    pub fn assistant_timeout(&self) -> Duration {
        Duration::from_secs(self.assistant_timeout_secs)
    }

    /// Get absolute path to the preview directory
    pub fn get_preview_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.preview_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            debounce_ms: default_debounce_ms(),
            render_timeout_secs: default_render_timeout_secs(),
            assistant_timeout_secs: default_assistant_timeout_secs(),
            history_capacity: default_history_capacity(),
            replay_cooldown_ms: default_replay_cooldown_ms(),
            default_format: RenderFormat::default(),
            preview_dir: default_preview_dir(),
        }
    }
}
