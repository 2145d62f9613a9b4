//! Settings - 実行時設定
//!
//! # 読み込み順（後勝ち）
//! 1. 組み込みのデフォルト値
//! 2. 設定ファイル（`docong.toml`、なくてもよい）
//! 3. 環境変数 `DOCONG__<KEY>`（例: `DOCONG__API_BASE_URL`）

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "docong.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the REST API (prediction lives under `/api/todo/predict`).
    pub api_base_url: String,

    /// Bearer token sent with API requests.
    pub api_token: Option<String>,

    pub request_timeout_secs: u64,

    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".into(),
            api_token: None,
            request_timeout_secs: 10,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("DOCONG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
