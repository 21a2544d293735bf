// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// log2 of the scrypt CPU/memory cost. Raising it later leaves
    /// previously stored hashes verifiable; the factor is embedded in
    /// each stored value.
    pub scrypt_log_n: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("static address"),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            scrypt_log_n: scrypt::Params::RECOMMENDED_LOG_N,
        }
    }
}

impl Settings {
    /// Load settings: defaults, then `memberbook.toml`, then environment
    /// variables prefixed with `MEMBERBOOK_`.
    pub fn load() -> Result<Self> {
        Self::load_from("memberbook.toml")
    }

    /// Load settings with an explicit config file path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("MEMBERBOOK_"))
            .extract()?;
        Ok(settings)
    }
}
