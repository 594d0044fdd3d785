use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve this directory instead of the built-in dashboard page
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// CSV file with `video`, `transcription` and `key_phrases` columns
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Prefix prepended to video identifiers to build playback URLs
    #[serde(default = "default_storage_base_url")]
    pub storage_base_url: String,

    /// Number of modules offered on the dashboard page
    #[serde(default = "default_module_count")]
    pub module_count: u32,

    /// Keep the parsed file in memory until it changes on disk
    #[serde(default)]
    pub cache: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("transcriptions_with_key_phrases.csv")
}
fn default_storage_base_url() -> String {
    "https://arya-geetha-nlp.s3.us-east-1.amazonaws.com/".to_string()
}
fn default_module_count() -> u32 {
    7
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            storage_base_url: default_storage_base_url(),
            module_count: default_module_count(),
            cache: false,
        }
    }
}
