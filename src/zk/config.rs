use crate::error::{Result, ZkError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = ".zk-config.json";
const DEFAULT_DOCUMENT_EXT: &str = ".html";
const DEFAULT_INDEX_FILE: &str = "index.html";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Per-project configuration, stored next to the marker in `.zk-config.json`.
///
/// The file is optional: a zettelkasten without one uses the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZkConfig {
    /// Extension of documents whose links are maintained (e.g. ".html")
    #[serde(default = "default_document_ext")]
    pub document_ext: String,

    /// File name that stands for its directory in links
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Port used by `zk serve` when no `--port` is given
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_document_ext() -> String {
    DEFAULT_DOCUMENT_EXT.to_string()
}

fn default_index_file() -> String {
    DEFAULT_INDEX_FILE.to_string()
}

fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}

impl Default for ZkConfig {
    fn default() -> Self {
        Self {
            document_ext: default_document_ext(),
            index_file: default_index_file(),
            port: default_port(),
        }
    }
}

impl ZkConfig {
    /// Load config from the given project root, or return defaults if not found
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ZkError::Io)?;
        let mut config: ZkConfig =
            serde_json::from_str(&content).map_err(ZkError::Serialization)?;
        let ext = config.document_ext.clone();
        config.set_document_ext(&ext);
        Ok(config)
    }

    /// Save config into the given project root
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ZkError::Serialization)?;
        fs::write(config_path, content).map_err(ZkError::Io)?;
        Ok(())
    }

    /// Set the document extension (normalizes to start with a dot)
    pub fn set_document_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.document_ext = ext.to_string();
        } else {
            self.document_ext = format!(".{}", ext);
        }
    }

    pub fn is_document(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.document_ext)
    }
}
