//! Generator configuration
//!
//! Defaults match the Marmalade s3e extension layout. A JSON file passed
//! with `--config` can override any field; missing fields keep defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix shared by every native module and type (e.g. `s3e`)
    pub generic_prefix: String,
    /// Platform namespace prefix lower-cased in wrapper names (e.g. `IOS`)
    pub platform_prefix: String,
    /// One-letter marker prepended to output file names
    pub file_marker: String,
    /// C++ namespace the helper macros live in
    pub helper_namespace: String,
    /// Header providing the `LUA_EVENT_*` macros
    pub helper_header: String,
    /// Move an existing output directory aside before writing
    pub backup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generic_prefix: "s3e".to_string(),
            platform_prefix: "IOS".to_string(),
            file_marker: "Q".to_string(),
            helper_namespace: "quick".to_string(),
            helper_header: "QLuaHelpers.h".to_string(),
            backup: true,
        }
    }
}

impl Config {
    /// Load a config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse config JSON, reporting the serde message on failure
    pub fn from_json(text: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                log::debug!("loading config from {}", p.display());
                Self::load(p)
            }
            None => Ok(Self::default()),
        }
    }
}
