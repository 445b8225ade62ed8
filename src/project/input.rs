//! Input resolution
//!
//! Accepts either an extension folder (`ext/s3eMyExt`, header expected at
//! `ext/s3eMyExt/h/s3eMyExt.h`) or the header itself. Either way the
//! extension root is the folder above `h/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    /// The `.h` file to scan
    pub header_path: PathBuf,
    /// Extension root; outputs go in a folder beneath it
    pub root_path: PathBuf,
    /// Native API name, taken from the folder or header name
    pub source_api_name: String,
}

impl ResolvedInput {
    pub fn read_header(&self) -> Result<String> {
        fs::read_to_string(&self.header_path).map_err(|e| Error::io(&self.header_path, e))
    }
}

pub fn resolve_input(path: &Path) -> Result<ResolvedInput> {
    if !path.exists() {
        return Err(Error::InputNotFound { path: path.to_path_buf() });
    }
    let path = fs::canonicalize(path).map_err(|e| Error::io(path, e))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::InputNotFound { path: path.clone() })?;

    if path.is_dir() {
        let header_path = path.join("h").join(format!("{}.h", file_name));
        if !header_path.is_file() {
            return Err(Error::HeaderNotFound { path: header_path });
        }
        log::debug!("resolved extension folder {}", path.display());
        return Ok(ResolvedInput {
            header_path,
            root_path: path,
            source_api_name: file_name,
        });
    }

    let Some(source_api_name) = file_name.strip_suffix(".h") else {
        return Err(Error::NotAHeader { path });
    };

    // ext/s3eMyExt/h/s3eMyExt.h -> ext/s3eMyExt
    let root_path = path
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(ResolvedInput {
        source_api_name: source_api_name.to_string(),
        header_path: path,
        root_path,
    })
}
