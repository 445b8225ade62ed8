//! Output directory handling
//!
//! Wrappers are written to `<root>/<prefix>/`. A previous output directory
//! is moved to `<prefix>.backup` first, replacing any older backup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::frontend::ApiIdentity;
use crate::pipeline::WrapperOutput;
use crate::project::manifest::render_manifest;
use crate::utils::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub dir: PathBuf,
    pub backup_dir: PathBuf,
    pub file_prefix: String,
}

impl OutputLayout {
    /// `<parent>/<prefix>` and `<parent>/<prefix>.backup`
    pub fn new(parent: &Path, identity: &ApiIdentity) -> Self {
        let prefix = &identity.wrapper_file_prefix;
        Self {
            dir: parent.join(prefix),
            backup_dir: parent.join(format!("{}.backup", prefix)),
            file_prefix: prefix.clone(),
        }
    }

    pub fn header_path(&self) -> PathBuf {
        self.dir.join(format!("{}.h", self.file_prefix))
    }

    pub fn source_path(&self) -> PathBuf {
        self.dir.join(format!("{}.cpp", self.file_prefix))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(format!("{}.mkf", self.file_prefix))
    }

    /// Move an existing output directory aside, dropping the old backup
    pub fn rotate_backup(&self) -> Result<bool> {
        if !self.dir.exists() {
            return Ok(false);
        }
        if self.backup_dir.exists() {
            fs::remove_dir_all(&self.backup_dir).map_err(|e| Error::io(&self.backup_dir, e))?;
        }
        fs::rename(&self.dir, &self.backup_dir).map_err(|e| Error::io(&self.dir, e))?;
        log::info!("backed up {} to {}", self.dir.display(), self.backup_dir.display());
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub header: PathBuf,
    pub source: PathBuf,
    pub manifest: PathBuf,
    pub backed_up: bool,
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    log::debug!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Write header, source and manifest, backing up a previous run if asked
pub fn write_wrapper(
    layout: &OutputLayout,
    identity: &ApiIdentity,
    output: &WrapperOutput,
    backup: bool,
) -> Result<WrittenFiles> {
    let backed_up = if backup { layout.rotate_backup()? } else { false };
    fs::create_dir_all(&layout.dir).map_err(|e| Error::io(&layout.dir, e))?;

    let files = WrittenFiles {
        header: layout.header_path(),
        source: layout.source_path(),
        manifest: layout.manifest_path(),
        backed_up,
    };
    write_file(&files.manifest, &render_manifest(identity))?;
    write_file(&files.header, &output.header)?;
    write_file(&files.source, &output.source)?;
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::pipeline::transform;
    use pretty_assertions::assert_eq;

    fn identity() -> ApiIdentity {
        ApiIdentity::new("s3eMyExt", &Config::default()).unwrap()
    }

    fn output() -> WrapperOutput {
        transform("void s3eMyExtStop();\n", &identity(), &Config::default())
    }

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new(Path::new("/ext/s3eMyExt"), &identity());
        assert_eq!(layout.dir, PathBuf::from("/ext/s3eMyExt/QMyExt"));
        assert_eq!(layout.backup_dir, PathBuf::from("/ext/s3eMyExt/QMyExt.backup"));
        assert_eq!(layout.header_path(), PathBuf::from("/ext/s3eMyExt/QMyExt/QMyExt.h"));
        assert_eq!(layout.source_path(), PathBuf::from("/ext/s3eMyExt/QMyExt/QMyExt.cpp"));
        assert_eq!(layout.manifest_path(), PathBuf::from("/ext/s3eMyExt/QMyExt/QMyExt.mkf"));
    }

    #[test]
    fn test_write_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), &identity());
        let out = output();

        let written = write_wrapper(&layout, &identity(), &out, true).unwrap();
        assert!(!written.backed_up);
        assert_eq!(fs::read_to_string(&written.header).unwrap(), out.header);
        assert_eq!(fs::read_to_string(&written.source).unwrap(), out.source);
        assert!(fs::read_to_string(&written.manifest).unwrap().contains("QMyExt.cpp"));
    }

    #[test]
    fn test_rewrite_rotates_backup() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), &identity());
        let out = output();

        write_wrapper(&layout, &identity(), &out, true).unwrap();
        fs::write(layout.dir.join("notes.txt"), "hand edits").unwrap();

        let written = write_wrapper(&layout, &identity(), &out, true).unwrap();
        assert!(written.backed_up);
        assert!(layout.backup_dir.join("notes.txt").exists());
        assert!(!layout.dir.join("notes.txt").exists());

        // a third run replaces the old backup
        write_wrapper(&layout, &identity(), &out, true).unwrap();
        assert!(!layout.backup_dir.join("notes.txt").exists());
        assert!(layout.backup_dir.join("QMyExt.h").exists());
    }

    #[test]
    fn test_no_backup_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), &identity());
        let out = output();

        write_wrapper(&layout, &identity(), &out, false).unwrap();
        let written = write_wrapper(&layout, &identity(), &out, false).unwrap();
        assert!(!written.backed_up);
        assert!(!layout.backup_dir.exists());
    }
}
