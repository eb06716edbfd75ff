//! Output naming and artifact writes.

use crate::i18n::LanguageId;
use anyhow::{bail, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Placeholder replaced by the target language code in output templates.
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Maps a target language to its output path, e.g. `output_{code}.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    pattern: String,
}

impl OutputTemplate {
    /// Parse a template, which must mention `{code}` at least once.
    ///
    /// A template without the placeholder would send every language to the
    /// same file.
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.contains(CODE_PLACEHOLDER) {
            bail!(
                "Output path template '{}' must contain the {} placeholder",
                pattern,
                CODE_PLACEHOLDER
            );
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    /// Output path for one target language. The raw code is substituted as-is.
    pub fn path_for(&self, language: &LanguageId) -> PathBuf {
        PathBuf::from(self.pattern.replace(CODE_PLACEHOLDER, language.as_str()))
    }
}

/// Write `contents` to `path` atomically, replacing any existing file.
///
/// The text goes to a temporary file in the destination directory, which is
/// then renamed over `path`, so readers never see a half-written file. The
/// destination directory must already exist. A replaced file keeps its
/// permissions; a new file gets the same mode `std::fs::write` would give it.
pub async fn write_artifact(path: &Path, contents: &str) -> io::Result<()> {
    let path = path.to_path_buf();
    let contents = contents.to_string();

    tokio::task::spawn_blocking(move || write_artifact_blocking(&path, &contents))
        .await
        .unwrap_or_else(|e| Err(io::Error::other(e)))
}

fn write_artifact_blocking(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing_permissions = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut file = new_temp_file(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    if let Some(permissions) = existing_permissions {
        file.as_file().set_permissions(permissions)?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Temp files default to 0600; ask for 0666 so the umask decides, as with `fs::write`.
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> io::Result<tempfile::NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> io::Result<tempfile::NamedTempFile> {
    tempfile::NamedTempFile::new_in(dir)
}
