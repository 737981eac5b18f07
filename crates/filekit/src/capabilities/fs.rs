use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Mode requested for files this crate creates (before umask).
pub(crate) const FILE_MODE: u32 = 0o777;

/// Apply the permissive creation mode to `options` where the platform has one.
pub(crate) fn permissive(options: &mut OpenOptions) -> &mut OpenOptions {
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options
}

/// Report whether `path` exists.
///
/// Only a definite "not found" from the OS yields `false`. Any other stat
/// failure (permission denied, a file used as a directory, ...) counts as
/// existing.
pub fn exists(path: impl AsRef<Path>) -> bool {
    match std::fs::metadata(path.as_ref()) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

/// Read a whole file into a string.
pub fn get_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::open(path, e))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| Error::io(path, e))?;
    tracing::debug!("Read {} bytes from {}", contents.len(), path.display());
    Ok(contents)
}

/// How [`put_file`] treats existing content.
///
/// The default appends. Note that the legacy modifier form
/// ([`put_file_with_modifiers`]) defaults the other way: an empty modifier
/// list overwrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// Truncate the file before writing instead of appending.
    pub truncate: bool,
}

impl PutOptions {
    pub fn append() -> Self {
        Self { truncate: false }
    }

    pub fn overwrite() -> Self {
        Self { truncate: true }
    }

    /// Interpret a legacy modifier list.
    ///
    /// An empty list, or a zero anywhere in it, means overwrite. Any list made
    /// only of non-zero values means append; the values themselves carry no
    /// other meaning.
    pub fn from_modifiers(modifiers: &[i64]) -> Self {
        Self {
            truncate: modifiers.is_empty() || modifiers.contains(&0),
        }
    }
}

/// Write `text` verbatim to `path`, creating the file if needed.
///
/// No newline is added. After the open attempt, whether or not it
/// succeeded, the file mode is set to `0o777` on Unix; a failure to do so is
/// only logged.
pub fn put_file(path: impl AsRef<Path>, text: &str, options: PutOptions) -> Result<()> {
    let path = path.as_ref();

    let mut open = OpenOptions::new();
    open.read(true).write(true).create(true);
    if options.truncate {
        open.truncate(true);
    } else {
        open.append(true);
    }
    let opened = permissive(&mut open).open(path);
    make_world_writable(path);

    let mut file = opened.map_err(|e| Error::open(path, e))?;
    file.write_all(text.as_bytes()).map_err(|e| Error::io(path, e))?;

    tracing::debug!(
        "Wrote {} bytes to {} ({})",
        text.len(),
        path.display(),
        if options.truncate { "overwrite" } else { "append" }
    );
    Ok(())
}

/// [`put_file`] driven by a legacy modifier list; see
/// [`PutOptions::from_modifiers`] for the overwrite rule.
pub fn put_file_with_modifiers(
    path: impl AsRef<Path>,
    text: &str,
    modifiers: &[i64],
) -> Result<()> {
    put_file(path, text, PutOptions::from_modifiers(modifiers))
}

#[cfg(unix)]
fn make_world_writable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(FILE_MODE)) {
        tracing::debug!("Failed to set permissions on {}: {e}", path.display());
    }
}

#[cfg(not(unix))]
fn make_world_writable(_path: &Path) {}

/// Find `filename` in the first of `dirs` that contains it.
///
/// Commonly used to locate a config file across e.g. `/etc` and the home
/// directory. When nothing matches, the error carries the last joined path
/// tried, which is empty if `dirs` was empty.
pub fn search_file<I, P>(filename: impl AsRef<Path>, dirs: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let filename = filename.as_ref();
    let mut candidate = PathBuf::new();
    for dir in dirs {
        candidate = dir.as_ref().join(filename);
        if exists(&candidate) {
            tracing::debug!("Found {} at {}", filename.display(), candidate.display());
            return Ok(candidate);
        }
    }
    Err(Error::NotFound { path: candidate })
}
