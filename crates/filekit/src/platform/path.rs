use std::path::{Path, PathBuf};

/// Name of the data directory under the program root.
const DATA_DIR: &str = "data";
/// Name of the log directory under the data directory.
const LOG_DIR: &str = "log";

/// Absolute path of the running program, resolved from its invocation
/// argument (`argv[0]`).
///
/// Returns an empty path when there is no invocation argument or it cannot
/// be made absolute. Callers must tolerate that.
pub fn self_path() -> PathBuf {
    let Some(arg0) = std::env::args_os().next() else {
        tracing::debug!("No invocation argument; program path is empty");
        return PathBuf::new();
    };
    absolute_or_empty(Path::new(&arg0))
}

/// Directory containing the running program.
pub fn self_dir() -> PathBuf {
    parent_or_empty(&self_path())
}

fn absolute_or_empty(path: &Path) -> PathBuf {
    match std::path::absolute(path) {
        Ok(abs) => abs,
        Err(e) => {
            tracing::debug!("Failed to resolve {} to an absolute path: {e}", path.display());
            PathBuf::new()
        }
    }
}

fn parent_or_empty(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Directory layout derived from the program location.
///
/// Build it once at startup and hand it to whatever needs the data
/// directory. It is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    data: PathBuf,
}

impl Layout {
    /// Layout rooted at the running program's directory.
    pub fn from_current_exe() -> Self {
        Self::with_root(self_dir())
    }

    /// Layout rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data = root.join(DATA_DIR);
        Self { root, data }
    }

    /// The program root (`ROOT`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `ROOT/data`.
    pub fn data(&self) -> &Path {
        &self.data
    }

    /// `ROOT/data/log`.
    pub fn log_dir(&self) -> PathBuf {
        self.data.join(LOG_DIR)
    }

    /// `ROOT/data/log/<name>.log`.
    pub fn log_file(&self, name: &str) -> PathBuf {
        self.log_dir().join(format!("{name}.log"))
    }
}
