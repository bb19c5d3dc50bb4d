use blueprint_core::CoreError;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem capability the generators write through.
///
/// Paths are relative to the project being generated into. Writes replace
/// the whole file.
pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> Result<String, CoreError>;

    fn write(&self, path: &Path, content: &str) -> Result<(), CoreError>;
}

/// Filesystem rooted at a project directory on disk
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn read(&self, path: &Path) -> Result<String, CoreError> {
        Ok(fs::read_to_string(self.resolve(path))?)
    }

    /// Creates missing parent directories; leaves the file untouched when
    /// its content is already identical.
    fn write(&self, path: &Path, content: &str) -> Result<(), CoreError> {
        let target = self.resolve(path);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| CoreError::write(path, e))?;
        }

        if target.exists() {
            match fs::read_to_string(&target) {
                Ok(existing) if existing == content => return Ok(()),
                Ok(_) => {}
                Err(e) => tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "Existing file could not be read, overwriting"
                ),
            }
        }

        fs::write(&target, content).map_err(|e| CoreError::write(path, e))
    }
}

/// In-memory filesystem for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    files: RefCell<BTreeMap<PathBuf, String>>,
    read_only: RefCell<Vec<PathBuf>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), content.into());
        self
    }

    /// Make writes below `prefix` fail with `PermissionDenied`
    pub fn deny_writes_under(self, prefix: impl Into<PathBuf>) -> Self {
        self.read_only.borrow_mut().push(prefix.into());
        self
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String, CoreError> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
            .into()
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), CoreError> {
        if self.read_only.borrow().iter().any(|prefix| path.starts_with(prefix)) {
            let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
            return Err(CoreError::write(path, denied));
        }

        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
