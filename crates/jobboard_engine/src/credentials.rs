use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use board_logging::board_warn;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("token path has no parent directory: {0}")]
    InvalidPath(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("token store lock poisoned")]
    Poisoned,
}

/// Client-side storage for the bearer token sent with API requests.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), CredentialError>;
    fn clear(&self) -> Result<(), CredentialError>;
}

/// Token kept in a single file; an absent or blank file means "no token".
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let token = text.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                board_warn!("Failed to read token from {:?}: {}", self.path, err);
                None
            }
        }
    }

    /// Writes through a temp file and rename so a crash never leaves a
    /// half-written token behind.
    fn save(&self, token: &str) -> Result<(), CredentialError> {
        let dir = match self.path.parent() {
            Some(dir) if dir.as_os_str().is_empty() => Path::new("."),
            Some(dir) => dir,
            None => return Err(CredentialError::InvalidPath(self.path.display().to_string())),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(token.trim().as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        tmp.persist(&self.path)
            .map_err(|e| CredentialError::Io(e.error))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process token store, for sessions without a token file.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        let mut guard = self.token.lock().map_err(|_| CredentialError::Poisoned)?;
        *guard = Some(token.trim().to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        let mut guard = self.token.lock().map_err(|_| CredentialError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}
