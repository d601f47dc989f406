//! File-backed token slot inside a capability-scoped directory.
//!
//! The token lives in a single file named [`TOKEN_KEY`]. Writes go to a
//! hidden temporary file first and are renamed over the target, so a crash
//! mid-write never leaves a truncated token behind.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::SessionToken;
use crate::domain::ports::{TOKEN_KEY, TokenStore, TokenStoreError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Token store persisting to `<dir>/token`.
pub struct FileTokenStore {
    dir: Dir,
}

impl FileTokenStore {
    /// Create `path` if needed and open it as the storage root.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self::from_dir(dir))
    }

    /// Use an already opened directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }

    fn write_atomic(&self, contents: &str) -> io::Result<()> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{TOKEN_KEY}.tmp.{}.{counter}", std::process::id());

        if let Err(err) = self.write_temp(&tmp_name, contents) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(err);
        }
        if let Err(err) = self.rename_over_target(&tmp_name) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(err);
        }
        // Best-effort directory sync.
        if self.dir.open(".").and_then(|dir| dir.sync_all()).is_err() {
            debug!("token directory sync skipped");
        }
        Ok(())
    }

    fn write_temp(&self, tmp_name: &str, contents: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }

    #[cfg(windows)]
    fn rename_over_target(&self, tmp_name: &str) -> io::Result<()> {
        // Windows rename fails if the target exists.
        match self.dir.remove_file(TOKEN_KEY) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.dir.rename(tmp_name, &self.dir, TOKEN_KEY)
    }

    #[cfg(not(windows))]
    fn rename_over_target(&self, tmp_name: &str) -> io::Result<()> {
        self.dir.rename(tmp_name, &self.dir, TOKEN_KEY)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, TokenStoreError> {
        match self.dir.read_to_string(TOKEN_KEY) {
            Ok(raw) => {
                let trimmed = raw.trim();
                Ok((!trimmed.is_empty()).then(|| SessionToken::new(trimmed)))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(TokenStoreError::read(err.to_string())),
        }
    }

    fn save(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        self.write_atomic(token.as_str())
            .map_err(|err| TokenStoreError::write(err.to_string()))?;
        debug!("session token persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match self.dir.remove_file(TOKEN_KEY) {
            Ok(()) => {
                debug!("session token removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TokenStoreError::remove(err.to_string())),
        }
    }
}
