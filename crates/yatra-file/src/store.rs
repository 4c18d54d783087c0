//! Filesystem storage for session entries.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use yatra_core::error::{InvalidInputError, StorageError};
use yatra_core::{KeyValueStore, Result};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

/// Name of the lock file guarding writes.
const LOCK_FILE: &str = ".lock";

/// A [`KeyValueStore`] keeping one file per key under a root directory.
///
/// Writes go to a temporary file that is renamed into place under an
/// exclusive lock, so readers see either the old or the new value, never a
/// torn one. On Unix the directory is created `0700` and entries `0600`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at the given directory.
    ///
    /// The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the path of the file backing `key`.
    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !valid {
            return Err(InvalidInputError::StorageKey {
                value: key.to_string(),
            }
            .into());
        }

        Ok(self.root.join(key))
    }

    fn ensure_root(&self) -> Result<()> {
        if self.root.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o700);

        builder
            .create(&self.root)
            .map_err(|e| StorageError::Unavailable {
                message: format!("cannot create {}: {}", self.root.display(), e),
            })?;

        Ok(())
    }

    /// Take the exclusive write lock. Released when the file is dropped.
    fn lock(&self, key: &str) -> Result<File> {
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.root.join(LOCK_FILE))
            .map_err(|e| StorageError::io(key, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| StorageError::io(key, e))?;

        Ok(lock_file)
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => {
                trace!("Read entry");
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e).into()),
        }
    }

    #[instrument(skip(self, value), fields(root = %self.root.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        self.ensure_root()?;

        let lock = self.lock(key)?;

        let tmp_path = self
            .root
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));

        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&tmp_path)?;

            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))?;

            file.write_all(value.as_bytes())?;
            file.sync_data()?;
            fs::rename(&tmp_path, &path)
        };

        let result = write();
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result.map_err(|e| StorageError::io(key, e))?;

        FileExt::unlock(&lock).map_err(|e| StorageError::io(key, e))?;

        debug!(bytes = value.len(), "Wrote entry");
        Ok(())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;

        if !self.root.is_dir() {
            return Ok(());
        }

        let lock = self.lock(key)?;

        match fs::remove_file(&path) {
            Ok(()) => debug!("Removed entry"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(StorageError::io(key, e).into()),
        }

        FileExt::unlock(&lock).map_err(|e| StorageError::io(key, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use yatra_core::{AuthContext, Token, User, USER_KEY, TOKEN_KEY};

    #[test]
    fn set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("session"));

        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));

        store.set("token", "def").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("def"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        store.remove("user").unwrap();
        assert!(!store.root().exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        for key in ["", "../user", "a/b", ".lock", "user.json"] {
            assert!(store.set(key, "x").is_err(), "key {key:?}");
            assert!(store.get(key).is_err(), "key {key:?}");
        }
    }

    #[test]
    fn leaves_no_temporary_files() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.set("user", "{}").unwrap();
        store.set("user", "{\"_id\":\"1\"}").unwrap();

        let stray: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(stray.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn entries_are_private() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        store.set("token", "secret").unwrap();

        let mode = fs::metadata(store.root().join("token"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);

        let dir_mode = fs::metadata(store.root()).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o077, 0);
    }

    #[test]
    fn auth_context_survives_restart() {
        let dir = TempDir::new().unwrap();
        let user = User::try_from(json!({"_id": "u1", "username": "sita"})).unwrap();

        {
            let mut ctx = AuthContext::new(FileStore::new(dir.path()));
            ctx.set_token(&Token::new("jwt")).unwrap();
            ctx.login_success(user.clone()).unwrap();
        }

        let ctx = AuthContext::new(FileStore::new(dir.path()));
        assert_eq!(ctx.user(), Some(&user));
        assert_eq!(ctx.token(), Some(Token::new("jwt")));
    }

    #[test]
    fn corrupt_user_file_fails_open() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(USER_KEY), "{\"_id\": \"u1\"").unwrap();
        fs::write(dir.path().join(TOKEN_KEY), "jwt").unwrap();

        let ctx = AuthContext::new(FileStore::new(dir.path()));
        assert_eq!(ctx.user(), None);
        assert!(ctx.token().is_some());
        assert!(!dir.path().join(USER_KEY).exists());
    }
}
