use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Write-to-temp-then-rename, so a reader never sees a half-written store.
pub struct AtomicFile {
    path: PathBuf,
    temp_path: PathBuf,
}

impl AtomicFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let temp_path = Self::temp_path(&path)?;

        Ok(Self { path, temp_path })
    }

    fn temp_path(path: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid file path: {}", path.display()))?;

        let temp_name = format!(
            ".{}.tmp.{}",
            file_name.to_string_lossy(),
            std::process::id()
        );

        Ok(path.with_file_name(temp_name))
    }

    pub fn write(&self, content: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create state directory")?;
        }

        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)
            .context("Failed to create temporary file")?;

        temp_file
            .write_all(content)
            .context("Failed to write to temporary file")?;

        temp_file
            .sync_all()
            .context("Failed to sync temporary file")?;

        // Owner-only: the store lists every URL ever viewed
        #[cfg(unix)]
        {
            let mut permissions = fs::metadata(&self.temp_path)?.permissions();
            permissions.set_mode(0o600);
            fs::set_permissions(&self.temp_path, permissions)?;
        }

        fs::rename(&self.temp_path, &self.path)
            .context("Failed to atomically rename file")?;

        Ok(())
    }

    /// Reads the file, `None` when it does not exist yet.
    pub fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }
}

/// Opens (creating if needed) the lock file guarding a store.
pub fn open_lock_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create state directory")?;
    }
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to open lock file {}", path.display()))
}

/// Advisory lock held for the duration of a read-modify-write.
#[cfg(unix)]
pub mod lock {
    use std::fs::File;
    use std::os::unix::io::AsRawFd;
    use anyhow::Result;

    use crate::error::{StateError, ViewerError};

    pub struct FileLock {
        file: File,
    }

    impl FileLock {
        pub fn acquire(file: File) -> Result<Self> {
            use libc::{flock, LOCK_EX};

            let fd = file.as_raw_fd();
            let result = unsafe { flock(fd, LOCK_EX) };

            if result != 0 {
                return Err(ViewerError::State(StateError::Locked).into());
            }

            Ok(Self { file })
        }

        pub fn try_acquire(file: File) -> Result<Option<Self>> {
            use libc::{flock, LOCK_EX, LOCK_NB};

            let fd = file.as_raw_fd();
            let result = unsafe { flock(fd, LOCK_EX | LOCK_NB) };

            if result == 0 {
                Ok(Some(Self { file }))
            } else if std::io::Error::last_os_error().kind() == std::io::ErrorKind::WouldBlock {
                Ok(None)
            } else {
                Err(ViewerError::State(StateError::Locked).into())
            }
        }
    }

    impl Drop for FileLock {
        fn drop(&mut self) {
            use libc::{flock, LOCK_UN};

            let fd = self.file.as_raw_fd();
            unsafe { flock(fd, LOCK_UN) };
        }
    }
}

#[cfg(not(unix))]
pub mod lock {
    use std::fs::File;
    use anyhow::Result;

    pub struct FileLock {
        _file: File,
    }

    impl FileLock {
        pub fn acquire(file: File) -> Result<Self> {
            Ok(Self { _file: file })
        }

        pub fn try_acquire(file: File) -> Result<Option<Self>> {
            Ok(Some(Self { _file: file }))
        }
    }
}
