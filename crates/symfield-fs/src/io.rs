//! Tolerant reads, locked atomic writes and verified backup copies

use std::ffi::OsString;
use std::fs::{self, OpenOptions, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::checksum::{compute_bytes_checksum, compute_file_checksum};
use crate::{Error, NormalizedPath, Result};

/// Tuning for write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying the advisory lock before giving up.
    pub lock_timeout: Duration,
    /// Flush file contents to disk before the rename.
    pub sync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(2),
            sync: true,
        }
    }
}

/// Read a file as text, replacing malformed UTF-8 sequences with U+FFFD.
///
/// Returns the decoded text and whether any replacement happened.
pub fn read_text_lossy(path: &NormalizedPath) -> Result<(String, bool)> {
    let native_path = path.to_native();
    let bytes = fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok((text, false)),
        Err(err) => {
            let text = String::from_utf8_lossy(err.as_bytes()).into_owned();
            tracing::warn!(path = %path, "invalid UTF-8 replaced while reading");
            Ok((text, true))
        }
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// The advisory lock is retried with exponential backoff up to
/// `config.lock_timeout`.
///
/// A symlinked `path` is resolved first, so the link's target is rewritten
/// and the link itself is left in place. An existing file's permissions are
/// carried over to the replacement. The temp file is removed on every
/// failure.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = resolve_symlink(&path.to_native())?;

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_name = OsString::from(".");
    temp_name.push(native_path.file_name().unwrap_or_default());
    temp_name.push(format!(".{}.tmp", std::process::id()));
    let temp_path = native_path.with_file_name(&temp_name);

    let permissions = fs::metadata(&native_path).ok().map(|m| m.permissions());

    let result = write_and_rename(&temp_path, &native_path, content, permissions, config);
    if result.is_err()
        && temp_path.exists()
        && let Err(e) = fs::remove_file(&temp_path)
    {
        tracing::warn!(path = %temp_path.display(), error = %e, "could not remove temp file");
    }
    result
}

/// Follow `path` to its final target when it is a symlink.
fn resolve_symlink(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
            tracing::debug!(link = %path.display(), target = %target.display(), "writing through symlink");
            Ok(target)
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn write_and_rename(
    temp_path: &Path,
    target: &Path,
    content: &[u8],
    permissions: Option<Permissions>,
    config: RobustnessConfig,
) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(10))
        .with_max_elapsed_time(Some(config.lock_timeout))
        .build();
    backoff::retry(policy, || {
        temp_file
            .try_lock_exclusive()
            .map_err(backoff::Error::transient)
    })
    .map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if config.sync {
        temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }

    if let Some(permissions) = permissions {
        temp_file
            .set_permissions(permissions)
            .map_err(|e| Error::io(temp_path, e))?;
    }

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;
    drop(temp_file);

    fs::rename(temp_path, target).map_err(|e| Error::io(target, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str, config: RobustnessConfig) -> Result<()> {
    write_atomic(path, content.as_bytes(), config)
}

/// Copy `source` to `dest` and verify the copy byte-for-byte by checksum.
///
/// An existing `dest` is overwritten. Returns the checksum of the copied
/// content.
pub fn copy_verified(source: &NormalizedPath, dest: &NormalizedPath) -> Result<String> {
    let source_native = source.to_native();
    let dest_native = dest.to_native();

    let original = fs::read(&source_native).map_err(|e| Error::io(&source_native, e))?;
    fs::copy(&source_native, &dest_native).map_err(|e| Error::io(&dest_native, e))?;

    let expected = compute_bytes_checksum(&original);
    let actual = compute_file_checksum(&dest_native).map_err(|e| Error::io(&dest_native, e))?;
    if expected != actual {
        return Err(Error::BackupMismatch {
            path: dest_native,
            expected,
            actual,
        });
    }

    tracing::debug!(source = %source, dest = %dest, checksum = %actual, "backup written");
    Ok(actual)
}
