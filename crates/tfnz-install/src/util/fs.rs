//! Filesystem helpers on top of [`fs_err`], so that every error mentions the
//! path it happened at.
use crate::error::InstallError;
use crate::{err, Result};
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

pub(crate) use fs_err::tokio::*;

/// Execute bits for the owner, the group and the others (`chmod +x`).
const EXECUTE_BITS: u32 = 0o111;

/// Same as `ln -sf {target} {link}`. The only thing that is never replaced
/// is a real directory at `link`.
pub(crate) async fn force_symlink(target: &Path, link: &Path) -> Result {
    if let Some(existing) = not_found_as_none(symlink_metadata(link).await)? {
        if existing.is_dir() {
            return Err(err!(InstallError::DirectoryInTheWay { path: link }));
        }
        remove_file(link).await?;
    }

    symlink(target, link).await?;

    Ok(())
}

/// Adds the execute bits to the file's mode. Returns the resulting mode.
pub(crate) async fn add_execute_permissions(path: &Path) -> Result<u32> {
    let mut permissions = metadata(path).await?.permissions();
    let mode = permissions.mode() | EXECUTE_BITS;

    if mode != permissions.mode() {
        permissions.set_mode(mode);
        set_permissions(path, permissions).await?;
    }

    Ok(mode)
}

pub(crate) async fn exists(path: &Path) -> Result<bool> {
    Ok(not_found_as_none(metadata(path).await)?.is_some())
}

fn not_found_as_none<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    if is_not_found(&result) {
        return Ok(None);
    }
    result.map(Some)
}

fn is_not_found<T>(result: &io::Result<T>) -> bool {
    matches!(result, Err(err) if err.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn force_symlink_replaces_files_and_links() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");

        write(&target, "#!/bin/sh").await.unwrap();

        // A regular file in place of the link
        write(&link, "stale").await.unwrap();
        force_symlink(&target, &link).await.unwrap();
        assert_eq!(read_link(&link).await.unwrap(), target);

        // A dangling symlink in place of the link
        let other = dir.path().join("other");
        remove_file(&link).await.unwrap();
        symlink(&other, &link).await.unwrap();
        force_symlink(&target, &link).await.unwrap();
        assert_eq!(read_link(&link).await.unwrap(), target);
    }

    #[test_log::test(tokio::test)]
    async fn force_symlink_keeps_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");

        create_dir_all(&link).await.unwrap();

        let err = force_symlink(&target, &link).await.unwrap_err();

        assert!(
            matches!(
                err.kind(),
                crate::error::ErrorKind::Install {
                    source: InstallError::DirectoryInTheWay { .. }
                }
            ),
            "{err:?}"
        );
        assert!(metadata(&link).await.unwrap().is_dir());
    }

    #[test_log::test(tokio::test)]
    async fn add_execute_permissions_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("script");

        write(&file, "#!/bin/sh").await.unwrap();
        set_permissions(&file, std::fs::Permissions::from_mode(0o640))
            .await
            .unwrap();

        assert_eq!(add_execute_permissions(&file).await.unwrap(), 0o100_751);
        assert_eq!(add_execute_permissions(&file).await.unwrap(), 0o100_751);
    }

    #[test_log::test(tokio::test)]
    async fn exists_reports_missing_paths() {
        let dir = tempfile::tempdir().unwrap();

        assert!(exists(dir.path()).await.unwrap());
        assert!(!exists(&dir.path().join("missing")).await.unwrap());
    }
}
