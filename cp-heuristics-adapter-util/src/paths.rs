use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("directory '{}' not found", .0.display())]
    DirNotFound(PathBuf),
    #[error("file '{}' not found", .0.display())]
    FileNotFound(PathBuf),
    #[error("file or directory '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("directory '{}' is not empty", .0.display())]
    NotEmpty(PathBuf),
}

pub fn ensure_dir_exists(path: &Path) -> Result<(), PathError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(PathError::DirNotFound(path.to_path_buf()))
    }
}

pub fn ensure_file_exists(path: &Path) -> Result<(), PathError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PathError::FileNotFound(path.to_path_buf()))
    }
}

pub fn ensure_not_exists(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        Err(PathError::AlreadyExists(path.to_path_buf()))
    } else {
        Ok(())
    }
}

pub fn ensure_empty_dir(path: &Path) -> Result<(), PathError> {
    match std::fs::read_dir(path) {
        Err(_) => Err(PathError::DirNotFound(path.to_path_buf())),
        Ok(mut entries) => {
            if entries.next().is_some() {
                Err(PathError::NotEmpty(path.to_path_buf()))
            } else {
                Ok(())
            }
        }
    }
}

/// Expands a leading `~` or `~/` to the home directory, like shells do.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };
    let Ok(home) = std::env::var("HOME") else {
        return path.to_path_buf();
    };
    if s == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = s.strip_prefix("~/") {
        Path::new(&home).join(rest)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn dir_existence() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_dir_exists(dir.path()).is_ok());
        let child = dir.path().join("child");
        assert!(matches!(
            ensure_dir_exists(&child),
            Err(PathError::DirNotFound(_))
        ));
        std::fs::write(&child, "").unwrap();
        assert!(matches!(
            ensure_dir_exists(&child),
            Err(PathError::DirNotFound(_))
        ));
    }

    #[test]
    fn file_existence() {
        let dir = TempDir::new().unwrap();
        let child = dir.path().join("child");
        assert!(matches!(
            ensure_file_exists(&child),
            Err(PathError::FileNotFound(_))
        ));
        std::fs::write(&child, "").unwrap();
        assert!(ensure_file_exists(&child).is_ok());
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        assert!(matches!(
            ensure_file_exists(&sub),
            Err(PathError::FileNotFound(_))
        ));
    }

    #[test]
    fn not_exists() {
        let dir = TempDir::new().unwrap();
        let child = dir.path().join("child");
        assert!(ensure_not_exists(&child).is_ok());
        std::fs::write(&child, "").unwrap();
        assert!(matches!(
            ensure_not_exists(&child),
            Err(PathError::AlreadyExists(_))
        ));
    }

    #[test]
    fn empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_empty_dir(dir.path()).is_ok());
        std::fs::write(dir.path().join("child"), "").unwrap();
        assert!(matches!(
            ensure_empty_dir(dir.path()),
            Err(PathError::NotEmpty(_))
        ));
        assert!(matches!(
            ensure_empty_dir(&dir.path().join("missing")),
            Err(PathError::DirNotFound(_))
        ));
    }

    #[test]
    fn tilde_expansion() {
        let home = std::env::var("HOME").unwrap();
        assert_eq!(
            expand_tilde(Path::new("~/foo")),
            Path::new(&home).join("foo")
        );
        assert_eq!(expand_tilde(Path::new("~")), PathBuf::from(&home));
        assert_eq!(
            expand_tilde(Path::new("/usr/bin/echo")),
            PathBuf::from("/usr/bin/echo")
        );
        assert_eq!(expand_tilde(Path::new("python")), PathBuf::from("python"));
    }
}
