use super::BookStore;
use crate::error::{Result, RolodexError};
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(RolodexError::Io)?;
            }
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("book");
        self.path
            .with_file_name(format!(".{}-{}.tmp", file_name, std::process::id()))
    }
}

impl BookStore for FileStore {
    fn read_blob(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let blob = fs::read(&self.path).map_err(RolodexError::Io)?;
        Ok(Some(blob))
    }

    fn write_blob(&self, blob: &[u8]) -> Result<()> {
        self.ensure_parent()?;

        // Atomic write
        let tmp_path = self.tmp_path();
        let written = fs::write(&tmp_path, blob).and_then(|_| fs::rename(&tmp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(RolodexError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("book.bin"));
        assert!(store.read_blob().unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_dirs_and_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/deeper/book.bin"));

        store.write_blob(&[1, 2, 3]).unwrap();
        store.write_blob(&[4, 5]).unwrap();

        assert_eq!(store.read_blob().unwrap(), Some(vec![4, 5]));
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested/deeper"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("book.bin");
        // A non-empty directory cannot be replaced by a file
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let store = FileStore::new(&target);
        assert!(matches!(store.write_blob(&[1, 2, 3]), Err(RolodexError::Io(_))));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        assert!(target.join("keep").exists());
    }
}
