use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::debug;

const BODY_EXTENSION: &str = "md";

/// One markdown file per post, named after the post id.
/// The directory is never listed: the index decides which ids exist.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root_dir: PathBuf,
}

impl ContentStore {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        ContentStore {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn path(&self, id: u32) -> PathBuf {
        self.root_dir.join(format!("{}.{}", id, BODY_EXTENSION))
    }

    /// Creates an empty body, truncating any leftover file with the same id
    pub fn create(&self, id: u32) -> io::Result<()> {
        let path = self.path(id);
        File::create(&path)
            .map_err(|e| io::Error::new(e.kind(), format!("Error creating post body {}: {}", path.display(), e)))?;
        debug!("Created post body {}", path.display());
        Ok(())
    }

    /// A missing body reads as empty. Invalid UTF-8 is replaced, not an error.
    pub fn read(&self, id: u32) -> io::Result<String> {
        match fs::read(self.path(id)) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    pub fn delete(&self, id: u32) -> io::Result<()> {
        let path = self.path(id);
        fs::remove_file(&path)
            .map_err(|e| io::Error::new(e.kind(), format!("Error removing post body {}: {}", path.display(), e)))?;
        debug!("Removed post body {}", path.display());
        Ok(())
    }
}
