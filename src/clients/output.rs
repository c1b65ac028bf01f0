use std::path::{Path, PathBuf};

use log::debug;

use crate::badge::size::SizeClass;
use crate::clients::errors::{Error, Result};

const FILE_PREFIX: &str = "spotify-top";

/// Writes rendered badges into one output directory.
pub struct BadgeWriter {
    dir: PathBuf,
}

impl BadgeWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        BadgeWriter { dir: dir.into() }
    }

    pub fn try_default() -> Self {
        Self::new("assets")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn init_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| Error::Output {
                path: self.dir.clone(),
                source,
            })?;
        debug!("Output directory {:?} is ready", self.dir);
        Ok(())
    }

    // Medium is the default size and keeps the short name.
    pub fn file_name(theme: &str, size: SizeClass) -> String {
        match size {
            SizeClass::Medium => format!("{FILE_PREFIX}-{theme}.svg"),
            other => format!("{FILE_PREFIX}-{theme}-{other}.svg"),
        }
    }

    pub fn path_for(&self, theme: &str, size: SizeClass) -> PathBuf {
        self.dir.join(Self::file_name(theme, size))
    }

    // Replaces any previous badge with the same name.
    pub async fn write(&self, theme: &str, size: SizeClass, svg: &str) -> Result<PathBuf> {
        let path = self.path_for(theme, size);
        tokio::fs::write(&path, svg)
            .await
            .map_err(|source| Error::Output {
                path: path.clone(),
                source,
            })?;
        debug!("Wrote {} bytes to {path:?}", svg.len());
        Ok(path)
    }
}
