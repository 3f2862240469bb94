//! Removes extracted sprites from a folder.
use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::{
    error::AtlasPackError,
    utils::{
        constants::{DEFAULT_IMAGE_EXTENSIONS, KEEP_STEMS},
        misc::list_image_files,
    },
};

#[derive(Debug, Default)]
pub struct CleanReport {
    pub deleted: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, std::io::Error)>,
}

pub struct CleanSprites {
    dir: PathBuf,
    extensions: Vec<String>,
    /// File stems that are never deleted
    keep: Vec<String>,
}

impl CleanSprites {
    pub fn new(dir: impl AsRef<Path> + Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            keep: KEEP_STEMS.iter().map(|stem| stem.to_string()).collect(),
        }
    }

    pub fn extensions(&mut self, a: &[String]) -> &mut Self {
        self.extensions = a.to_vec();
        self
    }

    pub fn keep(&mut self, a: &[String]) -> &mut Self {
        self.keep = a.to_vec();
        self
    }

    fn is_kept(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'));

        let kept_stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| self.keep.iter().any(|keep| keep == stem));

        hidden || kept_stem
    }

    pub fn work(&self) -> eyre::Result<CleanReport> {
        if !self.dir.is_dir() {
            return Err(AtlasPackError::NotFound {
                path: self.dir.clone(),
            }
            .into());
        }

        let files = list_image_files(&self.dir, &self.extensions);
        info!("Found {} files in `{}`", files.len(), self.dir.display());

        let mut report = CleanReport::default();

        for path in files {
            if self.is_kept(&path) {
                info!("Keeping {}", path.display());
                report.kept.push(path);
                continue;
            }

            match fs::remove_file(&path) {
                Ok(_) => {
                    info!("Deleted {}", path.display());
                    report.deleted.push(path);
                }
                Err(err) => {
                    warn!("Cannot delete {}: {}", path.display(), err);
                    report.failed.push((path, err));
                }
            }
        }

        Ok(report)
    }
}
