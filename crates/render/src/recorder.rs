//! Persisting frames to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::{Frame, RenderError};

/// Writes frames into a directory, one file per frame.
///
/// RGB frames are encoded as PNG, text frames are written verbatim. File
/// names encode the episode and step so a directory listing sorts in play
/// order: `ep001_step0042.png`.
#[derive(Debug)]
pub struct FrameRecorder {
    dir: PathBuf,
    written: usize,
}

impl FrameRecorder {
    /// Record into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        info!("Recording frames to {}", dir.display());
        Ok(Self { dir, written: 0 })
    }

    /// Record into a fresh `root/<local timestamp>` directory.
    ///
    /// Runs started within the same second get `-1`, `-2`, ... suffixes so
    /// no run ever writes into another run's directory.
    ///
    /// # Errors
    ///
    /// Fails when `root` or the run directory cannot be created.
    pub fn timestamped(root: impl AsRef<Path>) -> Result<Self, RenderError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
        let mut dir = root.join(&stamp);
        let mut suffix = 0;
        loop {
            match fs::create_dir(&dir) {
                Ok(()) => break,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    suffix += 1;
                    dir = root.join(format!("{stamp}-{suffix}"));
                }
                Err(err) => return Err(err.into()),
            }
        }
        info!("Recording frames to {}", dir.display());
        Ok(Self { dir, written: 0 })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn frames_written(&self) -> usize {
        self.written
    }

    /// Write `frame` for the given 1-based episode and step.
    ///
    /// # Errors
    ///
    /// Fails when the image cannot be encoded or the file cannot be written.
    pub fn record(
        &mut self,
        episode: usize,
        step: usize,
        frame: &Frame,
    ) -> Result<PathBuf, RenderError> {
        let stem = format!("ep{episode:03}_step{step:04}");
        let path = match frame {
            Frame::Rgb(img) => {
                let path = self.dir.join(format!("{stem}.png"));
                img.save(&path)?;
                path
            }
            Frame::Text(text) => {
                let path = self.dir.join(format!("{stem}.txt"));
                fs::write(&path, text)?;
                path
            }
        };
        self.written += 1;
        debug!("Wrote frame {}", path.display());
        Ok(path)
    }
}
