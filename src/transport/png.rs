//! # PNG Spool Sink
//!
//! Writes every transmitted copy as a PNG file into a directory, rotated
//! the way the device would receive it. Lets the CLI "print" without
//! hardware attached.
//!
//! Files are numbered per sink: `label-0001-29mm.png`, `label-0002-29mm.png`,
//! and so on. Labels printed without a cut get a `-nocut` suffix.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use super::{LabelSink, PrintJob};
use crate::compose::ComposedImage;
use crate::error::{LabelError, Result};

/// Spool directory sink.
#[derive(Debug)]
pub struct PngSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSink {
    /// Use `dir` as the spool directory, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            LabelError::Transport(format!("Cannot create spool directory {}: {}", dir.display(), e))
        })?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self, job: &PrintJob) -> PathBuf {
        let suffix = if job.cut { "" } else { "-nocut" };
        self.dir.join(format!(
            "label-{:04}-{}mm{}.png",
            self.written.len() + 1,
            job.tape.mm(),
            suffix
        ))
    }
}

impl LabelSink for PngSink {
    fn transmit(&mut self, image: &ComposedImage, job: &PrintJob) -> Result<()> {
        let path = self.next_path(job);
        let rotated = job.rotation.apply(image.image());
        rotated
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| LabelError::Transport(format!("Cannot write {}: {}", path.display(), e)))?;

        log::debug!(
            "spooled {} ({}x{}, rotated {})",
            path.display(),
            rotated.width(),
            rotated.height(),
            job.rotation
        );
        self.written.push(path);
        Ok(())
    }
}
