use std::fs;
use std::path::{Path, PathBuf};

use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

/// Replays still images from a directory as if they came from a camera.
///
/// Files are visited in file-name order. Once every image has been served
/// the source reports [`CaptureError::Exhausted`], which ends the loop the
/// same way a camera failure does.
pub struct ImageDirectorySource {
    paths: Vec<PathBuf>,
    next: usize,
    released: bool,
}

impl ImageDirectorySource {
    pub fn open(dir: &Path) -> Result<Self, CaptureError> {
        let entries = fs::read_dir(dir).map_err(|e| CaptureError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CaptureError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && is_image(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        log::info!("Found {} images in {}", paths.len(), dir.display());
        Ok(Self {
            paths,
            next: 0,
            released: false,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageDirectorySource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        if self.released {
            return Err(CaptureError::Device("source already released".into()));
        }
        let path = self.paths.get(self.next).ok_or(CaptureError::Exhausted)?;
        let image = image::open(path)
            .map_err(|e| CaptureError::Decode(format!("{}: {e}", path.display())))?
            .to_rgb8();
        let frame = Frame::from_rgb_image(image, self.next);
        self.next += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        if !self.released {
            log::debug!("Image directory source released after {} frames", self.next);
            self.released = true;
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
