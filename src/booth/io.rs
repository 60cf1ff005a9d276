use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    booth::traits::{FrameSource, PhotoSink, Presenter},
    capture::CaptureStatus,
    error::Result,
    frame::PixelBuffer,
};

/// Frame source backed by a still image file
///
/// Stands in for a live camera: every capture returns the same decoded
/// image. Useful for the CLI and for exercising the pipeline end to end.
pub struct StillImageSource {
    frame: PixelBuffer,
}

impl StillImageSource {
    /// Load the image at `path` (PNG or JPEG) as the frame to serve
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgb8();
        debug!(
            "Loaded {}x{} frame from {:?}",
            image.width(),
            image.height(),
            path
        );
        Ok(Self {
            frame: PixelBuffer::from_rgb8(&image),
        })
    }

    /// Serve an already-decoded buffer
    pub fn from_buffer(frame: PixelBuffer) -> Self {
        Self { frame }
    }
}

impl FrameSource for StillImageSource {
    fn current_frame(&self) -> Result<PixelBuffer> {
        Ok(self.frame.clone())
    }
}

/// Stores encoded photos under a fixed directory
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `directory`, creating it on first use
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl PhotoSink for DirectorySink {
    fn store(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(file_name);
        fs::write(&path, bytes)?;
        info!("Photo saved to {:?}", path);
        Ok(())
    }
}

/// Presenter that narrates the session through log lines
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn countdown_tick(&self, remaining: u32) {
        info!("⏱  {}", remaining);
    }

    fn status_changed(&self, status: CaptureStatus) {
        info!("Session state: {:?}", status);
    }

    fn photo_ready(&self, photo: &PixelBuffer) {
        info!("📷 Photo ready ({}x{})", photo.width(), photo.height());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn directory_sink_writes_the_named_file() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("photos"));

        sink.store("captured_image.png", b"not-really-a-png").unwrap();

        let stored = fs::read(dir.path().join("photos/captured_image.png")).unwrap();
        assert_eq!(stored, b"not-really-a-png");
    }

    #[test]
    fn still_image_source_serves_the_same_frame_each_time() {
        let frame = PixelBuffer::new_filled(2, 2, [0.5, 0.5, 0.5]);
        let source = StillImageSource::from_buffer(frame.clone());

        assert_eq!(source.current_frame().unwrap(), frame);
        assert_eq!(source.current_frame().unwrap(), frame);
    }
}
