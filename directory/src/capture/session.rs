use std::{fs, path::Path, thread, time::Duration};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::{
    model::photo::{Photo, PhotoError},
    persistence::storage::io_to_generic_error,
};

use super::device::{CameraDevice, CaptureError, Facing, QrDecoder, VideoStream};

/// 5 decode attempts per second
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CaptureMode {
    Photo,
    Qr,
}

impl CaptureMode {
    pub fn default_facing(self) -> Facing {
        match self {
            CaptureMode::Photo => Facing::User,
            CaptureMode::Qr => Facing::Environment,
        }
    }
}

/// Reads an image file into an embedded photo, the mime type comes from the extension
pub fn import_photo(path: &Path) -> Result<Photo, CaptureError> {
    let mime = Photo::mime_from_path(path).ok_or_else(|| {
        PhotoError::NotAnImage(
            path.extension()
                .and_then(|extension| extension.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )
    })?;

    let data = fs::read(path)
        .map_err(|e| CaptureError::UnableToReadImage(path.to_path_buf(), io_to_generic_error(e)))?;

    Ok(Photo::from_image_bytes(mime, data)?)
}

struct OpenStream {
    mode: CaptureMode,
    facing: Facing,
    stream: Box<dyn VideoStream>,
    torch_on: bool,
}

/// One camera, at most one open stream at a time. The stream is released on `close` and on drop.
pub struct CaptureSession {
    device: Box<dyn CameraDevice>,
    open: Option<OpenStream>,
    scan_interval: Duration,
}

impl CaptureSession {
    pub fn new(device: Box<dyn CameraDevice>) -> Self {
        CaptureSession {
            device,
            open: None,
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    pub fn set_scan_interval(mut self, scan_interval: Duration) -> Self {
        self.scan_interval = scan_interval;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<CaptureMode> {
        self.open.as_ref().map(|open| open.mode)
    }

    pub fn facing(&self) -> Option<Facing> {
        self.open.as_ref().map(|open| open.facing)
    }

    pub fn torch_on(&self) -> bool {
        self.open.as_ref().is_some_and(|open| open.torch_on)
    }

    /// Opening while another mode is open closes that one first, the modes never overlap
    pub fn open(&mut self, mode: CaptureMode) -> Result<(), CaptureError> {
        self.close();

        let facing = mode.default_facing();
        let stream = self.device.open_stream(facing)?;

        log::info!("📷 Camera open [Mode: {}, Facing: {}]", mode, facing);

        self.open = Some(OpenStream {
            mode,
            facing,
            stream,
            torch_on: false,
        });

        Ok(())
    }

    /// Swaps between the front and back camera, keeping the mode
    pub fn switch_camera(&mut self) -> Result<Facing, CaptureError> {
        let mode = self.mode().ok_or(CaptureError::NotOpen)?;
        let facing = self.facing().ok_or(CaptureError::NotOpen)?.flipped();

        self.close();

        let stream = self.device.open_stream(facing)?;

        log::info!("🔄 Camera switched [Facing: {}]", facing);

        self.open = Some(OpenStream {
            mode,
            facing,
            stream,
            torch_on: false,
        });

        Ok(facing)
    }

    /// Returns whether the flash is now on
    pub fn toggle_flash(&mut self) -> Result<bool, CaptureError> {
        let open = self.open.as_mut().ok_or(CaptureError::NotOpen)?;

        if !open.stream.supports_torch() {
            return Err(CaptureError::TorchUnavailable);
        }

        open.stream.set_torch(!open.torch_on)?;
        open.torch_on = !open.torch_on;

        Ok(open.torch_on)
    }

    fn expect_mode(&self, mode: CaptureMode) -> Result<(), CaptureError> {
        match self.mode() {
            Some(current) if current == mode => Ok(()),
            Some(current) => Err(CaptureError::WrongMode(current.to_string())),
            None => Err(CaptureError::NotOpen),
        }
    }

    /// Grabs one frame as an embedded photo and releases the camera
    #[tracing::instrument(skip(self))]
    pub fn capture_photo(&mut self) -> Result<Photo, CaptureError> {
        self.expect_mode(CaptureMode::Photo)?;

        let frame = match self.open.as_mut() {
            Some(open) => open.stream.grab_frame()?,
            None => return Err(CaptureError::NotOpen),
        };

        self.close();

        Ok(Photo::from_image_bytes(&frame.mime, frame.data)?)
    }

    /// Feeds frames to `decoder` until it finds a code or `max_frames` are tried.
    /// The first decoded text wins and the camera is released, `None` leaves the camera open.
    #[tracing::instrument(skip(self, decoder))]
    pub fn scan_qr(
        &mut self,
        decoder: &mut dyn QrDecoder,
        max_frames: usize,
    ) -> Result<Option<String>, CaptureError> {
        self.expect_mode(CaptureMode::Qr)?;

        for attempt in 0..max_frames {
            if attempt > 0 && !self.scan_interval.is_zero() {
                thread::sleep(self.scan_interval);
            }

            let frame = match self.open.as_mut() {
                Some(open) => open.stream.grab_frame()?,
                None => return Err(CaptureError::NotOpen),
            };

            if let Some(text) = decoder.decode(&frame) {
                log::info!("🔎 QR decoded after {} frames", attempt + 1);

                self.close();

                return Ok(Some(text));
            }
        }

        Ok(None)
    }

    /// Picks an image file instead of using the camera, any open stream is released
    pub fn import_from_gallery(&mut self, path: &Path) -> Result<Photo, CaptureError> {
        self.close();

        import_photo(path)
    }

    /// Turns the flash off and stops the stream, a no-op when nothing is open
    pub fn close(&mut self) {
        if let Some(mut open) = self.open.take() {
            if open.torch_on {
                if let Err(err) = open.stream.set_torch(false) {
                    log::warn!("Unable to turn the flash off: {}", err);
                }
            }

            open.stream.stop();

            log::debug!("Camera released [Mode: {}]", open.mode);
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.close();
    }
}
