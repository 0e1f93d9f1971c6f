use std::{fs, path::Path};

use rqrr::PreparedImage;

use crate::persistence::storage::io_to_generic_error;

use super::device::{CaptureError, Frame, QrDecoder};

/// Finds QR codes in encoded images (png / jpeg)
#[derive(Debug, Default)]
pub struct ImageQrDecoder;

impl ImageQrDecoder {
    pub fn new() -> Self {
        ImageQrDecoder
    }

    /// Text of the first readable code in the image, `None` when the image holds no code
    #[tracing::instrument(skip(bytes))]
    pub fn decode_image(bytes: &[u8]) -> Result<Option<String>, CaptureError> {
        let luma = image::load_from_memory(bytes)
            .map_err(|e| CaptureError::UnableToDecodeImage(anyhow::anyhow!(e)))?
            .to_luma8();

        let mut prepared = PreparedImage::prepare_from_greyscale(
            luma.width() as usize,
            luma.height() as usize,
            |x, y| luma.get_pixel(x as u32, y as u32).0[0],
        );

        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_, content)) => return Ok(Some(content)),
                Err(err) => log::debug!("Skipping unreadable QR grid: {}", err),
            }
        }

        Ok(None)
    }

    pub fn decode_file(path: &Path) -> Result<Option<String>, CaptureError> {
        let bytes = fs::read(path).map_err(|e| {
            CaptureError::UnableToReadImage(path.to_path_buf(), io_to_generic_error(e))
        })?;

        Self::decode_image(&bytes)
    }
}

impl QrDecoder for ImageQrDecoder {
    fn decode(&mut self, frame: &Frame) -> Option<String> {
        match Self::decode_image(&frame.data) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Dropping frame: {}", err);
                None
            }
        }
    }
}
