use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::model::photo::PhotoError;

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Facing {
    /// Front camera
    User,
    /// Back camera
    Environment,
}

impl Facing {
    pub fn flipped(self) -> Facing {
        match self {
            Facing::User => Facing::Environment,
            Facing::Environment => Facing::User,
        }
    }
}

/// Failures as the platform reports them
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeviceError {
    #[error("NotAllowedError")]
    NotAllowed,
    #[error("NotFoundError")]
    NotFound,
    #[error("NotSupportedError")]
    NotSupported,
    #[error("NotReadableError")]
    NotReadable,
    #[error("{0}")]
    Other(String),
}

/// Failures as the user sees them
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Camera permission denied. Allow camera access in your settings")]
    PermissionDenied,

    #[error("No camera found on this device")]
    NoCamera,

    #[error("Camera is not supported on this device")]
    NotSupported,

    #[error("Camera is being used by another application")]
    CameraBusy,

    #[error("Flash not available on this device")]
    TorchUnavailable,

    #[error("Camera is not open")]
    NotOpen,

    #[error("Operation is not available in {0} mode")]
    WrongMode(String),

    #[error("Unable to access the camera: {0}")]
    Platform(String),

    #[error("Unable to read image {0}: {1}")]
    UnableToReadImage(PathBuf, anyhow::Error),

    #[error("Unable to decode image: {0}")]
    UnableToDecodeImage(anyhow::Error),

    #[error(transparent)]
    Photo(#[from] PhotoError),
}

impl From<DeviceError> for CaptureError {
    fn from(error: DeviceError) -> Self {
        match error {
            DeviceError::NotAllowed => CaptureError::PermissionDenied,
            DeviceError::NotFound => CaptureError::NoCamera,
            DeviceError::NotSupported => CaptureError::NotSupported,
            DeviceError::NotReadable => CaptureError::CameraBusy,
            DeviceError::Other(message) => CaptureError::Platform(message),
        }
    }
}

/// An encoded still image grabbed from a stream
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub mime: String,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn jpeg(data: Vec<u8>) -> Self {
        Frame {
            mime: "image/jpeg".to_string(),
            data,
        }
    }
}

pub trait CameraDevice {
    fn open_stream(&mut self, facing: Facing) -> Result<Box<dyn VideoStream>, DeviceError>;
}

/// A live camera stream, it holds the camera until `stop` is called
pub trait VideoStream {
    fn grab_frame(&mut self) -> Result<Frame, DeviceError>;

    fn supports_torch(&self) -> bool;

    fn set_torch(&mut self, on: bool) -> Result<(), DeviceError>;

    fn stop(&mut self);
}

pub trait QrDecoder {
    /// Text of the first code found in the frame
    fn decode(&mut self, frame: &Frame) -> Option<String>;
}
