use std::{fmt, path::Path};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::consts::{DEFAULT_AVATAR_URL, MAX_PHOTO_BYTES};

#[derive(Error, Debug, PartialEq)]
pub enum PhotoError {
    #[error("File is too large ({0} bytes), the maximum is 5MB")]
    TooLarge(usize),

    #[error("Only image files are accepted, got: {0}")]
    NotAnImage(String),

    #[error("Malformed data url")]
    MalformedDataUrl,
}

/// A person's picture, either a link or the image bytes themselves
///
/// Embedded photos are serialized as `data:` urls so a snapshot stays a plain json document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(into = "String", try_from = "String")]
pub enum Photo {
    Url(String),
    Embedded { mime: String, data: Vec<u8> },
}

impl Photo {
    pub fn default_avatar() -> Self {
        Photo::Url(DEFAULT_AVATAR_URL.to_string())
    }

    /// Used by both gallery imports and camera captures, enforces the image constraints
    pub fn from_image_bytes(mime: &str, data: Vec<u8>) -> Result<Self, PhotoError> {
        if !mime.starts_with("image/") {
            return Err(PhotoError::NotAnImage(mime.to_string()));
        }

        if data.len() > MAX_PHOTO_BYTES {
            return Err(PhotoError::TooLarge(data.len()));
        }

        Ok(Photo::Embedded {
            mime: mime.to_string(),
            data,
        })
    }

    /// Mime type is derived from the extension, unknown extensions are not images
    pub fn mime_from_path(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        let mime = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "svg" => "image/svg+xml",
            _ => return None,
        };

        Some(mime)
    }

    pub fn to_data_url(&self) -> String {
        match self {
            Photo::Url(url) => url.clone(),
            Photo::Embedded { mime, data } => {
                format!("data:{};base64,{}", mime, STANDARD.encode(data))
            }
        }
    }

    pub fn parse(value: &str) -> Result<Self, PhotoError> {
        let Some(rest) = value.strip_prefix("data:") else {
            return Ok(Photo::Url(value.to_string()));
        };

        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or(PhotoError::MalformedDataUrl)?;

        let data = STANDARD
            .decode(payload)
            .map_err(|_| PhotoError::MalformedDataUrl)?;

        Ok(Photo::Embedded {
            mime: mime.to_string(),
            data,
        })
    }
}

impl Default for Photo {
    fn default() -> Self {
        Photo::default_avatar()
    }
}

impl From<Photo> for String {
    fn from(photo: Photo) -> Self {
        photo.to_data_url()
    }
}

impl TryFrom<String> for Photo {
    type Error = PhotoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Photo::parse(&value)
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Photo::Url(url) => write!(f, "{}", url),
            Photo::Embedded { mime, data } => write!(f, "[{} image, {} bytes]", mime, data.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn embedded_photo_survives_json() {
        let photo = Photo::from_image_bytes("image/png", vec![137, 80, 78, 71]).unwrap();

        let json = serde_json::to_string(&photo).unwrap();

        assert_eq!(json, "\"data:image/png;base64,iVBORw==\"");
        assert_eq!(serde_json::from_str::<Photo>(&json).unwrap(), photo);
    }

    #[test]
    fn plain_strings_are_urls() {
        let photo = Photo::parse("https://example.com/me.jpg").unwrap();

        assert_eq!(photo, Photo::Url("https://example.com/me.jpg".to_string()));
    }

    #[test]
    fn rejects_non_images() {
        let result = Photo::from_image_bytes("application/pdf", vec![1, 2, 3]);

        assert_eq!(
            result,
            Err(PhotoError::NotAnImage("application/pdf".to_string()))
        );
    }

    #[test]
    fn rejects_files_over_five_megabytes() {
        let result = Photo::from_image_bytes("image/jpeg", vec![0; MAX_PHOTO_BYTES + 1]);

        assert_eq!(result, Err(PhotoError::TooLarge(MAX_PHOTO_BYTES + 1)));
    }

    #[test]
    fn mime_is_derived_from_extension() {
        assert_eq!(
            Photo::mime_from_path(&PathBuf::from("me.JPG")),
            Some("image/jpeg")
        );
        assert_eq!(Photo::mime_from_path(&PathBuf::from("notes.txt")), None);
        assert_eq!(Photo::mime_from_path(&PathBuf::from("no_extension")), None);
    }

    #[test]
    fn malformed_data_url_is_an_error() {
        assert_eq!(
            Photo::parse("data:image/png,not-base64"),
            Err(PhotoError::MalformedDataUrl)
        );
    }
}
