//! Image decoding with content-based format detection and size limits.

use image::{GenericImageView, ImageFormat, RgbImage};
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::FileError;

/// Image decoder with configurable limits.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
pub struct DecodedImage {
    /// Pixels as 8-bit RGB; any alpha channel is dropped
    pub image: RgbImage,
    /// Detected image format
    pub format: ImageFormat,
}

impl ImageDecoder {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Read and decode a file. Blocking; call from a worker thread.
    pub fn decode(&self, path: &Path) -> Result<DecodedImage, FileError> {
        let bytes = std::fs::read(path).map_err(|e| FileError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read file: {}", e),
        })?;
        self.decode_bytes(bytes, path)
    }

    /// Decode an in-memory buffer, detecting the format from its content.
    pub fn decode_bytes(&self, bytes: Vec<u8>, path: &Path) -> Result<DecodedImage, FileError> {
        let reader = image::ImageReader::new(std::io::Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| FileError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = reader
            .format()
            .or_else(|| ImageFormat::from_path(path).ok())
            .ok_or_else(|| FileError::Decode {
                path: path.to_path_buf(),
                message: "Unknown image format".to_string(),
            })?;

        let image = reader.decode().map_err(|e| FileError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        let max_dim = self.limits.max_image_dimension;
        if width > max_dim || height > max_dim {
            return Err(FileError::ImageTooLarge {
                path: path.to_path_buf(),
                width,
                height,
                max_dim,
            });
        }
        if width == 0 || height == 0 {
            return Err(FileError::Decode {
                path: path.to_path_buf(),
                message: "Image has no pixels".to_string(),
            });
        }

        Ok(DecodedImage {
            image: image.to_rgb8(),
            format,
        })
    }
}
