//! Cheap checks run before a full decode.

use std::io::Read;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::FileError;

/// Leading bytes of the raster formats the decoder accepts.
const SIGNATURES: &[&[u8]] = &[
    &[0xFF, 0xD8, 0xFF],                               // JPEG
    &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], // PNG
    b"GIF8",                                           // GIF
    b"BM",                                             // BMP
    &[b'I', b'I', 0x2A, 0x00],                         // TIFF (little-endian)
    &[b'M', b'M', 0x00, 0x2A],                         // TIFF (big-endian)
];

/// Validates files before decoding.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Reject files that are too large or do not look like an image.
    pub fn validate(&self, path: &Path) -> Result<(), FileError> {
        let metadata = std::fs::metadata(path).map_err(|e| FileError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {}", e),
        })?;

        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        if metadata.len() > max_bytes {
            return Err(FileError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let mut header = [0u8; 12];
        let bytes_read = std::fs::File::open(path)
            .and_then(|mut f| f.read(&mut header))
            .map_err(|e| FileError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot open file: {}", e),
            })?;

        if !is_image_header(&header[..bytes_read]) {
            return Err(FileError::Decode {
                path: path.to_path_buf(),
                message: "Unrecognized image format (invalid magic bytes)".to_string(),
            });
        }
        Ok(())
    }
}

fn is_image_header(header: &[u8]) -> bool {
    if SIGNATURES.iter().any(|sig| header.starts_with(sig)) {
        return true;
    }
    // WebP: RIFF....WEBP
    header.len() >= 12 && header.starts_with(b"RIFF") && &header[8..12] == b"WEBP"
}
