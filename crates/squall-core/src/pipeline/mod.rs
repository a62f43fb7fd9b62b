//! Augmentation pipeline components.
//!
//! - **discovery**: Find eligible images in the input directory
//! - **validate**: Pre-decode size and magic-byte checks
//! - **decode**: Load images as 8-bit RGB
//! - **output**: Lazily created output directory and image writing
//! - **labels**: Copy label files next to augmented outputs
//! - **cancel**: Cooperative cancellation between files
//! - **processor**: Orchestrates the full run

pub mod cancel;
pub mod decode;
pub mod discovery;
pub mod labels;
pub mod output;
pub mod processor;
pub mod validate;

// Re-exports for convenient access
pub use cancel::CancelToken;
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use labels::LabelPairer;
pub use output::OutputDir;
pub use processor::Augmenter;
pub use validate::Validator;
