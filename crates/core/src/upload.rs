//! Recipe image uploads: content sniffing and storage naming.
//!
//! The uploaded bytes are trusted only after the `image` crate recognises a
//! supported format and can read the dimensions from the header. The stored
//! file name is a fresh UUID, so client-supplied names never reach the
//! filesystem.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use uuid::Uuid;

use crate::error::CoreError;

/// Directory (relative to the media root) holding recipe images.
pub const RECIPE_UPLOAD_DIR: &str = "uploads/recipe";

/// Message returned for anything that is not a readable image.
const NOT_AN_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

/// Format and dimensions of an accepted upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// File extension used when storing an image of this format.
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "png",
            ImageFormat::WebP => "webp",
            _ => "jpg",
        }
    }
}

/// Sniff the format and read the dimensions without decoding pixel data.
pub fn inspect_image(bytes: &[u8]) -> Result<ImageInfo, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("The submitted file is empty.".into()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| CoreError::Validation(NOT_AN_IMAGE.into()))?;

    let format = match reader.format() {
        Some(f @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP)) => f,
        _ => return Err(CoreError::Validation(NOT_AN_IMAGE.into())),
    };

    let (width, height) = reader
        .into_dimensions()
        .map_err(|_| CoreError::Validation(NOT_AN_IMAGE.into()))?;

    Ok(ImageInfo {
        format,
        width,
        height,
    })
}

/// Relative storage path for a new recipe image, e.g.
/// `uploads/recipe/6f1c…e2.jpg`.
pub fn recipe_image_path(extension: &str) -> String {
    format!("{RECIPE_UPLOAD_DIR}/{}.{extension}", Uuid::new_v4())
}
