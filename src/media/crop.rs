// SPDX-License-Identifier: MPL-2.0
//! Odometer region cropping.
//!
//! The cropped image is what the text detector sees, so a tight region keeps
//! dashboard labels and warning lights out of the OCR result.

use crate::domain::region::CropRegion;
use crate::error::{Error, Result};
use image_rs::{DynamicImage, ImageFormat, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};

/// Crop `image` to `region`, clamped to the image bounds.
///
/// Returns `None` when the region lies entirely outside the image.
#[must_use]
pub fn crop(image: &DynamicImage, region: &CropRegion) -> Option<DynamicImage> {
    let (x, y, width, height) = region.clamp_to(image.width(), image.height())?;
    Some(image.crop_imm(x, y, width, height))
}

/// Crop `source` and write the result to `processed_dir/<source file name>`.
///
/// The output format follows the file extension, falling back to the
/// source's detected format. `processed_dir` is created if missing.
///
/// # Errors
///
/// Returns [`Error::ImageIo`] if the source cannot be decoded, the region
/// misses the image, or the crop cannot be written.
pub fn crop_to_processing_dir(
    source: &Path,
    region: &CropRegion,
    processed_dir: &Path,
) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| Error::ImageIo(format!("{} has no file name", source.display())))?;

    let reader = ImageReader::open(source)
        .map_err(|e| Error::ImageIo(format!("cannot open {}: {e}", source.display())))?
        .with_guessed_format()
        .map_err(|e| Error::ImageIo(format!("cannot read {}: {e}", source.display())))?;
    let source_format = reader.format();
    let image = reader
        .decode()
        .map_err(|e| Error::ImageIo(format!("cannot decode {}: {e}", source.display())))?;

    let cropped = crop(&image, region).ok_or_else(|| {
        Error::ImageIo(format!(
            "crop region ({}, {}, {}, {}) lies outside {}x{} image {}",
            region.left(),
            region.top(),
            region.right(),
            region.bottom(),
            image.width(),
            image.height(),
            source.display()
        ))
    })?;

    fs::create_dir_all(processed_dir).map_err(|e| {
        Error::ImageIo(format!("cannot create {}: {e}", processed_dir.display()))
    })?;
    let destination = processed_dir.join(file_name);

    let format = ImageFormat::from_path(&destination)
        .ok()
        .or(source_format)
        .unwrap_or(ImageFormat::Png);
    save(&cropped, &destination, format)?;

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        width = cropped.width(),
        height = cropped.height(),
        "cropped odometer region"
    );
    Ok(destination)
}

fn save(image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
    // JPEG has no alpha channel.
    let result = if format == ImageFormat::Jpeg {
        image.to_rgb8().save_with_format(path, format)
    } else {
        image.save_with_format(path, format)
    };
    result.map_err(|e| Error::ImageIo(format!("cannot save {}: {e}", path.display())))
}
