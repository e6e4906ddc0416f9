use {
    crate::{Image, ImageError, RawInput},
    crates_image::{ExtendedColorType, ImageEncoder, ImageFormat},
    std::{fs, path::Path},
};

// jpeg quality for saved overlays
const JPEG_QUALITY: u8 = 90;

/// Decodes an image file; the format is detected from the content.
pub fn load(path: &Path) -> Result<RawInput, ImageError> {
    let decoded = crates_image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    Ok(RawInput::Decoded(decoded))
}

/// Encodes an `Image` as JPEG bytes.
pub fn encode_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    let data = image.to_interleaved()?;
    let mut buffer = Vec::new();
    crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            &data,
            image.width() as u32,
            image.height() as u32,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Writes `image` to `path`, choosing the format from the extension.
///
/// Missing parent directories are created.
pub fn save(image: &Image, path: &Path) -> Result<(), ImageError> {
    let format = ImageFormat::from_path(path)
        .map_err(|e| ImageError::Encode(format!("{}: {e}", path.display())))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    if format == ImageFormat::Jpeg {
        fs::write(path, encode_jpeg(image, JPEG_QUALITY)?)?;
        return Ok(());
    }
    crates_image::save_buffer_with_format(
        path,
        &image.to_interleaved()?,
        image.width() as u32,
        image.height() as u32,
        ExtendedColorType::Rgb8,
        format,
    )
    .map_err(|e| ImageError::Encode(e.to_string()))
}
