//! # 图像读写模块
//!
//! 负责在图像文件与 [`PixelBuffer`] 之间转换。
//! 带 alpha 通道的图像解码为 RGBA8，其余图像解码为 RGB8；
//! 写出时只允许无损格式，因为有损重编码会破坏隐藏的数据。

use crate::constants::LOSSLESS_FORMATS;
use crate::pixels::PixelBuffer;
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbImage, RgbaImage};
use log::debug;
use std::path::Path;

/// 读取并解码图像文件。
///
/// # Errors
///
/// 无法打开或解码图像文件时返回错误。
pub fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    let decoded = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    let (width, height) = (decoded.width(), decoded.height());
    let (channels, raw) = if decoded.color().has_alpha() {
        (4, decoded.into_rgba8().into_raw())
    } else {
        (3, decoded.into_rgb8().into_raw())
    };

    debug!(
        "Decoded {} as {}x{} with {} channel(s)",
        path.display(),
        width,
        height,
        channels
    );

    Ok(PixelBuffer::new(width, height, channels, raw)?)
}

/// 将像素缓冲区编码为无损图像文件，格式由扩展名决定。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 扩展名无法识别，或对应的格式不是无损格式。
/// * 缓冲区的通道数不是 3 或 4。
/// * 编码或写入文件失败。
pub fn save_pixels(pixels: &PixelBuffer, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Unable to determine the image format of: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        LOSSLESS_FORMATS.contains(&format),
        "Refusing to save as {:?}: only lossless formats keep the hidden data intact. \nUse one of: {}",
        format,
        "png, bmp, tiff, webp, qoi".green().bold()
    );

    let (width, height) = (pixels.width(), pixels.height());
    let raw = pixels.as_raw().to_vec();
    let saved = match pixels.channels() {
        3 => RgbImage::from_raw(width, height, raw)
            .context("Pixel buffer does not fit an RGB image")?
            .save_with_format(path, format),
        4 => RgbaImage::from_raw(width, height, raw)
            .context("Pixel buffer does not fit an RGBA image")?
            .save_with_format(path, format),
        other => anyhow::bail!("Unsupported channel count for encoding: {}", other),
    };

    saved.with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    debug!("Encoded {} as {:?}", path.display(), format);
    Ok(())
}
