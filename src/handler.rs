//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_IMAGE_PREFIX, RECOVERED_TEXT_PREFIX};
use crate::image_io::{load_pixels, save_pixels};
use crate::steganography::LsbCodec;
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和载荷文件、检查隐写空间是否足够、调用隐写核心函数写入长度头部和载荷，
/// 最后将结果以无损格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与通道策略的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或载荷文件。
/// * 通道策略与图像的通道数不匹配。
/// * 图像文件没有足够的空间来隐藏载荷。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, HIDDEN_IMAGE_PREFIX, "png"));
    ensure_writable(&dest, args.force)?;

    let mut pixels = load_pixels(&args.image)?;

    let payload = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    let codec = LsbCodec::new(args.channels);
    info!(
        "Hiding {} byte(s) with channel policy '{}'",
        payload.len(),
        codec.policy()
    );

    codec.validate(&pixels, payload.len())?;
    codec.embed(&mut pixels, &payload)?;
    debug!("Embedded payload into {}", args.image.display());

    save_pixels(&pixels, &dest)?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数获取长度头部与载荷，
/// 最后将恢复的内容写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与通道策略的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 图像中没有隐藏数据，或数据已损坏。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .text
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, RECOVERED_TEXT_PREFIX, "txt"));
    ensure_writable(&dest, args.force)?;

    let pixels = load_pixels(&args.image)?;
    let codec = LsbCodec::new(args.channels);

    let payload = codec.extract(&pixels).with_context(|| {
        format!(
            "Failed to recover the hidden data from '{}'. \nThe image may not contain a hidden message, is corrupted or was hidden with another channel policy.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Recovered {} byte(s) with channel policy '{}'",
        payload.len(),
        codec.policy()
    );

    fs::write(&dest, payload).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// # Errors
///
/// 无法读取图像，或通道策略与图像的通道数不匹配时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let pixels = load_pixels(&args.image)?;
    let codec = LsbCodec::new(args.channels);

    let usable_bits = codec.capacity(&pixels)?;
    let max_bytes = codec.max_payload_bytes(&pixels)?;

    println!(
        "{}x{} image, {} channel(s), policy '{}': {} usable bits, up to {} bytes of payload",
        pixels.width(),
        pixels.height(),
        pixels.channels(),
        codec.policy(),
        usable_bits.to_string().green().bold(),
        max_bytes.to_string().green().bold()
    );
    Ok(())
}

/// 在输入文件旁生成默认输出路径：`<prefix><文件名主干>.<extension>`。
fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
