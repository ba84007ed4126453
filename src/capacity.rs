//! # 容量规划模块
//!
//! 在任何像素被修改之前，拒绝无法放入图像的嵌入请求。

use crate::constants::{BITS_PER_BYTE, HEADER_BITS};
use crate::error::CodecError;

/// 计算图像在给定通道数下可用于隐写的总位数。
pub fn compute_capacity(width: u32, height: u32, channels_used: usize) -> u64 {
    (width as u64)
        .saturating_mul(height as u64)
        .saturating_mul(channels_used as u64)
}

/// 隐藏 `payload_len` 字节载荷 (含长度头部) 所需的位数。
pub fn required_bits(payload_len: usize) -> u64 {
    (payload_len as u64)
        .saturating_mul(BITS_PER_BYTE)
        .saturating_add(HEADER_BITS)
}

/// 在给定几何尺寸下可隐藏的最大载荷字节数。
pub fn max_payload_bytes(width: u32, height: u32, channels_used: usize) -> u64 {
    let usable = compute_capacity(width, height, channels_used);
    (usable.saturating_sub(HEADER_BITS) / BITS_PER_BYTE).min(u32::MAX as u64)
}

/// 检查载荷是否能放入图像。
///
/// # Errors
///
/// 所需位数超过可用位数，或载荷长度无法用 32 位头部表示时，
/// 返回 [`CodecError::CapacityExceeded`]。
pub fn validate(
    payload_len: usize,
    width: u32,
    height: u32,
    channels_used: usize,
) -> Result<(), CodecError> {
    let required = required_bits(payload_len);
    let available = compute_capacity(width, height, channels_used);

    if required > available || u32::try_from(payload_len).is_err() {
        return Err(CodecError::CapacityExceeded {
            required,
            available,
        });
    }

    Ok(())
}
