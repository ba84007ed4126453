//! # 错误类型模块
//!
//! 编解码核心的所有失败情况都在 [`CodecError`] 中定义。
//! 这些错误都是输入 (缓冲区、载荷、通道策略) 的确定性结果，重试不会改变结果。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// 载荷加上长度头部超出了图像的可用位数。
    #[error(
        "Not enough space in the image to hide the payload. \nRequired: {required} bits, Available: {available} bits"
    )]
    CapacityExceeded { required: u64, available: u64 },

    /// 嵌入过程中对缓冲区本身的容量复查失败。
    #[error(
        "The pixel buffer is too small for the framed payload. \nRequired: {required} bits, Available: {available} bits"
    )]
    BufferTooSmall { required: u64, available: u64 },

    /// 解码出的长度头部超出了缓冲区剩余的位数，说明图像中没有隐藏数据或已被修改。
    #[error(
        "No hidden payload found or the payload is corrupted. \nDeclared: {declared_bits} bits, Available: {available_bits} bits"
    )]
    CorruptOrAbsentPayload {
        declared_bits: u64,
        available_bits: u64,
    },

    /// 通道策略请求了缓冲区不存在的通道。
    #[error("Channel policy '{policy}' cannot be applied to a buffer with {channels} channel(s)")]
    InvalidChannelPolicy { policy: String, channels: u8 },

    /// 无法解析的通道策略文本。
    #[error("Unknown channel policy '{0}'. \nExpected 'all', 'rgb', 'rgba' or distinct letters from 'rgba'")]
    UnknownChannelPolicy(String),

    /// 像素缓冲区的几何尺寸与数据长度不一致。
    #[error(
        "Invalid pixel buffer geometry: {width}x{height} with {channels} channel(s) does not match {len} bytes"
    )]
    InvalidGeometry {
        width: u32,
        height: u32,
        channels: u8,
        len: usize,
    },

    /// 位流读写失败。
    #[error(transparent)]
    BitStream(#[from] std::io::Error),
}
