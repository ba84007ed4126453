//! # 像素缓冲区模块
//!
//! [`PixelBuffer`] 是编解码核心唯一操作的数据结构：
//! 按行优先顺序交错存储的 8 位通道值。

use crate::error::CodecError;

/// 一个 `width × height` 的像素网格，每个像素包含固定数量的 8 位通道值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 使用已解码的原始通道数据创建像素缓冲区。
    ///
    /// # Errors
    ///
    /// 如果宽、高或通道数为 0，或者 `data` 的长度不等于
    /// `width * height * channels`，将返回 [`CodecError::InvalidGeometry`]。
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, CodecError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(channels as usize));

        if width == 0 || height == 0 || channels == 0 || expected != Some(data.len()) {
            return Err(CodecError::InvalidGeometry {
                width,
                height,
                channels,
                len: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / self.channels as usize
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
