//! # 隐写核心模块
//!
//! 在字节载荷与像素缓冲区的最低有效位之间建立确定、可逆的映射。
//!
//! 位流格式：
//! * 32 位大端序的载荷长度，随后是载荷字节本身；每个字节均为高位在前 (MSB-first)。
//! * 像素按行优先顺序遍历，像素内按通道索引升序遍历，只访问策略选中的通道。
//! * 每个通道值只存储 1 bit：`value = (value & 0xFE) | bit`。

use crate::capacity;
use crate::constants::{BITS_PER_BYTE, HEADER_BITS};
use crate::error::CodecError;
use crate::pixels::PixelBuffer;
use crate::policy::ChannelPolicy;
use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::Cursor;

/// 使用固定通道策略的 LSB 编解码器。
///
/// 编解码器本身不持有任何可变状态，可以在多个线程间共享。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LsbCodec {
    policy: ChannelPolicy,
}

impl LsbCodec {
    pub fn new(policy: ChannelPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ChannelPolicy {
        &self.policy
    }

    /// 缓冲区在当前策略下的可用位数。
    pub fn capacity(&self, pixels: &PixelBuffer) -> Result<u64, CodecError> {
        let selected = self.policy.resolve(pixels.channels())?;
        Ok(capacity::compute_capacity(
            pixels.width(),
            pixels.height(),
            selected.len(),
        ))
    }

    /// 缓冲区在当前策略下可隐藏的最大载荷字节数。
    pub fn max_payload_bytes(&self, pixels: &PixelBuffer) -> Result<u64, CodecError> {
        let selected = self.policy.resolve(pixels.channels())?;
        Ok(capacity::max_payload_bytes(
            pixels.width(),
            pixels.height(),
            selected.len(),
        ))
    }

    /// 在修改任何像素之前检查 `payload_len` 字节的载荷能否放入缓冲区。
    pub fn validate(&self, pixels: &PixelBuffer, payload_len: usize) -> Result<(), CodecError> {
        let selected = self.policy.resolve(pixels.channels())?;
        capacity::validate(
            payload_len,
            pixels.width(),
            pixels.height(),
            selected.len(),
        )
    }

    /// 将载荷 (带长度头部) 写入缓冲区被选中通道的最低有效位。
    ///
    /// 最后一个载荷位之后的通道值保持不变。任何检查失败时缓冲区都不会被修改。
    ///
    /// # Errors
    ///
    /// * [`CodecError::InvalidChannelPolicy`] - 策略与缓冲区通道数不匹配。
    /// * [`CodecError::CapacityExceeded`] - 载荷超出容量。
    /// * [`CodecError::BufferTooSmall`] - 缓冲区实际数据不足以容纳全部位。
    pub fn embed(&self, pixels: &mut PixelBuffer, payload: &[u8]) -> Result<(), CodecError> {
        let selected = self.policy.resolve(pixels.channels())?;
        capacity::validate(
            payload.len(),
            pixels.width(),
            pixels.height(),
            selected.len(),
        )?;

        let channels = pixels.channels() as usize;
        let required = capacity::required_bits(payload.len());
        let available = (pixels.pixel_count() * selected.len()) as u64;
        if required > available {
            return Err(CodecError::BufferTooSmall {
                required,
                available,
            });
        }

        // validate 已保证长度可以用 u32 表示
        let header = (payload.len() as u32).to_be_bytes();
        let framed: Vec<u8> = header.iter().chain(payload).copied().collect();
        let mut bits = BitReader::endian(Cursor::new(framed.as_slice()), BigEndian);

        let data = pixels.as_raw_mut();
        for position in channel_positions(channels, &selected).take(required as usize) {
            let bit = bits.read_bit()?;
            data[position] = (data[position] & 0xFE) | bit as u8;
        }

        Ok(())
    }

    /// 从缓冲区被选中通道的最低有效位中恢复载荷。
    ///
    /// # Errors
    ///
    /// * [`CodecError::InvalidChannelPolicy`] - 策略与缓冲区通道数不匹配。
    /// * [`CodecError::CorruptOrAbsentPayload`] - 缓冲区连长度头部都放不下，
    ///   或者长度头部声明的位数超出了缓冲区剩余的位数。
    pub fn extract(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
        let selected = self.policy.resolve(pixels.channels())?;
        let usable = capacity::compute_capacity(pixels.width(), pixels.height(), selected.len());

        if usable < HEADER_BITS {
            return Err(CodecError::CorruptOrAbsentPayload {
                declared_bits: HEADER_BITS,
                available_bits: usable,
            });
        }

        let data = pixels.as_raw();
        let mut lsbs = channel_positions(pixels.channels() as usize, &selected)
            .map(|position| data[position] & 1 == 1);

        let header = read_bytes(&mut lsbs, (HEADER_BITS / BITS_PER_BYTE) as usize)?;
        let declared_len = header
            .iter()
            .fold(0u64, |len, &byte| (len << 8) | byte as u64);

        let declared_bits = declared_len * BITS_PER_BYTE;
        let available_bits = usable - HEADER_BITS;
        if declared_bits > available_bits {
            return Err(CodecError::CorruptOrAbsentPayload {
                declared_bits,
                available_bits,
            });
        }

        read_bytes(&mut lsbs, declared_len as usize)
    }
}

/// 按位流顺序产生被选中通道在原始数据中的下标：先按行优先遍历像素，像素内按通道升序。
///
/// 迭代器是无界的，调用方负责用 `take` 或容量检查限制其长度。
fn channel_positions(channels: usize, selected: &[usize]) -> impl Iterator<Item = usize> + '_ {
    (0..).flat_map(move |pixel: usize| selected.iter().map(move |&channel| pixel * channels + channel))
}

/// 从位迭代器中读取 `count` 个字节，每个字节高位在前。
fn read_bytes(bits: &mut impl Iterator<Item = bool>, count: usize) -> Result<Vec<u8>, CodecError> {
    let mut writer = BitWriter::endian(Vec::with_capacity(count), BigEndian);
    for bit in bits.take(count * BITS_PER_BYTE as usize) {
        writer.write_bit(bit)?;
    }
    Ok(writer.into_writer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_skip_unselected_channels() {
        let positions: Vec<usize> = channel_positions(4, &[0, 2]).take(6).collect();
        assert_eq!(positions, vec![0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn read_bytes_is_msb_first() -> Result<(), CodecError> {
        let mut bits = [true, false, false, false, false, false, false, true].into_iter();
        assert_eq!(read_bytes(&mut bits, 1)?, vec![0x81]);
        Ok(())
    }

    #[test]
    fn embed_writes_header_then_payload_msb_first() -> Result<(), CodecError> {
        // 5 * 2 * 4 = 40 bits = 32 header bits + one payload byte
        let mut pixels = PixelBuffer::new(5, 2, 4, vec![0xAA; 40])?;
        LsbCodec::default().embed(&mut pixels, &[0b1000_0001])?;

        let lsbs: Vec<u8> = pixels.as_raw().iter().map(|value| value & 1).collect();
        let mut expected = vec![0u8; 40];
        expected[31] = 1; // 长度 = 1
        expected[32] = 1;
        expected[39] = 1;
        assert_eq!(lsbs, expected);
        Ok(())
    }
}
