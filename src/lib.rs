//! # lsb_embed 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：容量规划、通道选择策略和逐位编解码器，
//! 以及构建在其上的图像读写与命令行处理。
//!
//! 核心编解码器只操作内存中的 [`PixelBuffer`]，不读写文件、不打印日志。

// 声明库包含的所有模块。

pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod image_io;
pub mod pixels;
pub mod policy;
pub mod steganography;

pub use error::CodecError;
pub use pixels::PixelBuffer;
pub use policy::ChannelPolicy;
pub use steganography::LsbCodec;
