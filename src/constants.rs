use image::ImageFormat;

/// 长度头部所占的位数。
/// 载荷长度以 `u32` 大端序写入，每个被选中的通道只存储 1 bit，
/// 因此需要 32 个通道值来隐藏长度。
pub const HEADER_BITS: u64 = 32;

/// 载荷中单个字节所占的位数。
pub const BITS_PER_BYTE: u64 = 8;

/// 允许写出的无损图像格式。
/// 有损重编码会破坏最低有效位中的数据。
pub const LOSSLESS_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";

/// 用于固定通道选择策略的环境变量。
pub const CHANNELS_ENV: &str = "LSB_EMBED_CHANNELS";
