//! # 通道选择策略模块
//!
//! 决定每个像素中哪些通道的最低有效位可以被覆盖。
//! 嵌入和提取必须使用同一策略，否则恢复出的数据毫无意义。

use crate::error::CodecError;
use std::fmt;
use std::str::FromStr;

/// 通道名称，顺序与通道索引一致 (R, G, B, A)。
const CHANNEL_LETTERS: [char; 4] = ['r', 'g', 'b', 'a'];

/// 通道选择策略。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChannelPolicy {
    /// 缓冲区拥有的所有通道。
    #[default]
    All,
    /// 仅红、绿、蓝三个通道；对 RGBA 图像即"除 alpha 外的所有通道"。
    Rgb,
    /// 红、绿、蓝、alpha 四个通道。
    Rgba,
    /// 自定义的通道索引子集，按升序排列且不重复。
    Custom(Vec<usize>),
}

impl ChannelPolicy {
    /// 创建自定义策略，索引会被排序并去重。
    ///
    /// # Errors
    ///
    /// 索引集合为空时返回 [`CodecError::UnknownChannelPolicy`]。
    pub fn custom(indices: impl IntoIterator<Item = usize>) -> Result<Self, CodecError> {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();

        if indices.is_empty() {
            return Err(CodecError::UnknownChannelPolicy(String::new()));
        }

        Ok(Self::Custom(indices))
    }

    /// 针对具有 `channels` 个通道的缓冲区，解析出被选中的通道索引 (升序)。
    ///
    /// # Errors
    ///
    /// 策略请求的通道索引不小于 `channels` 时返回 [`CodecError::InvalidChannelPolicy`]。
    pub fn resolve(&self, channels: u8) -> Result<Vec<usize>, CodecError> {
        let selected: Vec<usize> = match self {
            Self::All => (0..channels as usize).collect(),
            Self::Rgb => vec![0, 1, 2],
            Self::Rgba => vec![0, 1, 2, 3],
            Self::Custom(indices) => indices.clone(),
        };

        if selected.is_empty() || selected.iter().any(|&index| index >= channels as usize) {
            return Err(CodecError::InvalidChannelPolicy {
                policy: self.to_string(),
                channels,
            });
        }

        Ok(selected)
    }
}

impl FromStr for ChannelPolicy {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" => return Ok(Self::All),
            "rgb" => return Ok(Self::Rgb),
            "rgba" => return Ok(Self::Rgba),
            _ => {}
        }

        let unknown = || CodecError::UnknownChannelPolicy(s.to_string());
        let mut indices = Vec::with_capacity(normalized.len());
        for letter in normalized.chars() {
            let index = CHANNEL_LETTERS
                .iter()
                .position(|&c| c == letter)
                .ok_or_else(unknown)?;
            if indices.contains(&index) {
                return Err(unknown());
            }
            indices.push(index);
        }

        Self::custom(indices).map_err(|_| unknown())
    }
}

impl fmt::Display for ChannelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Rgb => write!(f, "rgb"),
            Self::Rgba => write!(f, "rgba"),
            Self::Custom(indices) => indices.iter().try_for_each(|&index| {
                match CHANNEL_LETTERS.get(index) {
                    Some(letter) => write!(f, "{letter}"),
                    None => write!(f, "[{index}]"),
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_policies() {
        assert_eq!("all".parse::<ChannelPolicy>().ok(), Some(ChannelPolicy::All));
        assert_eq!("RGB".parse::<ChannelPolicy>().ok(), Some(ChannelPolicy::Rgb));
        assert_eq!(" rgba ".parse::<ChannelPolicy>().ok(), Some(ChannelPolicy::Rgba));
    }

    #[test]
    fn parses_custom_subset_in_channel_order() {
        let policy: ChannelPolicy = "br".parse().expect("valid subset");
        assert_eq!(policy, ChannelPolicy::Custom(vec![0, 2]));
        assert_eq!(policy.to_string(), "rb");
    }

    #[test]
    fn rejects_unknown_and_duplicate_letters() {
        assert!("rgbx".parse::<ChannelPolicy>().is_err());
        assert!("rr".parse::<ChannelPolicy>().is_err());
        assert!("".parse::<ChannelPolicy>().is_err());
    }

    #[test]
    fn resolves_against_channel_count() {
        assert_eq!(ChannelPolicy::All.resolve(4).ok(), Some(vec![0, 1, 2, 3]));
        assert_eq!(ChannelPolicy::Rgb.resolve(4).ok(), Some(vec![0, 1, 2]));
        assert!(matches!(
            ChannelPolicy::Rgba.resolve(3),
            Err(CodecError::InvalidChannelPolicy { channels: 3, .. })
        ));
        assert!(ChannelPolicy::Rgb.resolve(1).is_err());
    }
}
