// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// 种子字段分隔符
///
/// 编码时不做任何转义，URL 或来源页中出现该序列会破坏解码结果。
pub const DELIMITER: &str = "|#|";

/// 种子解码错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedDecodeError {
    /// 字段数量不足（需要 breadth、depth、reference、url 四段）
    #[error("Malformed seed: expected 4 fields, found {0}")]
    MissingFields(usize),

    /// 字节序列不是合法的 UTF-8
    #[error("Malformed seed: invalid utf-8")]
    InvalidUtf8,
}

/// 种子
///
/// 描述一个被发现的URL的来源：从哪个页面发现、距离根种子的深度、
/// 以及在同一深度中的兄弟链接序号。种子是值对象，没有唯一性约束。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    /// 目标URL，可能是相对路径，需要结合来源页才能得到完整地址
    pub url: String,
    /// 来源页URL，根种子为空
    #[serde(rename = "reference_url", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    /// 链接深度
    #[serde(default)]
    pub depth: u32,
    /// 同层链接序号
    #[serde(default)]
    pub breadth: u32,
}

impl Seed {
    pub fn new(
        url: impl Into<String>,
        reference: impl Into<String>,
        depth: u32,
        breadth: u32,
    ) -> Self {
        Self {
            url: url.into(),
            reference: reference.into(),
            depth,
            breadth,
        }
    }

    /// 创建根种子（无来源页，深度和序号均为0）
    pub fn root(url: impl Into<String>) -> Self {
        Self::new(url, "", 0, 0)
    }

    /// URL 或来源页中是否包含分隔符
    ///
    /// 返回 true 时该种子编码后无法还原。
    pub fn has_delimiter_collision(&self) -> bool {
        self.url.contains(DELIMITER) || self.reference.contains(DELIMITER)
    }

    /// 编码为 `breadth|#|depth|#|reference|#|url`
    pub fn encode(&self) -> Vec<u8> {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            self.breadth, self.depth, self.reference, self.url
        )
        .into_bytes()
    }

    /// 从字节序列解码
    ///
    /// 字段不足四段时返回错误；breadth/depth 无法解析时按 0 处理，不报错。
    ///
    /// # 返回值
    ///
    /// * `Ok(Seed)` - 解码后的种子
    /// * `Err(SeedDecodeError)` - 字节序列结构不合法
    pub fn decode(bytes: &[u8]) -> Result<Self, SeedDecodeError> {
        let text = std::str::from_utf8(bytes).map_err(|_| SeedDecodeError::InvalidUtf8)?;
        let parts: Vec<&str> = text.split(DELIMITER).collect();

        if parts.len() < 4 {
            return Err(SeedDecodeError::MissingFields(parts.len()));
        }
        if parts.len() > 4 {
            // Extra parts are dropped, the decoded seed does not match the original
            warn!(
                fields = parts.len(),
                "Seed contains the field delimiter, decoded value is truncated"
            );
        }

        Ok(Self {
            breadth: parts[0].parse().unwrap_or(0),
            depth: parts[1].parse().unwrap_or(0),
            reference: parts[2].to_string(),
            url: parts[3].to_string(),
        })
    }
}

impl From<&Seed> for Vec<u8> {
    fn from(seed: &Seed) -> Self {
        seed.encode()
    }
}

impl TryFrom<&[u8]> for Seed {
    type Error = SeedDecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Seed::decode(bytes)
    }
}
