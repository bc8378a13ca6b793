// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 解析种子URL
///
/// 种子URL可以是绝对地址，也可以是相对于来源页的路径。
/// 两种方式都无法得到绝对地址时返回 None。
pub fn resolve_seed_url(url: &str, reference: &str) -> Option<Url> {
    match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(ParseError::RelativeUrlWithoutBase) if !reference.is_empty() => {
            let base = Url::parse(reference).ok()?;
            resolve_url(&base, url).ok()
        }
        Err(_) => None,
    }
}
