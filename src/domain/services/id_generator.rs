// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// ID 生成器特质
///
/// 任务创建时通过注入的生成器分配全局唯一ID，便于测试时替换。
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// 生成新的任务ID
    fn next_id(&self) -> String;
}

/// 基于 UUID v4 的生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// 自增ID生成器
///
/// 生成 `{prefix}{n}` 形式的ID，计数器只在进程内有效，
/// 多进程共享存储时需要为每个进程配置不同的前缀。
#[derive(Debug)]
pub struct IncrementIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl IncrementIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// 从指定值开始计数（用于进程重启后接续已有ID）
    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for IncrementIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}
