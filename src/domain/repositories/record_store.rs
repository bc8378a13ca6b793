// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{FieldValue, Task, TaskField};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 主键已存在
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    /// 按主键更新时记录不存在
    #[error("Record missing: {0}")]
    Missing(String),
    /// 存储中的数据无法还原为任务
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// 等值过滤条件
#[derive(Debug, Clone, PartialEq)]
pub struct Cond {
    pub field: TaskField,
    pub value: FieldValue,
}

impl Cond {
    pub fn new(field: TaskField, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// 排序规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: TaskField,
    pub order: SortOrder,
}

impl Sort {
    pub fn asc(field: TaskField) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: TaskField) -> Self {
        Self {
            field,
            order: SortOrder::Desc,
        }
    }
}

/// 查询参数
///
/// `from`/`size` 为偏移分页，`size` 为 None 时不限制条数。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<Cond>,
    pub sort: Option<Sort>,
    pub from: u64,
    pub size: Option<u64>,
}

/// 查询结果
///
/// `total` 为匹配的记录总数，与 `items` 的分页无关。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub total: u64,
    pub items: Vec<Task>,
}

/// 记录存储特质
///
/// 任务层依赖的通用存储接口。索引与事务由具体实现负责。
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 保存新记录，主键重复时返回错误
    async fn save(&self, task: &Task) -> Result<(), StoreError>;
    /// 按主键更新记录
    async fn update(&self, task: &Task) -> Result<(), StoreError>;
    /// 按主键删除记录，记录不存在时不报错
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
    /// 按字段等值查找单条记录
    async fn get_by(&self, field: TaskField, value: &FieldValue)
        -> Result<Option<Task>, StoreError>;
    /// 条件查询
    async fn search(&self, query: &Query) -> Result<SearchResult, StoreError>;
}
