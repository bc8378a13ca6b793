// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::seed::Seed;
use crate::utils::url_utils;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 抓取任务实体
///
/// 一个持久化的抓取单元，由种子信息、唯一标识、抓取状态、
/// 时间戳以及最近一次快照的引用组成。任务的整个生命周期由存储持有，
/// 本层不做缓存。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// 种子信息（url、reference_url、depth、breadth）
    #[serde(flatten)]
    pub seed: Seed,
    /// 任务唯一标识符，分配后不可变
    pub id: String,
    /// 主机名，单独存储以便按域名过滤
    #[serde(skip)]
    pub host: String,
    /// URL协议部分
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schema: String,
    /// 原始URL
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub original_url: String,
    /// 流水线阶段标记
    pub phrase: Phrase,
    /// 抓取状态
    pub status: TaskStatus,
    /// 最近一次错误或诊断信息
    #[serde(skip)]
    pub message: String,
    /// 创建时间
    #[serde(rename = "created", default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<FixedOffset>>,
    /// 更新时间
    #[serde(rename = "updated", default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<FixedOffset>>,
    /// 最近一次抓取时间
    #[serde(skip)]
    pub last_fetch_time: Option<DateTime<FixedOffset>>,
    /// 最近一次检查时间
    #[serde(skip)]
    pub last_check_time: Option<DateTime<FixedOffset>>,
    /// 下一次检查时间
    #[serde(skip)]
    pub next_check_time: Option<DateTime<FixedOffset>>,
    /// 最近快照版本
    #[serde(skip)]
    pub snapshot_version: i32,
    /// 最近快照ID
    #[serde(skip)]
    pub snapshot_id: String,
    /// 最近快照哈希
    #[serde(skip)]
    pub snapshot_hash: String,
    /// 最近快照 SimHash
    #[serde(skip)]
    pub snapshot_sim_hash: String,
}

/// 任务状态
///
/// `Fetching` 由外部抓取组件写入，本层只读取，从不主动设置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum TaskStatus {
    /// 已创建
    #[default]
    Created,
    /// 抓取中（外部写入）
    Fetching,
    /// 抓取失败
    FetchFailed,
    /// 抓取成功
    FetchSuccess,
}

impl From<TaskStatus> for i32 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Created => 0,
            TaskStatus::Fetching => 1,
            TaskStatus::FetchFailed => 2,
            TaskStatus::FetchSuccess => 3,
        }
    }
}

/// 未定义的状态值
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid task status: {0}")]
pub struct InvalidStatus(pub i32);

impl TryFrom<i32> for TaskStatus {
    type Error = InvalidStatus;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::Created),
            1 => Ok(TaskStatus::Fetching),
            2 => Ok(TaskStatus::FetchFailed),
            3 => Ok(TaskStatus::FetchSuccess),
            other => Err(InvalidStatus(other)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Created => write!(f, "created"),
            TaskStatus::Fetching => write!(f, "fetching"),
            TaskStatus::FetchFailed => write!(f, "fetch_failed"),
            TaskStatus::FetchSuccess => write!(f, "fetch_success"),
        }
    }
}

/// 流水线阶段标记
///
/// 阶段的语义由外部的抓取流水线定义，这里只关心"待抓取"这一个值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phrase(pub i32);

impl Phrase {
    /// 待抓取
    pub const PENDING_FETCH: Phrase = Phrase(1);

    pub fn is_pending_fetch(self) -> bool {
        self == Self::PENDING_FETCH
    }
}

impl From<Phrase> for i32 {
    fn from(phrase: Phrase) -> Self {
        phrase.0
    }
}

impl From<i32> for Phrase {
    fn from(value: i32) -> Self {
        Phrase(value)
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 快照引用，由外部内容存储子系统写入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub version: i32,
    pub id: String,
    pub hash: String,
    pub sim_hash: String,
}

impl Task {
    /// 由种子构造任务
    ///
    /// 主机名、协议和原始URL由种子URL推导（相对URL结合来源页解析），
    /// 无法解析时这些字段保持为空。阶段默认为待抓取。
    pub fn from_seed(seed: Seed) -> Self {
        let resolved = url_utils::resolve_seed_url(&seed.url, &seed.reference);
        let (host, schema, original_url) = match resolved {
            Some(url) => (
                url.host_str().unwrap_or_default().to_string(),
                url.scheme().to_string(),
                url.to_string(),
            ),
            None => (String::new(), String::new(), String::new()),
        };

        Self {
            seed,
            host,
            schema,
            original_url,
            phrase: Phrase::PENDING_FETCH,
            ..Default::default()
        }
    }

    pub fn url(&self) -> &str {
        &self.seed.url
    }

    /// 任务是否被视为存在
    ///
    /// 某些存储在未命中时返回零值记录而不是明确的"未找到"，
    /// 因此需要同时检查ID和创建时间。
    pub fn exists(&self) -> bool {
        !self.id.is_empty() && self.create_time.is_some()
    }

    /// 记录快照引用
    pub fn record_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot_version = snapshot.version;
        self.snapshot_id = snapshot.id;
        self.snapshot_hash = snapshot.hash;
        self.snapshot_sim_hash = snapshot.sim_hash;
    }

    /// 读取持久化字段的值，供内存存储做过滤和排序
    pub fn field_value(&self, field: TaskField) -> FieldValue {
        match field {
            TaskField::Id => self.id.as_str().into(),
            TaskField::Host => self.host.as_str().into(),
            TaskField::Url => self.seed.url.as_str().into(),
            TaskField::ReferenceUrl => self.seed.reference.as_str().into(),
            TaskField::Depth => self.seed.depth.into(),
            TaskField::Breadth => self.seed.breadth.into(),
            TaskField::Schema => self.schema.as_str().into(),
            TaskField::OriginalUrl => self.original_url.as_str().into(),
            TaskField::Phrase => self.phrase.into(),
            TaskField::Status => self.status.into(),
            TaskField::Message => self.message.as_str().into(),
            TaskField::Created => self.create_time.into(),
            TaskField::Updated => self.update_time.into(),
            TaskField::LastFetch => self.last_fetch_time.into(),
            TaskField::LastCheck => self.last_check_time.into(),
            TaskField::NextCheck => self.next_check_time.into(),
            TaskField::SnapshotVersion => self.snapshot_version.into(),
            TaskField::SnapshotId => self.snapshot_id.as_str().into(),
            TaskField::SnapshotHash => self.snapshot_hash.as_str().into(),
            TaskField::SnapshotSimHash => self.snapshot_sim_hash.as_str().into(),
        }
    }
}

/// 任务的持久化字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Id,
    Host,
    Url,
    ReferenceUrl,
    Depth,
    Breadth,
    Schema,
    OriginalUrl,
    Phrase,
    Status,
    Message,
    Created,
    Updated,
    LastFetch,
    LastCheck,
    NextCheck,
    SnapshotVersion,
    SnapshotId,
    SnapshotHash,
    SnapshotSimHash,
}

impl TaskField {
    pub const ALL: [TaskField; 20] = [
        TaskField::Id,
        TaskField::Host,
        TaskField::Url,
        TaskField::ReferenceUrl,
        TaskField::Depth,
        TaskField::Breadth,
        TaskField::Schema,
        TaskField::OriginalUrl,
        TaskField::Phrase,
        TaskField::Status,
        TaskField::Message,
        TaskField::Created,
        TaskField::Updated,
        TaskField::LastFetch,
        TaskField::LastCheck,
        TaskField::NextCheck,
        TaskField::SnapshotVersion,
        TaskField::SnapshotId,
        TaskField::SnapshotHash,
        TaskField::SnapshotSimHash,
    ];

    /// 持久化字段名
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskField::Id => "id",
            TaskField::Host => "host",
            TaskField::Url => "url",
            TaskField::ReferenceUrl => "reference_url",
            TaskField::Depth => "depth",
            TaskField::Breadth => "breadth",
            TaskField::Schema => "schema",
            TaskField::OriginalUrl => "original_url",
            TaskField::Phrase => "phrase",
            TaskField::Status => "status",
            TaskField::Message => "message",
            TaskField::Created => "created",
            TaskField::Updated => "updated",
            TaskField::LastFetch => "last_fetch",
            TaskField::LastCheck => "last_check",
            TaskField::NextCheck => "next_check",
            TaskField::SnapshotVersion => "snapshot_version",
            TaskField::SnapshotId => "snapshot_id",
            TaskField::SnapshotHash => "snapshot_hash",
            TaskField::SnapshotSimHash => "snapshot_simhash",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的字段名
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown task field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for TaskField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// 字段值，用于按字段查询和过滤
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue {
    Null,
    Int(i64),
    Text(String),
    Time(DateTime<FixedOffset>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<Phrase> for FieldValue {
    fn from(value: Phrase) -> Self {
        FieldValue::Int(value.0.into())
    }
}

impl From<TaskStatus> for FieldValue {
    fn from(value: TaskStatus) -> Self {
        FieldValue::Int(i32::from(value).into())
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        FieldValue::Time(value)
    }
}

impl From<Option<DateTime<FixedOffset>>> for FieldValue {
    fn from(value: Option<DateTime<FixedOffset>>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Time)
    }
}
