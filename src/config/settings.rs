// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 应用程序配置设置
///
/// 包含数据库、存储后端、ID生成策略和日志配置
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 存储配置
    pub store: StoreSettings,
    /// ID生成配置
    pub id: IdSettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// SeaORM 数据库
    Database,
    /// 进程内存
    Memory,
}

/// 存储配置设置
#[derive(Debug, Deserialize)]
pub struct StoreSettings {
    /// 存储后端
    pub backend: StoreBackend,
    /// 启动时是否执行数据库迁移
    pub run_migrations: bool,
}

/// ID生成策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    Uuid,
    Increment,
}

/// ID生成配置设置
#[derive(Debug, Deserialize)]
pub struct IdSettings {
    /// 生成策略
    pub strategy: IdStrategy,
    /// 自增ID的前缀
    pub prefix: String,
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// 日志配置设置
#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// 默认过滤规则（`RUST_LOG` 未设置时使用）
    pub filter: String,
    /// 输出格式
    pub format: LogFormat,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次读取默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CRAWLTASK").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 从指定的配置文件加载（不读取环境变量）
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database.url", "sqlite://crawltask.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("store.backend", "database")?
            .set_default("store.run_migrations", true)?
            .set_default("id.strategy", "uuid")?
            .set_default("id.prefix", "")?
            .set_default("log.filter", "info,crawltask=debug")?
            .set_default("log.format", "pretty")
    }
}
