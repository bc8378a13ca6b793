// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{IdStrategy, Settings, StoreBackend};
use crate::domain::repositories::record_store::RecordStore;
use crate::domain::services::id_generator::{IdGenerator, IncrementIdGenerator, UuidIdGenerator};
use crate::domain::services::task_service::TaskService;
use crate::infrastructure::database::connection;
use crate::infrastructure::repositories::memory_store::InMemoryRecordStore;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use sea_orm::DbErr;
use std::sync::Arc;
use tracing::info;

/// 应用上下文
///
/// 根据配置组装存储后端和ID生成器
pub struct AppContext {
    pub task_service: TaskService<dyn RecordStore>,
}

impl AppContext {
    /// 根据配置创建应用上下文
    ///
    /// 数据库后端会建立连接池，并按配置执行迁移
    pub async fn build(settings: &Settings) -> Result<Self, DbErr> {
        // 自增ID从已持久化的最大值之后继续
        let (store, last_id) = match settings.store.backend {
            StoreBackend::Database => {
                let db = connection::create_pool(&settings.database).await?;
                info!("Database connection established");
                if settings.store.run_migrations {
                    connection::run_migrations(&db).await?;
                }
                let repo = TaskRepositoryImpl::new(Arc::new(db));
                let last_id = match settings.id.strategy {
                    IdStrategy::Increment => repo.max_id_suffix(&settings.id.prefix).await?,
                    IdStrategy::Uuid => 0,
                };
                (Arc::new(repo) as Arc<dyn RecordStore>, last_id)
            }
            StoreBackend::Memory => {
                info!("Using in-memory task store");
                (Arc::new(InMemoryRecordStore::new()) as Arc<dyn RecordStore>, 0)
            }
        };

        let id_generator: Arc<dyn IdGenerator> = match settings.id.strategy {
            IdStrategy::Uuid => Arc::new(UuidIdGenerator),
            IdStrategy::Increment => {
                info!(prefix = %settings.id.prefix, start = last_id + 1, "Using increment task ids");
                Arc::new(IncrementIdGenerator::starting_at(
                    settings.id.prefix.clone(),
                    last_id + 1,
                ))
            }
        };

        Ok(Self {
            task_service: TaskService::new(store, id_generator),
        })
    }
}
