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

use crate::domain::models::seed::{Seed, SeedDecodeError};
use crate::domain::models::task::{FieldValue, Phrase, Snapshot, Task, TaskField, TaskStatus};
use crate::domain::repositories::record_store::{Cond, Query, RecordStore, Sort, StoreError};
use crate::domain::services::id_generator::IdGenerator;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// 任务服务错误类型
#[derive(Error, Debug)]
pub enum TaskError {
    /// 任务不存在，或存储返回了无效记录（ID为空或缺少创建时间）
    #[error("Task not found: {0}")]
    NotFound(String),

    /// 存储操作失败
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// 种子字节序列结构不合法
    #[error("Seed decode error: {0}")]
    Decode(#[from] SeedDecodeError),
}

/// 抓取任务服务
///
/// 在通用记录存储之上提供任务的创建、更新、删除和查询。
/// 每次调用都直接访问存储，不做缓存，也不在调用之间持有锁。
/// 更新采用后写覆盖，没有版本校验。超时由存储或调用方负责。
pub struct TaskService<S: RecordStore + ?Sized> {
    /// 记录存储
    store: Arc<S>,
    /// ID 生成器
    id_generator: Arc<dyn IdGenerator>,
}

impl<S: RecordStore + ?Sized> Clone for TaskService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            id_generator: self.id_generator.clone(),
        }
    }
}

impl<S: RecordStore + ?Sized> TaskService<S> {
    /// 创建新的任务服务实例
    ///
    /// # 参数
    ///
    /// * `store` - 记录存储
    /// * `id_generator` - 任务ID生成器
    ///
    /// # 返回值
    ///
    /// 返回新的任务服务实例
    pub fn new(store: Arc<S>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            id_generator,
        }
    }

    /// 创建任务
    ///
    /// 分配新ID，状态置为 Created，创建时间与更新时间置为当前时间后保存。
    /// 存储错误原样返回，不重试。
    #[instrument(skip(self, task), fields(url = %task.url()))]
    pub async fn create_task(&self, task: &mut Task) -> Result<(), TaskError> {
        trace!("start create crawler task");
        let now = Utc::now().into();
        task.id = self.id_generator.next_id();
        task.status = TaskStatus::Created;
        task.create_time = Some(now);
        task.update_time = Some(now);

        self.store.save(task).await.map_err(|e| {
            debug!(task_id = %task.id, error = %e, "failed to create task");
            e.into()
        })
    }

    /// 由种子创建任务
    pub async fn create_task_from_seed(&self, seed: Seed) -> Result<Task, TaskError> {
        let mut task = Task::from_seed(seed);
        self.create_task(&mut task).await?;
        Ok(task)
    }

    /// 由编码后的种子创建任务
    ///
    /// 结构不合法的字节序列返回 `TaskError::Decode`，不会写入存储。
    pub async fn create_task_from_bytes(&self, bytes: &[u8]) -> Result<Task, TaskError> {
        let seed = Seed::decode(bytes)?;
        self.create_task_from_seed(seed).await
    }

    /// 批量由种子创建任务
    ///
    /// 遇到第一个存储错误即停止并返回该错误，之前已创建的任务保留在存储中。
    pub async fn create_tasks_from_seeds(
        &self,
        seeds: impl IntoIterator<Item = Seed>,
    ) -> Result<Vec<Task>, TaskError> {
        let mut created = Vec::new();
        for seed in seeds {
            created.push(self.create_task_from_seed(seed).await?);
        }
        Ok(created)
    }

    /// 更新任务
    ///
    /// 更新时间置为当前时间后按ID写回存储，失败时返回错误。
    #[instrument(skip(self, task), fields(task_id = %task.id, url = %task.url()))]
    pub async fn update_task(&self, task: &mut Task) -> Result<(), TaskError> {
        trace!("start update crawler task");
        task.update_time = Some(Utc::now().into());

        self.store.update(task).await.map_err(|e| {
            debug!(error = %e, "failed to update task");
            e.into()
        })
    }

    /// 标记抓取成功并记录快照引用
    pub async fn mark_fetch_success(
        &self,
        task: &mut Task,
        snapshot: Snapshot,
    ) -> Result<(), TaskError> {
        task.status = TaskStatus::FetchSuccess;
        task.last_fetch_time = Some(Utc::now().into());
        task.message.clear();
        task.record_snapshot(snapshot);
        self.update_task(task).await
    }

    /// 标记抓取失败
    pub async fn mark_fetch_failed(
        &self,
        task: &mut Task,
        message: impl Into<String>,
    ) -> Result<(), TaskError> {
        task.status = TaskStatus::FetchFailed;
        task.last_fetch_time = Some(Utc::now().into());
        task.message = message.into();
        self.update_task(task).await
    }

    /// 删除任务
    ///
    /// 任务不存在时同样返回成功。
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: &str) -> Result<(), TaskError> {
        trace!("start delete crawler task");
        self.store.delete(id).await.map_err(|e| {
            debug!(error = %e, "failed to delete task");
            e.into()
        })
    }

    /// 按ID获取任务
    ///
    /// 存储未命中，或返回的记录ID为空、缺少创建时间，都视为不存在。
    #[instrument(skip(self))]
    pub async fn get_task(&self, id: &str) -> Result<Task, TaskError> {
        trace!("start get crawler task");
        let found = self
            .store
            .get_by(TaskField::Id, &FieldValue::from(id))
            .await
            .map_err(|e| {
                debug!(error = %e, "failed to get task");
                TaskError::from(e)
            })?;

        match found {
            Some(task) if task.exists() => Ok(task),
            _ => Err(TaskError::NotFound(id.to_string())),
        }
    }

    /// 按字段等值获取任务
    ///
    /// 直接返回存储的结果，不做存在性校验。
    #[instrument(skip(self, value))]
    pub async fn get_task_by_field(
        &self,
        field: TaskField,
        value: impl Into<FieldValue>,
    ) -> Result<Option<Task>, TaskError> {
        trace!("start get crawler task by field");
        let value = value.into();
        self.store.get_by(field, &value).await.map_err(|e| {
            debug!(error = %e, "failed to get task by field");
            e.into()
        })
    }

    /// 分页列出任务
    ///
    /// 按创建时间倒序；`domain` 非空时只返回该主机的任务。
    ///
    /// # 返回值
    ///
    /// * `Ok((u64, Vec<Task>))` - 匹配总数和当前页
    /// * `Err(TaskError)` - 查询失败
    #[instrument(skip(self))]
    pub async fn list_tasks(
        &self,
        from: u64,
        size: u64,
        domain: &str,
    ) -> Result<(u64, Vec<Task>), TaskError> {
        trace!("start get crawler tasks");
        let query = Query {
            filter: (!domain.is_empty()).then(|| Cond::new(TaskField::Host, domain)),
            sort: Some(Sort::desc(TaskField::Created)),
            from,
            size: Some(size),
        };
        self.search(&query).await
    }

    /// 列出全部待抓取任务（`phrase == 1`），按创建时间倒序
    ///
    /// 这是纯读取操作，不会认领任务。多个 worker 同时调用可能拿到同一个任务，
    /// 需要互斥时由存储或额外的认领步骤保证。
    #[instrument(skip(self))]
    pub async fn list_pending_fetch_tasks(&self) -> Result<(u64, Vec<Task>), TaskError> {
        trace!("start get pending fetch tasks");
        let query = Query {
            filter: Some(Cond::new(TaskField::Phrase, Phrase::PENDING_FETCH)),
            sort: Some(Sort::desc(TaskField::Created)),
            from: 0,
            size: None,
        };
        self.search(&query).await
    }

    async fn search(&self, query: &Query) -> Result<(u64, Vec<Task>), TaskError> {
        let result = self.store.search(query).await.map_err(|e| {
            trace!(error = %e, "task search failed");
            TaskError::from(e)
        })?;
        Ok((result.total, result.items))
    }
}
