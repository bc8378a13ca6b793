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

use crate::domain::models::seed::Seed;
use crate::domain::models::task::{FieldValue, Phrase, Task, TaskField, TaskStatus};
use crate::domain::repositories::record_store::{
    Query, RecordStore, SearchResult, SortOrder, StoreError,
};
use crate::infrastructure::database::entities::task as task_entity;
use async_trait::async_trait;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, Value,
};
use std::sync::Arc;
use tracing::trace;

/// 任务仓库实现
///
/// 基于SeaORM实现的任务记录存储
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的任务仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 查询指定前缀下已持久化的最大数字ID后缀
    ///
    /// 用于进程重启后接续自增ID。后缀不是纯数字的ID会被忽略。
    ///
    /// # 参数
    ///
    /// * `prefix` - ID前缀
    ///
    /// # 返回值
    ///
    /// * `Ok(u64)` - 最大后缀，没有匹配的ID时为 0
    /// * `Err(DbErr)` - 查询失败
    pub async fn max_id_suffix(&self, prefix: &str) -> Result<u64, DbErr> {
        let ids: Vec<String> = task_entity::Entity::find()
            .select_only()
            .column(task_entity::Column::Id)
            .filter(task_entity::Column::Id.starts_with(prefix))
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        Ok(ids
            .iter()
            .filter_map(|id| id.strip_prefix(prefix)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0))
    }
}

impl TryFrom<task_entity::Model> for Task {
    type Error = StoreError;

    fn try_from(model: task_entity::Model) -> Result<Self, Self::Error> {
        let status = TaskStatus::try_from(model.status)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", model.id, e)))?;
        let depth = u32::try_from(model.depth)
            .map_err(|_| StoreError::Corrupt(format!("{}: depth {}", model.id, model.depth)))?;
        let breadth = u32::try_from(model.breadth).map_err(|_| {
            StoreError::Corrupt(format!("{}: breadth {}", model.id, model.breadth))
        })?;

        Ok(Self {
            seed: Seed {
                url: model.url,
                reference: model.reference_url,
                depth,
                breadth,
            },
            id: model.id,
            host: model.host,
            schema: model.schema,
            original_url: model.original_url,
            phrase: Phrase(model.phrase),
            status,
            message: model.message,
            create_time: model.created,
            update_time: model.updated,
            last_fetch_time: model.last_fetch,
            last_check_time: model.last_check,
            next_check_time: model.next_check,
            snapshot_version: model.snapshot_version,
            snapshot_id: model.snapshot_id,
            snapshot_hash: model.snapshot_hash,
            snapshot_sim_hash: model.snapshot_sim_hash,
        })
    }
}

impl From<&Task> for task_entity::ActiveModel {
    fn from(task: &Task) -> Self {
        Self {
            id: Set(task.id.clone()),
            host: Set(task.host.clone()),
            url: Set(task.seed.url.clone()),
            reference_url: Set(task.seed.reference.clone()),
            depth: Set(task.seed.depth.into()),
            breadth: Set(task.seed.breadth.into()),
            schema: Set(task.schema.clone()),
            original_url: Set(task.original_url.clone()),
            phrase: Set(task.phrase.into()),
            status: Set(task.status.into()),
            message: Set(task.message.clone()),
            created: Set(task.create_time),
            updated: Set(task.update_time),
            last_fetch: Set(task.last_fetch_time),
            last_check: Set(task.last_check_time),
            next_check: Set(task.next_check_time),
            snapshot_version: Set(task.snapshot_version),
            snapshot_id: Set(task.snapshot_id.clone()),
            snapshot_hash: Set(task.snapshot_hash.clone()),
            snapshot_sim_hash: Set(task.snapshot_sim_hash.clone()),
        }
    }
}

fn column(field: TaskField) -> task_entity::Column {
    match field {
        TaskField::Id => task_entity::Column::Id,
        TaskField::Host => task_entity::Column::Host,
        TaskField::Url => task_entity::Column::Url,
        TaskField::ReferenceUrl => task_entity::Column::ReferenceUrl,
        TaskField::Depth => task_entity::Column::Depth,
        TaskField::Breadth => task_entity::Column::Breadth,
        TaskField::Schema => task_entity::Column::Schema,
        TaskField::OriginalUrl => task_entity::Column::OriginalUrl,
        TaskField::Phrase => task_entity::Column::Phrase,
        TaskField::Status => task_entity::Column::Status,
        TaskField::Message => task_entity::Column::Message,
        TaskField::Created => task_entity::Column::Created,
        TaskField::Updated => task_entity::Column::Updated,
        TaskField::LastFetch => task_entity::Column::LastFetch,
        TaskField::LastCheck => task_entity::Column::LastCheck,
        TaskField::NextCheck => task_entity::Column::NextCheck,
        TaskField::SnapshotVersion => task_entity::Column::SnapshotVersion,
        TaskField::SnapshotId => task_entity::Column::SnapshotId,
        TaskField::SnapshotHash => task_entity::Column::SnapshotHash,
        TaskField::SnapshotSimHash => task_entity::Column::SnapshotSimHash,
    }
}

/// 构造等值条件，NULL 值使用 IS NULL
fn condition(field: TaskField, value: &FieldValue) -> sea_orm::sea_query::SimpleExpr {
    let col = column(field);
    match value {
        FieldValue::Null => col.is_null(),
        FieldValue::Int(v) => col.eq(Value::from(*v)),
        FieldValue::Text(v) => col.eq(Value::from(v.clone())),
        FieldValue::Time(v) => col.eq(Value::from(*v)),
    }
}

#[async_trait]
impl RecordStore for TaskRepositoryImpl {
    async fn save(&self, task: &Task) -> Result<(), StoreError> {
        let model: task_entity::ActiveModel = task.into();

        task_entity::Entity::insert(model)
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), StoreError> {
        let model: task_entity::ActiveModel = task.into();

        let result = task_entity::Entity::update_many()
            .set(model)
            .filter(task_entity::Column::Id.eq(task.id.as_str()))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::Missing(task.id.clone()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = task_entity::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        trace!(id, rows = result.rows_affected, "task deleted");
        Ok(())
    }

    async fn get_by(
        &self,
        field: TaskField,
        value: &FieldValue,
    ) -> Result<Option<Task>, StoreError> {
        let model = task_entity::Entity::find()
            .filter(condition(field, value))
            .one(self.db.as_ref())
            .await?;

        model.map(Task::try_from).transpose()
    }

    async fn search(&self, query: &Query) -> Result<SearchResult, StoreError> {
        let mut select = task_entity::Entity::find();

        if let Some(filter) = &query.filter {
            select = select.filter(condition(filter.field, &filter.value));
        }

        let total = select.clone().count(self.db.as_ref()).await?;

        if let Some(sort) = &query.sort {
            // NULL 视为最小值，与内存存储的排序一致
            let (order, nulls) = match sort.order {
                SortOrder::Asc => (Order::Asc, NullOrdering::First),
                SortOrder::Desc => (Order::Desc, NullOrdering::Last),
            };
            select = select.order_by_with_nulls(column(sort.field), order, nulls);
        }

        if query.from > 0 {
            select = select.offset(query.from);
        }
        if let Some(size) = query.size {
            select = select.limit(size);
        }

        let items = select
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResult { total, items })
    }
}
