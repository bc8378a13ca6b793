// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{FieldValue, Task, TaskField};
use crate::domain::repositories::record_store::{
    Query, RecordStore, SearchResult, SortOrder, StoreError,
};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// 内存记录存储
///
/// 用于测试和单机运行，进程退出后数据丢失。
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: DashMap<String, Task>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, task: &Task) -> Result<(), StoreError> {
        match self.records.entry(task.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(task.id.clone())),
            Entry::Vacant(entry) => {
                entry.insert(task.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, task: &Task) -> Result<(), StoreError> {
        match self.records.get_mut(&task.id) {
            Some(mut record) => {
                *record = task.clone();
                Ok(())
            }
            None => Err(StoreError::Missing(task.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records.remove(id);
        Ok(())
    }

    async fn get_by(
        &self,
        field: TaskField,
        value: &FieldValue,
    ) -> Result<Option<Task>, StoreError> {
        if field == TaskField::Id {
            if let FieldValue::Text(id) = value {
                return Ok(self.records.get(id).map(|r| r.value().clone()));
            }
        }

        Ok(self
            .records
            .iter()
            .find(|r| &r.value().field_value(field) == value)
            .map(|r| r.value().clone()))
    }

    async fn search(&self, query: &Query) -> Result<SearchResult, StoreError> {
        let mut matched: Vec<Task> = self
            .records
            .iter()
            .filter(|r| match &query.filter {
                Some(cond) => r.value().field_value(cond.field) == cond.value,
                None => true,
            })
            .map(|r| r.value().clone())
            .collect();

        let total = matched.len() as u64;

        // FieldValue::Null 排在最前，降序时排在最后
        if let Some(sort) = query.sort {
            matched.sort_by(|a, b| {
                let ord = a.field_value(sort.field).cmp(&b.field_value(sort.field));
                match sort.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }

        let from = usize::try_from(query.from).unwrap_or(usize::MAX);
        let size = query
            .size
            .map_or(usize::MAX, |s| usize::try_from(s).unwrap_or(usize::MAX));
        let items = matched.into_iter().skip(from).take(size).collect();

        Ok(SearchResult { total, items })
    }
}
