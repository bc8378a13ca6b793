// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 记录存储行为测试
//!
//! 同一组用例分别在 SeaORM（SQLite 内存库）和内存存储上运行，
//! 保证两种后端对任务服务表现一致。

use crate::integration::helpers::{create_tasks, new_task, task_service};
use crawltask::domain::models::task::{Phrase, TaskField, TaskStatus};
use crawltask::domain::repositories::record_store::RecordStore;
use crawltask::domain::services::task_service::TaskError;
use std::sync::Arc;

async fn pagination_is_sorted_by_create_time_desc<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let created = create_tasks(
        &service,
        &[
            "http://a.com/1",
            "http://a.com/2",
            "http://a.com/3",
            "http://a.com/4",
            "http://a.com/5",
        ],
    )
    .await;

    let (total, page) = service.list_tasks(0, 2, "").await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, created[4].id);
    assert_eq!(page[1].id, created[3].id);

    let (total, page) = service.list_tasks(4, 2, "").await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, created[0].id);

    let (total, page) = service.list_tasks(10, 2, "").await.unwrap();
    assert_eq!(total, 5);
    assert!(page.is_empty());
}

async fn domain_filter_matches_host<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    create_tasks(
        &service,
        &["http://a.com/x", "http://b.com/y", "http://a.com/z"],
    )
    .await;

    let (total, tasks) = service.list_tasks(0, 10, "a.com").await.unwrap();
    assert_eq!(total, 2);
    assert!(tasks.iter().all(|t| t.host == "a.com"));

    let (total, tasks) = service.list_tasks(0, 10, "c.com").await.unwrap();
    assert_eq!(total, 0);
    assert!(tasks.is_empty());
}

async fn pending_fetch_only_returns_phrase_one<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let mut created = create_tasks(
        &service,
        &["http://a.com/1", "http://a.com/2", "http://a.com/3"],
    )
    .await;

    created[1].phrase = Phrase(2);
    service.update_task(&mut created[1]).await.unwrap();

    let (total, tasks) = service.list_pending_fetch_tasks().await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.phrase.is_pending_fetch()));
    assert_eq!(tasks[0].id, created[2].id);
    assert_eq!(tasks[1].id, created[0].id);
}

async fn create_then_get_returns_record<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let mut task = new_task("http://example.com/index.html");
    service.create_task(&mut task).await.unwrap();

    let found = service.get_task(&task.id).await.unwrap();
    assert_eq!(found.id, task.id);
    assert_eq!(found.url(), "http://example.com/index.html");
    assert_eq!(found.host, "example.com");
    assert_eq!(found.schema, "http");
    assert_eq!(found.status, TaskStatus::Created);
    assert!(found.create_time.is_some());
    assert!(found.update_time.is_some());
}

async fn update_persists_changes<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let mut task = new_task("http://example.com/");
    service.create_task(&mut task).await.unwrap();

    service
        .mark_fetch_failed(&mut task, "connection refused")
        .await
        .unwrap();

    let found = service.get_task(&task.id).await.unwrap();
    assert_eq!(found.status, TaskStatus::FetchFailed);
    assert_eq!(found.message, "connection refused");
    assert!(found.last_fetch_time.is_some());
}

async fn update_of_unknown_task_fails<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let mut task = new_task("http://example.com/");
    task.id = "never-saved".to_string();

    let err = service.update_task(&mut task).await.unwrap_err();
    assert!(matches!(err, TaskError::Store(_)));
}

async fn duplicate_save_is_rejected<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let mut task = new_task("http://example.com/");
    service.create_task(&mut task).await.unwrap();

    assert!(store.save(&task).await.is_err());

    let (total, _) = service.list_tasks(0, 10, "").await.unwrap();
    assert_eq!(total, 1);
}

async fn delete_is_idempotent<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let mut task = new_task("http://example.com/");
    service.create_task(&mut task).await.unwrap();

    service.delete_task(&task.id).await.unwrap();
    service.delete_task(&task.id).await.unwrap();
    service.delete_task("unknown").await.unwrap();

    let err = service.get_task(&task.id).await.unwrap_err();
    assert!(matches!(err, TaskError::NotFound(id) if id == task.id));
}

async fn get_by_field_finds_first_match<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let created = create_tasks(&service, &["http://a.com/x", "http://b.com/y"]).await;

    let found = service
        .get_task_by_field(TaskField::Url, "http://b.com/y")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created[1].id);

    let missing = service
        .get_task_by_field(TaskField::Host, "c.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

async fn tasks_without_create_time_sort_last<S: RecordStore + 'static>(store: Arc<S>) {
    let service = task_service(store.clone());
    let mut untimed = new_task("http://a.com/untimed");
    untimed.id = "untimed".to_string();
    store.save(&untimed).await.unwrap();
    create_tasks(&service, &["http://a.com/1", "http://a.com/2"]).await;

    let (total, tasks) = service.list_tasks(0, 10, "").await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(tasks[2].id, "untimed");
}

macro_rules! store_tests {
    ($backend:ident, $store:expr) => {
        mod $backend {
            use super::*;
            #[allow(unused_imports)]
            use crate::integration::helpers::{database_store, memory_store};

            #[tokio::test]
            async fn test_pagination_is_sorted_by_create_time_desc() {
                pagination_is_sorted_by_create_time_desc($store).await;
            }

            #[tokio::test]
            async fn test_domain_filter_matches_host() {
                domain_filter_matches_host($store).await;
            }

            #[tokio::test]
            async fn test_pending_fetch_only_returns_phrase_one() {
                pending_fetch_only_returns_phrase_one($store).await;
            }

            #[tokio::test]
            async fn test_create_then_get_returns_record() {
                create_then_get_returns_record($store).await;
            }

            #[tokio::test]
            async fn test_update_persists_changes() {
                update_persists_changes($store).await;
            }

            #[tokio::test]
            async fn test_update_of_unknown_task_fails() {
                update_of_unknown_task_fails($store).await;
            }

            #[tokio::test]
            async fn test_duplicate_save_is_rejected() {
                duplicate_save_is_rejected($store).await;
            }

            #[tokio::test]
            async fn test_delete_is_idempotent() {
                delete_is_idempotent($store).await;
            }

            #[tokio::test]
            async fn test_tasks_without_create_time_sort_last() {
                tasks_without_create_time_sort_last($store).await;
            }

            #[tokio::test]
            async fn test_get_by_field_finds_first_match() {
                get_by_field_finds_first_match($store).await;
            }
        }
    };
}

store_tests!(database, database_store().await);
store_tests!(memory, memory_store());
