// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{
    create_test_db, create_tasks, database_store, new_task, task_service,
};
use crawltask::application::context::AppContext;
use crawltask::application::usecases::ingest_seeds::IngestSeedsUseCase;
use crawltask::config::settings::{
    DatabaseSettings, IdSettings, IdStrategy, LogFormat, LogSettings, Settings, StoreBackend,
    StoreSettings,
};
use crawltask::domain::models::seed::Seed;
use crawltask::domain::models::task::{Snapshot, TaskField, TaskStatus};
use crawltask::domain::repositories::record_store::{RecordStore, StoreError};
use crawltask::domain::services::task_service::TaskError;
use crawltask::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use sea_orm::ConnectionTrait;
use std::sync::Arc;

fn memory_settings() -> Settings {
    Settings {
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
        },
        store: StoreSettings {
            backend: StoreBackend::Memory,
            run_migrations: false,
        },
        id: IdSettings {
            strategy: IdStrategy::Increment,
            prefix: "t".to_string(),
        },
        log: LogSettings {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        },
    }
}

#[tokio::test]
async fn test_seed_bytes_to_fetch_success_lifecycle() {
    let service = task_service(database_store().await);
    let seed = Seed::new("/docs/intro", "https://example.com/docs/", 2, 7);

    let mut task = service.create_task_from_bytes(&seed.encode()).await.unwrap();
    assert_eq!(task.original_url, "https://example.com/docs/intro");
    assert_eq!(task.host, "example.com");
    assert_eq!(task.schema, "https");

    let snapshot = Snapshot {
        version: 1,
        id: "snap-1".to_string(),
        hash: "d41d8cd98f00b204".to_string(),
        sim_hash: "0f0f0f0f".to_string(),
    };
    service.mark_fetch_success(&mut task, snapshot).await.unwrap();

    let stored = service.get_task(&task.id).await.unwrap();
    assert_eq!(stored.status, TaskStatus::FetchSuccess);
    assert_eq!(stored.seed, seed);
    assert_eq!(stored.snapshot_version, 1);
    assert_eq!(stored.snapshot_id, "snap-1");
    assert_eq!(stored.snapshot_sim_hash, "0f0f0f0f");

    let by_snapshot = service
        .get_task_by_field(TaskField::SnapshotId, "snap-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_snapshot.id, task.id);
}

#[tokio::test]
async fn test_malformed_bytes_do_not_reach_store() {
    let service = task_service(database_store().await);

    let err = service
        .create_task_from_bytes(b"1|#|2|#|http://a.com/")
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::Decode(_)));

    let (total, _) = service.list_tasks(0, 10, "").await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_ingest_into_database_store() {
    let service = task_service(database_store().await);
    let input = "0|#|0|#||#|http://a.com/\nnot a seed\n1|#|3|#|http://a.com/|#|http://b.com/page\n";

    let report = IngestSeedsUseCase::new(service.clone())
        .execute(input.as_bytes())
        .await
        .unwrap();
    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 1);

    let (pending, tasks) = service.list_pending_fetch_tasks().await.unwrap();
    assert_eq!(pending, 2);
    let linked = tasks.iter().find(|t| t.host == "b.com").unwrap();
    assert_eq!(linked.seed.depth, 3);
    assert_eq!(linked.seed.breadth, 1);
    assert_eq!(linked.seed.reference, "http://a.com/");
    assert!(tasks.iter().any(|t| t.host == "a.com"));
}

#[tokio::test]
async fn test_app_context_with_memory_backend() {
    let context = AppContext::build(&memory_settings()).await.unwrap();
    let service = context.task_service;

    let task = service
        .create_task_from_seed(Seed::root("http://example.com/"))
        .await
        .unwrap();
    assert_eq!(task.id, "t1");

    let found = service.get_task("t1").await.unwrap();
    assert_eq!(found.url(), "http://example.com/");
}

#[tokio::test]
async fn test_app_context_with_database_backend_runs_migrations() {
    let mut settings = memory_settings();
    settings.store = StoreSettings {
        backend: StoreBackend::Database,
        run_migrations: true,
    };

    let context = AppContext::build(&settings).await.unwrap();
    let (total, tasks) = context.task_service.list_tasks(0, 10, "").await.unwrap();
    assert_eq!(total, 0);
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_fetching_status_written_externally_is_readable() {
    let db = create_test_db().await;
    let service = task_service(Arc::new(TaskRepositoryImpl::new(db.clone())));
    let created = create_tasks(&service, &["http://a.com/1", "http://a.com/2"]).await;

    db.execute_unprepared(&format!(
        "UPDATE crawl_tasks SET status = 1 WHERE id = '{}'",
        created[0].id
    ))
    .await
    .unwrap();

    let (pending, _) = service.list_pending_fetch_tasks().await.unwrap();
    assert_eq!(pending, 2);

    let (total, tasks) = service.list_tasks(0, 10, "").await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(tasks[1].status, TaskStatus::Fetching);

    let fetching = service.get_task(&created[0].id).await.unwrap();
    assert_eq!(fetching.status, TaskStatus::Fetching);
}

#[tokio::test]
async fn test_unknown_status_is_reported_as_corrupt() {
    let db = create_test_db().await;
    let service = task_service(Arc::new(TaskRepositoryImpl::new(db.clone())));
    let created = create_tasks(&service, &["http://a.com/1"]).await;

    db.execute_unprepared("UPDATE crawl_tasks SET status = 7")
        .await
        .unwrap();

    let err = service.get_task(&created[0].id).await.unwrap_err();
    assert!(matches!(err, TaskError::Store(StoreError::Corrupt(_))));
}

fn increment_settings(url: String) -> Settings {
    let mut settings = memory_settings();
    settings.database.url = url;
    settings.store = StoreSettings {
        backend: StoreBackend::Database,
        run_migrations: true,
    };
    settings.id = IdSettings {
        strategy: IdStrategy::Increment,
        prefix: "task-".to_string(),
    };
    settings
}

#[tokio::test]
async fn test_increment_ids_resume_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("tasks.db").display());

    let first = AppContext::build(&increment_settings(url.clone()))
        .await
        .unwrap();
    for page in ["http://a.com/1", "http://a.com/2"] {
        first
            .task_service
            .create_task_from_seed(Seed::root(page))
            .await
            .unwrap();
    }
    drop(first);

    let second = AppContext::build(&increment_settings(url)).await.unwrap();
    let task = second
        .task_service
        .create_task_from_seed(Seed::root("http://a.com/3"))
        .await
        .unwrap();
    assert_eq!(task.id, "task-3");

    let (total, _) = second.task_service.list_tasks(0, 10, "").await.unwrap();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_max_id_suffix_ignores_other_ids() {
    let repo = TaskRepositoryImpl::new(create_test_db().await);
    assert_eq!(repo.max_id_suffix("task-").await.unwrap(), 0);

    for id in ["task-9", "task-10", "task-abc", "other-99", "task-2"] {
        let mut task = new_task("http://a.com/");
        task.id = id.to_string();
        repo.save(&task).await.unwrap();
    }

    assert_eq!(repo.max_id_suffix("task-").await.unwrap(), 10);
    assert_eq!(repo.max_id_suffix("other-").await.unwrap(), 99);
    assert_eq!(repo.max_id_suffix("none-").await.unwrap(), 0);
}
