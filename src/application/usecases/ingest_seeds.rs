// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::record_store::RecordStore;
use crate::domain::services::task_service::{TaskError, TaskService};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

/// 导入错误类型
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Task(TaskError),
}

/// 导入结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// 成功创建的任务数
    pub created: usize,
    /// 因格式错误跳过的行数
    pub skipped: usize,
}

/// 种子导入用例
///
/// 从前沿队列的输出中逐行读取编码后的种子并创建任务。
/// 格式错误的行记录警告后跳过，存储错误则中止导入。
pub struct IngestSeedsUseCase<S: RecordStore + ?Sized> {
    task_service: TaskService<S>,
}

impl<S: RecordStore + ?Sized> IngestSeedsUseCase<S> {
    pub fn new(task_service: TaskService<S>) -> Self {
        Self { task_service }
    }

    pub async fn execute<R>(&self, reader: R) -> Result<IngestReport, IngestError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut report = IngestReport::default();
        let mut lines = reader.lines();
        let mut line_no = 0usize;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            match self.task_service.create_task_from_bytes(line.as_bytes()).await {
                Ok(task) => {
                    debug!(task_id = %task.id, url = %task.url(), "task created");
                    report.created += 1;
                }
                Err(TaskError::Decode(e)) => {
                    warn!(line = line_no, error = %e, "skipping malformed seed");
                    report.skipped += 1;
                }
                Err(e) => return Err(IngestError::Task(e)),
            }
        }

        info!(created = report.created, skipped = report.skipped, "seed ingest finished");
        Ok(report)
    }
}
