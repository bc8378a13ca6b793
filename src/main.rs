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

use crawltask::application::context::AppContext;
use crawltask::application::usecases::ingest_seeds::IngestSeedsUseCase;
use crawltask::config::settings::Settings;
use crawltask::utils::telemetry;
use tokio::io::BufReader;
use tracing::info;

/// 主函数
///
/// 从标准输入逐行读取编码后的种子并创建抓取任务，
/// 最后输出待抓取任务数量
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.log);
    info!("Starting crawltask...");

    // 3. Open task store
    let context = AppContext::build(&settings).await?;
    info!(backend = ?settings.store.backend, "Task store ready");

    // 4. Ingest seeds from stdin
    let use_case = IngestSeedsUseCase::new(context.task_service.clone());
    let report = use_case
        .execute(BufReader::new(tokio::io::stdin()))
        .await?;

    // 5. Report pending fetch tasks
    let (pending, _) = context.task_service.list_pending_fetch_tasks().await?;
    info!(
        created = report.created,
        skipped = report.skipped,
        pending,
        "Seed ingest complete"
    );

    Ok(())
}
