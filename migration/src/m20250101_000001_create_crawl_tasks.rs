use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create crawl_tasks table
        manager
            .create_table(
                Table::create()
                    .table(CrawlTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CrawlTasks::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CrawlTasks::Host).string().not_null().default(""))
                    .col(ColumnDef::new(CrawlTasks::Url).string().not_null())
                    .col(
                        ColumnDef::new(CrawlTasks::ReferenceUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(CrawlTasks::Depth).big_integer().not_null().default(0))
                    .col(ColumnDef::new(CrawlTasks::Breadth).big_integer().not_null().default(0))
                    .col(ColumnDef::new(CrawlTasks::Schema).string().not_null().default(""))
                    .col(
                        ColumnDef::new(CrawlTasks::OriginalUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(CrawlTasks::Phrase).integer().not_null().default(0))
                    .col(ColumnDef::new(CrawlTasks::Status).integer().not_null().default(0))
                    .col(ColumnDef::new(CrawlTasks::Message).text().not_null().default(""))
                    .col(ColumnDef::new(CrawlTasks::Created).timestamp_with_time_zone())
                    .col(ColumnDef::new(CrawlTasks::Updated).timestamp_with_time_zone())
                    .col(ColumnDef::new(CrawlTasks::LastFetch).timestamp_with_time_zone())
                    .col(ColumnDef::new(CrawlTasks::LastCheck).timestamp_with_time_zone())
                    .col(ColumnDef::new(CrawlTasks::NextCheck).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(CrawlTasks::SnapshotVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrawlTasks::SnapshotId)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CrawlTasks::SnapshotHash)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CrawlTasks::SnapshotSimhash)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexed fields
        let indexes = [
            ("idx_crawl_tasks_host", CrawlTasks::Host),
            ("idx_crawl_tasks_url", CrawlTasks::Url),
            ("idx_crawl_tasks_depth", CrawlTasks::Depth),
            ("idx_crawl_tasks_breadth", CrawlTasks::Breadth),
            ("idx_crawl_tasks_phrase", CrawlTasks::Phrase),
            ("idx_crawl_tasks_status", CrawlTasks::Status),
            ("idx_crawl_tasks_created", CrawlTasks::Created),
            ("idx_crawl_tasks_updated", CrawlTasks::Updated),
            ("idx_crawl_tasks_last_fetch", CrawlTasks::LastFetch),
            ("idx_crawl_tasks_last_check", CrawlTasks::LastCheck),
            ("idx_crawl_tasks_next_check", CrawlTasks::NextCheck),
        ];

        for (name, column) in indexes {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(CrawlTasks::Table)
                        .col(column)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CrawlTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CrawlTasks {
    Table,
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
    SnapshotSimhash,
}
