// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crawl_tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub host: String,
    pub url: String,
    pub reference_url: String,
    pub depth: i64,
    pub breadth: i64,
    pub schema: String,
    pub original_url: String,
    pub phrase: i32,
    pub status: i32,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub created: Option<ChronoDateTimeWithTimeZone>,
    pub updated: Option<ChronoDateTimeWithTimeZone>,
    pub last_fetch: Option<ChronoDateTimeWithTimeZone>,
    pub last_check: Option<ChronoDateTimeWithTimeZone>,
    pub next_check: Option<ChronoDateTimeWithTimeZone>,
    pub snapshot_version: i32,
    pub snapshot_id: String,
    pub snapshot_hash: String,
    #[sea_orm(column_name = "snapshot_simhash")]
    pub snapshot_sim_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
