// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含的子模块：
/// - 数据库（database）：连接池、迁移和实体映射
/// - 仓库实现（repositories）：记录存储的 SeaORM 实现和内存实现
pub mod database;
pub mod repositories;
