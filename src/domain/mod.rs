// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含抓取任务的核心业务逻辑，包括：
/// - 领域模型（models）：种子和抓取任务
/// - 仓库接口（repositories）：通用记录存储抽象
/// - 服务（services）：任务生命周期服务和ID生成器
///
/// 领域层不依赖于任何具体存储实现。
pub mod models;
pub mod repositories;
pub mod services;
