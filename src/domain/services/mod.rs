// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - ID生成器（id_generator）：可注入的任务ID生成策略
/// - 任务服务（task_service）：任务的创建、更新、删除和查询
pub mod id_generator;
pub mod task_service;
