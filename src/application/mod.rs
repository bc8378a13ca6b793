// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 根据配置组装任务服务（context），并提供种子导入等用例（usecases）
pub mod context;
pub mod usecases;
