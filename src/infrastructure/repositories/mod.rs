// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域记录存储接口的具体实现
pub mod memory_store;
pub mod task_repo_impl;
