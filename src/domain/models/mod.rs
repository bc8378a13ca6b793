// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 种子（seed）：前沿队列中待抓取的链接及其字节编码
/// - 任务（task）：由种子生成的抓取任务记录
pub mod seed;
pub mod task;
