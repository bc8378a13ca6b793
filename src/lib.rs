// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 组装服务并实现面向调用方的用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含种子和任务模型、记录存储接口以及任务服务
pub mod domain;

/// 基础设施模块
///
/// 提供记录存储的数据库实现和内存实现
pub mod infrastructure;

/// 工具模块
///
/// 提供日志初始化和URL处理等辅助功能
pub mod utils;
