//! Student Progress - 学生成绩跟踪服务
//!
//! 基于 Actix Web 构建：账号注册与验证码确认、学生档案管理、按考试与科目录入成绩单，
//! 以及列表筛选排名和仪表盘统计。
//!
//! # 架构
//! - `analytics`: 成绩统计与列表筛选（纯函数）
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: JWT 认证与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod analytics;
pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
