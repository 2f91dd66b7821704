//! 配置管理
//!
//! 默认值内嵌于二进制（`config.default.toml`），可被配置文件与环境变量逐层覆盖。

mod r#impl;
mod structs;

pub use structs::*;
