//! py-scaffold - Python项目脚手架工具
//!
//! 根据项目名称生成 src 布局的Python项目：
//! - 目录结构和模板文件
//! - pyproject.toml / README.md / .gitignore
//! - git仓库初始化和初始提交
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod project;

// 重新导出主要类型
pub use config::Config;
pub use error::ScaffoldError;
pub use project::{PackageName, ProjectName, ScaffoldOptions, ScaffoldReport, Scaffolder};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
