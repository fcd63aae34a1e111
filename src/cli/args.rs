//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use crate::project::ScaffoldOptions;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// py-scaffold - Python项目脚手架工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "py-scaffold",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 项目名称（同时作为目录名）
    #[arg(value_name = "PROJECT_NAME", help = "项目名称（同时作为目录名）")]
    pub project_name: String,

    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "PY_SCAFFOLD_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "warn",
        help = "日志级别",
        env = "PY_SCAFFOLD_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// 是否启用详细输出
    #[arg(short, long, help = "启用详细输出（等同于 --log-level debug）")]
    pub verbose: bool,

    /// 以JSON格式输出日志
    #[arg(long, help = "以JSON格式输出日志")]
    pub json_logs: bool,

    /// 项目根目录的父目录
    #[arg(
        long,
        value_name = "DIR",
        help = "在指定目录下创建项目（默认当前目录）"
    )]
    pub dir: Option<PathBuf>,

    /// 跳过版本控制初始化
    #[arg(long, help = "不初始化git仓库")]
    pub no_git: bool,

    /// 目录已存在时拒绝执行
    #[arg(long, help = "项目目录已存在时报错而不是覆盖")]
    pub no_overwrite: bool,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl Args {
    /// 解析命令行参数
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// 实际生效的日志级别
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.log_level.clone()
        }
    }

    /// 由命令行参数构造流水线选项
    pub fn scaffold_options(&self) -> ScaffoldOptions {
        ScaffoldOptions {
            parent_dir: self.dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            overwrite: !self.no_overwrite,
            init_vcs: !self.no_git,
            progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["py-scaffold", "my-project"]).unwrap();
        assert_eq!(args.project_name, "my-project");
        assert!(!args.no_git);
        assert!(!args.no_overwrite);

        let options = args.scaffold_options();
        assert_eq!(options.parent_dir, PathBuf::from("."));
        assert!(options.overwrite);
        assert!(options.init_vcs);
    }

    #[test]
    fn test_missing_project_name_is_rejected() {
        let err = Args::try_parse_from(["py-scaffold"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "py-scaffold",
            "--no-git",
            "--no-overwrite",
            "--dir",
            "/tmp/work",
            "-v",
            "demo",
        ])
        .unwrap();

        let options = args.scaffold_options();
        assert_eq!(options.parent_dir, PathBuf::from("/tmp/work"));
        assert!(!options.overwrite);
        assert!(!options.init_vcs);
        assert_eq!(args.effective_log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_log_level_conversion() {
        let level: log::LevelFilter = LogLevel::Warn.into();
        assert_eq!(level, log::LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_string(), "info");
    }
}
