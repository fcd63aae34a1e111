//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use std::path::PathBuf;
use thiserror::Error;

/// py-scaffold 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// 参数错误（缺少或非法的项目名称）
    #[error("参数错误: {0}")]
    Usage(String),

    /// 文件系统错误
    #[error("文件系统错误: {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 版本控制相关错误
    #[error("版本控制错误: {0}")]
    Vcs(#[from] VcsError),

    /// 模板相关错误
    #[error("模板错误: {0}")]
    Template(#[from] TemplateError),

    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl ScaffoldError {
    /// 构造文件系统错误
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// 进程退出码：参数错误为2，其余失败为1
    pub fn exit_code(&self) -> i32 {
        match self {
            ScaffoldError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// 版本控制错误类型
#[derive(Error, Debug)]
pub enum VcsError {
    /// 版本控制程序不可用
    #[error("找不到版本控制程序: {program}")]
    Unavailable { program: String },

    /// 命令执行失败
    #[error("命令 `{command}` 执行失败 ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// 启动进程时的IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 模板错误类型
#[derive(Error, Debug)]
pub enum TemplateError {
    /// 模板渲染失败
    #[error("模板渲染失败: {name}: {message}")]
    Render { name: String, message: String },
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ScaffoldError>;
