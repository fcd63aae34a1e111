//! 配置数据结构定义
//!
//! 定义项目元数据默认值和版本控制设置，以及验证逻辑

use serde::{Deserialize, Serialize};

/// 主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// 生成项目使用的元数据
    #[serde(default)]
    pub project: ProjectConfig,
    /// 版本控制配置
    #[serde(default)]
    pub vcs: VcsConfig,
}

/// 项目元数据配置，渲染到 pyproject.toml 和 README.md
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// 初始版本号
    #[serde(default = "default_version")]
    pub version: String,
    /// 项目描述
    #[serde(default = "default_description")]
    pub description: String,
    /// Python版本要求
    #[serde(default = "default_requires_python")]
    pub requires_python: String,
    /// 许可证
    #[serde(default = "default_license")]
    pub license: String,
    /// 作者列表
    #[serde(default)]
    pub authors: Vec<Author>,
}

/// 作者信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
}

/// 版本控制配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VcsConfig {
    /// 是否初始化仓库
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// 版本控制程序
    #[serde(default = "default_program")]
    pub program: String,
    /// 初始提交信息
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    /// 提交者名称（与 author_email 一起设置）
    pub author_name: Option<String>,
    /// 提交者邮箱
    pub author_email: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            description: default_description(),
            requires_python: default_requires_python(),
            license: default_license(),
            authors: Vec::new(),
        }
    }
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            program: default_program(),
            commit_message: default_commit_message(),
            author_name: None,
            author_email: None,
        }
    }
}

impl VcsConfig {
    /// 获取提交身份（名称和邮箱均已设置时）
    pub fn identity(&self) -> Option<(String, String)> {
        match (&self.author_name, &self.author_email) {
            (Some(name), Some(email)) => Some((name.clone(), email.clone())),
            _ => None,
        }
    }
}

// 默认值函数
fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_description() -> String {
    "A short description of the project".to_string()
}
fn default_requires_python() -> String {
    ">=3.8".to_string()
}
fn default_license() -> String {
    "MIT".to_string()
}
fn default_enabled() -> bool {
    true
}
fn default_program() -> String {
    "git".to_string()
}
fn default_commit_message() -> String {
    "Initial commit".to_string()
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，失败时返回错误描述
pub fn validate_config(config: &Config) -> Result<(), String> {
    if config.project.version.trim().is_empty() {
        return Err("project.version 不能为空".to_string());
    }

    if config.project.requires_python.trim().is_empty() {
        return Err("project.requires_python 不能为空".to_string());
    }

    for (index, author) in config.project.authors.iter().enumerate() {
        if author.name.trim().is_empty() {
            return Err(format!("project.authors[{index}].name 不能为空"));
        }
    }

    if config.vcs.program.trim().is_empty() {
        return Err("vcs.program 不能为空".to_string());
    }

    if config.vcs.commit_message.trim().is_empty() {
        return Err("vcs.commit_message 不能为空".to_string());
    }

    if config.vcs.author_name.is_some() != config.vcs.author_email.is_some() {
        return Err("vcs.author_name 和 vcs.author_email 必须同时设置".to_string());
    }

    Ok(())
}
