//! 项目名称处理
//!
//! 校验用户输入的项目名称，并推导出可导入的包名

use crate::error::{Result, ScaffoldError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// 用户输入的项目名称，用作根目录名和显示名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

/// 由项目名称推导出的包名（连字符替换为下划线）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName(String);

impl ProjectName {
    /// 校验并创建项目名称
    ///
    /// # 参数
    /// * `raw` - 命令行输入的原始名称
    ///
    /// # 返回
    /// * `Result<Self>` - 名称为空、为 `.`/`..` 或包含路径分隔符时返回参数错误
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(ScaffoldError::Usage("项目名称不能为空".to_string()));
        }

        if raw == "." || raw == ".." {
            return Err(ScaffoldError::Usage(format!("非法的项目名称: {raw}")));
        }

        if raw.contains('/') || raw.contains('\\') {
            let message = format!("项目名称不能包含路径分隔符: {raw}");
            return Err(ScaffoldError::Usage(message));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 推导包名
    pub fn package_name(&self) -> PackageName {
        PackageName::derive(&self.0)
    }
}

impl PackageName {
    /// 将每个 `-` 替换为 `_`，其他字符保持不变
    pub fn derive(project_name: &str) -> Self {
        Self(project_name.replace('-', "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否为合法的Python标识符（仅ASCII规则）
    pub fn is_valid_identifier(&self) -> bool {
        static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
        let identifier = IDENTIFIER.get_or_init(|| {
            Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
                .expect("identifier regex is valid")
        });
        identifier.is_match(&self.0)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
