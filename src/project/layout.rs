//! 目录结构创建

use crate::error::{Result, ScaffoldError};
use crate::project::naming::PackageName;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 项目目录布局
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    package: PackageName,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, package: PackageName) -> Self {
        Self {
            root: root.into(),
            package,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 需要创建的目录（相对路径），父目录在前
    pub fn relative_dirs(&self) -> Vec<PathBuf> {
        vec![
            PathBuf::from("src").join(self.package.as_str()),
            PathBuf::from("tests"),
            PathBuf::from("docs"),
        ]
    }

    /// 创建项目根目录及全部子目录
    ///
    /// 已存在的目录会被忽略；失败时立即返回，已创建的目录不会回滚
    ///
    /// # 返回
    /// * `Result<Vec<PathBuf>>` - 已确保存在的目录（绝对路径，含根目录）
    pub fn create(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::with_capacity(4);

        create_dir(&self.root)?;
        created.push(self.root.clone());

        for relative in self.relative_dirs() {
            let dir = self.root.join(relative);
            create_dir(&dir)?;
            created.push(dir);
        }

        Ok(created)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| ScaffoldError::filesystem(dir, e))?;
    debug!("目录已就绪: {}", dir.display());
    Ok(())
}
