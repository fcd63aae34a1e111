//! 文件写入
//!
//! 按目录顺序渲染并写入模板文件。每个文件独立写入，
//! 失败时已写入的文件保留在磁盘上。

use crate::error::{Result, ScaffoldError};
use crate::project::templates::{FileTemplate, TemplateContext, TemplateRenderer, CATALOG};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 文件写入器
pub struct FileEmitter<'a> {
    renderer: &'a TemplateRenderer,
    root: &'a Path,
}

impl<'a> FileEmitter<'a> {
    pub fn new(renderer: &'a TemplateRenderer, root: &'a Path) -> Self {
        Self { renderer, root }
    }

    /// 渲染并写入 `CATALOG` 中的全部文件
    pub fn emit_all(&self, context: &TemplateContext) -> Result<Vec<PathBuf>> {
        self.emit(CATALOG, context)
    }

    /// 按顺序渲染并写入给定模板
    ///
    /// 某个模板渲染失败时，该文件不会被写入，后续文件也不再处理
    ///
    /// # 返回
    /// * `Result<Vec<PathBuf>>` - 已写入文件的绝对路径
    pub fn emit(
        &self,
        templates: &[FileTemplate],
        context: &TemplateContext,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(templates.len());

        for template in templates {
            let file = self.renderer.render(template, context)?;
            let target = self.root.join(&file.relative_path);

            if target.exists() {
                warn!("覆盖已存在的文件: {}", target.display());
            }

            std::fs::write(&target, file.contents.as_bytes())
                .map_err(|e| ScaffoldError::filesystem(&target, e))?;
            debug!("已写入 {} ({} 字节)", target.display(), file.contents.len());

            written.push(target);
        }

        Ok(written)
    }
}
