//! 脚手架流水线
//!
//! 线性执行：参数校验 → 创建目录 → 写入文件 → 初始化仓库。
//! 任一阶段失败即终止，已产生的文件不会回滚。

use crate::config::Config;
use crate::error::{Result, ScaffoldError};
use crate::project::emitter::FileEmitter;
use crate::project::layout::ProjectLayout;
use crate::project::naming::{PackageName, ProjectName};
use crate::project::templates::{TemplateContext, TemplateRenderer};
use crate::project::vcs::{initialize_repository, GitVcs, VersionControl};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    BuildDirectories,
    EmitFiles,
    InitVcs,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Validate => write!(f, "validate"),
            Stage::BuildDirectories => write!(f, "build-directories"),
            Stage::EmitFiles => write!(f, "emit-files"),
            Stage::InitVcs => write!(f, "init-vcs"),
        }
    }
}

/// 运行选项
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// 项目根目录的父目录
    pub parent_dir: PathBuf,
    /// 根目录已存在时是否继续（覆盖文件）
    pub overwrite: bool,
    /// 是否初始化版本控制仓库
    pub init_vcs: bool,
    /// 是否向标准输出打印进度
    pub progress: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            parent_dir: PathBuf::from("."),
            overwrite: true,
            init_vcs: true,
            progress: true,
        }
    }
}

/// 成功运行的结果
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub project: ProjectName,
    pub package: PackageName,
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub committed: bool,
}

/// 项目脚手架
pub struct Scaffolder {
    config: Config,
    options: ScaffoldOptions,
    vcs: Box<dyn VersionControl>,
}

impl Scaffolder {
    /// 使用配置中的版本控制程序创建脚手架
    pub fn new(config: Config, options: ScaffoldOptions) -> Self {
        let vcs = Box::new(GitVcs::from_config(&config.vcs));
        Self {
            config,
            options,
            vcs,
        }
    }

    /// 替换版本控制实现
    pub fn with_vcs(mut self, vcs: Box<dyn VersionControl>) -> Self {
        self.vcs = vcs;
        self
    }

    /// 执行完整流水线
    ///
    /// # 参数
    /// * `raw_name` - 命令行输入的项目名称
    ///
    /// # 返回
    /// * `Result<ScaffoldReport>` - 成功时返回生成结果，失败时返回首个失败阶段的错误
    pub fn run(&self, raw_name: &str) -> Result<ScaffoldReport> {
        let mut stage = Stage::Validate;
        let result = self.run_stages(raw_name, &mut stage);
        if result.is_err() {
            warn!("流水线在阶段 {} 终止", stage);
        }
        result
    }

    fn run_stages(&self, raw_name: &str, stage: &mut Stage) -> Result<ScaffoldReport> {
        let started = Instant::now();

        // 1. 参数校验（无副作用）
        *stage = Stage::Validate;
        let project = ProjectName::new(raw_name)?;
        let package = project.package_name();
        let root = self.options.parent_dir.join(project.as_str());

        if !package.is_valid_identifier() {
            warn!("包名 `{}` 不是合法的Python标识符，导入时可能失败", package);
        }

        if root.exists() {
            if !self.options.overwrite {
                let exists = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "目录已存在");
                return Err(ScaffoldError::filesystem(&root, exists));
            }
            warn!("目录已存在，将覆盖其中的文件: {}", root.display());
        }

        let renderer = TemplateRenderer::new();
        let context = TemplateContext::new(&project, &self.config.project);
        self.progress(&format!("创建项目 {project} (包名: {package})"));
        debug!("阶段 {} 完成 ({:?})", stage, started.elapsed());

        // 2. 创建目录
        *stage = Stage::BuildDirectories;
        let stage_started = Instant::now();
        let layout = ProjectLayout::new(&root, package.clone());
        let directories = layout.create()?;
        self.progress(&format!("已创建目录 {}", root.display()));
        debug!("阶段 {} 完成 ({:?})", stage, stage_started.elapsed());

        // 3. 写入文件
        *stage = Stage::EmitFiles;
        let stage_started = Instant::now();
        let emitter = FileEmitter::new(&renderer, layout.root());
        let files = emitter.emit_all(&context)?;
        self.progress(&format!("已写入 {} 个文件", files.len()));
        debug!("阶段 {} 完成 ({:?})", stage, stage_started.elapsed());

        // 4. 初始化版本控制
        *stage = Stage::InitVcs;
        let committed = if self.options.init_vcs && self.config.vcs.enabled {
            let stage_started = Instant::now();
            let committed =
                initialize_repository(self.vcs.as_ref(), &root, &self.config.vcs.commit_message)?;
            if committed {
                self.progress(&format!("已初始化 {} 仓库并创建初始提交", self.vcs.name()));
            } else {
                self.progress(&format!("已初始化 {} 仓库（无新变更）", self.vcs.name()));
            }
            debug!("阶段 {} 完成 ({:?})", stage, stage_started.elapsed());
            committed
        } else {
            info!("跳过版本控制初始化");
            false
        };

        info!("项目 {} 创建完成，耗时 {:?}", project, started.elapsed());

        Ok(ScaffoldReport {
            project,
            package,
            root,
            directories,
            files,
            committed,
        })
    }

    fn progress(&self, line: &str) {
        if self.options.progress {
            println!("{line}");
        }
    }
}

/// 成功后的下一步提示
pub fn next_steps(report: &ScaffoldReport) -> String {
    let mut hint = String::from("\n下一步:\n");
    hint.push_str(&format!("  cd {}\n", report.root.display()));
    hint.push_str("  python -m venv .venv\n");
    hint.push_str("  source .venv/bin/activate\n");
    hint.push_str("  pip install -e \".[dev]\"\n");
    hint.push_str("  pytest\n");
    hint
}
