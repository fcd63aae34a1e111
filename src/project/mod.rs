//! 项目脚手架模块
//!
//! 提供名称推导、目录创建、模板渲染、文件写入和版本控制初始化功能

pub mod emitter;
pub mod layout;
pub mod naming;
pub mod pipeline;
pub mod templates;
pub mod vcs;

// 重新导出主要类型
pub use naming::{PackageName, ProjectName};
pub use pipeline::{next_steps, ScaffoldOptions, ScaffoldReport, Scaffolder, Stage};
pub use templates::{TemplateContext, TemplateRenderer};
pub use vcs::{GitVcs, VersionControl};
