//! 命令处理逻辑
//!
//! 实现CLI命令的处理逻辑

use crate::cli::args::Args;
use crate::config::TomlConfigLoader;
use crate::error::Result;
use crate::project::{next_steps, Scaffolder};

/// 命令处理器trait
pub trait Command {
    /// 执行命令
    fn execute(&self, args: &Args) -> Result<()>;
}

/// 初始化项目命令
pub struct InitCommand;

impl Command for InitCommand {
    fn execute(&self, args: &Args) -> Result<()> {
        let loader = TomlConfigLoader::default();
        let config = loader.load_or_default(args.config.as_deref())?;

        let scaffolder = Scaffolder::new(config, args.scaffold_options());
        let report = scaffolder.run(&args.project_name)?;

        println!("项目 {} 已创建: {}", report.project, report.root.display());
        print!("{}", next_steps(&report));

        Ok(())
    }
}
