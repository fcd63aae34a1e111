//! py-scaffold 主程序入口
//!
//! Python项目脚手架工具

use anyhow::{Context, Result};
use py_scaffold::cli::{Args, Command, InitCommand};
use py_scaffold::logging::{LogConfig, LoggingSystem};
use std::collections::HashMap;
use tracing::{debug, error};

fn main() -> Result<()> {
    // 缺少参数时 clap 直接以退出码2结束，不会产生任何文件
    let args = Args::parse_args();

    // handlebars 在 debug 级别会逐条输出渲染细节
    let mut module_levels = HashMap::new();
    module_levels.insert("handlebars".to_string(), log::LevelFilter::Warn);

    let log_config = LogConfig {
        level: args.effective_log_level().into(),
        json_format: args.json_logs,
        module_levels,
        ..Default::default()
    };

    let _logging_system = LoggingSystem::setup_logging(log_config)
        .context("初始化日志系统失败")?;

    debug!("py-scaffold v{} 启动", py_scaffold::VERSION);

    if let Err(e) = InitCommand.execute(&args) {
        error!("命令执行失败: {}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
