//! 版本控制初始化
//!
//! 通过 `VersionControl` trait 抽象仓库初始化、暂存和提交，
//! 默认实现调用外部 `git` 程序

use crate::config::VcsConfig;
use crate::error::VcsError;
use std::path::Path;
use std::process::{Command, Output};
use tracing::{debug, info, warn};

/// 版本控制接口
pub trait VersionControl {
    /// 程序名称（用于日志）
    fn name(&self) -> &str;

    /// 在目录中初始化仓库
    fn init(&self, root: &Path) -> Result<(), VcsError>;

    /// 暂存全部文件
    fn stage_all(&self, root: &Path) -> Result<(), VcsError>;

    /// 是否存在已暂存的变更
    fn has_staged_changes(&self, root: &Path) -> Result<bool, VcsError>;

    /// 创建提交
    fn commit(&self, root: &Path, message: &str) -> Result<(), VcsError>;
}

/// 基于 git 命令行的实现
#[derive(Debug, Clone)]
pub struct GitVcs {
    program: String,
    identity: Option<(String, String)>,
}

impl Default for GitVcs {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitVcs {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            identity: None,
        }
    }

    /// 为每次调用指定提交身份，无需全局 user.name/user.email
    pub fn with_identity(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.identity = Some((name.into(), email.into()));
        self
    }

    pub fn from_config(config: &VcsConfig) -> Self {
        let vcs = Self::new(config.program.clone());
        match config.identity() {
            Some((name, email)) => vcs.with_identity(name, email),
            None => vcs,
        }
    }

    /// 构造命令（含身份参数）
    fn command(&self, root: &Path, args: &[&str]) -> Command {
        let mut command = Command::new(&self.program);
        if let Some((name, email)) = &self.identity {
            command
                .arg("-c")
                .arg(format!("user.name={name}"))
                .arg("-c")
                .arg(format!("user.email={email}"));
        }
        command.args(args).current_dir(root);
        command
    }

    /// 执行命令并收集输出
    fn output(&self, root: &Path, args: &[&str]) -> Result<Output, VcsError> {
        debug!("执行: {} {}", self.program, args.join(" "));

        self.command(root, args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VcsError::Unavailable {
                    program: self.program.clone(),
                }
            } else {
                VcsError::Io(e)
            }
        })
    }

    /// 执行命令，非零退出码视为失败
    fn run(&self, root: &Path, args: &[&str]) -> Result<(), VcsError> {
        let output = self.output(root, args)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(self.failure(args, &output))
        }
    }

    fn failure(&self, args: &[&str], output: &Output) -> VcsError {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stderr = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };

        VcsError::CommandFailed {
            command: format!("{} {}", self.program, args.join(" ")),
            status: output.status.to_string(),
            stderr,
        }
    }
}

impl VersionControl for GitVcs {
    fn name(&self) -> &str {
        &self.program
    }

    fn init(&self, root: &Path) -> Result<(), VcsError> {
        self.run(root, &["init", "--quiet"])
    }

    fn stage_all(&self, root: &Path) -> Result<(), VcsError> {
        self.run(root, &["add", "--all"])
    }

    fn has_staged_changes(&self, root: &Path) -> Result<bool, VcsError> {
        let args = ["diff", "--cached", "--quiet"];
        let output = self.output(root, &args)?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(self.failure(&args, &output)),
        }
    }

    fn commit(&self, root: &Path, message: &str) -> Result<(), VcsError> {
        self.run(root, &["commit", "--quiet", "-m", message])
    }
}

/// 初始化仓库、暂存并提交
///
/// 没有可提交的变更时（例如重复运行且内容未变）跳过提交
///
/// # 返回
/// * `Result<bool, VcsError>` - 是否创建了提交
pub fn initialize_repository(
    vcs: &dyn VersionControl,
    root: &Path,
    message: &str,
) -> Result<bool, VcsError> {
    vcs.init(root)?;
    vcs.stage_all(root)?;

    if !vcs.has_staged_changes(root)? {
        warn!("没有需要提交的变更，跳过初始提交");
        return Ok(false);
    }

    vcs.commit(root, message)?;
    info!("已使用 {} 创建初始提交: {}", vcs.name(), message);
    Ok(true)
}
