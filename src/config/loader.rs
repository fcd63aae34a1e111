//! 配置加载器实现
//!
//! 提供TOML配置文件解析、环境变量替换和默认路径查找

use crate::config::types::{validate_config, Config};
use crate::error::{ConfigError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// 当前目录下的项目级配置文件名
pub const LOCAL_CONFIG_FILE: &str = "py-scaffold.toml";

/// 配置加载器trait，定义配置加载接口
pub trait ConfigLoader {
    /// 从文件加载配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回
    /// * `Result<Config>` - 加载的配置或错误
    fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Config>;

    /// 从字符串加载配置
    ///
    /// # 参数
    /// * `content` - 配置文件内容
    ///
    /// # 返回
    /// * `Result<Config>` - 加载的配置或错误
    fn load_from_string(&self, content: &str) -> Result<Config>;

    /// 验证配置
    fn validate(&self, config: &Config) -> Result<()>;
}

/// TOML配置加载器实现
#[derive(Debug, Clone)]
pub struct TomlConfigLoader {
    /// 是否启用环境变量替换
    enable_env_substitution: bool,
}

impl Default for TomlConfigLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TomlConfigLoader {
    /// 创建新的TOML配置加载器
    ///
    /// # 参数
    /// * `enable_env_substitution` - 是否启用环境变量替换
    pub fn new(enable_env_substitution: bool) -> Self {
        Self {
            enable_env_substitution,
        }
    }

    /// 按查找顺序加载配置
    ///
    /// 显式路径必须存在；否则依次尝试当前目录的 `py-scaffold.toml`
    /// 和用户配置目录，均不存在时使用内置默认值
    pub fn load_or_default(&self, explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            return self.load_from_file(path);
        }

        for candidate in default_config_candidates() {
            if candidate.is_file() {
                return self.load_from_file(&candidate);
            }
        }

        log::debug!("未找到配置文件，使用默认配置");
        Ok(Config::default())
    }

    /// 替换字符串中的 `${VAR}` 环境变量
    fn substitute_env_vars(&self, content: &str) -> Result<String> {
        if !self.enable_env_substitution {
            return Ok(content.to_string());
        }

        let env_var_regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .map_err(|e| ConfigError::ParseError(format!("正则表达式错误: {e}")))?;

        let mut result = content.to_string();

        for captures in env_var_regex.captures_iter(content) {
            let full_match = &captures[0];
            let var_name = &captures[1];

            match std::env::var(var_name) {
                Ok(value) => {
                    result = result.replace(full_match, &value);
                }
                Err(_) => {
                    return Err(ConfigError::EnvVarError {
                        var: var_name.to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(result)
    }

    /// 解析TOML内容
    fn parse_toml(&self, content: &str) -> Result<Config> {
        let processed_content = self.substitute_env_vars(content)?;

        let config: Config = toml::from_str(&processed_content)
            .map_err(|e| ConfigError::ParseError(format!("TOML解析失败: {e}")))?;

        Ok(config)
    }
}

impl ConfigLoader for TomlConfigLoader {
    fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(format!("读取文件失败: {e}")))?;

        let config = self.parse_toml(&content)?;
        self.validate(&config)?;

        log::info!("成功加载配置文件: {}", path.display());
        log::debug!("配置内容: {config:?}");

        Ok(config)
    }

    fn load_from_string(&self, content: &str) -> Result<Config> {
        let config = self.parse_toml(content)?;
        self.validate(&config)?;

        log::debug!("成功解析配置字符串");

        Ok(config)
    }

    fn validate(&self, config: &Config) -> Result<()> {
        validate_config(config).map_err(|e| ConfigError::ValidationError(e).into())
    }
}

/// 获取用户级默认配置文件路径
///
/// Linux: ~/.config/py-scaffold/config.toml
/// macOS: ~/Library/Application Support/py-scaffold/config.toml
/// Windows: %APPDATA%\py-scaffold\config.toml
pub fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config_dir| config_dir.join("py-scaffold").join("config.toml"))
}

/// 默认配置文件的查找顺序
fn default_config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(path) = get_default_config_path() {
        candidates.push(path);
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const TEST_CONFIG_TOML: &str = r#"
[project]
version = "1.2.0"
description = "Greeting utilities"
requires_python = ">=3.10"

[[project.authors]]
name = "Jane Doe"
email = "jane@example.com"

[vcs]
commit_message = "chore: scaffold project"
"#;

    const TEST_CONFIG_WITH_ENV_VARS: &str = r#"
[vcs]
author_name = "${SCAFFOLD_TEST_AUTHOR}"
author_email = "${SCAFFOLD_TEST_EMAIL}"
"#;

    #[test]
    fn test_toml_parsing() {
        let loader = TomlConfigLoader::new(false);
        let config = loader.load_from_string(TEST_CONFIG_TOML).unwrap();

        assert_eq!(config.project.version, "1.2.0");
        assert_eq!(config.project.requires_python, ">=3.10");
        assert_eq!(config.project.license, "MIT");
        assert_eq!(config.project.authors.len(), 1);
        assert_eq!(config.project.authors[0].name, "Jane Doe");
        assert_eq!(config.vcs.commit_message, "chore: scaffold project");
        assert_eq!(config.vcs.program, "git");
    }

    #[test]
    fn test_empty_string_gives_defaults() {
        let loader = TomlConfigLoader::new(false);
        let config = loader.load_from_string("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_env_var_substitution() {
        env::set_var("SCAFFOLD_TEST_AUTHOR", "Jane Doe");
        env::set_var("SCAFFOLD_TEST_EMAIL", "jane@example.com");

        let loader = TomlConfigLoader::new(true);
        let config = loader.load_from_string(TEST_CONFIG_WITH_ENV_VARS).unwrap();

        assert_eq!(config.vcs.author_name.as_deref(), Some("Jane Doe"));
        assert_eq!(config.vcs.author_email.as_deref(), Some("jane@example.com"));

        env::remove_var("SCAFFOLD_TEST_AUTHOR");
        env::remove_var("SCAFFOLD_TEST_EMAIL");
    }

    #[test]
    #[serial]
    fn test_env_var_substitution_missing_var() {
        env::remove_var("SCAFFOLD_TEST_MISSING");
        let content = r#"
[project]
description = "${SCAFFOLD_TEST_MISSING}"
"#;

        let loader = TomlConfigLoader::new(true);
        let result = loader.load_from_string(content);

        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("SCAFFOLD_TEST_MISSING"));
        }
    }

    #[test]
    fn test_substitute_env_vars_disabled() {
        let loader = TomlConfigLoader::new(false);
        let content = "test ${VAR} content";
        let result = loader.substitute_env_vars(content).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let loader = TomlConfigLoader::new(false);
        let err = loader.load_from_string("[project\nversion = ").unwrap_err();
        assert!(err.to_string().contains("TOML解析失败"));
    }

    #[test]
    fn test_validation_failure_is_reported() {
        let loader = TomlConfigLoader::new(false);
        let err = loader
            .load_from_string("[vcs]\nauthor_email = \"jane@example.com\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("配置验证失败"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, TEST_CONFIG_TOML).unwrap();

        let loader = TomlConfigLoader::new(false);
        let config = loader.load_from_file(&path).unwrap();
        assert_eq!(config.project.description, "Greeting utilities");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let loader = TomlConfigLoader::default();
        let err = loader.load_or_default(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("配置文件不存在"));
    }

    #[test]
    fn test_get_default_config_path() {
        if let Some(path) = get_default_config_path() {
            assert!(path.to_string_lossy().contains("py-scaffold"));
            assert!(path.ends_with("config.toml"));
        }
    }
}
